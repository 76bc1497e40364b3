//! Рендеринг страницы сервиса: форма, результат, график/текстовый фолбэк

use crate::pipeline::SalaryPipeline;
use crate::types::{
    FeatureRow, PredictionResult, DEPARTMENTS, EDUCATION_LEVELS, JOB_TITLES, LOCATIONS,
};

/// Статические сообщения пользователю.
pub const MODEL_MISSING_ERROR: &str = "Model file 'salary_pipeline.json' not found. \
    Please ensure the model file is in the correct directory or contact support.";
pub const DEGRADED_MODE_WARNING: &str = "Cannot generate prediction because the model \
    is unavailable. Please try again later or contact support.";

/// Доступность графика определяется один раз, на этапе компиляции.
/// Это чисто отображение: значения предсказания от неё не зависят.
pub fn charts_available() -> bool {
    cfg!(feature = "charts")
}

/// Целая сумма с разделителями тысяч и символом рупии: ₹1,234,567.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round().max(0.0) as u64;
    let digits = rounded.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("\u{20b9}{grouped}")
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Три пары (подпись, значение) для блока сравнения. Источник значений
/// один и для графика, и для текстового фолбэка.
pub fn comparison_items(result: &PredictionResult) -> [(&'static str, f64); 3] {
    [
        ("Predicted Salary", result.predicted),
        ("Average Salary", result.average),
        ("Max Salary", result.max),
    ]
}

fn select_options(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("<option value=\"{v}\">{v}</option>"))
        .collect()
}

/// Полная страница: форма плюс опциональный баннер и блок результата.
pub fn page(banner: Option<&str>, result_block: Option<&str>) -> String {
    let banner_html = banner
        .map(|text| format!("<p class=\"banner\">{}</p>", escape_html(text)))
        .unwrap_or_default();
    let result_html = result_block.unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>SalarySync Predictor</title>\n</head>\n<body>\n\
         <h1>SalarySync Predictor</h1>\n\
         <p class=\"subtitle\">Discover your earning potential with our \
         AI-powered salary estimation tool.</p>\n\
         {banner_html}\n\
         <form method=\"post\" action=\"/predict\">\n\
         <label>Years of Experience\n\
         <input type=\"range\" name=\"experience\" min=\"0\" max=\"20\" value=\"5\">\n\
         </label>\n\
         <label>Education Level\n<select name=\"education_level\">{education}</select>\n</label>\n\
         <label>Department\n<select name=\"department\">{departments}</select>\n</label>\n\
         <label>Job Title\n<select name=\"job_title\">{titles}</select>\n</label>\n\
         <label>Location\n<select name=\"location\">{locations}</select>\n</label>\n\
         <button type=\"submit\">Predict My Salary</button>\n\
         </form>\n\
         {result_html}\n\
         <p class=\"footer\">\u{00a9} 2025 SalarySync Predictor</p>\n\
         </body>\n</html>",
        education = select_options(EDUCATION_LEVELS),
        departments = select_options(DEPARTMENTS),
        titles = select_options(JOB_TITLES),
        locations = select_options(LOCATIONS),
    )
}

/// Блок результата: оценка + сравнение. График рисуется только когда
/// возможность есть и рендеринг удался; в остальных случаях — текст
/// с теми же значениями. Ошибка графика не влияет на предсказание.
pub fn result_block(result: &PredictionResult, charts: bool) -> String {
    let mut html = format!(
        "<h3>Your Estimated Salary</h3>\n<div class=\"result-box\">{}</div>\n",
        format_inr(result.predicted)
    );

    #[cfg(feature = "charts")]
    if charts {
        match render_chart(result) {
            Ok(svg) => {
                html.push_str(&svg);
                return html;
            }
            Err(e) => {
                tracing::warn!("Chart rendering failed: {e}");
                html.push_str(&format!(
                    "<p class=\"banner\">Failed to generate visualization: {}. \
                     Displaying salary range as text instead.</p>\n",
                    escape_html(&e.to_string())
                ));
            }
        }
    }
    #[cfg(not(feature = "charts"))]
    let _ = charts;

    html.push_str(&text_range(result));
    html
}

/// Обработка одной отправки формы поверх явного хэндла сервиса.
/// В деградированном режиме (`pipeline == None`) предсказание не
/// вызывается вовсе — возвращается страница со статическим предупреждением.
pub fn handle_submission(
    pipeline: Option<&SalaryPipeline>,
    row: &FeatureRow,
    charts: bool,
) -> String {
    let Some(pipeline) = pipeline else {
        return page(Some(DEGRADED_MODE_WARNING), None);
    };

    match pipeline.predict(row) {
        Ok(salary) => {
            let result = PredictionResult::from_estimate(salary);
            let block = result_block(&result, charts);
            page(None, Some(&block))
        }
        Err(e) => {
            tracing::warn!("Prediction failed: {e}");
            let message =
                format!("Prediction failed: {e}. Please check your inputs or contact support.");
            page(Some(&message), None)
        }
    }
}

/// Текстовый вариант блока сравнения.
pub fn text_range(result: &PredictionResult) -> String {
    let mut block = String::from("<h4>Salary Range</h4>\n<ul>\n");
    for (label, amount) in comparison_items(result) {
        block.push_str(&format!("<li>{label}: {}</li>\n", format_inr(amount)));
    }
    block.push_str("</ul>\n");
    block
}

#[cfg(feature = "charts")]
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("non-finite salary value")]
    NonFinite,
    #[error("empty salary range")]
    EmptyRange,
}

/// SVG-диаграмма сравнения зарплат.
#[cfg(feature = "charts")]
pub fn render_chart(result: &PredictionResult) -> Result<String, ChartError> {
    let items = comparison_items(result);

    if items.iter().any(|(_, v)| !v.is_finite()) {
        return Err(ChartError::NonFinite);
    }
    let max = items.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    if max <= 0.0 {
        return Err(ChartError::EmptyRange);
    }

    const WIDTH: f64 = 520.0;
    const HEIGHT: f64 = 260.0;
    const BAR_WIDTH: f64 = 120.0;
    const GAP: f64 = 40.0;
    const PLOT_HEIGHT: f64 = 190.0;
    const COLORS: [&str; 3] = ["#00bcd4", "#b0bec5", "#ff6f61"];

    let mut svg = format!(
        "<svg viewBox=\"0 0 {WIDTH} {HEIGHT}\" xmlns=\"http://www.w3.org/2000/svg\" \
         role=\"img\" aria-label=\"Salary Range Comparison\">\n\
         <text x=\"{}\" y=\"20\" text-anchor=\"middle\">Salary Range Comparison</text>\n",
        WIDTH / 2.0
    );

    for (i, (label, amount)) in items.iter().enumerate() {
        let bar_height = amount / max * PLOT_HEIGHT;
        let x = GAP + i as f64 * (BAR_WIDTH + GAP);
        let y = 40.0 + (PLOT_HEIGHT - bar_height);

        svg.push_str(&format!(
            "<rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{BAR_WIDTH}\" \
             height=\"{bar_height:.1}\" fill=\"{}\"/>\n\
             <text x=\"{cx:.1}\" y=\"{ty:.1}\" text-anchor=\"middle\" \
             font-size=\"12\">{}</text>\n\
             <text x=\"{cx:.1}\" y=\"{ly:.1}\" text-anchor=\"middle\" \
             font-size=\"12\">{label}</text>\n",
            COLORS[i],
            format_inr(*amount),
            cx = x + BAR_WIDTH / 2.0,
            ty = y - 6.0,
            ly = HEIGHT - 10.0,
        ));
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}
