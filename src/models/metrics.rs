//! Метрики качества регрессии

use ndarray::Array1;

/// Среднеквадратичная ошибка.
pub fn mean_squared_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    (y_true - y_pred).mapv(|e| e * e).mean().unwrap_or(0.0)
}

/// Коэффициент детерминации R². Для константного y возвращает 0.
pub fn r2_score(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }

    let mean = y_true.mean().unwrap_or(0.0);
    let ss_tot: f64 = y_true.mapv(|v| (v - mean).powi(2)).sum();
    if ss_tot < 1e-10 {
        return 0.0;
    }
    let ss_res: f64 = (y_true - y_pred).mapv(|e| e * e).sum();

    1.0 - ss_res / ss_tot
}
