/// Веб-сервис оценки зарплаты

use axum::{
    extract::{Form, State},
    http::Method,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber;

use salary_ml::{pipeline::ARTIFACT_FILE, types::FeatureRow, web, SalaryPipeline};

/// Пайплайн загружается один раз при старте и дальше только читается.
/// None — деградированный режим: форма работает, предсказания отклоняются.
#[derive(Clone)]
struct AppState {
    pipeline: std::sync::Arc<Option<SalaryPipeline>>,
    charts_available: bool,
}

#[tokio::main]
async fn main() {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let pipeline = match SalaryPipeline::load(ARTIFACT_FILE) {
        Ok(pipeline) => {
            tracing::info!("Loaded pipeline artifact '{ARTIFACT_FILE}'");
            Some(pipeline)
        }
        Err(e) => {
            // Деградированный режим, без повторных попыток загрузки
            tracing::error!("Failed to load '{ARTIFACT_FILE}': {e}");
            None
        }
    };

    let charts_available = web::charts_available();
    if !charts_available {
        tracing::warn!("Chart rendering unavailable, salary range will be shown as text");
    }

    let state = AppState {
        pipeline: std::sync::Arc::new(pipeline),
        charts_available,
    };

    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .layer(cors)
        .with_state(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], 8000));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    tracing::info!("Server listening on http://0.0.0.0:8000");
    axum::serve(listener, app).await.unwrap();
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let banner = if state.pipeline.is_none() {
        Some(web::MODEL_MISSING_ERROR)
    } else {
        None
    };
    Html(web::page(banner, None))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
struct PredictForm {
    experience: u32,
    education_level: String,
    job_title: String,
    location: String,
    department: String,
}

/// Одна отправка формы — одно предсказание или одно сообщение об ошибке.
/// Любая ошибка после загрузки модели превращается в текст на странице,
/// процесс продолжает обслуживать запросы.
async fn predict(State(state): State<AppState>, Form(form): Form<PredictForm>) -> Html<String> {
    tracing::info!(
        "Predict request: {} yrs, {}, {}, {}, {}",
        form.experience,
        form.education_level,
        form.job_title,
        form.location,
        form.department
    );

    let row = FeatureRow {
        experience: form.experience,
        education_level: form.education_level,
        job_title: form.job_title,
        location: form.location,
        department: form.department,
    };

    Html(web::handle_submission(
        state.pipeline.as_ref().as_ref(),
        &row,
        state.charts_available,
    ))
}
