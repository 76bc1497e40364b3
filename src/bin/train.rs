//! Скрипт обучения и точка входа
// Шаги:
// 1. Загрузить CSV из рабочей директории
// 2. Разбить на train/test (80/20, фиксированный seed)
// 3. Обучить пайплайн (one-hot + импьютация + random forest)
// 4. Напечатать метрики на отложенной выборке
// 5. Записать артефакт salary_pipeline.json

use salary_ml::pipeline::ARTIFACT_FILE;
use salary_ml::training::{run_training, DATASET_FILE};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let report = run_training(DATASET_FILE, ARTIFACT_FILE)?;

    println!("Model Trained");
    println!("MSE: {}", report.mse);
    println!("R² Score: {}", report.r2);

    Ok(())
}
