//! Обучение: загрузка датасета, train/test split, оценка, артефакт

use std::path::Path;

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::PipelineError;
use crate::models::metrics::{mean_squared_error, r2_score};
use crate::pipeline::{SalaryPipeline, RANDOM_SEED};
use crate::types::{EvaluationReport, FeatureRow, SalaryRecord};

/// Имя обучающего CSV в рабочей директории.
pub const DATASET_FILE: &str = "employee_salary_dataset_600.csv";

pub const TEST_RATIO: f64 = 0.2;

/// Чтение размеченного CSV. Любая битая строка — фатальная ошибка,
/// частичной загрузки нет.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<SalaryRecord>, PipelineError> {
    let mut reader = csv::Reader::from_path(path.as_ref()).map_err(PipelineError::Dataset)?;

    let mut records = Vec::new();
    for row in reader.deserialize::<SalaryRecord>() {
        records.push(row?);
    }

    if records.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }
    Ok(records)
}

/// Детерминированное перемешивание и разбиение на train/test.
pub fn train_test_split(
    records: &[SalaryRecord],
    test_ratio: f64,
    seed: u64,
) -> (Vec<SalaryRecord>, Vec<SalaryRecord>) {
    let mut shuffled: Vec<SalaryRecord> = records.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let test_size = ((records.len() as f64) * test_ratio).round() as usize;
    let train_size = shuffled.len() - test_size;

    let test = shuffled.split_off(train_size);
    (shuffled, test)
}

/// Полный цикл обучения: загрузка, split 80/20, fit, метрики на отложенной
/// выборке, запись артефакта. Артефакт пишется только после успешной
/// оценки — при любой более ранней ошибке прежний файл не трогается.
pub fn run_training(
    dataset_path: impl AsRef<Path>,
    artifact_path: impl AsRef<Path>,
) -> Result<EvaluationReport, PipelineError> {
    let records = load_dataset(dataset_path)?;
    tracing::info!("Loaded {} records", records.len());

    let (train, test) = train_test_split(&records, TEST_RATIO, RANDOM_SEED);
    tracing::info!("Split: {} train / {} test", train.len(), test.len());

    let mut pipeline = SalaryPipeline::new();
    pipeline.fit(&train)?;

    let test_rows: Vec<FeatureRow> = test.iter().map(|r| r.features()).collect();
    let y_true = Array1::from_iter(test.iter().map(|r| r.salary));
    let y_pred = pipeline.predict_batch(&test_rows)?;

    let report = EvaluationReport {
        mse: mean_squared_error(&y_true, &y_pred),
        r2: r2_score(&y_true, &y_pred),
    };

    pipeline.save(artifact_path)?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_sample_csv(name: &str, rows: usize) -> PathBuf {
        let dir = std::env::temp_dir().join("salary_ml_training_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);

        let mut csv = String::from(
            "Experience,Education_Level,Job_Title,Location,Department,Salary\n",
        );
        let educations = ["B.Tech", "M.Tech", "MBA", "PhD"];
        let departments = ["IT", "Data", "HR"];
        let titles = ["Software Engineer", "Data Scientist"];
        let locations = ["Delhi", "Bangalore", "Mumbai"];
        for i in 0..rows {
            let exp = i % 21;
            let salary = 300_000 + 45_000 * exp + 10_000 * (i % 4);
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                exp,
                educations[i % 4],
                titles[i % 2],
                locations[i % 3],
                departments[i % 3],
                salary
            ));
        }
        fs::write(&path, csv).unwrap();
        path
    }

    #[test]
    fn load_dataset_parses_all_rows() {
        let path = write_sample_csv("load.csv", 30);
        let records = load_dataset(&path).unwrap();
        assert_eq!(records.len(), 30);
        assert_eq!(records[0].experience, 0);
        assert_eq!(records[0].education_level, "B.Tech");
        assert_eq!(records[0].salary, 300_000.0);
    }

    #[test]
    fn load_missing_dataset_fails() {
        let err = load_dataset("/nonexistent/dataset.csv").unwrap_err();
        assert!(matches!(err, PipelineError::Dataset(_)));
    }

    #[test]
    fn load_malformed_dataset_fails() {
        let dir = std::env::temp_dir().join("salary_ml_training_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("malformed.csv");
        fs::write(
            &path,
            "Experience,Education_Level,Job_Title,Location,Department,Salary\n\
             not-a-number,B.Tech,Software Engineer,Delhi,IT,500000\n",
        )
        .unwrap();

        assert!(matches!(
            load_dataset(&path),
            Err(PipelineError::Dataset(_))
        ));
    }

    #[test]
    fn split_is_deterministic_and_sized() {
        let path = write_sample_csv("split.csv", 100);
        let records = load_dataset(&path).unwrap();

        let (train_a, test_a) = train_test_split(&records, 0.2, RANDOM_SEED);
        let (train_b, test_b) = train_test_split(&records, 0.2, RANDOM_SEED);

        assert_eq!(train_a.len(), 80);
        assert_eq!(test_a.len(), 20);
        assert_eq!(
            train_a.iter().map(|r| r.salary).collect::<Vec<_>>(),
            train_b.iter().map(|r| r.salary).collect::<Vec<_>>()
        );
        assert_eq!(
            test_a.iter().map(|r| r.salary).collect::<Vec<_>>(),
            test_b.iter().map(|r| r.salary).collect::<Vec<_>>()
        );
    }

    #[test]
    fn run_training_writes_artifact_and_reports() {
        let dataset = write_sample_csv("full.csv", 120);
        let artifact = std::env::temp_dir()
            .join("salary_ml_training_test")
            .join("artifact.json");
        fs::remove_file(&artifact).ok();

        let report = run_training(&dataset, &artifact).unwrap();
        assert!(report.mse >= 0.0);
        assert!(report.r2 <= 1.0);
        assert!(artifact.exists());

        let pipeline = SalaryPipeline::load(&artifact).unwrap();
        let pred = pipeline
            .predict(&FeatureRow {
                experience: 5,
                education_level: "B.Tech".to_string(),
                job_title: "Software Engineer".to_string(),
                location: "Bangalore".to_string(),
                department: "IT".to_string(),
            })
            .unwrap();
        assert!(pred > 0.0);

        fs::remove_file(&artifact).ok();
    }

    #[test]
    fn failed_training_leaves_no_artifact() {
        let artifact = std::env::temp_dir()
            .join("salary_ml_training_test")
            .join("never.json");
        fs::remove_file(&artifact).ok();

        let result = run_training("/nonexistent/dataset.csv", &artifact);
        assert!(result.is_err());
        assert!(!artifact.exists());
    }
}
