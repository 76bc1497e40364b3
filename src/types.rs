//! Типы данных для пайплайна зарплат

use serde::{Deserialize, Serialize};

/// Допустимые значения категориальных полей формы.
pub const EDUCATION_LEVELS: &[&str] = &["B.Tech", "M.Tech", "MBA", "PhD"];

pub const DEPARTMENTS: &[&str] = &[
    "IT",
    "Data",
    "HR",
    "Product",
    "Marketing",
    "R&D",
    "Business",
    "Operations",
    "Finance",
];

pub const JOB_TITLES: &[&str] = &[
    "Software Engineer",
    "Data Scientist",
    "Backend Developer",
    "HR Manager",
    "Product Manager",
    "DevOps Engineer",
    "Frontend Developer",
    "Marketing Lead",
    "Research Scientist",
    "Business Analyst",
];

pub const LOCATIONS: &[&str] = &[
    "Delhi",
    "Bangalore",
    "Mumbai",
    "Chennai",
    "Hyderabad",
    "Pune",
    "Kolkata",
];

/// Одна строка признаков. Все пять полей обязательны.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRow {
    #[serde(rename = "Experience")]
    pub experience: u32, // годы
    #[serde(rename = "Education_Level")]
    pub education_level: String,
    #[serde(rename = "Job_Title")]
    pub job_title: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Department")]
    pub department: String,
}

impl FeatureRow {
    /// Значение категориальной колонки по имени.
    pub fn categorical(&self, column: &str) -> Option<&str> {
        match column {
            "Education_Level" => Some(&self.education_level),
            "Job_Title" => Some(&self.job_title),
            "Location" => Some(&self.location),
            "Department" => Some(&self.department),
            _ => None,
        }
    }

    /// Значение числовой колонки по имени.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            "Experience" => Some(self.experience as f64),
            _ => None,
        }
    }
}

/// Строка обучающего датасета: признаки + целевая переменная.
/// Поля продублированы (без serde flatten): csv-десериализация
/// не работает с flatten для числовых типов.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename = "Experience")]
    pub experience: u32,
    #[serde(rename = "Education_Level")]
    pub education_level: String,
    #[serde(rename = "Job_Title")]
    pub job_title: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Salary")]
    pub salary: f64,
}

impl SalaryRecord {
    pub fn features(&self) -> FeatureRow {
        FeatureRow {
            experience: self.experience,
            education_level: self.education_level.clone(),
            job_title: self.job_title.clone(),
            location: self.location.clone(),
            department: self.department.clone(),
        }
    }
}

/// Результат предсказания с производными значениями для отображения.
/// average и max — иллюстративный диапазон, не статистические границы.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted: f64,
    pub average: f64, // 0.9 * predicted
    pub max: f64,     // 1.2 * predicted
}

impl PredictionResult {
    pub fn from_estimate(predicted: f64) -> Self {
        Self {
            predicted,
            average: predicted * 0.9,
            max: predicted * 1.2,
        }
    }
}

/// Метрики качества на отложенной выборке.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub mse: f64,
    pub r2: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_display_values_are_exact() {
        let result = PredictionResult::from_estimate(100_000.0);
        assert_eq!(result.average, 100_000.0 * 0.9);
        assert_eq!(result.max, 100_000.0 * 1.2);
    }

    #[test]
    fn feature_row_lookup_by_name() {
        let row = FeatureRow {
            experience: 5,
            education_level: "B.Tech".to_string(),
            job_title: "Software Engineer".to_string(),
            location: "Bangalore".to_string(),
            department: "IT".to_string(),
        };
        assert_eq!(row.categorical("Department"), Some("IT"));
        assert_eq!(row.categorical("Location"), Some("Bangalore"));
        assert_eq!(row.numeric("Experience"), Some(5.0));
        assert_eq!(row.categorical("Experience"), None);
        assert_eq!(row.numeric("Department"), None);
    }
}
