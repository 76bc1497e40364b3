//! Явная схема признаков
//!
//! Колонки объявлены заранее и сопоставляются по имени, а не по позиции
//! и не по типу данных в датасете.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::types::FeatureRow;

/// Объявленное разбиение колонок на категориальные и числовые.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSchema {
    categorical: Vec<String>,
    numeric: Vec<String>,
}

impl FeatureSchema {
    /// Схема зарплатного датасета: четыре категориальные колонки и одна числовая.
    pub fn salary() -> Self {
        Self {
            categorical: vec![
                "Education_Level".to_string(),
                "Job_Title".to_string(),
                "Location".to_string(),
                "Department".to_string(),
            ],
            numeric: vec!["Experience".to_string()],
        }
    }

    pub fn categorical_columns(&self) -> &[String] {
        &self.categorical
    }

    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric
    }

    /// Категориальные значения строки в порядке схемы.
    pub fn categorical_values<'a>(
        &self,
        row: &'a FeatureRow,
    ) -> Result<Vec<&'a str>, PipelineError> {
        self.categorical
            .iter()
            .map(|col| {
                row.categorical(col)
                    .ok_or_else(|| PipelineError::UnknownColumn(col.clone()))
            })
            .collect()
    }

    /// Числовые значения строки в порядке схемы.
    pub fn numeric_values(&self, row: &FeatureRow) -> Result<Vec<f64>, PipelineError> {
        self.numeric
            .iter()
            .map(|col| {
                row.numeric(col)
                    .ok_or_else(|| PipelineError::UnknownColumn(col.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> FeatureRow {
        FeatureRow {
            experience: 3,
            education_level: "MBA".to_string(),
            job_title: "Product Manager".to_string(),
            location: "Pune".to_string(),
            department: "Product".to_string(),
        }
    }

    #[test]
    fn values_follow_schema_order() {
        let schema = FeatureSchema::salary();
        let row = sample_row();
        let cats = schema.categorical_values(&row).unwrap();
        assert_eq!(cats, vec!["MBA", "Product Manager", "Pune", "Product"]);
        let nums = schema.numeric_values(&sample_row()).unwrap();
        assert_eq!(nums, vec![3.0]);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let schema = FeatureSchema {
            categorical: vec!["Missing".to_string()],
            numeric: vec![],
        };
        let err = schema.categorical_values(&sample_row()).unwrap_err();
        assert!(matches!(err, PipelineError::UnknownColumn(_)));
    }
}
