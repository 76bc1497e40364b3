//! Заполнение пропусков в числовых колонках

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Импьютер средним значением. На этом датасете числовая колонка
/// (Experience) ожидается заполненной; импьютер защитный.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeanImputer {
    means: Vec<f64>,
    is_fitted: bool,
}

impl MeanImputer {
    pub fn new() -> Self {
        Self {
            means: Vec::new(),
            is_fitted: false,
        }
    }

    /// Обучение: среднее по каждой числовой колонке (NaN пропускаются).
    pub fn fit(&mut self, rows: &[Vec<f64>]) -> Result<(), PipelineError> {
        if rows.is_empty() {
            return Err(PipelineError::EmptyDataset);
        }

        let n_columns = rows[0].len();
        let mut means = vec![0.0; n_columns];

        for col in 0..n_columns {
            let mut sum = 0.0;
            let mut count = 0usize;
            for row in rows {
                let value = row[col];
                if value.is_finite() {
                    sum += value;
                    count += 1;
                }
            }
            means[col] = if count > 0 { sum / count as f64 } else { 0.0 };
        }

        self.means = means;
        self.is_fitted = true;
        Ok(())
    }

    /// Замена NaN на среднее соответствующей колонки.
    pub fn transform_row(&self, values: &[f64]) -> Result<Vec<f64>, PipelineError> {
        if !self.is_fitted {
            return Err(PipelineError::NotFitted);
        }

        Ok(values
            .iter()
            .enumerate()
            .map(|(col, &value)| {
                if value.is_finite() {
                    value
                } else {
                    self.means.get(col).copied().unwrap_or(0.0)
                }
            })
            .collect())
    }
}

impl Default for MeanImputer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_finite_values_through() {
        let mut imputer = MeanImputer::new();
        imputer.fit(&[vec![2.0], vec![4.0], vec![6.0]]).unwrap();
        assert_eq!(imputer.transform_row(&[5.0]).unwrap(), vec![5.0]);
    }

    #[test]
    fn replaces_nan_with_column_mean() {
        let mut imputer = MeanImputer::new();
        imputer.fit(&[vec![2.0], vec![4.0], vec![6.0]]).unwrap();
        assert_eq!(imputer.transform_row(&[f64::NAN]).unwrap(), vec![4.0]);
    }

    #[test]
    fn nan_in_training_data_is_skipped() {
        let mut imputer = MeanImputer::new();
        imputer.fit(&[vec![1.0], vec![f64::NAN], vec![3.0]]).unwrap();
        assert_eq!(imputer.transform_row(&[f64::NAN]).unwrap(), vec![2.0]);
    }

    #[test]
    fn transform_before_fit_fails() {
        let imputer = MeanImputer::new();
        assert!(matches!(
            imputer.transform_row(&[1.0]),
            Err(PipelineError::NotFitted)
        ));
    }
}
