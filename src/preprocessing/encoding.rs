//! One-hot кодирование категориальных колонок

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// One-hot кодировщик. Словарь каждой колонки фиксируется при fit;
/// незнакомая категория при transform кодируется нулевой строкой,
/// а не ошибкой.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    /// Словари по колонкам, в порядке схемы. Порядок категорий — порядок
    /// первого появления в обучающих данных.
    vocabularies: Vec<Vec<String>>,
    is_fitted: bool,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self {
            vocabularies: Vec::new(),
            is_fitted: false,
        }
    }

    /// Обучение словарей. `rows` — строки, каждая содержит значения
    /// категориальных колонок в порядке схемы.
    pub fn fit(&mut self, rows: &[Vec<&str>]) -> Result<(), PipelineError> {
        if rows.is_empty() {
            return Err(PipelineError::EmptyDataset);
        }

        let n_columns = rows[0].len();
        let mut vocabularies: Vec<Vec<String>> = vec![Vec::new(); n_columns];
        let mut seen: Vec<HashMap<String, usize>> = vec![HashMap::new(); n_columns];

        for row in rows {
            for (col, value) in row.iter().enumerate() {
                if !seen[col].contains_key(*value) {
                    seen[col].insert(value.to_string(), vocabularies[col].len());
                    vocabularies[col].push(value.to_string());
                }
            }
        }

        self.vocabularies = vocabularies;
        self.is_fitted = true;
        Ok(())
    }

    /// Суммарная ширина one-hot представления.
    pub fn width(&self) -> usize {
        self.vocabularies.iter().map(|v| v.len()).sum()
    }

    /// Кодирование одной строки. Длина результата всегда `width()`.
    pub fn transform_row(&self, values: &[&str]) -> Result<Vec<f64>, PipelineError> {
        if !self.is_fitted {
            return Err(PipelineError::NotFitted);
        }

        let mut encoded = vec![0.0; self.width()];
        let mut offset = 0;
        for (col, vocabulary) in self.vocabularies.iter().enumerate() {
            if let Some(value) = values.get(col) {
                // Незнакомое значение: все индикаторы колонки остаются нулями
                if let Some(idx) = vocabulary.iter().position(|v| v == value) {
                    encoded[offset + idx] = 1.0;
                }
            }
            offset += vocabulary.len();
        }

        Ok(encoded)
    }
}

impl Default for OneHotEncoder {
    fn default() -> Self {
        Self::new()
    }
}
