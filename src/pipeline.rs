//! Обученный пайплайн: предобработка + регрессор в одном артефакте

#![allow(non_snake_case)]

use std::fs;
use std::path::Path;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::models::RandomForestRegressor;
use crate::preprocessing::{FeatureSchema, MeanImputer, OneHotEncoder};
use crate::types::{FeatureRow, SalaryRecord};

/// Имя файла артефакта. Обучение перезаписывает его целиком.
pub const ARTIFACT_FILE: &str = "salary_pipeline.json";

pub const N_TREES: usize = 100;
pub const RANDOM_SEED: u64 = 42;

/// Пайплайн предсказания зарплаты: one-hot по категориальным колонкам,
/// импьютация по числовым, random forest поверх. После fit не мутируется;
/// сервис работает с ним только на чтение.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryPipeline {
    schema: FeatureSchema,
    encoder: OneHotEncoder,
    imputer: MeanImputer,
    forest: RandomForestRegressor,
}

impl SalaryPipeline {
    pub fn new() -> Self {
        Self {
            schema: FeatureSchema::salary(),
            encoder: OneHotEncoder::new(),
            imputer: MeanImputer::new(),
            forest: RandomForestRegressor::new(N_TREES, RANDOM_SEED),
        }
    }

    /// Обучение на размеченных записях. Всё или ничего: при любой ошибке
    /// пайплайн остаётся непригодным для предсказаний.
    pub fn fit(&mut self, records: &[SalaryRecord]) -> Result<(), PipelineError> {
        if records.is_empty() {
            return Err(PipelineError::EmptyDataset);
        }

        let rows: Vec<FeatureRow> = records.iter().map(|r| r.features()).collect();

        let categorical: Vec<Vec<&str>> = rows
            .iter()
            .map(|row| self.schema.categorical_values(row))
            .collect::<Result<_, _>>()?;
        let numeric: Vec<Vec<f64>> = rows
            .iter()
            .map(|row| self.schema.numeric_values(row))
            .collect::<Result<_, _>>()?;

        self.encoder.fit(&categorical)?;
        self.imputer.fit(&numeric)?;

        let X = self.feature_matrix(&rows)?;
        let y = Array1::from_iter(records.iter().map(|r| r.salary));
        self.forest.fit(&X, &y)?;

        Ok(())
    }

    /// Кодирование строки в вектор признаков: one-hot блок, затем числовые.
    fn encode_row(&self, row: &FeatureRow) -> Result<Vec<f64>, PipelineError> {
        let categorical = self.schema.categorical_values(row)?;
        let numeric = self.schema.numeric_values(row)?;

        let mut encoded = self.encoder.transform_row(&categorical)?;
        encoded.extend(self.imputer.transform_row(&numeric)?);
        Ok(encoded)
    }

    fn feature_matrix(&self, rows: &[FeatureRow]) -> Result<Array2<f64>, PipelineError> {
        let width = self.encoder.width() + self.schema.numeric_columns().len();
        let mut X = Array2::zeros((rows.len(), width));
        for (i, row) in rows.iter().enumerate() {
            let encoded = self.encode_row(row)?;
            for (j, value) in encoded.into_iter().enumerate() {
                X[[i, j]] = value;
            }
        }
        Ok(X)
    }

    /// Единственная операция контракта артефакта: одна строка -> оценка.
    /// Колонки сопоставляются по имени через схему.
    pub fn predict(&self, row: &FeatureRow) -> Result<f64, PipelineError> {
        let encoded = self.encode_row(row)?;
        self.forest.predict_row(&encoded)
    }

    pub fn predict_batch(&self, rows: &[FeatureRow]) -> Result<Array1<f64>, PipelineError> {
        let X = self.feature_matrix(rows)?;
        self.forest.predict(&X)
    }

    /// Сериализация артефакта. Временный файл не используется: обучение
    /// однопроходное и падает до записи при любой ошибке fit.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PipelineError> {
        if !self.forest.is_fitted() {
            return Err(PipelineError::NotFitted);
        }
        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let json = fs::read_to_string(path)?;
        let pipeline: Self = serde_json::from_str(&json)?;
        if !pipeline.forest.is_fitted() {
            return Err(PipelineError::NotFitted);
        }
        Ok(pipeline)
    }
}

impl Default for SalaryPipeline {
    fn default() -> Self {
        Self::new()
    }
}
