//! Ансамбль регрессионных деревьев

#![allow(non_snake_case)]

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

#[derive(Debug, Clone, Serialize, Deserialize)]
enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// Регрессионное дерево: split по минимуму суммарного MSE,
/// пороги выбираются случайно из диапазона признака.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegressionTree {
    max_depth: usize,
    min_samples_split: usize,
    root: Option<TreeNode>,
}

const THRESHOLD_TRIES: usize = 10;

impl RegressionTree {
    fn new(max_depth: usize, min_samples_split: usize) -> Self {
        Self {
            max_depth,
            min_samples_split,
            root: None,
        }
    }

    fn fit(
        &mut self,
        X: &Array2<f64>,
        y: &Array1<f64>,
        indices: Vec<usize>,
        rng: &mut StdRng,
    ) -> Result<(), PipelineError> {
        if indices.is_empty() {
            return Err(PipelineError::EmptyDataset);
        }

        self.root = Some(self.build_tree(X, y, 0, indices, rng));
        Ok(())
    }

    fn build_tree(
        &self,
        X: &Array2<f64>,
        y: &Array1<f64>,
        depth: usize,
        indices: Vec<usize>,
        rng: &mut StdRng,
    ) -> TreeNode {
        if depth >= self.max_depth || indices.len() < self.min_samples_split {
            let mean = indices.iter().map(|&i| y[i]).sum::<f64>() / indices.len() as f64;
            return TreeNode::Leaf { value: mean };
        }

        // Поиск лучшего разделения
        let mut best_feature = 0;
        let mut best_threshold = 0.0;
        let mut best_score = f64::INFINITY;

        for feature in 0..X.ncols() {
            let values: Vec<f64> = indices.iter().map(|&i| X[[i, feature]]).collect();
            let min_val = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max_val = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            if (max_val - min_val).abs() < 1e-10 {
                continue;
            }

            for _ in 0..THRESHOLD_TRIES {
                let threshold = rng.gen_range(min_val..=max_val);

                let (left_indices, right_indices): (Vec<usize>, Vec<usize>) =
                    indices.iter().partition(|&&i| X[[i, feature]] < threshold);

                if left_indices.is_empty() || right_indices.is_empty() {
                    continue;
                }

                let left_mean =
                    left_indices.iter().map(|&i| y[i]).sum::<f64>() / left_indices.len() as f64;
                let right_mean =
                    right_indices.iter().map(|&i| y[i]).sum::<f64>() / right_indices.len() as f64;

                let left_mse: f64 = left_indices
                    .iter()
                    .map(|&i| (y[i] - left_mean).powi(2))
                    .sum();
                let right_mse: f64 = right_indices
                    .iter()
                    .map(|&i| (y[i] - right_mean).powi(2))
                    .sum();
                let total_mse = left_mse + right_mse;

                if total_mse < best_score {
                    best_score = total_mse;
                    best_feature = feature;
                    best_threshold = threshold;
                }
            }
        }

        if best_score == f64::INFINITY {
            // Разделить не удалось
            let mean = indices.iter().map(|&i| y[i]).sum::<f64>() / indices.len() as f64;
            return TreeNode::Leaf { value: mean };
        }

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| X[[i, best_feature]] < best_threshold);

        TreeNode::Split {
            feature: best_feature,
            threshold: best_threshold,
            left: Box::new(self.build_tree(X, y, depth + 1, left_indices, rng)),
            right: Box::new(self.build_tree(X, y, depth + 1, right_indices, rng)),
        }
    }

    fn predict_single(&self, sample: &[f64]) -> Result<f64, PipelineError> {
        let mut node = self.root.as_ref().ok_or(PipelineError::NotFitted)?;
        loop {
            match node {
                TreeNode::Leaf { value } => return Ok(*value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if sample[*feature] < *threshold {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                }
            }
        }
    }
}

/// Random forest для регрессии: бэггинг регрессионных деревьев,
/// предсказание — среднее по ансамблю. RNG каждого дерева выводится
/// из базового seed, поэтому повторное обучение на тех же данных
/// даёт идентичную модель.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    n_trees: usize,
    max_depth: usize,
    min_samples_split: usize,
    seed: u64,
    trees: Vec<RegressionTree>,
}

impl RandomForestRegressor {
    pub fn new(n_trees: usize, seed: u64) -> Self {
        Self {
            n_trees,
            max_depth: 12,
            min_samples_split: 4,
            seed,
            trees: Vec::new(),
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    pub fn fit(&mut self, X: &Array2<f64>, y: &Array1<f64>) -> Result<(), PipelineError> {
        let n_samples = X.nrows();
        if n_samples == 0 {
            return Err(PipelineError::EmptyDataset);
        }

        self.trees.clear();
        for t in 0..self.n_trees {
            let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(t as u64));

            // Bootstrap-выборка с возвращением
            let indices: Vec<usize> = (0..n_samples)
                .map(|_| rng.gen_range(0..n_samples))
                .collect();

            let mut tree = RegressionTree::new(self.max_depth, self.min_samples_split);
            tree.fit(X, y, indices, &mut rng)?;
            self.trees.push(tree);
        }

        Ok(())
    }

    /// Предсказание для одной строки признаков.
    pub fn predict_row(&self, sample: &[f64]) -> Result<f64, PipelineError> {
        if self.trees.is_empty() {
            return Err(PipelineError::NotFitted);
        }

        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict_single(sample)?;
        }
        Ok(sum / self.trees.len() as f64)
    }

    pub fn predict(&self, X: &Array2<f64>) -> Result<Array1<f64>, PipelineError> {
        let mut predictions = Array1::zeros(X.nrows());
        for (i, row) in X.rows().into_iter().enumerate() {
            predictions[i] = self.predict_row(row.as_slice().ok_or_else(|| {
                PipelineError::Prediction("non-contiguous feature row".to_string())
            })?)?;
        }
        Ok(predictions)
    }
}
