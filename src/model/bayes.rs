//! Multinomial naive Bayes with Laplace smoothing.

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    class_log_prior: Array1<f64>,
    /// (n_classes, n_features) log feature likelihoods.
    feature_log_prob: Array2<f64>,
}

impl MultinomialNb {
    /// `alpha` is the Laplace smoothing constant (1.0 in the stock setup).
    pub fn fit(x: &Array2<f64>, y: &[usize], n_classes: usize, alpha: f64) -> Self {
        let n = x.nrows();
        let d = x.ncols();

        let mut class_counts = vec![0usize; n_classes];
        let mut feature_counts: Array2<f64> = Array2::zeros((n_classes, d));
        for (i, &label) in y.iter().enumerate() {
            class_counts[label] += 1;
            for j in 0..d {
                feature_counts[[label, j]] += x[[i, j]];
            }
        }

        let n_f = n.max(1) as f64;
        let class_log_prior = Array1::from_iter(
            class_counts
                .iter()
                .map(|&c| ((c as f64).max(f64::MIN_POSITIVE) / n_f).ln()),
        );

        let mut feature_log_prob = Array2::zeros((n_classes, d));
        for c in 0..n_classes {
            let class_total: f64 = feature_counts.row(c).sum();
            let denom = class_total + alpha * d as f64;
            for j in 0..d {
                feature_log_prob[[c, j]] = ((feature_counts[[c, j]] + alpha) / denom).ln();
            }
        }

        Self {
            class_log_prior,
            feature_log_prob,
        }
    }

    pub fn predict_proba(&self, row: ArrayView1<'_, f64>) -> Array1<f64> {
        let mut log_joint = self.feature_log_prob.dot(&row) + &self.class_log_prior;

        // Log-sum-exp normalization back to a probability distribution.
        let max = log_joint.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        log_joint.mapv_inplace(|v| (v - max).exp());
        let sum = log_joint.sum();
        if sum > 0.0 {
            log_joint.mapv_inplace(|v| v / sum);
        }
        log_joint
    }

    pub fn n_classes(&self) -> usize {
        self.class_log_prior.len()
    }

    pub fn n_features(&self) -> usize {
        self.feature_log_prob.ncols()
    }
}
