//! Multinomial logistic (softmax) regression — the linear probabilistic
//! member of the voting ensemble.
//!
//! Batch gradient descent with L2 weight decay. The training matrix here is
//! small (a few thousand rows, a few hundred binary features), so full-batch
//! updates converge quickly and keep the fit deterministic without any
//! sampling.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearParams {
    pub epochs: usize,
    pub learning_rate: f64,
    pub l2: f64,
}

impl Default for LinearParams {
    fn default() -> Self {
        Self {
            epochs: 300,
            learning_rate: 0.5,
            l2: 1e-4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxRegression {
    /// (n_classes, n_features)
    weights: Array2<f64>,
    bias: Array1<f64>,
}

impl SoftmaxRegression {
    pub fn fit(x: &Array2<f64>, y: &[usize], n_classes: usize, params: &LinearParams) -> Self {
        let n = x.nrows();
        let d = x.ncols();
        let mut weights: Array2<f64> = Array2::zeros((n_classes, d));
        let mut bias: Array1<f64> = Array1::zeros(n_classes);

        // One-hot targets.
        let mut targets: Array2<f64> = Array2::zeros((n, n_classes));
        for (i, &label) in y.iter().enumerate() {
            targets[[i, label]] = 1.0;
        }

        let n_f = n.max(1) as f64;
        for _ in 0..params.epochs {
            let mut probs = x.dot(&weights.t());
            probs += &bias;
            softmax_rows(&mut probs);

            let diff = &probs - &targets;
            let grad_w = diff.t().dot(x).mapv(|g| g / n_f);
            let grad_b = diff.sum_axis(Axis(0)).mapv(|g| g / n_f);

            weights *= 1.0 - params.learning_rate * params.l2;
            weights -= &grad_w.mapv(|g| g * params.learning_rate);
            bias -= &grad_b.mapv(|g| g * params.learning_rate);
        }

        Self { weights, bias }
    }

    pub fn predict_proba(&self, row: ArrayView1<'_, f64>) -> Array1<f64> {
        let mut scores = self.weights.dot(&row) + &self.bias;
        softmax_inplace(&mut scores);
        scores
    }

    pub fn n_classes(&self) -> usize {
        self.bias.len()
    }

    pub fn n_features(&self) -> usize {
        self.weights.ncols()
    }
}

fn softmax_rows(logits: &mut Array2<f64>) {
    for mut row in logits.axis_iter_mut(Axis(0)) {
        let max = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        if sum > 0.0 {
            row.mapv_inplace(|v| v / sum);
        }
    }
}

fn softmax_inplace(scores: &mut Array1<f64>) {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    scores.mapv_inplace(|v| (v - max).exp());
    let sum = scores.sum();
    if sum > 0.0 {
        scores.mapv_inplace(|v| v / sum);
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn toy() -> (Array2<f64>, Vec<usize>) {
        let x = array![
            [1.0, 0.0, 1.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 0.0],
            [0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0],
        ];
        let y = vec![0, 0, 0, 1, 1, 1];
        (x, y)
    }

    #[test]
    fn separable_data_is_learned() {
        let (x, y) = toy();
        let model = SoftmaxRegression::fit(&x, &y, 2, &LinearParams::default());
        for (i, &label) in y.iter().enumerate() {
            let probs = model.predict_proba(x.row(i));
            assert!(probs[label] > 0.5, "row {i}: {probs:?}");
        }
    }

    #[test]
    fn probabilities_sum_to_one() {
        let (x, y) = toy();
        let model = SoftmaxRegression::fit(&x, &y, 2, &LinearParams::default());
        let probs = model.predict_proba(x.row(0));
        assert!((probs.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn fit_is_deterministic() {
        let (x, y) = toy();
        let a = SoftmaxRegression::fit(&x, &y, 2, &LinearParams::default());
        let b = SoftmaxRegression::fit(&x, &y, 2, &LinearParams::default());
        assert_eq!(a.predict_proba(x.row(3)), b.predict_proba(x.row(3)));
    }

    #[test]
    fn zero_vector_yields_valid_distribution() {
        let (x, y) = toy();
        let model = SoftmaxRegression::fit(&x, &y, 2, &LinearParams::default());
        let zero = Array1::zeros(3);
        let probs = model.predict_proba(zero.view());
        assert!((probs.sum() - 1.0).abs() < 1e-9);
    }
}
