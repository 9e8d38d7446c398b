//! Soft-voting ensemble of the three heterogeneous classifiers.
//!
//! Soft voting averages the members' probability outputs instead of taking
//! a majority label vote. The downstream calibration layer adjusts raw
//! confidences, so it needs the smoother, better-calibrated estimates that
//! averaging gives.

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use super::bayes::MultinomialNb;
use super::forest::RandomForest;
use super::linear::SoftmaxRegression;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftVotingEnsemble {
    forest: RandomForest,
    linear: SoftmaxRegression,
    bayes: MultinomialNb,
    n_classes: usize,
}

impl SoftVotingEnsemble {
    pub fn new(
        forest: RandomForest,
        linear: SoftmaxRegression,
        bayes: MultinomialNb,
        n_classes: usize,
    ) -> Self {
        Self {
            forest,
            linear,
            bayes,
            n_classes,
        }
    }

    /// Average of the three members' probability distributions.
    pub fn predict_proba(&self, row: ArrayView1<'_, f64>) -> Array1<f64> {
        let mut probs = self.forest.predict_proba(row);
        probs += &self.linear.predict_proba(row);
        probs += &self.bayes.predict_proba(row);
        probs / 3.0
    }

    /// Most probable class index.
    pub fn predict(&self, row: ArrayView1<'_, f64>) -> usize {
        let probs = self.predict_proba(row);
        probs
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Members and the declared class count must agree for the artifact to
    /// be usable.
    pub fn is_consistent(&self) -> bool {
        self.forest.n_classes() == self.n_classes
            && self.linear.n_classes() == self.n_classes
            && self.bayes.n_classes() == self.n_classes
    }

    /// Whether every member accepts feature vectors of `dimension`. The
    /// forest only records the indices it splits on, so its check is an
    /// upper bound rather than an exact width.
    pub fn fits_features(&self, dimension: usize) -> bool {
        self.linear.n_features() == dimension
            && self.bayes.n_features() == dimension
            && self.forest.max_feature_index().map_or(true, |i| i < dimension)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::super::forest::ForestParams;
    use super::super::linear::LinearParams;
    use super::*;

    fn fitted() -> (SoftVotingEnsemble, ndarray::Array2<f64>, Vec<usize>) {
        let x = array![
            [1.0, 0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        let y = vec![0, 0, 0, 1, 1, 1];
        let mut rng = StdRng::seed_from_u64(42);
        let params = ForestParams {
            n_trees: 15,
            ..ForestParams::default()
        };
        let forest = RandomForest::fit(&x, &y, 2, &params, &mut rng);
        let linear = SoftmaxRegression::fit(&x, &y, 2, &LinearParams::default());
        let bayes = MultinomialNb::fit(&x, &y, 2, 1.0);
        (SoftVotingEnsemble::new(forest, linear, bayes, 2), x, y)
    }

    #[test]
    fn averaged_probabilities_sum_to_one() {
        let (ensemble, x, _) = fitted();
        let probs = ensemble.predict_proba(x.row(0));
        assert!((probs.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn predicts_training_labels() {
        let (ensemble, x, y) = fitted();
        for (i, &label) in y.iter().enumerate() {
            assert_eq!(ensemble.predict(x.row(i)), label, "row {i}");
        }
    }

    #[test]
    fn members_agree_on_class_count() {
        let (ensemble, _, _) = fitted();
        assert!(ensemble.is_consistent());
        assert_eq!(ensemble.n_classes(), 2);
    }

    #[test]
    fn feature_width_mismatch_is_detected() {
        let (ensemble, x, _) = fitted();
        assert!(ensemble.fits_features(x.ncols()));
        assert!(!ensemble.fits_features(x.ncols() - 1));
    }
}
