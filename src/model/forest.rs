//! Random forest over binary symptom features.
//!
//! Features are 0/1 presence flags, so every split is just a feature index:
//! rows with the symptom absent go left, present go right. Leaves keep the
//! full class distribution of their training rows so the forest can emit
//! probabilities (mean of leaf distributions across trees), which the
//! soft-voting ensemble requires.

use ndarray::{Array1, Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 24,
            min_samples_split: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Leaf {
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        absent: Box<Node>,
        present: Box<Node>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<Node>,
    n_classes: usize,
}

impl RandomForest {
    /// Fit `n_trees` CART trees on bootstrap samples with √d feature
    /// subsampling per node. Deterministic for a given `rng` state.
    pub fn fit(
        x: &Array2<f64>,
        y: &[usize],
        n_classes: usize,
        params: &ForestParams,
        rng: &mut StdRng,
    ) -> Self {
        let n = x.nrows();
        let d = x.ncols();
        let mtry = ((d as f64).sqrt().ceil() as usize).clamp(1, d.max(1));

        let trees = (0..params.n_trees)
            .map(|_| {
                let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                grow(
                    x,
                    y,
                    &sample,
                    n_classes,
                    mtry,
                    params.max_depth,
                    params.min_samples_split,
                    rng,
                )
            })
            .collect();

        Self { trees, n_classes }
    }

    /// Mean of the leaf class distributions across all trees.
    pub fn predict_proba(&self, row: ArrayView1<'_, f64>) -> Array1<f64> {
        let mut acc = Array1::zeros(self.n_classes);
        for tree in &self.trees {
            let dist = descend(tree, row);
            for (slot, p) in acc.iter_mut().zip(dist.iter()) {
                *slot += *p;
            }
        }
        if !self.trees.is_empty() {
            acc /= self.trees.len() as f64;
        }
        acc
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Highest feature index any split tests, if any tree splits at all.
    pub fn max_feature_index(&self) -> Option<usize> {
        self.trees.iter().filter_map(max_split_index).max()
    }
}

fn max_split_index(node: &Node) -> Option<usize> {
    match node {
        Node::Leaf { .. } => None,
        Node::Split {
            feature,
            absent,
            present,
        } => [max_split_index(absent), max_split_index(present)]
            .into_iter()
            .flatten()
            .chain(std::iter::once(*feature))
            .max(),
    }
}

fn descend<'a>(node: &'a Node, row: ArrayView1<'_, f64>) -> &'a [f64] {
    match node {
        Node::Leaf { distribution } => distribution,
        Node::Split {
            feature,
            absent,
            present,
        } => {
            if row[*feature] >= 0.5 {
                descend(present, row)
            } else {
                descend(absent, row)
            }
        }
    }
}

fn class_counts(y: &[usize], idx: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &i in idx {
        counts[y[i]] += 1;
    }
    counts
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let sum_sq: f64 = counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total as f64;
            p * p
        })
        .sum();
    1.0 - sum_sq
}

fn leaf(counts: &[usize], total: usize) -> Node {
    let distribution = if total == 0 {
        vec![0.0; counts.len()]
    } else {
        counts.iter().map(|&c| c as f64 / total as f64).collect()
    };
    Node::Leaf { distribution }
}

#[allow(clippy::too_many_arguments)]
fn grow(
    x: &Array2<f64>,
    y: &[usize],
    idx: &[usize],
    n_classes: usize,
    mtry: usize,
    depth: usize,
    min_samples_split: usize,
    rng: &mut StdRng,
) -> Node {
    let counts = class_counts(y, idx, n_classes);
    let total = idx.len();
    let parent_gini = gini(&counts, total);

    let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
    if depth == 0 || total < min_samples_split || pure {
        return leaf(&counts, total);
    }

    // Candidate features for this node: mtry distinct indices.
    let d = x.ncols();
    let candidates = rand::seq::index::sample(rng, d, mtry.min(d));

    let mut best: Option<(usize, f64)> = None;
    for feature in candidates {
        let mut present_counts = vec![0usize; n_classes];
        let mut present_total = 0usize;
        for &i in idx {
            if x[[i, feature]] >= 0.5 {
                present_counts[y[i]] += 1;
                present_total += 1;
            }
        }
        let absent_total = total - present_total;
        if present_total == 0 || absent_total == 0 {
            continue;
        }
        let absent_counts: Vec<usize> = counts
            .iter()
            .zip(&present_counts)
            .map(|(&all, &p)| all - p)
            .collect();

        let weighted = (present_total as f64 * gini(&present_counts, present_total)
            + absent_total as f64 * gini(&absent_counts, absent_total))
            / total as f64;

        if weighted < parent_gini - 1e-12
            && best.map_or(true, |(_, score)| weighted < score)
        {
            best = Some((feature, weighted));
        }
    }

    let Some((feature, _)) = best else {
        return leaf(&counts, total);
    };

    let (present_idx, absent_idx): (Vec<usize>, Vec<usize>) =
        idx.iter().partition(|&&i| x[[i, feature]] >= 0.5);

    Node::Split {
        feature,
        absent: Box::new(grow(
            x,
            y,
            &absent_idx,
            n_classes,
            mtry,
            depth - 1,
            min_samples_split,
            rng,
        )),
        present: Box::new(grow(
            x,
            y,
            &present_idx,
            n_classes,
            mtry,
            depth - 1,
            min_samples_split,
            rng,
        )),
    }
}
