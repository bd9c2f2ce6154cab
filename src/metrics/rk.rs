// taxgrade: Grade metagenomic classifier parameter sweeps against expected taxonomy.
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//
use indexmap::IndexMap;

/// Rk correlation between two categorical label vectors.
///
/// Rk generalizes the Matthews correlation coefficient to K >= 2 classes:
/// the covariance of the true and predicted class-indicator vectors divided
/// by the geometric mean of their variances, all computed from the K x K
/// confusion matrix. The result lies in [-1, 1], with 1 for identical
/// classifications and -1 for total disagreement.
///
/// Returns 0.0 when either variance term is zero (e.g. every entry in one
/// vector belongs to a single class), the same convention as scipy-stack
/// implementations.
///
/// Both slices must have the same length; entries at the same position refer
/// to the same read.
pub fn rk_correlation(truth: &[&str], predicted: &[&str]) -> f64 {
    assert_eq!(truth.len(), predicted.len());

    // Class indexes in order of first appearance, over both vectors.
    let mut classes: IndexMap<&str, usize> = IndexMap::new();
    for label in truth.iter().chain(predicted.iter()).copied() {
        let next = classes.len();
        classes.entry(label).or_insert(next);
    }
    let n_classes = classes.len();

    let mut confusion = vec![0.0_f64; n_classes * n_classes];
    for (&label_true, &label_pred) in truth.iter().zip(predicted.iter()) {
        confusion[classes[label_true] * n_classes + classes[label_pred]] += 1.0;
    }

    let total = truth.len() as f64;
    let mut correct = 0.0;
    let mut true_counts = vec![0.0_f64; n_classes];
    let mut pred_counts = vec![0.0_f64; n_classes];
    for i in 0..n_classes {
        correct += confusion[i * n_classes + i];
        for j in 0..n_classes {
            true_counts[i] += confusion[i * n_classes + j];
            pred_counts[j] += confusion[i * n_classes + j];
        }
    }

    let cov_tp = correct * total - true_counts.iter().zip(pred_counts.iter()).map(|(t, p)| t * p).sum::<f64>();
    let cov_tt = total * total - true_counts.iter().map(|t| t * t).sum::<f64>();
    let cov_pp = total * total - pred_counts.iter().map(|p| p * p).sum::<f64>();

    if cov_tt == 0.0 || cov_pp == 0.0 {
        return 0.0
    }
    // Single square root of the product keeps perfect agreement at exactly 1.0.
    cov_tp / (cov_tt * cov_pp).sqrt()
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn rk_perfect_agreement() {
        use super::rk_correlation;

        let truth = vec!["p1", "unclassified", "p2", "p1"];
        let predicted = vec!["p1", "unclassified", "p2", "p1"];

        assert_eq!(rk_correlation(&truth, &predicted), 1.0);
    }

    #[test]
    fn rk_total_disagreement_two_classes() {
        use super::rk_correlation;

        let truth = vec!["p1", "p2", "p1", "p2"];
        let predicted = vec!["p2", "p1", "p2", "p1"];

        assert_eq!(rk_correlation(&truth, &predicted), -1.0);
    }

    #[test]
    fn rk_three_classes() {
        use super::rk_correlation;

        // Confusion matrix with 3 correct out of 6 and uniform marginals:
        // Rk = (3*6 - 12) / sqrt(36 - 12) / sqrt(36 - 12) = 0.25.
        let truth = vec!["a", "a", "b", "b", "c", "c"];
        let predicted = vec!["a", "b", "b", "c", "c", "a"];

        assert_eq!(rk_correlation(&truth, &predicted), 0.25);
    }

    #[test]
    fn rk_constant_prediction_is_zero() {
        use super::rk_correlation;

        let truth = vec!["p1", "p2", "p1"];
        let predicted = vec!["p1", "p1", "p1"];

        assert_eq!(rk_correlation(&truth, &predicted), 0.0);
    }

    #[test]
    fn rk_within_bounds() {
        use super::rk_correlation;

        let truth = vec!["a", "b", "c", "a", "b", "c", "a"];
        let predicted = vec!["a", "a", "c", "b", "b", "a", "c"];

        let got = rk_correlation(&truth, &predicted);
        assert!((-1.0..=1.0).contains(&got));
    }
}
