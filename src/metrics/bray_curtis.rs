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

/// Bray-Curtis dissimilarity between two count vectors.
///
/// BC = sum |a_i - b_i| / sum (a_i + b_i), in [0, 1] for non-negative
/// inputs: 0 for identical compositions, 1 for disjoint ones. Returns 0.0
/// when both vectors are all zeros.
///
/// Both slices must have the same length; entries at the same position refer
/// to the same taxon.
pub fn bray_curtis(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len());

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (&ai, &bi) in a.iter().zip(b.iter()) {
        numerator += (ai - bi).abs();
        denominator += ai + bi;
    }

    if denominator == 0.0 {
        return 0.0
    }
    numerator / denominator
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn bray_curtis_identical() {
        use super::bray_curtis;

        let a = vec![10.0, 100.0, 25.0];
        let b = vec![10.0, 100.0, 25.0];

        assert_eq!(bray_curtis(&a, &b), 0.0);
    }

    #[test]
    fn bray_curtis_disjoint() {
        use super::bray_curtis;

        let a = vec![10.0, 0.0, 25.0];
        let b = vec![0.0, 100.0, 0.0];

        assert_eq!(bray_curtis(&a, &b), 1.0);
    }

    #[test]
    fn bray_curtis_partial_overlap() {
        use super::bray_curtis;

        // (2 + 2) / (10 + 10) = 0.2
        let a = vec![6.0, 4.0];
        let b = vec![4.0, 6.0];

        assert_eq!(bray_curtis(&a, &b), 0.2);
    }

    #[test]
    fn bray_curtis_all_zero() {
        use super::bray_curtis;

        let a = vec![0.0, 0.0];
        let b = vec![0.0, 0.0];

        assert_eq!(bray_curtis(&a, &b), 0.0);
    }
}
