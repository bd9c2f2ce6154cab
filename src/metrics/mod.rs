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

// Agreement metric implementations
pub mod bray_curtis;
pub mod rk;

/// Rounds to four decimal places, the precision both reported scores use.
pub fn round4(value: f64) -> f64 {
    (value * 1e4).round() / 1e4
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn round4_rounds_to_four_decimals() {
        use super::round4;

        assert_eq!(round4(0.123449), 0.1234);
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(1.0 / 3.0), 0.3333);
        assert_eq!(round4(-2.0 / 3.0), -0.6667);
        assert_eq!(round4(1.0), 1.0);
    }
}
