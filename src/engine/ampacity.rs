//! Conductor ampacity table and cable-size selection
//!
//! Each row rates one conductor cross-section at one run length. Selection
//! is a two-dimensional covering search: the chosen size must be adequate
//! for the requested run length AND the requested current simultaneously,
//! and the smallest adequate entry wins.

/// One (size, rated length, rated current) reference triple
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmpacityRow {
    pub size_mm2: f64,
    pub rated_length_m: f64,
    pub rated_current_a: f64,
}

const fn row(size_mm2: f64, rated_length_m: f64, rated_current_a: f64) -> AmpacityRow {
    AmpacityRow {
        size_mm2,
        rated_length_m,
        rated_current_a,
    }
}

/// Copper conductor ratings for three-phase runs in cable tray,
/// derated for voltage drop at 50/100/150 m runs.
pub const AMPACITY_TABLE: &[AmpacityRow] = &[
    row(1.5, 50.0, 14.0),
    row(1.5, 100.0, 10.0),
    row(1.5, 150.0, 8.0),
    row(2.5, 50.0, 20.0),
    row(2.5, 100.0, 16.0),
    row(2.5, 150.0, 12.0),
    row(4.0, 50.0, 27.0),
    row(4.0, 100.0, 22.0),
    row(4.0, 150.0, 18.0),
    row(6.0, 50.0, 35.0),
    row(6.0, 100.0, 29.0),
    row(6.0, 150.0, 24.0),
    row(10.0, 50.0, 49.0),
    row(10.0, 100.0, 41.0),
    row(10.0, 150.0, 34.0),
    row(16.0, 50.0, 65.0),
    row(16.0, 100.0, 56.0),
    row(16.0, 150.0, 47.0),
    row(25.0, 50.0, 86.0),
    row(25.0, 100.0, 75.0),
    row(25.0, 150.0, 64.0),
    row(35.0, 50.0, 105.0),
    row(35.0, 100.0, 93.0),
    row(35.0, 150.0, 81.0),
    row(50.0, 50.0, 130.0),
    row(50.0, 100.0, 116.0),
    row(50.0, 150.0, 102.0),
    row(70.0, 50.0, 165.0),
    row(70.0, 100.0, 149.0),
    row(70.0, 150.0, 133.0),
    row(95.0, 50.0, 200.0),
    row(95.0, 100.0, 182.0),
    row(95.0, 150.0, 164.0),
];

/// Select the smallest conductor size (mm²) adequate for both the given
/// run length and the given current, or `None` when the table tops out.
///
/// Rows failing either bound are discarded; the remainder is ordered by
/// (rated length, rated current) ascending and the first row wins, so the
/// result is never undersized in either dimension.
pub fn select_cable_size(length_m: f64, current_a: f64) -> Option<f64> {
    AMPACITY_TABLE
        .iter()
        .filter(|r| r.rated_length_m >= length_m && r.rated_current_a >= current_a)
        .min_by(|a, b| {
            a.rated_length_m
                .total_cmp(&b.rated_length_m)
                .then(a.rated_current_a.total_cmp(&b.rated_current_a))
        })
        .map(|r| r.size_mm2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_smallest_adequate_size() {
        // 80 m run at 30 A: 100 m rows apply; 10 mm² carries 41 A ≥ 30 A
        assert_eq!(select_cable_size(80.0, 30.0), Some(10.0));
    }

    #[test]
    fn test_short_run_uses_short_rating() {
        // 40 m run at 30 A: 50 m rows apply; 6 mm² carries 35 A
        assert_eq!(select_cable_size(40.0, 30.0), Some(6.0));
    }

    #[test]
    fn test_result_covers_both_dimensions() {
        for &(length, current) in &[(30.0, 12.0), (90.0, 55.0), (140.0, 100.0)] {
            let size = select_cable_size(length, current).unwrap();
            let covering = AMPACITY_TABLE
                .iter()
                .find(|r| {
                    r.size_mm2 == size
                        && r.rated_length_m >= length
                        && r.rated_current_a >= current
                })
                .unwrap();
            assert!(covering.rated_length_m >= length);
            assert!(covering.rated_current_a >= current);
        }
    }

    #[test]
    fn test_none_when_table_insufficient() {
        // Longer than any rated run
        assert_eq!(select_cable_size(200.0, 10.0), None);
        // More current than any 150 m rating
        assert_eq!(select_cable_size(150.0, 500.0), None);
    }

    #[test]
    fn test_boundary_values_match_exactly() {
        // Exactly at a rated (length, current) pair
        assert_eq!(select_cable_size(50.0, 14.0), Some(1.5));
        assert_eq!(select_cable_size(150.0, 164.0), Some(95.0));
    }
}
