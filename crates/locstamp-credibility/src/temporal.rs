//! Temporal overlap between stamp and claim windows
use locstamp_core::TimeWindow;

/// Overlap divided by the shorter duration, in `[0, 1]`.
///
/// Zero when the windows are disjoint or the shorter one is empty.
pub fn overlap_ratio(stamp: &TimeWindow, claim: &TimeWindow) -> f64 {
    let overlap = stamp.overlap(claim);
    let shorter = stamp.duration().min(claim.duration());
    if overlap <= 0 || shorter <= 0 {
        return 0.0;
    }
    (overlap as f64 / shorter as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_windows() {
        let window = TimeWindow::new(100, 110);
        assert_eq!(overlap_ratio(&window, &window), 1.0);
    }

    #[test]
    fn test_containment_uses_shorter_window() {
        let stamp = TimeWindow::new(100, 110);
        let claim = TimeWindow::new(0, 86_400);
        assert_eq!(overlap_ratio(&stamp, &claim), 1.0);
        assert_eq!(overlap_ratio(&claim, &stamp), 1.0);
    }

    #[test]
    fn test_partial_overlap() {
        let stamp = TimeWindow::new(100, 110);
        let claim = TimeWindow::new(105, 200);
        assert_eq!(overlap_ratio(&stamp, &claim), 0.5);
    }

    #[test]
    fn test_disjoint_and_degenerate() {
        let stamp = TimeWindow::new(100, 110);
        assert_eq!(overlap_ratio(&stamp, &TimeWindow::new(110, 120)), 0.0);
        assert_eq!(overlap_ratio(&stamp, &TimeWindow::new(0, 50)), 0.0);
        assert_eq!(overlap_ratio(&stamp, &TimeWindow::new(105, 105)), 0.0);
        assert_eq!(overlap_ratio(&stamp, &TimeWindow::new(120, 100)), 0.0);
    }

    #[test]
    fn test_extreme_windows_saturate() {
        let everything = TimeWindow::new(i64::MIN, i64::MAX);
        assert_eq!(overlap_ratio(&TimeWindow::new(i64::MIN, 0), &everything), 1.0);
        assert_eq!(overlap_ratio(&everything, &everything), 1.0);

        let stamp = TimeWindow::new(100, 110);
        assert_eq!(overlap_ratio(&stamp, &everything), 1.0);
        assert_eq!(overlap_ratio(&TimeWindow::new(i64::MAX - 1, i64::MAX), &TimeWindow::new(i64::MIN, i64::MIN + 1)), 0.0);
    }
}
