//! Statistical helper functions for agrorisk.
//!
//! Series handled here carry gaps as `None`. Summaries skip gaps and return
//! `None` when nothing is left, so an empty reference period or an all-gap
//! year can never be confused with a genuine zero risk.

mod regression;

pub use regression::{LinearFit, linear_regression};

/// Mean of the present values. Returns `None` if every value is missing.
pub fn mean_present(values: &[Option<f64>]) -> Option<f64> {
    let (sum, n) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(s, n), &v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Minimum of the present values. Returns `None` if every value is missing.
pub fn min_present(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().reduce(f64::min)
}

/// Maximum of the present values. Returns `None` if every value is missing.
pub fn max_present(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().reduce(f64::max)
}

/// Trailing mean over `window` consecutive calendar years.
///
/// `years` must be sorted ascending and aligned with `values`. The result at
/// position `i` averages the years `years[i] - window + 1 ..= years[i]` and
/// is `None` unless every one of those years is present in `years` with a
/// value. The first `window - 1` years are therefore always `None`, and a
/// window reaching into a gap in the year index is `None` as well.
///
/// # Panics
///
/// Panics if `years` and `values` differ in length.
pub fn trailing_mean(years: &[i32], values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    assert_eq!(
        years.len(),
        values.len(),
        "trailing_mean: years and values must have equal length"
    );
    if window == 0 {
        return vec![None; values.len()];
    }
    let span = window as i64 - 1;
    (0..values.len())
        .map(|i| {
            if i < span as usize {
                return None;
            }
            let first = i - span as usize;
            // Consecutive years inside the slice means no hole in the index.
            if i64::from(years[i]) - i64::from(years[first]) != span {
                return None;
            }
            let slice = &values[first..=i];
            if slice.iter().any(Option::is_none) {
                return None;
            }
            mean_present(slice)
        })
        .collect()
}

/// R's default quantile algorithm (type=7).
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_present_skips_gaps() {
        let v = [Some(1.0), None, Some(3.0)];
        assert_relative_eq!(mean_present(&v).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_present_summaries_all_missing() {
        let v = [None, None];
        assert_eq!(mean_present(&v), None);
        assert_eq!(min_present(&v), None);
        assert_eq!(max_present(&v), None);
    }

    #[test]
    fn test_zero_is_not_missing() {
        let v = [Some(0.0), None];
        assert_eq!(mean_present(&v), Some(0.0));
        assert_eq!(min_present(&v), Some(0.0));
    }

    #[test]
    fn test_min_max_present() {
        let v = [Some(0.4), None, Some(-1.0), Some(2.5)];
        assert_eq!(min_present(&v), Some(-1.0));
        assert_eq!(max_present(&v), Some(2.5));
    }

    #[test]
    fn test_trailing_mean_warmup() {
        let years = [2000, 2001, 2002, 2003];
        let v = [Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let r = trailing_mean(&years, &v, 3);
        assert_eq!(r[0], None);
        assert_eq!(r[1], None);
        assert_relative_eq!(r[2].unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(r[3].unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_trailing_mean_window_one_is_identity() {
        let years = [2000, 2005];
        let v = [Some(1.5), None];
        assert_eq!(trailing_mean(&years, &v, 1), vec![Some(1.5), None]);
    }

    #[test]
    fn test_trailing_mean_gap_in_index() {
        // 1960..=1965 absent from the index.
        let years = [1957, 1958, 1959, 1966, 1967, 1968];
        let v = vec![Some(1.0); 6];
        let r = trailing_mean(&years, &v, 2);
        assert_eq!(r, vec![None, Some(1.0), Some(1.0), None, Some(1.0), Some(1.0)]);
    }

    #[test]
    fn test_trailing_mean_missing_value_poisons_window() {
        let years = [2000, 2001, 2002, 2003];
        let v = [Some(1.0), None, Some(3.0), Some(5.0)];
        let r = trailing_mean(&years, &v, 2);
        assert_eq!(r[1], None);
        assert_eq!(r[2], None);
        assert_relative_eq!(r[3].unwrap(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_trailing_mean_zero_window() {
        assert_eq!(trailing_mean(&[2000], &[Some(1.0)], 0), vec![None]);
    }

    #[test]
    fn test_quantile_type7_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        // p=0.1 → h=0.4, lo=0, hi=1 → 1 + 0.4*(2-1) = 1.4
        assert_relative_eq!(quantile_type7(&sorted, 0.1), 1.4, epsilon = 1e-10);
        assert_relative_eq!(quantile_type7(&sorted, 0.5), 3.0, epsilon = 1e-10);
        assert_relative_eq!(quantile_type7(&sorted, 1.0), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_quantile_type7_r_crossvalidation() {
        // R: quantile(1:10, 0.3, type=7) = 3.7
        let sorted: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        assert_relative_eq!(quantile_type7(&sorted, 0.3), 3.7, epsilon = 1e-10);
    }

    #[test]
    #[should_panic(expected = "quantile_type7: input must not be empty")]
    fn test_quantile_type7_empty_panics() {
        quantile_type7(&[], 0.5);
    }
}
