//! The [`RiskTransform`] trait.

/// A pure mapping from one raw measurement to a risk score.
///
/// Implementations must be total over `f64`: every input, including NaN
/// and infinities, returns a value without panicking. Missing
/// observations never reach a transform; callers keep them as `None`.
pub trait RiskTransform {
    /// Maps a raw value to its risk score.
    fn apply(&self, value: f64) -> f64;

    /// Short human-readable name used in logs and output labels.
    fn label(&self) -> String {
        "custom".to_string()
    }

    /// Applies the transform to a column, keeping missing values missing.
    fn apply_column(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
        values.iter().map(|v| v.map(|x| self.apply(x))).collect()
    }
}

impl<F> RiskTransform for F
where
    F: Fn(f64) -> f64,
{
    fn apply(&self, value: f64) -> f64 {
        self(value)
    }
}

/// Passes the raw value through unchanged.
///
/// Used when the quantity itself is averaged, e.g. the raw dew-point
/// depression.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Identity;

impl RiskTransform for Identity {
    fn apply(&self, value: f64) -> f64 {
        value
    }

    fn label(&self) -> String {
        "identity".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_transforms() {
        let double = |x: f64| 2.0 * x;
        assert_eq!(double.apply(3.0), 6.0);
        assert_eq!(double.label(), "custom");
    }

    #[test]
    fn apply_column_keeps_missing() {
        let out = Identity.apply_column(&[Some(1.0), None, Some(-2.5)]);
        assert_eq!(out, vec![Some(1.0), None, Some(-2.5)]);
    }

    #[test]
    fn trait_objects_work() {
        let boxed: Box<dyn RiskTransform> = Box::new(|x: f64| x + 1.0);
        assert_eq!(boxed.apply(1.0), 2.0);
    }
}
