use crate::LtError;

/// Floating point type used throughout system
pub type Real = f64;

/// Reject NaN/Infinity with a named error instead of letting them flow
/// downstream. `what` names the offending field or metric.
pub fn ensure_finite(v: Real, what: &str) -> Result<Real, LtError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(LtError::NonFinite {
            what: what.to_string(),
            value: v,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_finite_passes_values_through() {
        assert_eq!(ensure_finite(-3.5, "x").unwrap(), -3.5);
        assert!(ensure_finite(Real::INFINITY, "x").is_err());
        assert!(ensure_finite(Real::NEG_INFINITY, "x").is_err());
    }

    #[test]
    fn error_names_the_offending_metric() {
        let err = ensure_finite(Real::INFINITY, "val_loss").unwrap_err();
        assert!(format!("{err}").contains("val_loss"));
    }
}
