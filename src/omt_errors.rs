use thiserror::Error;

/// Failures reported by the toolbox.
///
/// Every failure is local to the call that produced it: no solver keeps state
/// across calls, so callers may retry with different inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OmtError {
    #[error("Newton iteration budget exhausted after {iterations} iterations (last step: {last_step:e})")]
    IterationLimitReached { iterations: usize, last_step: f64 },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Invalid solver parameter: {0}")]
    InvalidSolverParameter(String),

    #[error("Invalid orbital input: {0}")]
    InvalidOrbitalInput(String),

    #[error("Operation requires a bound orbit, got eccentricity {0}")]
    UnboundOrbit(f64),
}

impl OmtError {
    /// True for the iteration-budget-exhausted failure.
    pub fn is_iteration_limit(&self) -> bool {
        matches!(self, OmtError::IterationLimitReached { .. })
    }

    /// True for the geometric degeneracy failure.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, OmtError::DegenerateGeometry(_))
    }
}

/// Reject a non-positive or non-finite gravitational parameter.
pub(crate) fn check_mu(mu: f64) -> Result<(), OmtError> {
    if mu.is_finite() && mu > 0.0 {
        Ok(())
    } else {
        Err(OmtError::InvalidOrbitalInput(format!(
            "gravitational parameter must be positive and finite, got {mu}"
        )))
    }
}

#[cfg(test)]
mod omt_errors_test {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OmtError::IterationLimitReached {
            iterations: 1000,
            last_step: 0.5,
        };
        assert_eq!(
            err.to_string(),
            "Newton iteration budget exhausted after 1000 iterations (last step: 5e-1)"
        );
        assert!(err.is_iteration_limit());
        assert!(!err.is_degenerate());

        let err = OmtError::DegenerateGeometry("collinear observations".into());
        assert_eq!(err.to_string(), "Degenerate geometry: collinear observations");
        assert!(err.is_degenerate());
    }

    #[test]
    fn test_check_mu() {
        assert!(check_mu(398600.0).is_ok());
        assert!(matches!(
            check_mu(0.0),
            Err(OmtError::InvalidOrbitalInput(_))
        ));
        assert!(check_mu(-1.0).is_err());
        assert!(check_mu(f64::NAN).is_err());
    }
}
