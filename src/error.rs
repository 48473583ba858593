//! Error types for rank estimation.

use thiserror::Error;

/// Error type for graph ingestion and rank estimation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The link graph is empty or references a page that is not a key.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// A caller-supplied parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The iterative solver hit its iteration cap before converging.
    #[error("no convergence after {iterations} iterations (last max delta {delta:e})")]
    NonConvergence { iterations: usize, delta: f64 },
}

/// Result type for rank estimation.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if damping.is_finite() && damping > 0.0 && damping < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "damping factor must lie in (0, 1), got {damping}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damping_bounds_are_open() {
        assert!(check_damping(0.85).is_ok());
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(check_damping(bad), Err(Error::InvalidParameter(_))),
                "damping={bad} should be rejected"
            );
        }
    }

    #[test]
    fn non_convergence_message_names_iterations() {
        let err = Error::NonConvergence { iterations: 7, delta: 0.5 };
        assert!(err.to_string().contains("7 iterations"), "{err}");
    }
}
