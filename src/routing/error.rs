//! Error types for the routing engine

use thiserror::Error;

/// Precondition violations detected before a search starts.
///
/// Infeasible or expensive searches are not errors; they produce a
/// fallback route instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// Grid size is zero, negative, or not a finite number
    #[error("grid size must be positive and finite, got {0}")]
    InvalidGridSize(f64),

    /// A numeric routing option is outside its allowed range
    #[error("invalid route option '{option}': {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    /// Start or end point has a NaN or infinite coordinate
    #[error("{which} point ({x}, {y}) is not finite")]
    NonFiniteEndpoint { which: &'static str, x: f64, y: f64 },
}

impl RouteError {
    /// Create an invalid option error
    pub fn invalid_option(option: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_grid_size_display() {
        let err = RouteError::InvalidGridSize(-1.0);
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_invalid_option_display() {
        let err = RouteError::invalid_option("bend_penalty", "must not be negative");
        assert_eq!(
            err.to_string(),
            "invalid route option 'bend_penalty': must not be negative"
        );
    }
}
