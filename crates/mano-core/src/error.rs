//! Error types for MANO

use thiserror::Error;

/// Core MANO errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ManoError {
    // Landmark errors
    #[error("Malformed landmarks: expected {expected} points, got {actual}")]
    MalformedLandmarks { expected: usize, actual: usize },

    #[error("Landmark {index} has a non-finite coordinate")]
    NonFiniteLandmark { index: usize },

    #[error("Landmark {index} lies outside the normalized canvas")]
    LandmarkOutOfRange { index: usize },

    // Detector errors
    #[error("Detection failed: {0}")]
    DetectionFailed(String),

    #[error("Detector unavailable: {0}")]
    DetectorUnavailable(String),

    // Session errors
    #[error("Session cancelled")]
    SessionCancelled,

    // Config errors
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config I/O error: {0}")]
    ConfigIo(String),
}

impl ManoError {
    /// Fatal errors stop the session; everything else degrades to a no-op tick
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ManoError::DetectorUnavailable(_) | ManoError::ConfigIo(_) | ManoError::InvalidConfig(_)
        )
    }
}

/// Result type for MANO operations
pub type ManoResult<T> = Result<T, ManoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(ManoError::DetectorUnavailable("camera denied".into()).is_fatal());
        assert!(!ManoError::DetectionFailed("timeout".into()).is_fatal());
        assert!(!ManoError::MalformedLandmarks {
            expected: 21,
            actual: 3
        }
        .is_fatal());
    }

    #[test]
    fn test_error_display() {
        let err = ManoError::MalformedLandmarks {
            expected: 21,
            actual: 20,
        };
        assert_eq!(
            err.to_string(),
            "Malformed landmarks: expected 21 points, got 20"
        );
    }
}
