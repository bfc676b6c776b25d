use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecoveryError>;

/// Errors that can occur while decoding shares or reconstructing a secret.
///
/// None of the messages carry share values; shares are the sensitive material.
#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("malformed expression: {reason}")]
    MalformedExpression { reason: String },

    #[error("duplicate share id {0}")]
    DuplicateShareId(u32),

    #[error("insufficient shares: {available} available, {required} required")]
    InsufficientShares { available: usize, required: usize },

    #[error("no candidate secrets were produced")]
    NoCandidates,

    #[error("unsupported numeral base {0}, expected 2..=36")]
    InvalidBase(u32),

    #[error("invalid threshold {threshold}, must be at least 1")]
    InvalidThreshold { threshold: usize },

    #[error("invalid document: {reason}")]
    Document { reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RecoveryError {
    pub(crate) fn malformed<S: Into<String>>(reason: S) -> Self {
        Self::MalformedExpression {
            reason: reason.into(),
        }
    }

    /// True for the two kinds that mean "too few shares to vote".
    pub fn is_insufficient(&self) -> bool {
        matches!(self, Self::InsufficientShares { .. } | Self::NoCandidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_shares_display() {
        let err = RecoveryError::InsufficientShares {
            available: 2,
            required: 3,
        };
        assert_eq!(
            err.to_string(),
            "insufficient shares: 2 available, 3 required"
        );
        assert!(err.is_insufficient());
    }

    #[test]
    fn test_no_candidates_is_insufficient() {
        assert!(RecoveryError::NoCandidates.is_insufficient());
        assert!(!RecoveryError::DuplicateShareId(4).is_insufficient());
    }

    #[test]
    fn test_malformed_display() {
        let err = RecoveryError::malformed("unbalanced parentheses");
        assert_eq!(
            err.to_string(),
            "malformed expression: unbalanced parentheses"
        );
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RecoveryError = io_err.into();
        assert!(matches!(err, RecoveryError::Io(_)));
    }
}
