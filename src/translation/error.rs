//! Error taxonomy for the translation pipeline.

use std::time::Duration;
use thiserror::Error;

/// Terminal failure of a single translation request.
///
/// Every variant ends the request it occurs in. Fragments delivered before a
/// mid-stream failure (`MalformedEvent`, `Transport`, `Timeout`) are not
/// retracted.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The requested format has no prompt template.
    #[error("Unsupported format: '{0}' (supported: csv, json)")]
    UnsupportedFormat(String),

    /// The requested model is not one of the supported model tiers.
    #[error("Unsupported model: '{0}' (supported: gpt-3.5-turbo, gpt-4)")]
    UnsupportedModel(String),

    /// The remote service answered with a non-success status.
    #[error("API returned an error: {0}")]
    Upstream(String),

    /// A data event could not be decoded or lacked `choices[0].delta.content`.
    #[error("Malformed stream event: {0}")]
    MalformedEvent(String),

    /// The connection failed or closed before the stream completed.
    #[error("Stream error: {0}")]
    Transport(String),

    /// No chunk arrived within the configured idle interval.
    #[error("Stream timed out after {}s without data", .0.as_secs())]
    Timeout(Duration),
}

impl TranslateError {
    /// Process exit code for this failure.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::UnsupportedFormat(_) | Self::UnsupportedModel(_) => exitcode::USAGE,
            Self::Upstream(_) | Self::Transport(_) | Self::Timeout(_) => exitcode::UNAVAILABLE,
            Self::MalformedEvent(_) => exitcode::DATAERR,
        }
    }

    /// Returns `true` if the error can occur after fragments were delivered.
    pub const fn is_mid_stream(&self) -> bool {
        matches!(
            self,
            Self::MalformedEvent(_) | Self::Transport(_) | Self::Timeout(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            TranslateError::UnsupportedFormat("xml".into()).exit_code(),
            exitcode::USAGE
        );
        assert_eq!(
            TranslateError::Upstream("boom".into()).exit_code(),
            exitcode::UNAVAILABLE
        );
        assert_eq!(
            TranslateError::MalformedEvent("bad".into()).exit_code(),
            exitcode::DATAERR
        );
        assert_eq!(
            TranslateError::Timeout(Duration::from_secs(5)).exit_code(),
            exitcode::UNAVAILABLE
        );
    }

    #[test]
    fn test_mid_stream_classification() {
        assert!(TranslateError::Transport("reset".into()).is_mid_stream());
        assert!(TranslateError::MalformedEvent("x".into()).is_mid_stream());
        assert!(!TranslateError::Upstream("x".into()).is_mid_stream());
        assert!(!TranslateError::UnsupportedFormat("x".into()).is_mid_stream());
    }

    #[test]
    fn test_display_messages() {
        let err = TranslateError::UnsupportedFormat("xml".into());
        assert!(err.to_string().contains("'xml'"));

        let err = TranslateError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "Stream timed out after 30s without data");
    }
}
