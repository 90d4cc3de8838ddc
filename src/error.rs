//! Error types for continent map generation

use thiserror::Error;

/// Errors that can occur during map configuration or queries
///
/// Degenerate geometry never surfaces here: the pipeline logs it and keeps
/// going, since a slightly imperfect map is still a usable map.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Generation reached a state it cannot continue from
    #[error("generation failed: {0}")]
    GenerationFailed(String),
    /// Requested site index does not exist
    #[error("site not found: {0}")]
    SiteNotFound(usize),
}

/// Result type alias for map operations
pub type Result<T> = std::result::Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MapError::InvalidConfig("width must be positive".into());
        assert_eq!(err.to_string(), "invalid configuration: width must be positive");

        let err = MapError::SiteNotFound(12);
        assert_eq!(err.to_string(), "site not found: 12");
    }
}
