//! Shared provider error type.

use thiserror::Error;

/// Errors that can occur while fetching geographic data.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (connection, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The provider answered with a non-success status code.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body could not be decoded.
    #[error("failed to decode provider response: {0}")]
    Decode(String),

    /// The provider returned no data for the query.
    #[error("provider returned no {0}")]
    Empty(&'static str),

    /// The geocoder found no boundary for the place name.
    #[error("no boundary found for place '{0}'")]
    PlaceNotFound(String),
}

impl ProviderError {
    /// Returns true for the "resource not found / empty" error kind, as
    /// opposed to an unexpected failure.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, ProviderError::Empty(_) | ProviderError::PlaceNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = ProviderError::Status {
            status: 504,
            url: "https://overpass-api.de/api/interpreter".to_string(),
        };
        assert!(err.to_string().contains("504"));
        assert!(err.to_string().contains("overpass-api.de"));
    }

    #[test]
    fn test_empty_result_classification() {
        assert!(ProviderError::Empty("street network").is_empty_result());
        assert!(ProviderError::PlaceNotFound("Nowhere".to_string()).is_empty_result());
        assert!(!ProviderError::Http("timed out".to_string()).is_empty_result());
    }
}
