use thiserror::Error;

/// Minimum trimmed query length for suggestions and searches.
pub const MIN_QUERY_CHARS: usize = 3;

/// Failure talking to the weather provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-success status. Displays as the provider's message.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Invalid response from weather service: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Malformed(err.to_string())
    }
}

/// Failure of a user-triggered action. The display text is what gets surfaced.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Please enter at least 3 characters.")]
    QueryTooShort,

    #[error("Failed to load suggestions.")]
    Suggestions(#[source] ProviderError),

    #[error(transparent)]
    Weather(ProviderError),

    #[error("No suggestion at position {0}.")]
    NoSuchSuggestion(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_provider_message() {
        let err = SearchError::Weather(ProviderError::Api {
            status: 404,
            message: "city not found".into(),
        });
        assert_eq!(err.to_string(), "city not found");
    }

    #[test]
    fn suggestion_error_hides_cause() {
        let err = SearchError::Suggestions(ProviderError::Malformed("eof".into()));
        assert_eq!(err.to_string(), "Failed to load suggestions.");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn json_errors_become_malformed() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ProviderError::from(json_err);
        assert!(matches!(err, ProviderError::Malformed(_)));
        assert!(err.to_string().starts_with("Invalid response"));
    }
}
