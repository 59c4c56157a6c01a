use thiserror::Error;

/// Shown when the search box is empty after trimming.
pub const VALIDATION_MESSAGE: &str = "Please enter a city name";

/// Shown for any failure of either provider call.
pub const LOOKUP_MESSAGE: &str = "City not found or API key issue. Please try again later.";

/// Failure of one of the two outbound provider calls.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to reach {endpoint}: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse {endpoint} response: {source}")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{endpoint} response contained no entries")]
    Empty { endpoint: &'static str },
}

/// Why a search produced no result.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no city name entered")]
    Validation,

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl SearchError {
    /// The single line shown to the user. Lookup causes stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            SearchError::Validation => VALIDATION_MESSAGE,
            SearchError::Lookup(_) => LOOKUP_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_failures_share_one_user_message() {
        let status = SearchError::from(LookupError::Status {
            endpoint: "weather",
            status: reqwest::StatusCode::NOT_FOUND,
            body: r#"{"cod":"404","message":"city not found"}"#.to_string(),
        });
        let empty = SearchError::from(LookupError::Empty { endpoint: "air_pollution" });

        assert_eq!(status.user_message(), LOOKUP_MESSAGE);
        assert_eq!(empty.user_message(), LOOKUP_MESSAGE);
        assert!(!status.user_message().contains("404"));
    }

    #[test]
    fn validation_has_prompt_message() {
        assert_eq!(SearchError::Validation.user_message(), "Please enter a city name");
    }

    #[test]
    fn status_error_keeps_cause_for_logs() {
        let err = LookupError::Status {
            endpoint: "weather",
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: "Invalid API key".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("Invalid API key"));
    }
}
