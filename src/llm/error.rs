use thiserror::Error;

use super::api_error::extract_api_error;

/// Failure of a single completion call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("completion response contained no content")]
    EmptyResponse,

    #[error("network error: {0}")]
    NetworkError(String),
}

impl GenerationError {
    /// Classifies a non-success HTTP status, keeping the server message when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_api_error(body)
            .unwrap_or_else(|| format!("request failed with status {}", status));
        match status {
            401 => GenerationError::Unauthorized(message),
            429 => GenerationError::RateLimited(message),
            500..=599 => GenerationError::ServerError { status, message },
            _ => GenerationError::NetworkError(format!("HTTP {}: {}", status, message)),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Unauthorized(_) => "unauthorized",
            GenerationError::RateLimited(_) => "rate_limited",
            GenerationError::ServerError { .. } => "server_error",
            GenerationError::EmptyResponse => "empty_response",
            GenerationError::NetworkError(_) => "network_error",
        }
    }

    /// Message shown to the user once retries are exhausted.
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerationError::Unauthorized(_) => {
                "API credential is invalid; check SILICONFLOW_API_KEY or --key"
            }
            GenerationError::RateLimited(_) => "Rate limited by the model provider; retry later",
            GenerationError::EmptyResponse => "The model returned an empty reply; try again later",
            GenerationError::ServerError { .. } | GenerationError::NetworkError(_) => {
                "Failed to generate copy; try again later"
            }
        }
    }

    /// False only for a rejected credential.
    pub fn is_transient(&self) -> bool {
        !matches!(self, GenerationError::Unauthorized(_))
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::NetworkError(err.to_string())
    }
}
