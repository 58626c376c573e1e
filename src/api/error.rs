use thiserror::Error;

/// Errors from the remote guest and message APIs
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never got a response (DNS, connect, TLS, reset)
    #[error("Request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    /// Server answered with a non-2xx status
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// Client was built with an unusable setting
    #[error("Invalid API configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub fn transport(endpoint: &str, err: impl std::fmt::Display) -> Self {
        ApiError::Transport {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    pub fn decode(endpoint: &str, err: impl std::fmt::Display) -> Self {
        ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    /// Endpoint the failure relates to, if any
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ApiError::Transport { endpoint, .. }
            | ApiError::Status { endpoint, .. }
            | ApiError::Decode { endpoint, .. } => Some(endpoint),
            ApiError::Config(_) => None,
        }
    }
}
