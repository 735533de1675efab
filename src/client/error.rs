use thiserror::Error;

/// Failures while talking to the storage GraphQL endpoint
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error calling {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL errors: {}", messages.join("; "))]
    GraphQL { messages: Vec<String> },

    #[error("Unexpected response shape: expected {expected}, got {actual}")]
    UnexpectedShape { expected: String, actual: String },

    #[error("Could not decode `{field}`: {message}")]
    Decode { field: String, message: String },

    #[error("Upload resource {path} is not readable: {source}")]
    Resource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Connection level failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Transport { .. } | ClientError::Timeout { .. })
    }

    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout { url: url.to_string() }
        } else if err.is_builder() {
            ClientError::InvalidRequest(err.to_string())
        } else {
            ClientError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}
