//! Error types for the paper-synth server.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

use axum::http::StatusCode;

/// Errors from the Crossref client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by Crossref (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }

    /// Short machine-readable failure kind, used as a log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) | Self::Middleware(_) => "transport",
            Self::RateLimited { .. } => "rate_limited",
            Self::NotFound { .. } => "not_found",
            Self::BadRequest { .. } => "bad_request",
            Self::Parse(_) => "parse",
            Self::Server { .. } => "server",
            Self::UnexpectedStatus { .. } => "unexpected_status",
        }
    }
}

/// Errors from the model backend.
#[derive(thiserror::Error, Debug)]
pub enum GenerationError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Backend answered with a non-success status
    #[error("Model backend returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Response body could not be decoded
    #[error("Failed to parse model response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Backend returned no completion choices
    #[error("Model backend returned no completions")]
    EmptyResponse,

    /// Configured model is not served by the backend
    #[error("Model '{model}' is not available (served: {available})")]
    ModelUnavailable {
        /// Requested model
        model: String,
        /// Comma-separated list of served models
        available: String,
    },
}

impl GenerationError {
    /// Create a status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status { status, message: message.into() }
    }
}

/// Errors surfaced by the request handler.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// A section could not be generated
    #[error("Generation failed for '{label}'")]
    Generation {
        /// Section label whose generation failed
        label: &'static str,
        /// Underlying backend error
        #[source]
        source: GenerationError,
    },

    /// The submitted question was empty or missing
    #[error("Question is required")]
    EmptyQuestion,
}

impl AppError {
    /// Create a generation error for a section.
    #[must_use]
    pub const fn generation(label: &'static str, source: GenerationError) -> Self {
        Self::Generation { label, source }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Generation { .. } => StatusCode::BAD_GATEWAY,
            Self::EmptyQuestion => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Convert to a user-friendly message for the error page.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Generation { .. } => {
                "The text generator could not produce the paper. Please try again later."
                    .to_string()
            }
            Self::EmptyQuestion => "Please enter a research question.".to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Result type alias for handler operations.
pub type AppResult<T> = Result<T, AppError>;
