use thiserror::Error;

/// Errors surfaced by the mock API. Storage-adapter failures never reach this
/// level, they are contained in the storage layer (logged, default returned).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Request not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("Method {method} not supported for {endpoint}")]
    MethodNotSupported { method: String, endpoint: String },

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// Errors raised during a navigation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouterError {
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Route handler failed: {0}")]
    Handler(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}
