//! HTTP client for the gateway API.

mod gateway;

pub use gateway::GatewayClient;

use reqwest::StatusCode;

/// Errors produced by the gateway client.
///
/// The three failure classes callers must distinguish: transport failure
/// ([`Http`](GatewayError::Http) / [`Status`](GatewayError::Status)),
/// gateway-level application errors
/// ([`Application`](GatewayError::Application) /
/// [`Authentication`](GatewayError::Authentication)), and decode failures
/// ([`MissingEnvelope`](GatewayError::MissingEnvelope) /
/// [`Json`](GatewayError::Json)). A payment decline is not an error at all;
/// it arrives as a well-formed reply and is classified by
/// [`crate::outcome::classify`].
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The gateway rejected the merchant credentials.
    #[error("{message}")]
    Authentication { message: String },

    /// Transport-level failure (DNS, TLS, connection reset, timeout, …).
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("server error: status {status}")]
    Status { status: StatusCode },

    /// The gateway processed the request and reported an application-level
    /// error (`resultCode == "Error"`). Not retried automatically.
    #[error("{message}")]
    Application { message: String },

    /// The reply did not contain the expected response envelope.
    #[error("failed to process server response: missing `{0}`")]
    MissingEnvelope(&'static str),

    /// The reply body was not well-formed JSON for the expected schema.
    #[error("failed to process server response")]
    Json(#[from] serde_json::Error),
}

impl GatewayError {
    /// True for transport-class failures (the request may never have
    /// reached the gateway).
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Http(_) | GatewayError::Status { .. })
    }
}
