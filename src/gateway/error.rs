use thiserror::Error;

use super::inflight::Action;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Endpoint error: {0}")]
    Endpoint(String),

    #[error("Malformed endpoint response: {0}")]
    Malformed(String),

    #[error("API token not found; set the {0} environment variable")]
    MissingToken(String),

    #[error("A {0} request is already in flight")]
    InFlight(Action),

    #[error("No {0} endpoint configured")]
    NotConfigured(&'static str),
}
