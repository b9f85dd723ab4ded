//! Client side of the third-party LLM gateway (chat completions and similarity).
//!
//! The backends are traits so the summarization and relevance logic can be
//! exercised without a network; [`HttpGateway`] is the production backend.

pub mod assistant;
pub mod error;
pub mod http;
pub mod inflight;
pub mod keywords;
pub mod types;

pub use assistant::{Assistant, RelevantHit, SummaryAnswer};
pub use error::GatewayError;
pub use http::HttpGateway;
pub use inflight::{Action, InFlight, InFlightGuard};
pub use keywords::{naive_keywords, parse_keyword_response};
pub use types::{ChatMessage, ChatRequest, SimilarityRequest, SimilarityResponse};

pub trait ChatBackend {
    /// Send the request and return the first choice's message content.
    fn complete(&self, request: &ChatRequest) -> Result<String, GatewayError>;
}

pub trait SimilarityBackend {
    fn similarity(&self, request: &SimilarityRequest) -> Result<SimilarityResponse, GatewayError>;
}
