//! Blocking HTTP client for the LLM gateway.

use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use super::error::GatewayError;
use super::types::{parse_chat_response, ChatRequest, SimilarityRequest, SimilarityResponse};
use super::{ChatBackend, SimilarityBackend};
use crate::domain::GatewayConfig;

const MAX_ERROR_BODY_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .user_agent(concat!("regdocs/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    fn token(&self) -> Result<String, GatewayError> {
        std::env::var(&self.config.token_env)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| GatewayError::MissingToken(self.config.token_env.clone()))
    }

    fn post_json<B: Serialize>(&self, url: &str, body: &B) -> Result<Value, GatewayError> {
        let token = self.token()?;
        debug!("POST {}", url);
        let response = self.client.post(url).bearer_auth(token).json(body).send()?;
        let status = response.status();
        let text = response.text()?;

        let parsed = serde_json::from_str::<Value>(&text);
        if status.is_success() {
            return parsed.map_err(|e| GatewayError::Malformed(format!("response is not JSON: {e}")));
        }
        match parsed {
            // `{error: {message}}` bodies are turned into Endpoint errors by the parsers.
            Ok(value) if value.get("error").is_some() => Ok(value),
            _ => Err(GatewayError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            }),
        }
    }
}

impl ChatBackend for HttpGateway {
    fn complete(&self, request: &ChatRequest) -> Result<String, GatewayError> {
        info!("Requesting chat completion from {} ({} messages)", request.model, request.messages.len());
        let value = self.post_json(&self.config.chat_url, request)?;
        parse_chat_response(value)
    }
}

impl SimilarityBackend for HttpGateway {
    fn similarity(&self, request: &SimilarityRequest) -> Result<SimilarityResponse, GatewayError> {
        let url = self.config.similarity_url.as_deref().ok_or(GatewayError::NotConfigured("similarity"))?;
        info!(
            "Requesting similarity for {} documents x {} topics",
            request.docs.len(),
            request.topics.len()
        );
        let value = self.post_json(url, request)?;
        SimilarityResponse::parse(value)
    }
}
