//! Summarization and relevance search on top of the gateway backends.

use serde::Serialize;
use tracing::{info, warn};

use super::error::GatewayError;
use super::inflight::{Action, InFlight};
use super::keywords::{naive_keywords, parse_keyword_response, KEYWORD_PROMPT};
use super::types::{ChatMessage, ChatRequest, SimilarityRequest};
use super::{ChatBackend, HttpGateway, SimilarityBackend};
use crate::domain::{Config, DocumentRecord, DEFAULT_RELEVANCE_THRESHOLD};
use crate::summary::{flatten_issues, ComposeOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryAnswer {
    Summary { text: String, documents: usize },
    /// Composer found no summary text; the endpoint was not called.
    NothingToSummarize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelevantHit<'a> {
    #[serde(skip)]
    pub document: &'a DocumentRecord,
    pub identifier: &'a str,
    /// Best score across all topics
    pub score: f64,
    pub topic: String,
}

pub struct Assistant {
    chat: Box<dyn ChatBackend>,
    similarity: Option<Box<dyn SimilarityBackend>>,
    gate: InFlight,
    model: String,
    system_prompt: String,
    relevance_threshold: f64,
}

impl Assistant {
    pub fn new(chat: Box<dyn ChatBackend>, model: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            chat,
            similarity: None,
            gate: InFlight::new(),
            model: model.into(),
            system_prompt: system_prompt.into(),
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
        }
    }

    /// HTTP-backed assistant; similarity search is enabled when an endpoint is configured.
    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let http = HttpGateway::new(config.gateway.clone())?;
        let mut assistant = Self::new(
            Box::new(http.clone()),
            config.gateway.model.clone(),
            config.summary.system_prompt.clone(),
        )
        .with_relevance_threshold(config.gateway.relevance_threshold);
        if config.gateway.similarity_url.is_some() {
            assistant = assistant.with_similarity(Box::new(http));
        }
        Ok(assistant)
    }

    pub fn with_similarity(mut self, backend: Box<dyn SimilarityBackend>) -> Self {
        self.similarity = Some(backend);
        self
    }

    pub fn with_relevance_threshold(mut self, threshold: f64) -> Self {
        self.relevance_threshold = threshold;
        self
    }

    pub fn gate(&self) -> &InFlight {
        &self.gate
    }

    pub fn chat_request(&self, user_content: String) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(self.system_prompt.clone()), ChatMessage::user(user_content)],
        }
    }

    pub fn summarize(&self, outcome: &ComposeOutcome) -> Result<SummaryAnswer, GatewayError> {
        let payload = match outcome {
            ComposeOutcome::Ready(payload) => payload,
            ComposeOutcome::NothingToSummarize { considered } => {
                info!("Nothing to summarize among {} documents", considered);
                return Ok(SummaryAnswer::NothingToSummarize);
            }
        };

        let _guard = self.gate.begin(Action::Summarize)?;
        info!(
            "Summarizing {} documents (~{} tokens, payload {})",
            payload.entries.len(),
            payload.token_estimate(),
            payload.fingerprint()
        );
        let text = self.chat.complete(&self.chat_request(payload.render()))?;
        Ok(SummaryAnswer::Summary { text, documents: payload.entries.len() })
    }

    /// Topics for a relevance search. Never fails: endpoint errors and
    /// malformed replies fall back to tokenizing the query.
    pub fn extract_keywords(&self, query: &str) -> Vec<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(KEYWORD_PROMPT), ChatMessage::user(query)],
        };
        let reply = self
            .gate
            .begin(Action::KeywordExtraction)
            .and_then(|_guard| self.chat.complete(&request));
        match reply {
            Ok(content) => parse_keyword_response(&content).unwrap_or_else(|| {
                warn!("Keyword extraction reply was not a JSON array; tokenizing the query instead");
                naive_keywords(query)
            }),
            Err(err) => {
                warn!("Keyword extraction failed ({}); tokenizing the query instead", err);
                naive_keywords(query)
            }
        }
    }

    /// Documents whose best topic score exceeds the threshold, best first.
    pub fn find_relevant<'a>(
        &self,
        docs: &[&'a DocumentRecord],
        query: &str,
    ) -> Result<Vec<RelevantHit<'a>>, GatewayError> {
        let backend = self.similarity.as_deref().ok_or(GatewayError::NotConfigured("similarity"))?;
        let topics = self.extract_keywords(query);
        if topics.is_empty() || docs.is_empty() {
            return Ok(Vec::new());
        }

        let request = SimilarityRequest {
            docs: docs.iter().map(|doc| relevance_text(doc)).collect(),
            topics: topics.clone(),
        };
        let response = {
            let _guard = self.gate.begin(Action::Similarity)?;
            backend.similarity(&request)?
        };
        if response.similarity.len() != docs.len() {
            return Err(GatewayError::Malformed(format!(
                "expected {} similarity rows, got {}",
                docs.len(),
                response.similarity.len()
            )));
        }

        let mut hits: Vec<RelevantHit<'a>> = docs
            .iter()
            .zip(&response.similarity)
            .filter_map(|(doc, scores)| {
                let doc: &'a DocumentRecord = *doc;
                let (best, score) = scores
                    .iter()
                    .copied()
                    .enumerate()
                    .filter(|(_, s)| s.is_finite())
                    .max_by(|a, b| a.1.total_cmp(&b.1))?;
                (score > self.relevance_threshold).then(|| RelevantHit {
                    document: doc,
                    identifier: doc.pdf_name.as_str(),
                    score,
                    topic: topics.get(best).cloned().unwrap_or_default(),
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(hits)
    }
}

/// Text scored against the topics: the summary when present, otherwise the
/// record's descriptive fields.
fn relevance_text(doc: &DocumentRecord) -> String {
    match doc.summary_text() {
        Some(summary) => summary.to_string(),
        None => format!(
            "{} {} {} {}",
            doc.company_label(),
            doc.drug().unwrap_or_default(),
            doc.indication_label(),
            flatten_issues(&doc.issue_categories)
        )
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" "),
    }
}
