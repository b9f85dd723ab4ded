//! At-most-one pending request per logical action.
//!
//! A second attempt while the first is still pending is rejected rather than
//! queued or cancelled. The slot frees itself when the guard drops, so an
//! early return or a failed request cannot leave an action locked.

use std::collections::HashSet;
use std::fmt;
use std::sync::Mutex;

use super::error::GatewayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Summarize,
    KeywordExtraction,
    Similarity,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Summarize => "summarize",
            Self::KeywordExtraction => "keyword extraction",
            Self::Similarity => "similarity",
        })
    }
}

#[derive(Debug, Default)]
pub struct InFlight {
    pending: Mutex<HashSet<Action>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, action: Action) -> Result<InFlightGuard<'_>, GatewayError> {
        let mut pending = self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if !pending.insert(action) {
            return Err(GatewayError::InFlight(action));
        }
        Ok(InFlightGuard { gate: self, action })
    }

    pub fn is_pending(&self, action: Action) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(&action)
    }
}

#[derive(Debug)]
pub struct InFlightGuard<'a> {
    gate: &'a InFlight,
    action: Action,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.gate
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.action);
    }
}
