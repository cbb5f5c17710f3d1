//! Case publication boundary.
//!
//! Reconciled investigation rows are forwarded to the downstream
//! case-management system as fire-and-forget messages. Delivery and
//! retry belong to the collaborator behind [`CasePublisher`], not to
//! this core.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Failure reported by a publisher implementation.
#[derive(Debug, thiserror::Error)]
#[error("publish error: {0}")]
pub struct PublishError(pub String);

/// One case message, keyed by document number and routed by a
/// caller-supplied label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseMessage {
    pub label: String,
    pub document_number: String,
    pub payload: serde_json::Value,
}

/// Message-bus boundary for case records.
#[async_trait]
pub trait CasePublisher: Send + Sync {
    async fn publish(&self, message: &CaseMessage) -> Result<(), PublishError>;
}

/// In-memory publisher that records every message, for tests and local
/// development.
#[derive(Default)]
pub struct RecordingPublisher {
    messages: parking_lot::Mutex<Vec<CaseMessage>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages accepted so far, in publication order.
    pub fn messages(&self) -> Vec<CaseMessage> {
        self.messages.lock().clone()
    }
}

#[async_trait]
impl CasePublisher for RecordingPublisher {
    async fn publish(&self, message: &CaseMessage) -> Result<(), PublishError> {
        self.messages.lock().push(message.clone());
        Ok(())
    }
}
