//! Run tracking for investigation workflows.
//!
//! This module provides a simple in-memory tracker that stores progress
//! logs for long-running investigation runs.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A single log entry with timestamp and message.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Run status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

/// Investigation run metadata and logs.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InvestigationRun {
    pub run_id: String,
    pub status: RunStatus,
    pub logs: Vec<LogEntry>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Result of the run (e.g. outcome summary if successful)
    pub result: Option<serde_json::Value>,
}

/// In-memory run tracker.
#[derive(Clone)]
pub struct RunTracker {
    runs: Arc<RwLock<HashMap<String, InvestigationRun>>>,
}

impl RunTracker {
    /// Create a new run tracker.
    pub fn new() -> Self {
        Self {
            runs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a run under the caller-supplied identifier.
    pub fn start_run(&self, run_id: impl Into<String>) -> String {
        let run_id = run_id.into();
        let run = InvestigationRun {
            run_id: run_id.clone(),
            status: RunStatus::Running,
            logs: vec![],
            created_at: chrono::Utc::now(),
            completed_at: None,
            result: None,
        };
        self.runs.write().insert(run_id.clone(), run);
        run_id
    }

    /// Add a log entry to a run.
    pub fn log(&self, run_id: &str, level: LogLevel, message: impl Into<String>) {
        let mut runs = self.runs.write();
        if let Some(run) = runs.get_mut(run_id) {
            run.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level,
                message: message.into(),
            });
        }
    }

    /// Mark a run as completed with optional result.
    pub fn complete_run(&self, run_id: &str, result: Option<serde_json::Value>) {
        let mut runs = self.runs.write();
        if let Some(run) = runs.get_mut(run_id) {
            run.status = RunStatus::Completed;
            run.completed_at = Some(chrono::Utc::now());
            run.result = result;
        }
    }

    /// Mark a run as failed.
    pub fn fail_run(&self, run_id: &str, error_message: impl Into<String>) {
        let mut runs = self.runs.write();
        if let Some(run) = runs.get_mut(run_id) {
            run.status = RunStatus::Failed;
            run.completed_at = Some(chrono::Utc::now());
            run.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level: LogLevel::Error,
                message: error_message.into(),
            });
        }
    }

    /// Get a run by ID.
    pub fn get_run(&self, run_id: &str) -> Option<InvestigationRun> {
        self.runs.read().get(run_id).cloned()
    }

    /// Get all logs for a run.
    pub fn get_logs(&self, run_id: &str) -> Vec<LogEntry> {
        self.runs
            .read()
            .get(run_id)
            .map(|run| run.logs.clone())
            .unwrap_or_default()
    }
}

impl Default for RunTracker {
    fn default() -> Self {
        Self::new()
    }
}
