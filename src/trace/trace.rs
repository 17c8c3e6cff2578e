use chrono::Utc;
use serde::Serialize;

/// One line of the refresh trace: what a fetch cycle did to the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshEvent {
    pub timestamp_ms: i64,
    pub ticket: u64,

    /// "applied", "stale" or "failed"
    pub outcome: String,

    pub cycle: Option<u64>,

    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub updated: Vec<String>,
    pub total: Option<usize>,

    pub error: Option<String>,
}

impl RefreshEvent {
    pub fn now(ticket: u64, outcome: &str) -> Self {
        Self {
            timestamp_ms: Utc::now().timestamp_millis(),
            ticket,
            outcome: outcome.to_string(),
            cycle: None,
            added: vec![],
            removed: vec![],
            updated: vec![],
            total: None,
            error: None,
        }
    }

    pub fn with_cycle(mut self, cycle: u64) -> Self {
        self.cycle = Some(cycle);
        self
    }

    pub fn with_changes(mut self, added: &[String], removed: &[String], updated: &[String]) -> Self {
        self.added = added.to_vec();
        self.removed = removed.to_vec();
        self.updated = updated.to_vec();
        self
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }
}
