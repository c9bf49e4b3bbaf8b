//! Sync outcome and the orchestrator response record

use serde::{Deserialize, Serialize};

/// Outcome of a successful sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub changed: bool,
    /// Revision before the update; `None` for a fresh clone
    #[serde(rename = "before")]
    pub revision_before: Option<String>,
    /// Revision after switching to the target
    #[serde(rename = "after")]
    pub revision_after: String,
}

impl SyncResult {
    /// Build a result, deriving `changed` from the revisions and whether
    /// local modifications were found.
    pub fn new(revision_before: Option<String>, revision_after: String, local_mods: bool) -> Self {
        let changed = revision_before.as_deref() != Some(revision_after.as_str()) || local_mods;
        Self {
            changed,
            revision_before,
            revision_after,
        }
    }
}

/// The flat record handed back to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleResponse {
    Success(SyncResult),
    Failure { failed: bool, msg: String },
}

impl ModuleResponse {
    pub fn failure(msg: impl Into<String>) -> Self {
        Self::Failure {
            failed: true,
            msg: msg.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Serialize as a single JSON line.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<E: std::fmt::Display> From<std::result::Result<SyncResult, E>> for ModuleResponse {
    fn from(result: std::result::Result<SyncResult, E>) -> Self {
        match result {
            Ok(sync) => Self::Success(sync),
            Err(err) => Self::failure(err.to_string()),
        }
    }
}
