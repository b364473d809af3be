use serde::{Deserialize, Serialize};

use crate::constants::SHARE_RESULT_PREFIX;

/// Terminal state of a share request as published to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShareStatusValue {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "failure")]
    Failure,
}

/// Status record stored at [`share_result_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareStatus {
    pub share_id: String,
    pub status: ShareStatusValue,
}

impl ShareStatus {
    pub fn new(share_id: impl Into<String>, status: ShareStatusValue) -> Self {
        Self {
            share_id: share_id.into(),
            status,
        }
    }

    /// Encodes the record as the JSON value written to the coordinator.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Coordinator key for a share result: `/rainbond/shareresult/<share_id>`.
pub fn share_result_key(share_id: &str) -> String {
    format!("{SHARE_RESULT_PREFIX}{share_id}")
}
