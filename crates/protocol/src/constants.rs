use std::fmt;

use serde::{Deserialize, Serialize};

/// Suffix appended to an artifact path to name its checksum sidecar.
pub const CHECKSUM_SUFFIX: &str = ".md5";

/// Coordinator key prefix under which share results are published.
pub const SHARE_RESULT_PREFIX: &str = "/rainbond/shareresult/";

/// Phase identifier attached to share events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Copying or uploading the slug.
    #[serde(rename = "slug-share")]
    SlugShare,
    /// Writing the status record to the coordinator.
    #[serde(rename = "callback")]
    Callback,
    /// Final event of a share request.
    #[serde(rename = "latest")]
    Latest,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::SlugShare => "slug-share",
            Step::Callback => "callback",
            Step::Latest => "latest",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome attached to a terminal share event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepStatus {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "failure")]
    Failure,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Success => "success",
            StepStatus::Failure => "failure",
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
