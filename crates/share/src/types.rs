//! Data types for the share flow.

use crate::error::ShareError;
use crate::status::StatusReport;

/// Where a share request is in its lifecycle.
///
/// `Pending → {LocalCopying | FtpUploading} → {Succeeded | Failed}`.
/// `Failed` is also reached straight from `Pending` when the slug is
/// missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePhase {
    Pending,
    LocalCopying,
    FtpUploading,
    Succeeded,
    Failed,
}

impl SharePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SharePhase::Succeeded | SharePhase::Failed)
    }
}

/// Result of [`ShareItem::run`](crate::ShareItem::run).
///
/// The transfer result and the status write are reported separately: a
/// successful transfer may still have an unrecorded status.
#[derive(Debug)]
pub struct ShareOutcome {
    pub result: Result<(), ShareError>,
    pub report: StatusReport,
}

impl ShareOutcome {
    /// `true` when the slug was shared and the result was recorded.
    pub fn is_success(&self) -> bool {
        self.result.is_ok() && self.report.is_recorded()
    }
}
