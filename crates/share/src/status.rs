//! Share result publishing.

use slugshare_coordinator::Coordinator;
use slugshare_protocol::{ShareStatus, ShareStatusValue, Step, StepStatus, share_result_key};
use tracing::{error, info};

use crate::events::EventLogger;

/// Whether a share result reached the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusReport {
    /// The put succeeded; pollers will see the record.
    Recorded,
    /// The put was attempted and failed.
    NotRecorded { reason: String },
}

impl StatusReport {
    pub fn is_recorded(&self) -> bool {
        matches!(self, StatusReport::Recorded)
    }
}

/// Writes `{share_id, status}` to `/rainbond/shareresult/<share_id>`.
///
/// A single put, no retry. A failed put is logged and returned as
/// [`StatusReport::NotRecorded`]; it is never an `Err`.
pub async fn update_share_status(
    coordinator: &dyn Coordinator,
    logger: &dyn EventLogger,
    share_id: &str,
    status: ShareStatusValue,
) -> StatusReport {
    let key = share_result_key(share_id);
    let value = match ShareStatus::new(share_id, status).to_json() {
        Ok(v) => v,
        Err(e) => return not_recorded(logger, share_id, e.to_string()),
    };

    match coordinator.put(&key, &value).await {
        Ok(()) => {
            info!(share_id, key = %key, "share result stored");
            logger.info("share result stored", Step::Latest, Some(StepStatus::Success));
            StatusReport::Recorded
        }
        Err(e) => not_recorded(logger, share_id, e.to_string()),
    }
}

fn not_recorded(logger: &dyn EventLogger, share_id: &str, reason: String) -> StatusReport {
    error!(share_id, error = %reason, "failed to store share result");
    logger.error(
        "failed to store share result",
        Step::Callback,
        Some(StepStatus::Failure),
    );
    StatusReport::NotRecorded { reason }
}
