//! Wire types shared by the slug share crates.
//!
//! The job request is produced by the platform API and consumed by the
//! share worker; the status record is produced by the worker and polled
//! from the coordinator by the marketplace service.

pub mod constants;
pub mod status;
pub mod types;

// Re-export primary types for convenience.
pub use constants::{CHECKSUM_SUFFIX, SHARE_RESULT_PREFIX, Step, StepStatus};
pub use status::{ShareStatus, ShareStatusValue, share_result_key};
pub use types::{ShareInfo, SlugInfo, SlugShareRequest};
