//! Slug share flow.
//!
//! A [`ShareItem`] wraps one share request together with its collaborators
//! (event logger, coordinator, FTP connector) and runs it:
//!
//! 1. **Check**: the built slug must exist locally
//! 2. **Checksum**: create or reuse the `.md5` sidecar
//! 3. **Transfer**: copy to a local path, or upload to FTP when the
//!    request carries an FTP host and port
//! 4. **Report**: publish `success`/`failure` to the coordinator

pub mod error;
pub mod events;
mod ftp;
pub mod item;
mod local;
pub mod status;
pub mod types;

#[cfg(test)]
mod testutil;

// Re-export primary types for convenience.
pub use error::ShareError;
pub use events::{EventLevel, EventLogger, RecordingEventLogger, ShareEvent, TracingEventLogger};
pub use item::ShareItem;
pub use status::{StatusReport, update_share_status};
pub use types::{ShareOutcome, SharePhase};
