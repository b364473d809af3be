//! Share error types.

use std::path::PathBuf;

use slugshare_ftp::FtpError;
use slugshare_transfer::TransferError;

/// Errors that abort a share request.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("invalid share request: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("slug package not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("checksum failed: {0}")]
    Checksum(#[source] TransferError),

    #[error("copy failed: {0}")]
    Copy(#[source] TransferError),

    #[error("destination {} is the slug package itself", .0.display())]
    SameFile(PathBuf),

    #[error("FTP upload failed: {0}")]
    Ftp(#[from] FtpError),
}
