//! Checksum sidecars and local file copies for slug sharing.
//!
//! - [`ChecksumGenerator`] creates (or reuses) the `<artifact>.md5` sidecar.
//! - [`copy_file_with_progress`] copies a file and reports progress in
//!   10% steps.

mod checksum;
mod copy;

use std::path::PathBuf;

pub use checksum::{ChecksumGenerator, FileDigest, Md5Digest, checksum_bytes, checksum_path};
pub use copy::{CopyProgress, copy_file_with_progress, remove_if_exists};

/// Copy buffer size: 256 KiB.
pub const COPY_BUFFER_SIZE: usize = 256 * 1024;

/// Errors produced by the transfer crate.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("checksum of {} failed: {source}", path.display())]
    Checksum {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("copy {} -> {} failed: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
