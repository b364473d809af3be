use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use md5::{Digest, Md5};
use slugshare_protocol::CHECKSUM_SUFFIX;
use tracing::debug;

use crate::TransferError;

/// Computes the content digest of a file.
///
/// Implemented by [`Md5Digest`]; tests substitute their own to observe
/// how often the digest is computed.
pub trait FileDigest: Send + Sync {
    /// Returns the lowercase hex digest of the file at `path`.
    fn digest_file(&self, path: &Path) -> std::io::Result<String>;
}

impl<D: FileDigest + ?Sized> FileDigest for Arc<D> {
    fn digest_file(&self, path: &Path) -> std::io::Result<String> {
        (**self).digest_file(path)
    }
}

/// MD5 digest streamed over the file contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Digest;

impl FileDigest for Md5Digest {
    fn digest_file(&self, path: &Path) -> std::io::Result<String> {
        let mut file = std::fs::File::open(path)?;
        let mut hasher = Md5::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = file.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(hex::encode(hasher.finalize()))
    }
}

/// Computes MD5 of `data` and returns the hex-encoded digest.
pub fn checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Returns the sidecar path for `artifact` (`<artifact>.md5`).
pub fn checksum_path(artifact: &Path) -> PathBuf {
    let mut name = OsString::from(artifact.as_os_str());
    name.push(CHECKSUM_SUFFIX);
    PathBuf::from(name)
}

/// Creates checksum sidecars next to artifacts.
///
/// An existing sidecar is reused as-is: its content is not compared with
/// the artifact, so a stale sidecar survives a rebuilt artifact.
#[derive(Debug, Clone, Default)]
pub struct ChecksumGenerator<D = Md5Digest> {
    digest: D,
}

impl ChecksumGenerator<Md5Digest> {
    pub fn new() -> Self {
        Self { digest: Md5Digest }
    }
}

impl<D: FileDigest> ChecksumGenerator<D> {
    /// Creates a generator backed by a custom digest.
    pub fn with_digest(digest: D) -> Self {
        Self { digest }
    }

    /// Ensures `<artifact>.md5` exists and returns its path.
    ///
    /// On the cold path the digest is written with mode 0644. If the write
    /// fails the partially written sidecar is removed.
    pub fn ensure_checksum(&self, artifact: &Path) -> Result<PathBuf, TransferError> {
        let sidecar = checksum_path(artifact);
        if sidecar.exists() {
            debug!(path = %sidecar.display(), "reusing existing checksum");
            return Ok(sidecar);
        }

        let digest = self
            .digest
            .digest_file(artifact)
            .map_err(|source| TransferError::Checksum {
                path: artifact.to_path_buf(),
                source,
            })?;
        debug!(path = %artifact.display(), %digest, "computed checksum");

        if let Err(source) = write_sidecar(&sidecar, &digest) {
            let _ = std::fs::remove_file(&sidecar);
            return Err(TransferError::Checksum {
                path: sidecar,
                source,
            });
        }
        Ok(sidecar)
    }
}

fn write_sidecar(path: &Path, digest: &str) -> std::io::Result<()> {
    std::fs::write(path, digest)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o644))?;
    }

    Ok(())
}
