use std::path::Path;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, warn};

use crate::{COPY_BUFFER_SIZE, TransferError};

/// Progress of a running copy, reported each time a new 10% step is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyProgress {
    pub copied: u64,
    pub total: u64,
    /// Completed percentage, rounded down to a multiple of 10.
    pub percent: u8,
}

impl CopyProgress {
    fn new(copied: u64, total: u64) -> Self {
        let percent = if total == 0 {
            100
        } else {
            ((copied.saturating_mul(10) / total) * 10).min(100) as u8
        };
        Self {
            copied,
            total,
            percent,
        }
    }
}

/// Copies `src` to `dst`, creating missing parent directories of `dst`.
///
/// `on_progress` fires at 0% and then whenever the copy crosses a new 10%
/// step, ending with 100%. A failed copy may leave a partial `dst`; callers
/// decide whether to remove it.
pub async fn copy_file_with_progress<F>(
    src: &Path,
    dst: &Path,
    mut on_progress: F,
) -> Result<u64, TransferError>
where
    F: FnMut(CopyProgress),
{
    let copy_err = |source| TransferError::Copy {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    };

    let mut reader = tokio::fs::File::open(src).await.map_err(copy_err)?;
    let total = reader.metadata().await.map_err(copy_err)?.len();

    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(copy_err)?;
    }
    let mut writer = tokio::fs::File::create(dst).await.map_err(copy_err)?;

    let mut last = CopyProgress::new(0, total);
    on_progress(last);

    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut copied = 0u64;
    loop {
        let n = reader.read(&mut buf).await.map_err(copy_err)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n]).await.map_err(copy_err)?;
        copied += n as u64;

        let progress = CopyProgress::new(copied, total);
        if progress.percent > last.percent {
            on_progress(progress);
            last = progress;
        }
    }
    writer.flush().await.map_err(copy_err)?;
    writer.sync_all().await.map_err(copy_err)?;

    // Empty files already reported 100% up front.
    if last.percent < 100 {
        on_progress(CopyProgress::new(copied, copied.max(total)));
    }

    debug!(
        from = %src.display(),
        to = %dst.display(),
        bytes = copied,
        "file copied"
    );
    Ok(copied)
}

/// Removes `path` if present. Missing files are not an error.
pub async fn remove_if_exists(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "removed"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove file"),
    }
}
