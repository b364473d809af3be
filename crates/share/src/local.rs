//! Local destination: copy the slug and its sidecar to `slug_path`.

use std::path::Path;

use slugshare_protocol::{Step, StepStatus};
use slugshare_transfer::{checksum_path, copy_file_with_progress, remove_if_exists};
use tracing::{debug, error};

use crate::error::ShareError;
use crate::item::ShareItem;

impl ShareItem {
    /// Copies the slug and its `.md5` sidecar to the local destination.
    ///
    /// Missing parent directories are created. If either copy fails, both
    /// destination files are removed.
    pub async fn share_to_local(&self) -> Result<(), ShareError> {
        let source = Path::new(&self.request.local_slug_path);
        let dest = Path::new(&self.request.slug_path);

        self.logger
            .info("start sharing slug to local path", Step::SlugShare, None);

        let sidecar = self.ensure_checksum(source).await?;

        if is_same_file(source, dest).await {
            self.logger.error(
                "destination is the slug package itself",
                Step::SlugShare,
                Some(StepStatus::Failure),
            );
            return Err(ShareError::SameFile(dest.to_path_buf()));
        }

        let logger = &self.logger;
        let copied = copy_file_with_progress(source, dest, |p| {
            logger.info(
                &format!("copying slug package: {}%", p.percent),
                Step::SlugShare,
                None,
            );
        })
        .await;

        if let Err(e) = copied {
            error!(
                share_id = %self.request.share_id,
                dest = %dest.display(),
                error = %e,
                "slug copy failed"
            );
            remove_if_exists(dest).await;
            self.logger.error(
                "failed to copy slug package",
                Step::SlugShare,
                Some(StepStatus::Failure),
            );
            return Err(ShareError::Copy(e));
        }

        let dest_sidecar = checksum_path(dest);
        if let Err(e) = copy_file_with_progress(&sidecar, &dest_sidecar, |_| {}).await {
            error!(
                share_id = %self.request.share_id,
                dest = %dest_sidecar.display(),
                error = %e,
                "checksum copy failed"
            );
            remove_if_exists(dest).await;
            remove_if_exists(&dest_sidecar).await;
            self.logger.error(
                "failed to copy slug checksum",
                Step::SlugShare,
                Some(StepStatus::Failure),
            );
            return Err(ShareError::Copy(e));
        }

        debug!(dest = %dest.display(), "slug shared to local path");
        self.logger.info(
            "slug shared to local path",
            Step::SlugShare,
            Some(StepStatus::Success),
        );
        Ok(())
    }
}

/// Copying a file onto itself would truncate the slug. On unix this also
/// catches hard links to the slug.
async fn is_same_file(source: &Path, dest: &Path) -> bool {
    let (Ok(a), Ok(b)) = (
        tokio::fs::metadata(source).await,
        tokio::fs::metadata(dest).await,
    ) else {
        return false;
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        a.dev() == b.dev() && a.ino() == b.ino()
    }

    #[cfg(not(unix))]
    {
        let _ = (a, b);
        match (
            tokio::fs::canonicalize(source).await,
            tokio::fs::canonicalize(dest).await,
        ) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}
