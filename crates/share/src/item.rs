//! Share request wrapper and dispatcher.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use slugshare_coordinator::Coordinator;
use slugshare_ftp::{FtpConnector, TcpFtpConnector};
use slugshare_protocol::{ShareStatusValue, SlugShareRequest, Step, StepStatus};
use slugshare_transfer::{ChecksumGenerator, FileDigest, Md5Digest, TransferError};
use tracing::{debug, info, warn};

use crate::error::ShareError;
use crate::events::EventLogger;
use crate::status::{StatusReport, update_share_status};
use crate::types::{ShareOutcome, SharePhase};

/// One share request and the collaborators needed to carry it out.
pub struct ShareItem {
    pub(crate) request: SlugShareRequest,
    pub(crate) logger: Arc<dyn EventLogger>,
    pub(crate) coordinator: Arc<dyn Coordinator>,
    pub(crate) ftp: Arc<dyn FtpConnector>,
    pub(crate) checksums: ChecksumGenerator<Arc<dyn FileDigest>>,
    phase: Mutex<SharePhase>,
}

impl ShareItem {
    /// Decodes a JSON share request.
    ///
    /// `make_logger` receives the request's event id and returns the logger
    /// that will receive this request's events.
    pub fn from_slice<F>(
        payload: &[u8],
        coordinator: Arc<dyn Coordinator>,
        make_logger: F,
    ) -> Result<Self, ShareError>
    where
        F: FnOnce(&str) -> Arc<dyn EventLogger>,
    {
        let request: SlugShareRequest = serde_json::from_slice(payload)?;
        let logger = make_logger(&request.share_info.event_id);
        Ok(Self::new(request, logger, coordinator))
    }

    /// Wraps an already decoded request.
    pub fn new(
        request: SlugShareRequest,
        logger: Arc<dyn EventLogger>,
        coordinator: Arc<dyn Coordinator>,
    ) -> Self {
        Self {
            request,
            logger,
            coordinator,
            ftp: Arc::new(TcpFtpConnector::default()),
            checksums: ChecksumGenerator::with_digest(Arc::new(Md5Digest)),
            phase: Mutex::new(SharePhase::Pending),
        }
    }

    /// Replaces the FTP connector.
    pub fn with_ftp_connector(mut self, ftp: Arc<dyn FtpConnector>) -> Self {
        self.ftp = ftp;
        self
    }

    /// Replaces the digest used for new checksum sidecars.
    pub fn with_digest(mut self, digest: Arc<dyn FileDigest>) -> Self {
        self.checksums = ChecksumGenerator::with_digest(digest);
        self
    }

    pub fn request(&self) -> &SlugShareRequest {
        &self.request
    }

    pub fn share_id(&self) -> &str {
        &self.request.share_id
    }

    pub fn phase(&self) -> SharePhase {
        *self.phase.lock().unwrap()
    }

    fn set_phase(&self, phase: SharePhase) {
        *self.phase.lock().unwrap() = phase;
    }

    /// Shares the slug to FTP or to a local path.
    ///
    /// Fails with [`ShareError::NotFound`] before touching any destination
    /// when the slug has not been built. Does not publish a status; see
    /// [`run`](Self::run).
    pub async fn share_service(&self) -> Result<(), ShareError> {
        let source = Path::new(&self.request.local_slug_path);
        debug!(
            share_id = %self.request.share_id,
            source = %source.display(),
            destination = %self.request.slug_path,
            "sharing slug"
        );

        if tokio::fs::metadata(source).await.is_err() {
            self.logger.error(
                "slug package does not exist, build the service first",
                Step::SlugShare,
                Some(StepStatus::Failure),
            );
            return Err(ShareError::NotFound(source.to_path_buf()));
        }

        if self.request.share_info.slug_info.has_ftp_endpoint() {
            self.set_phase(SharePhase::FtpUploading);
            self.share_to_ftp().await
        } else {
            self.set_phase(SharePhase::LocalCopying);
            self.share_to_local().await
        }
    }

    /// Publishes `status` for this request's share id.
    pub async fn update_share_status(&self, status: ShareStatusValue) -> StatusReport {
        update_share_status(
            self.coordinator.as_ref(),
            self.logger.as_ref(),
            &self.request.share_id,
            status,
        )
        .await
    }

    /// Shares the slug and publishes the outcome exactly once.
    pub async fn run(&self) -> ShareOutcome {
        let result = self.share_service().await;
        let status = match &result {
            Ok(()) => {
                self.set_phase(SharePhase::Succeeded);
                info!(share_id = %self.request.share_id, "slug shared");
                ShareStatusValue::Success
            }
            Err(e) => {
                self.set_phase(SharePhase::Failed);
                warn!(share_id = %self.request.share_id, error = %e, "slug share failed");
                ShareStatusValue::Failure
            }
        };

        let report = self.update_share_status(status).await;
        ShareOutcome { result, report }
    }

    /// Ensures the checksum sidecar of the source slug.
    ///
    /// Hashing runs on the blocking pool. Failure is fatal for both transfer
    /// strategies: a failure event is emitted and no sidecar path is handed
    /// to the copy or upload.
    pub(crate) async fn ensure_checksum(&self, source: &Path) -> Result<PathBuf, ShareError> {
        let checksums = self.checksums.clone();
        let artifact = source.to_path_buf();
        let result = tokio::task::spawn_blocking(move || checksums.ensure_checksum(&artifact))
            .await
            .unwrap_or_else(|e| {
                Err(TransferError::Checksum {
                    path: source.to_path_buf(),
                    source: std::io::Error::other(e),
                })
            });

        result.map_err(|e| {
            warn!(source = %source.display(), error = %e, "checksum generation failed");
            self.logger.error(
                "failed to generate checksum",
                Step::SlugShare,
                Some(StepStatus::Failure),
            );
            ShareError::Checksum(e)
        })
    }
}
