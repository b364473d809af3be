//! FTP destination: upload the slug and its sidecar.

use std::path::Path;

use slugshare_ftp::{FtpEndpoint, FtpError, FtpSession, change_dir_creating};
use slugshare_protocol::{Step, StepStatus};
use tracing::{error, info, warn};

use crate::error::ShareError;
use crate::item::ShareItem;

impl ShareItem {
    /// Uploads the slug and its `.md5` sidecar to the FTP server named in
    /// the request, into the directory part of `slug_path`.
    pub async fn share_to_ftp(&self) -> Result<(), ShareError> {
        let source = Path::new(&self.request.local_slug_path);

        self.logger
            .info("start sharing slug to FTP", Step::SlugShare, None);

        let sidecar = self.ensure_checksum(source).await?;
        let remote_dir = remote_dir(&self.request.slug_path);
        self.upload_ftp(remote_dir, source, &sidecar).await
    }

    /// Uploads `file` then `checksum` into `path` on the request's server.
    ///
    /// Missing directories along `path` are created. Remote names are the
    /// local file names. Once connected, the session is always closed.
    pub async fn upload_ftp(
        &self,
        path: &str,
        file: &Path,
        checksum: &Path,
    ) -> Result<(), ShareError> {
        let info = &self.request.share_info.slug_info;
        let result: Result<(), FtpError> = async {
            let endpoint = FtpEndpoint::parse(
                &info.ftp_host,
                &info.ftp_port,
                &info.ftp_user,
                &info.ftp_password,
            )?;
            let mut session = self.ftp.connect(&endpoint).await?;
            let uploaded = upload(session.as_mut(), &endpoint, path, file, checksum).await;
            if let Err(e) = session.quit().await {
                warn!(addr = %endpoint.addr(), error = %e, "FTP quit failed");
            }
            uploaded
        }
        .await;

        match result {
            Ok(()) => {
                info!(
                    share_id = %self.request.share_id,
                    host = %info.ftp_host,
                    dir = %path,
                    "slug uploaded"
                );
                self.logger.info(
                    "slug shared to FTP",
                    Step::SlugShare,
                    Some(StepStatus::Success),
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    share_id = %self.request.share_id,
                    host = %info.ftp_host,
                    dir = %path,
                    error = %e,
                    "slug upload failed"
                );
                self.logger.error(
                    "failed to upload slug to FTP",
                    Step::SlugShare,
                    Some(StepStatus::Failure),
                );
                Err(ShareError::Ftp(e))
            }
        }
    }
}

async fn upload(
    session: &mut dyn FtpSession,
    endpoint: &FtpEndpoint,
    path: &str,
    file: &Path,
    checksum: &Path,
) -> Result<(), FtpError> {
    session.login(&endpoint.user, &endpoint.password).await?;
    change_dir_creating(session, path).await?;
    for local in [file, checksum] {
        let name = remote_name(local)?;
        session.put_file(local, name).await?;
    }
    Ok(())
}

fn remote_name(local: &Path) -> Result<&str, FtpError> {
    local
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| FtpError::InvalidConfig(format!("no file name in {}", local.display())))
}

/// Directory part of a `/`-separated path; `/` when there is none.
fn remote_dir(slug_path: &str) -> &str {
    match slug_path.rfind('/') {
        Some(0) | None => "/",
        Some(i) => &slug_path[..i],
    }
}
