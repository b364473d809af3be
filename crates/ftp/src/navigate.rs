use tracing::debug;

use crate::error::{FtpError, FtpResult};
use crate::session::FtpSession;

/// Walks `path` one segment at a time, creating missing directories.
///
/// For each segment: `CWD`; if that fails, `MKD` then `CWD` once more.
/// A segment that still cannot be entered aborts the walk. Absolute paths
/// start from `/`. Returns the normalized directory that was reached.
pub async fn change_dir_creating(session: &mut dyn FtpSession, path: &str) -> FtpResult<String> {
    let absolute = path.starts_with('/');
    let mut reached = if absolute { String::from("/") } else { String::new() };

    if absolute {
        session.cwd("/").await.map_err(|e| FtpError::Navigate {
            path: "/".into(),
            source: Box::new(e),
        })?;
    }

    for segment in path.split('/').filter(|s| !s.is_empty() && *s != ".") {
        if !reached.is_empty() && !reached.ends_with('/') {
            reached.push('/');
        }
        reached.push_str(segment);

        if session.cwd(segment).await.is_ok() {
            continue;
        }

        debug!(dir = %reached, "directory missing, creating");
        let created = session.mkdir(segment).await;
        if let Err(e) = session.cwd(segment).await {
            let source = created.err().unwrap_or(e);
            return Err(FtpError::Navigate {
                path: reached,
                source: Box::new(source),
            });
        }
    }

    Ok(reached)
}
