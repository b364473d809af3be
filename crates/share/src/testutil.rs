//! Shared test fixtures.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};

use slugshare_ftp::{BoxFuture, FtpConnector, FtpEndpoint, FtpError, FtpResult, FtpSession};
use slugshare_protocol::SlugShareRequest;
use slugshare_transfer::FileDigest;

/// Builds a local share request from `src` to `dest`.
pub fn request(src: &Path, dest: &Path, share_id: &str) -> SlugShareRequest {
    let mut req = SlugShareRequest {
        share_id: share_id.to_string(),
        local_slug_path: src.to_string_lossy().into_owned(),
        slug_path: dest.to_string_lossy().into_owned(),
        service_alias: "app".into(),
        ..Default::default()
    };
    req.share_info.event_id = format!("evt-{share_id}");
    req
}

/// Digest that always fails.
pub struct FailingDigest;

impl FileDigest for FailingDigest {
    fn digest_file(&self, _path: &Path) -> std::io::Result<String> {
        Err(std::io::Error::other("digest unavailable"))
    }
}

#[derive(Default)]
struct Script {
    ops: Vec<String>,
    missing: HashSet<String>,
    uploads: HashMap<String, Vec<u8>>,
    fail_connect: bool,
    fail_login: bool,
    fail_stor: bool,
}

/// Connector whose sessions record every command instead of talking to a
/// server.
#[derive(Default)]
pub struct ScriptedConnector {
    script: Arc<Mutex<Script>>,
}

impl ScriptedConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directories that do not exist until created with `MKD`.
    pub fn missing_dirs(self, dirs: &[&str]) -> Self {
        self.script
            .lock()
            .unwrap()
            .missing
            .extend(dirs.iter().map(|d| d.to_string()));
        self
    }

    pub fn fail_connect(self) -> Self {
        self.script.lock().unwrap().fail_connect = true;
        self
    }

    pub fn fail_login(self) -> Self {
        self.script.lock().unwrap().fail_login = true;
        self
    }

    pub fn fail_stor(self) -> Self {
        self.script.lock().unwrap().fail_stor = true;
        self
    }

    pub fn ops(&self) -> Vec<String> {
        self.script.lock().unwrap().ops.clone()
    }

    pub fn uploaded(&self, name: &str) -> Option<Vec<u8>> {
        self.script.lock().unwrap().uploads.get(name).cloned()
    }
}

impl FtpConnector for ScriptedConnector {
    fn connect<'a>(
        &'a self,
        endpoint: &'a FtpEndpoint,
    ) -> BoxFuture<'a, FtpResult<Box<dyn FtpSession>>> {
        Box::pin(async move {
            let mut script = self.script.lock().unwrap();
            if script.fail_connect {
                return Err(FtpError::Connect {
                    addr: endpoint.addr(),
                    reason: "connection refused".into(),
                });
            }
            script.ops.push(format!("CONNECT {}", endpoint.addr()));
            Ok(Box::new(ScriptedSession {
                script: Arc::clone(&self.script),
            }) as Box<dyn FtpSession>)
        })
    }
}

struct ScriptedSession {
    script: Arc<Mutex<Script>>,
}

impl ScriptedSession {
    fn record(&self, op: String) -> std::sync::MutexGuard<'_, Script> {
        let mut script = self.script.lock().unwrap();
        script.ops.push(op);
        script
    }
}

impl FtpSession for ScriptedSession {
    fn login<'a>(&'a mut self, user: &'a str, _password: &'a str) -> BoxFuture<'a, FtpResult<()>> {
        Box::pin(async move {
            if self.record(format!("LOGIN {user}")).fail_login {
                return Err(FtpError::Login {
                    code: 530,
                    message: "Login incorrect.".into(),
                });
            }
            Ok(())
        })
    }

    fn cwd<'a>(&'a mut self, path: &'a str) -> BoxFuture<'a, FtpResult<()>> {
        Box::pin(async move {
            if self.record(format!("CWD {path}")).missing.contains(path) {
                return Err(FtpError::Reply {
                    code: 550,
                    message: "No such directory.".into(),
                });
            }
            Ok(())
        })
    }

    fn mkdir<'a>(&'a mut self, path: &'a str) -> BoxFuture<'a, FtpResult<()>> {
        Box::pin(async move {
            let mut script = self.record(format!("MKD {path}"));
            script.missing.remove(path);
            Ok(())
        })
    }

    fn put_file<'a>(
        &'a mut self,
        local: &'a Path,
        remote_name: &'a str,
    ) -> BoxFuture<'a, FtpResult<u64>> {
        Box::pin(async move {
            let data = std::fs::read(local)?;
            let mut script = self.record(format!("STOR {remote_name}"));
            if script.fail_stor {
                return Err(FtpError::Reply {
                    code: 451,
                    message: "Local error in processing.".into(),
                });
            }
            let len = data.len() as u64;
            script.uploads.insert(remote_name.to_string(), data);
            Ok(len)
        })
    }

    fn quit(&mut self) -> BoxFuture<'_, FtpResult<()>> {
        Box::pin(async move {
            drop(self.record("QUIT".into()));
            Ok(())
        })
    }
}
