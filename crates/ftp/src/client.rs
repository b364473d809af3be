//! FTP client backed by `suppaftp`.
//!
//! `suppaftp::FtpStream` is blocking, so every command runs on the blocking
//! pool. The stream is moved into the task and handed back when it ends.
//!
//! Lifecycle: `connect()` → `login()` (USER/PASS, TYPE I) →
//! `cwd()`/`mkdir()`/`put_file()` → `quit()`.

use std::path::Path;
use std::time::Duration;

use suppaftp::FtpStream;
use suppaftp::types::FileType;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::CONNECT_TIMEOUT;
use crate::error::{FtpError, FtpResult};
use crate::session::{BoxFuture, FtpConnector, FtpEndpoint, FtpSession};

/// A connected FTP control session.
pub struct FtpClient {
    stream: Option<FtpStream>,
    addr: String,
}

impl FtpClient {
    /// Connects to `host:port` and reads the server banner.
    pub async fn connect(host: &str, port: u16, connect_timeout: Duration) -> FtpResult<Self> {
        let addr = format!("{host}:{port}");
        let target = addr.clone();
        let connecting = tokio::task::spawn_blocking(move || FtpStream::connect(target));

        let stream = timeout(connect_timeout, connecting)
            .await
            .map_err(|_| FtpError::Connect {
                addr: addr.clone(),
                reason: "timed out".into(),
            })?
            .map_err(|e| FtpError::Protocol(format!("FTP worker failed: {e}")))?
            .map_err(|e| FtpError::Connect {
                addr: addr.clone(),
                reason: e.to_string(),
            })?;
        debug!(%addr, "FTP connected");

        Ok(Self {
            stream: Some(stream),
            addr,
        })
    }

    /// Runs `op` against the stream on the blocking pool.
    async fn blocking<T, F>(&mut self, op: F) -> FtpResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut FtpStream) -> FtpResult<T> + Send + 'static,
    {
        let mut stream = self.stream.take().ok_or(FtpError::Disconnected)?;
        let (stream, result) = tokio::task::spawn_blocking(move || {
            let result = op(&mut stream);
            (stream, result)
        })
        .await
        .map_err(|e| FtpError::Protocol(format!("FTP worker failed: {e}")))?;
        self.stream = Some(stream);
        result
    }

    /// Logs in and switches to binary mode.
    pub async fn login(&mut self, user: &str, password: &str) -> FtpResult<()> {
        let (u, p) = (user.to_string(), password.to_string());
        self.blocking(move |ftp| {
            ftp.login(u.as_str(), p.as_str())?;
            ftp.transfer_type(FileType::Binary)?;
            Ok(())
        })
        .await?;
        info!(user, addr = %self.addr, "FTP login succeeded");
        Ok(())
    }

    pub async fn cwd(&mut self, path: &str) -> FtpResult<()> {
        let path = path.to_string();
        self.blocking(move |ftp| Ok(ftp.cwd(path.as_str())?)).await
    }

    pub async fn mkdir(&mut self, path: &str) -> FtpResult<()> {
        let path = path.to_string();
        self.blocking(move |ftp| Ok(ftp.mkdir(path.as_str())?)).await
    }

    /// Uploads `local` as `remote_name` over a passive data connection.
    pub async fn put_file(&mut self, local: &Path, remote_name: &str) -> FtpResult<u64> {
        let mut file = std::fs::File::open(local)?;
        let name = remote_name.to_string();
        let sent = self
            .blocking(move |ftp| Ok(ftp.put_file(name.as_str(), &mut file)?))
            .await?;
        debug!(file = %local.display(), remote = remote_name, bytes = sent, "FTP upload complete");
        Ok(sent)
    }

    /// Sends `QUIT`. The connection is dropped either way.
    pub async fn quit(&mut self) -> FtpResult<()> {
        let result = self.blocking(|ftp| Ok(ftp.quit()?)).await;
        self.stream = None;
        result
    }
}

impl FtpSession for FtpClient {
    fn login<'a>(&'a mut self, user: &'a str, password: &'a str) -> BoxFuture<'a, FtpResult<()>> {
        Box::pin(FtpClient::login(self, user, password))
    }

    fn cwd<'a>(&'a mut self, path: &'a str) -> BoxFuture<'a, FtpResult<()>> {
        Box::pin(FtpClient::cwd(self, path))
    }

    fn mkdir<'a>(&'a mut self, path: &'a str) -> BoxFuture<'a, FtpResult<()>> {
        Box::pin(FtpClient::mkdir(self, path))
    }

    fn put_file<'a>(
        &'a mut self,
        local: &'a Path,
        remote_name: &'a str,
    ) -> BoxFuture<'a, FtpResult<u64>> {
        Box::pin(FtpClient::put_file(self, local, remote_name))
    }

    fn quit(&mut self) -> BoxFuture<'_, FtpResult<()>> {
        Box::pin(FtpClient::quit(self))
    }
}

/// Opens [`FtpClient`] sessions over TCP.
#[derive(Debug, Clone)]
pub struct TcpFtpConnector {
    connect_timeout: Duration,
}

impl Default for TcpFtpConnector {
    fn default() -> Self {
        Self::new(CONNECT_TIMEOUT)
    }
}

impl TcpFtpConnector {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl FtpConnector for TcpFtpConnector {
    fn connect<'a>(
        &'a self,
        endpoint: &'a FtpEndpoint,
    ) -> BoxFuture<'a, FtpResult<Box<dyn FtpSession>>> {
        Box::pin(async move {
            let client =
                FtpClient::connect(&endpoint.host, endpoint.port, self.connect_timeout).await?;
            Ok(Box::new(client) as Box<dyn FtpSession>)
        })
    }
}
