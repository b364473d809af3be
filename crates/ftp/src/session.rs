//! Session and connector traits.
//!
//! Callers depend on these instead of [`FtpClient`](crate::FtpClient) so the
//! upload flow can be driven by scripted sessions in tests.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use crate::error::{FtpError, FtpResult};

/// Boxed future returned by the session traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Where and as whom to connect.
#[derive(Clone, PartialEq, Eq)]
pub struct FtpEndpoint {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

impl FtpEndpoint {
    /// Builds an endpoint from the string fields of a share request.
    pub fn parse(host: &str, port: &str, user: &str, password: &str) -> FtpResult<Self> {
        if host.is_empty() {
            return Err(FtpError::InvalidConfig("host must not be empty".into()));
        }
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| FtpError::InvalidConfig(format!("invalid port: '{port}'")))?;
        Ok(Self {
            host: host.to_string(),
            port,
            user: user.to_string(),
            password: password.to_string(),
        })
    }

    /// `host:port` for display and connecting.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Debug for FtpEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FtpEndpoint")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"****")
            .finish()
    }
}

/// An open control connection.
pub trait FtpSession: Send {
    /// Authenticates and switches to binary transfers.
    fn login<'a>(&'a mut self, user: &'a str, password: &'a str) -> BoxFuture<'a, FtpResult<()>>;

    /// Changes the working directory.
    fn cwd<'a>(&'a mut self, path: &'a str) -> BoxFuture<'a, FtpResult<()>>;

    /// Creates a directory.
    fn mkdir<'a>(&'a mut self, path: &'a str) -> BoxFuture<'a, FtpResult<()>>;

    /// Uploads `local` as `remote_name` in the working directory.
    /// Returns the number of bytes sent.
    fn put_file<'a>(&'a mut self, local: &'a Path, remote_name: &'a str)
    -> BoxFuture<'a, FtpResult<u64>>;

    /// Ends the session.
    fn quit(&mut self) -> BoxFuture<'_, FtpResult<()>>;
}

/// Opens new sessions.
pub trait FtpConnector: Send + Sync {
    fn connect<'a>(&'a self, endpoint: &'a FtpEndpoint)
    -> BoxFuture<'a, FtpResult<Box<dyn FtpSession>>>;
}
