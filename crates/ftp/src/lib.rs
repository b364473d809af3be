//! Async FTP sessions used to publish slugs to remote storage.
//!
//! Only logging in, walking (and creating) a directory path and uploading
//! files are exposed. The wire protocol is handled by `suppaftp`.
//!
//! [`FtpSession`] and [`FtpConnector`] are the seams used by callers;
//! [`FtpClient`] and [`TcpFtpConnector`] are the TCP implementations.

mod client;
mod error;
mod navigate;
mod session;

pub use client::{FtpClient, TcpFtpConnector};
pub use error::{FtpError, FtpResult};
pub use navigate::change_dir_creating;
pub use session::{BoxFuture, FtpConnector, FtpEndpoint, FtpSession};

use std::time::Duration;

/// Timeout for establishing the control connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
