//! FTP error types.

/// Errors produced by the FTP client.
#[derive(Debug, thiserror::Error)]
pub enum FtpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection to {addr} failed: {reason}")]
    Connect { addr: String, reason: String },

    #[error("login rejected ({code}): {message}")]
    Login { code: u16, message: String },

    #[error("server replied {code}: {message}")]
    Reply { code: u16, message: String },

    #[error("cannot enter directory {path}: {source}")]
    Navigate {
        path: String,
        #[source]
        source: Box<FtpError>,
    },

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("connection closed by server")]
    Disconnected,
}

pub type FtpResult<T> = Result<T, FtpError>;

impl FtpError {
    /// Builds an error from an unexpected server reply.
    pub fn from_reply(code: u16, text: &str) -> Self {
        match code {
            430 | 530 => Self::Login {
                code,
                message: text.to_string(),
            },
            421 => Self::Disconnected,
            _ => Self::Reply {
                code,
                message: text.to_string(),
            },
        }
    }

    /// Reply code that triggered the error, if any.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Login { code, .. } | Self::Reply { code, .. } => Some(*code),
            Self::Navigate { source, .. } => source.code(),
            _ => None,
        }
    }
}

impl From<suppaftp::FtpError> for FtpError {
    fn from(err: suppaftp::FtpError) -> Self {
        match err {
            suppaftp::FtpError::ConnectionError(e) => Self::Io(e),
            suppaftp::FtpError::UnexpectedResponse(ref resp) => {
                Self::from_reply(resp.status.code() as u16, &err.to_string())
            }
            other => Self::Protocol(other.to_string()),
        }
    }
}
