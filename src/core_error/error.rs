// Error handling for the control connection and its handlers
use std::io;
use std::net::IpAddr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FtpError {
    #[error("invalid command format '{0}'")]
    InvalidCommandFormat(String),

    #[error("failed to open passive listener on port {port}: {source}")]
    PassiveBind {
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("cannot announce non-IPv4 address {0} in a PASV reply")]
    PassiveAddress(IpAddr),

    #[error("write failed on control connection: {0}")]
    ReplyWrite(#[source] io::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FtpError {
    /// Errors after which the control connection cannot be kept open.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FtpError::PassiveBind { .. } | FtpError::ReplyWrite(_))
    }

    pub fn to_ftp_response(&self) -> &'static str {
        "500 error processing last command"
    }
}
