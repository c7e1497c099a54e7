use crate::core_error::FtpError;
use crate::core_log::logger::printable_line;
use log::debug;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Outbound half of a control connection.
///
/// Cloned into every transfer worker of the session; the mutex guarantees a
/// reply line is written whole before any other writer gets the socket.
#[derive(Clone)]
pub struct ControlChannel {
    writer: Arc<Mutex<BoxedWriter>>,
}

impl ControlChannel {
    pub fn new<W>(writer: W) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
    {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Sends one reply line, appending the CRLF terminator.
    pub async fn send_reply(&self, reply: &str) -> Result<(), FtpError> {
        let line = format!("{}\r\n", reply);
        debug!("  --> {}", printable_line(&line));

        let mut writer = self.writer.lock().await;
        writer
            .write_all(line.as_bytes())
            .await
            .map_err(FtpError::ReplyWrite)?;
        writer.flush().await.map_err(FtpError::ReplyWrite)?;
        Ok(())
    }

    pub async fn shutdown(&self) -> Result<(), FtpError> {
        let mut writer = self.writer.lock().await;
        writer.shutdown().await.map_err(FtpError::ReplyWrite)
    }
}
