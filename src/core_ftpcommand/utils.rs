use crate::core_network::control::ControlChannel;
use log::error;
use std::path::{Path, PathBuf};

/// Resolves a client-supplied path against the session's current directory.
///
/// Absolute paths are taken verbatim; nothing confines the result to a root.
pub fn resolve_path(current_dir: &Path, arg: &str) -> PathBuf {
    let arg = Path::new(arg);
    if arg.is_absolute() {
        arg.to_path_buf()
    } else {
        current_dir.join(arg)
    }
}

/// Sends a reply from a transfer worker. Workers have nobody to hand the
/// error to, so a failed write is logged and dropped here.
pub async fn send_worker_reply(writer: &ControlChannel, reply: &str) {
    if let Err(e) = writer.send_reply(reply).await {
        error!("Failed to send '{}' from transfer worker: {}", reply, e);
    }
}
