use crate::config::Config;
use crate::core_error::FtpError;
use crate::core_ftpcommand::utils::resolve_path;
use crate::core_network::control::ControlChannel;
use crate::core_network::pasv::accept_pasv_connection;
use crate::session::{ConnectionMode, Session};
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

/// One row of a LIST reply, detached from the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub is_dir: bool,
    pub mode: u32,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub mtime: i64,
}

impl ListEntry {
    pub fn from_metadata(name: String, is_dir: bool, metadata: &Metadata) -> Self {
        Self {
            name,
            is_dir,
            mode: metadata.mode(),
            nlink: metadata.nlink(),
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size(),
            mtime: metadata.mtime(),
        }
    }
}

/// Renders the owner/group/other permission triplets, e.g. `rwxr-x---`.
pub fn permissions_string(mode: u32) -> String {
    let mut permissions = String::with_capacity(9);
    for shift in [6, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        permissions.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        permissions.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        permissions.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    permissions
}

/// Formats a row the way `ls -l` style FTP clients parse it, CRLF included.
pub fn format_list_row(entry: &ListEntry) -> String {
    let timestamp = DateTime::<Utc>::from_timestamp(entry.mtime, 0)
        .unwrap_or_default()
        .format("%b %d %H:%M");

    format!(
        "{}{} {:5} {:4} {:4} {:8} {} {}\r\n",
        if entry.is_dir { 'd' } else { '-' },
        permissions_string(entry.mode),
        entry.nlink,
        entry.uid,
        entry.gid,
        entry.size,
        timestamp,
        entry.name
    )
}

/// Handles the LIST FTP command.
///
/// Needs a pending PASV listener. The data connection is accepted inline, so
/// the control loop of this session waits until the listing is sent. The
/// mode is back to Normal afterwards whatever the outcome.
pub async fn handle_list_command(
    writer: &ControlChannel,
    _config: &Config,
    session: &mut Session,
    arg: &str,
) -> Result<(), FtpError> {
    match session.mode() {
        ConnectionMode::Passive => {}
        ConnectionMode::Port => {
            session.set_mode(ConnectionMode::Normal);
            writer.send_reply("502 not implemented").await?;
            return Ok(());
        }
        ConnectionMode::Normal => {
            writer.send_reply("425 use PASV or PORT first").await?;
            return Ok(());
        }
    }

    let listener = session.take_passive_listener();
    let dir_path = list_target(session.current_dir(), arg);

    let outcome = match listener {
        Some(listener) => send_listing(writer, listener, &dir_path).await,
        None => Err(FtpError::Io(std::io::Error::new(
            std::io::ErrorKind::NotConnected,
            "no passive listener pending",
        ))),
    };

    match outcome {
        Ok(count) => {
            info!("Directory listing of {:?} sent ({} entries)", dir_path, count);
            writer.send_reply("226 directory contents sent").await?;
        }
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => {
            error!("Failed to list directory {:?}: {}", dir_path, e);
            writer.send_reply("550 failed to list directory").await?;
        }
    }

    Ok(())
}

// Arguments starting with '-' are ls-style options, not paths.
fn list_target(current_dir: &Path, arg: &str) -> PathBuf {
    if arg.is_empty() || arg.starts_with('-') {
        current_dir.to_path_buf()
    } else {
        resolve_path(current_dir, arg)
    }
}

async fn send_listing(
    writer: &ControlChannel,
    listener: TcpListener,
    dir_path: &Path,
) -> Result<usize, FtpError> {
    let mut entries = tokio::fs::read_dir(dir_path).await?;
    let mut data_stream = accept_pasv_connection(listener).await?;

    writer.send_reply("150 sending directory contents").await?;

    let mut count = 0;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Error reading file stats for {:?}: {}", path, e);
                continue;
            }
        };
        let is_dir = entry
            .file_type()
            .await
            .map(|file_type| file_type.is_dir())
            .unwrap_or(false);
        let name = entry.file_name().to_string_lossy().into_owned();

        let row = format_list_row(&ListEntry::from_metadata(name, is_dir, &metadata));
        data_stream.write_all(row.as_bytes()).await?;
        count += 1;
    }

    data_stream.shutdown().await?;
    Ok(count)
}
