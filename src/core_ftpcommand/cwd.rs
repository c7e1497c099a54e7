use crate::config::Config;
use crate::core_error::FtpError;
use crate::core_ftpcommand::utils::resolve_path;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::{error, info};
use std::io;
use std::path::{Path, PathBuf};

/// Handles the CWD FTP command.
///
/// Only the session's own directory changes; the process working directory
/// is never touched, so concurrent sessions cannot race on it.
pub async fn handle_cwd_command(
    writer: &ControlChannel,
    _config: &Config,
    session: &mut Session,
    arg: &str,
) -> Result<(), FtpError> {
    let target = resolve_path(session.current_dir(), arg);

    match change_dir(arg, &target).await {
        Ok(new_dir) => {
            info!("Directory changed to: {:?}", new_dir);
            session.set_current_dir(new_dir);
            writer.send_reply("250 directory changed").await?;
        }
        Err(e) => {
            error!("Failed to change directory to {:?}: {}", target, e);
            writer.send_reply("550 failed to change directory").await?;
        }
    }
    Ok(())
}

async fn change_dir(arg: &str, target: &Path) -> io::Result<PathBuf> {
    if arg.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no directory given",
        ));
    }

    let new_dir = tokio::fs::canonicalize(target).await?;
    if !tokio::fs::metadata(&new_dir).await?.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a directory",
        ));
    }
    Ok(new_dir)
}
