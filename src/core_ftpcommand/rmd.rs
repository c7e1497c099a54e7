use crate::config::Config;
use crate::core_error::FtpError;
use crate::core_ftpcommand::utils::resolve_path;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::{error, info};
use tokio::fs;

/// Handles the RMD (Remove Directory) FTP command. Only empty directories
/// can be removed.
pub async fn handle_rmd_command(
    writer: &ControlChannel,
    _config: &Config,
    session: &mut Session,
    arg: &str,
) -> Result<(), FtpError> {
    info!("Received RMD command with argument: {}", arg);
    let dir_path = resolve_path(session.current_dir(), arg);

    match fs::remove_dir(&dir_path).await {
        Ok(_) => {
            info!("Directory removed successfully: {:?}", dir_path);
            writer.send_reply("250 directory was removed").await?;
        }
        Err(e) => {
            error!("Failed to remove directory: {:?}, error: {}", dir_path, e);
            writer.send_reply("550 error deleting directory").await?;
        }
    }

    Ok(())
}
