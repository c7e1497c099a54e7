use crate::config::Config;
use crate::core_error::FtpError;
use crate::core_ftpcommand::utils::resolve_path;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::{error, info};
use tokio::fs;

/// Handles the DELE (Delete File) FTP command.
pub async fn handle_dele_command(
    writer: &ControlChannel,
    _config: &Config,
    session: &mut Session,
    arg: &str,
) -> Result<(), FtpError> {
    let file_path = resolve_path(session.current_dir(), arg);

    match fs::remove_file(&file_path).await {
        Ok(_) => {
            info!("File removed: {:?}", file_path);
            writer.send_reply("250 file was removed").await?;
        }
        Err(e) => {
            error!("Failed to remove file {:?}: {}", file_path, e);
            writer.send_reply("550 error file directory").await?;
        }
    }

    Ok(())
}
