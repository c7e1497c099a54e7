use crate::config::Config;
use crate::core_error::FtpError;
use crate::core_ftpcommand::utils::resolve_path;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::{error, info};
use std::path::Path;
use tokio::fs::DirBuilder;

/// Handles the MKD (Make Directory) FTP command.
///
/// The directory is created owner-only (0700). An absolute argument is echoed
/// back as given, a relative one is reported under the current directory.
pub async fn handle_mkd_command(
    writer: &ControlChannel,
    _config: &Config,
    session: &mut Session,
    arg: &str,
) -> Result<(), FtpError> {
    info!("Received MKD command with argument: {}", arg);
    let dir_path = resolve_path(session.current_dir(), arg);

    let mut builder = DirBuilder::new();
    builder.mode(0o700);

    match builder.create(&dir_path).await {
        Ok(()) => {
            info!("Directory created successfully: {:?}", dir_path);
            let reply = if Path::new(arg).is_absolute() {
                format!("257 \"{}\" directory created", arg)
            } else {
                format!(
                    "257 \"{}/{}\" directory created",
                    session.current_dir().display(),
                    arg
                )
            };
            writer.send_reply(&reply).await?;
        }
        Err(e) => {
            error!("Failed to create directory: {:?}, error: {}", dir_path, e);
            writer
                .send_reply("550 failed to create directory, please check permissions")
                .await?;
        }
    }

    Ok(())
}
