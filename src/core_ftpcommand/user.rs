use crate::config::Config;
use crate::core_error::FtpError;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::{info, warn};

/// Handles the USER FTP command.
///
/// Only the anonymous usernames of the allow-list are accepted. The name is
/// stored in the session and the client is asked for a password.
pub async fn handle_user_command(
    writer: &ControlChannel,
    config: &Config,
    session: &mut Session,
    username: &str,
) -> Result<(), FtpError> {
    info!("Received USER command with username: {}", username);

    if config.server.is_anonymous_user(username) {
        session.user = Some(username.to_string());
        writer
            .send_reply(&format!("331 user name {}", username))
            .await?;
    } else {
        warn!("Rejected username: {}", username);
        writer.send_reply("530 invalid username").await?;
    }

    Ok(())
}
