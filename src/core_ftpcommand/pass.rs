use crate::config::Config;
use crate::core_error::FtpError;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::{info, warn};

/// Handles the PASS FTP command. Any password is accepted once USER has
/// recorded a username.
pub async fn handle_pass_command(
    writer: &ControlChannel,
    _config: &Config,
    session: &mut Session,
    _password: &str,
) -> Result<(), FtpError> {
    match session.user.as_deref() {
        Some(user) if !user.is_empty() => {
            session.authenticated = true;
            info!("User {} logged in", user);
            writer.send_reply("230 logged in successfully").await?;
        }
        _ => {
            warn!("PASS received before a valid USER");
            writer.send_reply("500 Invalid username or password").await?;
        }
    }
    Ok(())
}
