use crate::config::Config;
use crate::core_error::FtpError;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::info;

/// Handles the QUIT FTP command.
///
/// Only the reply is sent here; the dispatcher tells the control loop to
/// stop reading, and the connection is closed once the session is torn down.
pub async fn handle_quit_command(
    writer: &ControlChannel,
    _config: &Config,
    _session: &mut Session,
    _arg: &str,
) -> Result<(), FtpError> {
    info!("Received QUIT command. Closing connection.");
    writer.send_reply("221 bye").await
}
