use crate::config::Config;
use crate::core_error::FtpError;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::info;

/// Handles the ABOR FTP command.
///
/// In-flight transfers are not cancelled: workers keep running and still
/// report their own 226/550 when they finish.
pub async fn handle_abor_command(
    writer: &ControlChannel,
    _config: &Config,
    session: &mut Session,
    _arg: &str,
) -> Result<(), FtpError> {
    info!(
        "ABOR received with {} transfer(s) in flight, nothing cancelled",
        session.active_workers()
    );
    writer.send_reply("226 closing data connection").await
}
