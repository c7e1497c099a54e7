use crate::config::Config;
use crate::core_error::FtpError;
use crate::core_network::control::ControlChannel;
use crate::session::Session;

/// Handles the TYPE FTP command.
///
/// Transfers are always binary; the reply only acknowledges the request.
pub async fn handle_type_command(
    writer: &ControlChannel,
    _config: &Config,
    _session: &mut Session,
    arg: &str,
) -> Result<(), FtpError> {
    let response = if arg.starts_with('I') {
        "200 switched to binary mode"
    } else if arg.starts_with('A') {
        "200 switching to ASCII mode"
    } else {
        "504 unknown TYPE parameter"
    };
    writer.send_reply(response).await
}
