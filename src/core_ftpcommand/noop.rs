use crate::config::Config;
use crate::core_error::FtpError;
use crate::core_network::control::ControlChannel;
use crate::session::Session;

pub async fn handle_noop_command(
    writer: &ControlChannel,
    _config: &Config,
    _session: &mut Session,
    _arg: &str,
) -> Result<(), FtpError> {
    writer.send_reply("200 noop").await
}
