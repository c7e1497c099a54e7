use crate::config::Config;
use crate::core_error::FtpError;
use crate::core_network::control::ControlChannel;
use crate::session::Session;

pub async fn handle_pwd_command(
    writer: &ControlChannel,
    _config: &Config,
    session: &mut Session,
    _arg: &str,
) -> Result<(), FtpError> {
    let response = format!("257 \"{}\"", session.current_dir().display());
    writer.send_reply(&response).await
}
