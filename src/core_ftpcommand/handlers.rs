use crate::config::Config;
use crate::core_error::FtpError;
use crate::core_ftpcommand::command::Command;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::{
    abor, cwd, dele, list, mkd, noop, pass, pwd, quit, retr, rmd, size, stor, type_, user,
};
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::{debug, warn};

// Specific modules for PORT and PASV commands
use crate::core_network::pasv;
use crate::core_network::port;

/// What the control loop should do once a command has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFlow {
    Continue,
    Close,
}

/// Looks the verb up, applies the authentication policy and runs the handler.
///
/// An unauthenticated client gets `530 not logged in` for protected verbs and
/// the handler still runs afterwards, unless `strict_auth` is configured.
pub async fn dispatch_command(
    command: Command,
    writer: &ControlChannel,
    config: &Config,
    session: &mut Session,
) -> Result<SessionFlow, FtpError> {
    let Some(ftp_command) = FtpCommand::from_verb(command.verb()) else {
        warn!("Unknown command: {}", command.verb());
        writer.send_reply("500 unknown command").await?;
        return Ok(SessionFlow::Continue);
    };

    if ftp_command.requires_auth() && !session.authenticated {
        writer.send_reply("530 not logged in").await?;
        if config.server.strict_auth {
            debug!("{:?} refused, client not logged in", ftp_command);
            return Ok(SessionFlow::Continue);
        }
    }

    let arg = command.arg();
    match ftp_command {
        FtpCommand::USER => user::handle_user_command(writer, config, session, arg).await?,
        FtpCommand::PASS => pass::handle_pass_command(writer, config, session, arg).await?,
        FtpCommand::ABOR => abor::handle_abor_command(writer, config, session, arg).await?,
        FtpCommand::CWD => cwd::handle_cwd_command(writer, config, session, arg).await?,
        FtpCommand::DELE => dele::handle_dele_command(writer, config, session, arg).await?,
        FtpCommand::LIST => list::handle_list_command(writer, config, session, arg).await?,
        FtpCommand::MKD => mkd::handle_mkd_command(writer, config, session, arg).await?,
        FtpCommand::NOOP => noop::handle_noop_command(writer, config, session, arg).await?,
        FtpCommand::PASV => pasv::handle_pasv_command(writer, config, session, arg).await?,
        FtpCommand::PORT => port::handle_port_command(writer, config, session, arg).await?,
        FtpCommand::PWD => pwd::handle_pwd_command(writer, config, session, arg).await?,
        FtpCommand::QUIT => {
            quit::handle_quit_command(writer, config, session, arg).await?;
            return Ok(SessionFlow::Close);
        }
        FtpCommand::RETR => retr::handle_retr_command(writer, config, session, arg).await?,
        FtpCommand::RMD => rmd::handle_rmd_command(writer, config, session, arg).await?,
        FtpCommand::SIZE => size::handle_size_command(writer, config, session, arg).await?,
        FtpCommand::STOR => stor::handle_stor_command(writer, config, session, arg).await?,
        FtpCommand::TYPE => type_::handle_type_command(writer, config, session, arg).await?,
    }

    Ok(SessionFlow::Continue)
}
