use crate::config::Config;
use crate::constants::{PASV_P1_MAX, PASV_P1_MIN};
use crate::core_error::FtpError;
use crate::core_network::control::ControlChannel;
use crate::session::{ConnectionMode, Session};
use log::info;
use rand::Rng;

/// A passive data port split into the two bytes announced in a 227 reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassivePort {
    pub p1: u8,
    pub p2: u8,
}

impl PassivePort {
    /// Draws a fresh port in the ephemeral range (32768..=48895).
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            p1: rng.gen_range(PASV_P1_MIN..=PASV_P1_MAX),
            p2: rng.gen(),
        }
    }

    pub fn value(&self) -> u16 {
        u16::from(self.p1) * 256 + u16::from(self.p2)
    }
}

/// Handles the PORT (Active Mode) FTP command.
///
/// Active mode is not implemented: the mode is recorded so that later data
/// commands can report it, and the client is told so right away.
pub async fn handle_port_command(
    writer: &ControlChannel,
    _config: &Config,
    session: &mut Session,
    arg: &str,
) -> Result<(), FtpError> {
    info!("Received PORT command with argument: {}", arg);
    if session.has_pending_passive() {
        info!("PORT discards the pending passive listener");
        session.clear_passive_listener();
    }
    session.set_mode(ConnectionMode::Port);
    writer.send_reply("502 not implemented").await
}
