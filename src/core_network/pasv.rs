use crate::config::Config;
use crate::constants::PASV_BIND_ATTEMPTS;
use crate::core_error::FtpError;
use crate::core_network::control::ControlChannel;
use crate::core_network::port::PassivePort;
use crate::session::Session;
use log::{debug, warn};
use std::io;
use std::net::{IpAddr, Ipv4Addr};
use tokio::net::{TcpListener, TcpStream};

/// Handles the PASV FTP command.
///
/// Any listener left over from a previous PASV is closed first, then a new
/// one is opened on all interfaces and announced to the client. Failing to
/// bind is fatal to the session.
pub async fn handle_pasv_command(
    writer: &ControlChannel,
    config: &Config,
    session: &mut Session,
    _arg: &str,
) -> Result<(), FtpError> {
    let pasv_ip = pasv_reply_address(config, session.peer_ip())?;

    session.clear_passive_listener();
    let (listener, port) = setup_pasv_listener().await?;
    session.set_passive_listener(listener);

    let [h1, h2, h3, h4] = pasv_ip.octets();
    let pasv_response = format!(
        "227 entering passive mode ({},{},{},{},{},{})",
        h1, h2, h3, h4, port.p1, port.p2
    );
    writer.send_reply(&pasv_response).await
}

/// Picks the IPv4 address announced in the 227 reply: the configured
/// `pasv_address`, else the peer address of the control connection.
pub fn pasv_reply_address(config: &Config, peer_ip: IpAddr) -> Result<Ipv4Addr, FtpError> {
    if let Some(addr) = config.server.pasv_address {
        return Ok(addr);
    }
    match peer_ip {
        IpAddr::V4(ip) => Ok(ip),
        IpAddr::V6(ip) => ip
            .to_ipv4_mapped()
            .ok_or(FtpError::PassiveAddress(peer_ip)),
    }
}

/// Binds a passive mode listener on a freshly drawn port.
/// A port already in use is retried with another draw.
pub async fn setup_pasv_listener() -> Result<(TcpListener, PassivePort), FtpError> {
    let mut attempt = 1;
    loop {
        let port = PassivePort::generate();
        match TcpListener::bind((Ipv4Addr::UNSPECIFIED, port.value())).await {
            Ok(listener) => {
                debug!("PASV listener set up on port {}", port.value());
                return Ok((listener, port));
            }
            Err(e) if e.kind() == io::ErrorKind::AddrInUse && attempt < PASV_BIND_ATTEMPTS => {
                warn!("Passive port {} in use, drawing another", port.value());
                attempt += 1;
            }
            Err(source) => {
                return Err(FtpError::PassiveBind {
                    port: port.value(),
                    source,
                })
            }
        }
    }
}

/// Accepts the one data connection of a passive listener. The listener is
/// consumed, so it closes as soon as the connection is taken.
pub async fn accept_pasv_connection(listener: TcpListener) -> Result<TcpStream, FtpError> {
    let (data_stream, addr) = listener.accept().await?;
    debug!("Accepted data connection from: {}", addr);
    Ok(data_stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_ftpcommand::test_support::new_session;
    use crate::core_network::control::test_support::test_channel;
    use crate::session::ConnectionMode;
    use std::net::Ipv6Addr;

    fn parse_pasv_reply(reply: &str) -> ([u8; 4], u16) {
        let inner = reply
            .strip_prefix("227 entering passive mode (")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or_else(|| panic!("unexpected PASV reply: {}", reply));
        let parts: Vec<u16> = inner.split(',').map(|p| p.parse().unwrap()).collect();
        assert_eq!(parts.len(), 6);
        let ip = [parts[0] as u8, parts[1] as u8, parts[2] as u8, parts[3] as u8];
        (ip, parts[4] * 256 + parts[5])
    }

    #[test]
    fn test_reply_address_selection() {
        let mut config = Config::default();
        let v4 = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20));
        assert_eq!(pasv_reply_address(&config, v4).unwrap(), Ipv4Addr::new(192, 168, 1, 20));

        let mapped = IpAddr::V6(Ipv4Addr::LOCALHOST.to_ipv6_mapped());
        assert_eq!(pasv_reply_address(&config, mapped).unwrap(), Ipv4Addr::LOCALHOST);

        let v6 = IpAddr::V6(Ipv6Addr::LOCALHOST);
        assert!(matches!(
            pasv_reply_address(&config, v6),
            Err(FtpError::PassiveAddress(_))
        ));

        config.server.pasv_address = Some(Ipv4Addr::new(203, 0, 113, 7));
        assert_eq!(pasv_reply_address(&config, v6).unwrap(), Ipv4Addr::new(203, 0, 113, 7));
    }

    #[tokio::test]
    async fn test_pasv_announces_peer_address_and_port() {
        let (writer, mut replies) = test_channel();
        let mut session = new_session("/");

        handle_pasv_command(&writer, &Config::default(), &mut session, "")
            .await
            .unwrap();
        let (ip, port) = parse_pasv_reply(&replies.next_reply().await);
        assert_eq!(ip, [127, 0, 0, 1]);
        assert!((32768..=48895).contains(&port));
        assert_eq!(session.mode(), ConnectionMode::Passive);
        assert!(session.has_pending_passive());

        TcpStream::connect((Ipv4Addr::LOCALHOST, port)).await.unwrap();
    }

    #[tokio::test]
    async fn test_second_pasv_closes_first_listener() {
        let (writer, mut replies) = test_channel();
        let config = Config::default();
        let mut session = new_session("/");

        handle_pasv_command(&writer, &config, &mut session, "").await.unwrap();
        let (_, first_port) = parse_pasv_reply(&replies.next_reply().await);
        handle_pasv_command(&writer, &config, &mut session, "").await.unwrap();
        let (_, second_port) = parse_pasv_reply(&replies.next_reply().await);
        assert_eq!(session.mode(), ConnectionMode::Passive);

        if first_port != second_port {
            let refused = TcpStream::connect((Ipv4Addr::LOCALHOST, first_port)).await;
            assert!(refused.is_err(), "first passive listener still accepting");
        }
        TcpStream::connect((Ipv4Addr::LOCALHOST, second_port))
            .await
            .unwrap();
    }
}
