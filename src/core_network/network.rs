use crate::config::Config;
use crate::core_error::FtpError;
use crate::core_ftpcommand::command::Command;
use crate::core_ftpcommand::handlers::{dispatch_command, SessionFlow};
use crate::core_log::logger::printable_line;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// Binds the control listener and serves every client on its own task.
pub async fn start_server(config: Arc<Config>) -> Result<()> {
    let address = format!(
        "{}:{}",
        config.server.listen_address, config.server.listen_port
    );
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind control listener on {}", address))?;
    info!("Server listening on {}", address);

    serve(listener, config).await
}

/// Accept loop. A failed accept is logged and the loop keeps going.
pub async fn serve(listener: TcpListener, config: Arc<Config>) -> Result<()> {
    loop {
        let (socket, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                continue;
            }
        };
        info!("New connection from {}", addr);

        let config = Arc::clone(&config);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, config).await {
                error!("Connection error for {}: {}", addr, e);
            }
            info!("Connection closed for {}", addr);
        });
    }
}

/// Runs one control connection from greeting to teardown.
///
/// The session is always closed before returning, which waits for the
/// transfer workers it spawned.
pub async fn handle_connection(socket: TcpStream, config: Arc<Config>) -> Result<(), FtpError> {
    let peer = socket.peer_addr()?;
    let start_dir = initial_dir(&config)?;
    let (reader, writer) = socket.into_split();

    let control = ControlChannel::new(writer);
    let mut session = Session::new(peer.ip(), start_dir);

    let result = serve_session(reader, &control, &config, &mut session).await;
    session.close().await;
    if let Err(e) = control.shutdown().await {
        debug!("Control connection shutdown for {}: {}", peer, e);
    }
    result
}

fn initial_dir(config: &Config) -> Result<PathBuf, FtpError> {
    match &config.server.root_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(std::env::current_dir()?),
    }
}

/// Reads CRLF-terminated commands and dispatches them in order until the
/// client quits or disconnects, or a fatal error occurs.
pub async fn serve_session<R>(
    reader: R,
    control: &ControlChannel,
    config: &Config,
    session: &mut Session,
) -> Result<(), FtpError>
where
    R: AsyncRead + Unpin,
{
    control.send_reply("220 welcome").await?;

    let mut reader = BufReader::new(reader);
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer).await {
            Ok(0) => {
                info!("Client disconnected");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Read failed on control connection, closing: {}", e);
                break;
            }
        }

        let raw = String::from_utf8_lossy(&buffer);
        debug!("New cmd: '{}'", printable_line(&raw));

        let outcome = match Command::parse(&raw) {
            Ok(command) => dispatch_command(command, control, config, session).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(SessionFlow::Continue) => {}
            Ok(SessionFlow::Close) => break,
            Err(e) if e.is_fatal() => {
                error!("Fatal error on control connection: {}", e);
                return Err(e);
            }
            Err(e) => {
                error!("Error processing command '{}': {}", printable_line(&raw), e);
                control.send_reply(e.to_ftp_response()).await?;
            }
        }
    }

    Ok(())
}
