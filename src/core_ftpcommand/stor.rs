use crate::config::Config;
use crate::core_error::FtpError;
use crate::core_ftpcommand::utils::{resolve_path, send_worker_reply};
use crate::core_network::control::ControlChannel;
use crate::core_network::pasv::accept_pasv_connection;
use crate::session::{ConnectionMode, Session};
use log::{error, info};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Handles the STOR (Store File) FTP command.
///
/// Mirrors RETR: a background worker accepts the passive data connection and
/// writes everything the client sends into the target file until EOF.
///
/// # Arguments
///
/// * `writer` - The control channel, cloned into the worker.
/// * `config` - Server configuration, for the upload buffer size.
/// * `session` - The session owning the listener and the worker handle.
/// * `arg` - The name of the file to be stored.
pub async fn handle_stor_command(
    writer: &ControlChannel,
    config: &Config,
    session: &mut Session,
    arg: &str,
) -> Result<(), FtpError> {
    if session.mode() != ConnectionMode::Passive {
        writer.send_reply("550 please use PASV instead of PORT").await?;
        return Ok(());
    }

    let Some(listener) = session.take_passive_listener() else {
        writer.send_reply("425 use PASV or PORT first").await?;
        return Ok(());
    };

    let file_path = resolve_path(session.current_dir(), arg);
    let buffer_size = config.server.upload_buffer_size();
    let writer = writer.clone();
    info!("Starting upload worker for {:?}", file_path);

    session.spawn_worker(async move {
        match receive_file(&writer, listener, &file_path, buffer_size).await {
            Ok(bytes) => {
                info!("File stored successfully: {:?} ({} bytes)", file_path, bytes);
                send_worker_reply(&writer, "226 file sent successfully").await;
            }
            Err(e) => {
                error!("Failed to store file {:?}: {}", file_path, e);
                send_worker_reply(&writer, "550 failed to transfer target file").await;
            }
        }
    });

    Ok(())
}

async fn receive_file(
    writer: &ControlChannel,
    listener: TcpListener,
    file_path: &Path,
    buffer_size: usize,
) -> Result<u64, FtpError> {
    let mut data_stream = accept_pasv_connection(listener).await?;
    let mut file = File::create(file_path).await?;

    writer
        .send_reply("125 data connection open, staring transfer")
        .await?;

    let mut buffer = vec![0; buffer_size];
    let mut total = 0u64;
    loop {
        let bytes_read = data_stream.read(&mut buffer).await?;
        if bytes_read == 0 {
            break;
        }
        file.write_all(&buffer[..bytes_read]).await?;
        total += bytes_read as u64;
    }

    file.flush().await?;
    Ok(total)
}
