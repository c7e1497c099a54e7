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

/// Handles the RETR (Retrieve) FTP command.
///
/// The pending passive listener is handed to a background worker which
/// accepts the data connection and streams the file. The control loop is
/// free to read the next command while the transfer runs; the worker sends
/// the 150 and the final 226/550 itself.
///
/// # Arguments
///
/// * `writer` - The control channel, cloned into the worker.
/// * `config` - Server configuration, for the download buffer size.
/// * `session` - The session owning the listener and the worker handle.
/// * `arg` - The name of the file to retrieve.
pub async fn handle_retr_command(
    writer: &ControlChannel,
    config: &Config,
    session: &mut Session,
    arg: &str,
) -> Result<(), FtpError> {
    if session.mode() != ConnectionMode::Passive {
        writer.send_reply("550 please use PASV mode").await?;
        return Ok(());
    }

    let Some(listener) = session.take_passive_listener() else {
        writer.send_reply("425 use PASV or PORT first").await?;
        return Ok(());
    };

    let file_path = resolve_path(session.current_dir(), arg);
    let buffer_size = config.server.download_buffer_size();
    let writer = writer.clone();
    info!("Starting download worker for {:?}", file_path);

    session.spawn_worker(async move {
        match send_file(&writer, listener, &file_path, buffer_size).await {
            Ok(bytes) => {
                info!("File downloaded successfully: {:?} ({} bytes)", file_path, bytes);
                send_worker_reply(&writer, "226 file downloaded successfully").await;
            }
            Err(e) => {
                error!("Failed to download file {:?}: {}", file_path, e);
                send_worker_reply(&writer, "550 failed to download file").await;
            }
        }
    });

    Ok(())
}

async fn send_file(
    writer: &ControlChannel,
    listener: TcpListener,
    file_path: &Path,
    buffer_size: usize,
) -> Result<u64, FtpError> {
    let mut data_stream = accept_pasv_connection(listener).await?;
    let mut file = open_for_download(file_path).await?;

    writer
        .send_reply("150 opening BINARY mode data connection")
        .await?;

    let mut buffer = vec![0; buffer_size];
    let mut total = 0u64;
    loop {
        let bytes_read = file.read(&mut buffer).await?;
        if bytes_read == 0 {
            break;
        }
        data_stream.write_all(&buffer[..bytes_read]).await?;
        total += bytes_read as u64;
    }

    data_stream.shutdown().await?;
    Ok(total)
}

async fn open_for_download(file_path: &Path) -> Result<File, FtpError> {
    let file = File::open(file_path).await?;
    if file.metadata().await?.is_dir() {
        return Err(FtpError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "cannot download a directory",
        )));
    }
    Ok(file)
}
