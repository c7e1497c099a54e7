// core_ftpcommand/size.rs

use crate::config::Config;
use crate::core_error::FtpError;
use crate::core_ftpcommand::utils::resolve_path;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::{error, info};

/// Handles the SIZE (File Size) FTP command. Directories have no size.
pub async fn handle_size_command(
    writer: &ControlChannel,
    _config: &Config,
    session: &mut Session,
    arg: &str,
) -> Result<(), FtpError> {
    let file_path = resolve_path(session.current_dir(), arg);

    match tokio::fs::metadata(&file_path).await {
        Ok(metadata) if metadata.is_file() => {
            info!("File size for {:?} is {}", file_path, metadata.len());
            writer
                .send_reply(&format!("213 {}", metadata.len()))
                .await?;
        }
        Ok(_) => {
            error!("SIZE requested for a non-file: {:?}", file_path);
            writer.send_reply("550 failed to get file size").await?;
        }
        Err(e) => {
            error!("Failed to get file metadata: {:?}, error: {}", file_path, e);
            writer.send_reply("550 failed to get file size").await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_ftpcommand::test_support::new_session;
    use crate::core_network::control::test_support::test_channel;

    #[tokio::test]
    async fn test_size_of_file_dir_and_missing() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("data.bin"), vec![7u8; 1234]).unwrap();
        std::fs::create_dir(root.path().join("dir")).unwrap();

        let (writer, mut replies) = test_channel();
        let config = Config::default();
        let mut session = new_session(root.path());

        handle_size_command(&writer, &config, &mut session, "data.bin").await.unwrap();
        assert_eq!(replies.next_reply().await, "213 1234");

        handle_size_command(&writer, &config, &mut session, "dir").await.unwrap();
        assert_eq!(replies.next_reply().await, "550 failed to get file size");

        handle_size_command(&writer, &config, &mut session, "nope").await.unwrap();
        assert_eq!(replies.next_reply().await, "550 failed to get file size");
    }
}
