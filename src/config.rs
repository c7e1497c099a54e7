use crate::constants::{
    ANONYMOUS_USERNAMES, DEFAULT_DOWNLOAD_BUFFER_SIZE, DEFAULT_LISTEN_ADDRESS,
    DEFAULT_LISTEN_PORT, DEFAULT_UPLOAD_BUFFER_SIZE,
};
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_address: String,
    pub listen_port: u16,
    pub pasv_address: Option<Ipv4Addr>, // Announced in 227 replies, peer address when unset
    pub root_dir: Option<PathBuf>,      // Initial working directory of every session
    pub anonymous_users: Vec<String>,
    pub upload_buffer_size: Option<usize>, // Optional to allow default value
    pub download_buffer_size: Option<usize>, // Optional to allow default value
    pub strict_auth: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: String::from(DEFAULT_LISTEN_ADDRESS),
            listen_port: DEFAULT_LISTEN_PORT,
            pasv_address: None,
            root_dir: None,
            anonymous_users: ANONYMOUS_USERNAMES.iter().map(|s| s.to_string()).collect(),
            upload_buffer_size: Some(DEFAULT_UPLOAD_BUFFER_SIZE),
            download_buffer_size: Some(DEFAULT_DOWNLOAD_BUFFER_SIZE),
            strict_auth: false,
        }
    }
}

impl ServerConfig {
    pub fn upload_buffer_size(&self) -> usize {
        self.upload_buffer_size
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_UPLOAD_BUFFER_SIZE)
    }

    pub fn download_buffer_size(&self) -> usize {
        self.download_buffer_size
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_DOWNLOAD_BUFFER_SIZE)
    }

    pub fn is_anonymous_user(&self, username: &str) -> bool {
        self.anonymous_users.iter().any(|user| user == username)
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path))
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)?;
        Ok(config)
    }
}

// Helper function to log configuration options
pub fn log_config(config: &Config) {
    info!("  Listen Address: {}", config.server.listen_address);
    info!("  Listen Port: {}", config.server.listen_port);
    match config.server.pasv_address {
        Some(addr) => info!("  PASV Address: {}", addr),
        None => info!("  PASV Address: <control connection peer>"),
    }
    match &config.server.root_dir {
        Some(dir) => info!("  Root Directory: {}", dir.display()),
        None => info!("  Root Directory: <process working directory>"),
    }
    info!("  Anonymous Users: {}", config.server.anonymous_users.join(", "));
    info!(
        "  Upload Buffer Size: {} KB",
        config.server.upload_buffer_size() / 1024
    );
    info!(
        "  Download Buffer Size: {} KB",
        config.server.download_buffer_size() / 1024
    );
    info!("  Strict Auth: {}", config.server.strict_auth);
}
