// src/constants.rs

pub const DEFAULT_LISTEN_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_LISTEN_PORT: u16 = 8021;
pub const DEFAULT_CONFIG_PATH: &str = "/etc/pasvftpd.conf";

pub const ANONYMOUS_USERNAMES: [&str; 3] = ["ftp", "anonymous", "anon"];

pub const DEFAULT_UPLOAD_BUFFER_SIZE: usize = 256 * 1024;
pub const DEFAULT_DOWNLOAD_BUFFER_SIZE: usize = 128 * 1024;

// p1 is drawn from [PASV_P1_MIN, PASV_P1_MAX], p2 covers a full byte.
pub const PASV_P1_MIN: u8 = 128;
pub const PASV_P1_MAX: u8 = 190;
pub const PASV_BIND_ATTEMPTS: u32 = 8;
