use clap::Parser;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "pasvftpd", about = "A passive-mode FTP server written in Rust.")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to listen on, overrides the configuration file
    #[arg(short = 'a', long)]
    pub listen_address: Option<String>,

    /// Port to listen on, overrides the configuration file
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}
