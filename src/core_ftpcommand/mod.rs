// Here's the list of the FTP commands implemented
pub mod abor;
pub mod cwd;
pub mod dele;
pub mod list;
pub mod mkd;
pub mod noop;
pub mod pass;
pub mod pwd;
pub mod quit;
pub mod retr;
pub mod rmd;
pub mod size;
pub mod stor;
pub mod type_;
pub mod user;

// Parsing and dispatch
pub mod command;
pub mod ftpcommand;
pub mod handlers;

// The utils and common functions are here
pub mod utils;
