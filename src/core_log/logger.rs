use colored::*;
use env_logger::{Builder, Env};
use std::io::Write;

/// Initializes the global logger with a custom format and colors.
///
/// `RUST_LOG` takes precedence; otherwise the filter defaults to `info`,
/// or `debug` when `verbose` is set.
pub fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };

    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            let timestamp = buf.timestamp().to_string();
            let level = match record.level() {
                log::Level::Error => record.level().to_string().red(),
                log::Level::Warn => record.level().to_string().yellow(),
                log::Level::Info => record.level().to_string().green(),
                log::Level::Debug => record.level().to_string().blue(),
                log::Level::Trace => record.level().to_string().white(),
            };
            writeln!(buf, "[{}] [{}] {}", timestamp, level, record.args())
        })
        .init();
}

/// Makes CR and LF visible so raw protocol lines read well in the log.
pub fn printable_line(line: &str) -> String {
    line.replace('\r', "<CR>").replace('\n', "<LF>")
}
