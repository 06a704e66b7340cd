//! Process logging setup.
//!
//! Log lines go to stderr unless a log file is configured, in which case they
//! are appended there and never interleave with the rendered page.

use std::fs::OpenOptions;
use std::io;

use env_logger::{Builder, Target};

use crate::config::LogSettings;

/// Installs the global logger. Calling it again after a logger is set is a no-op.
pub fn init_logging(settings: &LogSettings) -> io::Result<()> {
    let mut builder = Builder::new();
    builder.parse_filters(&settings.filter);
    builder.format_timestamp_secs();

    if let Some(path) = settings.file.as_deref() {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    } else {
        builder.target(Target::Stderr);
    }

    if builder.try_init().is_err() {
        log::debug!("logger already initialized; keeping the existing one");
    }
    Ok(())
}
