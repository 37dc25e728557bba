//! Queries about the controlling terminal.

use std::env;
use std::io;

use crossterm::tty::IsTty;
use log::debug;

/// Size used when neither the terminal nor `COLUMNS` tell us better.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Current `(columns, rows)` of the terminal.
///
/// When stdout is not attached to a terminal (pipes, files, CI), the
/// `COLUMNS` environment variable is honoured, then [`FALLBACK_SIZE`].
pub fn terminal_size() -> (u16, u16) {
    match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 => (cols, rows),
        other => {
            debug!("Terminal size unavailable ({:?}), using fallback", other);
            let cols = columns_from_env(env::var("COLUMNS").ok().as_deref())
                .unwrap_or(FALLBACK_SIZE.0);
            (cols, FALLBACK_SIZE.1)
        }
    }
}

fn columns_from_env(value: Option<&str>) -> Option<u16> {
    value?.trim().parse().ok().filter(|&c| c > 0)
}

pub fn stdout_is_terminal() -> bool {
    io::stdout().is_tty()
}
