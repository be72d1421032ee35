//! Timestamped diagnostic lines for positions with logging switched on.

use chrono::Local;

/// `message` prefixed with the local wall-clock time, e.g.
/// `[14:03:27.512] Initializing from <fen>`.
pub fn timestamped(message: &str) -> String {
    format!("[{}] {message}", Local::now().format("%H:%M:%S%.3f"))
}

/// Print `message()` to stdout when `enabled`. The message is only built
/// when it will be printed.
pub fn log_info<F>(enabled: bool, message: F)
where
    F: FnOnce() -> String,
{
    if enabled {
        println!("{}", timestamped(&message()));
    }
}
