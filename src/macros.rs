//! Timestamped logging. `info_time!` goes to stdout, `warn_time!` to stderr.

use chrono::{DateTime, Local};

/// Current local time, padded so messages line up.
#[doc(hidden)]
pub fn stamp() -> String {
    format!("{:<30}", Local::now())
}

/// Seconds since `since`, with microsecond precision.
#[doc(hidden)]
pub fn elapsed_secs(since: DateTime<Local>) -> f64 {
    (Local::now() - since)
        .num_microseconds()
        .map(|n| n as f64 / 1_000_000.0)
        .unwrap_or(0.0)
}

/// Logs a line with the current time. Pass a start time first to append how long it took.
/// ```ignore
/// info_time!("page {}", 1);
/// let started = Local::now();
/// info_time!(started, "page {} done", 1);
/// ```
#[macro_export]
macro_rules! info_time {
    ($strfm:literal $(,)? $($arg:expr),*) => {
        println!("{} : INFO {}", $crate::macros::stamp(), format!($strfm, $($arg),*))
    };
    ($time:expr, $strfm:literal $(,)? $($arg:expr),*) => {
        println!(
            "{} : INFO {} (took {:.3} sec)",
            $crate::macros::stamp(),
            format!($strfm, $($arg),*),
            $crate::macros::elapsed_secs($time)
        )
    };
}

/// For failures that are reported and then skipped.
#[macro_export]
macro_rules! warn_time {
    ($strfm:literal $(,)? $($arg:expr),*) => {
        eprintln!("{} : WARN {}", $crate::macros::stamp(), format!($strfm, $($arg),*))
    };
}
