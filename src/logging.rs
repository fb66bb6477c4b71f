// Conditional logging macros - only active in debug builds

use env_logger::Env;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Installs the stderr logger. Game text goes to stdout, so logs never mix
/// into scripted transcripts. Filter with `RUST_LOG`; defaults to `warn`.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();
}
