#![deny(missing_docs)]
//! Logging for the GEO Studio workspace.
//!
//! The `geo_*` macros prefix every line with the shell dispatch it belongs
//! to, so a controller decision in the log can be matched to the message
//! that caused it. Lines written off the shell thread (generator runtime,
//! input reader) carry `[-]`.

use std::cell::Cell;
use std::fmt;

#[doc(hidden)]
pub use log as __log;

thread_local! {
    /// Number of messages the shell has dispatched on this thread.
    static DISPATCH_COUNT: Cell<u64> = const { Cell::new(0) };
}

/// Records that the shell dispatched one more message on this thread.
///
/// Returns the new count.
pub fn bump_dispatch_count() -> u64 {
    DISPATCH_COUNT.with(|count| {
        let next = count.get().wrapping_add(1);
        count.set(next);
        next
    })
}

/// Messages dispatched on this thread so far, 0 off the shell thread.
pub fn dispatch_count() -> u64 {
    DISPATCH_COUNT.with(|count| count.get())
}

/// Line prefix naming the dispatch in progress: `#n`, or `-` where nothing
/// has been dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchTag(u64);

impl DispatchTag {
    /// Tag of the current thread.
    pub fn current() -> Self {
        Self(dispatch_count())
    }
}

impl fmt::Display for DispatchTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("-"),
            pass => write!(f, "#{pass}"),
        }
    }
}

/// Logs at trace level, tagged with the current dispatch.
#[macro_export]
macro_rules! geo_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!("[{}] {}", $crate::DispatchTag::current(), format_args!($($arg)*));
    }};
}

/// Logs at debug level, tagged with the current dispatch.
#[macro_export]
macro_rules! geo_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!("[{}] {}", $crate::DispatchTag::current(), format_args!($($arg)*));
    }};
}

/// Logs at info level, tagged with the current dispatch.
#[macro_export]
macro_rules! geo_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!("[{}] {}", $crate::DispatchTag::current(), format_args!($($arg)*));
    }};
}

/// Logs at warn level, tagged with the current dispatch.
#[macro_export]
macro_rules! geo_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!("[{}] {}", $crate::DispatchTag::current(), format_args!($($arg)*));
    }};
}

/// Logs at error level, tagged with the current dispatch.
#[macro_export]
macro_rules! geo_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!("[{}] {}", $crate::DispatchTag::current(), format_args!($($arg)*));
    }};
}

/// Installs a terminal logger for tests. Later calls are no-ops.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may have installed the logger already.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_count_is_per_thread() {
        assert_eq!(dispatch_count(), 0);
        assert_eq!(bump_dispatch_count(), 1);
        assert_eq!(bump_dispatch_count(), 2);

        let other = std::thread::spawn(dispatch_count).join().unwrap();
        assert_eq!(other, 0);
        assert_eq!(dispatch_count(), 2);
    }

    #[test]
    fn tag_names_the_pass_or_a_dash() {
        let idle = std::thread::spawn(|| DispatchTag::current().to_string())
            .join()
            .unwrap();
        assert_eq!(idle, "-");

        let busy = std::thread::spawn(|| {
            bump_dispatch_count();
            bump_dispatch_count();
            bump_dispatch_count();
            DispatchTag::current().to_string()
        })
        .join()
        .unwrap();
        assert_eq!(busy, "#3");
    }

    #[test]
    fn macros_accept_format_arguments() {
        initialize_for_tests();
        let ticket = 4;
        geo_info!("Generation {} started", ticket);
        geo_error!("Generation {ticket} failed: {}", "boom");
    }
}
