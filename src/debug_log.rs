// Process-wide debug log shown in the Debug tab
use once_cell::sync::Lazy;
use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;

pub const MAX_DEBUG_LOGS: usize = 1000;

static DEBUG_LOGS: Lazy<Mutex<VecDeque<String>>> =
    Lazy::new(|| Mutex::new(VecDeque::with_capacity(MAX_DEBUG_LOGS)));

// Mirror to stderr only when it is redirected, a tty would garble the TUI
static MIRROR_TO_STDERR: Lazy<bool> = Lazy::new(|| atty::isnt(atty::Stream::Stderr));

pub fn debug_log<S: Into<String>>(msg: S) {
    let line = format!("[{}] {}", chrono::Local::now().format("%H:%M:%S%.3f"), msg.into());

    if *MIRROR_TO_STDERR {
        eprintln!("{}", line);
    }
    if let Ok(mut logs) = DEBUG_LOGS.lock() {
        if logs.len() == MAX_DEBUG_LOGS {
            logs.pop_front();
        }
        logs.push_back(line);
    }
}

pub fn snapshot() -> Vec<String> {
    DEBUG_LOGS
        .lock()
        .map(|logs| logs.iter().cloned().collect())
        .unwrap_or_default()
}

/// Text of a caught panic payload (`panic!` with a literal or a formatted message).
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unexpected failure".to_string())
}

/// Runs `f` with panic reports sent to the debug log instead of the terminal.
/// The previous hook is back in place when this returns.
pub fn with_panics_logged<T>(f: impl FnOnce() -> T) -> std::thread::Result<T> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        debug_log(format!("ERROR: {}", info));
    }));
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    panic::set_hook(original_hook);
    outcome
}

#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        $crate::debug_log(format!("TRACE: {}", format!($($arg)*)))
    };
}

#[macro_export]
macro_rules! debug_error {
    ($($arg:tt)*) => {
        $crate::debug_log(format!("ERROR: {}", format!($($arg)*)))
    };
}

#[macro_export]
macro_rules! debug_timing {
    ($name:expr, $start:expr) => {
        $crate::debug_log(format!("TIMING: {} took {:?}", $name, $start.elapsed()))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_are_readable() {
        let literal = panic::catch_unwind(|| panic!("plain")).unwrap_err();
        assert_eq!(panic_message(literal.as_ref()), "plain");
        let formatted = panic::catch_unwind(|| panic!("page {}", 3)).unwrap_err();
        assert_eq!(panic_message(formatted.as_ref()), "page 3");
        let other = panic::catch_unwind(|| panic::panic_any(7_i32)).unwrap_err();
        assert_eq!(panic_message(other.as_ref()), "unexpected failure");
    }

    #[test]
    fn logged_panics_land_in_the_buffer() {
        let outcome = with_panics_logged(|| -> u8 { panic!("logged-panic-marker") });
        assert!(outcome.is_err());
        assert!(snapshot().iter().any(|l| l.contains("ERROR:") && l.contains("logged-panic-marker")));
        assert_eq!(with_panics_logged(|| 5).ok(), Some(5));
    }

    #[test]
    fn lines_are_kept_and_capped() {
        let marker = "debug-log-cap-test";
        for i in 0..MAX_DEBUG_LOGS + 5 {
            debug_log(format!("{marker} {i}"));
        }
        let logs = snapshot();
        assert!(logs.len() <= MAX_DEBUG_LOGS);
        let newest = format!("{marker} {}", MAX_DEBUG_LOGS + 4);
        assert!(logs.iter().any(|l| l.ends_with(&newest)));
        assert!(!logs.iter().any(|l| l.ends_with(&format!("{marker} 0"))));
    }
}
