//! Leveled logger capability consumed by the driver.
//!
//! The driver never hard-codes a logging implementation. It accepts anything
//! implementing [`Logger`] and defaults to [`ConsoleLogger`] at
//! [`Level::Info`]. Applications already wired into the `log` ecosystem can
//! hand the driver a [`FacadeLogger`] instead.

use std::fmt;

/// Severity threshold for [`ConsoleLogger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        write!(f, "{}", name)
    }
}

/// Leveled diagnostic output.
///
/// The store itself only ever calls [`Logger::debug`]; the remaining levels
/// exist so a single injected logger can serve the embedding application too.
pub trait Logger: Send + Sync {
    fn fatal(&self, message: fmt::Arguments<'_>);
    fn error(&self, message: fmt::Arguments<'_>);
    fn warn(&self, message: fmt::Arguments<'_>);
    fn info(&self, message: fmt::Arguments<'_>);
    fn debug(&self, message: fmt::Arguments<'_>);
    fn trace(&self, message: fmt::Arguments<'_>);
}

/// Logger writing `[LEVEL] message` lines to stderr, filtered by threshold.
pub struct ConsoleLogger {
    level: Level,
}

impl ConsoleLogger {
    pub fn new(level: Level) -> ConsoleLogger {
        ConsoleLogger { level }
    }

    fn emit(&self, level: Level, message: fmt::Arguments<'_>) {
        if level <= self.level {
            eprintln!("[{}] {}", level, message);
        }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        ConsoleLogger::new(Level::Info)
    }
}

impl Logger for ConsoleLogger {
    fn fatal(&self, message: fmt::Arguments<'_>) {
        self.emit(Level::Fatal, message);
    }

    fn error(&self, message: fmt::Arguments<'_>) {
        self.emit(Level::Error, message);
    }

    fn warn(&self, message: fmt::Arguments<'_>) {
        self.emit(Level::Warn, message);
    }

    fn info(&self, message: fmt::Arguments<'_>) {
        self.emit(Level::Info, message);
    }

    fn debug(&self, message: fmt::Arguments<'_>) {
        self.emit(Level::Debug, message);
    }

    fn trace(&self, message: fmt::Arguments<'_>) {
        self.emit(Level::Trace, message);
    }
}

/// Logger forwarding to the `log` facade crate.
///
/// Use this when the embedding application already installs a `log` backend
/// such as `env_logger`.
#[derive(Default)]
pub struct FacadeLogger;

impl Logger for FacadeLogger {
    fn fatal(&self, message: fmt::Arguments<'_>) {
        // `log` has no fatal level; error is the closest severity.
        log::error!("{}", message);
    }

    fn error(&self, message: fmt::Arguments<'_>) {
        log::error!("{}", message);
    }

    fn warn(&self, message: fmt::Arguments<'_>) {
        log::warn!("{}", message);
    }

    fn info(&self, message: fmt::Arguments<'_>) {
        log::info!("{}", message);
    }

    fn debug(&self, message: fmt::Arguments<'_>) {
        log::debug!("{}", message);
    }

    fn trace(&self, message: fmt::Arguments<'_>) {
        log::trace!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CapturingLogger {
        lines: Mutex<Vec<String>>,
    }

    impl Logger for CapturingLogger {
        fn fatal(&self, message: fmt::Arguments<'_>) {
            self.lines.lock().unwrap().push(format!("fatal: {}", message));
        }
        fn error(&self, message: fmt::Arguments<'_>) {
            self.lines.lock().unwrap().push(format!("error: {}", message));
        }
        fn warn(&self, message: fmt::Arguments<'_>) {
            self.lines.lock().unwrap().push(format!("warn: {}", message));
        }
        fn info(&self, message: fmt::Arguments<'_>) {
            self.lines.lock().unwrap().push(format!("info: {}", message));
        }
        fn debug(&self, message: fmt::Arguments<'_>) {
            self.lines.lock().unwrap().push(format!("debug: {}", message));
        }
        fn trace(&self, message: fmt::Arguments<'_>) {
            self.lines.lock().unwrap().push(format!("trace: {}", message));
        }
    }

    #[test]
    fn levels_order_from_fatal_to_trace() {
        assert!(Level::Fatal < Level::Error);
        assert!(Level::Info < Level::Debug);
        assert!(Level::Debug < Level::Trace);
    }

    #[test]
    fn custom_logger_receives_messages() {
        let logger = CapturingLogger {
            lines: Mutex::new(Vec::new()),
        };
        logger.debug(format_args!("hello {}", "world"));
        let lines = logger.lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], "debug: hello world");
    }
}
