//! Forwards the bridge's `log` records to a logger installed by the host.
//!
//! The host calls [`set_logger`] once; records logged before that are discarded.
//! Debug and trace records from other crates are dropped.

use std::sync::{Arc, OnceLock};

/// Receives the bridge's log lines on the host side.
///
/// Exported via `UniFFI` so the host can route bridge logs into its own
/// logging, e.g. `android.util.Log`.
///
/// # Examples
///
/// ```rust
/// use fingerprint_auth_core::logger::{LogLevel, Logger};
///
/// struct StderrLogger;
///
/// impl Logger for StderrLogger {
///     fn log(&self, level: LogLevel, message: String) {
///         eprintln!("[{level:?}] {message}");
///     }
/// }
/// ```
///
/// ## Kotlin
///
/// ```kotlin
/// object FingerprintAuthLogger : Logger {
///     override fun log(level: LogLevel, message: String) {
///         when (level) {
///             LogLevel.ERROR -> Log.e("FingerprintAuth", message)
///             LogLevel.WARN -> Log.w("FingerprintAuth", message)
///             else -> Log.v("FingerprintAuth", message)
///         }
///     }
/// }
///
/// // once, e.g. in the plugin's initialize()
/// setLogger(FingerprintAuthLogger)
/// ```
#[uniffi::export(with_foreign)]
pub trait Logger: Sync + Send {
    /// Logs `message` at `level`.
    fn log(&self, level: LogLevel, message: String);
}

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum LogLevel {
    /// Very detailed tracing.
    Trace,
    /// Request lifecycle and phase changes.
    Debug,
    /// Informational messages.
    Info,
    /// Unexpected but recoverable, e.g. a duplicate platform callback.
    Warn,
    /// A request failed.
    Error,
}

/// Forwards `log` records to the host's [`Logger`].
struct ForeignLogger;

impl log::Log for ForeignLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let is_record_from_bridge = record
            .module_path()
            .is_some_and(|module_path| module_path.starts_with("fingerprint_auth"));

        let is_debug_or_trace_level =
            record.level() == log::Level::Debug || record.level() == log::Level::Trace;

        // Other crates' debug output is noise on the host side.
        if is_debug_or_trace_level && !is_record_from_bridge {
            return;
        }

        if let Some(logger) = LOGGER_INSTANCE.get() {
            logger.log(log_level(record.level()), format!("{}", record.args()));
        } else {
            eprintln!("Logger not set: {}", record.args());
        }
    }

    fn flush(&self) {}
}

const fn log_level(level: log::Level) -> LogLevel {
    match level {
        log::Level::Error => LogLevel::Error,
        log::Level::Warn => LogLevel::Warn,
        log::Level::Info => LogLevel::Info,
        log::Level::Debug => LogLevel::Debug,
        log::Level::Trace => LogLevel::Trace,
    }
}

static LOGGER_INSTANCE: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// Installs the host's logger. Only the first call takes effect.
#[uniffi::export]
pub fn set_logger(logger: Arc<dyn Logger>) {
    if LOGGER_INSTANCE.set(logger).is_err() {
        eprintln!("Logger already set");
        return;
    }

    if let Err(e) = init_logger() {
        eprintln!("Failed to set logger: {e}");
    }
}

fn init_logger() -> Result<(), log::SetLoggerError> {
    static LOGGER: ForeignLogger = ForeignLogger;
    log::set_logger(&LOGGER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
