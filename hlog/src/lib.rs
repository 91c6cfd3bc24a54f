//! # hlog
//! Leveled logger with configurable headers and optional mirror files.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! hlog = "0.1.0"
//! ```
//!
//! ```rust
//! use hlog::{Flags, info, error};
//!
//! hlog::set_flags(Flags::STD | Flags::SHORT_FILE);
//! info!("listening on port ", 8080);
//! error!("retries left:", 1, 2, 3);
//! ```
//!
//! Operands are joined the way a print-all would: strings glue to their
//! neighbours, any two adjacent non-string operands get a space between them.
//!
//! ## Independent loggers
//! The default logger is a convenience. Loggers can be built and passed around
//! explicitly; they are `Sync` and every method takes `&self`.
//!
//! ```rust
//! use hlog::{Flags, logger_config};
//!
//! let logger = logger_config()
//!     .with_stdout()
//!     .with_prefix("[worker] ")
//!     .with_flags(Flags::TIME | Flags::MICROSECONDS)
//!     .private_mirror()
//!     .build();
//! logger.output("started").unwrap();
//! hlog::warn!(logger = logger; "queue depth ", 12);
//! ```
//!
//! ## Mirror files
//! Every line can be duplicated into a file. The file is created if it does
//! not exist and appended to if it does. The mirror path set through
//! [`set_mirror_path`] is shared by every logger built without
//! `private_mirror()`.
//!
//! ```rust
//! use hlog::{Flags, info};
//!
//! std::fs::remove_file("/tmp/hlog_doc_app.log").ok();
//! hlog::set_flags(Flags::empty());
//! hlog::set_mirror_path(Some("/tmp/hlog_doc_app.log"));
//! info!("Hello, world!");
//! assert_eq!(
//!     std::fs::read_to_string("/tmp/hlog_doc_app.log").unwrap(),
//!     "[INFO] Hello, world!\n"
//! );
//! ```
//!
//! ## The `log` facade
//! ```rust
//! hlog::init_log_bridge().unwrap();
//! log::info!("routed through the default logger");
//! ```

use log::{LevelFilter, Log};
use std::{
    io::{self, Write},
    path::Path,
    sync::LazyLock,
};

pub use hlog_core::{
    Caller, Clock, DEBUG_ON, DebugGate, Flags, HLOG_CONFIG, Level, Logger, LoggerBuilder,
    MirrorMode, Operand, Shown, local_now, logger_config, sprint,
};

/// Process-wide default logger, writing to stderr. Initial flags and debug
/// gate come from `HLOG_FLAGS` and `HLOG_DEBUG`.
static DEFAULT_LOGGER: LazyLock<Logger> = LazyLock::new(|| {
    logger_config()
        .with_flags(Flags::from_bits_retain(HLOG_CONFIG.FLAGS))
        .with_debug(DebugGate::from_raw(HLOG_CONFIG.DEBUG))
        .build()
});

pub fn default_logger() -> &'static Logger {
    &DEFAULT_LOGGER
}

pub fn set_output<W: Write + Send + 'static>(sink: W) {
    DEFAULT_LOGGER.set_output(sink);
}

pub fn set_flags(flags: Flags) {
    DEFAULT_LOGGER.set_flags(flags);
}

pub fn flags() -> Flags {
    DEFAULT_LOGGER.flags()
}

/// `DebugGate::On` (or `DebugGate::from_raw(DEBUG_ON)`) enables debug lines.
pub fn set_debug_gate(gate: DebugGate) {
    DEFAULT_LOGGER.set_debug_gate(gate);
}

/// Sets or clears the shared mirror file.
pub fn set_mirror_path<P: AsRef<Path>>(path: Option<P>) -> &'static Logger {
    DEFAULT_LOGGER.set_mirror_path(path);
    &DEFAULT_LOGGER
}

#[track_caller]
pub fn info(args: &[&dyn Operand]) -> io::Result<()> {
    DEFAULT_LOGGER.info(args)
}

#[track_caller]
pub fn debug(args: &[&dyn Operand]) -> io::Result<()> {
    DEFAULT_LOGGER.debug(args)
}

#[track_caller]
pub fn warn(args: &[&dyn Operand]) -> io::Result<()> {
    DEFAULT_LOGGER.warn(args)
}

#[track_caller]
pub fn error(args: &[&dyn Operand]) -> io::Result<()> {
    DEFAULT_LOGGER.error(args)
}

#[track_caller]
pub fn fatal(args: &[&dyn Operand]) -> ! {
    DEFAULT_LOGGER.fatal(args)
}

/// Forwards `log` records to the default logger.
struct LogBridge;

impl Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info || DEFAULT_LOGGER.debug_gate().is_on()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        };
        let caller = match (record.file(), record.line()) {
            (Some(file), Some(line)) => Caller::new(file, line),
            _ => Caller::unknown(),
        };
        DEFAULT_LOGGER
            .emit_at(level, caller, &record.args().to_string())
            .ok();
    }

    fn flush(&self) {}
}

/// Installs the bridge as the `log` crate's logger. Debug and trace records
/// pass through the default logger's debug gate.
pub fn init_log_bridge() -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(LogBridge))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

#[doc(hidden)]
#[macro_export]
macro_rules! __hlog_emit {
    ($method:ident, logger = $logger:expr; $($arg:expr),* $(,)?) => {
        $logger.$method(&[$(&$arg as &dyn $crate::Operand),*])
    };
    ($method:ident, $($arg:expr),* $(,)?) => {
        $crate::default_logger().$method(&[$(&$arg as &dyn $crate::Operand),*])
    };
}

/// Info line on the default logger, or on `logger = expr;`. Sink errors are discarded.
#[macro_export]
macro_rules! info {
    ($($t:tt)*) => { { let _ = $crate::__hlog_emit!(info, $($t)*); } };
}

/// Debug line, dropped unless the debug gate is on.
#[macro_export]
macro_rules! debug {
    ($($t:tt)*) => { { let _ = $crate::__hlog_emit!(debug, $($t)*); } };
}

#[macro_export]
macro_rules! warn {
    ($($t:tt)*) => { { let _ = $crate::__hlog_emit!(warn, $($t)*); } };
}

#[macro_export]
macro_rules! error {
    ($($t:tt)*) => { { let _ = $crate::__hlog_emit!(error, $($t)*); } };
}

/// Writes the line, then exits the process with status 1.
#[macro_export]
macro_rules! fatal {
    ($($t:tt)*) => { $crate::__hlog_emit!(fatal, $($t)*) };
}
