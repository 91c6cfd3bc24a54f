//! # hlog-core
//! Core engine for hlog - header formatting, sinks and mirror files.

mod config;
mod flags;
mod header;
mod itoa;
mod logger;
mod mirror;
mod operand;

pub use config::{HLOG_CONFIG, HLogConfig, load_config};
pub use flags::{DEBUG_ON, DebugGate, Flags};
pub use header::{Caller, format_header, short_file};
pub use itoa::itoa;
pub use logger::{Clock, Level, Logger, LoggerBuilder, local_now, logger_config};
pub use mirror::{Mirror, MirrorMode};
pub use operand::{Operand, Shown, sprint};
