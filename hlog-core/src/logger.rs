use std::{
    borrow::Cow,
    io::{self, Write},
    panic::Location,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::{DateTime, FixedOffset, Local};
use colored::Colorize;

use crate::{
    flags::{DebugGate, Flags},
    header::{Caller, format_header},
    mirror::{Mirror, MirrorMode},
    operand::{Operand, sprint},
};

/// Time source used to stamp lines.
pub type Clock = fn() -> DateTime<FixedOffset>;

/// Current local time.
pub fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Severity of a line emitted through the level functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    /// Tag written in place of the logger prefix.
    ///
    /// Tags end with a space, so a line reads `[ERROR] 2024/01/02 ...`. Loggers
    /// that emitted the bare tag (`[ERROR]2024/01/02 ...`) differ from this
    /// output by that one byte.
    pub fn tag(self) -> &'static str {
        match self {
            Level::Debug => "[DEBUG] ",
            Level::Info => "[INFO] ",
            Level::Warn => "[WARN] ",
            Level::Error => "[ERROR] ",
            Level::Fatal => "[FATAL] ",
        }
    }

    fn render_tag(self, colored: bool) -> Cow<'static, str> {
        if !colored {
            return Cow::Borrowed(self.tag());
        }
        let tag = self.tag().trim_end();
        let tag = match self {
            Level::Debug => tag.blue(),
            Level::Info => tag.green(),
            Level::Warn => tag.yellow(),
            Level::Error => tag.red(),
            Level::Fatal => tag.purple(),
        };
        Cow::Owned(format!("{tag} "))
    }
}

enum CallSite<'a> {
    Tracked(&'static Location<'static>),
    Known(Caller<'a>),
}

impl<'a> CallSite<'a> {
    fn resolve(self) -> Caller<'a> {
        match self {
            CallSite::Tracked(location) => Caller::from(location),
            CallSite::Known(caller) => caller,
        }
    }
}

struct LoggerState {
    prefix: String,
    flags: Flags,
    debug: DebugGate,
    sink: Box<dyn Write + Send>,
    /// Scratch space for one line, cleared on every write.
    buf: Vec<u8>,
    colored_tags: bool,
}

/// A leveled logger writing header-prefixed lines to a sink and, optionally,
/// to a mirror file.
///
/// Every method takes `&self`; share a logger between threads with `Arc` or a
/// `static`.
pub struct Logger {
    state: Mutex<LoggerState>,
    mirror: Arc<Mirror>,
    clock: Clock,
}

impl Logger {
    /// Creates a logger writing to `sink`, using the shared mirror slot.
    pub fn new<W: Write + Send + 'static>(sink: W, prefix: &str, flags: Flags) -> Self {
        logger_config()
            .with_sink(sink)
            .with_prefix(prefix)
            .with_flags(flags)
            .build()
    }

    fn lock(&self) -> MutexGuard<'_, LoggerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_output<W: Write + Send + 'static>(&self, sink: W) {
        self.lock().sink = Box::new(sink);
    }

    pub fn set_prefix(&self, prefix: &str) {
        self.lock().prefix = prefix.into();
    }

    pub fn prefix(&self) -> String {
        self.lock().prefix.clone()
    }

    pub fn set_flags(&self, flags: Flags) {
        self.lock().flags = flags;
    }

    pub fn flags(&self) -> Flags {
        self.lock().flags
    }

    pub fn set_debug_gate(&self, gate: DebugGate) {
        self.lock().debug = gate;
    }

    pub fn debug_gate(&self) -> DebugGate {
        self.lock().debug
    }

    pub fn set_colored_tags(&self, yes: bool) {
        self.lock().colored_tags = yes;
    }

    /// Sets or clears the mirror path of this logger's mirror slot. For
    /// loggers on the shared slot this affects every such logger.
    pub fn set_mirror_path<P: AsRef<Path>>(&self, path: Option<P>) {
        self.mirror.set_path(path);
    }

    pub fn mirror_path(&self) -> Option<PathBuf> {
        self.mirror.path()
    }

    pub fn set_mirror_mode(&self, mode: MirrorMode) {
        self.mirror.set_mode(mode);
    }

    pub fn mirror_mode(&self) -> MirrorMode {
        self.mirror.mode()
    }

    /// Writes `message` with the configured prefix and header.
    ///
    /// The location segment, when enabled, points at the caller of this
    /// method (or further up, through `#[track_caller]` wrappers). Returns an
    /// error only if the sink fails.
    #[track_caller]
    pub fn output(&self, message: &str) -> io::Result<()> {
        self.write_line(None, CallSite::Tracked(Location::caller()), message)
    }

    /// Same as [`Logger::output`] with an explicit call site.
    pub fn output_at(&self, caller: Caller<'_>, message: &str) -> io::Result<()> {
        self.write_line(None, CallSite::Known(caller), message)
    }

    #[track_caller]
    pub fn info(&self, args: &[&dyn Operand]) -> io::Result<()> {
        self.emit(Level::Info, args)
    }

    /// Dropped without any formatting unless the debug gate is on.
    #[track_caller]
    pub fn debug(&self, args: &[&dyn Operand]) -> io::Result<()> {
        self.emit(Level::Debug, args)
    }

    #[track_caller]
    pub fn warn(&self, args: &[&dyn Operand]) -> io::Result<()> {
        self.emit(Level::Warn, args)
    }

    #[track_caller]
    pub fn error(&self, args: &[&dyn Operand]) -> io::Result<()> {
        self.emit(Level::Error, args)
    }

    /// Writes the line, then exits the process with status 1 whether or not
    /// the write succeeded.
    #[track_caller]
    pub fn fatal(&self, args: &[&dyn Operand]) -> ! {
        self.emit(Level::Fatal, args).ok();
        std::process::exit(1)
    }

    /// Emits `args` at `level`, tagged and attributed to the caller.
    #[track_caller]
    pub fn emit(&self, level: Level, args: &[&dyn Operand]) -> io::Result<()> {
        if level == Level::Debug && !self.debug_gate().is_on() {
            return Ok(());
        }
        let message = sprint(args);
        self.write_line(Some(level), CallSite::Tracked(Location::caller()), &message)
    }

    /// Emits an already formatted message at `level` with an explicit call site.
    pub fn emit_at(&self, level: Level, caller: Caller<'_>, message: &str) -> io::Result<()> {
        if level == Level::Debug && !self.debug_gate().is_on() {
            return Ok(());
        }
        self.write_line(Some(level), CallSite::Known(caller), message)
    }

    fn write_line(
        &self,
        level: Option<Level>,
        site: CallSite<'_>,
        message: &str,
    ) -> io::Result<()> {
        let now = (self.clock)();
        let mut state = self.lock();
        let flags = state.flags;
        let prefix = match level {
            Some(level) => level.render_tag(state.colored_tags),
            None => Cow::Owned(state.prefix.clone()),
        };
        let caller = if flags.wants_location() {
            // caller resolution happens outside the lock; the header uses the snapshot above
            drop(state);
            let caller = site.resolve();
            state = self.lock();
            Some(caller)
        } else {
            None
        };

        let LoggerState { sink, buf, .. } = &mut *state;
        buf.clear();
        format_header(buf, &prefix, now, caller, flags);
        buf.extend_from_slice(message.as_bytes());
        if !message.ends_with('\n') {
            buf.push(b'\n');
        }
        let result = sink.write_all(&buf[..]).and_then(|()| sink.flush());
        self.mirror.write(&buf[..]);
        result
    }
}

/// Builder for configuring a [`Logger`].
pub struct LoggerBuilder {
    sink: Option<Box<dyn Write + Send>>,
    prefix: String,
    flags: Flags,
    debug: DebugGate,
    private_mirror: bool,
    mirror_path: Option<PathBuf>,
    mirror_mode: Option<MirrorMode>,
    clock: Clock,
    colored_tags: bool,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            sink: None,
            prefix: String::new(),
            flags: Flags::STD,
            debug: DebugGate::Off,
            private_mirror: false,
            mirror_path: None,
            mirror_mode: None,
            clock: local_now,
            colored_tags: false,
        }
    }
}

impl LoggerBuilder {
    /// Sets the primary sink. Defaults to stderr.
    pub fn with_sink<W: Write + Send + 'static>(self, sink: W) -> Self {
        Self {
            sink: Some(Box::new(sink)),
            ..self
        }
    }
    /// Writes to stdout instead of stderr.
    pub fn with_stdout(self) -> Self {
        self.with_sink(io::stdout())
    }
    pub fn with_prefix(self, prefix: &str) -> Self {
        Self {
            prefix: prefix.into(),
            ..self
        }
    }
    pub fn with_flags(self, flags: Flags) -> Self {
        Self { flags, ..self }
    }
    pub fn with_debug(self, debug: DebugGate) -> Self {
        Self { debug, ..self }
    }
    /// Sets the mirror path. On the shared slot this takes effect for every
    /// logger using it as soon as [`LoggerBuilder::build`] runs.
    pub fn with_mirror_path<P: AsRef<Path>>(self, path: P) -> Self {
        Self {
            mirror_path: Some(path.as_ref().to_path_buf()),
            ..self
        }
    }
    pub fn with_mirror_mode(self, mode: MirrorMode) -> Self {
        Self {
            mirror_mode: Some(mode),
            ..self
        }
    }
    /// Gives the logger its own mirror slot instead of the shared one.
    pub fn private_mirror(self) -> Self {
        Self {
            private_mirror: true,
            ..self
        }
    }
    pub fn with_clock(self, clock: Clock) -> Self {
        Self { clock, ..self }
    }
    pub fn with_colored_tags(self, yes: bool) -> Self {
        Self {
            colored_tags: yes,
            ..self
        }
    }

    pub fn build(self) -> Logger {
        let Self {
            sink,
            prefix,
            flags,
            debug,
            private_mirror,
            mirror_path,
            mirror_mode,
            clock,
            colored_tags,
        } = self;
        let mirror = if private_mirror {
            Mirror::private()
        } else {
            Mirror::shared()
        };
        if let Some(path) = mirror_path {
            mirror.set_path(Some(path));
        }
        if let Some(mode) = mirror_mode {
            mirror.set_mode(mode);
        }
        Logger {
            state: Mutex::new(LoggerState {
                prefix,
                flags,
                debug,
                sink: sink.unwrap_or_else(|| Box::new(io::stderr())),
                buf: Vec::with_capacity(128),
                colored_tags,
            }),
            mirror,
            clock,
        }
    }
}

/// Returns a default LoggerBuilder: stderr, no prefix, date and time, debug
/// off, shared mirror slot.
pub fn logger_config() -> LoggerBuilder {
    LoggerBuilder::default()
}
