use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError},
};

use crate::config::HLOG_CONFIG;

/// How the mirror file is accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MirrorMode {
    /// Open, append and close the file for every line. No handle outlives a write.
    #[default]
    Reopen,
    /// Keep one handle open under the mirror's lock and reuse it.
    Persistent,
}

struct MirrorState {
    path: Option<PathBuf>,
    mode: MirrorMode,
    handle: Option<File>,
}

/// Secondary destination receiving a copy of every emitted line.
pub struct Mirror {
    state: Mutex<MirrorState>,
}

/// Mirror slot shared by the default logger and every logger that does not
/// ask for a private one.
static SHARED_MIRROR: LazyLock<Arc<Mirror>> = LazyLock::new(|| {
    let path = Some(HLOG_CONFIG.MIRROR_PATH.as_str())
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);
    let mode = if HLOG_CONFIG.MIRROR_PERSISTENT {
        MirrorMode::Persistent
    } else {
        MirrorMode::Reopen
    };
    Arc::new(Mirror::new(path, mode))
});

fn open_mirror(path: &Path) -> Result<File, std::io::Error> {
    File::options()
        .create(true)
        .append(true)
        .read(true)
        .open(path)
}

/// Mirror files are mandatory once configured: failing to open one ends the process.
fn exit_on_open_failure(path: &Path, err: std::io::Error) -> ! {
    eprintln!("error opening mirror file {}: {err}", path.display());
    std::process::exit(1)
}

impl Mirror {
    pub fn new(path: Option<PathBuf>, mode: MirrorMode) -> Self {
        Self {
            state: Mutex::new(MirrorState {
                path,
                mode,
                handle: None,
            }),
        }
    }

    /// A fresh slot with no path, independent of the shared one.
    pub fn private() -> Arc<Self> {
        Arc::new(Self::new(None, MirrorMode::default()))
    }

    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED_MIRROR)
    }

    fn lock(&self) -> MutexGuard<'_, MirrorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.lock().path.clone()
    }

    /// Sets or clears (`None`) the mirror path. Any cached handle is dropped.
    pub fn set_path<P: AsRef<Path>>(&self, path: Option<P>) {
        let mut state = self.lock();
        state.path = path.map(|p| p.as_ref().to_path_buf());
        state.handle = None;
    }

    pub fn mode(&self) -> MirrorMode {
        self.lock().mode
    }

    pub fn set_mode(&self, mode: MirrorMode) {
        let mut state = self.lock();
        state.mode = mode;
        state.handle = None;
    }

    /// Appends `line` to the mirror file, if one is configured.
    ///
    /// Write errors after a successful open are ignored; an open failure
    /// terminates the process.
    pub fn write(&self, line: &[u8]) {
        let mut state = self.lock();
        let Some(path) = state.path.clone() else {
            return;
        };
        let mode = state.mode;
        match mode {
            MirrorMode::Reopen => {
                drop(state);
                let mut file =
                    open_mirror(&path).unwrap_or_else(|e| exit_on_open_failure(&path, e));
                file.write_all(line).ok();
            }
            MirrorMode::Persistent => {
                if state.handle.is_none() {
                    let file =
                        open_mirror(&path).unwrap_or_else(|e| exit_on_open_failure(&path, e));
                    state.handle = Some(file);
                }
                if let Some(file) = state.handle.as_mut() {
                    file.write_all(line).ok();
                }
            }
        }
    }
}
