use std::sync::LazyLock;

use derive_from_env::FromEnv;

/// Startup values for the default logger and the shared mirror, read once
/// from `HLOG_*` environment variables.
#[derive(FromEnv, Debug, PartialEq)]
#[from_env(prefix = "HLOG")]
#[allow(non_snake_case)]
pub struct HLogConfig {
    /// Raw header flags, `3` is date and time.
    #[from_env(default = "3")]
    pub FLAGS: u32,
    /// `1` opens the debug gate.
    #[from_env(default = "0")]
    pub DEBUG: i32,
    /// Empty means no mirror file.
    #[from_env(default = "")]
    pub MIRROR_PATH: String,
    #[from_env(default = "false")]
    pub MIRROR_PERSISTENT: bool,
}

impl Default for HLogConfig {
    fn default() -> Self {
        Self {
            FLAGS: 3,
            DEBUG: 0,
            MIRROR_PATH: String::new(),
            MIRROR_PERSISTENT: false,
        }
    }
}

/// Reads the environment. A malformed variable falls back to the defaults
/// with a warning on stderr rather than taking the host process down.
pub fn load_config() -> HLogConfig {
    HLogConfig::from_env().unwrap_or_else(|err| {
        eprintln!("hlog: ignoring HLOG_* environment, using defaults: {err:?}");
        HLogConfig::default()
    })
}

pub static HLOG_CONFIG: LazyLock<HLogConfig> = LazyLock::new(load_config);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_declared_env_defaults() {
        let config = HLogConfig::default();
        assert_eq!(config.FLAGS, 3);
        assert_eq!(config.DEBUG, 0);
        assert!(config.MIRROR_PATH.is_empty());
        assert!(!config.MIRROR_PERSISTENT);
    }

    #[test]
    fn test_load_config_without_overrides() {
        // only meaningful when the test runner does not set HLOG_* itself
        if std::env::vars().any(|(k, _)| k.starts_with("HLOG_")) {
            return;
        }
        assert_eq!(load_config(), HLogConfig::default());
    }
}
