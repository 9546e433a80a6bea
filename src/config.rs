//! Viewer configuration.
//!
//! [`ViewerConfig`] is resolved once in `main` and passed down. The log directory is taken
//! from the first source that provides one:
//!
//! 1. the `DIR` command-line argument
//! 2. `ELOGV_DIR`
//! 3. `PORTAGE_LOGDIR` joined with `elog`
//! 4. `log_dir` in `<config_dir>/elogv/config.toml` (cargo feature `config`)
//! 5. `/var/log/portage/elog`

use crate::error::Result;
use std::ffi::OsString;
use std::path::PathBuf;

/// Directory used when nothing else names one.
pub const DEFAULT_LOG_DIR: &str = "/var/log/portage/elog";

/// Settings for one viewer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub log_dir: PathBuf,
    /// Draw without colors
    pub monochrome: bool,
    /// Send log output here instead of stderr
    pub log_file: Option<PathBuf>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub log_dir: Option<PathBuf>,
    pub monochrome: bool,
    pub log_file: Option<PathBuf>,
}

/// Contents of the optional configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct FileConfig {
    pub log_dir: Option<PathBuf>,
    pub monochrome: Option<bool>,
}

impl FileConfig {
    /// Parse the TOML configuration file format.
    #[cfg(feature = "config")]
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| crate::error::ElogvError::config(e.to_string()))
    }

    /// Read `<config_dir>/elogv/config.toml`; `None` when there is no such file.
    #[cfg(feature = "config")]
    pub fn load() -> Result<Option<Self>> {
        use crate::error::ElogvError;

        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        let path = dir.join("elogv").join("config.toml");
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                log::debug!("loading configuration from {}", path.display());
                Self::parse(&text)
                    .map(Some)
                    .map_err(|e| ElogvError::config(format!("{}: {e}", path.display())))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ElogvError::config(format!(
                "cannot read {}: {err}",
                path.display()
            ))),
        }
    }

    #[cfg(not(feature = "config"))]
    pub fn load() -> Result<Option<Self>> {
        Ok(None)
    }
}

impl ViewerConfig {
    /// Combine the command line, the environment (through `env`) and the config file.
    ///
    /// Empty environment values are treated as unset.
    pub fn resolve<F>(cli: CliOverrides, file: Option<FileConfig>, env: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let env = |key: &str| env(key).filter(|value| !value.is_empty());
        let file = file.unwrap_or_default();

        let log_dir = cli
            .log_dir
            .or_else(|| env("ELOGV_DIR").map(PathBuf::from))
            .or_else(|| env("PORTAGE_LOGDIR").map(|dir| PathBuf::from(dir).join("elog")))
            .or(file.log_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        Self {
            log_dir,
            monochrome: cli.monochrome || file.monochrome.unwrap_or(false),
            log_file: cli.log_file,
        }
    }

    /// Resolve against the process environment and the user's config file.
    pub fn from_environment(cli: CliOverrides) -> Result<Self> {
        let file = FileConfig::load()?;
        Ok(Self::resolve(cli, file, |key| std::env::var_os(key)))
    }
}
