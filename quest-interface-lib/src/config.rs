use std::{fmt, fs, path::Path, result::Result as StdResult, str::FromStr};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_LOG_TAG: &str = "OculusMobileActivity";
pub const DEFAULT_LOG_LEVEL: &str = "debug";
pub const DEFAULT_UI_THREAD_NAME: &str = "quest-ui";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct BridgeConfig {
    /// Tag attached to every log line the bridge emits.
    pub log_tag: String,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Name given to the thread owned by `ThreadDispatcher`.
    pub ui_thread_name: String,
    /// Skip post-load hooks that only reach the UI thread after destroy.
    pub drop_posts_after_destroy: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_tag: DEFAULT_LOG_TAG.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            ui_thread_name: DEFAULT_UI_THREAD_NAME.to_string(),
            drop_posts_after_destroy: false,
        }
    }
}

impl BridgeConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::config(format!("failed to read {}: {}", path.as_ref().display(), e))
        })?;
        let config: BridgeConfig = content.parse().map_err(Error::config)?;
        // Reject a bad level at load time rather than at logger init.
        config.max_level()?;
        Ok(config)
    }

    /// Load from `path` when given, falling back to defaults. A load failure is
    /// handed back for the caller to log once logging is up.
    pub fn load_or_default(path: Option<&Path>) -> (Self, Option<Error>) {
        match path {
            None => (Self::default(), None),
            Some(path) => match Self::load(path) {
                Ok(config) => (config, None),
                Err(e) => (Self::default(), Some(e)),
            },
        }
    }

    pub fn max_level(&self) -> Result<LevelFilter> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| Error::config(format!("unknown log level: {}", self.log_level)))
    }
}

impl FromStr for BridgeConfig {
    type Err = toml::de::Error;
    fn from_str(s: &str) -> StdResult<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl fmt::Display for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        toml::to_string_pretty(self)
            .map_err(|_| fmt::Error)
            .and_then(|s| write!(f, "{}", s))
    }
}
