use crate::launcher::LaunchMode;
use std::env;
use std::ffi::{OsStr, OsString};

/// Environment variable consulted by [`Config::from_env`].
pub const DEBUG_ENV_VAR: &str = "DEBUGGING";

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub(crate) debug: bool,
    pub(crate) launch_mode: LaunchMode,
    pub(crate) search_path: Option<OsString>,
}

impl Config {
    /// Defaults, with `debug` switched on when `DEBUGGING` is set to `true`
    /// (any case).
    pub fn from_env() -> Self {
        let debug = env::var(DEBUG_ENV_VAR)
            .map(|value| value.to_lowercase() == "true")
            .unwrap_or(false);
        Self::default().debug(debug)
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    pub fn launch_mode(mut self, mode: LaunchMode) -> Self {
        self.launch_mode = mode;
        self
    }

    /// Search these directories instead of `PATH` when resolving binaries.
    /// Uses the platform path-list syntax, e.g. `/opt/bin:/usr/bin`.
    pub fn search_path<P>(mut self, paths: P) -> Self
    where
        P: Into<OsString>,
    {
        self.search_path = Some(paths.into());
        self
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn mode(&self) -> LaunchMode {
        self.launch_mode
    }

    pub(crate) fn search_paths(&self) -> Option<&OsStr> {
        self.search_path.as_deref()
    }
}
