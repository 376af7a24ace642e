use std::path::{Path, PathBuf};

use crate::error::*;
use crate::settings::Settings;

#[cfg(windows)]
pub const ENV_VARS_FILENAME: &str = "env_vars.bat";
#[cfg(not(windows))]
pub const ENV_VARS_FILENAME: &str = "env_vars.sh";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Hook {
    Activate,
    Deactivate,
}

impl Hook {
    pub const ALL: [Hook; 2] = [Hook::Activate, Hook::Deactivate];

    fn subdir(self) -> &'static str {
        match self {
            Hook::Activate => "activate.d",
            Hook::Deactivate => "deactivate.d",
        }
    }
}

/// Path of the env vars script run by conda on (de)activation,
/// relative to `prefix`.
///
/// `prefix` is usually an environment prefix, but may also be
/// a directory produced by `export_vars`.
pub fn env_vars_path(prefix: &Path, hook: Hook) -> PathBuf {
    prefix
        .join("etc")
        .join("conda")
        .join(hook.subdir())
        .join(ENV_VARS_FILENAME)
}

/// Paths of the activate and deactivate scripts, in this order
pub fn env_vars_paths(prefix: &Path) -> [PathBuf; 2] {
    [
        env_vars_path(prefix, Hook::Activate),
        env_vars_path(prefix, Hook::Deactivate),
    ]
}

/// The base environment is the conda installation itself
/// (say /opt/miniconda3), named environments live in its `envs/`
/// subdirectory.
pub fn is_base_env(prefix: &Path) -> bool {
    let in_envs = prefix.components().any(|c| c.as_os_str() == "envs");
    let name = prefix
        .file_stem()
        .map(|x| x.to_string_lossy().into_owned())
        .unwrap_or_default();
    !in_envs && name.contains("conda")
}

/// Resolve conda environment prefixes relative to the active one
pub struct PrefixResolver {
    active_prefix: Option<PathBuf>,
}

impl PrefixResolver {
    pub fn new(settings: &Settings) -> Self {
        PrefixResolver {
            active_prefix: settings.conda_prefix.clone(),
        }
    }

    /// Prefix of the active environment
    pub fn current(&self, allow_base: bool) -> Result<PathBuf, Error> {
        let prefix = self
            .active_prefix
            .as_ref()
            .ok_or(Error::NoActiveEnv {})?;
        if !allow_base && is_base_env(prefix) {
            return Err(Error::BaseEnvActive {
                prefix: prefix.to_path_buf(),
            });
        }
        Ok(prefix.to_path_buf())
    }

    /// Prefix of the environment called `name`, which must exist
    pub fn named(&self, name: &str) -> Result<PathBuf, Error> {
        let path = self.envs_dir()?.join(name);
        if !path.exists() {
            return Err(Error::NoSuchEnv {
                name: name.to_string(),
                path,
            });
        }
        Ok(path)
    }

    /// Use the env called `name` if given, the active env otherwise
    pub fn named_or_current(&self, name: &Option<String>) -> Result<PathBuf, Error> {
        match name {
            Some(name) => self.named(name),
            None => self.current(false),
        }
    }

    fn envs_dir(&self) -> Result<PathBuf, Error> {
        let prefix = self.current(true)?;
        if is_base_env(&prefix) {
            return Ok(prefix.join("envs"));
        }
        let parent = prefix.parent().ok_or_else(|| {
            new_error(format!("conda prefix {} has no parent", prefix.display()))
        })?;
        Ok(parent.to_path_buf())
    }
}
