use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::dependencies::InstalledVersions;
use crate::error::*;
use crate::settings::Settings;

/// Something that knows which packages are installed in a named environment
pub trait VersionsQuery {
    fn installed_versions(&self, env_name: &str) -> Result<InstalledVersions, Error>;
}

/// Run `conda` sub-commands with an explicit environment
pub struct CondaRunner {
    conda_exe: PathBuf,
    process_env: BTreeMap<OsString, OsString>,
}

impl CondaRunner {
    pub fn new(settings: &Settings) -> Result<Self, Error> {
        let conda_exe = match &settings.conda_exe {
            Some(path) => path.to_path_buf(),
            None => which::which("conda").map_err(|_| Error::CondaNotFound {})?,
        };
        Ok(CondaRunner {
            conda_exe,
            process_env: settings.process_env.clone(),
        })
    }

    pub fn get_output<T: AsRef<str>>(&self, args: &[T]) -> Result<String, Error> {
        get_output(&self.conda_exe, args, &self.process_env)
    }
}

impl VersionsQuery for CondaRunner {
    fn installed_versions(&self, env_name: &str) -> Result<InstalledVersions, Error> {
        let output = self.get_output(&["list", "-n", env_name])?;
        InstalledVersions::from_conda_list(&output)
    }
}

fn get_output<T: AsRef<str>>(
    binary_path: &Path,
    args: &[T],
    process_env: &BTreeMap<OsString, OsString>,
) -> Result<String, Error> {
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    let cmd_str = format!("{} {}", binary_path.display(), args.join(" "));
    let command = std::process::Command::new(binary_path)
        .args(&args)
        .env_clear()
        .envs(process_env)
        .output();

    let command = command.map_err(|e| Error::GetProcessOutputError { io_error: e })?;
    if !command.status.success() {
        let mut output = String::from_utf8_lossy(&command.stderr).into_owned();
        if output.trim().is_empty() {
            output = String::from_utf8_lossy(&command.stdout).into_owned();
        }
        return Err(Error::CommandFailed {
            cmd: cmd_str,
            output,
        });
    }
    let stdout = String::from_utf8_lossy(&command.stdout);
    Ok(stdout.trim().to_string())
}
