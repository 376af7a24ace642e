use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;

/// Everything we need from the process environment, captured once.
//
// Commands never read `std::env` themselves: they get a Settings
// instance, which makes it possible to run them side by side in tests.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Value of $CONDA_PREFIX, if any
    pub conda_prefix: Option<PathBuf>,
    /// Explicit path to the conda binary ($CONDA_EXE or --conda)
    pub conda_exe: Option<PathBuf>,
    /// Environment used when spawning `conda`
    pub process_env: BTreeMap<OsString, OsString>,
}

impl Settings {
    pub fn from_env() -> Settings {
        let process_env: BTreeMap<_, _> = std::env::vars_os().collect();
        let non_empty = |key: &str| {
            process_env
                .get(&OsString::from(key))
                .filter(|x| !x.is_empty())
                .map(PathBuf::from)
        };
        Settings {
            conda_prefix: non_empty("CONDA_PREFIX"),
            conda_exe: non_empty("CONDA_EXE"),
            process_env,
        }
    }
}
