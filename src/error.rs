use std::path::{Path, PathBuf};

/// Every variant matches a type of error we
/// want the end-user to see.
// Note: errors from external crates (io, serde_yaml, which)
// are wrapped here so that we have full control over the
// messages printed to the user.
#[derive(Debug)]
pub enum Error {
    ReadError {
        path: PathBuf,
        io_error: std::io::Error,
    },
    WriteError {
        path: PathBuf,
        io_error: std::io::Error,
    },

    NoWorkingDirectory {
        io_error: std::io::Error,
    },

    NoActiveEnv {},
    BaseEnvActive {
        prefix: PathBuf,
    },
    NoSuchEnv {
        name: String,
        path: PathBuf,
    },

    MissingEnvVars {
        path: PathBuf,
    },
    FileExists {
        path: PathBuf,
    },
    NotADirectory {
        path: PathBuf,
    },

    CondaNotFound {},
    GetProcessOutputError {
        io_error: std::io::Error,
    },
    CommandFailed {
        cmd: String,
        output: String,
    },
    ParseCondaListError {
        line: String,
    },

    MalformedManifest {
        details: String,
    },

    Other {
        message: String,
    },
}

pub fn new_error(message: String) -> Error {
    Error::Other { message }
}

pub fn new_read_error(error: std::io::Error, path: &Path) -> Error {
    Error::ReadError {
        path: path.to_path_buf(),
        io_error: error,
    }
}

pub fn new_write_error(error: std::io::Error, path: &Path) -> Error {
    Error::WriteError {
        path: path.to_path_buf(),
        io_error: error,
    }
}

pub fn new_manifest_error(details: impl std::fmt::Display) -> Error {
    Error::MalformedManifest {
        details: details.to_string(),
    }
}

// Note: this is a not-so-bad way to make sure every error message is consistent
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let message = match self {
            Error::Other { message } => message.to_string(),

            Error::ReadError { path, io_error } => {
                format!("could not read {}: {}", path.display(), io_error)
            }
            Error::WriteError { path, io_error } => {
                format!("could not write {}: {}", path.display(), io_error)
            }

            Error::NoWorkingDirectory { io_error } => {
                format!("could not get current working directory: {}", io_error)
            }

            Error::NoActiveEnv {} => {
                "$CONDA_PREFIX not found. Activate a conda env before running".to_string()
            }
            Error::BaseEnvActive { prefix } => format!(
                "base conda env detected ({}).\nActivate an environment before running this command",
                prefix.display()
            ),
            Error::NoSuchEnv { name, path } => {
                format!("conda env {} does not exist (looked in {})", name, path.display())
            }

            Error::MissingEnvVars { path } => {
                format!("source env vars file does not exist: {}", path.display())
            }
            Error::FileExists { path } => format!("{} already exists", path.display()),
            Error::NotADirectory { path } => {
                format!("{} is a file, expected a directory", path.display())
            }

            Error::CondaNotFound {} => {
                "could not find `conda`. Set $CONDA_EXE or use --conda".to_string()
            }
            Error::GetProcessOutputError { io_error } => {
                format!("could not get process output: {}", io_error)
            }
            Error::CommandFailed { cmd, output } => {
                let mut message = format!("`{}` failed", cmd);
                if !output.trim().is_empty() {
                    message.push_str(&format!(":\n{}", output.trim_end()));
                }
                message
            }
            Error::ParseCondaListError { line } => {
                format!("could not parse `conda list` output at line: '{}'", line)
            }

            Error::MalformedManifest { details } => format!("Malformed manifest: {}", details),
        };
        write!(f, "{}", message)
    }
}
