use std::path::{Path, PathBuf};

use crate::error::*;
use crate::paths::{env_vars_path, env_vars_paths, Hook};
use crate::ui::*;

/// Copy the env vars files of `src_prefix` into `output_dir`, under a
/// sub-directory named after the environment:
/// `<output_dir>/<env name>/etc/conda/activate.d/env_vars.sh`
///
/// Missing source files are skipped with a warning. Existing files in
/// the output directory are never overwritten, and nothing is written
/// unless every target is free.
pub fn export(src_prefix: &Path, output_dir: &Path) -> Result<(), Error> {
    let env_name = src_prefix.file_name().ok_or_else(|| {
        new_error(format!("conda prefix {} has no file name", src_prefix.display()))
    })?;
    let export_prefix = output_dir.join(env_name);
    let mut pairs = vec![];
    for hook in Hook::ALL.iter() {
        let src_path = env_vars_path(src_prefix, *hook);
        if !src_path.exists() {
            print_warning(&format!(
                "No env var file exists for {}",
                src_path.display()
            ));
            continue;
        }
        let dest_path = env_vars_path(&export_prefix, *hook);
        ensure_path_does_not_exist(&dest_path)?;
        pairs.push((src_path, dest_path));
    }
    print_info_1(&format!(
        "Exporting env vars from {} to {}",
        src_prefix.display(),
        export_prefix.display()
    ));
    for (src_path, dest_path) in &pairs {
        copy(src_path, dest_path)?;
    }
    Ok(())
}

/// Copy the env vars files from one prefix to another.
///
/// `src_prefix` is either an environment prefix or a directory created
/// by `export()`. Both files must exist in the source, and neither may
/// exist in the destination. This is checked before anything is written.
pub fn copy_between(src_prefix: &Path, dest_prefix: &Path) -> Result<(), Error> {
    let pairs: Vec<(PathBuf, PathBuf)> = env_vars_paths(src_prefix)
        .iter()
        .cloned()
        .zip(env_vars_paths(dest_prefix).iter().cloned())
        .collect();
    for (src_path, dest_path) in &pairs {
        if !src_path.exists() {
            return Err(Error::MissingEnvVars {
                path: src_path.to_path_buf(),
            });
        }
        ensure_path_does_not_exist(dest_path)?;
    }
    print_info_1(&format!(
        "Copying env vars from {} to {}",
        src_prefix.display(),
        dest_prefix.display()
    ));
    for (src_path, dest_path) in &pairs {
        copy(src_path, dest_path)?;
    }
    Ok(())
}

/// Generate a deactivate script from an activate script:
/// `export FOO=bar` becomes `unset FOO`, other lines are kept
pub fn unset_vars(activate_script: &str) -> String {
    let lines: Vec<String> = activate_script
        .split('\n')
        .map(|line| {
            if !line.starts_with("export") {
                return line.to_string();
            }
            match line.split_whitespace().nth(1) {
                Some(assignment) => {
                    let var = assignment.split('=').next().unwrap_or_default();
                    format!("unset {}", var)
                }
                None => line.to_string(),
            }
        })
        .collect();
    lines.join("\n")
}

/// Read the activate script of `prefix` and return the matching
/// deactivate script
pub fn unset_vars_for(prefix: &Path) -> Result<String, Error> {
    let activate_path = env_vars_path(prefix, Hook::Activate);
    if !activate_path.exists() {
        return Err(Error::MissingEnvVars {
            path: activate_path,
        });
    }
    let contents = std::fs::read_to_string(&activate_path)
        .map_err(|e| new_read_error(e, &activate_path))?;
    Ok(unset_vars(&contents))
}

/// Make sure `path` can be used as an output directory, creating it
/// if needed
pub fn ensure_output_dir(path: &Path) -> Result<(), Error> {
    if path.is_file() {
        return Err(Error::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    std::fs::create_dir_all(path).map_err(|e| new_write_error(e, path))
}

fn ensure_path_does_not_exist(path: &Path) -> Result<(), Error> {
    if path.exists() {
        return Err(Error::FileExists {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn copy(src_path: &Path, dest_path: &Path) -> Result<(), Error> {
    if let Some(parent) = dest_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| new_write_error(e, parent))?;
    }
    let contents =
        std::fs::read_to_string(src_path).map_err(|e| new_read_error(e, src_path))?;
    std::fs::write(dest_path, contents).map_err(|e| new_write_error(e, dest_path))?;
    print_copied(src_path, dest_path);
    Ok(())
}
