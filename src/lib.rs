use std::io::{Read, Write};
use std::path::{Path, PathBuf};

mod cmd;
mod dependencies;
mod error;
mod manifest;
mod operations;
mod paths;
mod run;
mod settings;
mod ui;

pub use crate::cmd::{Command, SubCommand};
pub use crate::dependencies::{
    pin, split_dependencies, strip_version, Dependency, InstalledVersions, Spec,
};
pub use crate::error::*;
pub use crate::manifest::Manifest;
pub use crate::operations::{rewrite_manifest, unversion, write_versions, RewriteMode};
pub use crate::paths::{env_vars_path, Hook, ENV_VARS_FILENAME};
pub use crate::run::{CondaRunner, VersionsQuery};
pub use crate::settings::Settings;
pub use crate::ui::print_error;

use crate::paths::PrefixResolver;

struct Context {
    settings: Settings,
    prefixes: PrefixResolver,
}

impl Context {
    fn new(settings: Settings) -> Self {
        let prefixes = PrefixResolver::new(&settings);
        Context { settings, prefixes }
    }
}

pub fn run(cmd: Command, settings: Settings) -> Result<(), Error> {
    let mut settings = settings;
    if let Some(conda_exe) = cmd.conda_exe {
        settings.conda_exe = Some(conda_exe);
    }
    let context = Context::new(settings);

    match cmd.sub_cmd {
        SubCommand::CopyVars {
            src_env,
            dest_env,
            local_dir,
        } => copy_vars(&context, &src_env, &dest_env, local_dir),
        SubCommand::ExportVars {
            src_env,
            output_dir,
        } => export_vars(&context, &src_env, output_dir),
        SubCommand::UnsetVars { src_env } => unset_vars(&context, &src_env),
        SubCommand::Ver { strip, infile } => {
            let mode = if strip {
                RewriteMode::Strip
            } else {
                RewriteMode::Pin
            };
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            ver(
                &context,
                mode,
                infile.as_ref().map(PathBuf::as_path),
                &mut stdin.lock(),
                &mut stdout.lock(),
            )
        }
    }
}

fn copy_vars(
    context: &Context,
    src_env: &Option<String>,
    dest_env: &str,
    local_dir: Option<PathBuf>,
) -> Result<(), Error> {
    let Context { prefixes, .. } = context;
    let src_prefix = match local_dir {
        Some(local_dir) => {
            if !local_dir.exists() {
                return Err(new_error(format!(
                    "File {} does not exist",
                    local_dir.display()
                )));
            }
            local_dir
        }
        None => prefixes.named_or_current(src_env)?,
    };
    let dest_prefix = prefixes.named(dest_env)?;
    operations::env_vars::copy_between(&src_prefix, &dest_prefix)
}

fn export_vars(
    context: &Context,
    src_env: &Option<String>,
    output_dir: Option<PathBuf>,
) -> Result<(), Error> {
    let Context { prefixes, .. } = context;
    let src_prefix = prefixes.named_or_current(src_env)?;
    let output_dir = match output_dir {
        Some(p) => p,
        None => std::env::current_dir().map_err(|e| Error::NoWorkingDirectory { io_error: e })?,
    };
    operations::env_vars::ensure_output_dir(&output_dir)?;
    operations::env_vars::export(&src_prefix, &output_dir)
}

fn unset_vars(context: &Context, src_env: &Option<String>) -> Result<(), Error> {
    let Context { prefixes, .. } = context;
    let src_prefix = prefixes.named_or_current(src_env)?;
    let script = operations::env_vars::unset_vars_for(&src_prefix)?;
    print!("{}", script);
    Ok(())
}

/// Pin or strip the dependencies of a manifest and print the result.
//
// Note: nothing but the manifest is printed on stdout, so that the output
// can be redirected to a file.
fn ver(
    context: &Context,
    mode: RewriteMode,
    infile: Option<&Path>,
    stdin: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let text = read_manifest(infile, stdin)?;
    let rewritten = match mode {
        RewriteMode::Strip => rewrite_manifest(&text, mode, &NoQuery)?,
        RewriteMode::Pin => {
            let runner = CondaRunner::new(&context.settings)?;
            rewrite_manifest(&text, mode, &runner)?
        }
    };
    out.write_all(rewritten.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| new_write_error(e, Path::new("<stdout>")))
}

/// Stripping versions never needs to know what is installed
struct NoQuery;

impl VersionsQuery for NoQuery {
    fn installed_versions(&self, env_name: &str) -> Result<InstalledVersions, Error> {
        Err(new_error(format!(
            "installed versions of {} are not available",
            env_name
        )))
    }
}

fn read_manifest(infile: Option<&Path>, stdin: &mut dyn Read) -> Result<String, Error> {
    match infile {
        Some(path) => {
            if !path.exists() {
                return Err(new_error(format!("File {} does not exist", path.display())));
            }
            std::fs::read_to_string(path).map_err(|e| new_read_error(e, path))
        }
        None => {
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .map_err(|e| new_read_error(e, Path::new("<stdin>")))?;
            Ok(text)
        }
    }
}
