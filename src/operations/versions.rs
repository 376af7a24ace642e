use crate::dependencies::{self, Dependency};
use crate::error::*;
use crate::manifest::Manifest;
use crate::run::VersionsQuery;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RewriteMode {
    /// Pin every dependency to its installed version
    Pin,
    /// Remove every version constraint
    Strip,
}

/// Read a manifest, rewrite its dependencies and return the new document.
//
// Nothing is written anywhere until the whole rewrite succeeded.
pub fn rewrite_manifest(
    text: &str,
    mode: RewriteMode,
    query: &dyn VersionsQuery,
) -> Result<String, Error> {
    let manifest = Manifest::parse(text)?;
    let manifest = match mode {
        RewriteMode::Pin => write_versions(manifest, query)?,
        RewriteMode::Strip => unversion(manifest)?,
    };
    manifest.dump()
}

/// Pin every dependency to the version installed in the environment
/// named after the manifest. Manifests without dependencies are
/// returned as is, without running `conda`.
pub fn write_versions(manifest: Manifest, query: &dyn VersionsQuery) -> Result<Manifest, Error> {
    if !manifest.has_dependencies() {
        return Ok(manifest);
    }
    let installed = query.installed_versions(manifest.name()?)?;
    rewrite(manifest, |spec, pip| dependencies::pin(&installed, spec, pip))
}

/// Remove all version constraints
pub fn unversion(manifest: Manifest) -> Result<Manifest, Error> {
    rewrite(manifest, |spec, _| dependencies::strip_version(spec))
}

fn rewrite<F>(mut manifest: Manifest, rewrite_spec: F) -> Result<Manifest, Error>
where
    F: Fn(&str, bool) -> String,
{
    let (others, pip) = dependencies::split_dependencies(manifest.dependencies()?);
    let mut rewritten: Vec<_> = others
        .into_iter()
        .map(|dependency| match dependency {
            Dependency::Spec(spec) => Dependency::Spec(rewrite_spec(&spec, false)),
            // A second pip sub-list is left alone
            other => other,
        })
        .collect();
    // An empty pip sub-list is dropped
    if let Some(pip) = pip.filter(|specs| !specs.is_empty()) {
        let pip = pip.iter().map(|spec| rewrite_spec(spec, true)).collect();
        rewritten.push(Dependency::Pip { pip });
    }
    manifest.set_dependencies(rewritten)?;
    Ok(manifest)
}
