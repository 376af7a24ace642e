//! Home for types that represent dependencies of a conda environment.
//!
//! * Dependencies are read from the `dependencies` list of an
//!   environment manifest and are either a spec string (`numpy>=1.15`)
//!   or the pip sub-list (`- pip: [flask==1.0]`)
//! * Installed versions come from `conda list -n <env>` output
//!
//! Dependencies can either be *pinned* to the installed version
//! (`numpy=1.16.2`), or *stripped* of any version constraint (`numpy`).

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

const COMPARISON_CHARS: [char; 3] = ['=', '<', '>'];

/// Version placeholder used when a package is not installed
pub const UNKNOWN_VERSION: &str = "?";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    Spec(String),
    Pip {
        #[serde(deserialize_with = "null_as_empty")]
        pip: Vec<String>,
    },
}

// `- pip:` with nothing below it
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let specs: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(specs.unwrap_or_default())
}

impl Dependency {
    pub fn spec(spec: &str) -> Self {
        Dependency::Spec(spec.to_string())
    }

    pub fn pip<T: AsRef<str>>(specs: &[T]) -> Self {
        Dependency::Pip {
            pip: specs.iter().map(|x| x.as_ref().to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A dependency spec split into its parts.
//
// Only `name` is used when pinning. The other fields are best-effort:
// specs are not validated, and a spec such as `foo[a, b]` or `=1.0`
// gives whatever the separator splitting produces.
pub struct Spec {
    pub name: String,
    pub extras: Option<String>,
    pub operator: Option<String>,
    pub version: Option<String>,
}

impl Spec {
    pub fn parse(raw: &str) -> Self {
        let name = parse_name(raw);
        let op_start = raw.find(&COMPARISON_CHARS[..]);
        let extras = raw.find('[').and_then(|start| {
            let end = raw[start..].find(']')? + start;
            match op_start {
                Some(op) if op < end => None,
                _ => Some(raw[start + 1..end].to_string()),
            }
        });
        let (operator, version) = match op_start {
            None => (None, None),
            Some(start) => {
                let rest = &raw[start..];
                let op_len = rest
                    .find(|c: char| !COMPARISON_CHARS.contains(&c))
                    .unwrap_or_else(|| rest.len());
                let version = rest[op_len..].trim();
                let version = if version.is_empty() {
                    None
                } else {
                    Some(version.to_string())
                };
                (Some(rest[..op_len].to_string()), version)
            }
        };
        Spec {
            name,
            extras,
            operator,
            version,
        }
    }
}

fn parse_name(raw: &str) -> String {
    if let Some(bracket) = raw.find('[') {
        return raw[..bracket].to_string();
    }
    if raw.contains(&COMPARISON_CHARS[..]) {
        return first_word_after_separators(raw);
    }
    raw.to_string()
}

fn first_word_after_separators(raw: &str) -> String {
    let replaced = raw.replace(&COMPARISON_CHARS[..], " ");
    replaced
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Remove the version constraint from a spec, keeping the name and
/// the extras: `foo[bar]>=1.0` becomes `foo[bar]`
pub fn strip_version(raw: &str) -> String {
    if raw.contains(&COMPARISON_CHARS[..]) {
        first_word_after_separators(raw)
    } else {
        raw.to_string()
    }
}

/// Replace the version constraint of a spec with the installed version.
/// Pip specs use `==`, conda specs use `=`.
pub fn pin(installed: &InstalledVersions, raw: &str, pip: bool) -> String {
    let separator = if pip { "==" } else { "=" };
    let stripped = strip_version(raw);
    let name = Spec::parse(&stripped).name;
    let version = installed.get(&name).unwrap_or(UNKNOWN_VERSION);
    format!("{}{}{}", stripped, separator, version)
}

/// Take the first pip sub-list out of `dependencies`.
///
/// Returns the other dependencies, in their original order, and the
/// pip specs if a pip sub-list was found. Only the first one is taken out,
/// any other pip sub-list stays where it is.
pub fn split_dependencies(
    dependencies: Vec<Dependency>,
) -> (Vec<Dependency>, Option<Vec<String>>) {
    let mut pip = None;
    let mut others = Vec::with_capacity(dependencies.len());
    for dependency in dependencies {
        match dependency {
            Dependency::Pip { pip: specs } if pip.is_none() => pip = Some(specs),
            other => others.push(other),
        }
    }
    (others, pip)
}

/// Name -> version of every package installed in an environment
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InstalledVersions {
    versions: BTreeMap<String, String>,
}

impl InstalledVersions {
    /// Parse `conda list` output. Each non-comment line is
    /// `<name> <version> <build> [<channel>]`.
    pub fn from_conda_list(output: &str) -> Result<Self, Error> {
        let mut versions = BTreeMap::new();
        for line in output.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut words = line.split_whitespace();
            match (words.next(), words.next()) {
                (Some(name), Some(version)) => {
                    versions.insert(name.to_string(), version.to_string());
                }
                _ => {
                    return Err(Error::ParseCondaListError {
                        line: line.to_string(),
                    })
                }
            }
        }
        Ok(InstalledVersions { versions })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.versions.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> std::iter::FromIterator<(K, V)> for InstalledVersions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        InstalledVersions {
            versions: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installed(pairs: &[(&str, &str)]) -> InstalledVersions {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn test_strip_version_bare() {
        for spec in &["numpy", "python-dateutil", "r-base", "foo.bar"] {
            assert_eq!(strip_version(spec), *spec);
        }
    }

    #[test]
    fn test_strip_version_with_operator() {
        assert_eq!(strip_version("numpy=1.16"), "numpy");
        assert_eq!(strip_version("numpy==1.16"), "numpy");
        assert_eq!(strip_version("numpy>=1.16"), "numpy");
        assert_eq!(strip_version("numpy<2"), "numpy");
        assert_eq!(strip_version("numpy>1.0,<2.0"), "numpy");
        assert_eq!(strip_version("numpy = 1.16"), "numpy");
        assert_eq!(strip_version("numpy=1.16.2=py37_0"), "numpy");
    }

    #[test]
    fn test_strip_version_keeps_extras() {
        assert_eq!(strip_version("requests[security,socks]"), "requests[security,socks]");
        assert_eq!(strip_version("requests[security]>=2.0"), "requests[security]");
    }

    #[test]
    fn test_parse_spec() {
        let spec = Spec::parse("requests[security]>=2.0");
        assert_eq!(spec.name, "requests");
        assert_eq!(spec.extras, Some("security".to_string()));
        assert_eq!(spec.operator, Some(">=".to_string()));
        assert_eq!(spec.version, Some("2.0".to_string()));

        let spec = Spec::parse("numpy = 1.16");
        assert_eq!(spec.name, "numpy");
        assert_eq!(spec.extras, None);
        assert_eq!(spec.operator, Some("=".to_string()));
        assert_eq!(spec.version, Some("1.16".to_string()));

        let spec = Spec::parse("pytest");
        assert_eq!(spec.name, "pytest");
        assert_eq!(spec.operator, None);
        assert_eq!(spec.version, None);
    }

    #[test]
    fn test_pin_replaces_version() {
        let installed = installed(&[("foo", "2.0.0")]);
        assert_eq!(pin(&installed, "foo=1.2.3", false), "foo=2.0.0");
        assert_eq!(pin(&installed, "foo>=1.2", true), "foo==2.0.0");
    }

    #[test]
    fn test_pin_unknown_version() {
        let installed = InstalledVersions::default();
        assert_eq!(pin(&installed, "foo", true), "foo==?");
        assert_eq!(pin(&installed, "foo=1.0", false), "foo=?");
    }

    #[test]
    fn test_pin_keeps_extras() {
        let installed = installed(&[("bar", "1.0")]);
        assert_eq!(pin(&installed, "bar[extra]", false), "bar[extra]=1.0");
        assert_eq!(pin(&installed, "bar[extra]==0.1", true), "bar[extra]==1.0");
    }

    #[test]
    fn test_split_dependencies() {
        let deps = vec![
            Dependency::pip(&["a", "b"]),
            Dependency::spec("x"),
            Dependency::spec("y"),
        ];
        let (others, pip) = split_dependencies(deps);
        assert_eq!(others, vec![Dependency::spec("x"), Dependency::spec("y")]);
        assert_eq!(pip, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_split_dependencies_without_pip() {
        let deps = vec![Dependency::spec("x")];
        let (others, pip) = split_dependencies(deps);
        assert_eq!(others, vec![Dependency::spec("x")]);
        assert_eq!(pip, None);
    }

    #[test]
    fn test_split_dependencies_takes_first_pip_only() {
        let deps = vec![
            Dependency::spec("x"),
            Dependency::pip(&["a"]),
            Dependency::pip(&["b"]),
        ];
        let (others, pip) = split_dependencies(deps);
        assert_eq!(others, vec![Dependency::spec("x"), Dependency::pip(&["b"])]);
        assert_eq!(pip, Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_parse_conda_list() {
        let output = "\
# packages in environment at /opt/miniconda3/envs/foo:
#
# Name                    Version                   Build  Channel
numpy                     1.16.2           py37h7e9f1db_0
flask                     1.0.2                    py37_1    conda-forge

";
        let installed = InstalledVersions::from_conda_list(output).unwrap();
        assert_eq!(installed.len(), 2);
        assert_eq!(installed.get("numpy"), Some("1.16.2"));
        assert_eq!(installed.get("flask"), Some("1.0.2"));
        assert_eq!(installed.get("Name"), None);
    }

    #[test]
    fn test_parse_conda_list_broken_line() {
        let actual = InstalledVersions::from_conda_list("numpy 1.16.2\nbroken\n");
        match actual {
            Err(Error::ParseCondaListError { line }) => assert_eq!(line, "broken"),
            other => panic!("Expecting ParseCondaListError, got: {:?}", other),
        }
    }
}
