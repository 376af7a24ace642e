use serde_yaml::{Mapping, Value};

use crate::dependencies::Dependency;
use crate::error::*;

const NAME_KEY: &str = "name";
const DEPENDENCIES_KEY: &str = "dependencies";

/// A conda environment file (`environment.yml`, or the output of
/// `conda env export`).
///
/// Only `name` and `dependencies` are interpreted; every other key is kept
/// as is, in its original position.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    document: Mapping,
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self, Error> {
        let value: Value = serde_yaml::from_str(text).map_err(new_manifest_error)?;
        match value {
            Value::Mapping(document) => Ok(Manifest { document }),
            Value::Null => Ok(Manifest {
                document: Mapping::new(),
            }),
            _ => Err(new_manifest_error("expecting a mapping at the top level")),
        }
    }

    pub fn dump(&self) -> Result<String, Error> {
        serde_yaml::to_string(&self.document).map_err(new_manifest_error)
    }

    pub fn name(&self) -> Result<&str, Error> {
        let name = self
            .document
            .get(NAME_KEY)
            .ok_or_else(|| new_manifest_error("no `name` key"))?;
        name.as_str()
            .ok_or_else(|| new_manifest_error("`name` is not a string"))
    }

    pub fn has_dependencies(&self) -> bool {
        self.document.contains_key(DEPENDENCIES_KEY)
    }

    pub fn dependencies(&self) -> Result<Vec<Dependency>, Error> {
        let value = self
            .document
            .get(DEPENDENCIES_KEY)
            .ok_or_else(|| new_manifest_error("no `dependencies` key"))?;
        if value.is_null() {
            return Ok(vec![]);
        }
        serde_yaml::from_value(value.clone())
            .map_err(|e| new_manifest_error(format!("in `dependencies`: {}", e)))
    }

    /// Replace the `dependencies` list. The key keeps its position
    /// in the document.
    pub fn set_dependencies(&mut self, dependencies: Vec<Dependency>) -> Result<(), Error> {
        let value = serde_yaml::to_value(dependencies).map_err(new_manifest_error)?;
        self.document.insert(Value::from(DEPENDENCIES_KEY), value);
        Ok(())
    }
}
