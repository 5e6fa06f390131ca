//! Generator configuration: which template to render and which functions to skip

use crate::error::{GenError, GenResult};
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Wrapper forwarding convention.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// Forward to a plain `CK_FUNCTION_LIST` without the receiver
    #[default]
    Base,
    /// Forward to the next `CK_X_FUNCTION_LIST`, passing it as receiver
    Stack,
}

/// One generation run's configuration.
///
/// Excluded functions get no wrapper body but keep their table slot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct GeneratorConfig {
    pub template: TemplateKind,
    pub exclude: BTreeSet<String>,
}

impl GeneratorConfig {
    pub fn new(template: TemplateKind) -> Self {
        Self {
            template,
            exclude: BTreeSet::new(),
        }
    }

    /// Builder-style helper to exclude more functions
    pub fn with_excluded<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    /// Parse a YAML configuration document
    pub fn from_yaml(content: &str) -> GenResult<Self> {
        Ok(serde_yml::from_str(content)?)
    }

    /// Load a YAML configuration file
    pub fn load(path: &Path) -> GenResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| GenError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }
}
