//! Comparison settings loaded from TOML.
//!
//! ```toml
//! project_name = "acme-widgets"
//! old_label = "1.4.0"
//! new_label = "2.0.0"
//! strategy = "incompatible"
//! log_profile = "production"
//! ```
//!
//! Every key is optional; command-line flags override file values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{JarDiffError, Result};
use crate::logging_facility::Profile;
use crate::strategy::StrategyKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    /// Name shown at the root of the report
    pub project_name: String,
    pub old_label: String,
    pub new_label: String,
    pub strategy: StrategyKind,
    pub log_profile: Profile,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            project_name: "project".to_string(),
            old_label: "old".to_string(),
            new_label: "new".to_string(),
            strategy: StrategyKind::default(),
            log_profile: Profile::default(),
        }
    }
}

impl DiffConfig {
    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// - `InvalidConfig`: not valid TOML, an unknown key, or an unknown
    ///   strategy/profile name
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// - `Io`: the file cannot be read
    /// - `InvalidConfig`: see [`DiffConfig::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| JarDiffError::io(path, e))?;
        Self::from_toml_str(&text)
    }
}
