//! Session configuration
//!
//! Configuration can be built in code or loaded from YAML or JSON:
//!
//! ```yaml
//! profile:
//!   name: lex-full
//!   optional_features: [GG01, GG02]
//!   lex_compatibility: full
//! language_level: lex
//! catalog_root: "file:./catalog"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Language a session accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageLevel {
    /// Plain GQL
    Gql,
    /// GQL with the LEX extensions (key and cardinality constraints)
    Lex,
}

/// How much of LEX a profile supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LexCompatibility {
    #[default]
    Full,
    /// Key constraints only
    Limited,
    None,
}

/// A GQL/LEX profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfiguration {
    pub name: String,
    #[serde(default)]
    pub optional_features: BTreeSet<String>,
    /// Implementation-defined settings, keyed by name
    #[serde(default)]
    pub implementation_defined: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub lex_compatibility: LexCompatibility,
}

impl ProfileConfiguration {
    pub fn new(name: impl Into<String>, lex_compatibility: LexCompatibility) -> Self {
        Self {
            name: name.into(),
            optional_features: BTreeSet::new(),
            implementation_defined: BTreeMap::new(),
            lex_compatibility,
        }
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.optional_features.insert(feature.into());
        self
    }

    pub fn supports(&self, feature: &str) -> bool {
        self.optional_features.contains(feature)
    }
}

impl Default for ProfileConfiguration {
    fn default() -> Self {
        Self::new("default", LexCompatibility::Full)
    }
}

/// Session-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfiguration {
    pub profile: ProfileConfiguration,
    pub language_level: LanguageLevel,
    /// IRI of the catalog base location
    #[serde(default = "default_catalog_root")]
    pub catalog_root: String,
    /// Initial working directory, relative to the catalog root
    #[serde(default = "default_catalog_path")]
    pub default_catalog_path: Option<String>,
    #[serde(default = "default_processor_type")]
    pub nested_record_schema_processor_type: String,
    #[serde(default = "default_processor")]
    pub nested_record_schema_processor: Option<String>,
}

fn default_catalog_root() -> String {
    "file:.".to_string()
}

fn default_catalog_path() -> Option<String> {
    Some("/".to_string())
}

fn default_processor_type() -> String {
    "JSON Schema".to_string()
}

fn default_processor() -> Option<String> {
    Some("default".to_string())
}

impl SessionConfiguration {
    pub fn new(profile: ProfileConfiguration, language_level: LanguageLevel) -> Self {
        Self {
            profile,
            language_level,
            catalog_root: default_catalog_root(),
            default_catalog_path: default_catalog_path(),
            nested_record_schema_processor_type: default_processor_type(),
            nested_record_schema_processor: default_processor(),
        }
    }

    pub fn with_catalog_root(mut self, catalog_root: impl Into<String>) -> Self {
        self.catalog_root = catalog_root.into();
        self
    }

    pub fn from_yaml_str(s: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a `.yaml`/`.yml` file, or JSON for any other extension
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            _ => Self::from_json_str(&contents),
        }
    }

    /// LEX constructs are accepted
    pub fn lex_enabled(&self) -> bool {
        self.language_level == LanguageLevel::Lex && self.profile.lex_compatibility != LexCompatibility::None
    }
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self::new(ProfileConfiguration::default(), LanguageLevel::Lex)
    }
}
