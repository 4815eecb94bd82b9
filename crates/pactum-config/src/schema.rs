//! Configuration types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Which routes the document includes, based on ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InclusionMode {
    /// Exclude routes owned by another engine. Un-owned routes are included.
    #[default]
    Normal,
    /// Include every route.
    Greedy,
    /// Include only routes owned by this engine.
    Strict,
}

impl InclusionMode {
    /// Parses a mode name, ignoring case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "greedy" => Some(Self::Greedy),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }
}

impl fmt::Display for InclusionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Greedy => "greedy",
            Self::Strict => "strict",
        })
    }
}

/// Metadata for one document tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagConfig {
    /// Tag name as used by bindings.
    pub name: String,
    /// Tag description shown in the document.
    #[serde(default)]
    pub description: Option<String>,
}

/// Contract engine configuration.
///
/// # Example
///
/// ```
/// use pactum_config::{ContractConfig, InclusionMode};
///
/// let config = ContractConfig::default();
/// assert_eq!(config.mode, InclusionMode::Normal);
/// assert_eq!(config.validation_error_code, 422);
/// assert_eq!(config.spec_url(), "/apidoc/openapi.json");
/// assert_eq!(config.page_url("swagger"), "/apidoc/swagger");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractConfig {
    /// Route inclusion mode.
    #[serde(default)]
    pub mode: InclusionMode,

    /// Status code of request validation error responses.
    #[serde(default = "default_validation_error_code")]
    pub validation_error_code: u16,

    /// Largest request body, in bytes, decoded for validation. Applies to
    /// the raw body and again after gzip decompression.
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,

    /// Path prefix the document and viewer pages are served under.
    #[serde(default = "default_path")]
    pub path: String,

    /// File name of the JSON document.
    #[serde(default = "default_filename")]
    pub filename: String,

    /// OpenAPI version written into the document.
    #[serde(default = "default_openapi_version")]
    pub openapi_version: String,

    /// Document title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Document version.
    #[serde(default = "default_version")]
    pub version: String,

    /// Document description.
    #[serde(default)]
    pub description: Option<String>,

    /// Tag metadata.
    #[serde(default)]
    pub tags: Vec<TagConfig>,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            mode: InclusionMode::default(),
            validation_error_code: default_validation_error_code(),
            max_body_size: default_max_body_size(),
            path: default_path(),
            filename: default_filename(),
            openapi_version: default_openapi_version(),
            title: default_title(),
            version: default_version(),
            description: None,
            tags: Vec::new(),
        }
    }
}

impl ContractConfig {
    /// URL of the JSON document.
    #[must_use]
    pub fn spec_url(&self) -> String {
        format!("/{}/{}", self.path, self.filename)
    }

    /// URL of a viewer page.
    #[must_use]
    pub fn page_url(&self, page: &str) -> String {
        format!("/{}/{page}", self.path)
    }

    /// Description configured for a tag, if any.
    #[must_use]
    pub fn tag_description(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.name == name)
            .and_then(|tag| tag.description.as_deref())
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the validation error code is outside 400..=599,
    /// the body size limit is zero, or the path or filename is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(400..=599).contains(&self.validation_error_code) {
            return Err(ConfigError::invalid_value(
                "validation_error_code",
                format!("{} is not an error status (400..=599)", self.validation_error_code),
            ));
        }

        if self.max_body_size == 0 {
            return Err(ConfigError::invalid_value("max_body_size", "must be greater than zero"));
        }

        if self.path.trim_matches('/').is_empty() {
            return Err(ConfigError::invalid_value("path", "must not be empty"));
        }

        if self.filename.is_empty() {
            return Err(ConfigError::invalid_value("filename", "must not be empty"));
        }

        Ok(())
    }
}

const fn default_validation_error_code() -> u16 {
    422
}

const fn default_max_body_size() -> usize {
    1024 * 1024
}

fn default_path() -> String {
    "apidoc".to_string()
}

fn default_filename() -> String {
    "openapi.json".to_string()
}

fn default_openapi_version() -> String {
    "3.0.3".to_string()
}

fn default_title() -> String {
    "Service API Document".to_string()
}

fn default_version() -> String {
    "0.1".to_string()
}
