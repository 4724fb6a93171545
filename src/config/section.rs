//! `[publish]` section of cachet.toml.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ConfigError;

/// Settings for the publish pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishSectionConfig {
    /// Environment root directory containing the compiled bundle
    pub env: PathBuf,

    /// Template source directory
    pub template: PathBuf,

    /// Bundle file path, relative to the environment root
    pub bundle: PathBuf,

    /// Entry-point filename inside the template directory
    pub entry_point: String,

    /// Output directory name under the environment root
    pub output: String,
}

impl Default for PublishSectionConfig {
    fn default() -> Self {
        Self {
            env: PathBuf::from("dist"),
            template: PathBuf::from("root-template"),
            bundle: PathBuf::from("bundle.js"),
            entry_point: "index.html".to_string(),
            output: "www-root".to_string(),
        }
    }
}

impl PublishSectionConfig {
    /// Validate field values that would otherwise corrupt the output layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_file_name("publish.entry_point", &self.entry_point)?;
        validate_file_name("publish.output", &self.output)?;
        if self.bundle.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "publish.bundle must not be empty".to_string(),
            ));
        }
        if self.env.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "publish.env must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reject empty names and names with path separators or parent components.
fn validate_file_name(field: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(format!("{field} must not be empty")));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ConfigError::Validation(format!(
            "{field} must be a plain file name, got `{name}`"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let section = PublishSectionConfig::default();
        assert_eq!(section.env, PathBuf::from("dist"));
        assert_eq!(section.template, PathBuf::from("root-template"));
        assert_eq!(section.bundle, PathBuf::from("bundle.js"));
        assert_eq!(section.entry_point, "index.html");
        assert_eq!(section.output, "www-root");
        assert!(section.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_separators() {
        let mut section = PublishSectionConfig::default();
        section.entry_point = "pages/index.html".to_string();
        assert!(section.validate().is_err());

        let mut section = PublishSectionConfig::default();
        section.output = "..".to_string();
        assert!(section.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty() {
        let mut section = PublishSectionConfig::default();
        section.entry_point = String::new();
        assert!(section.validate().is_err());

        let mut section = PublishSectionConfig::default();
        section.bundle = PathBuf::new();
        assert!(section.validate().is_err());
    }
}
