//! Publisher configuration management for `cachet.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                             |
//! |-------------|-----------------------------------------------------|
//! | `[publish]` | Publish paths (env, template, bundle, entry, output)|
//!
//! The config file is optional: every field has the default the publish
//! pipeline was originally written for (`dist/`, `root-template/`,
//! `bundle.js`, `index.html`, `www-root`). CLI arguments override config
//! values. The configuration is threaded explicitly into the pipeline,
//! never stored globally, so separate invocations can publish distinct
//! environment roots side by side.

mod error;
mod section;

pub use error::ConfigError;
pub use section::PublishSectionConfig;

use crate::cli::{Cli, Commands, PublishArgs};
use crate::utils::normalize_path;
use crate::{debug, logger};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing cachet.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Publish settings
    #[serde(default)]
    pub publish: PublishSectionConfig,
}

impl PublishConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file; the project root
    /// is the config file's parent directory (cwd when no file exists).
    pub fn load(cli: &Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        let mut config = if exists {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.config_path = config_path;
        config.finalize(cli);

        if !exists {
            debug!("config"; "no {} found, using defaults", cli.config.display());
        }

        config.publish.validate()?;

        Ok(config)
    }

    /// Resolve config file path by searching upward from cwd.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        match find_config_file(&cli.config) {
            Some(path) => Ok((path, true)),
            None => Ok((cwd.join(&cli.config), false)),
        }
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.root = normalize_path(&root);

        self.apply_command_options(cli);
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
            if !Self::prompt_continue()? {
                bail!("Aborted due to unknown config fields");
            }
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        // Show only filename (cachet.toml) since it's always at project root
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        crate::log!("warning"; "unknown fields in {}:", display_path);
        crate::log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Prompt user to continue. Returns true only if user explicitly confirms.
    fn prompt_continue() -> Result<bool> {
        use std::io::{self, Write};

        eprint!("Continue? [y/N] ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        // Default no (empty input), explicit "y" or "yes" to continue
        Ok(input == "y" || input == "yes")
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        if let Some(template) = &cli.template {
            self.publish.template = template.clone();
        }

        match &cli.command {
            Commands::Publish { publish_args } => self.apply_publish_args(publish_args),
        }
    }

    /// Apply publish arguments from CLI.
    fn apply_publish_args(&mut self, args: &PublishArgs) {
        if let Some(env) = &args.env {
            self.publish.env = env.clone();
        }
        if let Some(entry_point) = &args.entry_point {
            self.publish.entry_point = entry_point.clone();
        }
        logger::set_verbose(args.verbose);
    }

    // ========================================================================
    // path accessors
    // ========================================================================

    /// Join a path with the project root.
    ///
    /// Absolute paths pass through unchanged.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Environment root directory containing the compiled bundle.
    pub fn env_root(&self) -> PathBuf {
        self.root_join(&self.publish.env)
    }

    /// Template source directory.
    pub fn template_dir(&self) -> PathBuf {
        self.root_join(&self.publish.template)
    }

    /// Compiled bundle file path.
    pub fn bundle_path(&self) -> PathBuf {
        self.env_root().join(&self.publish.bundle)
    }

    /// Output root the publish writes into.
    pub fn output_root(&self) -> PathBuf {
        self.env_root().join(&self.publish.output)
    }

    /// Entry-point filename inside the template directory.
    pub fn entry_point(&self) -> &str {
        &self.publish.entry_point
    }
}

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;

    // First check if config_name is an absolute path
    if config_name.is_absolute() && config_name.exists() {
        return Some(config_name.to_path_buf());
    }

    // Walk up from cwd looking for config file
    let mut current = cwd.as_path();
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        // Move to parent directory
        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_defaults() {
        let config = PublishConfig::from_str("").unwrap();
        assert_eq!(config.publish.env, PathBuf::from("dist"));
        assert_eq!(config.publish.output, "www-root");
        assert_eq!(config.entry_point(), "index.html");
    }

    #[test]
    fn test_from_str_section() {
        let config = PublishConfig::from_str(
            r#"
            [publish]
            env = "build"
            template = "web"
            bundle = "app.js"
            entry_point = "main.html"
            output = "public"
            "#,
        )
        .unwrap();
        assert_eq!(config.publish.env, PathBuf::from("build"));
        assert_eq!(config.publish.template, PathBuf::from("web"));
        assert_eq!(config.publish.bundle, PathBuf::from("app.js"));
        assert_eq!(config.entry_point(), "main.html");
        assert_eq!(config.publish.output, "public");
    }

    #[test]
    fn test_from_str_invalid() {
        assert!(PublishConfig::from_str("publish = 3").is_err());
    }

    #[test]
    fn test_parse_with_ignored_collects_unknown_fields() {
        let (_, ignored) = PublishConfig::parse_with_ignored(
            r#"
            [publish]
            env = "dist"
            unknown_field = true
            "#,
        )
        .unwrap();
        assert_eq!(ignored, vec!["publish.unknown_field".to_string()]);
    }

    #[test]
    fn test_path_accessors() {
        let mut config = PublishConfig::default();
        config.root = PathBuf::from("/project");

        assert_eq!(config.env_root(), PathBuf::from("/project/dist"));
        assert_eq!(config.template_dir(), PathBuf::from("/project/root-template"));
        assert_eq!(config.bundle_path(), PathBuf::from("/project/dist/bundle.js"));
        assert_eq!(config.output_root(), PathBuf::from("/project/dist/www-root"));
    }

    #[test]
    fn test_root_join_absolute_passthrough() {
        let mut config = PublishConfig::default();
        config.root = PathBuf::from("/project");
        config.publish.env = PathBuf::from("/elsewhere/dist");

        assert_eq!(config.env_root(), PathBuf::from("/elsewhere/dist"));
    }
}
