//! Configuration management for api-toolkit
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `API_TOOLKIT_` prefix, `__` for nesting)
//! 2. `./api-toolkit.toml` (project config)
//! 3. `~/.config/api-toolkit/config.toml` (user config, XDG)
//! 4. Hardcoded defaults (fallback)
//!
//! An explicit file passed with `--config` replaces sources 2 and 3.
//!
//! # Example Configuration
//!
//! ```toml
//! # api-toolkit.toml
//! default_group = "default"
//! default_generates = ["seeder", "factory", "request", "resource", "filter", "test", "controller", "migration", "routes"]
//! stubs_dir = "stubs/api-toolkit"
//!
//! [groups.default]
//! plugin_path = "."
//! namespace = "App"
//!
//! [groups.blog]
//! plugin_path = "plugins/acme/blog"
//! namespace = "Acme\\Blog"
//! ```

pub mod commands;
pub mod paths;

pub use commands::CommandRegistry;
pub use paths::PathConfig;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::artifact::GenerateOption;
use crate::error::{Result, ToolkitError};

/// Name of the project-level config file looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "api-toolkit.toml";

/// Name of the group used when none is given
pub const DEFAULT_GROUP: &str = "default";

/// Output root and namespace overrides for one path group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathGroup {
    /// Root directory generated files are written under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_path: Option<PathBuf>,

    /// Base namespace of generated classes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Complete api-toolkit configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Group used when the user gives none
    pub default_group: String,

    /// Options switched on by `--all`
    pub default_generates: Vec<GenerateOption>,

    /// Directory holding `<stub>.stub` overrides for the built-in stubs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stubs_dir: Option<PathBuf>,

    /// Path groups by name
    pub groups: BTreeMap<String, PathGroup>,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        let mut groups = BTreeMap::new();
        groups.insert(
            DEFAULT_GROUP.to_string(),
            PathGroup {
                plugin_path: Some(PathBuf::from(".")),
                namespace: Some("App".to_string()),
            },
        );

        Self {
            default_group: DEFAULT_GROUP.to_string(),
            default_generates: vec![
                GenerateOption::Seeder,
                GenerateOption::Factory,
                GenerateOption::Request,
                GenerateOption::Resource,
                GenerateOption::Filter,
                GenerateOption::Test,
                GenerateOption::Controller,
                GenerateOption::Migration,
                GenerateOption::Routes,
            ],
            stubs_dir: None,
            groups,
        }
    }
}

impl ToolkitConfig {
    /// Load configuration from the standard locations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file cannot be read or parsed
    /// - Configuration values fail type conversion
    pub fn load() -> Result<Self> {
        let mut figment = Self::defaults()?;

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                tracing::debug!(path = %user_config.display(), "merging user config");
                figment = figment.merge(Toml::file(&user_config));
            }
        }

        let project_config = PathBuf::from(PROJECT_CONFIG_FILE);
        if project_config.exists() {
            tracing::debug!(path = %project_config.display(), "merging project config");
            figment = figment.merge(Toml::file(&project_config));
        }

        Self::extract(figment)
    }

    /// Load configuration from a specific file, still honouring environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at `path` does not exist
    /// - The file contains invalid TOML or values of the wrong type
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ToolkitError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        tracing::debug!(path = %path.display(), "merging explicit config");
        let figment = Self::defaults()?.merge(Toml::file(path));
        Self::extract(figment)
    }

    /// Recommended user config path, e.g. `~/.config/api-toolkit/config.toml`
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("api-toolkit").join("config.toml"))
    }

    fn defaults() -> Result<Figment> {
        let defaults = toml::to_string(&Self::default())
            .map_err(|e| ToolkitError::Config(format!("cannot serialize defaults: {e}")))?;
        Ok(Figment::new().merge(Toml::string(&defaults)))
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Self = figment
            .merge(Env::prefixed("API_TOOLKIT_").split("__").lowercase(true))
            .extract()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ToolkitConfig::default();
        assert_eq!(config.default_group, "default");
        assert_eq!(config.default_generates.len(), 9);
        assert!(!config.default_generates.contains(&GenerateOption::SoftDelete));
        let group = &config.groups["default"];
        assert_eq!(group.plugin_path.as_deref(), Some(Path::new(".")));
        assert_eq!(group.namespace.as_deref(), Some("App"));
    }

    #[test]
    fn test_defaults_survive_toml_round_trip() {
        let rendered = toml::to_string(&ToolkitConfig::default()).unwrap();
        let parsed: ToolkitConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, ToolkitConfig::default());
    }

    #[test]
    fn test_load_from_merges_groups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api-toolkit.toml");
        fs::write(
            &path,
            r#"
default_generates = ["migration", "soft-delete"]

[groups.blog]
plugin_path = "plugins/acme/blog"
namespace = "Acme\\Blog"
"#,
        )
        .unwrap();

        let config = ToolkitConfig::load_from(&path).unwrap();
        assert_eq!(
            config.default_generates,
            vec![GenerateOption::Migration, GenerateOption::SoftDelete]
        );
        assert!(config.groups.contains_key("default"));
        assert_eq!(
            config.groups["blog"].namespace.as_deref(),
            Some("Acme\\Blog")
        );
    }

    #[test]
    fn test_load_from_rejects_unknown_option() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api-toolkit.toml");
        fs::write(&path, "default_generates = [\"policy\"]\n").unwrap();

        let err = ToolkitConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ToolkitError::Config(_)));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = ToolkitConfig::load_from(Path::new("/nonexistent/api-toolkit.toml")).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
