//! Path group resolution
//!
//! A path group bundles a default output root and a default base namespace.
//! Lookups fall back to the default group, then to built-in values, so a
//! group only needs to override what differs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::{PathGroup, ToolkitConfig};

const FALLBACK_PLUGIN_PATH: &str = ".";
const FALLBACK_NAMESPACE: &str = "App";

/// Read-only view over the configured path groups
#[derive(Debug, Clone)]
pub struct PathConfig {
    default_group: String,
    groups: BTreeMap<String, PathGroup>,
}

impl PathConfig {
    /// Build the lookup table from loaded configuration
    #[must_use]
    pub fn from_config(config: &ToolkitConfig) -> Self {
        Self {
            default_group: config.default_group.clone(),
            groups: config.groups.clone(),
        }
    }

    /// Whether `name` is a configured group or the default group
    #[must_use]
    pub fn is_valid_path_group(&self, name: &str) -> bool {
        name == self.default_group || self.groups.contains_key(name)
    }

    /// Identifier of the group used when the caller gives none
    #[must_use]
    pub fn default_path_group(&self) -> &str {
        &self.default_group
    }

    /// Output root for `group`
    ///
    /// Falls back to the default group's value, then to the current directory.
    #[must_use]
    pub fn default_plugin_path(&self, group: &str) -> PathBuf {
        self.lookup(group, |g| g.plugin_path.clone())
            .unwrap_or_else(|| PathBuf::from(FALLBACK_PLUGIN_PATH))
    }

    /// Base namespace for `group`
    ///
    /// Falls back to the default group's value, then to `App`.
    #[must_use]
    pub fn default_namespace(&self, group: &str) -> String {
        self.lookup(group, |g| g.namespace.clone())
            .unwrap_or_else(|| FALLBACK_NAMESPACE.to_string())
    }

    /// Names of all groups, default first
    #[must_use]
    pub fn group_names(&self) -> Vec<&str> {
        let mut names = vec![self.default_group.as_str()];
        names.extend(
            self.groups
                .keys()
                .map(String::as_str)
                .filter(|name| *name != self.default_group),
        );
        names
    }

    fn lookup<T>(&self, group: &str, field: impl Fn(&PathGroup) -> Option<T>) -> Option<T> {
        self.groups
            .get(group)
            .and_then(&field)
            .or_else(|| self.groups.get(&self.default_group).and_then(&field))
    }
}
