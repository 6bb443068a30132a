//! Artifact kinds and user-facing generate options
//!
//! [`ArtifactKind`] is the closed set of things a run can produce. Its
//! declaration order is the dispatch order used by the standard registry.
//! [`GenerateOption`] is the set of boolean options a user (or the `all`
//! expansion) can switch on; `request` fans out to two artifact kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One category of generated output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// Eloquent model class
    Model,
    /// Database migration
    Migration,
    /// Model factory
    Factory,
    /// Database seeder
    Seeder,
    /// Query filter class
    Filter,
    /// Form request used when creating a record
    CreateRequest,
    /// Form request used when updating a record
    UpdateRequest,
    /// API resource transforming the model for responses
    Resource,
    /// API controller
    Controller,
    /// Feature test
    Test,
    /// Route registration
    Routes,
    /// Soft delete support on the model and migration
    SoftDelete,
}

impl ArtifactKind {
    /// Every kind, in dispatch order
    pub const ALL: [Self; 12] = [
        Self::Model,
        Self::Migration,
        Self::Factory,
        Self::Seeder,
        Self::Filter,
        Self::CreateRequest,
        Self::UpdateRequest,
        Self::Resource,
        Self::Controller,
        Self::Test,
        Self::Routes,
        Self::SoftDelete,
    ];

    /// Kebab-case name used in config files and reports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Migration => "migration",
            Self::Factory => "factory",
            Self::Seeder => "seeder",
            Self::Filter => "filter",
            Self::CreateRequest => "create-request",
            Self::UpdateRequest => "update-request",
            Self::Resource => "resource",
            Self::Controller => "controller",
            Self::Test => "test",
            Self::Routes => "routes",
            Self::SoftDelete => "soft-delete",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown artifact kind: '{s}'"))
    }
}

/// A boolean generate option as exposed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerateOption {
    /// `--routes`
    Routes,
    /// `--soft-delete`
    SoftDelete,
    /// `--controller`
    Controller,
    /// `--factory`
    Factory,
    /// `--filter`
    Filter,
    /// `--test`
    Test,
    /// `--migration`
    Migration,
    /// `--seeder`
    Seeder,
    /// `--resource`
    Resource,
    /// `--request`, selects both form request kinds
    Request,
}

impl GenerateOption {
    /// Every option, in the order the CLI lists them
    pub const ALL: [Self; 10] = [
        Self::Routes,
        Self::SoftDelete,
        Self::Controller,
        Self::Factory,
        Self::Filter,
        Self::Test,
        Self::Migration,
        Self::Seeder,
        Self::Resource,
        Self::Request,
    ];

    /// Option name without the leading dashes
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Routes => "routes",
            Self::SoftDelete => "soft-delete",
            Self::Controller => "controller",
            Self::Factory => "factory",
            Self::Filter => "filter",
            Self::Test => "test",
            Self::Migration => "migration",
            Self::Seeder => "seeder",
            Self::Resource => "resource",
            Self::Request => "request",
        }
    }

    /// Artifact kinds switched on by this option
    #[must_use]
    pub const fn kinds(self) -> &'static [ArtifactKind] {
        match self {
            Self::Routes => &[ArtifactKind::Routes],
            Self::SoftDelete => &[ArtifactKind::SoftDelete],
            Self::Controller => &[ArtifactKind::Controller],
            Self::Factory => &[ArtifactKind::Factory],
            Self::Filter => &[ArtifactKind::Filter],
            Self::Test => &[ArtifactKind::Test],
            Self::Migration => &[ArtifactKind::Migration],
            Self::Seeder => &[ArtifactKind::Seeder],
            Self::Resource => &[ArtifactKind::Resource],
            Self::Request => &[ArtifactKind::CreateRequest, ArtifactKind::UpdateRequest],
        }
    }
}

impl fmt::Display for GenerateOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerateOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| format!("Unknown generate option: '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in ArtifactKind::ALL {
            assert_eq!(kind.as_str().parse::<ArtifactKind>(), Ok(kind));
        }
        assert!("all".parse::<ArtifactKind>().is_err());
    }

    #[test]
    fn test_dispatch_order_puts_dependencies_first() {
        let position = |kind| ArtifactKind::ALL.iter().position(|k| *k == kind).unwrap();
        assert!(position(ArtifactKind::Migration) < position(ArtifactKind::Seeder));
        assert!(position(ArtifactKind::Seeder) < position(ArtifactKind::Controller));
        assert!(position(ArtifactKind::CreateRequest) < position(ArtifactKind::Controller));
        assert!(position(ArtifactKind::Resource) < position(ArtifactKind::Controller));
    }

    #[test]
    fn test_request_fans_out() {
        assert_eq!(
            GenerateOption::Request.kinds(),
            &[ArtifactKind::CreateRequest, ArtifactKind::UpdateRequest]
        );
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&GenerateOption::SoftDelete).unwrap();
        assert_eq!(json, "\"soft-delete\"");
        let kind: ArtifactKind = serde_json::from_str("\"create-request\"").unwrap();
        assert_eq!(kind, ArtifactKind::CreateRequest);
    }
}
