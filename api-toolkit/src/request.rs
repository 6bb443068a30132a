//! Generation request and the flag records it is built from
//!
//! Raw user choices arrive as an [`OptionFlags`] record. `--all` expansion
//! and the `request` fan-out are explicit steps that turn it into a
//! [`Selection`], one boolean per [`ArtifactKind`]. The finished
//! [`GenerationRequest`] is immutable and answers every question a
//! generator has without going back to configuration.

use std::path::{Path, PathBuf};

use crate::artifact::{ArtifactKind, GenerateOption};
use crate::schema::SchemaDefinition;

/// Boolean options as given by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct OptionFlags {
    /// `--all`
    pub all: bool,
    /// `--routes`
    pub routes: bool,
    /// `--soft-delete`
    pub soft_delete: bool,
    /// `--controller`
    pub controller: bool,
    /// `--factory`
    pub factory: bool,
    /// `--filter`
    pub filter: bool,
    /// `--test`
    pub test: bool,
    /// `--migration`
    pub migration: bool,
    /// `--seeder`
    pub seeder: bool,
    /// `--resource`
    pub resource: bool,
    /// `--request`
    pub request: bool,
}

impl OptionFlags {
    /// Current value of `option`
    #[must_use]
    pub const fn get(&self, option: GenerateOption) -> bool {
        match option {
            GenerateOption::Routes => self.routes,
            GenerateOption::SoftDelete => self.soft_delete,
            GenerateOption::Controller => self.controller,
            GenerateOption::Factory => self.factory,
            GenerateOption::Filter => self.filter,
            GenerateOption::Test => self.test,
            GenerateOption::Migration => self.migration,
            GenerateOption::Seeder => self.seeder,
            GenerateOption::Resource => self.resource,
            GenerateOption::Request => self.request,
        }
    }

    /// Set `option` to `value`
    pub fn set(&mut self, option: GenerateOption, value: bool) {
        let slot = match option {
            GenerateOption::Routes => &mut self.routes,
            GenerateOption::SoftDelete => &mut self.soft_delete,
            GenerateOption::Controller => &mut self.controller,
            GenerateOption::Factory => &mut self.factory,
            GenerateOption::Filter => &mut self.filter,
            GenerateOption::Test => &mut self.test,
            GenerateOption::Migration => &mut self.migration,
            GenerateOption::Seeder => &mut self.seeder,
            GenerateOption::Resource => &mut self.resource,
            GenerateOption::Request => &mut self.request,
        };
        *slot = value;
    }

    /// Builder-style [`set`](Self::set) to `true`
    #[must_use]
    pub fn with(mut self, option: GenerateOption) -> Self {
        self.set(option, true);
        self
    }

    /// Expand `--all` into the configured default options
    ///
    /// Every default option is forced on. Options already on stay on, and
    /// nothing is ever switched off. Does nothing unless `all` is set.
    pub fn expand_all(&mut self, defaults: &[GenerateOption]) {
        if !self.all {
            return;
        }
        for option in defaults {
            self.set(*option, true);
        }
    }

    /// Options currently switched on, in CLI order
    pub fn enabled(&self) -> impl Iterator<Item = GenerateOption> + '_ {
        GenerateOption::ALL
            .into_iter()
            .filter(move |option| self.get(*option))
    }
}

/// Which artifact kinds a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Selection {
    model: bool,
    migration: bool,
    factory: bool,
    seeder: bool,
    filter: bool,
    create_request: bool,
    update_request: bool,
    resource: bool,
    controller: bool,
    test: bool,
    routes: bool,
    soft_delete: bool,
}

impl Selection {
    /// Derive the selection from (already expanded) flags
    ///
    /// `request` selects both form request kinds; `model` is always selected.
    #[must_use]
    pub const fn from_flags(flags: &OptionFlags) -> Self {
        Self {
            model: true,
            migration: flags.migration,
            factory: flags.factory,
            seeder: flags.seeder,
            filter: flags.filter,
            create_request: flags.request,
            update_request: flags.request,
            resource: flags.resource,
            controller: flags.controller,
            test: flags.test,
            routes: flags.routes,
            soft_delete: flags.soft_delete,
        }
    }

    /// Whether `kind` is selected
    #[must_use]
    pub const fn is_selected(&self, kind: ArtifactKind) -> bool {
        match kind {
            ArtifactKind::Model => self.model,
            ArtifactKind::Migration => self.migration,
            ArtifactKind::Factory => self.factory,
            ArtifactKind::Seeder => self.seeder,
            ArtifactKind::Filter => self.filter,
            ArtifactKind::CreateRequest => self.create_request,
            ArtifactKind::UpdateRequest => self.update_request,
            ArtifactKind::Resource => self.resource,
            ArtifactKind::Controller => self.controller,
            ArtifactKind::Test => self.test,
            ArtifactKind::Routes => self.routes,
            ArtifactKind::SoftDelete => self.soft_delete,
        }
    }

    /// Selected kinds in dispatch order
    pub fn selected(&self) -> impl Iterator<Item = ArtifactKind> + '_ {
        ArtifactKind::ALL
            .into_iter()
            .filter(move |kind| self.is_selected(*kind))
    }
}

/// Immutable, fully resolved description of one generation run
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    model: String,
    selection: Selection,
    schema: SchemaDefinition,
    path_group: String,
    plugin_path: PathBuf,
    namespace: String,
}

impl GenerationRequest {
    /// Assemble a request from already validated parts
    #[must_use]
    pub const fn new(
        model: String,
        selection: Selection,
        schema: SchemaDefinition,
        path_group: String,
        plugin_path: PathBuf,
        namespace: String,
    ) -> Self {
        Self {
            model,
            selection,
            schema,
            path_group,
            plugin_path,
            namespace,
        }
    }

    /// Normalised model name, e.g. `Post`
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether `kind` is part of this run
    #[must_use]
    pub const fn is_selected(&self, kind: ArtifactKind) -> bool {
        self.selection.is_selected(kind)
    }

    /// The full selection
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Parsed schema
    #[must_use]
    pub const fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    /// Path group the defaults were resolved from
    #[must_use]
    pub fn path_group(&self) -> &str {
        &self.path_group
    }

    /// Root directory generated files are written under
    #[must_use]
    pub fn plugin_path(&self) -> &Path {
        &self.plugin_path
    }

    /// Base namespace of generated classes, without a trailing separator
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}
