//! `api-toolkit generate`: scaffold a CRUD API for one model
//!
//! # Example
//!
//! ```bash
//! api-toolkit generate post "title:string:unique,body:text:nullable,published:boolean:default(false)" \
//!   --all --soft-delete
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use api_toolkit::prelude::*;
use clap::Args;
use console::style;

/// Options of the generate command
#[derive(Debug, Clone, Default, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateCommand {
    /// Model name (e.g. `post`, `BlogPost`); the first letter is uppercased
    pub model: String,

    /// Columns as `name:type[:modifier]*`, separated by `,` or `|`
    ///
    /// Example: "title:string:unique,author_id:foreignId:cascadeOnDelete"
    #[arg(value_name = "SCHEMA")]
    pub schema: Option<String>,

    /// Generate every artifact in the configured default set
    #[arg(long)]
    pub all: bool,

    /// Register an API resource route
    #[arg(long)]
    pub routes: bool,

    /// Add soft deletes to the model and migration
    #[arg(long)]
    pub soft_delete: bool,

    /// Generate an API controller
    #[arg(short = 'c', long)]
    pub controller: bool,

    /// Generate a model factory
    #[arg(short = 'f', long)]
    pub factory: bool,

    /// Generate a query filter
    #[arg(short = 'F', long)]
    pub filter: bool,

    /// Generate a feature test
    #[arg(short = 't', long)]
    pub test: bool,

    /// Generate a migration
    #[arg(short = 'm', long)]
    pub migration: bool,

    /// Generate a seeder
    #[arg(short = 's', long)]
    pub seeder: bool,

    /// Generate an API resource
    #[arg(short = 'r', long)]
    pub resource: bool,

    /// Generate create and update form requests
    #[arg(short = 'R', long)]
    pub request: bool,

    /// Path group providing the default output root and namespace
    #[arg(short = 'g', long)]
    pub group: Option<String>,

    /// Output root, overriding the group's default
    #[arg(long, value_name = "DIR")]
    pub plugin: Option<PathBuf>,

    /// Base namespace, overriding the group's default
    #[arg(long)]
    pub namespace: Option<String>,

    /// Overwrite files that already exist
    #[arg(long)]
    pub force: bool,
}

impl GenerateCommand {
    /// Option flags as typed on the command line
    #[must_use]
    pub const fn flags(&self) -> OptionFlags {
        OptionFlags {
            all: self.all,
            routes: self.routes,
            soft_delete: self.soft_delete,
            controller: self.controller,
            factory: self.factory,
            filter: self.filter,
            test: self.test,
            migration: self.migration,
            seeder: self.seeder,
            resource: self.resource,
            request: self.request,
        }
    }

    /// Orchestrator input for this invocation
    #[must_use]
    pub fn input(&self) -> CommandInput {
        CommandInput {
            model: self.model.clone(),
            schema: self.schema.clone(),
            flags: self.flags(),
            group: self.group.clone(),
            plugin: self.plugin.clone(),
            namespace: self.namespace.clone(),
        }
    }

    /// Run the generation and print both summaries
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Validation of the model name, group or schema fails
    /// - A custom stub cannot be read or compiled
    /// - A generator fails to render or write its files
    pub fn execute(&self, config: &ToolkitConfig) -> Result<GenerationOutcome> {
        let orchestrator =
            Orchestrator::new(config, CommandRegistry::new(), FileWriter::new(self.force));
        let request = orchestrator.prepare(self.input())?;

        let renderer = StubRenderer::with_overrides(config.stubs_dir.as_deref())
            .context("Failed to load stubs")?;
        let outcome = orchestrator
            .with_registry(CommandRegistry::standard(&Arc::new(renderer)))
            .generate(request)?;

        println!("{}", style("Here is your schema :").cyan().bold());
        println!("{}", outcome.schema_table().render());
        println!();
        println!("{}", style("Generated Files :").green().bold());
        println!("{}", outcome.generated_files_table().render());

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_one_to_one() {
        let command = GenerateCommand {
            model: "post".to_string(),
            all: true,
            request: true,
            soft_delete: true,
            ..GenerateCommand::default()
        };
        let flags = command.flags();
        assert!(flags.all);
        assert!(flags.request);
        assert!(flags.soft_delete);
        assert!(!flags.controller);
    }

    #[test]
    fn test_input_carries_values() {
        let command = GenerateCommand {
            model: "post".to_string(),
            schema: Some("title:string".to_string()),
            group: Some("blog".to_string()),
            namespace: Some("Acme\\Blog".to_string()),
            ..GenerateCommand::default()
        };
        let input = command.input();
        assert_eq!(input.model, "post");
        assert_eq!(input.schema.as_deref(), Some("title:string"));
        assert_eq!(input.group.as_deref(), Some("blog"));
        assert_eq!(input.namespace.as_deref(), Some("Acme\\Blog"));
        assert_eq!(input.plugin, None);
    }
}
