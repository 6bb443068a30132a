//! Generation orchestrator
//!
//! Validates the model name and path group, resolves output location and
//! namespace, builds the [`GenerationRequest`], then walks the registry and
//! runs every selected generator. All validation happens before the first
//! file is written; a generator failure stops the run but leaves files
//! that were already written in place.

use std::path::PathBuf;

use crate::artifact::GenerateOption;
use crate::config::{CommandRegistry, PathConfig, ToolkitConfig};
use crate::error::{Result, ToolkitError};
use crate::naming;
use crate::report::{ConsoleTable, GeneratedFilesTable, GenerationReport, SchemaTable, TableOutput};
use crate::request::{GenerationRequest, OptionFlags, Selection};
use crate::reserved::{is_identifier, is_reserved};
use crate::schema::SchemaDefinition;
use crate::writer::FileWriter;

/// Raw user input for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInput {
    /// Model name as typed, e.g. `post`
    pub model: String,
    /// Schema string, if any
    pub schema: Option<String>,
    /// Boolean options
    pub flags: OptionFlags,
    /// Path group; the configured default when absent
    pub group: Option<String>,
    /// Explicit output root
    pub plugin: Option<PathBuf>,
    /// Explicit base namespace
    pub namespace: Option<String>,
}

impl CommandInput {
    /// Input for `model` with everything else left at its default
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }
}

/// Request and report of a successful run
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    request: GenerationRequest,
    report: GenerationReport,
}

impl GenerationOutcome {
    /// The request the run was built from
    #[must_use]
    pub const fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// Files written, in write order
    #[must_use]
    pub const fn report(&self) -> &GenerationReport {
        &self.report
    }

    /// Summary of the parsed schema
    #[must_use]
    pub fn schema_table(&self) -> TableOutput {
        SchemaTable.generate(&self.request, &self.report)
    }

    /// Summary of the written files
    #[must_use]
    pub fn generated_files_table(&self) -> TableOutput {
        GeneratedFilesTable.generate(&self.request, &self.report)
    }
}

/// Runs validation, request construction and generator dispatch
#[derive(Debug)]
pub struct Orchestrator {
    paths: PathConfig,
    default_generates: Vec<GenerateOption>,
    registry: CommandRegistry,
    writer: FileWriter,
}

impl Orchestrator {
    /// Orchestrator over injected configuration, registry and writer
    #[must_use]
    pub fn new(config: &ToolkitConfig, registry: CommandRegistry, writer: FileWriter) -> Self {
        Self {
            paths: PathConfig::from_config(config),
            default_generates: config.default_generates.clone(),
            registry,
            writer,
        }
    }

    /// Validate `input`, generate every selected artifact and report
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model name is reserved or not an identifier
    /// - The path group is not configured
    /// - The schema string is malformed
    /// - A generator fails to render or write its files
    pub fn run(&self, input: CommandInput) -> Result<GenerationOutcome> {
        let request = self.prepare(input)?;
        self.generate(request)
    }

    /// Swap in a different generator registry
    ///
    /// Lets a caller validate with [`prepare`](Self::prepare) before paying
    /// for the generators it will dispatch to.
    #[must_use]
    pub fn with_registry(mut self, registry: CommandRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Dispatch an already prepared request and report
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::Generator`] for the first generator that
    /// fails to render or whose output cannot be written.
    pub fn generate(&self, request: GenerationRequest) -> Result<GenerationOutcome> {
        let report = self.dispatch(&request)?;
        tracing::info!(
            model = request.model(),
            group = request.path_group(),
            files = report.len(),
            "generation complete"
        );
        Ok(GenerationOutcome { request, report })
    }

    /// Validate `input` and build the request without generating anything
    ///
    /// # Errors
    ///
    /// Returns the same validation and schema errors as [`run`](Self::run).
    pub fn prepare(&self, input: CommandInput) -> Result<GenerationRequest> {
        let CommandInput {
            model,
            schema,
            mut flags,
            group,
            plugin,
            namespace,
        } = input;

        let model = validate_model_name(&model)?;

        let group = group.unwrap_or_else(|| self.paths.default_path_group().to_string());
        if !self.paths.is_valid_path_group(&group) {
            tracing::debug!(%group, available = ?self.paths.group_names(), "unknown path group");
            return Err(ToolkitError::InvalidGroup { group });
        }

        let plugin_path = plugin.unwrap_or_else(|| self.paths.default_plugin_path(&group));
        let namespace = namespace
            .unwrap_or_else(|| self.paths.default_namespace(&group))
            .trim_matches('\\')
            .to_string();
        tracing::debug!(%group, plugin_path = %plugin_path.display(), %namespace, "resolved output location");

        let schema = SchemaDefinition::from_schema_str(schema.as_deref())?;

        flags.expand_all(&self.default_generates);
        tracing::debug!(options = ?flags.enabled().collect::<Vec<_>>(), "options after expansion");
        let selection = Selection::from_flags(&flags);
        tracing::debug!(kinds = ?selection.selected().collect::<Vec<_>>(), "selected artifacts");

        Ok(GenerationRequest::new(
            model,
            selection,
            schema,
            group,
            plugin_path,
            namespace,
        ))
    }

    /// Run every registered generator whose kind is selected, in registry order
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::Generator`] for the first generator that
    /// fails to render or whose output cannot be written.
    pub fn dispatch(&self, request: &GenerationRequest) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();

        for (kind, generator) in self.registry.commands() {
            if !request.is_selected(kind) {
                continue;
            }

            tracing::info!(%kind, "generating");
            let files = generator
                .generate(request)
                .map_err(|source| ToolkitError::Generator { kind, source })?;

            for file in files {
                let (path, outcome) = self
                    .writer
                    .write(request.plugin_path(), &file)
                    .map_err(|source| ToolkitError::Generator { kind, source })?;
                tracing::info!(%kind, path = %path.display(), ?outcome, "wrote");
                report.push(kind, path);
            }
        }

        Ok(report)
    }
}

/// Reserved check, identifier check, then `ucfirst` normalisation
fn validate_model_name(raw: &str) -> Result<String> {
    if is_reserved(raw) {
        return Err(ToolkitError::ReservedName {
            name: raw.to_string(),
        });
    }
    if !is_identifier(raw) {
        return Err(ToolkitError::InvalidModelName {
            name: raw.to_string(),
        });
    }
    Ok(naming::ucfirst(raw))
}
