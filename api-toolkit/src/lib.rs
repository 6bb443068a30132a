//! api-toolkit: CRUD API scaffolding from a compact schema string
//!
//! Given a model name, an optional schema such as
//! `title:string:unique,published:boolean:default(false)` and a set of
//! options, the toolkit validates the input, builds one immutable
//! [`GenerationRequest`](request::GenerationRequest) and runs every selected
//! generator against it: model, migration, factory, seeder, filter, form
//! requests, API resource, controller, feature test and route registration.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use api_toolkit::prelude::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ToolkitConfig::load()?;
//! let renderer = Arc::new(StubRenderer::with_overrides(config.stubs_dir.as_deref())?);
//! let orchestrator = Orchestrator::new(
//!     &config,
//!     CommandRegistry::standard(&renderer),
//!     FileWriter::new(false),
//! );
//!
//! let input = CommandInput {
//!     schema: Some("title:string,published:boolean".to_string()),
//!     flags: OptionFlags::default().with(GenerateOption::Request),
//!     ..CommandInput::new("post")
//! };
//! let outcome = orchestrator.run(input)?;
//! println!("{}", outcome.generated_files_table().render());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod artifact;
pub mod config;
pub mod error;
pub mod generators;
pub mod naming;
pub mod observability;
pub mod orchestrator;
pub mod report;
pub mod request;
pub mod reserved;
pub mod schema;
pub mod writer;

pub use error::{Result, SchemaError, ToolkitError};

/// Commonly used types
pub mod prelude {
    pub use crate::artifact::{ArtifactKind, GenerateOption};
    pub use crate::config::{CommandRegistry, PathConfig, ToolkitConfig};
    pub use crate::error::{SchemaError, ToolkitError};
    pub use crate::generators::{ArtifactGenerator, GeneratedFile, StubRenderer, WriteMode};
    pub use crate::orchestrator::{CommandInput, GenerationOutcome, Orchestrator};
    pub use crate::report::{ConsoleTable, GenerationReport, TableOutput};
    pub use crate::request::{GenerationRequest, OptionFlags, Selection};
    pub use crate::schema::{ColumnModifier, ColumnType, FieldSpec, SchemaDefinition};
    pub use crate::writer::FileWriter;
}
