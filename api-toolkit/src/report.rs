//! Console summaries of a generation run
//!
//! Producers build a plain [`TableOutput`] (headers plus rows) so tests can
//! inspect the data; [`TableOutput::render`] turns it into a terminal table.

use std::path::PathBuf;

use comfy_table::{presets, ContentArrangement, Table};

use crate::artifact::ArtifactKind;
use crate::request::GenerationRequest;

/// One file written during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFileRecord {
    /// Kind that produced the file
    pub kind: ArtifactKind,
    /// Path of the file as written
    pub path: PathBuf,
}

/// Files written during a run, in write order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    records: Vec<GeneratedFileRecord>,
}

impl GenerationReport {
    /// Append a record
    pub fn push(&mut self, kind: ArtifactKind, path: PathBuf) {
        self.records.push(GeneratedFileRecord { kind, path });
    }

    /// All records in write order
    #[must_use]
    pub fn records(&self) -> &[GeneratedFileRecord] {
        &self.records
    }

    /// Kinds that produced at least one file, in first-write order
    #[must_use]
    pub fn kinds(&self) -> Vec<ArtifactKind> {
        let mut kinds: Vec<ArtifactKind> = Vec::new();
        for record in &self.records {
            if !kinds.contains(&record.kind) {
                kinds.push(record.kind);
            }
        }
        kinds
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing was written
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Headers and rows of a console table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOutput {
    /// Column headers
    pub headers: Vec<String>,
    /// Data rows, each as wide as `headers`
    pub rows: Vec<Vec<String>>,
}

impl TableOutput {
    /// Render as a bordered terminal table
    #[must_use]
    pub fn render(&self) -> String {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(self.headers.clone());
        for row in &self.rows {
            table.add_row(row.clone());
        }
        table.to_string()
    }
}

/// Produces a table describing one aspect of a run
pub trait ConsoleTable {
    /// Build the table for `request` and the files in `report`
    fn generate(&self, request: &GenerationRequest, report: &GenerationReport) -> TableOutput;
}

/// Field, Type and Modifiers of every declared column
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaTable;

impl ConsoleTable for SchemaTable {
    fn generate(&self, request: &GenerationRequest, _report: &GenerationReport) -> TableOutput {
        TableOutput {
            headers: vec!["Field".into(), "Type".into(), "Modifiers".into()],
            rows: request
                .schema()
                .iter()
                .map(|field| {
                    vec![
                        field.name.clone(),
                        field.column_type.to_string(),
                        field.modifiers_label(),
                    ]
                })
                .collect(),
        }
    }
}

/// Kind and Path of every written file
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratedFilesTable;

impl ConsoleTable for GeneratedFilesTable {
    fn generate(&self, _request: &GenerationRequest, report: &GenerationReport) -> TableOutput {
        TableOutput {
            headers: vec!["Kind".into(), "Path".into()],
            rows: report
                .records()
                .iter()
                .map(|record| vec![record.kind.to_string(), record.path.display().to_string()])
                .collect(),
        }
    }
}
