//! Schema definition parsed from the compact schema string
//!
//! A schema string lists the model's columns in declaration order:
//!
//! ```text
//! title:string:unique, body:text:nullable, published:boolean:default(false)
//! author_id:foreignId:cascadeOnDelete | price:decimal:default(0)
//! ```
//!
//! Fields are separated by `,` or `|`; a field's name, type and modifiers by
//! `:`. See [`field`] for the type and modifier vocabulary.

pub mod field;
mod parser;

pub use field::{ColumnModifier, ColumnType, FieldSpec};

use crate::error::SchemaError;
use std::fmt;

/// Ordered, immutable list of fields declared for a model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDefinition {
    fields: Vec<FieldSpec>,
}

impl SchemaDefinition {
    /// Parse an optional schema string
    ///
    /// Absent, empty or whitespace-only input yields an empty definition.
    ///
    /// # Examples
    ///
    /// ```
    /// # use api_toolkit::schema::{ColumnType, SchemaDefinition};
    /// let schema = SchemaDefinition::from_schema_str(Some("title:string,published:boolean")).unwrap();
    /// assert_eq!(schema.len(), 2);
    /// assert_eq!(schema.fields()[1].column_type, ColumnType::Boolean);
    ///
    /// assert!(SchemaDefinition::from_schema_str(None).unwrap().is_empty());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when a field has no name or type, a name is
    /// not an identifier or is reserved, a type or modifier is unknown, a
    /// modifier is malformed or unterminated, or a name is declared twice.
    pub fn from_schema_str(raw: Option<&str>) -> Result<Self, SchemaError> {
        let fields = raw.map(parser::parse_schema).transpose()?.unwrap_or_default();
        Ok(Self { fields })
    }

    /// Fields in declaration order
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Iterate over the fields in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, FieldSpec> {
        self.fields.iter()
    }

    /// Number of declared fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields were declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl<'a> IntoIterator for &'a SchemaDefinition {
    type Item = &'a FieldSpec;
    type IntoIter = std::slice::Iter<'a, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl fmt::Display for SchemaDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .fields
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}
