//! Error types and error handling

use thiserror::Error;

use crate::artifact::ArtifactKind;

/// Errors raised while turning a schema string into field specifications
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A field segment is empty or has no name before the first `:`
    #[error("Field definition #{position} has no name: '{segment}'")]
    MissingName {
        /// One-based position of the segment in the schema string
        position: usize,
        /// The offending segment as written
        segment: String,
    },

    /// A field has a name but no type
    #[error("Field '{field}' has no type. Expected format: name:type[:modifiers]")]
    MissingType {
        /// Field name
        field: String,
    },

    /// A field name is not a plain identifier
    #[error("Invalid field name: '{field}'. Must start with a letter or underscore and contain only letters, digits and underscores")]
    InvalidFieldName {
        /// Field name as written
        field: String,
    },

    /// A field name collides with a reserved word
    #[error("The field name \"{field}\" is reserved by PHP.")]
    ReservedFieldName {
        /// Field name as written
        field: String,
    },

    /// The type tag is not part of the supported vocabulary
    #[error("Unknown type '{type_tag}' for field '{field}'. Supported types: {supported}")]
    UnknownType {
        /// Field name
        field: String,
        /// Type tag as written
        type_tag: String,
        /// Comma separated list of supported type tags
        supported: String,
    },

    /// The modifier is not part of the supported vocabulary
    #[error("Unknown modifier '{modifier}' on field '{field}'. Valid modifiers: nullable, unique, index, unsigned, default(value), references(table), cascadeOnDelete, nullOnDelete")]
    UnknownModifier {
        /// Field name
        field: String,
        /// Modifier as written
        modifier: String,
    },

    /// The modifier is known but its shape is wrong
    #[error("Malformed modifier '{modifier}' on field '{field}': {reason}")]
    MalformedModifier {
        /// Field name
        field: String,
        /// Modifier as written
        modifier: String,
        /// What is wrong with it
        reason: String,
    },

    /// An opening parenthesis has no matching close
    #[error("Unterminated modifier in '{segment}': missing ')'")]
    UnterminatedModifier {
        /// The field segment containing the open parenthesis
        segment: String,
    },

    /// The same field name appears more than once
    #[error("Field '{field}' is declared more than once")]
    DuplicateField {
        /// Field name
        field: String,
    },
}

/// Toolkit error type
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// Model name collides with a reserved word
    #[error("The name \"{name}\" is reserved by PHP.")]
    ReservedName {
        /// Model name as supplied by the user
        name: String,
    },

    /// Model name cannot be used as a class name
    #[error("The name \"{name}\" is not a valid class name.")]
    InvalidModelName {
        /// Model name as supplied by the user
        name: String,
    },

    /// The requested path group is not configured
    #[error("The path group you entered is not valid: \"{group}\"")]
    InvalidGroup {
        /// Group name as supplied by the user
        group: String,
    },

    /// The schema string could not be parsed
    #[error("Invalid schema")]
    SchemaSyntax(#[from] SchemaError),

    /// A generator failed while rendering or writing its files
    #[error("Failed to generate {kind}")]
    Generator {
        /// Artifact kind whose generator failed
        kind: ArtifactKind,
        /// Underlying failure
        #[source]
        source: anyhow::Error,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<figment::Error> for ToolkitError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result alias used across the library
pub type Result<T, E = ToolkitError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_name_message() {
        let err = ToolkitError::ReservedName {
            name: "class".to_string(),
        };
        assert_eq!(err.to_string(), "The name \"class\" is reserved by PHP.");
    }

    #[test]
    fn test_generator_error_keeps_source() {
        let err = ToolkitError::Generator {
            kind: ArtifactKind::Migration,
            source: anyhow::anyhow!("disk full"),
        };
        assert_eq!(err.to_string(), "Failed to generate migration");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("disk full"));
    }

    #[test]
    fn test_schema_error_converts() {
        let err: ToolkitError = SchemaError::DuplicateField {
            field: "title".to_string(),
        }
        .into();
        assert!(matches!(err, ToolkitError::SchemaSyntax(_)));
        let chain = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(chain, "Invalid schema: Field 'title' is declared more than once");
    }
}
