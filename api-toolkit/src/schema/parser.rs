//! Schema string grammar
//!
//! ```text
//! schema    := ws | field (sep field)*
//! sep       := ',' | '|'                 (outside parentheses)
//! field     := name ':' type (':' modifier)*
//! modifier  := word | word '(' arg ')'
//! ```
//!
//! Separators inside parentheses never split, so `default(12:30)` and
//! `default(a,b)` each stay one modifier.

use super::field::{ColumnModifier, ColumnType, FieldSpec};
use crate::error::SchemaError;
use crate::reserved::{is_identifier, is_reserved};

const FIELD_SEPARATORS: &[char] = &[',', '|'];
const PART_SEPARATOR: &[char] = &[':'];

/// Split `input` on any of `separators` that sit outside parentheses.
///
/// Returns the pieces and whether every `(` was closed.
fn split_top_level<'a>(input: &'a str, separators: &[char]) -> (Vec<&'a str>, bool) {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 && separators.contains(&c) => {
                pieces.push(&input[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(&input[start..]);

    (pieces, depth == 0)
}

/// Parse a whole schema string into ordered fields
pub(super) fn parse_schema(raw: &str) -> Result<Vec<FieldSpec>, SchemaError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let (segments, balanced) = split_top_level(raw, FIELD_SEPARATORS);
    if !balanced {
        let segment = segments.last().map_or(raw, |s| s.trim()).to_string();
        return Err(SchemaError::UnterminatedModifier { segment });
    }

    let mut fields: Vec<FieldSpec> = Vec::with_capacity(segments.len());
    for (idx, segment) in segments.iter().enumerate() {
        let field = parse_field(segment, idx + 1)?;
        if fields
            .iter()
            .any(|existing| existing.name.eq_ignore_ascii_case(&field.name))
        {
            return Err(SchemaError::DuplicateField { field: field.name });
        }
        fields.push(field);
    }

    Ok(fields)
}

/// Parse one `name:type[:modifier]*` segment
fn parse_field(segment: &str, position: usize) -> Result<FieldSpec, SchemaError> {
    let (parts, _) = split_top_level(segment, PART_SEPARATOR);

    let name = parts[0].trim();
    if name.is_empty() {
        return Err(SchemaError::MissingName {
            position,
            segment: segment.trim().to_string(),
        });
    }
    if !is_identifier(name) {
        return Err(SchemaError::InvalidFieldName {
            field: name.to_string(),
        });
    }
    if is_reserved(name) {
        return Err(SchemaError::ReservedFieldName {
            field: name.to_string(),
        });
    }

    let type_tag = parts.get(1).map_or("", |t| t.trim());
    if type_tag.is_empty() {
        return Err(SchemaError::MissingType {
            field: name.to_string(),
        });
    }
    let column_type = ColumnType::from_tag(type_tag).ok_or_else(|| SchemaError::UnknownType {
        field: name.to_string(),
        type_tag: type_tag.to_string(),
        supported: ColumnType::supported_tags(),
    })?;

    let modifiers = parts
        .iter()
        .skip(2)
        .map(|raw| parse_modifier(raw.trim(), name))
        .collect::<Result<Vec<_>, _>>()?;

    if column_type != ColumnType::ForeignId {
        if let Some(modifier) = modifiers.iter().find(|m| m.requires_foreign_key()) {
            return Err(SchemaError::MalformedModifier {
                field: name.to_string(),
                modifier: modifier.to_string(),
                reason: "only valid on foreignId columns".to_string(),
            });
        }
    }

    Ok(FieldSpec {
        name: name.to_string(),
        column_type,
        modifiers,
    })
}

/// Parse a single modifier such as `nullable` or `default(0)`
fn parse_modifier(raw: &str, field: &str) -> Result<ColumnModifier, SchemaError> {
    let malformed = |reason: &str| SchemaError::MalformedModifier {
        field: field.to_string(),
        modifier: raw.to_string(),
        reason: reason.to_string(),
    };

    if raw.is_empty() {
        return Err(malformed("empty modifier"));
    }

    let (word, argument) = match raw.find('(') {
        Some(open) => {
            let Some(inner) = raw[open + 1..].strip_suffix(')') else {
                return Err(malformed("unexpected text after ')'"));
            };
            (raw[..open].trim(), Some(inner.trim()))
        }
        None if raw.contains(')') => return Err(malformed("unexpected ')'")),
        None => (raw, None),
    };

    let keyword = word.to_lowercase();
    match (keyword.as_str(), argument) {
        ("default", Some(value)) if !value.is_empty() => Ok(ColumnModifier::Default(value.to_string())),
        ("references", Some(table)) if is_identifier(table) => {
            Ok(ColumnModifier::References(table.to_string()))
        }
        ("default", _) => Err(malformed("default requires a value, e.g. default(0)")),
        ("references", _) => Err(malformed("references requires a table name, e.g. references(users)")),
        ("nullable" | "unique" | "index" | "unsigned" | "cascadeondelete" | "nullondelete", Some(_)) => {
            Err(malformed("modifier takes no argument"))
        }
        ("nullable", None) => Ok(ColumnModifier::Nullable),
        ("unique", None) => Ok(ColumnModifier::Unique),
        ("index", None) => Ok(ColumnModifier::Index),
        ("unsigned", None) => Ok(ColumnModifier::Unsigned),
        ("cascadeondelete", None) => Ok(ColumnModifier::CascadeOnDelete),
        ("nullondelete", None) => Ok(ColumnModifier::NullOnDelete),
        _ => Err(SchemaError::UnknownModifier {
            field: field.to_string(),
            modifier: raw.to_string(),
        }),
    }
}
