//! Template context shared by every stub
//!
//! Class names, namespaces and output paths for all class kinds are computed
//! up front, so a controller can reference the request and resource classes
//! whether or not they are generated in the same run.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::{json, Value};

use crate::artifact::ArtifactKind;
use crate::naming::{self, ModelNames};
use crate::request::GenerationRequest;
use crate::schema::{ColumnModifier, ColumnType, FieldSpec};

/// Where one generated PHP class lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassTarget {
    /// Short class name, e.g. `PostController`
    pub class: String,
    /// Namespace without a trailing separator
    pub namespace: String,
    /// Fully qualified class name
    pub fqcn: String,
    /// Output path relative to the plugin root
    pub path: PathBuf,
}

impl ClassTarget {
    fn new(class: String, namespace: String, dir: &str) -> Self {
        let fqcn = format!("{namespace}\\{class}");
        let path = PathBuf::from(dir).join(format!("{class}.php"));
        Self {
            class,
            namespace,
            fqcn,
            path,
        }
    }

    /// Layout of `kind` for `request`
    ///
    /// Returns `None` for kinds that are not a class of their own
    /// (migration, routes, soft-delete).
    #[must_use]
    pub fn for_kind(kind: ArtifactKind, request: &GenerationRequest) -> Option<Self> {
        let model = request.model();
        let base = request.namespace();

        let target = match kind {
            ArtifactKind::Model => {
                Self::new(model.to_string(), format!("{base}\\Models"), "app/Models")
            }
            ArtifactKind::Factory => Self::new(
                format!("{model}Factory"),
                "Database\\Factories".to_string(),
                "database/factories",
            ),
            ArtifactKind::Seeder => Self::new(
                format!("{model}Seeder"),
                "Database\\Seeders".to_string(),
                "database/seeders",
            ),
            ArtifactKind::Filter => Self::new(
                format!("{model}Filters"),
                format!("{base}\\Filters"),
                "app/Filters",
            ),
            ArtifactKind::CreateRequest => Self::new(
                format!("Create{model}Request"),
                format!("{base}\\Http\\Requests\\{model}"),
                &format!("app/Http/Requests/{model}"),
            ),
            ArtifactKind::UpdateRequest => Self::new(
                format!("Update{model}Request"),
                format!("{base}\\Http\\Requests\\{model}"),
                &format!("app/Http/Requests/{model}"),
            ),
            ArtifactKind::Resource => Self::new(
                format!("{model}Resource"),
                format!("{base}\\Http\\Resources\\{model}"),
                &format!("app/Http/Resources/{model}"),
            ),
            ArtifactKind::Controller => Self::new(
                format!("{model}Controller"),
                format!("{base}\\Http\\Controllers\\API"),
                "app/Http/Controllers/API",
            ),
            ArtifactKind::Test => Self::new(
                format!("{model}Test"),
                "Tests\\Feature".to_string(),
                "tests/Feature",
            ),
            ArtifactKind::Migration | ArtifactKind::Routes | ArtifactKind::SoftDelete => {
                return None
            }
        };
        Some(target)
    }
}

/// Build the context every stub is rendered with
#[must_use]
pub fn build_context(request: &GenerationRequest) -> Value {
    let names = ModelNames::new(request.model());
    let schema = request.schema();

    let fields: Vec<Value> = schema
        .iter()
        .map(|field| field_context(field, &names.table, request.namespace()))
        .collect();

    let casts: Vec<Value> = schema
        .iter()
        .filter_map(|field| {
            field
                .column_type
                .cast()
                .map(|cast| json!({ "name": field.name, "cast": cast }))
        })
        .collect();

    let relations: Vec<Value> = schema
        .iter()
        .filter(|field| field.is_foreign_key())
        .map(|field| {
            let related = naming::table_model(&referenced_table(field));
            json!({
                "method": naming::relation_method(&field.name),
                "column": field.name,
                "model": related,
                "model_fqcn": format!("{}\\Models\\{related}", request.namespace()),
            })
        })
        .collect();

    let field_names: Vec<&str> = schema.iter().map(|field| field.name.as_str()).collect();
    let searchable: Vec<&str> = schema
        .iter()
        .filter(|field| {
            matches!(
                field.column_type,
                ColumnType::String | ColumnType::Char | ColumnType::Text | ColumnType::LongText
            )
        })
        .map(|field| field.name.as_str())
        .collect();
    let mut sorts = field_names.clone();
    sorts.push("created_at");

    let mut classes = serde_json::Map::new();
    for kind in ArtifactKind::ALL {
        if let Some(target) = ClassTarget::for_kind(kind, request) {
            classes.insert(kind.as_str().replace('-', "_"), json!(target));
        }
    }

    json!({
        "model": names.class,
        "namespace": request.namespace(),
        "table": names.table,
        "snake": names.snake,
        "route": names.route,
        "variable": names.variable,
        "plural_variable": names.plural_variable,
        "fields": fields,
        "casts": casts,
        "relations": relations,
        "allowed_filters": php_list(&field_names),
        "allowed_sorts": php_list(&sorts),
        "searchable_columns": php_list(&searchable),
        "soft_delete": request.is_selected(ArtifactKind::SoftDelete),
        "has_filter": request.is_selected(ArtifactKind::Filter),
        "has_factory": request.is_selected(ArtifactKind::Factory),
        "has_resource": request.is_selected(ArtifactKind::Resource),
        "has_requests": request.is_selected(ArtifactKind::CreateRequest)
            && request.is_selected(ArtifactKind::UpdateRequest),
        "classes": classes,
    })
}

fn field_context(field: &FieldSpec, table: &str, namespace: &str) -> Value {
    json!({
        "name": field.name,
        "type": field.column_type.as_str(),
        "cast": field.column_type.cast(),
        "nullable": field.is_nullable(),
        "migration": migration_column(field),
        "create_rules": create_rules(field, table),
        "update_rules": update_rules(field),
        "faker": faker(field, namespace),
    })
}

/// Table a foreign key points at
fn referenced_table(field: &FieldSpec) -> String {
    field
        .references()
        .map_or_else(|| naming::referenced_table(&field.name), str::to_string)
}

/// Blueprint call for one column, without the trailing semicolon
///
/// Plain modifiers keep declaration order; `constrained` and the delete
/// actions go last because Laravel requires them after `nullable`.
#[must_use]
pub fn migration_column(field: &FieldSpec) -> String {
    let mut line = format!("$table->{}('{}')", field.column_type.as_str(), field.name);

    for modifier in &field.modifiers {
        match modifier {
            ColumnModifier::Nullable => line.push_str("->nullable()"),
            ColumnModifier::Unique => line.push_str("->unique()"),
            ColumnModifier::Index => line.push_str("->index()"),
            ColumnModifier::Unsigned => line.push_str("->unsigned()"),
            ColumnModifier::Default(value) => {
                line.push_str(&format!("->default({})", php_literal(value)));
            }
            ColumnModifier::References(_)
            | ColumnModifier::CascadeOnDelete
            | ColumnModifier::NullOnDelete => {}
        }
    }

    if field.is_foreign_key() {
        line.push_str(&format!("->constrained('{}')", referenced_table(field)));
        for modifier in &field.modifiers {
            match modifier {
                ColumnModifier::CascadeOnDelete => line.push_str("->cascadeOnDelete()"),
                ColumnModifier::NullOnDelete => line.push_str("->nullOnDelete()"),
                _ => {}
            }
        }
    }

    line
}

fn create_rules(field: &FieldSpec, table: &str) -> String {
    let presence = if field.is_nullable() {
        "nullable"
    } else if field.default_value().is_some() {
        "sometimes"
    } else {
        "required"
    };

    let mut rules = vec![presence.to_string(), field.column_type.validation_rule().to_string()];
    if field.is_unique() {
        rules.push(format!("unique:{table},{}", field.name));
    }
    if field.is_foreign_key() {
        rules.push(format!("exists:{},id", referenced_table(field)));
    }
    rules.join("|")
}

fn update_rules(field: &FieldSpec) -> String {
    let mut rules = vec!["sometimes"];
    if field.is_nullable() {
        rules.push("nullable");
    }
    rules.push(field.column_type.validation_rule());
    rules.join("|")
}

fn faker(field: &FieldSpec, namespace: &str) -> String {
    if field.is_foreign_key() {
        let related = naming::table_model(&referenced_table(field));
        return format!("\\{namespace}\\Models\\{related}::factory()");
    }
    field.column_type.faker().to_string()
}

/// Render a default value as a PHP literal
///
/// Numeric literals, booleans, `null`, balanced `[...]` arrays and already
/// quoted strings pass through; anything else becomes a single quoted string.
#[must_use]
pub fn php_literal(value: &str) -> String {
    let lower = value.to_ascii_lowercase();
    if matches!(lower.as_str(), "true" | "false" | "null") {
        return lower;
    }

    if is_quoted(value) || is_balanced_array(value) || is_php_number(value) {
        return value.to_string();
    }

    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// `'...'` or `"..."` with no bare occurrence of the quote inside
fn is_quoted(value: &str) -> bool {
    ['\'', '"'].into_iter().any(|quote| {
        value.len() >= 2
            && value.starts_with(quote)
            && value.ends_with(quote)
            && !value[1..value.len() - 1].contains(quote)
    })
}

/// `[` ... `]` whose brackets never close early and all match
fn is_balanced_array(value: &str) -> bool {
    if !(value.starts_with('[') && value.ends_with(']')) {
        return false;
    }

    let mut depth = 0usize;
    for (idx, c) in value.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 && idx + 1 != value.len() {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Decimal PHP number: optional sign, digits with an optional `.`, optional exponent
fn is_php_number(value: &str) -> bool {
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());

    let unsigned = strip_sign(value);
    let (mantissa, exponent) = unsigned
        .split_once(['e', 'E'])
        .map_or((unsigned, None), |(mantissa, exponent)| {
            (mantissa, Some(strip_sign(exponent)))
        });

    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mantissa_ok = !(integer.is_empty() && fraction.is_empty())
        && all_digits(integer)
        && all_digits(fraction);

    mantissa_ok && exponent.is_none_or(|exp| !exp.is_empty() && all_digits(exp))
}

fn strip_sign(part: &str) -> &str {
    part.strip_prefix(['-', '+']).unwrap_or(part)
}

fn php_list(items: &[&str]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("'{item}'")).collect();
    format!("[{}]", quoted.join(", "))
}
