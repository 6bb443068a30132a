//! Field specifications: column types and modifiers
//!
//! # Supported Column Types
//!
//! | Tag                  | Aliases                     | Migration column       |
//! |----------------------|-----------------------------|------------------------|
//! | `string`             |                             | `VARCHAR(255)`         |
//! | `char`               |                             | `CHAR(255)`            |
//! | `text`               |                             | `TEXT`                 |
//! | `longText`           | `long_text`                 | `LONGTEXT`             |
//! | `integer`            | `int`                       | `INTEGER`              |
//! | `tinyInteger`        | `tiny_integer`, `tinyint`   | `TINYINT`              |
//! | `bigInteger`         | `big_integer`, `bigint`     | `BIGINT`               |
//! | `unsignedBigInteger` | `unsigned_big_integer`      | `BIGINT UNSIGNED`      |
//! | `boolean`            | `bool`                      | `BOOLEAN`              |
//! | `decimal`            |                             | `DECIMAL(8,2)`         |
//! | `float`              |                             | `FLOAT`                |
//! | `double`             |                             | `DOUBLE`               |
//! | `date`               |                             | `DATE`                 |
//! | `dateTime`           | `date_time`, `datetime`     | `DATETIME`             |
//! | `timestamp`          |                             | `TIMESTAMP`            |
//! | `time`               |                             | `TIME`                 |
//! | `json`               | `jsonb`                     | `JSON`                 |
//! | `uuid`               |                             | `UUID`                 |
//! | `foreignId`          | `foreign_id`                | `BIGINT UNSIGNED` + FK |
//!
//! # Modifiers
//!
//! - `nullable`, `unique`, `index`, `unsigned`
//! - `default(value)`
//! - `references(table)`, `cascadeOnDelete`, `nullOnDelete` (`foreignId` only)

use std::fmt;

/// Column type tag of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Variable length string
    String,
    /// Fixed length string
    Char,
    /// Text
    Text,
    /// Long text
    LongText,
    /// 32-bit integer
    Integer,
    /// 8-bit integer
    TinyInteger,
    /// 64-bit integer
    BigInteger,
    /// Unsigned 64-bit integer
    UnsignedBigInteger,
    /// Boolean
    Boolean,
    /// Fixed precision decimal
    Decimal,
    /// Single precision float
    Float,
    /// Double precision float
    Double,
    /// Date without time
    Date,
    /// Date and time
    DateTime,
    /// Timestamp
    Timestamp,
    /// Time of day
    Time,
    /// JSON document
    Json,
    /// UUID
    Uuid,
    /// Unsigned big integer constrained to another table's primary key
    ForeignId,
}

impl ColumnType {
    /// Every supported type, in documentation order
    pub const ALL: [Self; 19] = [
        Self::String,
        Self::Char,
        Self::Text,
        Self::LongText,
        Self::Integer,
        Self::TinyInteger,
        Self::BigInteger,
        Self::UnsignedBigInteger,
        Self::Boolean,
        Self::Decimal,
        Self::Float,
        Self::Double,
        Self::Date,
        Self::DateTime,
        Self::Timestamp,
        Self::Time,
        Self::Json,
        Self::Uuid,
        Self::ForeignId,
    ];

    /// Parse a type tag. Matching ignores case and underscores, so
    /// `bigInteger`, `big_integer` and `BIGINTEGER` are the same tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized: String = tag
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        let column_type = match normalized.as_str() {
            "string" => Self::String,
            "char" => Self::Char,
            "text" => Self::Text,
            "longtext" => Self::LongText,
            "integer" | "int" => Self::Integer,
            "tinyinteger" | "tinyint" => Self::TinyInteger,
            "biginteger" | "bigint" => Self::BigInteger,
            "unsignedbiginteger" => Self::UnsignedBigInteger,
            "boolean" | "bool" => Self::Boolean,
            "decimal" => Self::Decimal,
            "float" => Self::Float,
            "double" => Self::Double,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "timestamp" => Self::Timestamp,
            "time" => Self::Time,
            "json" | "jsonb" => Self::Json,
            "uuid" => Self::Uuid,
            "foreignid" => Self::ForeignId,
            _ => return None,
        };
        Some(column_type)
    }

    /// Canonical tag, which is also the migration blueprint method name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Char => "char",
            Self::Text => "text",
            Self::LongText => "longText",
            Self::Integer => "integer",
            Self::TinyInteger => "tinyInteger",
            Self::BigInteger => "bigInteger",
            Self::UnsignedBigInteger => "unsignedBigInteger",
            Self::Boolean => "boolean",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::Double => "double",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::Timestamp => "timestamp",
            Self::Time => "time",
            Self::Json => "json",
            Self::Uuid => "uuid",
            Self::ForeignId => "foreignId",
        }
    }

    /// Comma separated list of canonical tags, used in error messages
    #[must_use]
    pub fn supported_tags() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Eloquent attribute cast, if the type needs one
    #[must_use]
    pub const fn cast(self) -> Option<&'static str> {
        match self {
            Self::Integer | Self::TinyInteger | Self::BigInteger | Self::UnsignedBigInteger => {
                Some("integer")
            }
            Self::Boolean => Some("boolean"),
            Self::Decimal => Some("decimal:2"),
            Self::Float | Self::Double => Some("float"),
            Self::Date => Some("date"),
            Self::DateTime | Self::Timestamp => Some("datetime"),
            Self::Json => Some("array"),
            Self::String
            | Self::Char
            | Self::Text
            | Self::LongText
            | Self::Time
            | Self::Uuid
            | Self::ForeignId => None,
        }
    }

    /// Base validation rule for form requests
    #[must_use]
    pub const fn validation_rule(self) -> &'static str {
        match self {
            Self::String | Self::Char => "string|max:255",
            Self::Text | Self::LongText => "string",
            Self::Integer
            | Self::TinyInteger
            | Self::BigInteger
            | Self::UnsignedBigInteger
            | Self::ForeignId => "integer",
            Self::Boolean => "boolean",
            Self::Decimal | Self::Float | Self::Double => "numeric",
            Self::Date | Self::DateTime | Self::Timestamp => "date",
            Self::Time => "date_format:H:i:s",
            Self::Json => "array",
            Self::Uuid => "uuid",
        }
    }

    /// Faker expression producing a plausible value in factories
    #[must_use]
    pub const fn faker(self) -> &'static str {
        match self {
            Self::String => "fake()->sentence(3)",
            Self::Char => "fake()->lexify('??????????')",
            Self::Text | Self::LongText => "fake()->paragraph()",
            Self::Integer | Self::BigInteger | Self::UnsignedBigInteger | Self::ForeignId => {
                "fake()->randomNumber()"
            }
            Self::TinyInteger => "fake()->numberBetween(0, 127)",
            Self::Boolean => "fake()->boolean()",
            Self::Decimal | Self::Float | Self::Double => "fake()->randomFloat(2, 0, 10000)",
            Self::Date => "fake()->date()",
            Self::DateTime | Self::Timestamp => "fake()->dateTime()",
            Self::Time => "fake()->time()",
            Self::Json => "[]",
            Self::Uuid => "fake()->uuid()",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column modifier attached to a field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnModifier {
    /// Column accepts NULL
    Nullable,
    /// Unique constraint
    Unique,
    /// Plain index
    Index,
    /// Unsigned numeric column
    Unsigned,
    /// Default value, kept verbatim as written between the parentheses
    Default(String),
    /// Foreign key target table
    References(String),
    /// Delete child rows with the parent
    CascadeOnDelete,
    /// Null the key when the parent is deleted
    NullOnDelete,
}

impl ColumnModifier {
    /// Whether the modifier only makes sense on a foreign key column
    #[must_use]
    pub const fn requires_foreign_key(&self) -> bool {
        matches!(
            self,
            Self::References(_) | Self::CascadeOnDelete | Self::NullOnDelete
        )
    }
}

impl fmt::Display for ColumnModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nullable => write!(f, "nullable"),
            Self::Unique => write!(f, "unique"),
            Self::Index => write!(f, "index"),
            Self::Unsigned => write!(f, "unsigned"),
            Self::Default(value) => write!(f, "default({value})"),
            Self::References(table) => write!(f, "references({table})"),
            Self::CascadeOnDelete => write!(f, "cascadeOnDelete"),
            Self::NullOnDelete => write!(f, "nullOnDelete"),
        }
    }
}

/// One column declared in a schema string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Column name
    pub name: String,
    /// Column type
    pub column_type: ColumnType,
    /// Modifiers, in declaration order
    pub modifiers: Vec<ColumnModifier>,
}

impl FieldSpec {
    /// Whether the column is nullable
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.modifiers.contains(&ColumnModifier::Nullable)
    }

    /// Whether the column carries a unique constraint
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.modifiers.contains(&ColumnModifier::Unique)
    }

    /// Declared default value, if any
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.modifiers.iter().find_map(|m| match m {
            ColumnModifier::Default(value) => Some(value.as_str()),
            _ => None,
        })
    }

    /// Explicit foreign key target from `references(table)`
    #[must_use]
    pub fn references(&self) -> Option<&str> {
        self.modifiers.iter().find_map(|m| match m {
            ColumnModifier::References(table) => Some(table.as_str()),
            _ => None,
        })
    }

    /// Whether the column is a foreign key
    #[must_use]
    pub fn is_foreign_key(&self) -> bool {
        self.column_type == ColumnType::ForeignId
    }

    /// Modifiers rendered for display, e.g. `nullable, default(0)`
    #[must_use]
    pub fn modifiers_label(&self) -> String {
        self.modifiers
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.column_type)?;
        for modifier in &self.modifiers {
            write!(f, ":{modifier}")?;
        }
        Ok(())
    }
}
