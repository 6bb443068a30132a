//! Reserved identifiers of the target language
//!
//! Generated classes and columns end up as PHP identifiers, so a model or
//! field named after a PHP keyword would produce code that does not parse.

/// PHP keywords and compile-time constructs that cannot name a class.
pub const RESERVED_NAMES: &[&str] = &[
    "__halt_compiler",
    "abstract",
    "and",
    "array",
    "as",
    "break",
    "callable",
    "case",
    "catch",
    "class",
    "clone",
    "const",
    "continue",
    "declare",
    "default",
    "die",
    "do",
    "echo",
    "else",
    "elseif",
    "empty",
    "enddeclare",
    "endfor",
    "endforeach",
    "endif",
    "endswitch",
    "endwhile",
    "eval",
    "exit",
    "extends",
    "final",
    "finally",
    "fn",
    "for",
    "foreach",
    "function",
    "global",
    "goto",
    "if",
    "implements",
    "include",
    "include_once",
    "instanceof",
    "insteadof",
    "interface",
    "isset",
    "list",
    "namespace",
    "new",
    "or",
    "print",
    "private",
    "protected",
    "public",
    "require",
    "require_once",
    "return",
    "static",
    "switch",
    "throw",
    "trait",
    "try",
    "unset",
    "use",
    "var",
    "while",
    "xor",
    "yield",
];

/// Returns true when `name` matches a reserved word, ignoring case.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    let lowered = name.to_lowercase();
    RESERVED_NAMES.contains(&lowered.as_str())
}

/// Returns true when `name` is a plain identifier: a letter or underscore
/// followed by letters, digits or underscores.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
