//! Utility Functions
//!
//! Identifier handling shared by the output model and the emitter.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{OutputError, Result};

/// Regex for identifiers that can be written without backticks
static LEGAL_IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_][0-9a-zA-Z_]*$").unwrap());

/// Kotlin hard keywords. These are never valid bare identifiers.
pub const KOTLIN_HARD_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Packages implicitly imported into every Kotlin file.
pub const KOTLIN_DEFAULT_IMPORTS: &[&str] = &[
    "kotlin",
    "kotlin.annotation",
    "kotlin.collections",
    "kotlin.comparisons",
    "kotlin.io",
    "kotlin.ranges",
    "kotlin.sequences",
    "kotlin.text",
];

pub fn is_default_import(package: &str) -> bool {
    KOTLIN_DEFAULT_IMPORTS.contains(&package)
}

/// Whether `name` is a Kotlin hard keyword.
pub fn is_keyword(name: &str) -> bool {
    KOTLIN_HARD_KEYWORDS.contains(&name)
}

/// Whether `name` can be written as-is.
pub fn is_legal_identifier(name: &str) -> bool {
    LEGAL_IDENTIFIER_RE.is_match(name) && !is_keyword(name)
}

/// Escape an identifier for use in generated code.
///
/// Legal identifiers are returned unchanged; anything else is wrapped in backticks.
/// Names containing characters Kotlin forbids even inside backticks are rejected.
pub fn escape_identifier(name: &str, kind: &'static str) -> Result<String> {
    if name.is_empty() {
        return Err(OutputError::EmptyName { kind });
    }
    if is_legal_identifier(name) {
        return Ok(name.to_string());
    }
    if name
        .chars()
        .any(|c| matches!(c, '`' | '\n' | '\r' | '.' | ';' | '[' | ']' | '/' | '<' | '>' | ':' | '\\'))
    {
        return Err(OutputError::IllegalName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(format!("`{}`", name))
}

/// Escape every segment of a dotted package name.
pub fn escape_package(package: &str) -> Result<String> {
    if package.is_empty() {
        return Ok(String::new());
    }
    let segments = package
        .split('.')
        .map(|segment| escape_identifier(segment, "package segment"))
        .collect::<Result<Vec<_>>>()?;
    Ok(segments.join("."))
}

/// Quote a string literal, escaping characters with special meaning in Kotlin strings.
pub fn quote_string(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    result.push('"');
    for ch in value.chars() {
        match ch {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '$' => result.push_str("\\$"),
            _ => result.push(ch),
        }
    }
    result.push('"');
    result
}

/// Last segment of a dotted name: `a.b.Name` -> `Name`.
pub fn simple_name_of(qualified_name: &str) -> &str {
    qualified_name.rsplit('.').next().unwrap_or(qualified_name)
}

/// Relative file path of a generated source: `a/b/Name.kt`.
pub fn source_file_path(package: &str, name: &str) -> String {
    if package.is_empty() {
        format!("{}.kt", name)
    } else {
        format!("{}/{}.kt", package.replace('.', "/"), name)
    }
}
