//! Identifier normalization for synthesized parameter names.
//!
//! `IntValue` becomes `intValue`, an acronym prefix keeps its last capital
//! at the first lower-case transition (`URLValue` -> `urlValue`), a leading
//! `@` escape is dropped, and names that land on a reserved word are
//! escaped again (`Class` -> `@class`).

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use std::fmt;

/// Escape marker that turns a reserved word into an identifier.
pub const ESCAPE_MARKER: char = '@';

static RESERVED_WORDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
        "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
        "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
        "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
        "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
        "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed",
        "short", "sizeof", "stackalloc", "static", "string", "struct", "switch", "this",
        "throw", "true", "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort",
        "using", "virtual", "void", "volatile", "while",
    ]
    .into_iter()
    .collect()
});

pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(name)
}

/// The name could not be turned into a parameter identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidIdentifier {
    pub name: String,
}

impl fmt::Display for InvalidIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a usable identifier", self.name)
    }
}

impl std::error::Error for InvalidIdentifier {}

/// Normalize a declared member or parameter name into a parameter name.
pub fn normalize(name: &str) -> Result<String, InvalidIdentifier> {
    let body = name.strip_prefix(ESCAPE_MARKER).unwrap_or(name);
    if body.is_empty() {
        return Err(InvalidIdentifier {
            name: name.to_string(),
        });
    }

    let mut out: Vec<char> = Vec::with_capacity(body.len() + 1);
    let mut in_leading_capitals = true;
    for c in body.chars() {
        if in_leading_capitals && !c.is_uppercase() {
            in_leading_capitals = false;
            // `URLValue`: the capital before the first lower-case letter
            // starts the next word.
            if out.len() >= 2 {
                if let Some(last) = out.last_mut() {
                    *last = last.to_uppercase().next().unwrap_or(*last);
                }
            }
        }
        if in_leading_capitals {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    let normalized: String = out.into_iter().collect();
    if is_reserved_word(&normalized) {
        Ok(format!("{ESCAPE_MARKER}{normalized}"))
    } else {
        Ok(normalized)
    }
}
