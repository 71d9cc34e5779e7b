//! Diagnostic types and message lookup for the constructor generator.
//!
//! Diagnostics are data: the resolver pushes them into a sink and keeps
//! going. Message templates use `{0}`, `{1}`, ... placeholders that are
//! filled in with [`format_message`].

use serde::Serialize;
use std::fmt;

use crate::location::Location;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

impl DiagnosticCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Suggestion => "suggestion",
            Self::Message => "message",
        }
    }
}

/// The event a diagnostic reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    TypeProcessed,
    TypeMustBePartial,
    TypeHasUserConstructor,
    InitializerWrongAccessibility,
    InvalidMemberName,
    CyclicBaseType,
    BaseTypeInCycle,
    InternalError,
}

impl DiagnosticKind {
    pub const fn code(self) -> u32 {
        match self {
            Self::TypeProcessed => diagnostic_codes::TYPE_PROCESSED,
            Self::TypeMustBePartial => diagnostic_codes::TYPE_MUST_BE_PARTIAL,
            Self::TypeHasUserConstructor => diagnostic_codes::TYPE_HAS_USER_CONSTRUCTOR,
            Self::InitializerWrongAccessibility => {
                diagnostic_codes::INITIALIZER_WRONG_ACCESSIBILITY
            }
            Self::InvalidMemberName => diagnostic_codes::INVALID_MEMBER_NAME,
            Self::CyclicBaseType => diagnostic_codes::CYCLIC_BASE_TYPE,
            Self::BaseTypeInCycle => diagnostic_codes::BASE_TYPE_IN_CYCLE,
            Self::InternalError => diagnostic_codes::INTERNAL_ERROR,
        }
    }

    /// The message definition for this kind. Every kind has one.
    pub fn message(self) -> &'static DiagnosticMessage {
        let code = self.code();
        DIAGNOSTIC_MESSAGES
            .iter()
            .find(|m| m.code == code)
            .unwrap_or(&DIAGNOSTIC_MESSAGES[DIAGNOSTIC_MESSAGES.len() - 1])
    }
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const TYPE_PROCESSED: u32 = 1;
    pub const TYPE_MUST_BE_PARTIAL: u32 = 2;
    pub const TYPE_HAS_USER_CONSTRUCTOR: u32 = 3;
    pub const INITIALIZER_WRONG_ACCESSIBILITY: u32 = 4;
    pub const INVALID_MEMBER_NAME: u32 = 5;
    pub const CYCLIC_BASE_TYPE: u32 = 6;
    pub const BASE_TYPE_IN_CYCLE: u32 = 7;
    pub const INTERNAL_ERROR: u32 = 9999;
}

/// All message templates, ordered by code. `INTERNAL_ERROR` stays last.
pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_PROCESSED,
        category: DiagnosticCategory::Message,
        message: "[AutoInject]: class '{0}' is processed.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_MUST_BE_PARTIAL,
        category: DiagnosticCategory::Error,
        message: "[AutoInject]: Class '{0}' must be declared as partial.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_HAS_USER_CONSTRUCTOR,
        category: DiagnosticCategory::Error,
        message: "[AutoInject]: Class '{0}' shouldn't have any non-generated constructors.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::INITIALIZER_WRONG_ACCESSIBILITY,
        category: DiagnosticCategory::Error,
        message: "[AutoInject]: Class '{0}' {1}(...) method should be either private (on sealed type) or protected.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_MEMBER_NAME,
        category: DiagnosticCategory::Warning,
        message: "[AutoInject]: Class '{0}': '{1}' is not a usable parameter name and is skipped.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::CYCLIC_BASE_TYPE,
        category: DiagnosticCategory::Error,
        message: "[AutoInject]: Class '{0}' has a cyclic base type chain and is skipped.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::BASE_TYPE_IN_CYCLE,
        category: DiagnosticCategory::Error,
        message: "[AutoInject]: Class '{0}' derives from '{1}', whose base type chain is cyclic, and is skipped.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::INTERNAL_ERROR,
        category: DiagnosticCategory::Error,
        message: "[AutoInject]: Internal error while processing '{0}': {1}",
    },
];

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// Display form of a numeric code, e.g. `ALG0002`.
pub fn display_code(code: u32) -> String {
    format!("ALG{code:04}")
}

/// A diagnostic about one declared type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Full name of the offending type.
    pub type_name: String,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a diagnostic of `kind` for `type_name`, filling the message
    /// template with `type_name` followed by `extra_args`.
    #[must_use]
    pub fn new(
        kind: DiagnosticKind,
        type_name: impl Into<String>,
        location: &Location,
        extra_args: &[&str],
    ) -> Self {
        let type_name = type_name.into();
        let definition = kind.message();
        let mut args = Vec::with_capacity(extra_args.len() + 1);
        args.push(type_name.as_str());
        args.extend_from_slice(extra_args);
        let message_text = format_message(definition.message, &args);
        Self {
            kind,
            file: location.file.clone(),
            start: location.start,
            length: location.length,
            message_text,
            category: definition.category,
            code: definition.code,
            type_name,
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    pub fn location(&self) -> Location {
        Location::new(self.file.clone(), self.start, self.length)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.category.as_str(),
            display_code(self.code),
            self.message_text
        )
    }
}
