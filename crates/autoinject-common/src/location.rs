//! Source locations attached to declarations and diagnostics.

use serde::{Deserialize, Serialize};

/// Byte-offset location of a declaration inside a source file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub length: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, start: u32, length: u32) -> Self {
        Self {
            file: file.into(),
            start,
            length,
        }
    }

    /// A location that points nowhere (synthesized or unknown declarations).
    pub const fn none() -> Self {
        Self {
            file: String::new(),
            start: 0,
            length: 0,
        }
    }

    pub fn is_none(&self) -> bool {
        self.file.is_empty() && self.length == 0
    }

    /// End offset (exclusive).
    pub const fn end(&self) -> u32 {
        self.start.saturating_add(self.length)
    }
}
