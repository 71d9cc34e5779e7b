//! Resolver options.

use crate::identifier::{InvalidIdentifier, normalize};

/// Names the resolver matches against and synthesizes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Name of the post-construction hook method.
    pub initializer_method_name: String,
    /// Fully qualified type of the control-marker parameter.
    pub control_marker_type: String,
    /// Declared name of the control-marker parameter.
    pub control_marker_name: String,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            initializer_method_name: "Initialize".to_string(),
            control_marker_type: "AutoInject.SkipInitialize".to_string(),
            control_marker_name: "@skipInitialize".to_string(),
        }
    }
}

impl ResolverOptions {
    /// Both configured names must normalize to usable identifiers.
    pub fn validate(&self) -> Result<(), InvalidIdentifier> {
        normalize(&self.initializer_method_name)?;
        normalize(&self.control_marker_name)?;
        Ok(())
    }

    /// Whether `type_name` refers to the control-marker type. Qualified and
    /// unqualified spellings match (`global::AutoInject.SkipInitialize`,
    /// `SkipInitialize`).
    pub fn is_control_marker_type(&self, type_name: &str) -> bool {
        same_type_name(type_name, &self.control_marker_type)
    }
}

fn same_type_name(a: &str, b: &str) -> bool {
    let a = a.trim().trim_start_matches("global::");
    let b = b.trim().trim_start_matches("global::");
    if a == b {
        return true;
    }
    if a.contains('.') && b.contains('.') {
        return false;
    }
    let last = |s: &str| s.rsplit('.').next().unwrap_or(s).to_string();
    last(a) == last(b)
}
