//! Dependency descriptors: one constructor-level dependency of a type.
//!
//! Descriptors are values. Every "update" returns a new descriptor so that
//! a list published in a [`crate::ResolvedTypeInfo`] never changes.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DependencyKind {
    /// The synthetic flag that selects the bypass-initializer constructor.
    ControlMarker,
    /// An injected field or property, assigned in the constructor body.
    PropertyOrField,
    /// A parameter of the initializer method.
    InitializerArgument,
    /// Anything else, e.g. a parameter forwarded to a base constructor.
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DependencyDescriptor {
    /// Declared member or parameter name, as written.
    pub name: Option<String>,
    /// Normalized parameter name; two descriptors are the same dependency iff
    /// these are equal.
    pub variable_name: String,
    pub declared_type: String,
    pub kind: DependencyKind,
    pub is_optional: bool,
    pub is_initializer_argument: bool,
    pub is_base_constructor_argument: bool,
    pub index: u32,
}

impl DependencyDescriptor {
    pub fn new(
        name: Option<String>,
        variable_name: String,
        declared_type: impl Into<String>,
        kind: DependencyKind,
        is_optional: bool,
    ) -> Self {
        Self {
            name,
            variable_name,
            declared_type: declared_type.into(),
            kind,
            is_optional,
            is_initializer_argument: false,
            is_base_constructor_argument: false,
            index: 0,
        }
    }

    pub fn is_control_marker(&self) -> bool {
        self.kind == DependencyKind::ControlMarker
    }

    pub fn same_dependency(&self, other: &DependencyDescriptor) -> bool {
        self.variable_name == other.variable_name
    }

    #[must_use]
    pub fn as_initializer_argument(&self) -> Self {
        Self {
            is_initializer_argument: true,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn as_base_argument(&self) -> Self {
        Self {
            is_base_constructor_argument: true,
            ..self.clone()
        }
    }

    /// This dependency as a derived type sees it: an argument to the base
    /// constructor. The base's initializer role does not carry over.
    #[must_use]
    pub fn as_forwarded(&self) -> Self {
        Self {
            is_initializer_argument: false,
            is_base_constructor_argument: true,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_index(&self, index: u32) -> Self {
        Self {
            index,
            ..self.clone()
        }
    }

    /// Fold another occurrence of the same dependency into this one: kind,
    /// optionality, name and type stay; the role flags accumulate.
    #[must_use]
    pub fn merged_with(&self, other: &DependencyDescriptor) -> Self {
        Self {
            is_initializer_argument: self.is_initializer_argument || other.is_initializer_argument,
            is_base_constructor_argument: self.is_base_constructor_argument
                || other.is_base_constructor_argument,
            ..self.clone()
        }
    }
}

/// Assign sequential indices in list order.
pub fn reindex(descriptors: Vec<DependencyDescriptor>) -> Vec<DependencyDescriptor> {
    descriptors
        .into_iter()
        .enumerate()
        .map(|(i, d)| DependencyDescriptor {
            index: i as u32,
            ..d
        })
        .collect()
}
