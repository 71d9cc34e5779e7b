//! Language-neutral constructor descriptions.
//!
//! The synthesizer produces these; the printer walks them and writes source
//! text. Nothing here knows about a resolver or a target syntax, so a
//! constructor can be inspected (or serialized) before it is printed.

use autoinject_decl::Accessibility;
use serde::Serialize;

/// Which of the two generated constructors a `ConstructorSpec` describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstructorVariant {
    /// Runs the initializer after assigning members.
    Full,
    /// Takes the control marker and skips the initializer.
    BypassInitializer,
}

/// An expression that can appear as an argument or default value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum Expr {
    /// A parameter reference.
    Identifier(String),
    /// The default value of a type: `default(T)`.
    Default(String),
}

impl Expr {
    pub fn id(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    pub fn default_of(ty: impl Into<String>) -> Self {
        Self::Default(ty.into())
    }
}

/// `name: value` in an argument list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NamedArgument {
    pub name: String,
    pub value: Expr,
}

impl NamedArgument {
    /// Pass a parameter through under its own name.
    pub fn forward(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            value: Expr::Identifier(name.clone()),
            name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    /// Present for optional parameters.
    pub default: Option<Expr>,
}

/// A statement in a constructor body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Statement {
    /// `this.member = parameter;`
    Assign { member: String, parameter: String },
    /// `if (parameter != default(ty)) this.member = parameter;`
    AssignIfNotDefault {
        member: String,
        parameter: String,
        #[serde(rename = "type")]
        ty: String,
    },
    /// `method(name: value, ...);`
    CallInitializer {
        method: String,
        arguments: Vec<NamedArgument>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorSpec {
    pub type_name: String,
    pub variant: ConstructorVariant,
    pub accessibility: Accessibility,
    pub parameters: Vec<ParameterSpec>,
    /// Arguments of the base constructor call; empty means no call.
    pub base_arguments: Vec<NamedArgument>,
    pub body: Vec<Statement>,
}

impl ConstructorSpec {
    pub fn has_base_call(&self) -> bool {
        !self.base_arguments.is_empty()
    }

    pub fn calls_initializer(&self) -> bool {
        self.body
            .iter()
            .any(|s| matches!(s, Statement::CallInitializer { .. }))
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Both constructors of one type. Sealed types get no bypass variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedConstructors {
    pub full: ConstructorSpec,
    pub bypass: Option<ConstructorSpec>,
}

impl SynthesizedConstructors {
    pub fn iter(&self) -> impl Iterator<Item = &ConstructorSpec> {
        std::iter::once(&self.full).chain(self.bypass.as_ref())
    }
}
