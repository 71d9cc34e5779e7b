//! Declaration data model.
//!
//! Declarations are plain data. `TypeDeclaration::id` is assigned by the
//! store that owns the declaration; everything else comes from the
//! front-end (or from JSON).

use autoinject_common::Location;
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize};

/// Identity of a type declaration inside one [`crate::DeclarationStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const NONE: TypeId = TypeId(u32::MAX);

    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

impl Default for TypeId {
    fn default() -> Self {
        Self::NONE
    }
}

bitflags! {
    /// Type-level modifiers relevant to constructor generation.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TypeModifiers: u8 {
        const PARTIAL = 1 << 0;
        const ABSTRACT = 1 << 1;
        const SEALED = 1 << 2;
        const STATIC = 1 << 3;
    }
}

impl TypeModifiers {
    /// Parse a single modifier keyword. Unknown keywords are ignored by the
    /// caller; accessibility keywords are not type modifiers here.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "partial" => Some(Self::PARTIAL),
            "abstract" => Some(Self::ABSTRACT),
            "sealed" => Some(Self::SEALED),
            "static" => Some(Self::STATIC),
            _ => None,
        }
    }
}

/// Accepts `["partial", "sealed"]` and ignores keywords that are not type
/// modifiers (`public`, `internal`, ...).
fn deserialize_modifiers<'de, D>(deserializer: D) -> Result<TypeModifiers, D::Error>
where
    D: Deserializer<'de>,
{
    let keywords = Vec::<String>::deserialize(deserializer)?;
    Ok(keywords
        .iter()
        .filter_map(|k| TypeModifiers::from_keyword(k.trim()))
        .fold(TypeModifiers::empty(), |acc, m| acc | m))
}

/// Declared accessibility of a method or constructor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Accessibility {
    Public,
    Protected,
    ProtectedInternal,
    Internal,
    PrivateProtected,
    #[default]
    Private,
}

impl Accessibility {
    const fn public() -> Self {
        Self::Public
    }

    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }

    /// `protected` and `protected internal` both count as protected.
    pub const fn is_protected(self) -> bool {
        matches!(self, Self::Protected | Self::ProtectedInternal)
    }

    /// Anything that is neither public nor protected.
    pub const fn is_private(self) -> bool {
        !(self.is_public() || self.is_protected())
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::ProtectedInternal => "protected internal",
            Self::Internal => "internal",
            Self::PrivateProtected => "private protected",
            Self::Private => "private",
        }
    }
}

/// A method or constructor parameter.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    /// Source text of an explicit default value (`= 5`), if any.
    #[serde(default)]
    pub default_value: Option<String>,
    /// Optional without an explicit default (`[Optional]`).
    #[serde(default)]
    pub optional: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default_value: None,
            optional: false,
        }
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn marked_optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn has_explicit_default(&self) -> bool {
        self.default_value.is_some()
    }

    /// Callers may omit this argument.
    pub fn is_optional(&self) -> bool {
        self.optional || self.has_explicit_default()
    }
}

/// A declared method.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSignature {
    pub name: String,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub location: Location,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, accessibility: Accessibility) -> Self {
        Self {
            name: name.into(),
            accessibility,
            is_static: false,
            parameters: Vec::new(),
            location: Location::none(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// A declared (or, for types outside the batch, previously generated)
/// constructor.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorSignature {
    #[serde(default = "Accessibility::public")]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl ConstructorSignature {
    pub fn new(accessibility: Accessibility) -> Self {
        Self {
            accessibility,
            parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberKind {
    Field,
    #[default]
    Property,
    Method,
    Other,
}

/// The `[Injected(IsOptional = ...)]` annotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectedAnnotation {
    #[serde(default)]
    pub is_optional: bool,
}

/// A member declaration of a type.
///
/// `name` is `None` for members that do not declare exactly one name, such
/// as a field declaration with several declarators.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDeclaration {
    #[serde(default)]
    pub kind: MemberKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub ty: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub injected: Option<InjectedAnnotation>,
    #[serde(default)]
    pub location: Location,
}

impl MemberDeclaration {
    fn new(kind: MemberKind, name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            ty: ty.into(),
            is_static: false,
            injected: None,
            location: Location::none(),
        }
    }

    pub fn property(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(MemberKind::Property, name, ty)
    }

    pub fn field(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(MemberKind::Field, name, ty)
    }

    #[must_use]
    pub fn injected(mut self, is_optional: bool) -> Self {
        self.injected = Some(InjectedAnnotation { is_optional });
        self
    }

    #[must_use]
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// One type declaration.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDeclaration {
    #[serde(skip)]
    pub id: TypeId,
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, deserialize_with = "deserialize_modifiers")]
    pub modifiers: TypeModifiers,
    /// Base class reference, by full or namespace-relative name.
    #[serde(default)]
    pub base: Option<String>,
    /// Carries the `[AutoInject]` annotation.
    #[serde(default)]
    pub auto_inject: bool,
    /// Declared in a referenced assembly: visible for base lookups but never
    /// part of a resolution batch.
    #[serde(default)]
    pub external: bool,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub usings: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberDeclaration>,
    #[serde(default)]
    pub constructors: Vec<ConstructorSignature>,
    #[serde(default)]
    pub methods: Vec<MethodSignature>,
    #[serde(default)]
    pub location: Location,
}

impl TypeDeclaration {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: TypeId::NONE,
            name: name.into(),
            namespace: namespace.into(),
            modifiers: TypeModifiers::empty(),
            base: None,
            auto_inject: false,
            external: false,
            type_parameters: Vec::new(),
            usings: Vec::new(),
            members: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            location: Location::none(),
        }
    }

    /// `Namespace.Name`, or just `Name` in the global namespace.
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    pub fn is_partial(&self) -> bool {
        self.modifiers.contains(TypeModifiers::PARTIAL)
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(TypeModifiers::ABSTRACT)
    }

    pub fn is_sealed(&self) -> bool {
        self.modifiers.contains(TypeModifiers::SEALED)
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: TypeModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    #[must_use]
    pub fn annotated(mut self) -> Self {
        self.auto_inject = true;
        self
    }

    #[must_use]
    pub fn as_external(mut self) -> Self {
        self.external = true;
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: MemberDeclaration) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub fn with_constructor(mut self, constructor: ConstructorSignature) -> Self {
        self.constructors.push(constructor);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodSignature) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}
