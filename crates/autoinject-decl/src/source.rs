//! Front-end query interface consumed by the resolver.

use crate::model::{
    ConstructorSignature, MemberDeclaration, MemberKind, MethodSignature, TypeDeclaration,
};

/// Options carried by an injection annotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InjectionOptions {
    pub is_optional: bool,
}

/// Capability view over a member declaration.
///
/// The resolver never inspects concrete member representations; it asks
/// these questions instead.
pub trait InjectableMember {
    /// The single name this member declares, if it declares exactly one and
    /// is a field or property.
    fn name(&self) -> Option<&str>;
    fn declared_type(&self) -> &str;
    fn is_static(&self) -> bool;
    fn is_injected(&self) -> bool;
    fn injection_options(&self) -> InjectionOptions;
}

impl InjectableMember for MemberDeclaration {
    fn name(&self) -> Option<&str> {
        match self.kind {
            MemberKind::Field | MemberKind::Property => self.name.as_deref(),
            MemberKind::Method | MemberKind::Other => None,
        }
    }

    fn declared_type(&self) -> &str {
        &self.ty
    }

    fn is_static(&self) -> bool {
        self.is_static
    }

    fn is_injected(&self) -> bool {
        self.injected.is_some()
    }

    fn injection_options(&self) -> InjectionOptions {
        InjectionOptions {
            is_optional: self.injected.is_some_and(|a| a.is_optional),
        }
    }
}

/// Read-only queries over declared types.
///
/// Implementations must be side-effect free: the resolver may ask the same
/// question any number of times during a batch.
pub trait DeclarationSource {
    type Member: InjectableMember;

    /// Every annotated type that belongs to the current compilation, in
    /// declaration order.
    fn annotated_types(&self) -> Vec<&TypeDeclaration>;

    /// The declared base class of `decl`, if it names a known type.
    fn base_type(&self, decl: &TypeDeclaration) -> Option<&TypeDeclaration>;

    fn members<'a>(&'a self, decl: &'a TypeDeclaration) -> &'a [Self::Member];

    fn declared_constructors<'a>(&'a self, decl: &'a TypeDeclaration)
    -> &'a [ConstructorSignature];

    /// The initializer method `decl` itself declares: a non-static method
    /// called `method_name`; among overloads, the one with the most
    /// parameters (first declared wins ties).
    fn initializer_method<'a>(
        &'a self,
        decl: &'a TypeDeclaration,
        method_name: &str,
    ) -> Option<&'a MethodSignature> {
        select_initializer(&decl.methods, method_name)
    }
}

/// Pick the initializer overload out of a method list.
pub fn select_initializer<'a>(
    methods: &'a [MethodSignature],
    method_name: &str,
) -> Option<&'a MethodSignature> {
    let mut best: Option<&MethodSignature> = None;
    for method in methods {
        if method.is_static || method.name != method_name {
            continue;
        }
        match best {
            Some(current) if current.parameters.len() >= method.parameters.len() => {}
            _ => best = Some(method),
        }
    }
    best
}
