//! Base-dependency forwarding.
//!
//! Decides which descriptors a type must pass to its base constructor:
//! everything the base resolved to when the base is in the batch, or the
//! parameters of the best matching declared constructor when it is not.

use autoinject_common::DiagnosticKind;
use autoinject_decl::{
    Accessibility, ConstructorSignature, DeclarationSource, TypeDeclaration, TypeId,
};
use tracing::trace;

use crate::descriptor::{DependencyDescriptor, DependencyKind, reindex};
use crate::identifier::normalize;
use crate::options::ResolverOptions;
use crate::resolver::ResolvedTypeInfo;
use crate::sink::{DiagnosticSink, report_for};

/// How the base of a type looks from the resolver's point of view.
#[derive(Clone, Copy, Debug)]
pub enum BaseState<'r, 'a> {
    /// No base class.
    NoBase,
    /// Base resolved earlier in this batch.
    Resolved(&'a TypeDeclaration, &'r ResolvedTypeInfo<'a>),
    /// Base is part of the batch but has not been resolved yet.
    Pending(&'a TypeDeclaration),
    /// Base is not part of the batch.
    External(&'a TypeDeclaration),
}

/// Forwarded descriptors, or the signal to come back later.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Forwarding {
    Forwarded(Vec<DependencyDescriptor>),
    NotReady(TypeId),
}

/// Produce the descriptors forwarded to the base constructor of `derived`.
pub fn forward_base_dependencies<S: DeclarationSource>(
    source: &S,
    derived: &TypeDeclaration,
    base: BaseState<'_, '_>,
    options: &ResolverOptions,
    sink: &mut dyn DiagnosticSink,
) -> Forwarding {
    let forwarded = match base {
        BaseState::NoBase => Vec::new(),
        BaseState::Pending(base_decl) => return Forwarding::NotReady(base_decl.id),
        BaseState::Resolved(_, info) => info
            .dependencies
            .iter()
            .map(DependencyDescriptor::as_forwarded)
            .collect(),
        BaseState::External(base_decl) => {
            let constructors = source.declared_constructors(base_decl);
            match select_base_constructor(constructors, options) {
                Some(ctor) => constructor_dependencies(derived, ctor, options, sink),
                None => Vec::new(),
            }
        }
    };
    trace!(
        type_name = %derived.full_name(),
        count = forwarded.len(),
        "forwarded base dependencies"
    );
    Forwarding::Forwarded(reindex(forwarded))
}

/// Pick the base constructor to call: one whose first parameter is the
/// control marker if any, otherwise the one with the most parameters.
/// Private constructors are not callable from a derived type.
pub fn select_base_constructor<'c>(
    constructors: &'c [ConstructorSignature],
    options: &ResolverOptions,
) -> Option<&'c ConstructorSignature> {
    let callable = || {
        constructors
            .iter()
            .filter(|c| c.accessibility != Accessibility::Private)
    };
    let with_marker = callable().filter(|c| {
        c.parameters
            .first()
            .is_some_and(|p| options.is_control_marker_type(&p.ty))
    });
    widest(with_marker).or_else(|| widest(callable()))
}

/// The constructor with the most parameters; the first declared wins ties.
fn widest<'c>(
    candidates: impl Iterator<Item = &'c ConstructorSignature>,
) -> Option<&'c ConstructorSignature> {
    let mut best: Option<&'c ConstructorSignature> = None;
    for ctor in candidates {
        match best {
            Some(current) if current.parameters.len() >= ctor.parameters.len() => {}
            _ => best = Some(ctor),
        }
    }
    best
}

fn constructor_dependencies(
    derived: &TypeDeclaration,
    ctor: &ConstructorSignature,
    options: &ResolverOptions,
    sink: &mut dyn DiagnosticSink,
) -> Vec<DependencyDescriptor> {
    let mut deps = Vec::with_capacity(ctor.parameters.len());
    for parameter in &ctor.parameters {
        let Ok(variable_name) = normalize(&parameter.name) else {
            report_for(
                sink,
                DiagnosticKind::InvalidMemberName,
                derived,
                &[parameter.name.as_str()],
            );
            continue;
        };
        let kind = if options.is_control_marker_type(&parameter.ty) {
            DependencyKind::ControlMarker
        } else {
            DependencyKind::Other
        };
        let descriptor = DependencyDescriptor::new(
            Some(parameter.name.clone()),
            variable_name,
            parameter.ty.clone(),
            kind,
            parameter.is_optional(),
        )
        .as_forwarded();
        if !deps.iter().any(|d: &DependencyDescriptor| d.same_dependency(&descriptor)) {
            deps.push(descriptor);
        }
    }
    deps
}
