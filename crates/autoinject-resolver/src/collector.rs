//! Own-dependency collection and declaration validation.
//!
//! A type contributes, in order: the control marker, its non-static
//! injected members, and the parameters of its initializer method.

use autoinject_common::DiagnosticKind;
use autoinject_decl::{DeclarationSource, InjectableMember, MethodSignature, TypeDeclaration};
use tracing::{trace, warn};

use crate::descriptor::{DependencyDescriptor, DependencyKind, reindex};
use crate::identifier::normalize;
use crate::options::ResolverOptions;
use crate::sink::{DiagnosticSink, report_for};

/// Check the structural rules for an annotated type and report every
/// violation. Returns whether `own_initializer` (if any) may be used.
///
/// Violations never stop resolution.
pub fn validate_declaration<S: DeclarationSource>(
    source: &S,
    decl: &TypeDeclaration,
    own_initializer: Option<&MethodSignature>,
    sink: &mut dyn DiagnosticSink,
) -> bool {
    if !decl.is_partial() {
        report_for(sink, DiagnosticKind::TypeMustBePartial, decl, &[]);
    }
    if !source.declared_constructors(decl).is_empty() {
        report_for(sink, DiagnosticKind::TypeHasUserConstructor, decl, &[]);
    }

    let Some(method) = own_initializer else {
        return true;
    };
    let accessibility = method.accessibility;
    let valid = accessibility.is_protected() || (accessibility.is_private() && decl.is_sealed());
    if !valid {
        report_for(
            sink,
            DiagnosticKind::InitializerWrongAccessibility,
            decl,
            &[method.name.as_str()],
        );
    }
    valid
}

/// The control-marker descriptor every annotated type starts with.
///
/// Options are expected to have passed [`ResolverOptions::validate`].
pub fn control_marker(options: &ResolverOptions) -> DependencyDescriptor {
    let variable_name = normalize(&options.control_marker_name).unwrap_or_else(|err| {
        warn!(%err, "unusable control marker name, using `skipInitialize`");
        "skipInitialize".to_string()
    });
    DependencyDescriptor::new(
        Some(options.control_marker_name.clone()),
        variable_name,
        options.control_marker_type.clone(),
        DependencyKind::ControlMarker,
        false,
    )
}

/// Collect the descriptors `decl` contributes directly.
///
/// Names that cannot be normalized are skipped with an `InvalidMemberName`
/// warning. Repeated variable names are folded into their first occurrence.
pub fn collect_own_dependencies<S: DeclarationSource>(
    source: &S,
    decl: &TypeDeclaration,
    initializer: Option<&MethodSignature>,
    options: &ResolverOptions,
    sink: &mut dyn DiagnosticSink,
) -> Vec<DependencyDescriptor> {
    let mut deps = vec![control_marker(options)];

    for member in source.members(decl) {
        if member.is_static() || !member.is_injected() {
            continue;
        }
        let Some(name) = member.name() else {
            report_for(sink, DiagnosticKind::InvalidMemberName, decl, &["<unnamed>"]);
            continue;
        };
        let Ok(variable_name) = normalize(name) else {
            report_for(sink, DiagnosticKind::InvalidMemberName, decl, &[name]);
            continue;
        };
        push_unique(
            &mut deps,
            DependencyDescriptor::new(
                Some(name.to_string()),
                variable_name,
                member.declared_type(),
                DependencyKind::PropertyOrField,
                member.injection_options().is_optional,
            ),
        );
    }

    if let Some(method) = initializer {
        for parameter in &method.parameters {
            let Ok(variable_name) = normalize(&parameter.name) else {
                report_for(sink, DiagnosticKind::InvalidMemberName, decl, &[parameter.name.as_str()]);
                continue;
            };
            let descriptor = DependencyDescriptor::new(
                Some(parameter.name.clone()),
                variable_name,
                parameter.ty.clone(),
                DependencyKind::InitializerArgument,
                parameter.has_explicit_default(),
            )
            .as_initializer_argument();
            push_unique(&mut deps, descriptor);
        }
    }

    trace!(
        type_name = %decl.full_name(),
        count = deps.len(),
        "collected own dependencies"
    );
    reindex(deps)
}

/// Append `descriptor`, or fold it into an existing entry with the same
/// variable name.
pub(crate) fn push_unique(deps: &mut Vec<DependencyDescriptor>, descriptor: DependencyDescriptor) {
    match deps.iter().position(|d| d.same_dependency(&descriptor)) {
        Some(i) => deps[i] = deps[i].merged_with(&descriptor),
        None => deps.push(descriptor),
    }
}
