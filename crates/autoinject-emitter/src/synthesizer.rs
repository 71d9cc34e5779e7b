//! Constructor synthesis from a resolved dependency list.

use autoinject_decl::Accessibility;
use autoinject_resolver::{DependencyDescriptor, DependencyKind, ResolvedTypeInfo};
use tracing::debug;

use crate::ir::{
    ConstructorSpec, ConstructorVariant, Expr, NamedArgument, ParameterSpec, Statement,
    SynthesizedConstructors,
};

/// Build the full constructor and, unless the type is sealed, the
/// bypass-initializer constructor.
pub fn synthesize_constructors(info: &ResolvedTypeInfo<'_>) -> SynthesizedConstructors {
    let full = synthesize(info, ConstructorVariant::Full);
    let bypass = (!info.is_sealed).then(|| synthesize(info, ConstructorVariant::BypassInitializer));
    debug!(
        type_name = %info.full_name(),
        parameters = full.parameters.len(),
        bypass = bypass.is_some(),
        "synthesized constructors"
    );
    SynthesizedConstructors { full, bypass }
}

fn accessibility(info: &ResolvedTypeInfo<'_>, variant: ConstructorVariant) -> Accessibility {
    match variant {
        ConstructorVariant::Full if info.is_abstract => Accessibility::Protected,
        ConstructorVariant::Full => Accessibility::Public,
        ConstructorVariant::BypassInitializer if info.is_sealed => Accessibility::Private,
        ConstructorVariant::BypassInitializer => Accessibility::Protected,
    }
}

fn synthesize(info: &ResolvedTypeInfo<'_>, variant: ConstructorVariant) -> ConstructorSpec {
    let deps = &info.dependencies;
    let exposes_marker = variant == ConstructorVariant::BypassInitializer;

    let parameters = deps
        .iter()
        .filter(|d| exposes_marker || !d.is_control_marker())
        .map(parameter)
        .collect();

    let base_arguments = deps
        .iter()
        .filter(|d| d.is_base_constructor_argument)
        .map(|d| NamedArgument {
            name: d.variable_name.clone(),
            // The leaf picks the variant; every base runs its bypass one.
            value: if d.is_control_marker() {
                Expr::default_of(&d.declared_type)
            } else {
                Expr::id(&d.variable_name)
            },
        })
        .collect();

    let mut body: Vec<Statement> = deps.iter().filter_map(assignment).collect();
    if variant == ConstructorVariant::Full
        && let Some(method) = info.initializer
    {
        body.push(Statement::CallInitializer {
            method: method.name.clone(),
            arguments: deps
                .iter()
                .filter(|d| d.is_initializer_argument)
                .map(|d| NamedArgument::forward(&d.variable_name))
                .collect(),
        });
    }

    ConstructorSpec {
        type_name: info.declaration.name.clone(),
        variant,
        accessibility: accessibility(info, variant),
        parameters,
        base_arguments,
        body,
    }
}

fn parameter(dep: &DependencyDescriptor) -> ParameterSpec {
    ParameterSpec {
        name: dep.variable_name.clone(),
        ty: dep.declared_type.clone(),
        default: dep
            .is_optional
            .then(|| Expr::default_of(&dep.declared_type)),
    }
}

/// Own injected members are assigned here; base-forwarded ones are the
/// base constructor's job.
fn assignment(dep: &DependencyDescriptor) -> Option<Statement> {
    if dep.kind != DependencyKind::PropertyOrField || dep.is_base_constructor_argument {
        return None;
    }
    let member = dep.name.clone().unwrap_or_else(|| dep.variable_name.clone());
    let parameter = dep.variable_name.clone();
    Some(if dep.is_optional {
        Statement::AssignIfNotDefault {
            member,
            parameter,
            ty: dep.declared_type.clone(),
        }
    } else {
        Statement::Assign { member, parameter }
    })
}
