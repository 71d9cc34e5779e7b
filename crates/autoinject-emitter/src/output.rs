//! Generated files for a resolved batch.

use autoinject_decl::TypeId;
use autoinject_resolver::ResolvedTypeInfo;
use indexmap::IndexMap;
use serde::Serialize;
use std::rc::Rc;
use tracing::info_span;

use crate::ir::SynthesizedConstructors;
use crate::printer::{hint_name, print_unit};
use crate::synthesizer::synthesize_constructors;

/// One generated source file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFile {
    pub hint_name: String,
    pub type_name: String,
    pub constructors: SynthesizedConstructors,
    pub source: String,
}

pub fn generate(info: &ResolvedTypeInfo<'_>) -> GeneratedFile {
    let constructors = synthesize_constructors(info);
    let source = print_unit(info.declaration, &constructors);
    GeneratedFile {
        hint_name: hint_name(info.declaration),
        type_name: info.full_name(),
        constructors,
        source,
    }
}

/// Generate a file per resolved type, in batch order.
pub fn generate_batch(results: &IndexMap<TypeId, Rc<ResolvedTypeInfo<'_>>>) -> Vec<GeneratedFile> {
    let _span = info_span!("generate_batch", types = results.len()).entered();
    results.values().map(|info| generate(info)).collect()
}
