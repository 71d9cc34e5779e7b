//! Constructor synthesis and source emission.
//!
//! [`synthesizer`] turns a resolved dependency list into language-neutral
//! constructor descriptions ([`ir`]); [`printer`] renders them as a C#
//! partial class.

pub mod ir;
pub mod output;
pub mod printer;
pub mod synthesizer;

pub use ir::{
    ConstructorSpec, ConstructorVariant, Expr, NamedArgument, ParameterSpec, Statement,
    SynthesizedConstructors,
};
pub use output::{GeneratedFile, generate, generate_batch};
pub use printer::{GENERATED_HEADER, SourcePrinter, hint_name, print_unit};
pub use synthesizer::synthesize_constructors;

#[cfg(test)]
#[path = "tests/synthesizer_tests.rs"]
mod synthesizer_tests;
#[cfg(test)]
#[path = "tests/printer_tests.rs"]
mod printer_tests;
