//! Constructor dependency resolution.
//!
//! Given the annotated types of one compilation, works out which
//! constructor parameters each type needs (its own injected members, its
//! initializer's parameters, and everything its base constructors need) and
//! in which order.
//!
//! Pipeline, leaves first:
//! - [`identifier`]: declared names -> parameter names
//! - [`collector`]: a type's own dependencies, plus structural validation
//! - [`forwarder`]: dependencies forwarded to the base constructor
//! - [`resolver`]: the batch worklist that merges, orders and caches

pub mod collector;
pub mod descriptor;
pub mod forwarder;
pub mod identifier;
pub mod options;
pub mod resolver;
pub mod sink;

pub use collector::{collect_own_dependencies, control_marker, validate_declaration};
pub use descriptor::{DependencyDescriptor, DependencyKind};
pub use forwarder::{BaseState, Forwarding, forward_base_dependencies, select_base_constructor};
pub use identifier::{InvalidIdentifier, normalize};
pub use options::ResolverOptions;
pub use resolver::{
    BatchResolver, DeferReason, ResolutionStats, ResolveError, ResolvedTypeInfo, Step,
    merge_dependencies, order_dependencies, resolve_batch,
};
pub use sink::DiagnosticSink;

// Shared declarations for the unit tests below
#[cfg(test)]
#[path = "tests/test_fixtures.rs"]
pub(crate) mod test_fixtures;

#[cfg(test)]
#[path = "tests/identifier_tests.rs"]
mod identifier_tests;
#[cfg(test)]
#[path = "tests/collector_tests.rs"]
mod collector_tests;
#[cfg(test)]
#[path = "tests/forwarder_tests.rs"]
mod forwarder_tests;
#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod resolver_tests;
