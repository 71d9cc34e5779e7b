//! Declaration model for the autoinject constructor generator.
//!
//! The types here are what a front-end hands to the resolver: type
//! declarations with their members, constructors and methods. They are
//! read-only once built. [`DeclarationSource`] is the query interface the
//! resolver consumes; [`DeclarationStore`] is the in-memory implementation,
//! loadable from JSON.

pub mod model;
pub use model::{
    Accessibility, ConstructorSignature, InjectedAnnotation, MemberDeclaration, MemberKind,
    MethodSignature, Parameter, TypeDeclaration, TypeId, TypeModifiers,
};

pub mod source;
pub use source::{DeclarationSource, InjectableMember, InjectionOptions};

pub mod store;
pub use store::{DeclarationFile, DeclarationStore, StoreError};

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod model_tests;
#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod store_tests;
