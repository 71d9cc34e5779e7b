//! In-memory declaration store.
//!
//! The store is the JSON front-end: declaration files deserialize into
//! [`DeclarationFile`] and are merged into one store. Types are identified by
//! their position in the store; full names map back to ids.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

use crate::model::{ConstructorSignature, MemberDeclaration, TypeDeclaration, TypeId};
use crate::source::DeclarationSource;

/// Root object of a declaration JSON file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationFile {
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

/// Errors raised while populating a store.
#[derive(Debug)]
pub enum StoreError {
    Json(serde_json::Error),
    DuplicateType(String),
    EmptyTypeName,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Json(err) => write!(f, "invalid declaration file: {err}"),
            StoreError::DuplicateType(name) => write!(f, "type '{name}' is declared twice"),
            StoreError::EmptyTypeName => write!(f, "type declaration without a name"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Json(err)
    }
}

#[derive(Debug, Default)]
pub struct DeclarationStore {
    types: Vec<TypeDeclaration>,
    by_name: FxHashMap<String, TypeId>,
}

impl DeclarationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one declaration file into a fresh store.
    pub fn from_json_str(text: &str) -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.extend_from_json_str(text)?;
        Ok(store)
    }

    /// Parse one declaration file and add its types to this store.
    pub fn extend_from_json_str(&mut self, text: &str) -> Result<Vec<TypeId>, StoreError> {
        let file: DeclarationFile = serde_json::from_str(text)?;
        let mut ids = Vec::with_capacity(file.types.len());
        for decl in file.types {
            ids.push(self.add(decl)?);
        }
        Ok(ids)
    }

    /// Add a declaration, assigning its id.
    pub fn add(&mut self, mut decl: TypeDeclaration) -> Result<TypeId, StoreError> {
        if decl.name.trim().is_empty() {
            return Err(StoreError::EmptyTypeName);
        }
        let full_name = decl.full_name();
        if self.by_name.contains_key(&full_name) {
            return Err(StoreError::DuplicateType(full_name));
        }
        let id = TypeId(self.types.len() as u32);
        decl.id = id;
        debug!(type_name = %full_name, id = id.0, "store: add type");
        self.by_name.insert(full_name, id);
        self.types.push(decl);
        Ok(id)
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeDeclaration> {
        self.types.get(id.0 as usize)
    }

    pub fn lookup(&self, full_name: &str) -> Option<&TypeDeclaration> {
        self.by_name.get(full_name).and_then(|&id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.types.iter()
    }

    /// Resolve a base reference the way the host language would: as a full
    /// name first, then relative to the referencing type's namespace and
    /// each enclosing namespace.
    fn resolve_reference(&self, from: &TypeDeclaration, reference: &str) -> Option<&TypeDeclaration> {
        let reference = reference.trim().trim_start_matches("global::");
        if let Some(found) = self.lookup(reference) {
            return Some(found);
        }
        let mut namespace = from.namespace.as_str();
        while !namespace.is_empty() {
            if let Some(found) = self.lookup(&format!("{namespace}.{reference}")) {
                return Some(found);
            }
            namespace = match namespace.rfind('.') {
                Some(dot) => &namespace[..dot],
                None => "",
            };
        }
        None
    }
}

impl DeclarationSource for DeclarationStore {
    type Member = MemberDeclaration;

    fn annotated_types(&self) -> Vec<&TypeDeclaration> {
        self.types
            .iter()
            .filter(|t| t.auto_inject && !t.external)
            .collect()
    }

    fn base_type(&self, decl: &TypeDeclaration) -> Option<&TypeDeclaration> {
        let reference = decl.base.as_deref()?;
        let base = self.resolve_reference(decl, reference);
        if base.is_none() {
            debug!(
                type_name = %decl.full_name(),
                base = reference,
                "store: base type not found, treating as no base"
            );
        }
        base
    }

    fn members<'a>(&'a self, decl: &'a TypeDeclaration) -> &'a [MemberDeclaration] {
        &decl.members
    }

    fn declared_constructors<'a>(
        &'a self,
        decl: &'a TypeDeclaration,
    ) -> &'a [ConstructorSignature] {
        &decl.constructors
    }
}
