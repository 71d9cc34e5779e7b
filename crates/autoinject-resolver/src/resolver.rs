//! Batch resolution of constructor dependencies.
//!
//! `BatchResolver` runs a FIFO worklist over the annotated types of one
//! batch. A type whose base is also in the batch waits until the base is
//! resolved; everything else resolves on its first dequeue. The result for
//! each type is the ordered, deduplicated list of constructor dependencies
//! including everything forwarded from the base chain.
//!
//! ## Termination
//!
//! Inheritance is a forest, so each deferral waits on a strictly shorter
//! chain of unresolved ancestors: a type at depth `d` of an annotated chain
//! is dequeued at most `d + 1` times. Malformed input (a cyclic base chain)
//! is caught by the no-progress breaker: once every queued item has been
//! deferred since the last resolution, the remaining types are dropped.
//! Types on a cycle are reported as `CyclicBaseType`, types that merely
//! derive from one as `BaseTypeInCycle`.

use autoinject_common::{DiagnosticKind, limits};
use autoinject_decl::{DeclarationSource, MethodSignature, TypeDeclaration, TypeId};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;
use tracing::{debug, info, info_span, trace, warn};

use crate::collector::{collect_own_dependencies, validate_declaration};
use crate::descriptor::{DependencyDescriptor, reindex};
use crate::forwarder::{BaseState, Forwarding, forward_base_dependencies};
use crate::options::ResolverOptions;
use crate::sink::{DiagnosticSink, report_for};

/// The finished resolution of one type. Immutable once built.
#[derive(Debug)]
pub struct ResolvedTypeInfo<'a> {
    pub declaration: &'a TypeDeclaration,
    pub base_declaration: Option<&'a TypeDeclaration>,
    /// Present when the base was resolved in the same batch.
    pub base: Option<Rc<ResolvedTypeInfo<'a>>>,
    pub is_sealed: bool,
    pub is_abstract: bool,
    pub dependencies: Vec<DependencyDescriptor>,
    /// Own initializer, or the one inherited from the nearest ancestor.
    pub initializer: Option<&'a MethodSignature>,
}

impl<'a> ResolvedTypeInfo<'a> {
    pub fn type_id(&self) -> TypeId {
        self.declaration.id
    }

    pub fn full_name(&self) -> String {
        self.declaration.full_name()
    }

    pub fn dependency(&self, variable_name: &str) -> Option<&DependencyDescriptor> {
        self.dependencies
            .iter()
            .find(|d| d.variable_name == variable_name)
    }
}

/// Why a type went back on the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferReason {
    BaseNotResolved(TypeId),
}

/// Outcome of one attempt at resolving a type.
#[derive(Debug)]
pub enum Step<'a> {
    Resolved(ResolvedTypeInfo<'a>),
    Deferred(DeferReason),
}

/// Unexpected failure while resolving a single type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// A dependency has no declared type to put on the parameter.
    MissingType { dependency: String },
    /// Resolution panicked; carries the panic message.
    Panicked(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::MissingType { dependency } => {
                write!(f, "dependency '{dependency}' has no declared type")
            }
            ResolveError::Panicked(message) => write!(f, "resolution panicked: {message}"),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Dequeue bookkeeping for one batch.
#[derive(Clone, Debug, Default)]
pub struct ResolutionStats {
    dequeues: FxHashMap<TypeId, u32>,
    total_dequeues: u32,
    deferrals: u32,
    failures: u32,
}

impl ResolutionStats {
    fn record_dequeue(&mut self, id: TypeId) {
        *self.dequeues.entry(id).or_default() += 1;
        self.total_dequeues += 1;
    }

    pub fn dequeues_of(&self, id: TypeId) -> u32 {
        self.dequeues.get(&id).copied().unwrap_or(0)
    }

    pub fn max_dequeues(&self) -> u32 {
        self.dequeues.values().copied().max().unwrap_or(0)
    }

    pub fn total_dequeues(&self) -> u32 {
        self.total_dequeues
    }

    pub fn deferrals(&self) -> u32 {
        self.deferrals
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }
}

/// Resolver state for a single batch. Construct one per batch.
pub struct BatchResolver<'a, S: DeclarationSource> {
    source: &'a S,
    options: ResolverOptions,
    queue: VecDeque<&'a TypeDeclaration>,
    known: FxHashSet<TypeId>,
    resolved: FxHashMap<TypeId, Rc<ResolvedTypeInfo<'a>>>,
    stats: ResolutionStats,
}

impl<'a, S: DeclarationSource> BatchResolver<'a, S> {
    pub fn new(source: &'a S, options: ResolverOptions) -> Self {
        Self {
            source,
            options,
            queue: VecDeque::new(),
            known: FxHashSet::default(),
            resolved: FxHashMap::with_capacity_and_hasher(
                limits::RESOLUTION_CACHE_CAPACITY,
                Default::default(),
            ),
            stats: ResolutionStats::default(),
        }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn stats(&self) -> &ResolutionStats {
        &self.stats
    }

    /// Cached result for `id`, if it resolved.
    pub fn get(&self, id: TypeId) -> Option<&Rc<ResolvedTypeInfo<'a>>> {
        self.resolved.get(&id)
    }

    /// Resolve every declaration in `batch`. The returned map follows
    /// submission order and holds only types that resolved.
    pub fn resolve_batch(
        &mut self,
        batch: &[&'a TypeDeclaration],
        sink: &mut dyn DiagnosticSink,
    ) -> IndexMap<TypeId, Rc<ResolvedTypeInfo<'a>>> {
        let _span = info_span!("resolve_batch", types = batch.len()).entered();
        for &decl in batch {
            self.known.insert(decl.id);
            self.queue.push_back(decl);
        }
        self.run(sink);

        batch
            .iter()
            .filter_map(|decl| {
                self.resolved
                    .get(&decl.id)
                    .map(|info| (decl.id, Rc::clone(info)))
            })
            .collect()
    }

    fn run(&mut self, sink: &mut dyn DiagnosticSink) {
        // Consecutive deferrals since the last item left the queue.
        let mut deferred_in_row = 0usize;

        while let Some(decl) = self.queue.pop_front() {
            self.stats.record_dequeue(decl.id);
            if self.resolved.contains_key(&decl.id) {
                deferred_in_row = 0;
                continue;
            }

            let attempt = catch_unwind(AssertUnwindSafe(|| self.resolve_one(decl, &mut *sink)));
            let outcome = match attempt {
                Ok(outcome) => outcome,
                Err(payload) => Err(ResolveError::Panicked(panic_message(&*payload))),
            };

            match outcome {
                Ok(Step::Resolved(info)) => {
                    deferred_in_row = 0;
                    info!(
                        type_name = %decl.full_name(),
                        dependencies = info.dependencies.len(),
                        "resolved"
                    );
                    report_for(sink, DiagnosticKind::TypeProcessed, decl, &[]);
                    self.resolved.insert(decl.id, Rc::new(info));
                }
                Ok(Step::Deferred(reason)) => {
                    debug!(type_name = %decl.full_name(), ?reason, "postponing");
                    self.stats.deferrals += 1;
                    self.queue.push_back(decl);
                    deferred_in_row += 1;
                    if deferred_in_row >= self.queue.len() {
                        self.break_cycle(sink);
                        deferred_in_row = 0;
                    }
                }
                Err(err) => {
                    deferred_in_row = 0;
                    self.fail(decl, &err, sink);
                }
            }
        }
    }

    /// Every queued type is waiting on another queued type: each remaining
    /// base chain runs into a cycle. Types on a cycle are reported as
    /// cyclic; types below one name the base where their chain enters it.
    fn break_cycle(&mut self, sink: &mut dyn DiagnosticSink) {
        let stuck: Vec<&'a TypeDeclaration> = self.queue.drain(..).collect();
        for decl in stuck {
            self.known.remove(&decl.id);
            match self.cycle_entry(decl) {
                Some(entry) if entry.id != decl.id => {
                    let entry_name = entry.full_name();
                    warn!(
                        type_name = %decl.full_name(),
                        base = %entry_name,
                        "base chain enters a cycle, dropping"
                    );
                    report_for(
                        sink,
                        DiagnosticKind::BaseTypeInCycle,
                        decl,
                        &[entry_name.as_str()],
                    );
                }
                _ => {
                    warn!(type_name = %decl.full_name(), "cyclic base chain, dropping");
                    report_for(sink, DiagnosticKind::CyclicBaseType, decl, &[]);
                }
            }
        }
    }

    /// The first type that `decl`'s base chain (starting at `decl`) visits
    /// twice. That is `decl` itself exactly when `decl` is on the cycle.
    fn cycle_entry(&self, decl: &'a TypeDeclaration) -> Option<&'a TypeDeclaration> {
        let mut visited = FxHashSet::default();
        let mut current = decl;
        for _ in 0..limits::MAX_BASE_CHAIN_DEPTH {
            if !visited.insert(current.id) {
                return Some(current);
            }
            current = self.source.base_type(current)?;
        }
        None
    }

    /// Report a failed type and take it out of the batch so that derived
    /// types fall back to inspecting its declaration directly.
    fn fail(&mut self, decl: &'a TypeDeclaration, err: &ResolveError, sink: &mut dyn DiagnosticSink) {
        warn!(type_name = %decl.full_name(), error = %err, "resolution failed");
        self.stats.failures += 1;
        self.known.remove(&decl.id);
        let detail = err.to_string();
        report_for(sink, DiagnosticKind::InternalError, decl, &[detail.as_str()]);
    }

    fn base_state<'r>(&'r self, base: Option<&'a TypeDeclaration>) -> BaseState<'r, 'a> {
        let Some(base) = base else {
            return BaseState::NoBase;
        };
        match self.resolved.get(&base.id) {
            Some(info) => BaseState::Resolved(base, info.as_ref()),
            None if self.known.contains(&base.id) => BaseState::Pending(base),
            None => BaseState::External(base),
        }
    }

    /// One attempt at resolving `decl`. Reads the cache, never writes it.
    fn resolve_one(
        &self,
        decl: &'a TypeDeclaration,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Step<'a>, ResolveError> {
        let source = self.source;
        let base_decl = source.base_type(decl);
        let base = self.base_state(base_decl);

        // Readiness first: a deferred type must not report anything yet.
        let forwarded =
            match forward_base_dependencies(source, decl, base, &self.options, &mut *sink) {
                Forwarding::NotReady(base_id) => {
                    return Ok(Step::Deferred(DeferReason::BaseNotResolved(base_id)));
                }
                Forwarding::Forwarded(deps) => deps,
            };

        let own_initializer = source.initializer_method(decl, &self.options.initializer_method_name);
        let own_is_valid = validate_declaration(source, decl, own_initializer, &mut *sink);
        let initializer = match own_initializer {
            Some(method) if own_is_valid => Some(method),
            _ => self.inherited_initializer(base),
        };

        let own = collect_own_dependencies(source, decl, initializer, &self.options, &mut *sink);
        let dependencies = order_dependencies(merge_dependencies(own, forwarded));
        if let Some(untyped) = dependencies
            .iter()
            .find(|d| d.declared_type.trim().is_empty())
        {
            return Err(ResolveError::MissingType {
                dependency: untyped.variable_name.clone(),
            });
        }

        let base_info = match base {
            BaseState::Resolved(_, info) => Some(Rc::clone(&self.resolved[&info.type_id()])),
            _ => None,
        };
        Ok(Step::Resolved(ResolvedTypeInfo {
            declaration: decl,
            base_declaration: base_decl,
            base: base_info,
            is_sealed: decl.is_sealed(),
            is_abstract: decl.is_abstract(),
            dependencies,
            initializer,
        }))
    }

    /// Initializer inherited through the base chain: the resolved base's
    /// choice when the base is in the batch, otherwise the nearest ancestor
    /// that declares one.
    fn inherited_initializer(&self, base: BaseState<'_, 'a>) -> Option<&'a MethodSignature> {
        let mut current = match base {
            BaseState::NoBase => return None,
            BaseState::Resolved(_, info) => return info.initializer,
            BaseState::Pending(decl) | BaseState::External(decl) => decl,
        };
        let name = self.options.initializer_method_name.as_str();
        let mut visited = FxHashSet::default();
        for _ in 0..limits::MAX_BASE_CHAIN_DEPTH {
            if !visited.insert(current.id) {
                return None;
            }
            if let Some(method) = self.source.initializer_method(current, name) {
                return Some(method);
            }
            current = self.source.base_type(current)?;
        }
        None
    }
}

/// Merge forwarded base descriptors into the own list by variable name. An
/// existing entry keeps its kind and flags and becomes a base argument;
/// anything new is appended as a base argument only.
pub fn merge_dependencies(
    own: Vec<DependencyDescriptor>,
    forwarded: Vec<DependencyDescriptor>,
) -> Vec<DependencyDescriptor> {
    let mut merged = own;
    for dep in forwarded {
        trace!(variable = %dep.variable_name, "merge forwarded dependency");
        match merged.iter().position(|d| d.same_dependency(&dep)) {
            Some(i) => merged[i] = merged[i].as_base_argument(),
            None => merged.push(dep.as_forwarded()),
        }
    }
    reindex(merged)
}

/// Required dependencies first, then optional ones; stable within each
/// group. Indices are reassigned afterwards.
pub fn order_dependencies(mut deps: Vec<DependencyDescriptor>) -> Vec<DependencyDescriptor> {
    deps.sort_by_key(|d| (d.is_optional, d.index));
    reindex(deps)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Resolve a batch with a fresh resolver.
pub fn resolve_batch<'a, S: DeclarationSource>(
    source: &'a S,
    batch: &[&'a TypeDeclaration],
    options: &ResolverOptions,
    sink: &mut dyn DiagnosticSink,
) -> IndexMap<TypeId, Rc<ResolvedTypeInfo<'a>>> {
    BatchResolver::new(source, options.clone()).resolve_batch(batch, sink)
}
