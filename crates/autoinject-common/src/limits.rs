//! Centralized limits and thresholds.
//!
//! The resolver itself needs no depth limits: inheritance is a forest and the
//! worklist carries its own no-progress breaker. The values here bound the
//! front-end helpers that walk base chains outside the worklist.

/// Maximum number of ancestors visited when looking up an inherited
/// initializer method through the front-end.
///
/// Base chains deeper than this are treated as if no ancestor declared an
/// initializer. Cyclic chains are caught earlier by the visited set.
pub const MAX_BASE_CHAIN_DEPTH: usize = 256;

/// Initial capacity of the per-batch resolution cache.
pub const RESOLUTION_CACHE_CAPACITY: usize = 64;
