//! Memoization of transitive hierarchy queries.
//!
//! The cache belongs to a [`ClassHierarchy`](crate::ClassHierarchy) and so
//! shares its lifetime: it is dropped with the hierarchy and cleared every
//! time a type is added, because a previously missing ancestor may resolve
//! afterwards. Failures are memoized alongside successes.

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;

use crate::{ClassIdx, HierarchyError};

/// Which transitive query an entry answers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// The type followed by every superclass up to the root.
    SuperclassChain,
    /// Direct interfaces of every type on the superclass chain.
    AllInterfaces,
    /// `AllInterfaces` plus everything those interfaces extend.
    InterfaceClosure,
}

type Answer = Result<Vec<ClassIdx>, HierarchyError>;

/// Snapshot of cache effectiveness.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

/// Concurrent memo table keyed by `(ClassIdx, QueryKind)`.
#[derive(Debug)]
pub struct HierarchyCache {
    entries: DashMap<(ClassIdx, QueryKind), Answer, FxBuildHasher>,
    enabled: bool,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl HierarchyCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            enabled,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return the memoized answer for `(class, kind)` or compute and store it.
    ///
    /// `compute` may itself consult the cache for other keys; no shard lock
    /// is held while it runs.
    pub(crate) fn get_or_compute(
        &self,
        class: ClassIdx,
        kind: QueryKind,
        compute: impl FnOnce() -> Answer,
    ) -> Answer {
        if !self.enabled {
            return compute();
        }

        let key = (class, kind);
        if let Some(hit) = self.entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(?class, ?kind, "hierarchy cache hit");
            return hit.value().clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let answer = compute();
        self.entries.insert(key, answer.clone());
        answer
    }

    /// Drop every entry. Counters are kept.
    pub(crate) fn clear(&self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}

impl Default for HierarchyCache {
    fn default() -> Self {
        Self::new(true)
    }
}
