//! The derived-view engine
//!
//! [`DerivedView`] owns a canonical entity collection and the current
//! [`FilterState`], and hands out [`ViewSnapshot`]s of the entities that pass
//! the filters. The collection is an immutable `Arc<[R]>` that is swapped as a
//! whole under the engine lock, so a reader only ever sees one complete
//! collection.
//!
//! Views are computed lazily on [`DerivedView::view`] and memoized until the
//! collection or the filters actually change. Setters that leave the state
//! unchanged do not bump the [`Revision`] and do not notify subscribers.

use crate::error::ViewError;
use crate::filter::{FilterKey, FilterSchema, FilterState, Selection};
use crate::snapshot::ViewSnapshot;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use taskflow_model::{EntityId, FilterValue, Record};
use tokio::sync::watch;

/// Monotonic change counter of a view's inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Revision(pub u64);

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Issued when a fetch-all starts; presented again when its result arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    /// Sequence number
    #[inline]
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Result of presenting a fetch result to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The collection was replaced (or already equal)
    Applied,
    /// A newer fetch or a local mutation superseded this one; nothing changed
    Stale,
}

impl FetchOutcome {
    /// Whether the result was applied
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

struct Inner<R> {
    collection: Arc<[R]>,
    filters: FilterState,
    revision: Revision,
    cached: Option<ViewSnapshot<R>>,
    /// Last ticket handed out
    issued: u64,
    /// Tickets at or below this are stale
    floor: u64,
}

impl<R: Record> Inner<R> {
    fn bump(&mut self) -> Revision {
        self.revision = Revision(self.revision.0 + 1);
        self.cached = None;
        self.revision
    }

    fn swap(&mut self, entities: Vec<R>) -> bool {
        let entities = dedupe(entities);
        if *self.collection == *entities {
            return false;
        }
        self.collection = entities.into();
        true
    }
}

/// Filtered, order-preserving projection over a canonical collection
pub struct DerivedView<R: Record> {
    schema: FilterSchema<R>,
    inner: Mutex<Inner<R>>,
    changes: watch::Sender<Revision>,
}

impl<R: Record> DerivedView<R> {
    /// Create an empty view with no active filters
    #[must_use]
    pub fn new() -> Self {
        let schema = FilterSchema::for_record();
        let filters = FilterState::cleared(&schema);
        let (changes, _) = watch::channel(Revision::default());
        Self {
            schema,
            inner: Mutex::new(Inner {
                collection: Arc::from(Vec::new()),
                filters,
                revision: Revision::default(),
                cached: None,
                issued: 0,
                floor: 0,
            }),
            changes,
        }
    }

    /// Create a view over an initial collection
    #[must_use]
    pub fn with_collection(entities: Vec<R>) -> Self {
        let view = Self::new();
        view.inner.lock().swap(entities);
        view
    }

    /// Filter schema of the entity kind
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &FilterSchema<R> {
        &self.schema
    }

    /// Resolve a categorical filter name; call once while configuring
    ///
    /// # Errors
    /// Returns [`ViewError::InvalidFilterName`] if `R` does not declare `name`
    #[inline]
    pub fn filter_key(&self, name: &str) -> Result<FilterKey<R>, ViewError> {
        self.schema.key(name)
    }

    /// Replace the free-text query; empty clears it
    ///
    /// Returns whether the filter state changed.
    pub fn set_query(&self, text: &str) -> bool {
        self.mutate(|inner| inner.filters.set_query(text))
    }

    /// Replace one categorical filter
    ///
    /// Returns whether the filter state changed.
    pub fn set_filter(&self, key: FilterKey<R>, selection: impl Into<Selection>) -> bool {
        let selection = selection.into();
        self.mutate(|inner| inner.filters.set_selection(key, selection))
    }

    /// Replace one categorical filter by name; `"all"` clears it
    ///
    /// # Errors
    /// Returns [`ViewError::InvalidFilterName`] if `R` does not declare `name`
    pub fn set_categorical_filter(&self, name: &str, value: &str) -> Result<bool, ViewError> {
        let key = self.schema.key(name)?;
        Ok(self.set_filter(key, Selection::for_field::<R>(key.name(), value)))
    }

    /// Reset the query and every categorical filter
    ///
    /// Returns whether anything was active.
    pub fn clear_filters(&self) -> bool {
        self.mutate(|inner| inner.filters.clear())
    }

    /// Current filter state
    #[must_use]
    pub fn filters(&self) -> FilterState {
        self.inner.lock().filters.clone()
    }

    /// Atomically swap the canonical collection
    ///
    /// Duplicate identifiers are collapsed to their first occurrence.
    /// Returns whether the collection changed; if it did, fetches started
    /// before this call become stale.
    pub fn replace_collection(&self, entities: Vec<R>) -> bool {
        let changed = self.mutate(|inner| {
            if !inner.swap(entities) {
                return false;
            }
            inner.floor = inner.issued;
            true
        });
        if changed {
            tracing::debug!(kind = %R::KIND, "collection replaced");
        }
        changed
    }

    /// Start a fetch-all; pass the ticket to [`DerivedView::apply_fetch`]
    #[must_use]
    pub fn begin_fetch(&self) -> FetchTicket {
        let mut inner = self.inner.lock();
        inner.issued += 1;
        FetchTicket(inner.issued)
    }

    /// Apply a completed fetch unless something newer already landed
    pub fn apply_fetch(&self, ticket: FetchTicket, entities: Vec<R>) -> FetchOutcome {
        let mut inner = self.inner.lock();
        if ticket.0 <= inner.floor {
            tracing::debug!(
                kind = %R::KIND,
                ticket = ticket.0,
                floor = inner.floor,
                "discarding stale fetch result"
            );
            return FetchOutcome::Stale;
        }
        inner.floor = ticket.0;
        let count = entities.len();
        let revision = if inner.swap(entities) {
            Some(inner.bump())
        } else {
            None
        };
        drop(inner);
        if let Some(revision) = revision {
            self.notify(revision);
        }
        tracing::debug!(kind = %R::KIND, ticket = ticket.0, count, "fetch result applied");
        FetchOutcome::Applied
    }

    /// Insert or replace one entity by id; new entities are appended
    ///
    /// Fetches started before a call that changes the collection become stale.
    pub fn upsert(&self, entity: R) -> bool {
        self.mutate(|inner| {
            let id = entity.id();
            let mut next = inner.collection.to_vec();
            match next.iter().position(|e| e.id() == id) {
                Some(pos) if next[pos] == entity => return false,
                Some(pos) => next[pos] = entity,
                None => next.push(entity),
            }
            inner.collection = next.into();
            inner.floor = inner.issued;
            true
        })
    }

    /// Remove one entity by id, returning it
    ///
    /// Fetches started before a call that removes something become stale.
    pub fn remove(&self, id: EntityId) -> Option<R> {
        let mut removed = None;
        self.mutate(|inner| {
            let Some(pos) = inner.collection.iter().position(|e| e.id() == id) else {
                return false;
            };
            let mut next = inner.collection.to_vec();
            removed = Some(next.remove(pos));
            inner.collection = next.into();
            inner.floor = inner.issued;
            true
        });
        removed
    }

    /// Look up one canonical entity
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<R> {
        self.inner
            .lock()
            .collection
            .iter()
            .find(|e| e.id() == id)
            .cloned()
    }

    /// Current canonical collection
    #[must_use]
    pub fn collection(&self) -> Arc<[R]> {
        Arc::clone(&self.inner.lock().collection)
    }

    /// Entities passing the current filters, in canonical order
    #[must_use]
    pub fn view(&self) -> ViewSnapshot<R> {
        let mut inner = self.inner.lock();
        if let Some(cached) = &inner.cached {
            return cached.clone();
        }
        let snapshot = if inner.filters.is_active() {
            let rows: Vec<usize> = inner
                .collection
                .iter()
                .enumerate()
                .filter(|(_, record)| inner.filters.matches(&self.schema, *record))
                .map(|(pos, _)| pos)
                .collect();
            ViewSnapshot::selected(Arc::clone(&inner.collection), rows, inner.revision)
        } else {
            ViewSnapshot::identity(Arc::clone(&inner.collection), inner.revision)
        };
        inner.cached = Some(snapshot.clone());
        snapshot
    }

    /// Current revision
    #[must_use]
    pub fn revision(&self) -> Revision {
        self.inner.lock().revision
    }

    /// Receiver that observes every revision change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Revision> {
        self.changes.subscribe()
    }

    /// Canonical entity count per value of a categorical field, first-seen order
    #[must_use]
    pub fn counts_by(&self, key: FilterKey<R>) -> IndexMap<FilterValue, usize> {
        let collection = self.collection();
        let mut counts = IndexMap::new();
        for value in collection.iter().filter_map(|e| e.filter_value(key.name())) {
            *counts.entry(value).or_insert(0) += 1;
        }
        counts
    }

    fn mutate(&self, f: impl FnOnce(&mut Inner<R>) -> bool) -> bool {
        let revision = {
            let mut inner = self.inner.lock();
            if !f(&mut inner) {
                return false;
            }
            inner.bump()
        };
        self.notify(revision);
        true
    }

    /// Publish `revision` outside the engine lock
    ///
    /// Concurrent mutators may notify out of order; older revisions are dropped.
    fn notify(&self, revision: Revision) {
        self.changes.send_if_modified(|current| {
            if revision > *current {
                *current = revision;
                true
            } else {
                false
            }
        });
    }
}

impl<R: Record> Default for DerivedView<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> fmt::Debug for DerivedView<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("DerivedView")
            .field("kind", &R::KIND)
            .field("len", &inner.collection.len())
            .field("filters", &inner.filters)
            .field("revision", &inner.revision)
            .finish()
    }
}

fn dedupe<R: Record>(entities: Vec<R>) -> Vec<R> {
    let mut seen = HashSet::with_capacity(entities.len());
    let before = entities.len();
    let unique: Vec<R> = entities.into_iter().filter(|e| seen.insert(e.id())).collect();
    if unique.len() != before {
        tracing::warn!(
            kind = %R::KIND,
            dropped = before - unique.len(),
            "duplicate identifiers in collection; keeping first occurrences"
        );
    }
    unique
}
