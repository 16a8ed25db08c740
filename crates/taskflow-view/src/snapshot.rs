//! Immutable view snapshots

use crate::engine::Revision;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;
use taskflow_model::{EntityId, Record};

#[derive(Clone)]
enum Rows {
    /// Every source entity, no filter active
    All,
    /// Positions into the source, ascending
    Selected(Arc<[usize]>),
}

/// Entities that passed the filters at one revision, in canonical order
///
/// Cloning is cheap: the snapshot shares the collection it was computed from
/// and never observes later swaps.
#[derive(Clone)]
pub struct ViewSnapshot<R> {
    source: Arc<[R]>,
    rows: Rows,
    revision: Revision,
}

impl<R: Record> ViewSnapshot<R> {
    pub(crate) fn identity(source: Arc<[R]>, revision: Revision) -> Self {
        Self {
            source,
            rows: Rows::All,
            revision,
        }
    }

    pub(crate) fn selected(source: Arc<[R]>, rows: Vec<usize>, revision: Revision) -> Self {
        Self {
            source,
            rows: Rows::Selected(rows.into()),
            revision,
        }
    }

    /// Number of entities in the view
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.rows {
            Rows::All => self.source.len(),
            Rows::Selected(rows) => rows.len(),
        }
    }

    /// Whether the view is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entity at `index` in view order
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&R> {
        match &self.rows {
            Rows::All => self.source.get(index),
            Rows::Selected(rows) => rows.get(index).map(|&pos| &self.source[pos]),
        }
    }

    /// Iterate in view order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, R> {
        Iter {
            snapshot: self,
            front: 0,
            back: self.len(),
        }
    }

    /// Identifiers in view order
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        self.iter().map(Record::id).collect()
    }

    /// Owned copy of the entities
    #[must_use]
    pub fn to_vec(&self) -> Vec<R> {
        self.iter().cloned().collect()
    }

    /// Whether no filter was active when this view was computed
    #[inline]
    #[must_use]
    pub fn is_identity(&self) -> bool {
        matches!(self.rows, Rows::All)
    }

    /// Revision of the inputs this view was computed from
    #[inline]
    #[must_use]
    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Whether both snapshots share one computation
    #[must_use]
    pub fn same_rows(&self, other: &Self) -> bool {
        if !Arc::ptr_eq(&self.source, &other.source) {
            return false;
        }
        match (&self.rows, &other.rows) {
            (Rows::All, Rows::All) => true,
            (Rows::Selected(a), Rows::Selected(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<R: Record> PartialEq for ViewSnapshot<R> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<R: Record> fmt::Debug for ViewSnapshot<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewSnapshot")
            .field("revision", &self.revision)
            .field("len", &self.len())
            .field("ids", &self.ids())
            .finish()
    }
}

impl<'a, R: Record> IntoIterator for &'a ViewSnapshot<R> {
    type Item = &'a R;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`ViewSnapshot`]
pub struct Iter<'a, R> {
    snapshot: &'a ViewSnapshot<R>,
    front: usize,
    back: usize,
}

impl<'a, R: Record> Iterator for Iter<'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let item = self.snapshot.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<R: Record> DoubleEndedIterator for Iter<'_, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.snapshot.get(self.back)
    }
}

impl<R: Record> ExactSizeIterator for Iter<'_, R> {}

impl<R: Record> FusedIterator for Iter<'_, R> {}
