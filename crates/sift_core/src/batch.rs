//! Coalescing queue for structural mutations
//!
//! Inserting, removing or reordering nodes never reacts immediately. Each
//! change is recorded here, and the owner drains the whole set once the
//! current synchronous turn is over (its "microtask checkpoint"). Any number
//! of mutations made in one turn therefore produce exactly one
//! [`BatchRecord`] and one reconciliation pass.
//!
//! Explicit batches nest: while [`MutationBatch::batch_start`] is open,
//! [`MutationBatch::take`] yields nothing, so a checkpoint reached in the
//! middle of a batch can't observe a half-applied change.

use slotmap::Key;
use smallvec::SmallVec;
use std::cell::Cell;

/// A single structural change to an ordered collection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation<K: Key> {
    /// A new node was inserted
    Inserted(K),
    /// A node was removed (and destroyed)
    Removed {
        id: K,
        /// The node carried the selection at the moment it was removed
        was_selected: bool,
    },
    /// An existing node changed position; observed as a re-insertion
    Moved(K),
}

/// Everything that changed during one turn
#[derive(Clone, Debug)]
pub struct BatchRecord<K: Key> {
    mutations: SmallVec<[Mutation<K>; 8]>,
}

impl<K: Key> BatchRecord<K> {
    /// Nodes that were inserted or re-inserted during the turn
    pub fn inserted(&self) -> impl Iterator<Item = K> + '_ {
        self.mutations.iter().filter_map(|m| match *m {
            Mutation::Inserted(id) | Mutation::Moved(id) => Some(id),
            Mutation::Removed { .. } => None,
        })
    }

    /// Nodes that were removed during the turn
    pub fn removed(&self) -> impl Iterator<Item = K> + '_ {
        self.mutations.iter().filter_map(|m| match *m {
            Mutation::Removed { id, .. } => Some(id),
            _ => None,
        })
    }

    /// Whether the selected node was among the removed ones
    pub fn selected_removed(&self) -> bool {
        self.mutations
            .iter()
            .any(|m| matches!(m, Mutation::Removed { was_selected: true, .. }))
    }

    /// Number of raw mutations coalesced into this record
    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn mutations(&self) -> &[Mutation<K>] {
        &self.mutations
    }
}

/// Pending structural mutations awaiting the next checkpoint
#[derive(Debug)]
pub struct MutationBatch<K: Key> {
    pending: SmallVec<[Mutation<K>; 8]>,
    /// Current batch depth (> 0 means we're in an explicit batch)
    batch_depth: Cell<u32>,
    /// Number of records handed out so far
    flushed: u64,
}

impl<K: Key> Default for MutationBatch<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key> MutationBatch<K> {
    pub fn new() -> Self {
        Self {
            pending: SmallVec::new(),
            batch_depth: Cell::new(0),
            flushed: 0,
        }
    }

    /// Record a mutation for the next checkpoint
    pub fn record(&mut self, mutation: Mutation<K>) {
        tracing::trace!(?mutation, "mutation recorded");
        self.pending.push(mutation);
    }

    /// Whether anything is waiting for a checkpoint
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Start an explicit batch; checkpoints are deferred until it ends
    pub fn batch_start(&self) {
        self.batch_depth.set(self.batch_depth.get() + 1);
    }

    /// End an explicit batch
    ///
    /// Returns `true` when the outermost batch closed, i.e. the owner should
    /// run its checkpoint now.
    pub fn batch_end(&self) -> bool {
        let depth = self.batch_depth.get();
        if depth > 0 {
            self.batch_depth.set(depth - 1);
            return depth == 1;
        }
        false
    }

    /// Whether an explicit batch is open
    pub fn in_batch(&self) -> bool {
        self.batch_depth.get() > 0
    }

    /// Drain the pending mutations as one record
    ///
    /// Returns `None` when nothing changed or while a batch is still open.
    pub fn take(&mut self) -> Option<BatchRecord<K>> {
        if self.in_batch() || self.pending.is_empty() {
            return None;
        }
        self.flushed += 1;
        Some(BatchRecord {
            mutations: std::mem::take(&mut self.pending),
        })
    }

    /// Number of records drained so far
    pub fn flush_count(&self) -> u64 {
        self.flushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::{DefaultKey, SlotMap};

    fn keys(n: usize) -> Vec<DefaultKey> {
        let mut map: SlotMap<DefaultKey, ()> = SlotMap::new();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_mutations_coalesce_into_one_record() {
        let k = keys(3);
        let mut batch = MutationBatch::new();

        batch.record(Mutation::Inserted(k[0]));
        batch.record(Mutation::Inserted(k[1]));
        batch.record(Mutation::Removed {
            id: k[2],
            was_selected: false,
        });

        let record = batch.take().unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record.inserted().collect::<Vec<_>>(), vec![k[0], k[1]]);
        assert_eq!(record.removed().collect::<Vec<_>>(), vec![k[2]]);
        assert!(!record.selected_removed());

        assert!(batch.take().is_none());
        assert_eq!(batch.flush_count(), 1);
    }

    #[test]
    fn test_moved_counts_as_inserted() {
        let k = keys(1);
        let mut batch = MutationBatch::new();
        batch.record(Mutation::Moved(k[0]));

        let record = batch.take().unwrap();
        assert_eq!(record.inserted().count(), 1);
        assert_eq!(record.removed().count(), 0);
    }

    #[test]
    fn test_selected_removed() {
        let k = keys(1);
        let mut batch = MutationBatch::new();
        batch.record(Mutation::Removed {
            id: k[0],
            was_selected: true,
        });
        assert!(batch.take().unwrap().selected_removed());
    }

    #[test]
    fn test_nested_batches_defer_take() {
        let k = keys(2);
        let mut batch = MutationBatch::new();

        batch.batch_start();
        batch.record(Mutation::Inserted(k[0]));
        batch.batch_start();
        batch.record(Mutation::Inserted(k[1]));

        assert!(!batch.batch_end());
        assert!(batch.take().is_none());

        assert!(batch.batch_end());
        let record = batch.take().unwrap();
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_unbalanced_batch_end() {
        let batch: MutationBatch<DefaultKey> = MutationBatch::new();
        assert!(!batch.batch_end());
        assert!(!batch.in_batch());
    }
}
