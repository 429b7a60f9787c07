// State-change journal
//
// Every mutation the host makes during a transaction is recorded with the
// value it replaced. Reverting to a checkpoint pops and undoes entries in
// reverse order; entries above a checkpoint that is never reverted simply
// become part of the enclosing frame.

use alloy_primitives::{Address, B256, U256};

/// One undoable state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEntry {
    BalanceChanged { address: Address, previous: U256 },
    StorageChanged { address: Address, key: B256, previous: Option<B256> },
    TransientChanged { address: Address, key: B256, previous: Option<B256> },
    LogEmitted,
}

/// Position in the journal a frame can roll back to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

#[derive(Debug, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the current position
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.entries.len())
    }

    pub fn record(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Remove every entry recorded after `checkpoint`, newest first.
    pub fn unwind(&mut self, checkpoint: Checkpoint) -> Vec<JournalEntry> {
        if checkpoint.0 >= self.entries.len() {
            return Vec::new();
        }
        let mut undone = self.entries.split_off(checkpoint.0);
        undone.reverse();
        undone
    }

    /// Forget every entry; the changes they describe become final.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
