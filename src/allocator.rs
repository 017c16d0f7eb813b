//! Monotonic index allocation and the bounded recent-index history.

use std::collections::VecDeque;

/// Outcome of [`IndexAllocator::allocate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    /// The index to use for this store attempt.
    pub index: u32,
    /// True if assigning `index` wrapped `next_index` back around to 0.
    ///
    /// The engine is responsible for emitting [`crate::events::Event::IndexWrapAround`]
    /// when this is set — the allocator itself has no dependency on the
    /// event vocabulary.
    pub wrapped: bool,
}

/// Assigns monotonically increasing indices and tracks the indices of the
/// most recently *successfully* stored records.
///
/// `recent` always holds at most `history_cap` indices, oldest at the
/// front, newest at the back, so [`IndexAllocator::recent_newest_first`]
/// can walk it back-to-front for [`crate::engine::Engine::load_last_n`].
#[derive(Debug, Clone)]
pub struct IndexAllocator {
    next_index: u32,
    recent: VecDeque<u32>,
    history_cap: usize,
}

impl IndexAllocator {
    /// Creates an allocator starting at `initial_index` with an empty
    /// history bounded at `history_cap`.
    #[must_use]
    pub fn new(initial_index: u32, history_cap: u8) -> Self {
        Self {
            next_index: initial_index,
            recent: VecDeque::with_capacity(history_cap as usize),
            history_cap: history_cap as usize,
        }
    }

    /// The index that would be assigned by the next call to
    /// [`IndexAllocator::allocate`].
    #[must_use]
    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    /// Assigns the next index and advances the counter.
    ///
    /// On overflow the counter wraps to 0 rather than panicking; the
    /// engine will discover a resulting collision (if any) via
    /// `WriteError::FileExists` on the next store at that index.
    pub fn allocate(&mut self) -> Allocation {
        let index = self.next_index;
        let (next, wrapped) = self.next_index.overflowing_add(1);
        self.next_index = next;
        Allocation { index, wrapped }
    }

    /// Records `index` as successfully stored, evicting the oldest entry
    /// if the history is already at capacity.
    pub fn remember(&mut self, index: u32) {
        if self.recent.len() >= self.history_cap {
            self.recent.pop_front();
        }
        self.recent.push_back(index);
    }

    /// Iterates over the recent-index history from newest to oldest.
    pub fn recent_newest_first(&self) -> impl Iterator<Item = u32> + '_ {
        self.recent.iter().rev().copied()
    }

    /// Re-seeds the allocator from a sorted, ascending list of indices
    /// recovered from the storage directory.
    ///
    /// `next_index` becomes `last + 1` (or the original `initial_index` if
    /// `existing_sorted` is empty); `recent` is replaced with the final
    /// `min(existing_sorted.len(), history_cap)` elements, preserving
    /// ascending order, so that `recent_newest_first` yields the most
    /// recently stored files first.
    pub fn seed(&mut self, existing_sorted: &[u32], initial_index: u32) {
        self.recent.clear();
        match existing_sorted.last() {
            Some(&last) => self.next_index = last.wrapping_add(1),
            None => self.next_index = initial_index,
        }
        let tail_start = existing_sorted.len().saturating_sub(self.history_cap);
        self.recent.extend(&existing_sorted[tail_start..]);
    }
}
