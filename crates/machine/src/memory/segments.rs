//! Segment Store.
//!
//! An arena of owned word vectors indexed by identifier. It provides:
//! 1. **Allocation:** Zero-filled segments, reusing the oldest released identifier first.
//! 2. **Release:** Slots are cleared and their identifiers queued for reuse.
//! 3. **Access:** Bounds- and liveness-checked word loads and stores.
//! 4. **Program Replacement:** Copy-then-swap of any active segment into slot 0.
//!
//! Identifiers are dense: every index below `slots.len()` is either active
//! (`Some`) or waiting in the recycle queue (`None`). An identifier is never
//! active twice.

use std::collections::VecDeque;

use tracing::debug;

use crate::common::constants::PROGRAM_SEGMENT;
use crate::common::{Fault, SegmentId, Word};

/// Arena of segments plus the FIFO queue of released identifiers.
#[derive(Clone, Debug, Default)]
pub struct SegmentStore {
    slots: Vec<Option<Vec<Word>>>,
    recycled: VecDeque<SegmentId>,
}

impl SegmentStore {
    /// Creates a store whose segment 0 holds `program`.
    pub fn with_program(program: Vec<Word>) -> Self {
        Self::with_capacity(program, 0)
    }

    /// Creates a store whose segment 0 holds `program`, reserving room for
    /// `capacity` identifiers up front.
    pub fn with_capacity(program: Vec<Word>, capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.max(1));
        slots.push(Some(program));
        Self {
            slots,
            recycled: VecDeque::new(),
        }
    }

    /// Maps a new zero-filled segment of `len` words.
    ///
    /// Reuses the identifier released earliest if any are waiting; otherwise
    /// issues the next never-used identifier.
    ///
    /// # Errors
    ///
    /// * `Fault::SegmentAllocationFailed` when the host cannot supply `len` words.
    /// * `Fault::SegmentSpaceExhausted` when all 2^32 identifiers are active.
    pub fn map(&mut self, len: usize) -> Result<SegmentId, Fault> {
        let words = zeroed(len)?;
        if let Some(id) = self.recycled.pop_front() {
            debug!(id, len, "map segment (recycled id)");
            self.slots[id as usize] = Some(words);
            return Ok(id);
        }
        let id = fresh_id(self.slots.len())?;
        debug!(id, len, "map segment");
        self.slots.push(Some(words));
        Ok(id)
    }

    /// Releases segment `id` and queues its identifier for reuse.
    ///
    /// # Errors
    ///
    /// * `Fault::InvalidSegmentAccess` for segment 0 or an identifier never issued.
    /// * `Fault::DoubleUnmap` for an identifier already released.
    pub fn unmap(&mut self, id: SegmentId) -> Result<(), Fault> {
        if id == PROGRAM_SEGMENT {
            return Err(Fault::InvalidSegmentAccess { id });
        }
        let slot = self
            .slots
            .get_mut(id as usize)
            .ok_or(Fault::InvalidSegmentAccess { id })?;
        if slot.take().is_none() {
            return Err(Fault::DoubleUnmap { id });
        }
        debug!(id, "unmap segment");
        self.recycled.push_back(id);
        Ok(())
    }

    /// Reads word `offset` of segment `id`.
    ///
    /// # Errors
    ///
    /// `Fault::InvalidSegmentAccess` or `Fault::SegmentOutOfBounds`.
    #[inline]
    pub fn load(&self, id: SegmentId, offset: Word) -> Result<Word, Fault> {
        let seg = self.active(id)?;
        seg.get(offset as usize)
            .copied()
            .ok_or(Fault::SegmentOutOfBounds {
                id,
                offset,
                len: seg.len(),
            })
    }

    /// Writes `value` to word `offset` of segment `id`.
    ///
    /// # Errors
    ///
    /// `Fault::InvalidSegmentAccess` or `Fault::SegmentOutOfBounds`.
    #[inline]
    pub fn store(&mut self, id: SegmentId, offset: Word, value: Word) -> Result<(), Fault> {
        let seg = self
            .slots
            .get_mut(id as usize)
            .and_then(Option::as_mut)
            .ok_or(Fault::InvalidSegmentAccess { id })?;
        let len = seg.len();
        let word = seg
            .get_mut(offset as usize)
            .ok_or(Fault::SegmentOutOfBounds { id, offset, len })?;
        *word = value;
        Ok(())
    }

    /// Replaces segment 0 with a copy of segment `id`.
    ///
    /// Loading segment 0 itself is a no-op. Otherwise the copy is built first
    /// and swapped in whole; the old program is dropped in the same call.
    ///
    /// # Returns
    ///
    /// `true` if a copy was made.
    ///
    /// # Errors
    ///
    /// `Fault::InvalidSegmentAccess` when `id` is not active.
    pub fn load_program(&mut self, id: SegmentId) -> Result<bool, Fault> {
        if id == PROGRAM_SEGMENT {
            return Ok(false);
        }
        let copy = self.active(id)?.to_vec();
        debug!(id, len = copy.len(), "load program");
        self.slots[PROGRAM_SEGMENT as usize] = Some(copy);
        Ok(true)
    }

    /// Fetches the instruction at `pc` in segment 0.
    ///
    /// # Errors
    ///
    /// `Fault::ProgramCounterOutOfRange` when `pc` is past the end.
    #[inline(always)]
    pub fn fetch(&self, pc: Word) -> Result<Word, Fault> {
        let program = self.program();
        program
            .get(pc as usize)
            .copied()
            .ok_or(Fault::ProgramCounterOutOfRange {
                pc,
                len: program.len(),
            })
    }

    /// Length of segment 0 in words.
    pub fn program_len(&self) -> usize {
        self.program().len()
    }

    /// Contents of segment `id`, or `None` if it is not active.
    pub fn segment(&self, id: SegmentId) -> Option<&[Word]> {
        self.slots.get(id as usize).and_then(|s| s.as_deref())
    }

    /// Whether `id` names an active segment.
    pub fn is_active(&self, id: SegmentId) -> bool {
        self.segment(id).is_some()
    }

    /// Number of active segments, including segment 0.
    pub fn active_count(&self) -> usize {
        self.slots.len() - self.recycled.len()
    }

    /// Number of released identifiers waiting for reuse.
    pub fn recycled_count(&self) -> usize {
        self.recycled.len()
    }

    /// Released identifiers in reuse order.
    pub fn recycle_queue(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.recycled.iter().copied()
    }

    fn active(&self, id: SegmentId) -> Result<&[Word], Fault> {
        self.segment(id).ok_or(Fault::InvalidSegmentAccess { id })
    }

    fn program(&self) -> &[Word] {
        // Slot 0 is installed at construction and only ever replaced.
        self.slots
            .first()
            .and_then(|s| s.as_deref())
            .unwrap_or_default()
    }
}

/// A zero-filled segment of `len` words, or a fault if the allocation fails.
fn zeroed(len: usize) -> Result<Vec<Word>, Fault> {
    let mut words = Vec::new();
    words
        .try_reserve_exact(len)
        .map_err(|_| Fault::SegmentAllocationFailed { len })?;
    words.resize(len, 0);
    Ok(words)
}

/// The identifier for a new slot appended after `slot_count` existing ones.
fn fresh_id(slot_count: usize) -> Result<SegmentId, Fault> {
    SegmentId::try_from(slot_count).map_err(|_| Fault::SegmentSpaceExhausted)
}
