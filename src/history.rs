// Bounded undo/redo snapshots of the canvas.
//
// Entries are full deep copies of the raster. The entry under the cursor is
// the current committed state; entries after it form the redo branch.

use std::collections::VecDeque;

use crate::types::FrameBuffer;

pub struct History {
    entries: VecDeque<FrameBuffer>,
    cursor: usize,
    capacity: usize,
    /// Buffers dropped by truncation or eviction, reused by the next push.
    spare: Vec<FrameBuffer>,
}

impl History {
    /// Start with `initial` as entry 0.
    ///
    /// # Panics
    /// If `capacity` is zero; `Config::validate` rules that out.
    pub fn new(initial: &FrameBuffer, capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be non-zero");
        let mut entries = VecDeque::with_capacity(capacity);
        entries.push_back(initial.clone());
        Self { entries, cursor: 0, capacity, spare: Vec::new() }
    }

    /// Snapshot `live` as the new newest entry.
    ///
    /// Drops the redo branch, appends, evicts the oldest entry when over
    /// capacity, and leaves the cursor on the new entry.
    pub fn push(&mut self, live: &FrameBuffer) {
        while self.entries.len() > self.cursor + 1 {
            if let Some(dropped) = self.entries.pop_back() {
                self.spare.push(dropped);
            }
        }

        let snapshot = match self.spare.pop() {
            Some(mut buf) if buf.pixels.len() == live.pixels.len() => {
                buf.copy_from(live);
                buf
            }
            _ => live.clone(),
        };
        self.entries.push_back(snapshot);

        if self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                self.spare.push(evicted);
            }
        }
        self.cursor = self.entries.len() - 1;
        // Only one buffer is ever reused at a time.
        self.spare.truncate(1);
    }

    /// Move the cursor one entry back and return the entry now under it.
    pub fn step_back(&mut self) -> Option<&FrameBuffer> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Move the cursor one entry forward and return the entry now under it.
    pub fn step_forward(&mut self) -> Option<&FrameBuffer> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: entry 0 exists from construction.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
