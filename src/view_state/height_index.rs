//! HeightIndex - cumulative message heights via Fenwick tree
//!
//! Maintains the heights of the materialized messages so the transcript
//! can answer two questions in O(log n): how tall is the content, and
//! which message contains a given row offset.

/// Cumulative height index over the materialized window.
///
/// Backed by a Fenwick tree (1-indexed internally, 0-indexed API).
/// Supports streaming updates: the trailing message's height changes on
/// every chunk, which is a single `set` call.
#[derive(Debug, Clone)]
pub struct HeightIndex {
    /// Fenwick tree backing storage.
    tree: Vec<isize>,
    /// Number of indexed messages (len <= tree.len()).
    len: usize,
}

impl HeightIndex {
    /// Create an empty index with the given initial capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            tree: vec![0; capacity.max(1)],
            len: 0,
        }
    }

    /// Number of indexed messages.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no messages.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a message height.
    pub fn push(&mut self, rows: usize) {
        if self.len >= self.tree.len() {
            self.tree.resize(self.tree.len() * 2, 0);
        }
        let idx = self.len;
        self.len += 1;
        fenwick::array::update(&mut self.tree, idx, rows as isize);
    }

    /// Replace the height at `index` (streaming growth of the tail).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set(&mut self, index: usize, rows: usize) {
        assert!(
            index < self.len,
            "index {} out of bounds (len: {})",
            index,
            self.len
        );
        let delta = rows as isize - self.height_at(index) as isize;
        if delta != 0 {
            fenwick::array::update(&mut self.tree, index, delta);
        }
    }

    /// Drop all entries and re-index from an iterator of heights.
    ///
    /// Used when the materialized window changes shape (growth, reset,
    /// conversation switch) or the wrap width changes.
    pub fn rebuild<I>(&mut self, heights: I)
    where
        I: IntoIterator<Item = usize>,
    {
        self.clear();
        for rows in heights {
            self.push(rows);
        }
    }

    /// Height of the message at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn height_at(&self, index: usize) -> usize {
        assert!(
            index < self.len,
            "index {} out of bounds (len: {})",
            index,
            self.len
        );
        let upto = fenwick::array::prefix_sum(&self.tree, index);
        let before = if index == 0 {
            0
        } else {
            fenwick::array::prefix_sum(&self.tree, index - 1)
        };
        (upto - before).max(0) as usize
    }

    /// Cumulative height of all messages before `index`.
    ///
    /// `offset_of(0)` is 0; `offset_of(len())` equals `total()`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn offset_of(&self, index: usize) -> usize {
        assert!(
            index <= self.len,
            "index {} out of bounds (len: {})",
            index,
            self.len
        );
        if index == 0 {
            0
        } else {
            fenwick::array::prefix_sum(&self.tree, index - 1).max(0) as usize
        }
    }

    /// Total height of all indexed messages.
    pub fn total(&self) -> usize {
        self.offset_of(self.len)
    }

    /// Index of the message whose row span contains `offset`.
    ///
    /// Message `i` spans `[offset_of(i), offset_of(i + 1))`. Returns
    /// `None` when `offset >= total()` or the index is empty.
    pub fn locate(&self, offset: usize) -> Option<usize> {
        if offset >= self.total() {
            return None;
        }
        // Binary search for the first index whose inclusive prefix sum
        // exceeds offset.
        let mut lo = 0;
        let mut hi = self.len;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.offset_of(mid + 1) > offset {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        Some(lo)
    }

    /// Remove all entries, retaining allocated capacity.
    pub fn clear(&mut self) {
        for slot in &mut self.tree[..] {
            *slot = 0;
        }
        self.len = 0;
    }
}
