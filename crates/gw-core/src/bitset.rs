//! A fixed-width bitset over tile indices, used as the per-tick dynamic
//! collision mask.
//!
//! Reused across ticks rather than reallocated: [`TileBitSet::reset`]
//! preserves the backing `Vec` when the requested length matches the
//! current one, and only reallocates when it doesn't.

const WORD_BITS: usize = u64::BITS as usize;

/// A packed bitset sized to `width * height` tiles.
#[derive(Clone, Debug)]
pub struct TileBitSet {
    words: Vec<u64>,
    len: usize,
}

impl TileBitSet {
    /// Create a bitset with room for `len` tiles, all clear.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0u64; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    /// Number of tiles this bitset covers.
    #[inline]
    pub fn length(&self) -> usize {
        self.len
    }

    /// Mark tile `i` as set.
    ///
    /// Out-of-range indices are ignored — callers that need bounds
    /// enforcement should check against [`length`](Self::length) first, the
    /// way `gw-map` does before consulting the collision mask.
    #[inline]
    pub fn set(&mut self, i: usize) {
        if i >= self.len {
            return;
        }
        self.words[i / WORD_BITS] |= 1u64 << (i % WORD_BITS);
    }

    /// `true` if tile `i` is set. Out-of-range indices read as clear.
    #[inline]
    pub fn has(&self, i: usize) -> bool {
        if i >= self.len {
            return false;
        }
        self.words[i / WORD_BITS] & (1u64 << (i % WORD_BITS)) != 0
    }

    /// Clear every bit.
    ///
    /// If `new_len` equals the current [`length`](Self::length), the
    /// existing allocation is reused in place (zeroed, not reallocated). If
    /// it differs, a fresh bitset of `new_len` is allocated.
    pub fn reset(&mut self, new_len: usize) {
        if new_len == self.len {
            self.words.iter_mut().for_each(|w| *w = 0);
        } else {
            *self = Self::new(new_len);
        }
    }
}
