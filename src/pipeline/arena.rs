use serde::Serialize;

use crate::filter::contributors::Contributor;
use crate::foundation::error::{ResizeError, ResizeResult};

const WORD_BYTES: usize = std::mem::size_of::<f32>();
const CONTRIBUTOR_WORDS: usize = std::mem::size_of::<Contributor>() / WORD_BYTES;

/// Source of the single scratch block a resize call works in.
///
/// Returning `None` fails the call with [`ResizeError::Allocation`].
pub trait ScratchAllocator {
    /// Hand out a zeroed block of exactly `words` 4-byte words.
    fn allocate(&mut self, words: usize) -> Option<Vec<f32>>;
}

/// Global-heap allocator; reports failure instead of aborting.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapAllocator;

impl ScratchAllocator for HeapAllocator {
    fn allocate(&mut self, words: usize) -> Option<Vec<f32>> {
        let mut block = Vec::new();
        block.try_reserve_exact(words).ok()?;
        block.resize(words, 0.0);
        Some(block)
    }
}

/// Heap allocator that refuses requests above a byte budget.
#[derive(Clone, Copy, Debug, Default)]
pub struct BudgetAllocator {
    /// Largest request that will be served, in bytes.
    pub budget_bytes: usize,
    /// Largest request seen so far, served or not.
    pub peak_request_bytes: usize,
}

impl BudgetAllocator {
    /// Allocator serving requests up to `budget_bytes`.
    pub fn new(budget_bytes: usize) -> Self {
        Self {
            budget_bytes,
            peak_request_bytes: 0,
        }
    }
}

impl ScratchAllocator for BudgetAllocator {
    fn allocate(&mut self, words: usize) -> Option<Vec<f32>> {
        let bytes = words.checked_mul(WORD_BYTES)?;
        self.peak_request_bytes = self.peak_request_bytes.max(bytes);
        if bytes > self.budget_bytes {
            return None;
        }
        HeapAllocator.allocate(words)
    }
}

/// Word counts of every sub-buffer carved from the scratch block.
///
/// `horizontal_buffer` and `encode_buffer` are mutually exclusive: only the height-downsampling
/// loop needs the former, only the height-upsampling loop the latter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MemoryLayout {
    /// Horizontal contributor table.
    pub horizontal_contributors: usize,
    /// Horizontal coefficient table.
    pub horizontal_coefficients: usize,
    /// Vertical contributor table.
    pub vertical_contributors: usize,
    /// Vertical coefficient table.
    pub vertical_coefficients: usize,
    /// One decoded input row including margins.
    pub decode_buffer: usize,
    /// One horizontally resampled row (height downsampling only).
    pub horizontal_buffer: usize,
    /// All ring slots.
    pub ring_buffer: usize,
    /// One accumulated output row (height upsampling only).
    pub encode_buffer: usize,
}

impl MemoryLayout {
    /// Words needed for `n` contributors.
    pub(crate) fn contributor_words(n: usize) -> usize {
        n * CONTRIBUTOR_WORDS
    }

    /// Total words.
    pub fn total_words(&self) -> usize {
        self.horizontal_contributors
            + self.horizontal_coefficients
            + self.vertical_contributors
            + self.vertical_coefficients
            + self.decode_buffer
            + self.horizontal_buffer
            + self.ring_buffer
            + self.encode_buffer
    }

    /// Total bytes.
    pub fn total_bytes(&self) -> usize {
        self.total_words() * WORD_BYTES
    }

    /// Split `block` into typed, zeroed views. Words past the layout are left untouched.
    pub(crate) fn carve<'a>(&self, block: &'a mut [f32]) -> ResizeResult<Buffers<'a>> {
        if block.len() < self.total_words() {
            return Err(ResizeError::allocation(format!(
                "scratch block holds {} bytes, {} required",
                block.len() * WORD_BYTES,
                self.total_bytes()
            )));
        }
        let mut arena = ScratchArena { rest: block };
        Ok(Buffers {
            horizontal_contributors: arena.take_contributors(self.horizontal_contributors),
            horizontal_coefficients: arena.take(self.horizontal_coefficients),
            vertical_contributors: arena.take_contributors(self.vertical_contributors),
            vertical_coefficients: arena.take(self.vertical_coefficients),
            decode: arena.take(self.decode_buffer),
            horizontal: arena.take(self.horizontal_buffer),
            ring: arena.take(self.ring_buffer),
            encode: arena.take(self.encode_buffer),
        })
    }
}

/// Views into one scratch block.
pub(crate) struct Buffers<'a> {
    pub(crate) horizontal_contributors: &'a mut [Contributor],
    pub(crate) horizontal_coefficients: &'a mut [f32],
    pub(crate) vertical_contributors: &'a mut [Contributor],
    pub(crate) vertical_coefficients: &'a mut [f32],
    pub(crate) decode: &'a mut [f32],
    pub(crate) horizontal: &'a mut [f32],
    pub(crate) ring: &'a mut [f32],
    pub(crate) encode: &'a mut [f32],
}

/// Bump allocator over a borrowed block. Capacity is checked once by [`MemoryLayout::carve`].
struct ScratchArena<'a> {
    rest: &'a mut [f32],
}

impl<'a> ScratchArena<'a> {
    fn take(&mut self, words: usize) -> &'a mut [f32] {
        let (head, tail) = std::mem::take(&mut self.rest).split_at_mut(words);
        self.rest = tail;
        head.fill(0.0);
        head
    }

    fn take_contributors(&mut self, words: usize) -> &'a mut [Contributor] {
        bytemuck::cast_slice_mut(self.take(words))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/arena.rs"]
mod tests;
