/// Fixed-capacity window of consecutive scanlines over a borrowed slot block.
///
/// Holds scanlines `first..=last` when non-empty. Slots are addressed modulo the
/// slot count, starting at `begin`.
#[derive(Debug)]
pub(crate) struct RingBuffer<'a> {
    slots: &'a mut [f32],
    slot_len: usize,
    slot_count: usize,
    begin: Option<usize>,
    first: i32,
    last: i32,
}

impl<'a> RingBuffer<'a> {
    /// Split `slots` into rows of `slot_len` samples.
    pub(crate) fn new(slots: &'a mut [f32], slot_len: usize) -> Self {
        let slot_count = if slot_len == 0 {
            0
        } else {
            slots.len() / slot_len
        };
        Self {
            slots,
            slot_len,
            slot_count,
            begin: None,
            first: 0,
            last: 0,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.begin.is_none()
    }

    pub(crate) fn first(&self) -> i32 {
        self.first
    }

    pub(crate) fn last(&self) -> i32 {
        self.last
    }

    /// Append scanline `n` (`last + 1` unless empty) and return its zeroed slot.
    pub(crate) fn push(&mut self, n: i32) -> &mut [f32] {
        let index = match self.begin {
            None => {
                self.begin = Some(0);
                self.first = n;
                0
            }
            Some(begin) => {
                debug_assert_eq!(n, self.last + 1, "ring rows must be contiguous");
                let index = (begin + (self.last - self.first) as usize + 1) % self.slot_count;
                debug_assert_ne!(index, begin, "ring buffer overflow");
                index
            }
        };
        self.last = n;
        let slot = self.slot_at(index);
        slot.fill(0.0);
        slot
    }

    /// Pop scanlines below `n`, handing each to `on_pop` in order before its slot is reused.
    pub(crate) fn pop_below(&mut self, n: i32, mut on_pop: impl FnMut(i32, &mut [f32])) {
        while let Some(begin) = self.begin {
            if self.first >= n {
                break;
            }
            let scanline = self.first;
            on_pop(scanline, self.slot_at(begin));
            if self.first == self.last {
                self.begin = None;
                self.first = 0;
                self.last = 0;
            } else {
                self.first += 1;
                self.begin = Some((begin + 1) % self.slot_count);
            }
        }
    }

    /// Slot holding scanline `n`.
    pub(crate) fn row(&self, n: i32) -> &[f32] {
        let index = self.index_of(n);
        &self.slots[index * self.slot_len..(index + 1) * self.slot_len]
    }

    /// Mutable slot holding scanline `n`.
    pub(crate) fn row_mut(&mut self, n: i32) -> &mut [f32] {
        let index = self.index_of(n);
        self.slot_at(index)
    }

    fn index_of(&self, n: i32) -> usize {
        debug_assert!(
            self.begin.is_some() && (self.first..=self.last).contains(&n),
            "scanline {n} not buffered ({}..={})",
            self.first,
            self.last
        );
        (self.begin.unwrap_or(0) + (n - self.first) as usize) % self.slot_count
    }

    fn slot_at(&mut self, index: usize) -> &mut [f32] {
        &mut self.slots[index * self.slot_len..(index + 1) * self.slot_len]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/ring.rs"]
mod tests;
