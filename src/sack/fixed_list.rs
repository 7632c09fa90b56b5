//! 基于定长数组的SACK块列表。
//! Fixed-capacity, array-backed SACK block list.

use super::{
    AckResult, SackPolicy,
    block::{Block, MAX_BLOCK_SIZE},
    entries::Entries,
};
use crate::seq::{Seq, distance, seq_le, seq_lt};
use tracing::{debug, trace};

/// A block list holding at most `N` blocks in an inline array.
///
/// Blocks are ordered by recency: index 0 is the block most recently created
/// or extended. When the list is full, a segment that cannot be merged into
/// an existing block is dropped; the blocks already reported keep their
/// slots.
///
/// 一个在内联数组中最多保存 `N` 个块的块列表。
///
/// 块按最近修改顺序排列：索引0是最近创建或扩展的块。列表已满时，
/// 无法合并到现有块中的数据段会被丢弃，已报告的块保留其位置。
#[derive(Debug, Clone, Copy)]
pub struct FixedList<const N: usize> {
    blocks: [Block; N],
    len: usize,
}

impl<const N: usize> FixedList<N> {
    pub const CAPACITY: usize = N;

    pub fn new() -> Self {
        const { assert!(N > 0, "a SACK list needs room for at least one block") };
        Self {
            blocks: [Block::default(); N],
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    fn position_connected(&self, block: &Block) -> Option<usize> {
        self.blocks().iter().position(|held| held.connects(block))
    }

    fn push_front(&mut self, block: Block) {
        debug_assert!(self.len < N);
        self.blocks.copy_within(0..self.len, 1);
        self.blocks[0] = block;
        self.len += 1;
    }

    fn move_to_front(&mut self, idx: usize) {
        self.blocks[..=idx].rotate_right(1);
    }

    fn remove(&mut self, idx: usize) -> Block {
        let block = self.blocks[idx];
        self.blocks.copy_within(idx + 1..self.len, idx);
        self.len -= 1;
        block
    }

    fn result(&self, bytes: u32) -> AckResult<Entries<N>> {
        AckResult {
            entries: self.entries(),
            bytes,
        }
    }
}

impl<const N: usize> Default for FixedList<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SackPolicy for FixedList<N> {
    type Entries = Entries<N>;

    fn capacity(&self) -> usize {
        N
    }

    fn blocks(&self) -> &[Block] {
        &self.blocks[..self.len]
    }

    fn entries(&self) -> Entries<N> {
        Entries::from_slice(self.blocks())
    }

    fn recv_out_of_order(&mut self, seq: Seq, len: u32) -> AckResult<Entries<N>> {
        debug_assert!(len > 0, "empty segment at {seq}");
        let incoming = Block::from_segment(seq, len);
        if incoming.is_empty() {
            return self.result(0);
        }
        // Edges further apart than half the sequence space do not order.
        if len > MAX_BLOCK_SIZE {
            debug!(seq, len, "Segment too large for a SACK block, not recorded");
            return self.result(0);
        }

        let Some(first) = self.position_connected(&incoming) else {
            if self.is_full() {
                debug!(seq, len, capacity = N, "SACK list full, segment not recorded");
                return self.result(0);
            }
            self.push_front(incoming);
            trace!(block = %incoming, blocks = self.len, "New SACK block");
            return self.result(len);
        };

        // Fold the segment into the first connected block, then absorb every
        // other block the grown block now reaches. A segment filling the hole
        // between two blocks frees one slot this way.
        let mut merged = self.blocks[first];
        let mut covered = merged.overlap_size(&incoming);
        merged.merge(&incoming);
        self.move_to_front(first);

        let mut idx = 1;
        while idx < self.len {
            if merged.connects(&self.blocks[idx]) {
                let absorbed = self.remove(idx);
                covered += absorbed.overlap_size(&incoming);
                merged.merge(&absorbed);
                trace!(absorbed = %absorbed, "SACK blocks fused");
            } else {
                idx += 1;
            }
        }
        self.blocks[0] = merged;

        let bytes = len - covered;
        trace!(block = %merged, new_bytes = bytes, blocks = self.len, "SACK block extended");
        self.result(bytes)
    }

    fn new_valid_ack(&mut self, ack: Seq) -> AckResult<Entries<N>> {
        // Each block is judged against `ack` on its own, so the recency order
        // can be walked directly instead of by start sequence.
        let mut retired = 0u32;
        let mut kept = 0;
        for idx in 0..self.len {
            let mut block = self.blocks[idx];
            if seq_le(block.end(), ack) || block.start() == ack {
                retired = retired.saturating_add(block.size());
                trace!(block = %block, ack, "SACK block retired");
                continue;
            }
            if seq_lt(block.start(), ack) {
                retired = retired.saturating_add(distance(block.start(), ack));
                block.trim_front(ack);
                trace!(block = %block, ack, "SACK block trimmed");
            }
            self.blocks[kept] = block;
            kept += 1;
        }
        self.len = kept;
        self.result(retired)
    }

    fn clear(&mut self) {
        self.len = 0;
    }
}
