//! 定义了SACK块：序列号空间中的半开区间。
//! Defines the SACK block: a half-open range over the sequence space.

use crate::{
    error::{Error, Result},
    seq::{Seq, distance, seq_lt, seq_max, seq_min},
};
use std::fmt;

/// The largest size a block may have while its edges still compare correctly
/// under modular arithmetic.
/// 块在其边界仍能通过模运算正确比较时允许的最大大小。
pub const MAX_BLOCK_SIZE: u32 = i32::MAX as u32;

/// A contiguous range `[start, end)` of received, out-of-order bytes.
///
/// Both edges live in the 32-bit sequence space, so `end` may be numerically
/// smaller than `start` once the block crosses the wrap point. The size and
/// every query are computed modulo 2^32.
///
/// 一段连续的、乱序接收的字节范围 `[start, end)`。
///
/// 两个边界都位于32位序列号空间中，因此当块跨越回绕点时，`end` 在数值上
/// 可能小于 `start`。大小和所有查询都按模2^32计算。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Block {
    start: Seq,
    end: Seq,
}

impl Block {
    /// Creates a block from its left (inclusive) and right (exclusive) edges.
    ///
    /// The edges are not checked: an empty block, or one larger than
    /// [`MAX_BLOCK_SIZE`], is accepted here. Use [`Block::try_new`] for edges
    /// that come from outside the crate.
    ///
    /// 从左边界（包含）和右边界（不包含）创建一个块，不检查边界。
    pub const fn new(start: Seq, end: Seq) -> Self {
        Self { start, end }
    }

    /// Creates a block, failing if it would be empty or larger than
    /// [`MAX_BLOCK_SIZE`].
    ///
    /// 创建一个块；如果块为空或大于 [`MAX_BLOCK_SIZE`]，则失败。
    pub fn try_new(start: Seq, end: Seq) -> Result<Self> {
        Self::new(start, end).validated()
    }

    /// Creates the block covered by a segment of `len` bytes starting at `seq`.
    /// 创建从 `seq` 开始、长度为 `len` 字节的段所覆盖的块。
    pub fn from_segment(seq: Seq, len: u32) -> Self {
        Self::new(seq, seq.wrapping_add(len))
    }

    /// The left edge, the first sequence number in the block.
    pub fn start(&self) -> Seq {
        self.start
    }

    /// The right edge, one past the last sequence number in the block.
    pub fn end(&self) -> Seq {
        self.end
    }

    /// Number of bytes covered by the block.
    /// 块覆盖的字节数。
    pub fn size(&self) -> u32 {
        distance(self.start, self.end)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `seq` lies inside `[start, end)`.
    ///
    /// A point numerically below `start` can still be inside the block when
    /// the block crosses the wrap point.
    ///
    /// 如果 `seq` 位于 `[start, end)` 内，则返回 `true`。
    pub fn contains(&self, seq: Seq) -> bool {
        distance(self.start, seq) < self.size()
    }

    /// Returns `true` if the two blocks share at least one sequence number.
    /// 如果两个块至少共享一个序列号，则返回 `true`。
    pub fn overlaps(&self, other: &Block) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && seq_lt(self.start, other.end)
            && seq_lt(other.start, self.end)
    }

    /// Returns `true` if one block ends exactly where the other starts.
    /// 如果一个块恰好在另一个块开始处结束，则返回 `true`。
    pub fn touches(&self, other: &Block) -> bool {
        self.end == other.start || other.end == self.start
    }

    /// Returns `true` if the blocks can be merged into a single block.
    /// 如果两个块可以合并为一个块，则返回 `true`。
    pub fn connects(&self, other: &Block) -> bool {
        self.overlaps(other) || self.touches(other)
    }

    /// Number of bytes covered by both blocks.
    /// 两个块共同覆盖的字节数。
    pub fn overlap_size(&self, other: &Block) -> u32 {
        if !self.overlaps(other) {
            return 0;
        }
        distance(
            seq_max(self.start, other.start),
            seq_min(self.end, other.end),
        )
    }

    /// Extends this block to the union of both blocks.
    ///
    /// The blocks must connect; merging two blocks with a hole between them
    /// would claim bytes that were never received.
    ///
    /// 将此块扩展为两个块的并集。两个块必须相连。
    pub fn merge(&mut self, other: &Block) {
        debug_assert!(
            self.connects(other),
            "merging disjoint blocks {} and {}",
            self,
            other
        );
        self.start = seq_min(self.start, other.start);
        self.end = seq_max(self.end, other.end);
    }

    /// Moves the left edge by `delta` sequence numbers, modulo 2^32.
    ///
    /// Fails without modifying the block if the result would be empty or too
    /// large to order correctly.
    ///
    /// 将左边界移动 `delta` 个序列号（模2^32）。如果结果为空或过大，
    /// 则失败且不修改块。
    pub fn shift_start(&mut self, delta: i32) -> Result<()> {
        let shifted = Self::new(self.start.wrapping_add_signed(delta), self.end);
        *self = shifted.validated()?;
        Ok(())
    }

    /// Moves the right edge by `delta` sequence numbers, modulo 2^32.
    ///
    /// Same failure rules as [`Block::shift_start`].
    pub fn shift_end(&mut self, delta: i32) -> Result<()> {
        let shifted = Self::new(self.start, self.end.wrapping_add_signed(delta));
        *self = shifted.validated()?;
        Ok(())
    }

    /// Moves the left edge forward to `seq`, which must lie inside the block.
    pub(crate) fn trim_front(&mut self, seq: Seq) {
        debug_assert!(self.contains(seq) && seq != self.start);
        self.start = seq;
    }

    fn validated(self) -> Result<Self> {
        if self.is_empty() || self.size() > MAX_BLOCK_SIZE {
            return Err(Error::InvalidBlock {
                start: self.start,
                end: self.end,
            });
        }
        Ok(self)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_queries() {
        let block = Block::new(0, 1500);

        assert_eq!(block.size(), 1500);
        assert!(!block.is_empty());
        assert!(block.contains(0));
        assert!(block.contains(1000));
        assert!(!block.contains(1500));
        assert!(!block.contains(2000));
    }

    #[test]
    fn test_block_shifts_across_wrap() {
        let mut block = Block::new(0, 1500);

        block.shift_start(-1000).unwrap();
        assert_eq!(block.start(), u32::MAX - 999);
        assert_eq!(block.size(), 2500);
        assert!(block.contains(1000));
        assert!(block.contains(0u32.wrapping_sub(500)));

        block.shift_end(-1500).unwrap();
        assert_eq!(block.end(), 0);
        assert_eq!(block.size(), 1000);
        assert!(!block.contains(1000));
        assert!(!block.contains(0));
        assert!(block.contains(0u32.wrapping_sub(1)));
        assert!(block.contains(0u32.wrapping_sub(500)));
        assert!(block.contains(0u32.wrapping_sub(1000)));
        assert!(!block.contains(0u32.wrapping_sub(1001)));
    }

    #[test]
    fn test_try_new_checks_size() {
        assert_eq!(Block::try_new(100, 200), Ok(Block::new(100, 200)));
        assert_eq!(
            Block::try_new(u32::MAX - 99, 100).map(|block| block.size()),
            Ok(200)
        );
        assert_eq!(
            Block::try_new(500, 500),
            Err(Error::InvalidBlock { start: 500, end: 500 })
        );
        assert!(Block::try_new(0, MAX_BLOCK_SIZE).is_ok());
        assert!(Block::try_new(0, MAX_BLOCK_SIZE + 1).is_err());
        assert!(Block::try_new(1000, 999).is_err());
    }

    #[test]
    fn test_shift_rejects_empty_result() {
        let mut block = Block::new(100, 200);

        assert!(matches!(
            block.shift_end(-100),
            Err(Error::InvalidBlock { start: 100, end: 100 })
        ));
        assert!(block.shift_start(200).is_err());
        assert_eq!(block, Block::new(100, 200));
    }

    #[test]
    fn test_overlap_and_touch() {
        let a = Block::new(1000, 2000);

        assert!(a.overlaps(&Block::new(1500, 2500)));
        assert!(a.overlaps(&Block::new(1200, 1300)));
        assert!(!a.overlaps(&Block::new(2000, 2500)));
        assert!(a.touches(&Block::new(2000, 2500)));
        assert!(a.touches(&Block::new(500, 1000)));
        assert!(a.connects(&Block::new(500, 1000)));
        assert!(!a.connects(&Block::new(2001, 2500)));
    }

    #[test]
    fn test_overlap_size() {
        let a = Block::new(1000, 2000);

        assert_eq!(a.overlap_size(&Block::new(1500, 2500)), 500);
        assert_eq!(a.overlap_size(&Block::new(1200, 1300)), 100);
        assert_eq!(a.overlap_size(&Block::new(0, 5000)), 1000);
        assert_eq!(a.overlap_size(&Block::new(2000, 2500)), 0);
    }

    #[test]
    fn test_merge_across_wrap() {
        let mut a = Block::from_segment(u32::MAX - 99, 100);
        assert_eq!(a.end(), 0);

        a.merge(&Block::new(0, 400));
        assert_eq!(a, Block::new(u32::MAX - 99, 400));
        assert_eq!(a.size(), 500);
        assert!(a.contains(u32::MAX));
        assert!(a.contains(399));
    }

    #[test]
    fn test_display() {
        assert_eq!(Block::new(5500, 6000).to_string(), "[5500, 6000)");
    }
}
