//! 块列表的定长快照。
//! A fixed-size snapshot of a block list.

use super::block::Block;
use std::{fmt, ops::Deref};

/// The blocks of a list at one point in time, most recently changed first.
///
/// Backed by an inline array so taking a snapshot on the receive path never
/// allocates.
///
/// 某一时刻块列表中的块，最近修改的块在前。使用内联数组存储，
/// 因此在接收路径上获取快照永远不会分配内存。
#[derive(Clone, Copy)]
pub struct Entries<const N: usize> {
    blocks: [Block; N],
    len: usize,
}

impl<const N: usize> Entries<N> {
    pub(crate) fn from_slice(blocks: &[Block]) -> Self {
        debug_assert!(blocks.len() <= N);
        let mut entries = Self::default();
        entries.blocks[..blocks.len()].copy_from_slice(blocks);
        entries.len = blocks.len();
        entries
    }

    pub fn as_slice(&self) -> &[Block] {
        &self.blocks[..self.len]
    }

    /// The `count` most recently changed blocks, or all of them if fewer
    /// are held. This is the slice a SACK option is built from.
    ///
    /// 最近修改的 `count` 个块；如果块数较少，则返回全部。
    /// SACK选项就是由这个切片构建的。
    pub fn recent(&self, count: usize) -> &[Block] {
        &self.as_slice()[..count.min(self.len)]
    }

    /// Total number of bytes covered by all blocks.
    /// 所有块覆盖的总字节数。
    pub fn total_bytes(&self) -> u64 {
        self.iter().map(|block| u64::from(block.size())).sum()
    }
}

impl<const N: usize> Default for Entries<N> {
    fn default() -> Self {
        Self {
            blocks: [Block::default(); N],
            len: 0,
        }
    }
}

impl<const N: usize> Deref for Entries<N> {
    type Target = [Block];

    fn deref(&self) -> &[Block] {
        self.as_slice()
    }
}

impl<const N: usize> PartialEq for Entries<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<const N: usize> Eq for Entries<N> {}

impl<const N: usize> PartialEq<[Block]> for Entries<N> {
    fn eq(&self, other: &[Block]) -> bool {
        self.as_slice() == other
    }
}

impl<const N: usize> PartialEq<Vec<Block>> for Entries<N> {
    fn eq(&self, other: &Vec<Block>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<'a, const N: usize> IntoIterator for &'a Entries<N> {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<const N: usize> fmt::Debug for Entries<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
