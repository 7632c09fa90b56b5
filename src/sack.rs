//! SACK（选择性确认，RFC 2018）接收端块跟踪。
//! Receiver-side SACK (Selective Acknowledgment, RFC 2018) block tracking.
//!
//! A TCP receiver reports the out-of-order data it holds as a short list of
//! blocks. This module keeps that list: segments arriving ahead of the
//! cumulative ACK are folded into blocks, and blocks are retired once the
//! cumulative ACK catches up with them.
//!
//! TCP接收端将其持有的乱序数据报告为一个简短的块列表。此模块维护该列表：
//! 先于累积确认到达的数据段被合并到块中，当累积确认追上这些块时，块被移除。

pub mod block;
pub mod engine;
pub mod entries;
pub mod fixed_list;


pub use block::Block;
pub use engine::{SackEngine, SackStats};
pub use entries::Entries;
pub use fixed_list::FixedList;

use crate::seq::Seq;
use std::fmt;

/// The outcome of every operation that changes a block list.
///
/// 每个修改块列表的操作的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckResult<E> {
    /// The blocks after the operation, most recently changed first.
    /// 操作后的块，最近修改的块在前。
    pub entries: E,
    /// Bytes newly covered (on receive) or retired (on ACK) by the operation.
    /// 操作新覆盖（接收时）或移除（确认时）的字节数。
    pub bytes: u32,
}

/// The result type produced by a given policy.
pub type PolicyResult<P> = AckResult<<P as SackPolicy>::Entries>;

/// Storage and bookkeeping policy behind a [`SackEngine`].
///
/// Implementations keep the blocks pairwise disjoint and non-adjacent, never
/// hold more than [`SackPolicy::capacity`] blocks, and keep the most recently
/// created or extended block at the front.
///
/// [`SackEngine`] 背后的存储与记账策略。实现必须保证块两两不相交且不相邻，
/// 块数不超过 [`SackPolicy::capacity`]，并将最近创建或扩展的块放在最前面。
pub trait SackPolicy: Default + fmt::Debug {
    /// Snapshot type returned inside [`AckResult`].
    type Entries: Clone + PartialEq + fmt::Debug;

    /// Maximum number of blocks the policy can hold.
    fn capacity(&self) -> usize;

    /// The blocks currently held, most recently changed first.
    fn blocks(&self) -> &[Block];

    /// Takes a snapshot of the current blocks.
    fn entries(&self) -> Self::Entries;

    /// Records `len > 0` bytes starting at `seq` that arrived out of order.
    ///
    /// 记录从 `seq` 开始、乱序到达的 `len > 0` 个字节。
    fn recv_out_of_order(&mut self, seq: Seq, len: u32) -> AckResult<Self::Entries>;

    /// Retires every block made redundant by the cumulative ACK `ack`.
    ///
    /// 移除所有因累积确认 `ack` 而变得多余的块。
    fn new_valid_ack(&mut self, ack: Seq) -> AckResult<Self::Entries>;

    /// Drops all blocks.
    fn clear(&mut self);
}
