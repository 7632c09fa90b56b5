//! 每个连接的SACK引擎。
//! The per-connection SACK engine.
//!
//! The TCP receive path owns one [`SackEngine`] per connection and calls it
//! for every segment that arrives ahead of the cumulative ACK and for every
//! cumulative ACK advance. The engine checks the caller's side of the
//! contract, forwards to its block list policy and keeps statistics.
//!
//! TCP接收路径为每个连接拥有一个 [`SackEngine`]，对每个先于累积确认到达的
//! 数据段以及每次累积确认前进调用它。引擎检查调用方的约定，转发给块列表策略，
//! 并维护统计信息。

use super::{
    AckResult, PolicyResult, SackPolicy,
    block::{Block, MAX_BLOCK_SIZE},
    fixed_list::FixedList,
};
use crate::{
    config::{Config, SackConfig},
    error::{Error, Result},
    seq::{Seq, seq_lt},
};
use std::fmt;
use tracing::{debug, warn};

/// Number of blocks tracked by [`SackEngine::new`] when no capacity is named.
pub const DEFAULT_CAPACITY: usize = 4;

/// An engine backed by a fixed list of `N` blocks.
pub type Sack<const N: usize> = SackEngine<FixedList<N>>;

/// Counters describing what an engine has seen over its lifetime.
///
/// 描述引擎在其生命周期内所见情况的计数器。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SackStats {
    /// Out-of-order segments recorded or rejected.
    /// 已记录或被拒绝的乱序数据段。
    pub segments: u64,
    /// Segments that extended an existing block.
    /// 扩展了现有块的数据段。
    pub merged: u64,
    /// Segments dropped because the list was full, or malformed.
    /// 因列表已满或格式错误而被丢弃的数据段。
    pub rejected: u64,
    /// Bytes received that were already covered by a block.
    /// 接收到的已被某个块覆盖的字节。
    pub duplicate_bytes: u64,
    /// Bytes newly covered by blocks.
    /// 块新覆盖的字节。
    pub bytes_sacked: u64,
    /// Cumulative ACK advances processed.
    pub acks: u64,
    /// Bytes retired from blocks by cumulative ACKs.
    pub bytes_retired: u64,
}

impl fmt::Display for SackStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sack[segments:{}, merged:{}, rejected:{}, sacked:{}B, duplicate:{}B, acks:{}, retired:{}B]",
            self.segments,
            self.merged,
            self.rejected,
            self.bytes_sacked,
            self.duplicate_bytes,
            self.acks,
            self.bytes_retired
        )
    }
}

/// SACK state of one TCP connection.
///
/// 一个TCP连接的SACK状态。
#[derive(Debug)]
pub struct SackEngine<P: SackPolicy = FixedList<DEFAULT_CAPACITY>> {
    list: P,
    config: SackConfig,
    last_ack: Option<Seq>,
    stats: SackStats,
}

impl<P: SackPolicy> Default for SackEngine<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SackPolicy> SackEngine<P> {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self {
            list: P::default(),
            config: SackConfig::default(),
            last_ack: None,
            stats: SackStats::default(),
        }
    }

    /// Creates an engine with a validated configuration.
    ///
    /// 使用经过验证的配置创建引擎。
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_sack_config(config.sack))
    }

    /// Creates an engine from settings that were already validated.
    pub(crate) fn with_sack_config(config: SackConfig) -> Self {
        Self {
            config,
            ..Self::new()
        }
    }

    /// Records a segment of `len` bytes at `seq` that arrived ahead of the
    /// cumulative ACK.
    ///
    /// A zero-length or oversized segment is dropped and logged; the result
    /// then carries the unchanged blocks and `bytes == 0`, the same answer a
    /// full list gives.
    ///
    /// 记录在累积确认之前到达的、位于 `seq` 的 `len` 字节数据段。
    /// 零长度或过大的数据段会被丢弃并记录日志。
    pub fn recv_out_of_order(&mut self, seq: Seq, len: u32) -> PolicyResult<P> {
        match Self::check_segment(seq, len) {
            Ok(()) => self.forward_segment(seq, len),
            Err(err) => {
                warn!(%err, "Dropping malformed out-of-order segment");
                self.stats.segments += 1;
                self.stats.rejected += 1;
                self.snapshot(0)
            }
        }
    }

    /// Like [`SackEngine::recv_out_of_order`], but returns malformed input as
    /// an error instead of dropping it.
    pub fn try_recv_out_of_order(&mut self, seq: Seq, len: u32) -> Result<PolicyResult<P>> {
        Self::check_segment(seq, len)?;
        Ok(self.forward_segment(seq, len))
    }

    /// Retires the blocks made redundant by the cumulative ACK `ack`.
    ///
    /// The caller guarantees ACKs never move backwards. A regression is a
    /// contract breach: it panics in debug builds and is ignored with a
    /// warning otherwise.
    ///
    /// 移除因累积确认 `ack` 而变得多余的块。调用方保证确认不会回退；
    /// 回退在调试构建中会导致panic，否则被忽略并记录警告。
    pub fn new_valid_ack(&mut self, ack: Seq) -> PolicyResult<P> {
        match self.check_ack(ack) {
            Ok(()) => self.forward_ack(ack),
            Err(err) => {
                warn!(%err, "Ignoring invalid cumulative ACK");
                debug_assert!(false, "cumulative ACK contract violated: {err}");
                self.snapshot(0)
            }
        }
    }

    /// Like [`SackEngine::new_valid_ack`], but returns a regressing ACK as an
    /// error.
    pub fn try_new_valid_ack(&mut self, ack: Seq) -> Result<PolicyResult<P>> {
        self.check_ack(ack)?;
        Ok(self.forward_ack(ack))
    }

    /// A snapshot of all blocks, most recently changed first.
    pub fn entries(&self) -> P::Entries {
        self.list.entries()
    }

    pub fn blocks(&self) -> &[Block] {
        self.list.blocks()
    }

    /// The blocks to place into the next outgoing SACK option.
    ///
    /// 要放入下一个发出的SACK选项中的块。
    pub fn reported_blocks(&self) -> &[Block] {
        let blocks = self.list.blocks();
        &blocks[..self.config.max_reported_blocks.min(blocks.len())]
    }

    pub fn len(&self) -> usize {
        self.list.blocks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.blocks().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.list.capacity()
    }

    /// Total bytes currently held in blocks.
    pub fn covered_bytes(&self) -> u64 {
        self.list
            .blocks()
            .iter()
            .map(|block| u64::from(block.size()))
            .sum()
    }

    /// The last cumulative ACK processed, if any.
    pub fn last_ack(&self) -> Option<Seq> {
        self.last_ack
    }

    pub fn stats(&self) -> &SackStats {
        &self.stats
    }

    pub fn config(&self) -> &SackConfig {
        &self.config
    }

    /// Forgets every block. The last ACK and the statistics are kept.
    ///
    /// 丢弃所有块。保留最后的确认和统计信息。
    pub fn clear(&mut self) {
        debug!(blocks = self.len(), "Clearing SACK blocks");
        self.list.clear();
    }

    fn check_segment(seq: Seq, len: u32) -> Result<()> {
        if len == 0 {
            return Err(Error::EmptySegment { seq });
        }
        if len > MAX_BLOCK_SIZE {
            return Err(Error::SegmentTooLarge { seq, len });
        }
        Ok(())
    }

    fn check_ack(&self, ack: Seq) -> Result<()> {
        if !self.config.check_ack_monotonicity {
            return Ok(());
        }
        match self.last_ack {
            Some(previous) if seq_lt(ack, previous) => Err(Error::AckRegressed { ack, previous }),
            _ => Ok(()),
        }
    }

    fn forward_segment(&mut self, seq: Seq, len: u32) -> PolicyResult<P> {
        let blocks_before = self.len();
        let result = self.list.recv_out_of_order(seq, len);

        self.stats.segments += 1;
        let recorded = result.bytes > 0 || self.blocks().iter().any(|block| block.contains(seq));
        if recorded {
            self.stats.bytes_sacked += u64::from(result.bytes);
            self.stats.duplicate_bytes += u64::from(len - result.bytes);
            if result.bytes > 0 && self.len() <= blocks_before {
                self.stats.merged += 1;
            }
        } else {
            self.stats.rejected += 1;
        }
        result
    }

    fn forward_ack(&mut self, ack: Seq) -> PolicyResult<P> {
        self.last_ack = Some(ack);
        let result = self.list.new_valid_ack(ack);
        self.stats.acks += 1;
        self.stats.bytes_retired += u64::from(result.bytes);
        result
    }

    fn snapshot(&self, bytes: u32) -> PolicyResult<P> {
        AckResult {
            entries: self.list.entries(),
            bytes,
        }
    }
}
