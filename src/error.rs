//! 定义了库中所有可能的错误类型。
//! Defines all possible error types in the library.

use thiserror::Error;

/// The primary error type for the SACK library.
/// SACK库的主要错误类型。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A segment of zero bytes was reported as received out of order.
    /// 一个零字节的数据段被报告为乱序接收。
    #[error("empty segment at sequence {seq}")]
    EmptySegment { seq: u32 },

    /// A segment is too long for its edges to be ordered by sequence arithmetic.
    /// 数据段过长，其边界无法通过序列号算术排序。
    #[error("segment of {len} bytes at sequence {seq} exceeds the sequence window")]
    SegmentTooLarge { seq: u32, len: u32 },

    /// The cumulative ACK moved backwards.
    /// 累积确认向后移动。
    #[error("cumulative ACK regressed from {previous} to {ack}")]
    AckRegressed { ack: u32, previous: u32 },

    /// A block edge change would leave the block empty or inverted.
    /// 块边界的修改会使块变为空或反转。
    #[error("invalid block [{start}, {end})")]
    InvalidBlock { start: u32, end: u32 },

    /// A configuration value is out of range.
    /// 配置值超出范围。
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// No SACK state is registered for the connection.
    /// 该连接没有注册SACK状态。
    #[error("no SACK state for connection")]
    UnknownConnection,
}

/// A specialized `Result` type for this library.
/// 本库专用的 `Result` 类型。
pub type Result<T> = std::result::Result<T, Error>;
