//! 定义了SACK跟踪的可配置参数。
//! Defines configurable parameters for SACK tracking.

use crate::error::{Error, Result};

/// The most SACK blocks a TCP option can carry (RFC 2018, section 3).
/// 一个TCP选项最多可以携带的SACK块数（RFC 2018，第3节）。
pub const MAX_OPTION_BLOCKS: usize = 4;

/// A structure containing all configurable parameters.
///
/// 包含所有可配置参数的结构体。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// SACK reporting parameters.
    /// SACK报告相关参数。
    pub sack: SackConfig,
}

/// SACK reporting parameters.
///
/// The number of blocks a list tracks is fixed at compile time by its type;
/// these settings only govern how the list is reported and checked.
///
/// SACK报告相关参数。列表跟踪的块数在编译期由其类型确定；
/// 这些设置只控制列表的报告和检查方式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SackConfig {
    /// How many of the most recently changed blocks go into one SACK option.
    /// Three leaves room for the timestamp option.
    /// 一个SACK选项中放入多少个最近修改的块。三个块为时间戳选项留出空间。
    pub max_reported_blocks: usize,
    /// Remember the last cumulative ACK and treat a regression as a caller bug.
    /// 记住最后一个累积确认，并将其回退视为调用方错误。
    pub check_ack_monotonicity: bool,
}

impl Default for SackConfig {
    fn default() -> Self {
        Self {
            max_reported_blocks: 3,
            check_ack_monotonicity: true,
        }
    }
}

impl Config {
    /// Checks that every parameter is within its allowed range.
    ///
    /// 检查每个参数是否在允许范围内。
    pub fn validate(&self) -> Result<()> {
        if self.sack.max_reported_blocks == 0 {
            return Err(Error::InvalidConfig("max_reported_blocks must be at least 1"));
        }
        if self.sack.max_reported_blocks > MAX_OPTION_BLOCKS {
            return Err(Error::InvalidConfig(
                "max_reported_blocks exceeds the TCP option space",
            ));
        }
        Ok(())
    }
}
