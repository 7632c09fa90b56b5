#![deny(clippy::expect_used, clippy::unwrap_used)]

//! Receiver-side TCP selective acknowledgment (RFC 2018) tracking.
//! 接收端TCP选择性确认（RFC 2018）跟踪。

pub mod config;
pub mod error;
pub mod sack;
pub mod seq;
pub mod table;

pub use sack::{AckResult, Block, Entries, FixedList, SackEngine, SackPolicy, SackStats};
pub use table::SackTable;
