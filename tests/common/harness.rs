//! tests/common/harness.rs
use std::sync::Once;
use tcp_sack::{Block, SackEngine, SackPolicy};

/// Initializes tracing for tests, ensuring it's only done once.
pub fn init_tracing() {
    static TRACING_INIT: Once = Once::new();
    TRACING_INIT.call_once(|| {
        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "tcp_sack=debug".to_string());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// Builds a block list from `(left edge, right edge)` pairs.
pub fn blocks(edges: &[(u32, u32)]) -> Vec<Block> {
    edges
        .iter()
        .map(|&(start, end)| Block::new(start, end))
        .collect()
}

/// The `(left edge, right edge)` pairs an engine would put into its next
/// SACK option.
pub fn option_edges<P: SackPolicy>(sack: &SackEngine<P>) -> Vec<(u32, u32)> {
    sack.reported_blocks()
        .iter()
        .map(|block| (block.start(), block.end()))
        .collect()
}
