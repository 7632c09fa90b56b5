//! 按连接索引的SACK状态表。
//! A table of SACK state indexed by connection.
//!
//! A stack that dispatches connections from several workers keeps one
//! [`SackEngine`] per connection in this table. Every engine is reached only
//! through its own key, so connections never observe each other's blocks;
//! the map shards its locking so unrelated connections rarely contend.
//!
//! 从多个工作线程分发连接的协议栈在此表中为每个连接保存一个 [`SackEngine`]。
//! 每个引擎只能通过其自身的键访问，因此连接之间永远看不到彼此的块。

use crate::{
    config::Config,
    error::{Error, Result},
    sack::{
        FixedList, PolicyResult, SackEngine, SackPolicy, SackStats, engine::DEFAULT_CAPACITY,
    },
    seq::Seq,
};
use dashmap::{DashMap, mapref::entry::Entry};
use std::{fmt, hash::Hash};
use tracing::debug;

/// Per-connection SACK engines keyed by a connection identifier `K`.
///
/// 以连接标识符 `K` 为键的每连接SACK引擎。
#[derive(Debug)]
pub struct SackTable<K, P = FixedList<DEFAULT_CAPACITY>>
where
    K: Eq + Hash,
    P: SackPolicy,
{
    engines: DashMap<K, SackEngine<P>>,
    config: Config,
}

impl<K, P> Default for SackTable<K, P>
where
    K: Eq + Hash + fmt::Debug,
    P: SackPolicy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> SackTable<K, P>
where
    K: Eq + Hash + fmt::Debug,
    P: SackPolicy,
{
    /// Creates an empty table whose engines use the default configuration.
    pub fn new() -> Self {
        Self {
            engines: DashMap::new(),
            config: Config::default(),
        }
    }

    /// Creates an empty table whose engines all use `config`.
    ///
    /// 创建一个空表，其所有引擎都使用 `config`。
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engines: DashMap::new(),
            config,
        })
    }

    /// Starts tracking SACK state for `key`. Returns `false` if the connection
    /// was already tracked, in which case its state is left alone.
    ///
    /// 开始为 `key` 跟踪SACK状态。如果该连接已被跟踪，则返回 `false`，
    /// 其状态保持不变。
    pub fn open(&self, key: K) -> bool {
        match self.engines.entry(key) {
            Entry::Occupied(entry) => {
                debug!(key = ?entry.key(), "SACK state already open");
                false
            }
            Entry::Vacant(entry) => {
                debug!(key = ?entry.key(), "SACK state opened");
                entry.insert(SackEngine::with_sack_config(self.config.sack.clone()));
                true
            }
        }
    }

    /// Stops tracking `key` and returns the final statistics of its engine.
    ///
    /// 停止跟踪 `key` 并返回其引擎的最终统计信息。
    pub fn close(&self, key: &K) -> Option<SackStats> {
        let (key, engine) = self.engines.remove(key)?;
        debug!(key = ?key, stats = %engine.stats(), "SACK state closed");
        Some(*engine.stats())
    }

    /// Records an out-of-order segment for connection `key`.
    pub fn recv_out_of_order(&self, key: &K, seq: Seq, len: u32) -> Result<PolicyResult<P>> {
        let mut engine = self.engines.get_mut(key).ok_or(Error::UnknownConnection)?;
        engine.try_recv_out_of_order(seq, len)
    }

    /// Applies a cumulative ACK advance to connection `key`.
    pub fn new_valid_ack(&self, key: &K, ack: Seq) -> Result<PolicyResult<P>> {
        let mut engine = self.engines.get_mut(key).ok_or(Error::UnknownConnection)?;
        engine.try_new_valid_ack(ack)
    }

    /// Runs `f` against the engine of `key` without modifying it.
    ///
    /// 在不修改的情况下对 `key` 的引擎运行 `f`。
    pub fn inspect<R>(&self, key: &K, f: impl FnOnce(&SackEngine<P>) -> R) -> Option<R> {
        self.engines.get(key).map(|engine| f(&engine))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.engines.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}
