//! 32位序列号的回绕算术。
//! Wraparound arithmetic over the 32-bit sequence number space.
//!
//! All comparisons are done through the signed difference of two sequence
//! numbers, so a counter that wraps past `u32::MAX` keeps a correct ordering
//! as long as the compared values are less than 2^31 apart.
//!
//! 所有比较都通过两个序列号的有符号差值完成，因此只要比较的值相距小于2^31，
//! 越过 `u32::MAX` 回绕的计数器仍能保持正确的顺序。

/// A TCP sequence number.
/// TCP序列号。
pub type Seq = u32;

/// Returns `true` if `a` comes strictly before `b`.
/// 如果 `a` 严格位于 `b` 之前，则返回 `true`。
#[inline]
pub fn seq_lt(a: Seq, b: Seq) -> bool {
    (a.wrapping_sub(b) as i32) < 0
}

/// Returns `true` if `a` comes before or is equal to `b`.
/// 如果 `a` 位于 `b` 之前或等于 `b`，则返回 `true`。
#[inline]
pub fn seq_le(a: Seq, b: Seq) -> bool {
    (a.wrapping_sub(b) as i32) <= 0
}

/// Returns `true` if `a` comes strictly after `b`.
#[inline]
pub fn seq_gt(a: Seq, b: Seq) -> bool {
    seq_lt(b, a)
}

/// Returns `true` if `a` comes after or is equal to `b`.
#[inline]
pub fn seq_ge(a: Seq, b: Seq) -> bool {
    seq_le(b, a)
}

/// Number of sequence numbers from `from` up to `to`, modulo 2^32.
///
/// 从 `from` 到 `to` 的序列号数量（模2^32）。
#[inline]
pub fn distance(from: Seq, to: Seq) -> u32 {
    to.wrapping_sub(from)
}

/// The earlier of two sequence numbers.
#[inline]
pub fn seq_min(a: Seq, b: Seq) -> Seq {
    if seq_lt(b, a) { b } else { a }
}

/// The later of two sequence numbers.
#[inline]
pub fn seq_max(a: Seq, b: Seq) -> Seq {
    if seq_gt(b, a) { b } else { a }
}
