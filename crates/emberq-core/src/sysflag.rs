//! System flag bit layout shared by every stored message.
//!
//! `sys_flag` is a 32-bit field carried on the wire and in the commit log.
//! Bit 0 marks a compressed body, bit 1 marks a multi-tag topic, and bits
//! 2–3 hold the transaction-phase sub-field. All remaining bits are
//! reserved and must survive any rewrite untouched.

use serde::{Deserialize, Serialize};

/// Body is compressed
pub const COMPRESSED_FLAG: i32 = 0x1;

/// Message carries multiple tags
pub const MULTI_TAGS_FLAG: i32 = 0x1 << 1;

/// Not part of a transaction
pub const TRANSACTION_NOT_TYPE: i32 = 0;

/// Prepared ("half") transactional message
pub const TRANSACTION_PREPARED_TYPE: i32 = 0x1 << 2;

/// Committed transactional message
pub const TRANSACTION_COMMIT_TYPE: i32 = 0x2 << 2;

/// Rolled-back transactional message
pub const TRANSACTION_ROLLBACK_TYPE: i32 = 0x3 << 2;

/// Mask covering the transaction-phase sub-field (bits 2-3)
const TRANSACTION_TYPE_MASK: i32 = 0x3 << 2;

/// Transaction phase encoded in the `sys_flag` sub-field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionPhase {
    /// Ordinary, non-transactional message
    NotTransactional,

    /// Stored but not yet visible to consumers
    Prepared,

    /// Terminal: transaction committed
    Commit,

    /// Terminal: transaction rolled back
    Rollback,
}

impl TransactionPhase {
    /// Decode the phase sub-field of a `sys_flag` value
    pub fn from_sys_flag(sys_flag: i32) -> Self {
        match sys_flag & TRANSACTION_TYPE_MASK {
            TRANSACTION_PREPARED_TYPE => Self::Prepared,
            TRANSACTION_COMMIT_TYPE => Self::Commit,
            TRANSACTION_ROLLBACK_TYPE => Self::Rollback,
            _ => Self::NotTransactional,
        }
    }

    /// Sub-field bit pattern for this phase
    pub fn bits(&self) -> i32 {
        match self {
            Self::NotTransactional => TRANSACTION_NOT_TYPE,
            Self::Prepared => TRANSACTION_PREPARED_TYPE,
            Self::Commit => TRANSACTION_COMMIT_TYPE,
            Self::Rollback => TRANSACTION_ROLLBACK_TYPE,
        }
    }

    /// Rewrite the phase sub-field of `sys_flag`, preserving all other bits
    pub fn apply(&self, sys_flag: i32) -> i32 {
        (sys_flag & !TRANSACTION_TYPE_MASK) | self.bits()
    }

    /// Check if this phase is terminal (commit or rollback)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Commit | Self::Rollback)
    }
}

impl std::fmt::Display for TransactionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NotTransactional => "not_transactional",
            Self::Prepared => "prepared",
            Self::Commit => "commit",
            Self::Rollback => "rollback",
        };
        write!(f, "{}", s)
    }
}

/// Tag filtering mode for a topic, implied by the multi-tag bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopicFilterType {
    /// At most one tag per message
    SingleTag,

    /// Message may carry several tags
    MultiTag,
}

impl TopicFilterType {
    /// Derive the filter type from a message's `sys_flag`
    pub fn from_sys_flag(sys_flag: i32) -> Self {
        if sys_flag & MULTI_TAGS_FLAG == MULTI_TAGS_FLAG {
            Self::MultiTag
        } else {
            Self::SingleTag
        }
    }
}

/// Compute the tags code stored alongside a message for consumer-side
/// filtering.
///
/// Empty tags hash to 0. Both filter types use the same 32-bit polynomial
/// string hash sign-extended to i64; the selector exists so a
/// filtering-aware store can diverge per mode later.
pub fn tags_code(_filter_type: TopicFilterType, tags: &str) -> i64 {
    if tags.is_empty() {
        return 0;
    }
    let mut h: i32 = 0;
    for ch in tags.chars() {
        h = h.wrapping_mul(31).wrapping_add(ch as i32);
    }
    h as i64
}
