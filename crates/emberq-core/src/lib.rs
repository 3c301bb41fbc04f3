//! Emberq core: message model and storage abstraction.
//!
//! This crate holds the records shared by every Emberq component — the
//! prepared ("half") transactional message and the terminal record derived
//! from it — together with the system-flag bit layout and the
//! [`MessageStore`] seam the broker writes through.

pub mod error;
pub mod message;
pub mod serde_utils;
pub mod storage;
pub mod sysflag;

pub use error::{Error, Result};
pub use message::{
    PreparedMessage, TerminalMessage, PROPERTY_DELAY_LEVEL, PROPERTY_PRODUCER_GROUP,
};
pub use storage::{MemoryMessageStore, MemoryStoreConfig, MessageStore, WriteOutcome};
pub use sysflag::{tags_code, TopicFilterType, TransactionPhase};
