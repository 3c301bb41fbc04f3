//! Emberq Wire Protocol
//!
//! This crate defines the transaction-completion records exchanged between
//! producers and the broker, independent of any transport.
//!
//! # Protocol Stability
//!
//! The enum variant order is significant for postcard serialization.
//! Changes to variant order will break wire compatibility with existing
//! clients.

mod error;
mod messages;
mod types;

pub use error::{ProtocolError, Result};
pub use messages::{EndTransactionRequest, Response};
pub use types::{ResponseCode, TransactionDecision};

/// Protocol version for compatibility checking
pub const PROTOCOL_VERSION: u32 = 1;
