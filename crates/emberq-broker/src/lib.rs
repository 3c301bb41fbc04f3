//! Emberq broker: transaction completion.
//!
//! Exposes [`EndTransactionProcessor`], the component that finalizes
//! prepared transactional messages on producer instruction. Transport,
//! replication, and producer-side bookkeeping live elsewhere; this crate
//! consumes the store through the [`emberq_core::MessageStore`] seam and
//! speaks the records defined in [`emberq_protocol`].

pub mod end_transaction;

pub use end_transaction::EndTransactionProcessor;
