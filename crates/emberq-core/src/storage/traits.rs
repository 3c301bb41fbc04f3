use crate::message::{PreparedMessage, TerminalMessage};
use serde::{Deserialize, Serialize};

/// Outcome of a durable write attempt.
///
/// Non-exhaustive: stores may grow new outcomes, and callers must route
/// anything unrecognized through their default (error) arm rather than
/// silently succeeding.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteOutcome {
    /// Write durable and acknowledged
    Ok,

    /// Written, but the local flush confirmation timed out
    FlushTimeout,

    /// Written, but a replica did not acknowledge in time
    ReplicaTimeout,

    /// Written, but no replica was reachable
    ReplicaUnavailable,

    /// Could not allocate a storage segment for the record
    AllocFailed,

    /// Record failed structural or size validation
    Illegal,

    /// Store is temporarily refusing writes
    ServiceUnavailable,

    /// Store could not classify the failure
    Unknown,
}

/// Durable message store consumed by the broker.
///
/// Implementations MAY deduplicate terminal writes by
/// `prepared_transaction_offset`; the broker itself does not guard against
/// two concurrent completions of the same prepared message.
pub trait MessageStore: Send + Sync {
    /// Look up a message by its physical commit-log offset
    fn lookup_by_offset(&self, commit_log_offset: u64) -> Option<PreparedMessage>;

    /// Append a terminal record.
    ///
    /// `None` means the store failed to even attempt the write and is a
    /// contract violation from the broker's point of view.
    fn write(&self, message: TerminalMessage) -> Option<WriteOutcome>;
}
