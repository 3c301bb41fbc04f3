//! In-memory commit log, used for tests and embedded setups.

use crate::message::{PreparedMessage, TerminalMessage};
use crate::storage::traits::{MessageStore, WriteOutcome};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Configuration for [`MemoryMessageStore`]
#[derive(Debug, Clone)]
pub struct MemoryStoreConfig {
    /// Commit-log offset assigned to the first prepared record
    pub base_offset: u64,

    /// Maximum accepted body size in bytes; larger terminal records are
    /// rejected as illegal
    pub max_message_size: usize,
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        Self {
            base_offset: 0,
            max_message_size: 4 * 1024 * 1024, // 4 MiB
        }
    }
}

impl MemoryStoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first assigned commit-log offset
    pub fn with_base_offset(mut self, base_offset: u64) -> Self {
        self.base_offset = base_offset;
        self
    }

    /// Set the maximum accepted body size
    pub fn with_max_message_size(mut self, max_message_size: usize) -> Self {
        self.max_message_size = max_message_size;
        self
    }
}

struct Inner {
    prepared: BTreeMap<u64, PreparedMessage>,
    written: Vec<TerminalMessage>,
    next_offset: u64,
    available: bool,
}

/// A [`MessageStore`] backed by process memory.
///
/// Prepared records are keyed by commit-log offset; terminal writes land
/// in an append log. Writes are not deduplicated.
pub struct MemoryMessageStore {
    config: MemoryStoreConfig,
    inner: RwLock<Inner>,
}

impl Default for MemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self::with_config(MemoryStoreConfig::default())
    }

    pub fn with_config(config: MemoryStoreConfig) -> Self {
        let next_offset = config.base_offset;
        Self {
            config,
            inner: RwLock::new(Inner {
                prepared: BTreeMap::new(),
                written: Vec::new(),
                next_offset,
                available: true,
            }),
        }
    }

    /// Store a prepared message, assigning and returning its commit-log
    /// offset. The assigned offset is stamped into the stored record.
    pub fn prepare(&self, mut message: PreparedMessage) -> u64 {
        let mut inner = self.inner.write();
        let offset = inner.next_offset;
        inner.next_offset += 1;
        message.commit_log_offset = offset;
        inner.prepared.insert(offset, message);
        offset
    }

    /// Toggle write availability; unavailable stores refuse writes with
    /// [`WriteOutcome::ServiceUnavailable`]
    pub fn set_available(&self, available: bool) {
        self.inner.write().available = available;
    }

    /// Terminal records written so far
    pub fn written(&self) -> Vec<TerminalMessage> {
        self.inner.read().written.clone()
    }

    /// Number of prepared records currently stored
    pub fn prepared_count(&self) -> usize {
        self.inner.read().prepared.len()
    }
}

impl MessageStore for MemoryMessageStore {
    fn lookup_by_offset(&self, commit_log_offset: u64) -> Option<PreparedMessage> {
        self.inner.read().prepared.get(&commit_log_offset).cloned()
    }

    fn write(&self, message: TerminalMessage) -> Option<WriteOutcome> {
        let mut inner = self.inner.write();
        if !inner.available {
            return Some(WriteOutcome::ServiceUnavailable);
        }
        if message.body.len() > self.config.max_message_size {
            return Some(WriteOutcome::Illegal);
        }
        inner.written.push(message);
        Some(WriteOutcome::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::PROPERTY_PRODUCER_GROUP;
    use crate::sysflag::{TransactionPhase, TRANSACTION_PREPARED_TYPE};
    use bytes::Bytes;
    use std::collections::BTreeMap;

    fn prepared(body: &'static [u8]) -> PreparedMessage {
        let mut properties = BTreeMap::new();
        properties.insert(PROPERTY_PRODUCER_GROUP.to_string(), "G1".to_string());
        PreparedMessage {
            topic: "orders".to_string(),
            queue_id: 0,
            body: Bytes::from_static(body),
            flag: 0,
            sys_flag: TRANSACTION_PREPARED_TYPE,
            tags: String::new(),
            properties,
            born_timestamp: 0,
            born_host: "127.0.0.1:1".parse().unwrap(),
            store_host: "127.0.0.1:2".parse().unwrap(),
            store_timestamp: 0,
            reconsume_times: 0,
            queue_offset: 0,
            commit_log_offset: 0,
        }
    }

    #[test]
    fn test_prepare_assigns_sequential_offsets() {
        let store = MemoryMessageStore::with_config(MemoryStoreConfig::new().with_base_offset(100));

        let first = store.prepare(prepared(b"a"));
        let second = store.prepare(prepared(b"b"));
        assert_eq!(first, 100);
        assert_eq!(second, 101);

        let found = store.lookup_by_offset(first).unwrap();
        assert_eq!(found.commit_log_offset, 100);
        assert_eq!(found.body, Bytes::from_static(b"a"));
    }

    #[test]
    fn test_lookup_miss() {
        let store = MemoryMessageStore::new();
        assert!(store.lookup_by_offset(9999).is_none());
    }

    #[test]
    fn test_write_appends() {
        let store = MemoryMessageStore::new();
        let offset = store.prepare(prepared(b"payload"));
        let msg = store.lookup_by_offset(offset).unwrap();

        let terminal = TerminalMessage::from_prepared(&msg, TransactionPhase::Commit);
        assert_eq!(store.write(terminal), Some(WriteOutcome::Ok));
        assert_eq!(store.written().len(), 1);
        assert_eq!(store.written()[0].prepared_transaction_offset, offset);
    }

    #[test]
    fn test_oversize_write_is_illegal() {
        let store =
            MemoryMessageStore::with_config(MemoryStoreConfig::new().with_max_message_size(3));
        let offset = store.prepare(prepared(b"too large"));
        let msg = store.lookup_by_offset(offset).unwrap();

        let terminal = TerminalMessage::from_prepared(&msg, TransactionPhase::Commit);
        assert_eq!(store.write(terminal), Some(WriteOutcome::Illegal));
        assert!(store.written().is_empty());
    }

    #[test]
    fn test_unavailable_store_refuses_writes() {
        let store = MemoryMessageStore::new();
        let offset = store.prepare(prepared(b"x"));
        let msg = store.lookup_by_offset(offset).unwrap();

        store.set_available(false);
        let terminal = TerminalMessage::from_prepared(&msg, TransactionPhase::Commit);
        assert_eq!(
            store.write(terminal.clone()),
            Some(WriteOutcome::ServiceUnavailable)
        );

        store.set_available(true);
        assert_eq!(store.write(terminal), Some(WriteOutcome::Ok));
    }
}
