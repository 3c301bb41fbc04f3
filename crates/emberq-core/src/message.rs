//! Message records as they live in the commit log.
//!
//! A transactional produce stores a [`PreparedMessage`] that stays
//! invisible to consumers until the producer ends the transaction. Ending
//! it derives a [`TerminalMessage`] from the prepared record; the prepared
//! record itself is immutable and is never rewritten in place.

use crate::serde_utils::bytes_serde;
use crate::sysflag::{tags_code, TopicFilterType, TransactionPhase};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;

/// Property key recording the producer group that created a message
pub const PROPERTY_PRODUCER_GROUP: &str = "PGROUP";

/// Property key marking a message for scheduled (delayed) delivery
pub const PROPERTY_DELAY_LEVEL: &str = "DELAY";

/// A prepared ("half") transactional message read back from the commit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedMessage {
    /// Destination topic
    pub topic: String,

    /// Destination queue within the topic
    pub queue_id: u32,

    /// Opaque payload
    #[serde(with = "bytes_serde")]
    pub body: Bytes,

    /// Producer-supplied bit flags, carried opaquely
    pub flag: i32,

    /// System bit flags, see [`crate::sysflag`]
    pub sys_flag: i32,

    /// Tags for consumer-side filtering
    pub tags: String,

    /// Ordered user/system properties
    pub properties: BTreeMap<String, String>,

    /// Producer-side creation time, epoch millis
    pub born_timestamp: i64,

    /// Address of the producing client
    pub born_host: SocketAddr,

    /// Address of the broker that stored the message
    pub store_host: SocketAddr,

    /// Broker-side store time, epoch millis
    pub store_timestamp: i64,

    /// Redelivery count
    pub reconsume_times: i32,

    /// Slot in the transaction state table, correlates the prepared
    /// record with its eventual completion
    pub queue_offset: u64,

    /// Physical position of this record in the commit log
    pub commit_log_offset: u64,
}

impl PreparedMessage {
    /// Producer group recorded at produce time, if any
    pub fn producer_group(&self) -> Option<&str> {
        self.properties.get(PROPERTY_PRODUCER_GROUP).map(|s| s.as_str())
    }

    /// Delay level marker, if the message was scheduled
    pub fn delay_level(&self) -> Option<&str> {
        self.properties.get(PROPERTY_DELAY_LEVEL).map(|s| s.as_str())
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> crate::Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from bytes
    pub fn from_bytes(data: &[u8]) -> crate::Result<Self> {
        Ok(bincode::deserialize(data)?)
    }
}

/// The terminal committed or rolled-back record derived from a prepared
/// message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalMessage {
    pub topic: String,
    pub queue_id: u32,

    /// Payload; empty for rollbacks
    #[serde(with = "bytes_serde")]
    pub body: Bytes,

    pub flag: i32,

    /// Prepared message's flags with the phase sub-field rewritten
    pub sys_flag: i32,

    pub tags: String,

    /// Recomputed filtering code, see [`crate::sysflag::tags_code`]
    pub tags_code: i64,

    /// Properties copied from the prepared message, delay marker removed
    pub properties: BTreeMap<String, String>,

    pub born_timestamp: i64,
    pub born_host: SocketAddr,
    pub store_host: SocketAddr,

    /// Preserved from the prepared record to keep its ordering context
    pub store_timestamp: i64,

    pub reconsume_times: i32,

    /// Re-links the terminal record to its transaction state table slot
    pub queue_offset: u64,

    /// Commit-log offset of the originating prepared record
    pub prepared_transaction_offset: u64,

    /// Whether the store should block the write on flush confirmation.
    /// Always false for completion records.
    pub wait_for_flush_ack: bool,
}

impl TerminalMessage {
    /// Derive the terminal record for a validated prepared message.
    ///
    /// Pure construction: the prepared message is only read. The delay
    /// marker is stripped (a terminal record is never scheduled), the
    /// tags code is recomputed under the filter type implied by the
    /// original `sys_flag`, the phase sub-field is rewritten to `phase`,
    /// and a rollback clears the body to an empty tombstone.
    pub fn from_prepared(prepared: &PreparedMessage, phase: TransactionPhase) -> Self {
        let mut properties = prepared.properties.clone();
        properties.remove(PROPERTY_DELAY_LEVEL);

        let filter_type = TopicFilterType::from_sys_flag(prepared.sys_flag);

        let body = if phase == TransactionPhase::Rollback {
            Bytes::new()
        } else {
            prepared.body.clone()
        };

        Self {
            topic: prepared.topic.clone(),
            queue_id: prepared.queue_id,
            body,
            flag: prepared.flag,
            sys_flag: phase.apply(prepared.sys_flag),
            tags: prepared.tags.clone(),
            tags_code: tags_code(filter_type, &prepared.tags),
            properties,
            born_timestamp: prepared.born_timestamp,
            born_host: prepared.born_host,
            store_host: prepared.store_host,
            store_timestamp: prepared.store_timestamp,
            reconsume_times: prepared.reconsume_times,
            queue_offset: prepared.queue_offset,
            prepared_transaction_offset: prepared.commit_log_offset,
            wait_for_flush_ack: false,
        }
    }

    /// Transaction phase this record carries
    pub fn phase(&self) -> TransactionPhase {
        TransactionPhase::from_sys_flag(self.sys_flag)
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> crate::Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from bytes
    pub fn from_bytes(data: &[u8]) -> crate::Result<Self> {
        Ok(bincode::deserialize(data)?)
    }
}
