use crate::error::Result;
use crate::types::{ResponseCode, TransactionDecision};
use serde::{Deserialize, Serialize};

/// Producer's request to finalize a previously prepared message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndTransactionRequest {
    /// Producer group that created the prepared message
    pub producer_group: String,

    /// Slot in the transaction state table; must match the prepared
    /// message's `queue_offset`
    pub tran_state_table_offset: u64,

    /// Physical offset of the prepared message in the commit log
    pub commit_log_offset: u64,

    /// Commit or rollback
    pub decision: TransactionDecision,
}

impl EndTransactionRequest {
    /// Serialize to wire bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Deserialize from wire bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(postcard::from_bytes(data)?)
    }
}

/// Response to a completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub code: ResponseCode,

    /// Human-readable detail; empty on success
    pub remark: String,
}

impl Response {
    /// Successful completion, no remark
    pub fn success() -> Self {
        Self {
            code: ResponseCode::Success,
            remark: String::new(),
        }
    }

    /// Failed completion with a remark
    pub fn error(code: ResponseCode, remark: impl Into<String>) -> Self {
        Self {
            code,
            remark: remark.into(),
        }
    }

    /// Check if this response reports success
    pub fn is_success(&self) -> bool {
        self.code == ResponseCode::Success
    }

    /// Serialize to wire bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Deserialize from wire bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(postcard::from_bytes(data)?)
    }
}
