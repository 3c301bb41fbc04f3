use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};

/// Producer's decision on how to end a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionDecision {
    /// Make the prepared message visible to consumers
    Commit,

    /// Discard the prepared message's payload
    Rollback,
}

impl TransactionDecision {
    /// Convert from the wire integer (COMMIT=1, ROLLBACK=2)
    pub fn from_i32(value: i32) -> Result<Self, ProtocolError> {
        match value {
            1 => Ok(Self::Commit),
            2 => Ok(Self::Rollback),
            other => Err(ProtocolError::InvalidDecision(other)),
        }
    }

    /// Convert to the wire integer
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Commit => 1,
            Self::Rollback => 2,
        }
    }
}

impl std::fmt::Display for TransactionDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Commit => "commit",
            Self::Rollback => "rollback",
        };
        write!(f, "{}", s)
    }
}

/// Response code taxonomy for completion requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseCode {
    /// Completion accepted
    Success,

    /// Generic failure: correlation mismatch, lookup miss, storage
    /// allocation failure, or an unclassified store outcome
    SystemError,

    /// Store rejected the terminal record's content
    MessageIllegal,

    /// Store is temporarily refusing writes
    ServiceNotAvailable,
}

impl ResponseCode {
    /// Convert from the wire integer
    pub fn from_i32(value: i32) -> Result<Self, ProtocolError> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::SystemError),
            2 => Ok(Self::MessageIllegal),
            3 => Ok(Self::ServiceNotAvailable),
            other => Err(ProtocolError::InvalidResponseCode(other)),
        }
    }

    /// Convert to the wire integer
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::SystemError => 1,
            Self::MessageIllegal => 2,
            Self::ServiceNotAvailable => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_from_i32() {
        assert_eq!(
            TransactionDecision::from_i32(1).unwrap(),
            TransactionDecision::Commit
        );
        assert_eq!(
            TransactionDecision::from_i32(2).unwrap(),
            TransactionDecision::Rollback
        );
        assert!(TransactionDecision::from_i32(0).is_err());
        assert!(TransactionDecision::from_i32(3).is_err());
    }

    #[test]
    fn test_decision_wire_roundtrip() {
        for decision in [TransactionDecision::Commit, TransactionDecision::Rollback] {
            assert_eq!(
                TransactionDecision::from_i32(decision.as_i32()).unwrap(),
                decision
            );
        }
    }

    #[test]
    fn test_decision_display() {
        assert_eq!(TransactionDecision::Commit.to_string(), "commit");
        assert_eq!(TransactionDecision::Rollback.to_string(), "rollback");
    }

    #[test]
    fn test_response_code_wire_roundtrip() {
        for code in [
            ResponseCode::Success,
            ResponseCode::SystemError,
            ResponseCode::MessageIllegal,
            ResponseCode::ServiceNotAvailable,
        ] {
            assert_eq!(ResponseCode::from_i32(code.as_i32()).unwrap(), code);
        }
        assert!(ResponseCode::from_i32(42).is_err());
    }
}
