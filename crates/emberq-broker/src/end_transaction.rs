//! Transaction completion: turn a prepared ("half") message into its
//! terminal committed or rolled-back record.
//!
//! Each request is handled in one synchronous sequence: look up the
//! prepared message, check that the request legitimately corresponds to
//! it, derive the terminal record, submit it to the store, and map the
//! write outcome to a response. No state is retained between requests and
//! no locking happens here; ordering guarantees for concurrent
//! completions of the same prepared message are the store's concern.

use emberq_core::{MessageStore, PreparedMessage, TerminalMessage, TransactionPhase, WriteOutcome};
use emberq_protocol::{EndTransactionRequest, Response, ResponseCode, TransactionDecision};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Handles transaction completion requests against an injected store
pub struct EndTransactionProcessor {
    store: Arc<dyn MessageStore>,
}

impl EndTransactionProcessor {
    /// Create a processor writing through the given store
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Process one completion request and produce a response
    pub fn process(&self, request: &EndTransactionRequest) -> Response {
        let prepared = match self.validate(request) {
            Ok(msg) => msg,
            Err(response) => return response,
        };

        debug!(
            topic = %prepared.topic,
            commit_log_offset = request.commit_log_offset,
            decision = %request.decision,
            "ending transaction"
        );

        self.finalize(&prepared, request.decision)
    }

    /// Confirm the request corresponds to a stored prepared message.
    ///
    /// Checks fail fast in a fixed order: lookup, producer group,
    /// transaction state table offset, commit log offset. Correlation is
    /// by content-derived offset, not by client-asserted identity alone.
    fn validate(&self, request: &EndTransactionRequest) -> Result<PreparedMessage, Response> {
        let Some(prepared) = self.store.lookup_by_offset(request.commit_log_offset) else {
            warn!(
                commit_log_offset = request.commit_log_offset,
                producer_group = %request.producer_group,
                "prepared transaction message lookup failed"
            );
            return Err(Response::error(
                ResponseCode::SystemError,
                "find prepared transaction message failed",
            ));
        };

        if prepared.producer_group() != Some(request.producer_group.as_str()) {
            warn!(
                commit_log_offset = request.commit_log_offset,
                requested_group = %request.producer_group,
                "producer group does not match prepared message"
            );
            return Err(Response::error(
                ResponseCode::SystemError,
                "the producer group wrong",
            ));
        }

        if prepared.queue_offset != request.tran_state_table_offset {
            warn!(
                commit_log_offset = request.commit_log_offset,
                expected = prepared.queue_offset,
                requested = request.tran_state_table_offset,
                "transaction state table offset does not match prepared message"
            );
            return Err(Response::error(
                ResponseCode::SystemError,
                "the transaction state table offset wrong",
            ));
        }

        if prepared.commit_log_offset != request.commit_log_offset {
            warn!(
                expected = prepared.commit_log_offset,
                requested = request.commit_log_offset,
                "commit log offset does not match prepared message"
            );
            return Err(Response::error(
                ResponseCode::SystemError,
                "the commit log offset wrong",
            ));
        }

        Ok(prepared)
    }

    /// Derive the terminal record, submit it, and translate the outcome
    fn finalize(&self, prepared: &PreparedMessage, decision: TransactionDecision) -> Response {
        let phase = match decision {
            TransactionDecision::Commit => TransactionPhase::Commit,
            TransactionDecision::Rollback => TransactionPhase::Rollback,
        };
        let terminal = TerminalMessage::from_prepared(prepared, phase);

        match self.store.write(terminal) {
            Some(outcome) => match outcome {
                // Flush/replica caveats are advisory, not completion failures
                WriteOutcome::Ok
                | WriteOutcome::FlushTimeout
                | WriteOutcome::ReplicaTimeout
                | WriteOutcome::ReplicaUnavailable => Response::success(),

                WriteOutcome::AllocFailed => Response::error(
                    ResponseCode::SystemError,
                    "create storage segment failed",
                ),
                WriteOutcome::Illegal => Response::error(
                    ResponseCode::MessageIllegal,
                    "the message is illegal, maybe length not matched",
                ),
                WriteOutcome::ServiceUnavailable => Response::error(
                    ResponseCode::ServiceNotAvailable,
                    "service not available now",
                ),

                // Unknown and any future outcome must never pass as success
                other => {
                    warn!(outcome = ?other, "unclassified store write outcome");
                    Response::error(ResponseCode::SystemError, "unknown store outcome")
                }
            },
            None => {
                error!(
                    prepared_transaction_offset = prepared.commit_log_offset,
                    "store write returned no outcome"
                );
                Response::error(ResponseCode::SystemError, "store write returned nothing")
            }
        }
    }
}
