//! Asynchronous move commits to the external scheduling service.
//!
//! Every commit carries a sequence number. When the same appointment is
//! dropped again before an earlier commit resolves, the earlier response is
//! reported as [`CommitOutcome::Superseded`] whenever it arrives, so a stale
//! success or failure never overrides the newer move.

use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use futures::FutureExt;
use serde::Serialize;
use serde_json::json;
use tokio::task::JoinHandle;

use crate::models::appointment::AppointmentId;
use crate::services::feedback::{FeedbackEvent, FeedbackMetadata, FeedbackSink};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub appointment_id: AppointmentId,
    pub new_date: NaiveDate,
    pub new_time: NaiveTime,
    pub sequence: u64,
}

/// External collaborator that persists moves.
///
/// Must tolerate being called again for the same appointment with a newer
/// value before an earlier call has returned.
#[async_trait]
pub trait MoveCommitService: Send + Sync {
    async fn commit(&self, request: MoveRequest) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    Failed(String),
    /// A newer commit for the same appointment was issued first
    Superseded,
}

#[derive(Debug, Default)]
struct LedgerInner {
    next_sequence: u64,
    latest: HashMap<AppointmentId, u64>,
}

/// Tracks the newest in-flight commit per appointment.
#[derive(Debug, Default)]
pub struct CommitLedger {
    inner: Mutex<LedgerInner>,
}

impl CommitLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LedgerInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Allocate a sequence number and mark it as the newest for `id`.
    pub fn issue(&self, id: &AppointmentId) -> u64 {
        let mut inner = self.lock();
        inner.next_sequence += 1;
        let sequence = inner.next_sequence;
        inner.latest.insert(id.clone(), sequence);
        sequence
    }

    /// Record a response; true when it belongs to the newest commit.
    pub fn settle(&self, id: &AppointmentId, sequence: u64) -> bool {
        let mut inner = self.lock();
        match inner.latest.get(id) {
            Some(&latest) if latest == sequence => {
                inner.latest.remove(id);
                true
            }
            _ => false,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.lock().latest.len()
    }
}

/// Handle to a spawned commit. Drop it to fire and forget.
#[derive(Debug)]
pub struct PendingCommit {
    request: MoveRequest,
    handle: JoinHandle<CommitOutcome>,
}

impl PendingCommit {
    pub fn request(&self) -> &MoveRequest {
        &self.request
    }

    /// Wait for the collaborator's answer.
    pub async fn outcome(self) -> CommitOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(err) => CommitOutcome::Failed(format!("commit task did not complete: {}", err)),
        }
    }
}

pub(crate) fn spawn_commit(
    runtime: &tokio::runtime::Handle,
    service: Arc<dyn MoveCommitService>,
    ledger: Arc<CommitLedger>,
    feedback: FeedbackSink,
    request: MoveRequest,
) -> PendingCommit {
    let task_request = request.clone();
    let handle = runtime.spawn(run_commit(service, ledger, feedback, task_request));
    PendingCommit { request, handle }
}

async fn run_commit(
    service: Arc<dyn MoveCommitService>,
    ledger: Arc<CommitLedger>,
    feedback: FeedbackSink,
    request: MoveRequest,
) -> CommitOutcome {
    // A panicking service is reported like a rejection so the ledger still settles.
    let result = match AssertUnwindSafe(service.commit(request.clone())).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(anyhow!("commit service panicked: {}", panic_message(&*payload))),
    };
    let id = &request.appointment_id;

    if !ledger.settle(id, request.sequence) {
        log::info!(
            "Discarding stale commit #{} for appointment {}",
            request.sequence,
            id
        );
        feedback.emit(
            FeedbackEvent::CommitSuperseded,
            FeedbackMetadata::for_appointment(id).with_extra(json!({ "sequence": request.sequence })),
        );
        return CommitOutcome::Superseded;
    }

    match result {
        Ok(()) => {
            log::info!(
                "Moved appointment {} to {} {}",
                id,
                request.new_date,
                request.new_time.format("%H:%M")
            );
            feedback.emit_for(FeedbackEvent::DragEndSuccess, id);
            CommitOutcome::Committed
        }
        Err(err) => {
            log::warn!("Move of appointment {} was rejected: {:#}", id, err);
            feedback.emit(
                FeedbackEvent::DragEndFailure,
                FeedbackMetadata::for_appointment(id).with_extra(json!({ "error": err.to_string() })),
            );
            CommitOutcome::Failed(err.to_string())
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
