//! Queue draining.
//!
//! Drives `FrontDesk::process_next` until the queue is empty or no
//! further progress is possible, and reports what happened to every
//! patient.

use serde::Serialize;

use crate::desk::FrontDesk;
use crate::patients::PatientRecord;
use crate::queue::Assignment;

/// Summary of one drain run.
#[derive(Debug, Default, Serialize)]
pub struct DrainReport {
    pub assignments: Vec<Assignment>,
    /// Patients dropped because they could not be assigned.
    pub unassigned: Vec<PatientRecord>,
    /// Patients still queued when the run stopped (requeue mode only).
    pub waiting: usize,
}

/// Assign queued patients until the queue is empty.
///
/// A `NotFound` for the head patient either drops them
/// (`requeue_unmatched == false`) or moves them to the back of the queue.
/// In requeue mode the run stops once a full pass over the queue assigns
/// nobody, since nothing frees a doctor while draining.
pub async fn drain_queue(desk: &FrontDesk, requeue_unmatched: bool) -> DrainReport {
    let mut report = DrainReport::default();
    let mut stalled = 0usize;

    tracing::info!(
        "Draining queue ({} waiting, requeue unmatched: {})",
        desk.queue_len().await,
        requeue_unmatched
    );

    loop {
        let waiting = desk.queue_len().await;
        if waiting == 0 {
            break;
        }
        if stalled >= waiting {
            tracing::warn!("No doctor can take any of the {} waiting patients", waiting);
            report.waiting = waiting;
            break;
        }

        match desk.process_next().await {
            Ok(assignment) => {
                stalled = 0;
                report.assignments.push(assignment);
            }
            Err(err) if err.is_recoverable() => {
                if requeue_unmatched {
                    desk.requeue_head().await;
                    stalled += 1;
                } else if let Some(patient) = desk.discharge_head().await {
                    report.unassigned.push(patient);
                }
            }
            Err(err) => {
                tracing::error!("Stopping drain: {}", err);
                report.waiting = desk.queue_len().await;
                break;
            }
        }
    }

    tracing::info!(
        "Drain finished: {} assigned, {} unassigned, {} waiting",
        report.assignments.len(),
        report.unassigned.len(),
        report.waiting
    );

    report
}
