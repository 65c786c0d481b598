//! Front desk service.
//!
//! `FrontDesk` owns the doctor directory, the patient records and the
//! assignment queue, each behind a Tokio lock so the desk can be cloned
//! into several tasks. Whenever both the queue and the directory are
//! needed, the queue lock is taken first and the directory write lock
//! second; `process_next` holds both for the whole scan-and-flip, so two
//! workers can never hand the same doctor to two patients.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{Mutex, RwLock};

use crate::directory::{Doctor, DoctorDirectory, DoctorId, DoctorRecord};
use crate::error::{DeskError, DeskResult};
use crate::patients::{Patient, PatientId, PatientRecord, PatientRecords};
use crate::queue::{Assignment, AssignmentQueue};

/// Shared handle to the front desk. Cloning shares the same stores.
#[derive(Debug, Clone, Default)]
pub struct FrontDesk {
    directory: Arc<RwLock<DoctorDirectory>>,
    patients: Arc<RwLock<PatientRecords>>,
    queue: Arc<Mutex<AssignmentQueue>>,
}

impl FrontDesk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build, validate and register a doctor in one call.
    pub async fn register_doctor(
        &self,
        name: &str,
        id: &str,
        department: &str,
        contact_info: Option<String>,
    ) -> DeskResult<DoctorId> {
        let mut doctor = Doctor::new(name, id)?;
        doctor.set_department(department)?;
        doctor.set_contact_info(contact_info);

        let id = self.directory.write().await.register(&doctor)?;
        tracing::info!("Doctor {} registered in {}", id, department);
        Ok(id)
    }

    pub async fn register_patient(
        &self,
        name: &str,
        age: i64,
        email: &str,
        problem: &str,
    ) -> DeskResult<PatientId> {
        let id = self.patients.write().await.admit(name, age, email, problem)?;
        tracing::info!("Patient {} registered", id);
        Ok(id)
    }

    /// Admit a patient given as an untyped value (one roster arrival) and
    /// queue them straight away.
    pub async fn admit_arrival(&self, value: Value) -> DeskResult<PatientId> {
        let record = PatientRecord::from_value(value)?;
        let patient = Patient::from_record(&record)?;

        let id = self.patients.write().await.track(patient);
        self.enqueue_patient(id).await?;
        Ok(id)
    }

    pub async fn enqueue_patient(&self, id: PatientId) -> DeskResult<()> {
        let patient = self.patients.read().await.get(id).ok_or_else(|| {
            DeskError::invalid_state(format!("Patient {} is not registered", id))
        })?;

        let mut queue = self.queue.lock().await;
        queue.enqueue(patient);
        tracing::debug!("Patient {} queued (queue length {})", id, queue.size());
        Ok(())
    }

    /// Assign the patient at the head of the queue to a doctor.
    pub async fn process_next(&self) -> DeskResult<Assignment> {
        let mut queue = self.queue.lock().await;
        let mut directory = self.directory.write().await;

        match queue.assign_doctor(&mut directory) {
            Ok(assignment) => {
                tracing::info!(
                    "Assigned {} to {} in {}",
                    assignment.patient.name,
                    assignment.doctor.name,
                    assignment.department
                );
                Ok(assignment)
            }
            Err(err) => {
                if err.is_recoverable() {
                    tracing::warn!("Assignment deferred: {}", err);
                } else {
                    tracing::debug!("Assignment not possible: {}", err);
                }
                Err(err)
            }
        }
    }

    /// Move the head patient to the back of the queue. Returns `false` if
    /// the queue is empty.
    pub async fn requeue_head(&self) -> bool {
        let mut queue = self.queue.lock().await;
        match queue.dequeue() {
            Some(patient) => {
                tracing::debug!("Requeued {}", patient.name());
                queue.enqueue(patient);
                true
            }
            None => false,
        }
    }

    /// Drop the head patient without assigning them.
    pub async fn discharge_head(&self) -> Option<PatientRecord> {
        let patient = self.queue.lock().await.dequeue()?;
        tracing::info!("{} left the queue unassigned", patient.name());
        Some(patient.record())
    }

    /// Make a doctor available again once their patient has been seen.
    pub async fn release_doctor(&self, id: &str) -> DeskResult<()> {
        self.directory.write().await.release(id)?;
        tracing::info!("Doctor {} is available again", id);
        Ok(())
    }

    pub async fn doctor_availability(&self, id: &str) -> Option<bool> {
        self.directory.read().await.availability_by_id(id)
    }

    pub async fn directory_snapshot(&self) -> Vec<DoctorRecord> {
        self.directory.read().await.snapshot()
    }

    pub async fn patient_list(&self) -> Vec<PatientRecord> {
        self.patients.read().await.list_all()
    }

    pub async fn queue_len(&self) -> usize {
        self.queue.lock().await.size()
    }

    pub async fn patient_count(&self) -> usize {
        self.patients.read().await.count()
    }
}
