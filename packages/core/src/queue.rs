//! FIFO patient queue and doctor assignment.
//!
//! `assign_doctor` only ever looks at the head of the queue. It either
//! flips exactly one doctor to unavailable and removes the head patient,
//! or it returns an error and leaves both the queue and the directory
//! as they were.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::Serialize;

use crate::directory::{Department, DoctorDirectory, DoctorRecord};
use crate::error::{DeskError, DeskResult};
use crate::patients::{Patient, PatientRecord};

/// Normalized problem text → department.
pub const PROBLEM_DEPARTMENTS: &[(&str, Department)] = &[
    ("heart pain", Department::Cardiology),
    ("chest pain", Department::Cardiology),
    ("ear ache", Department::Ent),
    ("sore throat", Department::Ent),
    ("broken bone", Department::Orthopedics),
    ("joint pain", Department::Orthopedics),
    ("skin rash", Department::Dermatology),
    ("eczema", Department::Dermatology),
    ("fever", Department::Pediatrics),
    ("cold", Department::General),
    ("headache", Department::General),
];

/// Look up the department for a problem, ignoring surrounding whitespace
/// and case.
pub fn department_for_problem(problem: &str) -> Option<Department> {
    let key = problem.trim().to_lowercase();
    PROBLEM_DEPARTMENTS
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, department)| *department)
}

/// Outcome of a successful assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// The doctor's record after assignment, i.e. already unavailable.
    pub doctor: DoctorRecord,
    pub patient: PatientRecord,
    pub department: Department,
}

/// Patients waiting to be seen, in arrival order.
#[derive(Debug, Default)]
pub struct AssignmentQueue {
    entries: VecDeque<Arc<Patient>>,
}

impl AssignmentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, patient: Arc<Patient>) {
        self.entries.push_back(patient);
    }

    pub fn dequeue(&mut self) -> Option<Arc<Patient>> {
        self.entries.pop_front()
    }

    pub fn peek(&self) -> Option<&Arc<Patient>> {
        self.entries.front()
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Match the head patient to the first available doctor (in
    /// registration order) of the department their problem maps to.
    pub fn assign_doctor(&mut self, directory: &mut DoctorDirectory) -> DeskResult<Assignment> {
        let patient = self
            .peek()
            .cloned()
            .ok_or_else(|| DeskError::invalid_state("No patients in queue"))?;

        let department = department_for_problem(patient.problem()).ok_or_else(|| {
            DeskError::not_found(format!(
                "No department found for problem: {}",
                patient.problem()
            ))
        })?;

        let doctor = directory.claim_first_available(department).ok_or_else(|| {
            DeskError::not_found(format!(
                "No available doctor in department: {}",
                department
            ))
        })?;

        self.entries.pop_front();
        let patient = patient.record();

        tracing::debug!(
            "Assigned {} to {} ({})",
            patient.name,
            doctor.name,
            department
        );

        Ok(Assignment {
            doctor,
            patient,
            department,
        })
    }
}
