//! Patient records.
//!
//! `Patient::new` only validates. `PatientRecords::admit` validates and
//! tracks in one step; patients have no natural key, so the handle it
//! returns is an admission counter. Handles are never reused, not even
//! after `clear`.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DeskError, DeskResult};

/// Handle to a tracked patient (admission counter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(pub usize);

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Raw patient fields, as read from a roster or produced as a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: String,
    pub age: i64,
    pub email: String,
    pub problem: String,
}

impl PatientRecord {
    /// Read a record out of an untyped value. Anything that is not a
    /// patient-shaped object is a `TypeMismatch`; field contents are not
    /// validated here.
    pub fn from_value(value: Value) -> DeskResult<Self> {
        serde_json::from_value(value).map_err(|err| {
            DeskError::type_mismatch(format!("Expected a patient record: {}", err))
        })
    }
}

/// A validated patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    name: String,
    age: u32,
    email: String,
    problem: String,
}

/// Trim, then upper-case the first character and lower-case the rest.
///
/// `"  heart pain  "` and `"Heart Pain"` both become `"Heart pain"`.
///
/// The first character goes through full upper-casing, not titlecase, so
/// a leading `ß` becomes `"SS"` (titlecase would give `"Ss"`) and digraphs
/// such as `ǆ` become `Ǆ` rather than `ǅ`. The mapping table is ASCII, so
/// this never changes a department lookup.
pub fn normalize_problem(problem: &str) -> String {
    let mut chars = problem.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl Patient {
    pub fn new(name: &str, age: i64, email: &str, problem: &str) -> DeskResult<Self> {
        if name.is_empty() {
            return Err(DeskError::invalid_argument("Name must be a non-empty string"));
        }

        let age = u32::try_from(age)
            .ok()
            .filter(|&a| a > 0)
            .ok_or_else(|| DeskError::invalid_argument("Age must be a positive integer"))?;

        if !email.contains('@') {
            return Err(DeskError::invalid_argument("Invalid email format"));
        }

        let problem = normalize_problem(problem);
        if problem.is_empty() {
            return Err(DeskError::invalid_argument("Problem must be a non-empty string"));
        }

        Ok(Self {
            name: name.to_string(),
            age,
            email: email.to_string(),
            problem,
        })
    }

    pub fn from_record(record: &PatientRecord) -> DeskResult<Self> {
        Self::new(&record.name, record.age, &record.email, &record.problem)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// The normalized problem text.
    pub fn problem(&self) -> &str {
        &self.problem
    }

    pub fn record(&self) -> PatientRecord {
        PatientRecord {
            name: self.name.clone(),
            age: i64::from(self.age),
            email: self.email.clone(),
            problem: self.problem.clone(),
        }
    }
}

/// Tracked patients in admission order.
#[derive(Debug, Default)]
pub struct PatientRecords {
    /// Sorted by id, since ids only grow.
    patients: Vec<(PatientId, Arc<Patient>)>,
    next_id: usize,
}

impl PatientRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and track a new patient.
    pub fn admit(&mut self, name: &str, age: i64, email: &str, problem: &str) -> DeskResult<PatientId> {
        let patient = Patient::new(name, age, email, problem)?;
        Ok(self.track(patient))
    }

    /// Track an already-built patient.
    pub fn track(&mut self, patient: Patient) -> PatientId {
        let id = PatientId(self.next_id);
        self.next_id += 1;
        tracing::debug!("Admitted patient {} ({})", id, patient.name());
        self.patients.push((id, Arc::new(patient)));
        id
    }

    pub fn get(&self, id: PatientId) -> Option<Arc<Patient>> {
        self.patients
            .binary_search_by_key(&id.0, |(tracked, _)| tracked.0)
            .ok()
            .map(|pos| Arc::clone(&self.patients[pos].1))
    }

    /// Snapshots of every tracked patient, oldest first.
    pub fn list_all(&self) -> Vec<PatientRecord> {
        self.patients.iter().map(|(_, p)| p.record()).collect()
    }

    pub fn count(&self) -> usize {
        self.patients.len()
    }

    /// Forget every tracked patient. Handles issued before the reset stay
    /// dangling rather than pointing at later admissions.
    pub fn clear(&mut self) {
        self.patients.clear();
    }
}
