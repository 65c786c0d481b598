//! Doctor directory.
//!
//! `Doctor` is a validated value built outside the directory; it becomes
//! visible to assignment only once `DoctorDirectory::register` stores a
//! snapshot (`DoctorRecord`) of it under its id. The directory keeps
//! registration order, which is also the order the assignment scan walks.
//!
//! The directory is a plain owned value. Callers that share it across
//! tasks wrap it in `Arc<RwLock<DoctorDirectory>>` (see `desk`).

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DeskError, DeskResult};

/// Number of digits a doctor id must have.
pub const DOCTOR_ID_LEN: usize = 10;

/// The closed set of departments a doctor can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Cardiology,
    #[serde(rename = "ENT")]
    Ent,
    Orthopedics,
    Pediatrics,
    General,
    Dermatology,
}

impl Department {
    pub const ALL: [Department; 6] = [
        Department::Cardiology,
        Department::Ent,
        Department::Orthopedics,
        Department::Pediatrics,
        Department::General,
        Department::Dermatology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Cardiology => "Cardiology",
            Department::Ent => "ENT",
            Department::Orthopedics => "Orthopedics",
            Department::Pediatrics => "Pediatrics",
            Department::General => "General",
            Department::Dermatology => "Dermatology",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = DeskError;

    /// Exact, case-sensitive match against the department names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|dept| dept.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Department::ALL.iter().map(|d| d.as_str()).collect();
                DeskError::invalid_argument(format!(
                    "Invalid department '{}'. Valid departments: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

/// A doctor id: exactly ten ASCII digits, kept as text so leading zeros
/// survive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DoctorId(String);

impl DoctorId {
    pub fn parse(raw: &str) -> DeskResult<Self> {
        if raw.len() != DOCTOR_ID_LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DeskError::invalid_argument(format!(
                "Id must be a {}-digit number, got '{}'",
                DOCTOR_ID_LEN, raw
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for DoctorId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DoctorId {
    type Error = DeskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DoctorId::parse(&value)
    }
}

impl From<DoctorId> for String {
    fn from(id: DoctorId) -> Self {
        id.0
    }
}

/// Snapshot of a doctor as stored in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub id: DoctorId,
    pub name: String,
    pub department: Department,
    pub contact_info: Option<String>,
    pub is_available: bool,
}

/// A doctor that has been validated but not necessarily registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    id: Option<DoctorId>,
    name: String,
    department: Option<Department>,
    contact_info: Option<String>,
    is_available: bool,
}

fn validate_name(name: &str) -> DeskResult<()> {
    if name.is_empty() {
        return Err(DeskError::invalid_argument("Name must be a non-empty string"));
    }
    Ok(())
}

impl Doctor {
    /// Build an available, unregistered doctor with a validated id.
    pub fn new(name: &str, id: &str) -> DeskResult<Self> {
        let mut doctor = Self::unidentified(name)?;
        doctor.set_id(id)?;
        Ok(doctor)
    }

    /// Build a doctor with no id yet. Such a doctor cannot be registered
    /// until `set_id` succeeds.
    pub fn unidentified(name: &str) -> DeskResult<Self> {
        validate_name(name)?;
        Ok(Self {
            id: None,
            name: name.to_string(),
            department: None,
            contact_info: None,
            is_available: true,
        })
    }

    pub fn set_id(&mut self, id: &str) -> DeskResult<()> {
        self.id = Some(DoctorId::parse(id)?);
        Ok(())
    }

    pub fn set_name(&mut self, name: &str) -> DeskResult<()> {
        validate_name(name)?;
        self.name = name.to_string();
        Ok(())
    }

    /// Accepts only names from the fixed department set; on failure the
    /// previous department is kept.
    pub fn set_department(&mut self, department: &str) -> DeskResult<()> {
        self.department = Some(department.parse()?);
        Ok(())
    }

    pub fn set_contact_info(&mut self, contact_info: Option<String>) {
        self.contact_info = contact_info;
    }

    pub fn set_available(&mut self, is_available: bool) {
        self.is_available = is_available;
    }

    pub fn id(&self) -> Option<&DoctorId> {
        self.id.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn department(&self) -> Option<Department> {
        self.department
    }

    pub fn contact_info(&self) -> Option<&str> {
        self.contact_info.as_deref()
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    /// The record that registration would store, if the doctor has both an
    /// id and a department.
    pub fn profile(&self) -> Option<DoctorRecord> {
        Some(DoctorRecord {
            id: self.id.clone()?,
            name: self.name.clone(),
            department: self.department?,
            contact_info: self.contact_info.clone(),
            is_available: self.is_available,
        })
    }
}

/// Registered doctors keyed by id, in registration order.
#[derive(Debug, Default)]
pub struct DoctorDirectory {
    records: Vec<DoctorRecord>,
    index: HashMap<DoctorId, usize>,
}

impl DoctorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot of `doctor`. Duplicate ids are rejected, never
    /// overwritten.
    pub fn register(&mut self, doctor: &Doctor) -> DeskResult<DoctorId> {
        let id = doctor
            .id()
            .ok_or_else(|| DeskError::invalid_state("Doctor id is required to register"))?;

        if self.index.contains_key(id) {
            return Err(DeskError::conflict(format!(
                "Doctor with id {} is already registered",
                id
            )));
        }

        let record = doctor.profile().ok_or_else(|| {
            DeskError::invalid_argument(
                "Doctor department must be one of the allowed departments before registering",
            )
        })?;

        self.index.insert(id.clone(), self.records.len());
        self.records.push(record);
        tracing::debug!("Registered doctor {} ({})", id, doctor.name());
        Ok(id.clone())
    }

    pub fn get(&self, id: &str) -> Option<&DoctorRecord> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    /// Current availability of a registered doctor, `None` if the id is not
    /// registered.
    pub fn availability_by_id(&self, id: &str) -> Option<bool> {
        self.get(id).map(|record| record.is_available)
    }

    pub fn set_availability(&mut self, id: &str, is_available: bool) -> DeskResult<()> {
        let pos = *self.index.get(id).ok_or_else(|| {
            DeskError::invalid_state(format!("Doctor with id {} is not registered", id))
        })?;
        self.records[pos].is_available = is_available;
        Ok(())
    }

    /// Mark a doctor available again once their patient has been seen.
    pub fn release(&mut self, id: &str) -> DeskResult<()> {
        self.set_availability(id, true)
    }

    /// Flip the first available doctor in `department` to unavailable and
    /// return their record as it now reads in the directory.
    ///
    /// Scan and flip happen under the same `&mut` borrow, so a caller that
    /// holds the directory lock cannot double-assign.
    pub fn claim_first_available(&mut self, department: Department) -> Option<DoctorRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.department == department && r.is_available)?;
        record.is_available = false;
        Some(record.clone())
    }

    /// All records in registration order.
    pub fn snapshot(&self) -> Vec<DoctorRecord> {
        self.records.clone()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
    }
}
