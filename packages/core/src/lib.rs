// Library root. The binary in `src/main.rs` is a thin driver over these
// modules.

pub mod directory;
pub mod desk;
pub mod dispatch;
pub mod error;
pub mod patients;
pub mod queue;
pub mod roster;

// These modules are only needed by the binary.
pub mod cli;
pub mod config;
pub mod logging;

pub use desk::FrontDesk;
pub use directory::{Department, Doctor, DoctorDirectory, DoctorId, DoctorRecord};
pub use error::{DeskError, DeskResult};
pub use patients::{Patient, PatientId, PatientRecord, PatientRecords};
pub use queue::{department_for_problem, Assignment, AssignmentQueue};
