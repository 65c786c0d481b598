//! Roster file loading.
//!
//! A roster is a JSON document listing the doctors on shift and the
//! patients arriving, in arrival order:
//!
//! ```json
//! {
//!   "doctors": [
//!     { "name": "Dr. Smith", "id": "1234567890", "department": "Cardiology" }
//!   ],
//!   "arrivals": [
//!     { "name": "Alice", "age": 25, "email": "alice@example.com", "problem": "heart pain" }
//!   ]
//! }
//! ```
//!
//! Arrivals are kept as raw values; each one is checked when it is
//! admitted, so a single malformed arrival does not reject the file.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::desk::FrontDesk;
use crate::error::{AppError, DeskError};

#[derive(Debug, Clone, Deserialize)]
pub struct RosterDoctor {
    pub name: String,
    /// Kept raw so a bad id rejects only this doctor; see `id_text`.
    #[serde(default)]
    pub id: Value,
    pub department: String,
    #[serde(default)]
    pub contact_info: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub doctors: Vec<RosterDoctor>,
    #[serde(default)]
    pub arrivals: Vec<Value>,
}

impl RosterDoctor {
    /// The id as text. Non-negative integers are rendered in decimal, so
    /// ids with leading zeros must be written as strings; any other JSON
    /// type is an `InvalidArgument`.
    pub fn id_text(&self) -> Result<String, DeskError> {
        match &self.id {
            Value::String(text) => Ok(text.clone()),
            Value::Number(number) => number.as_u64().map(|n| n.to_string()).ok_or_else(|| {
                DeskError::invalid_argument(format!("Id must be a 10-digit number, got {}", number))
            }),
            other => Err(DeskError::invalid_argument(format!(
                "Id must be a 10-digit number, got {}",
                other
            ))),
        }
    }
}

/// Problems hit while seeding a desk. Seeding continues past each one.
#[derive(Debug)]
pub struct Rejection {
    pub entry: String,
    pub error: DeskError,
}

impl Roster {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    /// Register every doctor, then admit and queue every arrival.
    ///
    /// Invalid entries are logged, skipped, and returned to the caller.
    pub async fn seed(&self, desk: &FrontDesk) -> Vec<Rejection> {
        let mut rejections = Vec::new();

        for doctor in &self.doctors {
            let registered = match doctor.id_text() {
                Ok(id) => {
                    desk.register_doctor(
                        &doctor.name,
                        &id,
                        &doctor.department,
                        doctor.contact_info.clone(),
                    )
                    .await
                }
                Err(error) => Err(error),
            };

            if let Err(error) = registered {
                tracing::warn!("Skipping doctor {}: {}", doctor.name, error);
                rejections.push(Rejection {
                    entry: format!("doctor {}", doctor.id),
                    error,
                });
            }
        }

        for (position, arrival) in self.arrivals.iter().enumerate() {
            if let Err(error) = desk.admit_arrival(arrival.clone()).await {
                tracing::warn!("Skipping arrival {}: {}", position, error);
                rejections.push(Rejection {
                    entry: format!("arrival {}", position),
                    error,
                });
            }
        }

        rejections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = r#"{
        "doctors": [
            { "name": "Dr. Smith", "id": "1234567890", "department": "Cardiology", "contact_info": "555-0100" },
            { "name": "Dr. Jones", "id": 9876543210, "department": "ENT" },
            { "name": "Dr. Star", "id": "1111111111", "department": "Astrology" },
            { "name": "Dr. Clone", "id": "1234567890", "department": "General" }
        ],
        "arrivals": [
            { "name": "Alice", "age": 25, "email": "alice@example.com", "problem": "heart pain" },
            "not a patient",
            { "name": "Bob", "age": 0, "email": "bob@example.com", "problem": "cold" },
            { "name": "Carol", "age": 33, "email": "carol@example.com", "problem": "ear ache" }
        ]
    }"#;

    #[test]
    fn numeric_ids_are_read_as_text() {
        let roster = Roster::from_json(ROSTER).unwrap();
        assert_eq!(roster.doctors[0].id_text().unwrap(), "1234567890");
        assert_eq!(roster.doctors[1].id_text().unwrap(), "9876543210");
        assert_eq!(roster.doctors[0].contact_info.as_deref(), Some("555-0100"));
        assert_eq!(roster.arrivals.len(), 4);
    }

    #[tokio::test]
    async fn badly_typed_ids_reject_only_their_doctor() {
        let roster = Roster::from_json(
            r#"{
                "doctors": [
                    { "name": "Dr. Null", "id": null, "department": "General" },
                    { "name": "Dr. Minus", "id": -5, "department": "General" },
                    { "name": "Dr. Float", "id": 1.5, "department": "General" },
                    { "name": "Dr. Missing", "department": "General" },
                    { "name": "Dr. Fine", "id": "0000000007", "department": "General" }
                ]
            }"#,
        )
        .unwrap();
        let desk = FrontDesk::new();

        let rejections = roster.seed(&desk).await;

        assert_eq!(rejections.len(), 4);
        assert!(rejections
            .iter()
            .all(|r| matches!(r.error, DeskError::InvalidArgument { .. })));
        let snapshot = desk.directory_snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id.as_str(), "0000000007");
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let roster = Roster::from_json("{}").unwrap();
        assert!(roster.doctors.is_empty());
        assert!(roster.arrivals.is_empty());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(Roster::from_json("{ nope"), Err(AppError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            Roster::load("/definitely/not/here/roster.json"),
            Err(AppError::Io(_))
        ));
    }

    #[tokio::test]
    async fn seed_skips_invalid_entries() {
        let roster = Roster::from_json(ROSTER).unwrap();
        let desk = FrontDesk::new();

        let rejections = roster.seed(&desk).await;

        let kinds: Vec<&str> = rejections
            .iter()
            .map(|r| match r.error {
                DeskError::InvalidArgument { .. } => "invalid",
                DeskError::Conflict { .. } => "conflict",
                DeskError::TypeMismatch { .. } => "type",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["invalid", "conflict", "type", "invalid"]);

        assert_eq!(desk.directory_snapshot().await.len(), 2);
        assert_eq!(desk.patient_count().await, 2);
        assert_eq!(desk.queue_len().await, 2);
    }
}
