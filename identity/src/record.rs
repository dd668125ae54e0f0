use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Dimension of the speaker embedding vectors
/// (ECAPA-TDNN, `speechbrain/spkrec-ecapa-voxceleb`).
pub const EMBEDDING_DIM: usize = 192;

/// A single enrolled speaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Unique identifier, assigned by the store at enrollment. Never reused.
    pub id: u64,

    pub first_name: String,

    pub last_name: String,

    /// Serialized as ISO-8601 (`YYYY-MM-DD`).
    pub date_of_birth: NaiveDate,

    /// Speaker voiceprint, exactly [`EMBEDDING_DIM`] values.
    /// Written once at enrollment; re-enrollment creates a new record.
    pub embedding: Vec<f32>,
}

impl IdentityRecord {
    /// Display name, "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Metadata collected at enrollment time, before an ID is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentInfo {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn full_name_format() {
        let rec = IdentityRecord {
            id: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            date_of_birth: date("1815-12-10"),
            embedding: vec![0.0; EMBEDDING_DIM],
        };
        assert_eq!(rec.full_name(), "Ada Lovelace");
    }

    #[test]
    fn record_serde_round_trip() {
        let rec = IdentityRecord {
            id: 7,
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            date_of_birth: date("1906-12-09"),
            embedding: vec![0.25; EMBEDDING_DIM],
        };

        let data = serde_json::to_string(&rec).unwrap();
        assert!(data.contains("\"1906-12-09\""), "date should be ISO-8601: {data}");

        let back: IdentityRecord = serde_json::from_str(&data).unwrap();
        assert_eq!(back, rec);
    }
}
