use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One patient record as supplied by the external system of record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientUpsert {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub external_id: String,
    pub date_of_birth: NaiveDate,
}

impl PatientUpsert {
    /// Check the field-level constraints the wire format cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.external_id.is_empty() {
            return Err("patient record with empty externalId".to_string());
        }
        if self.first_name.trim().is_empty() {
            return Err(format!(
                "patient {}: firstName must not be empty",
                self.external_id
            ));
        }
        if self.last_name.trim().is_empty() {
            return Err(format!(
                "patient {}: lastName must not be empty",
                self.external_id
            ));
        }
        Ok(())
    }
}

/// A stored patient row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub date_of_birth: NaiveDate,
    pub external_id: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Aggregate row returned by the patient listing: identity plus the sum of
/// the patient's payments.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PatientSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub sum: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_payload() {
        let json = r#"{
            "firstName": "Ada",
            "lastName": "Lovelace",
            "middleName": "King",
            "externalId": "P1",
            "dateOfBirth": "1990-01-01"
        }"#;

        let record: PatientUpsert = serde_json::from_str(json).unwrap();
        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.middle_name.as_deref(), Some("King"));
        assert_eq!(record.external_id, "P1");
        assert_eq!(
            record.date_of_birth,
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
        );
    }

    #[test]
    fn middle_name_defaults_to_none() {
        let json = r#"{
            "firstName": "Ada",
            "lastName": "Lovelace",
            "externalId": "P1",
            "dateOfBirth": "1990-01-01"
        }"#;

        let record: PatientUpsert = serde_json::from_str(json).unwrap();
        assert!(record.middle_name.is_none());
    }

    #[test]
    fn rejects_malformed_date() {
        let json = r#"{
            "firstName": "Ada",
            "lastName": "Lovelace",
            "externalId": "P1",
            "dateOfBirth": "01-01-1990"
        }"#;

        assert!(serde_json::from_str::<PatientUpsert>(json).is_err());
    }

    #[test]
    fn validate_rejects_blank_names() {
        let record = PatientUpsert {
            first_name: "  ".to_string(),
            last_name: "Lovelace".to_string(),
            middle_name: None,
            external_id: "P1".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        };

        assert!(record.validate().is_err());
    }

    #[test]
    fn summary_serializes_expected_keys() {
        let summary = PatientSummary {
            id: 7,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            sum: 350.0,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["first_name"], "Ada");
        assert_eq!(json["last_name"], "Lovelace");
        assert_eq!(json["sum"], 350.0);
    }
}
