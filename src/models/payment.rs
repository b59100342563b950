use serde::{Deserialize, Serialize};

/// One payment record as supplied by the external system. `patient_id`
/// carries the owning patient's *external* id, not an internal key.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpsert {
    pub amount: f64,
    pub patient_id: String,
    pub external_id: String,
}

impl PaymentUpsert {
    pub fn validate(&self) -> Result<(), String> {
        if self.external_id.is_empty() {
            return Err("payment record with empty externalId".to_string());
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(format!(
                "payment {}: amount must be a non-negative number",
                self.external_id
            ));
        }
        Ok(())
    }
}

/// A stored payment row as rendered on the read path.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Payment {
    pub id: i64,
    pub amount: f64,
    pub patient_id: i64,
    pub external_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_payload() {
        let json = r#"{"amount": 99.5, "patientId": "P1", "externalId": "M1"}"#;

        let record: PaymentUpsert = serde_json::from_str(json).unwrap();
        assert_eq!(record.amount, 99.5);
        assert_eq!(record.patient_id, "P1");
        assert_eq!(record.external_id, "M1");
    }

    #[test]
    fn validate_rejects_negative_amount() {
        let record = PaymentUpsert {
            amount: -1.0,
            patient_id: "P1".to_string(),
            external_id: "M1".to_string(),
        };

        assert!(record.validate().is_err());
    }

    #[test]
    fn validate_accepts_zero_amount() {
        let record = PaymentUpsert {
            amount: 0.0,
            patient_id: "P1".to_string(),
            external_id: "M1".to_string(),
        };

        assert!(record.validate().is_ok());
    }

    #[test]
    fn row_serializes_expected_keys() {
        let payment = Payment {
            id: 3,
            amount: 120.0,
            patient_id: 1,
            external_id: "M1".to_string(),
        };

        let json = serde_json::to_value(&payment).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["amount"], 120.0);
        assert_eq!(json["patient_id"], 1);
        assert_eq!(json["external_id"], "M1");
    }
}
