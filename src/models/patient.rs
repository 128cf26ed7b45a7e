use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::enums::Sex;

/// Name used when no patient name could be recovered.
pub const UNKNOWN_PATIENT_NAME: &str = "Unknown";

/// Patient fields recovered from a prescription.
///
/// Every field is always present. Missing data is an empty string (or
/// `None` for `sex`, serialized as `""`), never an absent key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "Patient Name")]
    pub name: String,
    #[serde(rename = "Sex", with = "sex_or_empty")]
    pub sex: Option<Sex>,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Patient ID")]
    pub patient_id: String,
    #[serde(rename = "Birthdate")]
    pub birthdate: String,
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: String,
    #[serde(rename = "Doctor Name")]
    pub doctor_name: String,
    #[serde(rename = "Doctor ID")]
    pub doctor_id: String,
}

impl Default for PatientRecord {
    fn default() -> Self {
        Self {
            name: UNKNOWN_PATIENT_NAME.to_string(),
            sex: None,
            phone: String::new(),
            patient_id: String::new(),
            birthdate: String::new(),
            age: String::new(),
            diagnosis: String::new(),
            doctor_name: String::new(),
            doctor_id: String::new(),
        }
    }
}

impl PatientRecord {
    pub fn has_name(&self) -> bool {
        self.name != UNKNOWN_PATIENT_NAME
    }

    /// Sex as the flat string used in exported rows.
    pub fn sex_label(&self) -> &'static str {
        self.sex.map(|s| s.as_str()).unwrap_or("")
    }
}

/// `Option<Sex>` <-> `"Male" | "Female" | ""`.
mod sex_or_empty {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<Sex>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.map(|s| s.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Sex>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        Sex::parse_loose(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid sex: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_unknown_name_and_empty_fields() {
        let record = PatientRecord::default();
        assert_eq!(record.name, "Unknown");
        assert!(!record.has_name());
        assert_eq!(record.sex, None);
        assert_eq!(record.sex_label(), "");
        assert!(record.phone.is_empty());
        assert!(record.doctor_id.is_empty());
    }

    #[test]
    fn serializes_all_nine_keys() {
        let value = serde_json::to_value(PatientRecord::default()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "Patient Name",
            "Sex",
            "Phone",
            "Patient ID",
            "Birthdate",
            "Age",
            "Diagnosis",
            "Doctor Name",
            "Doctor ID",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj.len(), 9);
        assert_eq!(obj["Sex"], "");
    }

    #[test]
    fn sex_round_trips_through_json() {
        let record = PatientRecord {
            sex: Some(Sex::Female),
            ..PatientRecord::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"Sex\":\"Female\""));
        let back: PatientRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
