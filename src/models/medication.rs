use serde::{Deserialize, Serialize};

/// One medicine recovered from the prescription's medicine block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineRecord {
    /// 1-based position in the extracted list.
    #[serde(rename = "No")]
    pub position: usize,
    #[serde(rename = "Medicine")]
    pub medicine: String,
    /// Morning-Afternoon-Night count code, e.g. `1-0-1`.
    #[serde(rename = "Dosage")]
    pub dosage: String,
    /// `<N> days|weeks|months`.
    #[serde(rename = "Duration")]
    pub duration: String,
    /// Reserved; filled by the reminder expansion, empty here.
    #[serde(rename = "Timing")]
    pub timing: String,
}
