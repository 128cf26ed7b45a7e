use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

use super::enums::TimingSlot;

/// One notification row: a single medicine administration slot for a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderRow {
    #[serde(rename = "Patient ID")]
    pub patient_id: String,
    #[serde(rename = "Patient Name")]
    pub patient_name: String,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: String,
    #[serde(rename = "Doctor Name")]
    pub doctor_name: String,
    #[serde(rename = "Doctor ID")]
    pub doctor_id: String,
    #[serde(rename = "Processed Time", serialize_with = "processed_time")]
    pub processed_at: NaiveDateTime,
    #[serde(rename = "Start Date", serialize_with = "iso_date")]
    pub start_date: NaiveDate,
    /// `None` when the duration could not be parsed; exported as `""`.
    #[serde(rename = "End Date", serialize_with = "iso_date_or_empty")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "Medicine Name")]
    pub medicine_name: String,
    #[serde(rename = "Frequency")]
    pub frequency: TimingSlot,
    #[serde(rename = "Duration")]
    pub duration: String,
    #[serde(rename = "Timing")]
    pub timing: TimingSlot,
    #[serde(rename = "Notification Time")]
    pub notification_time: String,
    #[serde(rename = "Medicine Img")]
    pub medicine_image: String,
    #[serde(rename = "Alternate")]
    pub alternate: String,
    #[serde(rename = "Daily")]
    pub daily: String,
}

fn processed_time<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format("%Y-%m-%d %H:%M:%S"))
}

fn iso_date<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format("%Y-%m-%d"))
}

fn iso_date_or_empty<S: Serializer>(
    value: &Option<NaiveDate>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(date) => iso_date(date, serializer),
        None => serializer.serialize_str(""),
    }
}
