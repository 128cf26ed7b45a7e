//! Reminder schedule expansion.
//!
//! Turns extracted medicines into notification rows: one row per
//! administration slot implied by the dosage code, each with its clock time
//! and the last day of the course.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;

use crate::models::{DurationUnit, MedicineRecord, PatientRecord, ReminderRow, TimingSlot};

static DURATION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*(day|week|month|days|weeks|months)").unwrap());

/// Administration slots for a Morning-Afternoon-Night dosage code.
///
/// A `2` means two administrations in that slot. Codes outside the known set
/// fall back to a single morning dose.
pub fn timings_for_dosage(code: &str) -> Vec<TimingSlot> {
    use crate::models::TimingSlot::{Afternoon as A, Morning as M, Night as N};

    match code {
        "1-0-0" => vec![M],
        "0-1-0" => vec![A],
        "0-0-1" => vec![N],
        "1-1-0" => vec![M, A],
        "1-0-1" => vec![M, N],
        "0-1-1" => vec![A, N],
        "1-1-1" => vec![M, A, N],
        "2-0-0" => vec![M, M],
        "0-2-0" => vec![A, A],
        "0-0-2" => vec![N, N],
        "2-1-1" => vec![M, M, A, N],
        "1-2-1" => vec![M, A, A, N],
        "1-1-2" => vec![M, A, N, N],
        _ => vec![M],
    }
}

/// Course length in days: weeks count 7 days, months 30.
pub fn duration_in_days(duration: &str) -> Option<i64> {
    let lower = duration.trim().to_lowercase();
    let caps = DURATION_PREFIX.captures(&lower)?;
    let count: i64 = caps[1].parse().ok()?;
    let unit = DurationUnit::parse_loose(&caps[2])?;
    count.checked_mul(unit.days())
}

/// Last day of a course that starts on `start` (the start day counts).
pub fn end_date(start: NaiveDate, duration: &str) -> Option<NaiveDate> {
    let days = duration_in_days(duration)?;
    start.checked_add_signed(TimeDelta::try_days(days - 1)?)
}

/// Expand every medicine into one row per administration slot.
///
/// `now` stamps the rows and is the course start date.
pub fn expand_reminder_rows(
    patient: &PatientRecord,
    medicines: &[MedicineRecord],
    now: NaiveDateTime,
) -> Vec<ReminderRow> {
    let start = now.date();
    let mut rows = Vec::new();

    for medicine in medicines {
        let course_end = end_date(start, &medicine.duration);
        if course_end.is_none() {
            tracing::debug!(
                medicine = %medicine.medicine,
                duration = %medicine.duration,
                "unparsable duration, end date left empty"
            );
        }

        for slot in timings_for_dosage(&medicine.dosage) {
            rows.push(ReminderRow {
                patient_id: patient.patient_id.clone(),
                patient_name: patient.name.clone(),
                sex: patient.sex_label().to_string(),
                phone: patient.phone.clone(),
                age: patient.age.clone(),
                diagnosis: patient.diagnosis.clone(),
                doctor_name: patient.doctor_name.clone(),
                doctor_id: patient.doctor_id.clone(),
                processed_at: now,
                start_date: start,
                end_date: course_end,
                medicine_name: medicine.medicine.clone(),
                frequency: slot,
                duration: medicine.duration.clone(),
                timing: slot,
                notification_time: slot.notification_time().to_string(),
                medicine_image: format!("{}.png", medicine.medicine),
                alternate: "No".to_string(),
                daily: "Yes".to_string(),
            });
        }
    }

    rows
}
