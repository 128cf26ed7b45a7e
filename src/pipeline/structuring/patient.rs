//! Patient-field extraction from prescription OCR text.
//!
//! Three layers, first hit wins per field:
//! 1. the tabular header layout (`Patient Name: Sex: Phone: Birthdate:` over a
//!    data row),
//! 2. a declarative table of labeled-field patterns, strictest first,
//! 3. dedicated lookups for diagnosis, doctor name and doctor ID.
//!
//! Age is backfilled from the birthdate when no explicit age is printed.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::{PatientRecord, Sex};
use crate::pipeline::extraction::ocr_lines;

/// Birthdate format printed on prescriptions, e.g. `15-Jan-1990`.
pub const BIRTHDATE_FORMAT: &str = "%d-%b-%Y";

/// Labels that must all appear on one line for the tabular layout.
const TABULAR_HEADER_LABELS: [&str; 4] = ["Patient Name:", "Sex:", "Phone:", "Birthdate:"];

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static PHONE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{10}").unwrap());
static BIRTHDATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-[A-Za-z]{3}-\d{4}").unwrap());
static LEAKED_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"No\s+Medicine|Dosage|Duration").unwrap());
static DOCTOR_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Doctor ID\s*[:\-]?\s*(DOC-\d{3})").unwrap());
static DOCTOR_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Dr\.\s*[A-Z][A-Za-z]+\s+[A-Z][A-Za-z]+").unwrap());

/// Fields filled by the labeled-pattern table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabeledField {
    Name,
    Age,
    Sex,
    Phone,
    PatientId,
    Birthdate,
}

impl LabeledField {
    fn is_unset(&self, record: &PatientRecord) -> bool {
        match self {
            Self::Name => !record.has_name(),
            Self::Age => record.age.is_empty(),
            Self::Sex => record.sex.is_none(),
            Self::Phone => record.phone.is_empty(),
            Self::PatientId => record.patient_id.is_empty(),
            Self::Birthdate => record.birthdate.is_empty(),
        }
    }

    /// Store `value` if it is acceptable for this field.
    fn accept(&self, record: &mut PatientRecord, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        match self {
            // A lone word is usually a first name cut off by OCR
            Self::Name if value.split_whitespace().count() < 2 => return false,
            Self::Name => record.name = value.to_string(),
            Self::Age => record.age = value.to_string(),
            Self::Sex => match Sex::parse_loose(value) {
                Some(sex) => record.sex = Some(sex),
                None => return false,
            },
            Self::Phone => record.phone = value.to_string(),
            Self::PatientId => record.patient_id = value.to_string(),
            Self::Birthdate => record.birthdate = value.to_string(),
        }
        true
    }
}

struct FieldRule {
    field: LabeledField,
    patterns: Vec<Regex>,
}

fn field_rule(field: LabeledField, patterns: &[&str]) -> FieldRule {
    FieldRule {
        field,
        patterns: patterns
            .iter()
            .map(|p| Regex::new(&format!("(?i){p}")).expect("Invalid patient field pattern"))
            .collect(),
    }
}

/// Labeled-field patterns, matched against whitespace-collapsed text.
static FIELD_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![
        field_rule(
            LabeledField::Name,
            &[
                r"Patient Name:\s*([A-Za-z\s\.]+?)(?:\s+Age:|\s*$)",
                r"Patient Name:\s*([A-Za-z\s\.]+?)(?:\s+Age|\s*$)",
                r"Patient Name:([A-Za-z\s\.]+?)Age:",
                r"Patient Name:([A-Za-z\s\.]+?)(?:\s+Age|\s*$)",
            ],
        ),
        field_rule(
            LabeledField::Age,
            &[r"Age:\s*(\d{1,3})", r"Age:(\d{1,3})", r"Age\s*:\s*(\d{1,3})"],
        ),
        field_rule(
            LabeledField::Sex,
            &[
                r"Sex:\s*(Male|Female)",
                r"Sex:(Male|Female)",
                r"Sex\s*:\s*(Male|Female)",
            ],
        ),
        field_rule(
            LabeledField::Phone,
            &[r"Phone:\s*(\d{10,})", r"Phone:(\d{10,})", r"Phone\s*:\s*(\d{10,})"],
        ),
        field_rule(
            LabeledField::PatientId,
            &[
                r"Patient ID:\s*(PID-[A-Za-z0-9\-]+)",
                r"Patient ID:(PID-[A-Za-z0-9\-]+)",
                r"Patient ID\s*:\s*(PID-[A-Za-z0-9\-]+)",
            ],
        ),
        field_rule(
            LabeledField::Birthdate,
            &[
                r"Birthdate:\s*(\d{2}-[A-Za-z]{3}-\d{4})",
                r"Birthdate:(\d{2}-[A-Za-z]{3}-\d{4})",
            ],
        ),
    ]
});

/// Diagnosis patterns against the raw text; the last one has no end label.
static DIAGNOSIS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?is)Diagnosis\s*:\s*(.*?)(?:No\s+Medicine|Dosage|Duration|$)",
        r"(?is)Diagnosis\s*-\s*(.*?)(?:No\s+Medicine|Dosage|Duration|$)",
        r"(?is)Diagnosis\s*:\s*(.+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid diagnosis pattern"))
    .collect()
});

/// Extract patient fields, computing a missing age against today's date.
pub fn extract_patient_info(text: &str) -> PatientRecord {
    extract_patient_info_on(text, chrono::Local::now().date_naive())
}

/// Extract patient fields, computing a missing age as of `today`.
pub fn extract_patient_info_on(text: &str, today: NaiveDate) -> PatientRecord {
    let mut record = PatientRecord::default();

    let text_clean = WHITESPACE_RUN.replace_all(text, " ");
    let lines = ocr_lines(text);

    apply_tabular_layout(&lines, &mut record);
    apply_field_rules(&text_clean, &mut record);

    if let Some(diagnosis) = find_diagnosis(text) {
        record.diagnosis = diagnosis;
    }
    if let Some(caps) = DOCTOR_ID.captures(text) {
        record.doctor_id = caps[1].trim().to_string();
    }
    // Signature blocks repeat the doctor's name; the last mention is authoritative
    if let Some(m) = DOCTOR_NAME.find_iter(text).last() {
        record.doctor_name = m.as_str().trim().to_string();
    }

    if record.age.is_empty() && !record.birthdate.is_empty() {
        if let Some(age) = age_from_birthdate(&record.birthdate, today) {
            record.age = age.to_string();
        }
    }

    record
}

/// Handle the layout where all labels share one line and values follow on
/// the next: `John Smith Male 9876543210 15-Jan-1990`.
fn apply_tabular_layout(lines: &[&str], record: &mut PatientRecord) {
    let Some(header_idx) = lines
        .iter()
        .position(|line| TABULAR_HEADER_LABELS.iter().all(|label| line.contains(label)))
    else {
        return;
    };

    let Some(data_line) = lines.get(header_idx + 1) else {
        return;
    };
    let parts: Vec<&str> = data_line.split_whitespace().collect();
    if parts.len() < 4 {
        return;
    }

    let Some(phone_idx) = parts.iter().position(|p| PHONE_TOKEN.is_match(p)) else {
        return;
    };
    tracing::debug!(line = header_idx, "tabular patient header detected");
    record.phone = parts[phone_idx].to_string();

    if phone_idx > 0 {
        let before_phone = parts[phone_idx - 1];
        if before_phone == "Male" || before_phone == "Female" {
            record.sex = Sex::parse_loose(before_phone);
            let name_parts = &parts[..phone_idx - 1];
            if name_parts.len() >= 2 {
                record.name = name_parts.join(" ");
            }
        }
    }

    if let Some(next) = parts.get(phone_idx + 1) {
        if BIRTHDATE_TOKEN.is_match(next) {
            record.birthdate = next.to_string();
        }
    }
}

fn apply_field_rules(text_clean: &str, record: &mut PatientRecord) {
    for rule in FIELD_RULES.iter() {
        if !rule.field.is_unset(record) {
            continue;
        }
        for pattern in &rule.patterns {
            let Some(caps) = pattern.captures(text_clean) else {
                continue;
            };
            let value = caps.get(1).map_or("", |m| m.as_str()).trim();
            if rule.field.accept(record, value) {
                break;
            }
        }
    }
}

fn find_diagnosis(text: &str) -> Option<String> {
    DIAGNOSIS_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.captures(text)?;
        let raw = caps
            .get(1)?
            .as_str()
            .trim_matches(|c| matches!(c, ' ' | ':' | '-' | '\n' | '\t'));
        let diagnosis = match LEAKED_LABEL.find(raw) {
            Some(label) => &raw[..label.start()],
            None => raw,
        }
        .trim();
        (!diagnosis.is_empty()).then(|| diagnosis.to_string())
    })
}

/// Whole years between `birthdate` and `today` (365-day years).
///
/// Unparsable dates and birthdates in the future yield `None`.
pub fn age_from_birthdate(birthdate: &str, today: NaiveDate) -> Option<i64> {
    let dob = NaiveDate::parse_from_str(birthdate, BIRTHDATE_FORMAT).ok()?;
    let days = (today - dob).num_days();
    (days >= 0).then(|| days.div_euclid(365))
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Arbitrary input never panics and always serializes all nine keys
        #[test]
        fn any_text_yields_complete_record(text in "\\PC{0,200}") {
            let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
            let info = extract_patient_info_on(&text, today);
            let value = serde_json::to_value(&info).unwrap();
            prop_assert_eq!(value.as_object().unwrap().len(), 9);
            prop_assert!(!info.name.is_empty());
        }

        /// Age backfill matches whole 365-day years
        #[test]
        fn backfilled_age_matches_day_count(offset in 0i64..40_000) {
            let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
            let dob = today - chrono::Duration::days(offset);
            let text = format!("Birthdate: {}", dob.format(BIRTHDATE_FORMAT));
            let info = extract_patient_info_on(&text, today);
            prop_assert_eq!(info.age, (offset / 365).to_string());
        }
    }
}
