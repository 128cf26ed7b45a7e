use chrono::NaiveDate;
use serde::Serialize;

use super::medicines::parse_medicines;
use super::patient::extract_patient_info_on;
use crate::models::{MedicineRecord, PatientRecord};
use crate::pipeline::extraction::{normalize_ocr_text, sanitize_extracted_text};

/// Everything recovered from one prescription transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrescriptionExtraction {
    pub patient: PatientRecord,
    pub medicines: Vec<MedicineRecord>,
}

impl PrescriptionExtraction {
    /// No medicine recognized. Not an error: the scan may simply hold none.
    pub fn is_empty(&self) -> bool {
        self.medicines.is_empty()
    }
}

/// Clean a raw OCR transcript and run both extractors on it.
pub fn structure_prescription(raw_text: &str) -> PrescriptionExtraction {
    structure_prescription_on(raw_text, chrono::Local::now().date_naive())
}

/// Same as [`structure_prescription`], computing a missing age as of `today`.
pub fn structure_prescription_on(raw_text: &str, today: NaiveDate) -> PrescriptionExtraction {
    let text = normalize_ocr_text(&sanitize_extracted_text(raw_text));

    let patient = extract_patient_info_on(&text, today);
    let medicines = parse_medicines(&text);

    tracing::info!(
        medicines = medicines.len(),
        patient_named = patient.has_name(),
        "prescription structured"
    );

    PrescriptionExtraction { patient, medicines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sex;

    const SAMPLE: &str = "City Care Clinic\n\
        Dr. Anita Rao, MBBS\n\
        Doctor ID: DOC-042\n\
        Date; 01-Jun-2024\n\
        Patient Name: Sex: Phone: Birthdate:\n\
        Priya Sharma Female 9876501234 20-Aug-1995\n\
        Patient ID: PID-7781\n\
        Diagnosis: Viral Fever\n\
        No Medicine Dosage Duration\n\
        1 Paracetam0l s00mg 1-0-1 5 days\n\
        2 Cetirizine 10mg 0-0-1 3 day\n\
        Advice: plenty of fluids\n\
        Signature\n\
        Dr_ Anita Rao";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn full_prescription_is_structured() {
        let result = structure_prescription_on(SAMPLE, today());

        assert_eq!(result.patient.name, "Priya Sharma");
        assert_eq!(result.patient.sex, Some(Sex::Female));
        assert_eq!(result.patient.phone, "9876501234");
        assert_eq!(result.patient.birthdate, "20-Aug-1995");
        assert_eq!(result.patient.age, "28");
        assert_eq!(result.patient.patient_id, "PID-7781");
        assert_eq!(result.patient.diagnosis, "Viral Fever");
        assert_eq!(result.patient.doctor_id, "DOC-042");
        assert_eq!(result.patient.doctor_name, "Dr. Anita Rao");

        assert_eq!(result.medicines.len(), 2);
        assert_eq!(result.medicines[0].medicine, "Paracetamol");
        assert_eq!(result.medicines[0].dosage, "1-0-1");
        assert_eq!(result.medicines[0].duration, "5 days");
        assert_eq!(result.medicines[1].medicine, "Cetirizine");
        assert_eq!(result.medicines[1].dosage, "0-0-1");
        assert_eq!(result.medicines[1].duration, "3 days");
    }

    #[test]
    fn text_without_medicines_is_empty_not_an_error() {
        let result = structure_prescription_on("Patient Name: Ravi Kumar Age: 42", today());
        assert!(result.is_empty());
        assert_eq!(result.patient.name, "Ravi Kumar");
    }

    #[test]
    fn pipe_delimited_row_matches_direct_parse() {
        let text = "No Medicine Dosage Duration\n1 Paracetamol|1-0-1|5 days";
        let result = structure_prescription_on(text, today());
        assert_eq!(result.medicines, parse_medicines(text));
        assert_eq!(result.medicines.len(), 1);
        assert_eq!(result.medicines[0].dosage, "1-0-1");
        assert_eq!(result.medicines[0].duration, "5 days");
    }

    #[test]
    fn printable_symbols_survive_in_patient_fields() {
        let text = "Diagnosis: Fever <high grade>\nNo Medicine Dosage Duration\n1 Paracetamol 1-0-1 5 days";
        let result = structure_prescription_on(text, today());
        assert_eq!(result.patient.diagnosis, "Fever <high grade>");
    }

    #[test]
    fn control_characters_are_dropped() {
        let text = "No Medicine Dosage Duration\n1 Para\x00cetamol 1-0-1\x1b 5 days";
        let result = structure_prescription_on(text, today());
        assert_eq!(result.medicines.len(), 1);
        assert_eq!(result.medicines[0].medicine, "Paracetamol");
        assert_eq!(result.medicines[0].dosage, "1-0-1");
    }

    #[test]
    fn structuring_is_idempotent() {
        assert_eq!(
            structure_prescription_on(SAMPLE, today()),
            structure_prescription_on(SAMPLE, today())
        );
    }
}
