//! Closed vocabulary of medicine names recognized in prescriptions.
//!
//! Order matters: matched medicines are reported in vocabulary order, and the
//! position of each entry decides which record gets which dosage when the
//! dosage list is shorter than the medicine list.

pub const KNOWN_MEDICINES: &[&str] = &[
    // Pain relief
    "Paracetamol", "Acetaminophen", "Ibuprofen", "Aspirin", "Diclofenac", "Naproxen",
    // Antibiotics
    "Amoxicillin", "Azithromycin", "Ciprofloxacin", "Doxycycline", "Erythromycin",
    "Metronidazole", "Clindamycin", "Cephalexin", "Ampicillin", "Penicillin",
    // Antacids and digestive
    "Omeprazole", "Pantoprazole", "Ranitidine", "Famotidine", "Domperidone",
    "Metoclopramide", "Ondansetron", "Simethicone", "Sucralfate",
    // Cardiovascular
    "Atenolol", "Metoprolol", "Amlodipine", "Losartan", "Enalapril", "Furosemide",
    "Atorvastatin", "Simvastatin", "Clopidogrel", "Warfarin",
    // Diabetes
    "Metformin", "Glibenclamide", "Gliclazide", "Glimepiride", "Insulin", "Pioglitazone",
    // Respiratory and allergy
    "Salbutamol", "Prednisolone", "Dexamethasone", "Montelukast", "Cetirizine",
    "Loratadine", "Phenylephrine", "Guaifenesin",
    // Mental health
    "Sertraline", "Fluoxetine", "Alprazolam", "Lorazepam", "Diazepam",
    // Vitamins and supplements
    "Vitamin D", "Vitamin B12", "Folic Acid", "Iron", "Calcium", "Zinc",
    // Topical
    "Betamethasone", "Hydrocortisone", "Clotrimazole", "Ketoconazole",
    // Neurological
    "Sumatriptan", "Topiramate", "Levetiracetam", "Valproate", "Amitriptyline",
    "Tramadol", "Codeine", "Morphine", "Gabapentin", "Pregabalin",
    // Tuberculosis
    "Rifampicin", "Isoniazid",
    // Antiviral
    "Favipiravir",
    // Cardiac
    "Carvedilol", "Rosuvastatin",
    // Brand names
    "Montair",
    // Urinary tract
    "Nitrofurantoin",
    // Hormonal
    "Diane",
    // Gout
    "Allopurinol", "Colchicine",
    // Bone health
    "Calcitriol", "Ferrous", "Sulphate",
    // Weight management
    "Orlistat", "Phentermine",
    // Other
    "Levothyroxine", "Thyronorm", "Alendronate", "Acyclovir", "Fluconazole",
];

/// Whether `line` mentions any vocabulary entry verbatim (case-insensitive).
pub fn mentions_known_medicine(line: &str) -> bool {
    let lower = line.to_lowercase();
    KNOWN_MEDICINES
        .iter()
        .any(|name| lower.contains(&name.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn vocabulary_has_no_duplicates() {
        let mut seen = HashSet::new();
        for name in KNOWN_MEDICINES {
            assert!(seen.insert(name.to_lowercase()), "duplicate entry: {name}");
        }
    }

    #[test]
    fn vocabulary_entries_are_trimmed_and_non_empty() {
        for name in KNOWN_MEDICINES {
            assert!(!name.is_empty());
            assert_eq!(name.trim(), *name);
        }
    }

    #[test]
    fn vocabulary_starts_with_paracetamol() {
        assert_eq!(KNOWN_MEDICINES.first(), Some(&"Paracetamol"));
        assert_eq!(KNOWN_MEDICINES.last(), Some(&"Fluconazole"));
    }

    #[test]
    fn mentions_known_medicine_ignores_case() {
        assert!(mentions_known_medicine("No Medicine Dosage 1 PARACETAMOL 1-0-1"));
        assert!(!mentions_known_medicine("No Medicine Dosage Duration"));
    }
}
