//! Post-OCR correction of systematic misreads in prescription text.
//!
//! Rules are literal, ordered substitutions: digit/letter confusions inside
//! strength units (`5o0mg`, `s00mg`, `Zmg`) and zero-for-o swaps inside drug
//! names. Every rule is case-insensitive and applied in table order, so a
//! later rule sees the output of earlier ones.

use std::sync::LazyLock;

use regex::Regex;

/// A compiled substitution.
struct CorrectionRule {
    pattern: Regex,
    replacement: &'static str,
}

fn rule(pattern: &str, replacement: &'static str) -> CorrectionRule {
    CorrectionRule {
        pattern: Regex::new(pattern).expect("Invalid OCR correction pattern"),
        replacement,
    }
}

static CORRECTION_RULES: LazyLock<Vec<CorrectionRule>> = LazyLock::new(|| {
    vec![
        // Strength units: a stray o/O between the digits and the unit
        rule(r"(?i)(\d)[oO]mg", "${1}mg"),
        rule(r"(?i)(\d)[oO]mcg", "${1}mcg"),
        rule(r"(?i)s00mg", "500mg"),
        rule(r"(?i)Zmg", "2mg"),
        // Drug names with 0 read for o
        rule(r"(?i)paracetam0l", "paracetamol"),
        rule(r"(?i)ibupr0fen", "ibuprofen"),
        rule(r"(?i)am0xicillin", "amoxicillin"),
        rule(r"(?i)metf0rmin", "metformin"),
        rule(r"(?i)0meprazole", "omeprazole"),
        rule(r"(?i)salbutam0", "salbutamol"),
        rule(r"(?i)m0ntelukast", "montelukast"),
    ]
});

/// Apply every OCR correction rule to one line (or a whole text) in order.
pub fn correct_ocr_errors(line: &str) -> String {
    let mut result = line.to_string();
    for rule in CORRECTION_RULES.iter() {
        if rule.pattern.is_match(&result) {
            result = rule
                .pattern
                .replace_all(&result, rule.replacement)
                .into_owned();
        }
    }
    result
}
