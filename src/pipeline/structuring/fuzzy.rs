//! Fuzzy lookup of vocabulary medicines in OCR text.

use super::similarity::similarity_ratio;

/// Tuned matching constants. Changing any of them shifts recall/precision
/// on real scans.
pub mod thresholds {
    /// Names at least this long use the window + 0.75 strategy.
    pub const LONG_NAME_MIN_CHARS: usize = 6;

    /// Sliding window over the name: `max(WINDOW_MIN_CHARS, round(WINDOW_FRACTION * len))`.
    pub const WINDOW_MIN_CHARS: usize = 5;
    pub const WINDOW_FRACTION: f64 = 0.7;

    /// Tokens shorter than this are never compared against long names.
    pub const MIN_TOKEN_CHARS: usize = 5;

    /// Minimum similarity between a long name and one token.
    pub const LONG_NAME_SIMILARITY: f64 = 0.75;

    /// Minimum similarity between a short name and one token.
    pub const SHORT_NAME_SIMILARITY: f64 = 0.85;
}

/// How a vocabulary entry was recognized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    Exact,
    Window,
    Similar(f64),
}

/// Find vocabulary entries mentioned in `text`, in vocabulary order, without
/// duplicates.
pub fn find_medicines(text: &str, vocabulary: &[&'static str]) -> Vec<&'static str> {
    let text_lower = text.to_lowercase();
    let tokens: Vec<&str> = text_lower.split_whitespace().collect();
    let mut found: Vec<&'static str> = Vec::new();

    for &name in vocabulary {
        if let Some(kind) = match_medicine(name, &text_lower, &tokens) {
            tracing::trace!(medicine = name, ?kind, "vocabulary match");
            if !found.contains(&name) {
                found.push(name);
            }
        }
    }

    found
}

/// Decide whether one vocabulary name occurs in the lowercased text.
pub fn match_medicine(name: &str, text_lower: &str, tokens: &[&str]) -> Option<MatchKind> {
    let name_lower = name.to_lowercase();

    if text_lower.contains(&name_lower) {
        return Some(MatchKind::Exact);
    }

    let name_chars: Vec<char> = name_lower.chars().collect();
    let name_len = name_chars.len();

    if name_len >= thresholds::LONG_NAME_MIN_CHARS {
        let window = window_len(name_len);
        let window_hit = name_chars
            .windows(window)
            .any(|w| text_lower.contains(&w.iter().collect::<String>()));
        if window_hit {
            return Some(MatchKind::Window);
        }

        tokens
            .iter()
            .filter(|t| t.chars().count() >= thresholds::MIN_TOKEN_CHARS)
            .map(|t| similarity_ratio(&name_lower, t))
            .find(|&score| score >= thresholds::LONG_NAME_SIMILARITY)
            .map(MatchKind::Similar)
    } else {
        tokens
            .iter()
            .filter(|t| t.chars().count() + 1 >= name_len)
            .map(|t| similarity_ratio(&name_lower, t))
            .find(|&score| score >= thresholds::SHORT_NAME_SIMILARITY)
            .map(MatchKind::Similar)
    }
}

/// Length of the name fragment that must appear verbatim.
fn window_len(name_len: usize) -> usize {
    let scaled = (name_len as f64 * thresholds::WINDOW_FRACTION).round() as usize;
    thresholds::WINDOW_MIN_CHARS.max(scaled).min(name_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::structuring::vocabulary::KNOWN_MEDICINES;

    fn tokens(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    #[test]
    fn exact_substring_is_case_insensitive() {
        let text = "1 paracetamol 500mg";
        assert_eq!(
            match_medicine("Paracetamol", text, &tokens(text)),
            Some(MatchKind::Exact)
        );
    }

    #[test]
    fn window_catches_truncated_names() {
        // "amoxicil" holds the 8-char window "amoxicil" of "amoxicillin"
        let text = "2 amoxicil 250mg";
        assert_eq!(
            match_medicine("Amoxicillin", text, &tokens(text)),
            Some(MatchKind::Window)
        );
    }

    #[test]
    fn similarity_catches_scattered_misreads() {
        // No 7-char run of "metformin" survives, but the token is close
        let text = "metfonnin 500mg";
        match match_medicine("Metformin", text, &tokens(text)) {
            Some(MatchKind::Similar(score)) => assert!(score >= 0.75),
            other => panic!("expected similarity match, got {other:?}"),
        }
    }

    #[test]
    fn unrelated_long_token_does_not_match() {
        let text = "patient advised rest";
        assert_eq!(match_medicine("Metformin", text, &tokens(text)), None);
    }

    #[test]
    fn short_names_need_high_similarity() {
        let text = "tab zinx daily";
        // zinc vs zinx: 2 * 3 / 8 = 0.75 < 0.85
        assert_eq!(match_medicine("Zinc", text, &tokens(text)), None);

        let text = "diane. daily";
        assert_eq!(match_medicine("Diane", text, &tokens(text)), Some(MatchKind::Exact));

        let text = "dianne daily";
        match match_medicine("Diane", text, &tokens(text)) {
            Some(MatchKind::Similar(score)) => assert!(score >= 0.85),
            other => panic!("expected similarity match, got {other:?}"),
        }
    }

    #[test]
    fn window_length_formula() {
        assert_eq!(window_len(6), 5);
        assert_eq!(window_len(7), 5);
        assert_eq!(window_len(9), 6);
        assert_eq!(window_len(11), 8);
        assert_eq!(window_len(14), 10);
    }

    #[test]
    fn results_follow_vocabulary_order() {
        let found = find_medicines("Ibuprofen 400mg then Paracetamol 500mg", KNOWN_MEDICINES);
        assert_eq!(found, vec!["Paracetamol", "Ibuprofen"]);
    }

    #[test]
    fn nothing_found_in_plain_text() {
        let found = find_medicines("Patient advised rest and fluids", KNOWN_MEDICINES);
        assert!(found.is_empty());
    }

    #[test]
    fn duplicate_vocabulary_entries_reported_once() {
        let found = find_medicines("Omeprazole 20mg", &["Omeprazole", "Omeprazole"]);
        assert_eq!(found, vec!["Omeprazole"]);
    }
}
