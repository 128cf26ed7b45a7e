//! Medicine-block parsing: isolate the medicine table, repair OCR misreads,
//! match names against the vocabulary, then align dosage codes and durations
//! to the matched medicines.

use std::sync::LazyLock;

use regex::Regex;

use super::fuzzy::find_medicines;
use super::vocabulary::{mentions_known_medicine, KNOWN_MEDICINES};
use crate::models::{DurationUnit, MedicineRecord};
use crate::pipeline::extraction::{correct_ocr_errors, ocr_lines};

/// Dosage used when the text carries no dosage code at all.
pub const DEFAULT_DOSAGE: &str = "1-0-0";

/// Duration used when the text carries no duration at all.
pub const DEFAULT_DURATION: &str = "3 days";

/// Header words beyond which a header line is treated as holding the first row.
const HEADER_ROW_MIN_WORDS: usize = 3;

static BLOCK_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)No\s*Medicine").unwrap());
static BLOCK_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(Advice:|Signature|Dr\.|Next Visit)").unwrap());
static DOSAGE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]{1,2}-[0-9]{1,2}-[0-9]{1,2}\b").unwrap());
static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+)\s*(day|days|week|weeks|month|months)\b").unwrap()
});

/// Parse the medicine list out of prescription text.
///
/// Returns an empty list when no vocabulary medicine is recognized anywhere.
pub fn parse_medicines(text: &str) -> Vec<MedicineRecord> {
    let text = text.replace("Date;", "Date:");
    let lines = ocr_lines(&text);

    let block: Vec<String> = isolate_medicine_block(&lines)
        .into_iter()
        .map(correct_ocr_errors)
        .collect();
    tracing::debug!(lines = block.len(), "medicine block isolated");

    let mut found = find_medicines(&block.join(" "), KNOWN_MEDICINES);
    if found.is_empty() {
        tracing::debug!("no medicines in block, searching full text");
        found = find_medicines(&correct_ocr_errors(&text), KNOWN_MEDICINES);
    }

    let count = found.len();
    if count == 0 {
        return Vec::new();
    }

    let dosages = collect_matches(&DOSAGE_CODE, &block, &text);
    let durations: Vec<String> = collect_matches(&DURATION, &block, &text)
        .iter()
        .map(|d| normalize_duration(d))
        .collect();
    tracing::debug!(
        medicines = count,
        dosages = dosages.len(),
        durations = durations.len(),
        "aligning medicine columns"
    );

    let dosages = align_to_count(dosages, count, DEFAULT_DOSAGE);
    let durations = align_to_count(durations, count, DEFAULT_DURATION);

    found
        .iter()
        .enumerate()
        .map(|(i, name)| MedicineRecord {
            position: i + 1,
            medicine: title_case(name),
            dosage: dosages
                .get(i)
                .cloned()
                .unwrap_or_else(|| DEFAULT_DOSAGE.to_string()),
            duration: durations
                .get(i)
                .cloned()
                .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
            timing: String::new(),
        })
        .collect()
}

/// Lines between the `No Medicine` table header and the first trailing
/// section (`Advice:`, `Signature`, `Dr.`, `Next Visit`).
///
/// The header itself is kept when OCR merged it with the first row.
pub fn isolate_medicine_block<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    let mut capture = false;
    let mut block = Vec::new();

    for &line in lines {
        if BLOCK_HEADER.is_match(line) {
            capture = true;
            if mentions_known_medicine(line) || line.split_whitespace().count() > HEADER_ROW_MIN_WORDS {
                block.push(line);
            }
            continue;
        }
        if capture {
            if BLOCK_END.is_match(line) {
                break;
            }
            block.push(line);
        }
    }

    block
}

/// All distinct matches of `pattern`, looked up per block line first and in
/// the whole text only when the block has none. First-seen order.
fn collect_matches(pattern: &Regex, block: &[String], text: &str) -> Vec<String> {
    let mut matches: Vec<String> = block
        .iter()
        .flat_map(|line| pattern.find_iter(line).map(|m| m.as_str().to_string()))
        .collect();
    if matches.is_empty() {
        matches = pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
    }
    dedup_preserving_order(matches)
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Render a duration match as `<N> days|weeks|months`.
///
/// `1 day`, `2Week` and `3 MONTHS` become `1 days`, `2 weeks`, `3 months`.
pub fn normalize_duration(raw: &str) -> String {
    let Some(caps) = DURATION.captures(raw) else {
        return raw.to_string();
    };
    match DurationUnit::parse_loose(&caps[2]) {
        Some(unit) => format!("{} {}", &caps[1], unit.as_str()),
        None => raw.to_string(),
    }
}

/// Fit a dosage or duration column to exactly `count` entries.
///
/// - more than twice `count`: cut to `count` (noise such as address numbers)
/// - a single entry: shared by every medicine
/// - more than `count`: cut to `count`
/// - none: `default` for every medicine
/// - fewer than `count`: the last entry repeats
pub fn align_to_count(mut items: Vec<String>, count: usize, default: &str) -> Vec<String> {
    if items.len() > count * 2 {
        items.truncate(count);
    }

    if items.len() == 1 && count > 1 {
        vec![items[0].clone(); count]
    } else if items.len() > count {
        items.truncate(count);
        items
    } else if items.is_empty() {
        vec![default.to_string(); count]
    } else {
        let last = items[items.len() - 1].clone();
        items.resize(count, last);
        items
    }
}

/// Capitalize the first letter of every alphabetic run, lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
