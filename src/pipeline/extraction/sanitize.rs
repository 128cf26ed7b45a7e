/// Line separators recognized in OCR output: the usual newlines plus the
/// vertical tab, form feed (page breaks from Tesseract), file/group/record
/// separators, NEL and the Unicode line and paragraph separators.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Drop non-printing control characters (NULs, escape codes) that OCR
/// engines occasionally emit.
///
/// Printable characters, tabs and line breaks pass through untouched, so
/// table separators such as `|` keep neighbouring tokens apart.
pub fn sanitize_extracted_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control() || c.is_whitespace() || LINE_BREAKS.contains(c))
        .collect()
}

/// Trimmed, non-empty lines of `text`, broken on every OCR line separator.
pub fn ocr_lines(text: &str) -> Vec<&str> {
    text.split(LINE_BREAKS)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Normalize OCR punctuation confusions before parsing.
///
/// OCR frequently reads a period as `_` or `,` (`Dr_ Rao`, `500,0mg`), so both
/// become `.`.
pub fn normalize_ocr_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '_' | ',' => '.',
            other => other,
        })
        .collect()
}
