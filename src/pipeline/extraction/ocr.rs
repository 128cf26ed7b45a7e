use super::types::{OcrEngine, OcrPageResult};
use super::ExtractionError;
use crate::config::MIN_OCR_TEXT_LENGTH;
use crate::models::OcrEngineKind;

/// Run engines in priority order and keep the first usable transcript.
///
/// An engine error or a transcript shorter than [`MIN_OCR_TEXT_LENGTH`]
/// non-blank characters moves on to the next engine. Scanned prescriptions are
/// usually tried with EasyOCR first and Tesseract second.
pub fn perform_ocr(
    engines: &[&dyn OcrEngine],
    image_bytes: &[u8],
) -> Result<OcrPageResult, ExtractionError> {
    for engine in engines {
        match engine.ocr_image(image_bytes) {
            Ok(result) if result.usable_len() >= MIN_OCR_TEXT_LENGTH => {
                tracing::debug!(
                    engine = %engine.kind(),
                    chars = result.usable_len(),
                    confidence = result.confidence,
                    "OCR transcript accepted"
                );
                return Ok(result);
            }
            Ok(result) => {
                tracing::debug!(
                    engine = %engine.kind(),
                    chars = result.usable_len(),
                    "OCR transcript too short, trying next engine"
                );
            }
            Err(e) => {
                tracing::warn!(engine = %engine.kind(), error = %e, "OCR engine failed");
            }
        }
    }

    Err(ExtractionError::NoTextFound {
        attempted: engines.len(),
    })
}

/// Pick between a PDF's embedded text layer and an OCR pass over its first page.
///
/// Digital PDFs carry their own text; only when that layer is blank does the
/// rendered page go through the engines.
pub fn text_from_pdf(
    text_layer: &str,
    engines: &[&dyn OcrEngine],
    rendered_first_page: Option<&[u8]>,
) -> Result<OcrPageResult, ExtractionError> {
    if !text_layer.trim().is_empty() {
        return Ok(OcrPageResult {
            text: text_layer.to_string(),
            engine: OcrEngineKind::PdfTextLayer,
            confidence: 0.99,
        });
    }

    match rendered_first_page {
        Some(bytes) => perform_ocr(engines, bytes),
        None => Err(ExtractionError::NoTextFound { attempted: 0 }),
    }
}
