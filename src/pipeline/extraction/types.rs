use serde::{Deserialize, Serialize};

use super::ExtractionError;
use crate::models::OcrEngineKind;

/// Raw OCR result from an engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrPageResult {
    pub text: String,
    pub engine: OcrEngineKind,
    pub confidence: f32,
}

impl OcrPageResult {
    /// Length of the text once surrounding whitespace is dropped.
    pub fn usable_len(&self) -> usize {
        self.text.trim().chars().count()
    }
}

/// OCR engine abstraction (allows mocking for tests)
///
/// Image decoding and the engines themselves live outside this crate; an
/// implementation only has to turn image bytes into text.
pub trait OcrEngine {
    fn kind(&self) -> OcrEngineKind;

    fn ocr_image(&self, image_bytes: &[u8]) -> Result<OcrPageResult, ExtractionError>;
}
