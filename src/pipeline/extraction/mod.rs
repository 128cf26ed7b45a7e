pub mod types;
pub mod sanitize;
pub mod ocr;
pub mod medical_correction;

pub use types::*;
pub use sanitize::*;
pub use ocr::*;
pub use medical_correction::*;

use thiserror::Error;

use crate::models::OcrEngineKind;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OCR processing failed ({engine}): {reason}")]
    OcrProcessing { engine: OcrEngineKind, reason: String },

    #[error("No OCR engine produced usable text (tried {attempted} engine(s))")]
    NoTextFound { attempted: usize },

    #[error("Input is not valid UTF-8: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
