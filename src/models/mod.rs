pub mod enums;
pub mod medication;
pub mod patient;
pub mod reminder;

pub use enums::*;
pub use medication::*;
pub use patient::*;
pub use reminder::*;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid value '{value}' for {field}")]
    InvalidEnum { field: String, value: String },
}
