pub mod vocabulary;
pub mod similarity;
pub mod fuzzy;
pub mod patient;
pub mod medicines;
pub mod orchestrator;

pub use vocabulary::*;
pub use similarity::*;
pub use fuzzy::*;
pub use patient::*;
pub use medicines::*;
pub use orchestrator::*;
