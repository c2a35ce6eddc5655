//! Rule engine over decoded barcodes
//!
//! Rules run in a fixed order and the first failure decides the verdict:
//! 1. empty handling (`allow_empty`)
//! 2. text check
//! 3. blank check
//! 4. tokenizer
//! 5. required AIs
//! 6. forbidden AIs
//! 7. per-AI constraints, in configured order

pub mod config;
pub mod engine;
pub mod input;

pub use config::{AiConstraint, ValidatorConfig};
pub use engine::Validator;
pub use input::ScanInput;
