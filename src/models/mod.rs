pub mod barcode;
pub mod resolution;

pub use barcode::{Barcode, CarrierType};
pub use resolution::{ErrorCode, Resolution, Violation};
