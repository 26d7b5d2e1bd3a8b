pub mod error_helpers;
pub mod file;
pub mod validation;
