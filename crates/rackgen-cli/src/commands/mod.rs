//! CLI command implementations

pub mod analyze;
pub mod generate;
pub mod hash;
pub mod json_output;
pub mod name;
pub mod validate;
