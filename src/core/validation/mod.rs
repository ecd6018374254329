//! Validation and filtering system
//!
//! A declarative way to normalise and validate a JSON payload (such as a job
//! draft) field by field before it is turned into a record.

pub mod filters;
pub mod rules;
pub mod validators;

pub use rules::RuleSet;
