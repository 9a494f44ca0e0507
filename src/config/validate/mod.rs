//! Configuration validation
//!
//! Validates comparison configs before any algorithm is run.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::validate_config;
