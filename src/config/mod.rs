//! Declarative comparison configuration
//!
//! A comparison run is described by a small YAML document:
//!
//! ```yaml
//! folds: 10
//! repetitions: 10
//! seed: 42
//! stratified: true
//! threshold: 0.05
//! undefined_policy: exclude
//! metrics: [accuracy, f1]
//! ```
//!
//! Every key is optional; missing keys take their defaults.

mod loader;
mod schema;
mod validate;

pub use loader::load_config;
pub use schema::ComparisonConfig;
pub use validate::{validate_config, ValidationError};
