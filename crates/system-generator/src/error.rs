//! Generation errors

use thiserror::Error;

use crate::slot::GeneratorKind;

/// Generation result type
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Load-time and resolution-time failures
///
/// Generation stops at the first error; no partial output is returned.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("duplicate {namespace} name: {name}")]
    DuplicateName {
        namespace: &'static str,
        name: String,
    },

    #[error("unknown generator: {0}")]
    UnknownGenerator(String),

    #[error("unknown body template or system: {0}")]
    UnknownTemplate(String),

    #[error("generator {name} is a {found} generator but fills a {expected} slot")]
    KindMismatch {
        name: String,
        expected: GeneratorKind,
        found: GeneratorKind,
    },

    #[error("invalid bounds for generator {name}: [{min}, {max}]")]
    InvalidBounds { name: String, min: f64, max: f64 },

    #[error("system {name} substitutes itself: {}", .chain.join(" -> "))]
    Cycle { name: String, chain: Vec<String> },

    #[error("invalid count for body template {name}: {count}")]
    InvalidCount { name: String, count: i64 },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
