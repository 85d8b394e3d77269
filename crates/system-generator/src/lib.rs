//! Declarative N-body system generation
//!
//! Turns a configuration document of named generators, body templates and
//! nested systems into a flat list of simulation-ready bodies. Child systems
//! inherit their parents' property overrides; a template's own values always
//! win, and anything left unset is zero.

pub mod config;
pub mod error;
pub mod generation;
pub mod sampling;
pub mod slot;
pub mod template;
pub mod tree;

// Re-export main generation functions
pub use generation::{
    Resolver, generate, generate_from_seed_name, generate_seeded, seed_from_name,
};

pub use config::SystemConfig;
pub use error::{GenerationError, Result};
pub use sampling::{Generator, GeneratorRegistry, Range};
pub use slot::{GeneratorKind, OverrideContext, Properties, Slot};
pub use template::{BodyTemplate, BodyTemplateStore};
pub use tree::{Scope, SystemNode, SystemTree};

// Re-export output types for convenience
pub use nbody::{Body, SystemPath};

#[cfg(test)]
mod sampling_test;
