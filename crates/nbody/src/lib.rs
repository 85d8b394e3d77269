//! Simulation-ready body records
//!
//! The system generator emits a flat, ordered list of these records. Each one
//! carries the resolved physical state plus provenance for diagnostics.

pub mod body;

pub use body::{Body, SystemPath};

#[cfg(test)]
mod body_test;
