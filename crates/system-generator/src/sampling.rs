//! Named property generators
//!
//! A generator draws a uniform value per dimension from its configured
//! `[min, max]` ranges. All randomness comes from the caller's `ChaChaRng`,
//! so the same seed and walk order reproduce the same samples.

use std::collections::HashMap;

use rand::Rng;
use rand_chacha::ChaChaRng;
use tracing::debug;

use crate::config::GeneratorDef;
use crate::error::{GenerationError, Result};
use crate::slot::{GeneratorKind, SlotValue};

/// Inclusive sampling range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Finite bounds with `min <= max` whose span is also finite
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min <= self.max
            && (self.max - self.min).is_finite()
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Uniform draw in `[min, max]`; the range must be valid
    pub fn sample(&self, rng: &mut ChaChaRng) -> f64 {
        rng.random_range(self.min..=self.max)
    }
}

/// A typed sampler for one body property
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Generator {
    Mass(Range),
    Translation { x: Range, y: Range },
    Velocity { dx: Range, dy: Range },
    Rotation(Range),
}

impl Generator {
    pub fn kind(&self) -> GeneratorKind {
        match self {
            Generator::Mass(_) => GeneratorKind::Mass,
            Generator::Translation { .. } => GeneratorKind::Translation,
            Generator::Velocity { .. } => GeneratorKind::Velocity,
            Generator::Rotation(_) => GeneratorKind::Rotation,
        }
    }

    fn ranges(&self) -> Vec<Range> {
        match *self {
            Generator::Mass(range) | Generator::Rotation(range) => vec![range],
            Generator::Translation { x, y } => vec![x, y],
            Generator::Velocity { dx, dy } => vec![dx, dy],
        }
    }
}

impl From<&GeneratorDef> for Generator {
    fn from(def: &GeneratorDef) -> Self {
        let range = |(min, max): (f64, f64)| Range::new(min, max);
        match def {
            GeneratorDef::Mass { min, max, .. } => Generator::Mass(Range::new(*min, *max)),
            GeneratorDef::Translation { x, y, .. } => Generator::Translation {
                x: range(x.min_max()),
                y: range(y.min_max()),
            },
            GeneratorDef::Velocity { dx, dy, .. } => Generator::Velocity {
                dx: range(dx.min_max()),
                dy: range(dy.min_max()),
            },
            GeneratorDef::Rotation { min, max, .. } => {
                Generator::Rotation(Range::new(*min, *max))
            }
        }
    }
}

/// Registry of named generators, immutable once built
#[derive(Debug, Clone, Default)]
pub struct GeneratorRegistry {
    generators: HashMap<String, Generator>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from the `gens` section; definition order is irrelevant
    pub fn from_defs(defs: &[GeneratorDef]) -> Result<Self> {
        let mut registry = Self::new();
        for def in defs {
            registry.define(def.name(), Generator::from(def))?;
        }
        debug!(generators = registry.len(), "generator registry built");
        Ok(registry)
    }

    pub fn define(&mut self, name: impl Into<String>, generator: Generator) -> Result<()> {
        let name = name.into();

        if let Some(range) = generator.ranges().into_iter().find(|r| !r.is_valid()) {
            return Err(GenerationError::InvalidBounds {
                name,
                min: range.min,
                max: range.max,
            });
        }
        if self.generators.contains_key(&name) {
            return Err(GenerationError::DuplicateName {
                namespace: "generator",
                name,
            });
        }

        self.generators.insert(name, generator);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Generator> {
        self.generators.get(name)
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Look up `name` and make sure it can fill a slot of `kind`
    pub fn check(&self, name: &str, kind: GeneratorKind) -> Result<&Generator> {
        let generator = self
            .get(name)
            .ok_or_else(|| GenerationError::UnknownGenerator(name.to_string()))?;

        if generator.kind() != kind {
            return Err(GenerationError::KindMismatch {
                name: name.to_string(),
                expected: kind,
                found: generator.kind(),
            });
        }
        Ok(generator)
    }

    /// Draw a fresh value from `name` for a slot of `kind`
    pub fn sample<T: SlotValue>(
        &self,
        name: &str,
        kind: GeneratorKind,
        rng: &mut ChaChaRng,
    ) -> Result<T> {
        let generator = self.check(name, kind)?;

        T::draw(generator, rng).ok_or_else(|| GenerationError::KindMismatch {
            name: name.to_string(),
            expected: kind,
            found: generator.kind(),
        })
    }
}
