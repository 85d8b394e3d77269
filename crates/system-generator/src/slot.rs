//! Property slots and the override context
//!
//! Every body property is held in a three-way [`Slot`]: an explicit literal,
//! a generator reference, or unset. Keeping "unset" distinct from a literal
//! zero is what makes the precedence merge total.

use std::fmt;

use nalgebra::Vector2;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};

use crate::config::{PairDef, ScalarDef};
use crate::error::Result;
use crate::sampling::{Generator, GeneratorRegistry};

/// Which property a generator (or slot) produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    Mass,
    Translation,
    Velocity,
    Rotation,
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mass => write!(f, "mass"),
            Self::Translation => write!(f, "translation"),
            Self::Velocity => write!(f, "velocity"),
            Self::Rotation => write!(f, "rotation"),
        }
    }
}

/// Value types a slot can hold
///
/// Scalars come from `mass`/`rotation` generators and pairs from
/// `translation`/`velocity` generators; `draw` returns `None` for the others.
pub trait SlotValue: Copy + PartialEq + fmt::Debug {
    fn zero() -> Self;

    fn draw(generator: &Generator, rng: &mut ChaChaRng) -> Option<Self>;
}

impl SlotValue for f64 {
    fn zero() -> Self {
        0.0
    }

    fn draw(generator: &Generator, rng: &mut ChaChaRng) -> Option<Self> {
        match generator {
            Generator::Mass(range) | Generator::Rotation(range) => Some(range.sample(rng)),
            Generator::Translation { .. } | Generator::Velocity { .. } => None,
        }
    }
}

impl SlotValue for Vector2<f64> {
    fn zero() -> Self {
        Vector2::zeros()
    }

    fn draw(generator: &Generator, rng: &mut ChaChaRng) -> Option<Self> {
        match generator {
            Generator::Translation { x, y } | Generator::Velocity { dx: x, dy: y } => {
                // x is always drawn before y
                let x = x.sample(rng);
                let y = y.sample(rng);
                Some(Vector2::new(x, y))
            }
            Generator::Mass(_) | Generator::Rotation(_) => None,
        }
    }
}

/// One property slot: unset, a fixed value, or a generator name sampled
/// per instance
///
/// `Default` is written out by hand so that `Slot<T>: Default` holds for any
/// `T`; the derive would require `T: Default`.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    Unset,
    Literal(T),
    Generator(String),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Unset
    }
}

impl<T: SlotValue> Slot<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Slot::Unset)
    }

    /// This slot if set, otherwise the inherited one
    pub fn over(&self, inherited: &Slot<T>) -> Slot<T> {
        match self {
            Slot::Unset => inherited.clone(),
            set => set.clone(),
        }
    }

    /// Concrete value for one instance; generators are sampled on every call
    pub fn resolve(
        &self,
        kind: GeneratorKind,
        registry: &GeneratorRegistry,
        rng: &mut ChaChaRng,
    ) -> Result<T> {
        match self {
            Slot::Unset => Ok(T::zero()),
            Slot::Literal(value) => Ok(*value),
            Slot::Generator(name) => registry.sample(name, kind, rng),
        }
    }

    fn check(&self, kind: GeneratorKind, registry: &GeneratorRegistry) -> Result<()> {
        match self {
            Slot::Generator(name) => registry.check(name, kind).map(|_| ()),
            Slot::Unset | Slot::Literal(_) => Ok(()),
        }
    }
}

impl From<Option<ScalarDef>> for Slot<f64> {
    fn from(def: Option<ScalarDef>) -> Self {
        match def {
            None => Slot::Unset,
            Some(ScalarDef::Literal(value)) => Slot::Literal(value),
            Some(ScalarDef::Generator(name)) => Slot::Generator(name),
        }
    }
}

impl From<Option<PairDef>> for Slot<Vector2<f64>> {
    fn from(def: Option<PairDef>) -> Self {
        match def {
            None => Slot::Unset,
            Some(PairDef::Generator(name)) => Slot::Generator(name),
            Some(PairDef::Pair([x, y]))
            | Some(PairDef::Point { x, y })
            | Some(PairDef::Delta { dx: x, dy: y }) => Slot::Literal(Vector2::new(x, y)),
        }
    }
}

/// The four property slots carried by templates and system nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    pub mass: Slot<f64>,
    pub translation: Slot<Vector2<f64>>,
    pub velocity: Slot<Vector2<f64>>,
    pub rotation: Slot<f64>,
}

/// Inherited property defaults visible at a point of the tree walk
pub type OverrideContext = Properties;

impl Properties {
    pub fn from_defs(
        m: Option<ScalarDef>,
        t: Option<PairDef>,
        v: Option<PairDef>,
        r: Option<ScalarDef>,
    ) -> Self {
        Self {
            mass: m.into(),
            translation: t.into(),
            velocity: v.into(),
            rotation: r.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mass.is_unset()
            && self.translation.is_unset()
            && self.velocity.is_unset()
            && self.rotation.is_unset()
    }

    /// Overlay these slots onto an inherited context, slot by slot
    pub fn over(&self, inherited: &Properties) -> Properties {
        Properties {
            mass: self.mass.over(&inherited.mass),
            translation: self.translation.over(&inherited.translation),
            velocity: self.velocity.over(&inherited.velocity),
            rotation: self.rotation.over(&inherited.rotation),
        }
    }

    /// Verify every generator reference exists and has the slot's kind
    pub fn check(&self, registry: &GeneratorRegistry) -> Result<()> {
        self.mass.check(GeneratorKind::Mass, registry)?;
        self.translation.check(GeneratorKind::Translation, registry)?;
        self.velocity.check(GeneratorKind::Velocity, registry)?;
        self.rotation.check(GeneratorKind::Rotation, registry)
    }
}
