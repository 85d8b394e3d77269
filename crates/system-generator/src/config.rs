//! Configuration document for system generation.
//!
//! A thin, `serde`-deserializable mirror of the input tree. Nothing here is
//! validated beyond shape; the registry, template store and system tree do
//! that when they are built.
//!
//! # JSON format
//!
//! ```json
//! {
//!   "gens": [
//!     { "name": "p_mass", "type": "mass", "min": 0.1, "max": 0.3 },
//!     { "name": "p_trans", "type": "translation",
//!       "x": { "min": -10.0, "max": 10.0 }, "y": [-10.0, 10.0] }
//!   ],
//!   "bodies": [
//!     { "name": "sun", "m": 100.0 },
//!     { "name": "planet", "num": 7, "m": "p_mass" },
//!     { "name": "moon", "m": 3.0, "t": { "x": 10.0, "y": 0.0 }, "v": [0.0, 2.0] }
//!   ],
//!   "systems": {
//!     "name": "solar",
//!     "systems": [
//!       { "name": "sun" },
//!       { "name": "planets", "t": "p_trans", "systems": [{ "name": "planet" }] }
//!     ]
//!   }
//! }
//! ```

use serde::Deserialize;

use crate::error::Result;

/// Top-level configuration: generators, body templates and the system tree
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub gens: Vec<GeneratorDef>,
    #[serde(default)]
    pub bodies: Vec<BodyDef>,
    #[serde(default)]
    pub systems: SystemsDef,
}

impl SystemConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode from an already-parsed generic tree
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// A `(min, max)` range, written either as `{min, max}` or `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RangeDef {
    Pair([f64; 2]),
    Bounds { min: f64, max: f64 },
}

impl RangeDef {
    pub fn min_max(&self) -> (f64, f64) {
        match *self {
            RangeDef::Pair([min, max]) => (min, max),
            RangeDef::Bounds { min, max } => (min, max),
        }
    }
}

/// Entry of the `gens` section, tagged by its `type` field
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GeneratorDef {
    Mass {
        name: String,
        min: f64,
        max: f64,
    },
    Translation {
        name: String,
        x: RangeDef,
        y: RangeDef,
    },
    Velocity {
        name: String,
        dx: RangeDef,
        dy: RangeDef,
    },
    Rotation {
        name: String,
        min: f64,
        max: f64,
    },
}

impl GeneratorDef {
    pub fn name(&self) -> &str {
        match self {
            GeneratorDef::Mass { name, .. }
            | GeneratorDef::Translation { name, .. }
            | GeneratorDef::Velocity { name, .. }
            | GeneratorDef::Rotation { name, .. } => name,
        }
    }
}

/// Scalar property (`m`, `r`): a number or a generator name
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScalarDef {
    Literal(f64),
    Generator(String),
}

/// Planar property (`t`, `v`): a generator name or a pair in any shorthand
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PairDef {
    Generator(String),
    Pair([f64; 2]),
    Point { x: f64, y: f64 },
    Delta { dx: f64, dy: f64 },
}

/// Entry of the `bodies` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BodyDef {
    pub name: String,
    #[serde(default)]
    pub num: Option<i64>,
    #[serde(default)]
    pub m: Option<ScalarDef>,
    #[serde(default)]
    pub t: Option<PairDef>,
    #[serde(default)]
    pub v: Option<PairDef>,
    #[serde(default)]
    pub r: Option<ScalarDef>,
}

/// Node of the `systems` tree
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SystemNodeDef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub m: Option<ScalarDef>,
    #[serde(default)]
    pub t: Option<PairDef>,
    #[serde(default)]
    pub v: Option<PairDef>,
    #[serde(default)]
    pub r: Option<ScalarDef>,
    #[serde(default)]
    pub systems: Vec<SystemNodeDef>,
}

/// The `systems` section: one root node, or a list treated as the children
/// of an unnamed root
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SystemsDef {
    Root(Box<SystemNodeDef>),
    Forest(Vec<SystemNodeDef>),
}

impl Default for SystemsDef {
    fn default() -> Self {
        SystemsDef::Forest(Vec::new())
    }
}

impl SystemsDef {
    pub fn into_root(self) -> SystemNodeDef {
        match self {
            SystemsDef::Root(node) => *node,
            SystemsDef::Forest(systems) => SystemNodeDef {
                systems,
                ..SystemNodeDef::default()
            },
        }
    }
}
