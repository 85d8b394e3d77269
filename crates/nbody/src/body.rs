use std::fmt;

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Location of a body's instantiation site in the system tree
///
/// One segment per named node entered on the way down from the root,
/// e.g. `solar/planets/planet`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SystemPath(Vec<String>);

impl SystemPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns a new path extended by one segment, leaving `self` untouched
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SystemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl<S: Into<String>> FromIterator<S> for SystemPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A fully resolved body, ready to hand to a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    pub mass: f64,
    pub translation: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub rotation: f64,
    /// Name of the body template this record was instantiated from
    pub source_template: String,
    /// Where in the system tree the template was instantiated
    pub source_system_path: SystemPath,
}

impl Body {
    /// Creates a body with the given physical state and provenance
    ///
    /// Translation and velocity are given as `[x, y]` / `[dx, dy]` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::body::{Body, SystemPath};
    ///
    /// let path: SystemPath = ["solar", "earth"].into_iter().collect();
    /// let earth = Body::new(20.0, [0.0, 1.0], [1.0, 0.0], 0.2, "earth", path);
    ///
    /// assert_eq!(earth.mass, 20.0);
    /// assert_eq!(earth.source_system_path.to_string(), "solar/earth");
    /// ```
    pub fn new(
        mass: f64,
        translation: [f64; 2],
        velocity: [f64; 2],
        rotation: f64,
        source_template: impl Into<String>,
        source_system_path: SystemPath,
    ) -> Self {
        Body {
            mass,
            translation: Point2::new(translation[0], translation[1]),
            velocity: Vector2::new(velocity[0], velocity[1]),
            rotation,
            source_template: source_template.into(),
            source_system_path,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M({}) P({}, {}) V({}, {}) R({})",
            self.mass,
            self.translation.x,
            self.translation.y,
            self.velocity.x,
            self.velocity.y,
            self.rotation
        )
    }
}
