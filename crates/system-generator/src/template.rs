//! Body templates
//!
//! A template is a named prototype with an instance count and its own
//! property slots. Instantiating it against an override context yields
//! `count` concrete bodies.

use std::collections::HashMap;

use nalgebra::Point2;
use nbody::{Body, SystemPath};
use rand_chacha::ChaChaRng;
use tracing::{trace, warn};

use crate::config::BodyDef;
use crate::error::{GenerationError, Result};
use crate::sampling::GeneratorRegistry;
use crate::slot::{GeneratorKind, OverrideContext, Properties};

#[derive(Debug, Clone, PartialEq)]
pub struct BodyTemplate {
    pub name: String,
    pub count: usize,
    pub properties: Properties,
}

impl BodyTemplate {
    pub fn new(name: impl Into<String>, count: usize, properties: Properties) -> Result<Self> {
        let name = name.into();
        if count == 0 {
            return Err(GenerationError::InvalidCount { name, count: 0 });
        }
        Ok(Self {
            name,
            count,
            properties,
        })
    }

    /// Convert a `bodies` entry; `num` defaults to 1 and must be positive
    pub fn from_def(def: BodyDef) -> Result<Self> {
        let count = match def.num {
            None => 1,
            Some(n) if n > 0 => n as usize,
            Some(n) => {
                return Err(GenerationError::InvalidCount {
                    name: def.name,
                    count: n,
                });
            }
        };
        let properties = Properties::from_defs(def.m, def.t, def.v, def.r);
        Self::new(def.name, count, properties)
    }

    /// Produce `count` bodies
    ///
    /// The template's own slots take precedence over `context`; whatever is
    /// still unset resolves to zero. Each instance samples its generators
    /// independently, in the order mass, translation, velocity, rotation.
    pub fn instantiate(
        &self,
        context: &OverrideContext,
        registry: &GeneratorRegistry,
        path: &SystemPath,
        rng: &mut ChaChaRng,
    ) -> Result<Vec<Body>> {
        let properties = self.properties.over(context);

        let bodies = (0..self.count)
            .map(|_| {
                let mass = properties.mass.resolve(GeneratorKind::Mass, registry, rng)?;
                let translation = properties
                    .translation
                    .resolve(GeneratorKind::Translation, registry, rng)?;
                let velocity = properties
                    .velocity
                    .resolve(GeneratorKind::Velocity, registry, rng)?;
                let rotation = properties
                    .rotation
                    .resolve(GeneratorKind::Rotation, registry, rng)?;

                if mass <= 0.0 {
                    warn!(template = %self.name, path = %path, mass, "body has non-positive mass");
                }

                Ok(Body {
                    mass,
                    translation: Point2::from(translation),
                    velocity,
                    rotation,
                    source_template: self.name.clone(),
                    source_system_path: path.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        trace!(template = %self.name, path = %path, count = self.count, "template instantiated");
        Ok(bodies)
    }
}

/// Named body templates, immutable once built
#[derive(Debug, Clone, Default)]
pub struct BodyTemplateStore {
    templates: HashMap<String, BodyTemplate>,
    /// Template names in definition order
    order: Vec<String>,
}

impl BodyTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the store from the `bodies` section, keeping its order for `check`
    pub fn from_defs(defs: &[BodyDef]) -> Result<Self> {
        let mut store = Self::new();
        for def in defs {
            store.define(BodyTemplate::from_def(def.clone())?)?;
        }
        Ok(store)
    }

    pub fn define(&mut self, template: BodyTemplate) -> Result<()> {
        if self.templates.contains_key(&template.name) {
            return Err(GenerationError::DuplicateName {
                namespace: "body template",
                name: template.name,
            });
        }
        self.order.push(template.name.clone());
        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&BodyTemplate> {
        self.templates
            .get(name)
            .ok_or_else(|| GenerationError::UnknownTemplate(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Verify every generator reference held by a template
    ///
    /// Templates are checked in definition order, so the reported error is
    /// the one from the earliest offending template.
    pub fn check(&self, registry: &GeneratorRegistry) -> Result<()> {
        self.order
            .iter()
            .filter_map(|name| self.templates.get(name))
            .try_for_each(|template| template.properties.check(registry))
    }

    pub fn instantiate(
        &self,
        name: &str,
        context: &OverrideContext,
        registry: &GeneratorRegistry,
        path: &SystemPath,
        rng: &mut ChaChaRng,
    ) -> Result<Vec<Body>> {
        self.lookup(name)?.instantiate(context, registry, path, rng)
    }
}
