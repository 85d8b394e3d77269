//! System generation pipeline
//!
//! Builds the generator registry and template store from a [`SystemConfig`],
//! compiles the system tree, and walks it into a flat, ordered list of
//! [`Body`] records.

use nbody::{Body, SystemPath};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SystemConfig;
use crate::error::{GenerationError, Result};
use crate::sampling::GeneratorRegistry;
use crate::slot::OverrideContext;
use crate::template::BodyTemplateStore;
use crate::tree::SystemTree;

/// A validated, ready-to-walk configuration
///
/// Holds no mutable state: it can be shared across threads, with each caller
/// supplying its own random source.
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: GeneratorRegistry,
    templates: BodyTemplateStore,
    tree: SystemTree,
}

impl Resolver {
    /// Build and validate everything `generate` needs
    ///
    /// Every generator reference is checked here, so a dangling name or a
    /// generator of the wrong kind fails before any sampling happens.
    pub fn from_config(config: &SystemConfig) -> Result<Self> {
        let registry = GeneratorRegistry::from_defs(&config.gens)?;
        let templates = BodyTemplateStore::from_defs(&config.bodies)?;
        let tree = SystemTree::build(config.systems.clone().into_root(), &templates)?;

        templates.check(&registry)?;
        tree.check(&registry)?;

        debug!(
            generators = registry.len(),
            templates = templates.len(),
            "resolver built"
        );

        Ok(Self {
            registry,
            templates,
            tree,
        })
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    pub fn templates(&self) -> &BodyTemplateStore {
        &self.templates
    }

    pub fn tree(&self) -> &SystemTree {
        &self.tree
    }

    /// Walk the whole system tree
    pub fn generate(&self, rng: &mut ChaChaRng) -> Result<Vec<Body>> {
        let bodies = self.tree.walk(&self.registry, &self.templates, rng)?;
        info!(bodies = bodies.len(), "system generated");
        Ok(bodies)
    }

    /// Generate a single body template or system definition by name
    ///
    /// A template yields its `count` bodies with no inherited overrides; a
    /// system definition is walked as if it were the root.
    pub fn generate_named(&self, name: &str, rng: &mut ChaChaRng) -> Result<Vec<Body>> {
        let bodies = if self.templates.contains(name) {
            let path = SystemPath::root().child(name);
            self.templates.instantiate(
                name,
                &OverrideContext::default(),
                &self.registry,
                &path,
                rng,
            )?
        } else if self.tree.has_definition(name) {
            self.tree
                .walk_definition(name, &self.registry, &self.templates, rng)?
        } else {
            return Err(GenerationError::UnknownTemplate(name.to_string()));
        };

        info!(name, bodies = bodies.len(), "system generated");
        Ok(bodies)
    }
}

/// Generate every body described by `config`
///
/// The same configuration and the same RNG state always produce the same
/// bodies in the same order.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaChaRng;
/// use system_generator::{SystemConfig, generate};
///
/// let config = SystemConfig::from_json_str(
///     r#"{
///         "bodies": [{ "name": "sun", "m": 100.0 }],
///         "systems": { "name": "sun" }
///     }"#,
/// )
/// .unwrap();
///
/// let mut rng = ChaChaRng::seed_from_u64(42);
/// let bodies = generate(&config, &mut rng).unwrap();
/// assert_eq!(bodies.len(), 1);
/// assert_eq!(bodies[0].mass, 100.0);
/// ```
pub fn generate(config: &SystemConfig, rng: &mut ChaChaRng) -> Result<Vec<Body>> {
    Resolver::from_config(config)?.generate(rng)
}

/// Generate with a fresh `ChaChaRng` seeded from `seed`
pub fn generate_seeded(config: &SystemConfig, seed: u64) -> Result<Vec<Body>> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    generate(config, &mut rng)
}

/// Generate with a seed derived from a human-readable name
///
/// The name is hashed into a UUIDv5, so the same name always produces the
/// same bodies.
pub fn generate_from_seed_name(config: &SystemConfig, seed_name: &str) -> Result<Vec<Body>> {
    generate_seeded(config, seed_from_name(seed_name))
}

/// Deterministic u64 seed from a name (first 8 bytes of its UUIDv5)
pub fn seed_from_name(seed_name: &str) -> u64 {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, seed_name.as_bytes())
        .as_u64_pair()
        .0
}
