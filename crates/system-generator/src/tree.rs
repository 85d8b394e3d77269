//! System tree and override propagation
//!
//! The loose `systems` nodes from the configuration are compiled into a
//! tagged [`SystemNode`]:
//!
//! - a node whose name matches a body template instantiates it,
//! - a childless node with any other name splices in the system definition
//!   of that name,
//! - everything else is a grouping scope; named groups double as
//!   definitions that can be referenced from anywhere in the tree.
//!
//! The walk is depth-first pre-order. Override contexts are plain values
//! handed down the recursion, so sibling subtrees never see each other's
//! overrides.

use std::collections::HashMap;
use std::sync::Arc;

use nbody::{Body, SystemPath};
use rand_chacha::ChaChaRng;

use crate::config::SystemNodeDef;
use crate::error::{GenerationError, Result};
use crate::sampling::GeneratorRegistry;
use crate::slot::{OverrideContext, Properties};
use crate::template::BodyTemplateStore;

/// Overrides plus ordered children
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    pub overrides: Properties,
    pub children: Vec<SystemNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SystemNode {
    /// Instantiates the body template `name`, then walks its children
    Template { name: String, scope: Arc<Scope> },
    /// Splices in the system definition `name` at this point
    Reference { name: String, overrides: Properties },
    /// Pure grouping/override scope
    Group {
        name: Option<String>,
        scope: Arc<Scope>,
    },
}

impl SystemNode {
    pub fn name(&self) -> Option<&str> {
        match self {
            SystemNode::Template { name, .. } | SystemNode::Reference { name, .. } => Some(name),
            SystemNode::Group { name, .. } => name.as_deref(),
        }
    }

    fn check(&self, registry: &GeneratorRegistry) -> Result<()> {
        match self {
            SystemNode::Reference { overrides, .. } => overrides.check(registry),
            SystemNode::Template { scope, .. } | SystemNode::Group { scope, .. } => {
                scope.overrides.check(registry)?;
                scope
                    .children
                    .iter()
                    .try_for_each(|child| child.check(registry))
            }
        }
    }
}

/// Compiled `systems` section
#[derive(Debug, Clone, PartialEq)]
pub struct SystemTree {
    root: SystemNode,
    definitions: HashMap<String, Arc<Scope>>,
}

impl SystemTree {
    /// Compile the configuration tree against the known templates
    ///
    /// Fails on repeated definition names and on references that name
    /// neither a template nor a definition.
    pub fn build(root: SystemNodeDef, templates: &BodyTemplateStore) -> Result<Self> {
        let mut definitions = HashMap::new();
        let mut references = Vec::new();
        let root = compile(root, templates, &mut definitions, &mut references)?;

        if let Some(dangling) = references
            .into_iter()
            .find(|name| !definitions.contains_key(name))
        {
            return Err(GenerationError::UnknownTemplate(dangling));
        }

        Ok(Self { root, definitions })
    }

    pub fn root(&self) -> &SystemNode {
        &self.root
    }

    pub fn definition(&self, name: &str) -> Result<&Arc<Scope>> {
        self.definitions
            .get(name)
            .ok_or_else(|| GenerationError::UnknownTemplate(name.to_string()))
    }

    pub fn has_definition(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Verify every generator reference held by an override
    pub fn check(&self, registry: &GeneratorRegistry) -> Result<()> {
        self.root.check(registry)
    }

    /// Walk the whole tree from the root with an empty context
    pub fn walk(
        &self,
        registry: &GeneratorRegistry,
        templates: &BodyTemplateStore,
        rng: &mut ChaChaRng,
    ) -> Result<Vec<Body>> {
        let mut walker = Walker::new(self, registry, templates, rng);
        walker.node(&self.root, &OverrideContext::default(), &SystemPath::root())?;
        Ok(walker.bodies)
    }

    /// Walk a single named system definition with an empty context
    pub fn walk_definition(
        &self,
        name: &str,
        registry: &GeneratorRegistry,
        templates: &BodyTemplateStore,
        rng: &mut ChaChaRng,
    ) -> Result<Vec<Body>> {
        let scope = self.definition(name)?;
        let mut walker = Walker::new(self, registry, templates, rng);
        walker.definition(
            name,
            scope,
            None,
            &OverrideContext::default(),
            &SystemPath::root(),
        )?;
        Ok(walker.bodies)
    }
}

fn compile(
    def: SystemNodeDef,
    templates: &BodyTemplateStore,
    definitions: &mut HashMap<String, Arc<Scope>>,
    references: &mut Vec<String>,
) -> Result<SystemNode> {
    let overrides = Properties::from_defs(def.m, def.t, def.v, def.r);

    let mut children = Vec::with_capacity(def.systems.len());
    for child in def.systems {
        children.push(compile(child, templates, definitions, references)?);
    }

    let node = match def.name {
        Some(name) if templates.contains(&name) => SystemNode::Template {
            name,
            scope: Arc::new(Scope {
                overrides,
                children,
            }),
        },
        Some(name) if children.is_empty() => {
            references.push(name.clone());
            SystemNode::Reference { name, overrides }
        }
        Some(name) => {
            let scope = Arc::new(Scope {
                overrides,
                children,
            });
            if definitions.insert(name.clone(), scope.clone()).is_some() {
                return Err(GenerationError::DuplicateName {
                    namespace: "system",
                    name,
                });
            }
            SystemNode::Group {
                name: Some(name),
                scope,
            }
        }
        None => SystemNode::Group {
            name: None,
            scope: Arc::new(Scope {
                overrides,
                children,
            }),
        },
    };
    Ok(node)
}

struct Walker<'a> {
    tree: &'a SystemTree,
    registry: &'a GeneratorRegistry,
    templates: &'a BodyTemplateStore,
    rng: &'a mut ChaChaRng,
    /// Definitions currently being walked, outermost first
    active: Vec<String>,
    bodies: Vec<Body>,
}

impl<'a> Walker<'a> {
    fn new(
        tree: &'a SystemTree,
        registry: &'a GeneratorRegistry,
        templates: &'a BodyTemplateStore,
        rng: &'a mut ChaChaRng,
    ) -> Self {
        Self {
            tree,
            registry,
            templates,
            rng,
            active: Vec::new(),
            bodies: Vec::new(),
        }
    }

    fn node(
        &mut self,
        node: &SystemNode,
        inherited: &OverrideContext,
        path: &SystemPath,
    ) -> Result<()> {
        match node {
            SystemNode::Template { name, scope } => {
                let context = scope.overrides.over(inherited);
                let path = path.child(name);
                let bodies = self
                    .templates
                    .instantiate(name, &context, self.registry, &path, self.rng)?;
                self.bodies.extend(bodies);
                self.children(&scope.children, &context, &path)
            }
            SystemNode::Reference { name, overrides } => {
                let tree = self.tree;
                let scope = tree.definition(name)?;
                self.definition(name, scope, Some(overrides), inherited, path)
            }
            SystemNode::Group {
                name: Some(name),
                scope,
            } => self.definition(name, scope, None, inherited, path),
            SystemNode::Group { name: None, scope } => {
                let context = scope.overrides.over(inherited);
                self.children(&scope.children, &context, path)
            }
        }
    }

    /// Walk a named definition; `call_site` overrides sit on top of the
    /// definition's own
    fn definition(
        &mut self,
        name: &str,
        scope: &Scope,
        call_site: Option<&Properties>,
        inherited: &OverrideContext,
        path: &SystemPath,
    ) -> Result<()> {
        if self.active.iter().any(|active| active == name) {
            let mut chain = self.active.clone();
            chain.push(name.to_string());
            return Err(GenerationError::Cycle {
                name: name.to_string(),
                chain,
            });
        }

        let mut context = scope.overrides.over(inherited);
        if let Some(overrides) = call_site {
            context = overrides.over(&context);
        }

        self.active.push(name.to_string());
        let result = self.children(&scope.children, &context, &path.child(name));
        self.active.pop();
        result
    }

    fn children(
        &mut self,
        children: &[SystemNode],
        context: &OverrideContext,
        path: &SystemPath,
    ) -> Result<()> {
        children
            .iter()
            .try_for_each(|child| self.node(child, context, path))
    }
}
