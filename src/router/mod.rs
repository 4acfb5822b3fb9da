mod cache;
pub(crate) mod captures;
pub mod condition;
mod core;
mod error;
mod imp;
mod matched;
mod request;
mod reverse;

pub use self::captures::Captures;
pub use self::error::{CompileError, MatchError, RouterError};
pub use self::matched::{Frame, Match};
pub use self::request::RequestInfo;

use self::cache::LookupCache;
use self::condition::SharedCondition;
use crate::config::Config;
use crate::pattern::{Pattern, TypeRegistry};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use http::Method;

/// Index of a route inside its [`Router`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

pub type Shortcut<T> =
    dyn Fn(&mut Router<T>, NodeId, &str) -> Result<NodeId, RouterError> + Send + Sync;

/// A tree of routes, matched depth first in declaration order.
///
/// Nodes live in an arena: metadata in `routes`, dispatch targets in the
/// parallel `targets`. Children are owned through index lists, parents are
/// plain indices.
pub struct Router<T> {
    config: Config,
    routes: Vec<Route>,
    targets: Vec<Option<T>>,
    names: HashMap<Box<str>, NodeId>,
    types: TypeRegistry,
    conditions: HashMap<Box<str>, SharedCondition>,
    shortcuts: HashMap<Box<str>, Arc<Shortcut<T>>>,
    cache: LookupCache,
}

/// Metadata of one node of the tree.
pub struct Route {
    id: NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pattern: Pattern,
    methods: Vec<Method>,
    name: Option<Box<str>>,
    default_name: Box<str>,
    conditions: Vec<(Box<str>, Box<str>, SharedCondition)>,
    partial: bool,
}

impl Route {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Accepted methods; empty accepts any.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// The explicitly assigned name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The name derived from the template, e.g. `userid` for `/user/:id`.
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    pub fn conditions(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.conditions.iter().map(|(n, a, _)| (&**n, &**a))
    }

    /// Bridges push their own frame onto the match stack.
    pub fn is_bridge(&self) -> bool {
        self.partial
    }

    /// Routes without children are the only match targets.
    pub fn is_endpoint(&self) -> bool {
        self.children.is_empty() && self.parent.is_some()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("pattern", &self.pattern.raw())
            .field("methods", &self.methods)
            .field("name", &self.name)
            .field("conditions", &self.conditions().collect::<Vec<_>>())
            .field("partial", &self.partial)
            .finish()
    }
}

impl<T> fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("routes", &self.routes)
            .field("names", &self.names)
            .field("types", &self.types)
            .finish_non_exhaustive()
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn default_name(raw: &str) -> Box<str> {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .into_boxed_str()
}
