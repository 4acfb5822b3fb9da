use super::cache::LookupCache;
use super::condition::{self, SharedCondition};
use super::error::RouterError;
use super::{default_name, NodeId, Route, Router, Shortcut};
use crate::config::Config;
use crate::pattern::{Pattern, PatternOptions, TypeDef, TypeRegistry};

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use tracing::{debug, warn};

impl<T> Router<T> {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let root = Route {
            id: NodeId::ROOT,
            parent: None,
            children: Vec::new(),
            pattern: Pattern::with_options("", &PatternOptions::new(), &TypeRegistry::new(), false)
                .unwrap_or_else(|e| unreachable!("root pattern: {}", e)),
            methods: Vec::new(),
            name: None,
            default_name: "".into(),
            conditions: Vec::new(),
            partial: false,
        };

        let mut conditions: HashMap<Box<str>, SharedCondition> = HashMap::new();
        conditions.insert(condition::HOST.into(), Arc::new(condition::host));
        conditions.insert(condition::HEADER.into(), Arc::new(condition::header));

        Self {
            config,
            routes: vec![root],
            targets: vec![None],
            names: HashMap::new(),
            types: TypeRegistry::new(),
            conditions,
            shortcuts: HashMap::new(),
            cache: LookupCache::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of routes, the root included.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.len() == 1
    }

    pub fn route(&self, id: NodeId) -> &Route {
        &self.routes[id.0]
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> + '_ {
        self.routes.iter()
    }

    pub fn target(&self, id: NodeId) -> Option<&T> {
        self.targets[id.0].as_ref()
    }

    pub fn target_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.targets[id.0].as_mut()
    }

    /// Adds a child route under `parent`.
    pub fn add_route(
        &mut self,
        parent: NodeId,
        pattern: &str,
        methods: &[Method],
        opts: &PatternOptions,
    ) -> Result<NodeId, RouterError> {
        self.add_node(parent, pattern, methods, opts, false)
    }

    /// Adds a bridge under `parent`. A bridge matches a prefix, pushes its
    /// own frame onto the match stack and continues into its children.
    pub fn add_bridge(
        &mut self,
        parent: NodeId,
        pattern: &str,
        methods: &[Method],
        opts: &PatternOptions,
    ) -> Result<NodeId, RouterError> {
        self.add_node(parent, pattern, methods, opts, true)
    }

    pub fn set_target(&mut self, id: NodeId, data: T) -> Option<T> {
        self.targets[id.0].replace(data)
    }

    pub fn try_insert(
        &mut self,
        parent: NodeId,
        methods: &[Method],
        pattern: &str,
        data: T,
    ) -> Result<NodeId, RouterError> {
        let id = self.add_route(parent, pattern, methods, &PatternOptions::new())?;
        self.targets[id.0] = Some(data);
        Ok(id)
    }

    /// Like [`try_insert`](Self::try_insert), but panics on an invalid pattern.
    pub fn insert(&mut self, parent: NodeId, methods: &[Method], pattern: &str, data: T) -> NodeId {
        match self.try_insert(parent, methods, pattern, data) {
            Ok(id) => id,
            Err(e) => panic!("{}", e),
        }
    }

    /// Adds a bridge without target, panicking on an invalid pattern.
    pub fn insert_bridge(&mut self, parent: NodeId, prefix: &str) -> NodeId {
        match self.add_bridge(parent, prefix, &[], &PatternOptions::new()) {
            Ok(id) => id,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn nest(
        &mut self,
        parent: NodeId,
        prefix: &str,
        f: impl FnOnce(&mut Router<T>, NodeId),
    ) -> NodeId {
        let bridge = self.insert_bridge(parent, prefix);
        f(self, bridge);
        bridge
    }

    pub fn try_nest(
        &mut self,
        parent: NodeId,
        prefix: &str,
        f: impl FnOnce(&mut Router<T>, NodeId) -> Result<(), RouterError>,
    ) -> Result<NodeId, RouterError> {
        let bridge = self.add_bridge(parent, prefix, &[], &PatternOptions::new())?;
        f(self, bridge)?;
        Ok(bridge)
    }

    /// Assigns a unique name to a route.
    pub fn name(&mut self, id: NodeId, name: &str) -> Result<(), RouterError> {
        match self.names.get(name) {
            Some(&other) if other == id => return Ok(()),
            Some(_) => return Err(RouterError::DuplicateRouteName(name.to_owned())),
            None => {}
        }

        let route = &mut self.routes[id.0];
        if let Some(old) = route.name.take() {
            self.names.remove(&old);
        }
        route.name = Some(name.into());
        self.names.insert(name.into(), id);
        self.cache.clear();

        debug!(route = id.0, name, "named route");
        Ok(())
    }

    /// Attaches a registered condition with its argument.
    pub fn requires(&mut self, id: NodeId, condition: &str, arg: &str) -> Result<(), RouterError> {
        let predicate = match self.conditions.get(condition) {
            Some(p) => Arc::clone(p),
            None => return Err(RouterError::UnknownCondition(condition.to_owned())),
        };
        self.routes[id.0]
            .conditions
            .push((condition.into(), arg.into(), predicate));
        Ok(())
    }

    /// Registers a placeholder type. Patterns compiled earlier keep the old
    /// definition.
    pub fn add_type(&mut self, name: &str, def: impl Into<TypeDef>) -> &mut Self {
        if self.types.insert(name, def).is_some() {
            warn!(name, "placeholder type redefined");
        }
        self
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn add_condition<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: Fn(&Route, &super::RequestInfo<'_>, &super::Captures<'_>, &str) -> bool
            + Send
            + Sync
            + 'static,
    {
        if self.conditions.insert(name.into(), Arc::new(f)).is_some() {
            warn!(name, "condition redefined");
        }
        self
    }

    pub fn add_shortcut<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: Fn(&mut Router<T>, NodeId, &str) -> Result<NodeId, RouterError> + Send + Sync + 'static,
    {
        let f: Arc<Shortcut<T>> = Arc::new(f);
        if self.shortcuts.insert(name.into(), f).is_some() {
            warn!(name, "shortcut redefined");
        }
        self
    }

    /// Invokes a registered shortcut on `parent`.
    pub fn shortcut(&mut self, parent: NodeId, name: &str, arg: &str) -> Result<NodeId, RouterError> {
        let f = match self.shortcuts.get(name) {
            Some(f) => Arc::clone(f),
            None => return Err(RouterError::UnknownShortcut(name.to_owned())),
        };
        f(self, parent, arg)
    }

    fn add_node(
        &mut self,
        parent: NodeId,
        template: &str,
        methods: &[Method],
        opts: &PatternOptions,
        partial: bool,
    ) -> Result<NodeId, RouterError> {
        let pattern = Pattern::with_options(template, opts, &self.types, self.config.detect_format)
            .map_err(|source| RouterError::Compile {
                pattern: template.to_owned(),
                source,
            })?;

        let id = NodeId(self.routes.len());
        let default_name = default_name(pattern.raw());

        debug!(
            route = id.0,
            parent = parent.0,
            pattern = pattern.raw(),
            ?methods,
            partial,
            "added route"
        );

        self.routes.push(Route {
            id,
            parent: Some(parent),
            children: Vec::new(),
            pattern,
            methods: methods.to_vec(),
            name: None,
            default_name,
            conditions: Vec::new(),
            partial,
        });
        self.targets.push(None);
        self.routes[parent.0].children.push(id);
        self.cache.clear();

        Ok(id)
    }
}

macro_rules! define_method {
    ($name:ident, $method:ident) => {
        pub fn $name(&mut self, parent: NodeId, pattern: &str, data: T) -> NodeId {
            self.insert(parent, &[Method::$method], pattern, data)
        }
    };
}

impl<T> Router<T> {
    define_method!(get, GET);
    define_method!(post, POST);
    define_method!(put, PUT);
    define_method!(delete, DELETE);
    define_method!(patch, PATCH);
    define_method!(options, OPTIONS);

    pub fn any(&mut self, parent: NodeId, pattern: &str, data: T) -> NodeId {
        self.insert(parent, &[], pattern, data)
    }
}
