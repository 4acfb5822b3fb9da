use super::error::RouterError;
use super::{NodeId, Router};

use tracing::trace;

impl<T> Router<T> {
    /// Resolves a route by name.
    ///
    /// Explicit names win over names derived from templates; among derived
    /// names the first route in declaration order wins.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        if let Some(id) = self.cache.get(name) {
            return Some(id);
        }

        let id = match self.names.get(name) {
            Some(&id) => id,
            None => self.find_default_name(name)?,
        };

        trace!(name, route = id.0, "cached route lookup");
        self.cache.insert(name, id);
        Some(id)
    }

    /// Renders the path of the named route.
    pub fn path_for(&self, name: &str, values: &[(&str, &str)]) -> Result<String, RouterError> {
        match self.lookup(name) {
            Some(id) => self.path_for_node(id, values),
            None => Err(RouterError::UnknownRoute(name.to_owned())),
        }
    }

    /// Renders the path of a route by joining the patterns from the root down.
    /// Only the route itself appends a format extension.
    pub fn path_for_node(&self, id: NodeId, values: &[(&str, &str)]) -> Result<String, RouterError> {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            let route = &self.routes[node.0];
            parts.push(route.pattern.render(values, node == id)?);
            current = route.parent;
        }

        let path: String = parts.into_iter().rev().collect();
        if path.is_empty() {
            return Ok("/".to_owned());
        }
        Ok(path)
    }

    /// Number of memoized name lookups.
    pub fn cached_names(&self) -> usize {
        self.cache.len()
    }

    fn find_default_name(&self, name: &str) -> Option<NodeId> {
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let route = &self.routes[id.0];
            if route.parent.is_some() && &*route.default_name == name {
                return Some(id);
            }
            stack.extend(route.children.iter().rev().copied());
        }
        None
    }
}
