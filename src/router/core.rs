use super::captures::Captures;
use super::error::MatchError;
use super::matched::{Frame, Match};
use super::request::RequestInfo;
use super::{NodeId, Route, Router};
use crate::pattern::FORMAT;

use http::Method;
use smallvec::SmallVec;
use tracing::{debug, trace};

struct Walk<'a> {
    captures: Captures<'a>,
    stack: SmallVec<[Frame; 4]>,
    allowed: SmallVec<[Method; 4]>,
    endpoint: Option<NodeId>,
}

impl<T> Router<T> {
    /// Finds the first endpoint, in declaration order, whose path, methods
    /// and conditions accept `req`.
    pub fn find<'a>(&'a self, req: RequestInfo<'a>) -> Result<Match<'a, T>, MatchError> {
        self.find_in(req.path, req.format, &req)
    }

    /// Shorthand for [`find`](Self::find) with a bare method and path.
    pub fn find_path<'a>(&'a self, method: &Method, path: &'a str) -> Result<Match<'a, T>, MatchError> {
        self.find_in(path, None, &RequestInfo::new(method, path))
    }

    fn find_in<'a>(
        &'a self,
        path: &'a str,
        format: Option<&'a str>,
        req: &RequestInfo<'_>,
    ) -> Result<Match<'a, T>, MatchError> {
        let mut walk = Walk {
            captures: Captures::new(),
            stack: SmallVec::new(),
            allowed: SmallVec::new(),
            endpoint: None,
        };

        if self.visit(NodeId::ROOT, path, req, &mut walk) {
            if let Some(endpoint) = walk.endpoint {
                let format = walk.captures.get(FORMAT).or(format);
                debug!(method = %req.method, path, endpoint = endpoint.0, "route matched");
                return Ok(Match {
                    router: self,
                    captures: walk.captures,
                    stack: walk.stack,
                    position: 0,
                    endpoint,
                    format,
                });
            }
        }

        if walk.allowed.is_empty() {
            debug!(method = %req.method, path, "no route");
            return Err(MatchError::NoMatch);
        }

        let mut allowed: Vec<Method> = Vec::with_capacity(walk.allowed.len());
        for m in walk.allowed {
            if !allowed.contains(&m) {
                allowed.push(m);
            }
        }
        debug!(method = %req.method, path, ?allowed, "method not allowed");
        Err(MatchError::MethodNotAllowed { allowed })
    }

    fn visit<'a>(
        &'a self,
        id: NodeId,
        path: &'a str,
        req: &RequestInfo<'_>,
        walk: &mut Walk<'a>,
    ) -> bool {
        let route = &self.routes[id.0];
        let endpoint = route.is_endpoint();
        let mark = walk.captures.buf.len();
        let depth = walk.stack.len();

        let rest = if endpoint {
            if !route.pattern.match_full(path, &mut walk.captures.buf) {
                return false;
            }
            ""
        } else {
            match route.pattern.match_prefix(path, &mut walk.captures.buf) {
                Some(rest) => rest,
                None => return false,
            }
        };

        for (name, arg, condition) in &route.conditions {
            if !condition(route, req, &walk.captures, &**arg) {
                trace!(route = id.0, condition = &**name, "condition rejected");
                walk.captures.buf.truncate(mark);
                return false;
            }
        }

        if !self.accepts(route, req.method) {
            trace!(route = id.0, method = %req.method, "method rejected");
            if endpoint {
                walk.allowed.extend(route.methods.iter().cloned());
            }
            walk.captures.buf.truncate(mark);
            return false;
        }

        if endpoint || route.partial {
            let start = walk.stack.last().map_or(0, |f| f.end);
            walk.stack.push(Frame {
                node: id,
                start,
                end: walk.captures.buf.len(),
            });
        }

        if endpoint {
            walk.endpoint = Some(id);
            return true;
        }

        for &child in &route.children {
            if self.visit(child, rest, req, walk) {
                return true;
            }
        }

        walk.stack.truncate(depth);
        walk.captures.buf.truncate(mark);
        false
    }

    fn accepts(&self, route: &Route, method: &Method) -> bool {
        route.methods.is_empty()
            || route.methods.contains(method)
            || (self.config.head_as_get
                && *method == Method::HEAD
                && route.methods.contains(&Method::GET))
    }
}
