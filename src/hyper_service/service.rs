use super::handler::{Action, BoxHandler, Guard, Handler};
use super::params::Params;
use super::{BoxError, BoxFuture, Request, Response};
use crate::router::{MatchError, NodeId, RequestInfo, Router};

use std::sync::Arc;
use std::task::{Context, Poll};

use http::Method;
use hyper::header::{HeaderValue, ALLOW};
use hyper::service::Service;
use hyper::{Body, StatusCode};
use tracing::debug;

pub struct RouterService<H = BoxHandler> {
    inner: Arc<Inner<H>>,
}

struct Inner<H> {
    router: Router<Action<H>>,
    default: H,
}

enum Outcome {
    Found(Vec<(NodeId, Params)>),
    NotFound,
    NotAllowed(Vec<Method>),
}

impl<H> Clone for RouterService<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H> Service<Request> for RouterService<H>
where
    H: Handler + Send + Sync,
{
    type Response = Response;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Response, BoxError>>;
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let inner = &*self.inner;

        let outcome = {
            let info =
                RequestInfo::new(req.method(), req.uri().path()).with_headers(req.headers());
            match inner.router.find(info) {
                Ok(mut m) => {
                    let mut frames = Vec::with_capacity(m.stack().len());
                    while let Some(frame) = m.advance() {
                        let params = Params::new(m.captures_until(&frame), m.format());
                        frames.push((frame.node(), params));
                    }
                    Outcome::Found(frames)
                }
                Err(MatchError::NoMatch) => Outcome::NotFound,
                Err(MatchError::MethodNotAllowed { allowed }) => Outcome::NotAllowed(allowed),
            }
        };

        match outcome {
            Outcome::Found(frames) => {
                for (node, params) in frames {
                    match inner.router.target(node) {
                        Some(Action::Bridge(guard)) => {
                            if let Some(res) = guard.check(&req, &params) {
                                debug!(route = node.index(), "bridge answered");
                                return Box::pin(async move { Ok::<_, BoxError>(res) });
                            }
                        }
                        Some(Action::Handle(h)) => return h.call(req, params),
                        None => {}
                    }
                }
                inner.default.call(req, Params::empty())
            }
            Outcome::NotFound => inner.default.call(req, Params::empty()),
            Outcome::NotAllowed(allowed) => Box::pin(async move { method_not_allowed(&allowed) }),
        }
    }
}

fn method_not_allowed(allowed: &[Method]) -> Result<Response, BoxError> {
    let allow = allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let mut res = Response::new(Body::empty());
    *res.status_mut() = StatusCode::METHOD_NOT_ALLOWED;
    res.headers_mut().insert(ALLOW, HeaderValue::from_str(&allow)?);
    Ok(res)
}

impl<H> RouterService<H> {
    pub fn from_router(router: Router<Action<H>>, default: H) -> Self {
        Self {
            inner: Arc::new(Inner { router, default }),
        }
    }

    pub fn router(&self) -> &Router<Action<H>> {
        &self.inner.router
    }
}

impl RouterService {
    pub fn new(router: Router<Action>, default: impl Handler + Send + Sync + 'static) -> Self {
        Self::from_router(router, Box::new(default))
    }
}

impl Router<Action> {
    /// Adds an endpoint served by `h`.
    pub fn handle(
        &mut self,
        parent: NodeId,
        methods: &[Method],
        pattern: &str,
        h: impl Handler + Send + Sync + 'static,
    ) -> NodeId {
        self.insert(parent, methods, pattern, Action::handler(h))
    }

    /// Adds a bridge whose guard runs before every route nested under it.
    pub fn guard(
        &mut self,
        parent: NodeId,
        prefix: &str,
        g: impl Guard + Send + Sync + 'static,
    ) -> NodeId {
        let bridge = self.insert_bridge(parent, prefix);
        self.set_target(bridge, Action::bridge(g));
        bridge
    }

    pub fn with_default(self, default: impl Handler + Send + Sync + 'static) -> RouterService {
        RouterService::new(self, default)
    }
}
