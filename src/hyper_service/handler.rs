use super::params::Params;
use super::{BoxError, BoxFuture, Future, Request, Response, StdError};

/// Serves a matched endpoint with the request and the captures of the whole
/// match stack.
pub trait Handler {
    fn call(&self, req: Request, params: Params) -> BoxFuture<'static, Result<Response, BoxError>>;
}

pub type BoxHandler = Box<dyn Handler + Send + Sync>;

impl Handler for BoxHandler {
    fn call(&self, req: Request, params: Params) -> BoxFuture<'static, Result<Response, BoxError>> {
        Handler::call(&**self, req, params)
    }
}

/// Any `async fn(Request, Params) -> Result<Response, E>` is a handler.
impl<F, E, Fut> Handler for F
where
    F: Fn(Request, Params) -> Fut,
    E: StdError + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, E>> + Send + 'static,
{
    fn call(&self, req: Request, params: Params) -> BoxFuture<'static, Result<Response, BoxError>> {
        let fut = (self)(req, params);
        Box::pin(async move { fut.await.map_err(|e| Box::new(e) as BoxError) })
    }
}

/// Runs before the routes nested under a bridge. Returning a response stops
/// the dispatch and sends it instead.
pub trait Guard {
    fn check(&self, req: &Request, params: &Params) -> Option<Response>;
}

pub type BoxGuard = Box<dyn Guard + Send + Sync>;

impl<F> Guard for F
where
    F: Fn(&Request, &Params) -> Option<Response>,
{
    fn check(&self, req: &Request, params: &Params) -> Option<Response> {
        (self)(req, params)
    }
}

/// Dispatch target of a route.
pub enum Action<H = BoxHandler> {
    Bridge(BoxGuard),
    Handle(H),
}

impl Action {
    pub fn handler(h: impl Handler + Send + Sync + 'static) -> Self {
        Action::Handle(Box::new(h))
    }
}

impl<H> Action<H> {
    pub fn bridge(g: impl Guard + Send + Sync + 'static) -> Self {
        Action::Bridge(Box::new(g))
    }
}
