use nuclear_routes::hyper_service::{Action, Params};
use nuclear_routes::{Method, Router};

use std::convert::Infallible as Never;

use hyper::service::make_service_fn;
use hyper::{Body, Request, Response, StatusCode};
use tracing_subscriber::EnvFilter;

async fn not_found(req: Request<Body>, _: Params) -> Result<Response<Body>, Never> {
    tracing::info!(method = %req.method(), path = req.uri().path(), "not found");
    let mut res = Response::new(Body::from("404 Not Found"));
    *res.status_mut() = StatusCode::NOT_FOUND;
    Ok(res)
}

async fn hello(_: Request<Body>, params: Params) -> Result<Response<Body>, Never> {
    let name = params.get("name").unwrap_or("world");
    Ok(Response::new(Body::from(format!("hello, {}!", name))))
}

async fn file(_: Request<Body>, params: Params) -> Result<Response<Body>, Never> {
    let path = params.get("filepath").unwrap_or_default();
    let format = params.format().unwrap_or("none");
    Ok(Response::new(Body::from(format!(
        "access file: {} (format: {})",
        path, format
    ))))
}

fn require_token(req: &Request<Body>, _: &Params) -> Option<Response<Body>> {
    if req.headers().contains_key("x-token") {
        return None;
    }
    let mut res = Response::new(Body::from("401 Unauthorized"));
    *res.status_mut() = StatusCode::UNAUTHORIZED;
    Some(res)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut router: Router<Action> = Router::new();
    let root = router.root();
    let hello_id = router.handle(root, &[Method::GET], "/hello/:name", hello);
    router.name(hello_id, "hello").unwrap();

    let api = router.guard(root, "/api/v1", require_token);
    router.handle(api, &[Method::GET], "/file/*filepath", file);

    println!(
        "reverse: {}",
        router.path_for("hello", &[("name", "world")]).unwrap()
    );

    let router = router.with_default(not_found);

    let make = make_service_fn(|_| {
        let new_router = router.clone();
        async move { Ok::<_, Never>(new_router) }
    });

    let addr = "127.0.0.1:3000";

    let server = hyper::Server::bind(&addr.parse().unwrap()).serve(make);

    println!("Server is listening on: http://{}", addr);
    println!("hello: http://{}/hello/world", addr);
    println!("api: http://{}/api/v1/file/path/to/public/file.txt", addr);
    println!("404: http://{}/other/path", addr);
    println!();

    server.await.unwrap();
}
