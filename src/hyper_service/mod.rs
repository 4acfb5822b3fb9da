//! A hyper [`Service`](hyper::service::Service) that dispatches through a
//! [`Router`](crate::Router).

#![forbid(unsafe_code)]

mod handler;
mod params;
mod service;

pub use self::handler::{Action, BoxGuard, BoxHandler, Guard, Handler};
pub use self::params::Params;
pub use self::service::RouterService;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

type Request = hyper::Request<hyper::Body>;
type Response = hyper::Response<hyper::Body>;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
type BoxError = Box<dyn StdError + Send + Sync>;
