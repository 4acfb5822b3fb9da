//! Route patterns compiled to regexes and dispatched through an ordered tree.
//!
//! Routes form a tree: groups and bridges match path prefixes, endpoints match
//! the rest. The first endpoint in declaration order whose path, methods and
//! conditions accept a request wins. Routes can be reversed into paths by name.

#![deny(unsafe_code)]

mod config;
mod macros;

pub mod pattern;
pub mod router;

#[cfg(feature = "hyper-service")]
pub mod hyper_service;

pub use crate::config::Config;
pub use crate::pattern::{Format, Pattern, PatternOptions, TypeDef, TypeRegistry};
pub use crate::router::{
    Captures, CompileError, Frame, Match, MatchError, NodeId, RequestInfo, Route, Router,
    RouterError,
};

pub use http::Method;
