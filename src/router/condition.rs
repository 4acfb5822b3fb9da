//! Named route conditions.
//!
//! A condition is a predicate over the route, the request and the captures
//! collected so far. It receives the argument declared with
//! [`Router::requires`](super::Router::requires).

use super::captures::Captures;
use super::request::RequestInfo;
use super::Route;

use std::sync::Arc;

pub type Condition = dyn Fn(&Route, &RequestInfo<'_>, &Captures<'_>, &str) -> bool + Send + Sync;

pub(super) type SharedCondition = Arc<Condition>;

pub const HOST: &str = "host";
pub const HEADER: &str = "header";

/// Matches the `Host` header, ignoring case and port.
/// `*.example.com` accepts any subdomain of `example.com`.
pub fn host(_: &Route, req: &RequestInfo<'_>, _: &Captures<'_>, arg: &str) -> bool {
    let value = match req.header("host") {
        Some(v) => v,
        None => return false,
    };
    let host = strip_port(value).to_ascii_lowercase();
    let expected = arg.to_ascii_lowercase();

    match expected.strip_prefix("*.") {
        Some(domain) => host
            .strip_suffix(domain)
            .map_or(false, |sub| sub.len() > 1 && sub.ends_with('.')),
        None => host == expected,
    }
}

/// `Name` requires the header to be present, `Name: value` requires an
/// exact value.
pub fn header(_: &Route, req: &RequestInfo<'_>, _: &Captures<'_>, arg: &str) -> bool {
    match arg.find(':') {
        Some(i) => {
            let name = arg[..i].trim();
            let expected = arg[i + 1..].trim();
            req.header(name).map_or(false, |v| v == expected)
        }
        None => req
            .headers
            .map_or(false, |headers| headers.contains_key(arg.trim())),
    }
}

/// `[::1]:8080` and `example.com:8080` lose the port; a bare IPv6 address is
/// left alone.
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.find(':') {
        Some(i) if !host[i + 1..].contains(':') => &host[..i],
        _ => host,
    }
}
