use super::captures::Captures;
use super::{NodeId, Route, Router};

use std::fmt;

use smallvec::SmallVec;

/// One entry of the match stack: a bridge or the endpoint, with the range of
/// captures collected since the previous entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub(super) node: NodeId,
    pub(super) start: usize,
    pub(super) end: usize,
}

impl Frame {
    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// A successful match: the frame stack, a dispatch cursor and the endpoint.
pub struct Match<'a, T> {
    pub(super) router: &'a Router<T>,
    pub(super) captures: Captures<'a>,
    pub(super) stack: SmallVec<[Frame; 4]>,
    pub(super) position: usize,
    pub(super) endpoint: NodeId,
    pub(super) format: Option<&'a str>,
}

impl<'a, T> Match<'a, T> {
    pub fn endpoint(&self) -> NodeId {
        self.endpoint
    }

    pub fn route(&self) -> &'a Route {
        self.router.route(self.endpoint)
    }

    pub fn target(&self) -> Option<&'a T> {
        self.router.target(self.endpoint)
    }

    /// All captures of the match; later routes override earlier ones.
    pub fn captures(&self) -> &Captures<'a> {
        &self.captures
    }

    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.captures.get(name)
    }

    /// The detected extension, or the request's explicit format.
    pub fn format(&self) -> Option<&'a str> {
        self.format
    }

    pub fn stack(&self) -> &[Frame] {
        &self.stack
    }

    /// Captures contributed by the routes up to `frame` since the previous frame.
    pub fn frame_captures(&self, frame: &Frame) -> &[(&'a str, &'a str)] {
        &self.captures[frame.start..frame.end]
    }

    /// Captures visible to `frame`: its own and those of all outer frames.
    pub fn captures_until(&self, frame: &Frame) -> &[(&'a str, &'a str)] {
        &self.captures[..frame.end]
    }

    pub fn frame_target(&self, frame: &Frame) -> Option<&'a T> {
        self.router.target(frame.node)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the frame under the cursor and moves past it.
    pub fn advance(&mut self) -> Option<Frame> {
        let frame = self.stack.get(self.position).copied()?;
        self.position += 1;
        Some(frame)
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.stack.len()
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

impl<T> fmt::Debug for Match<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("captures", &self.captures)
            .field("stack", &self.stack)
            .field("position", &self.position)
            .field("endpoint", &self.endpoint)
            .field("format", &self.format)
            .finish()
    }
}
