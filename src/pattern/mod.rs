//! Path templates.
//!
//! A template is a sequence of literal text, `/` separators and placeholders:
//!
//! | Syntax | Matches |
//! |---|---|
//! | `:name`, `{name}` | one or more characters except `/` and `.` |
//! | `#name` | one or more characters except `/` |
//! | `*name` | one or more characters, `/` included (final token only) |
//! | `:name\|num`, `:{name\|num}` | the fragment of the named type |
//!
//! Braces end a placeholder name explicitly, so `:{file}txt` is the
//! placeholder `file` followed by the literal `txt`.

mod compile;
mod parse;
mod render;
mod types;

pub use self::types::{TypeDef, TypeRegistry, NUM};

use crate::router::captures::{Captures, KvBuffer};
use crate::router::CompileError;

use regex::Regex;

/// Name of the capture holding a detected file extension.
pub const FORMAT: &str = "format";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Standard,
    Relaxed,
    Wildcard,
}

impl Kind {
    fn fragment(self) -> &'static str {
        match self {
            Self::Standard => "[^/.]+",
            Self::Relaxed => "[^/]+",
            Self::Wildcard => ".+",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Token {
    Slash,
    Literal(Box<str>),
    Placeholder(Placeholder),
}

#[derive(Debug, Clone)]
pub struct Placeholder {
    name: Box<str>,
    kind: Kind,
    fragment: Box<str>,
    check: Regex,
    optional: bool,
}

impl Placeholder {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The regex fragment this placeholder matches.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Whether the placeholder (and its leading `/`) may be absent from a path.
    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// Trailing extension handling of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub enum Format {
    /// Accept any `.ext` suffix and capture it as `format`.
    Detect,
    Disabled,
    /// Accept only the listed extensions. The suffix is mandatory unless a
    /// `format` default exists.
    OneOf(Vec<String>),
}

/// Per-pattern constraints, defaults and format rule.
#[derive(Debug, Clone, Default)]
pub struct PatternOptions {
    constraints: Vec<(String, String)>,
    defaults: Vec<(String, String)>,
    format: Option<Format>,
}

impl PatternOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts placeholder `name` to the regex fragment `re`.
    pub fn constraint(mut self, name: &str, re: &str) -> Self {
        self.constraints.push((name.to_owned(), re.to_owned()));
        self
    }

    /// Sets a default value. Defaults of placeholders make them optional;
    /// other defaults are reported as captures of the route.
    pub fn with_default(mut self, name: &str, value: &str) -> Self {
        self.defaults.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    fn constraint_of(&self, name: &str) -> Option<&str> {
        find_last(&self.constraints, name)
    }

    fn default_of(&self, name: &str) -> Option<&str> {
        find_last(&self.defaults, name)
    }
}

fn find_last<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .rev()
        .find_map(|(k, v)| if k == name { Some(v.as_str()) } else { None })
}

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: Box<str>,
    tokens: Vec<Token>,
    constraints: Vec<(Box<str>, Box<str>)>,
    defaults: Vec<(Box<str>, Box<str>)>,
    format: Format,
    full: Regex,
    prefix: Regex,
}

impl Pattern {
    /// Compiles `template` with the built-in placeholder types and format
    /// detection enabled.
    pub fn compile(
        template: &str,
        constraints: &[(&str, &str)],
        defaults: &[(&str, &str)],
    ) -> Result<Self, CompileError> {
        let mut opts = PatternOptions::new();
        for &(name, re) in constraints {
            opts = opts.constraint(name, re);
        }
        for &(name, value) in defaults {
            opts = opts.with_default(name, value);
        }
        Self::with_options(template, &opts, &TypeRegistry::default(), true)
    }

    /// Compiles `template`. `detect` is the format rule used when `opts`
    /// does not set one.
    pub fn with_options(
        template: &str,
        opts: &PatternOptions,
        types: &TypeRegistry,
        detect: bool,
    ) -> Result<Self, CompileError> {
        compile::build(template, opts, types, detect)
    }

    /// The normalized template.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> + '_ {
        self.tokens.iter().filter_map(|t| match t {
            Token::Placeholder(p) => Some(p),
            _ => None,
        })
    }

    pub fn has_placeholder(&self, name: &str) -> bool {
        self.placeholders().any(|p| &*p.name == name)
    }

    pub fn constraints(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.constraints.iter().map(|(k, v)| (&**k, &**v))
    }

    pub fn defaults(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.defaults.iter().map(|(k, v)| (&**k, &**v))
    }

    pub fn default_of(&self, name: &str) -> Option<&str> {
        self.defaults
            .iter()
            .rev()
            .find_map(|(k, v)| if &**k == name { Some(&**v) } else { None })
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    /// The anchored regex used for full-path matching.
    pub fn regex(&self) -> &Regex {
        &self.full
    }

    /// Matches the whole of `path`.
    pub fn matches<'a>(&'a self, path: &'a str) -> Option<Captures<'a>> {
        let mut captures = Captures::new();
        if self.match_full(path, &mut captures.buf) {
            Some(captures)
        } else {
            None
        }
    }

    pub(crate) fn match_full<'a>(&'a self, path: &'a str, buf: &mut KvBuffer<'a>) -> bool {
        match self.full.captures(path) {
            Some(caps) => {
                self.collect(&caps, buf);
                true
            }
            None => false,
        }
    }

    /// Matches a prefix of `path` ending on a segment boundary and returns
    /// the remainder. The format suffix is never consumed here.
    pub(crate) fn match_prefix<'a>(
        &'a self,
        path: &'a str,
        buf: &mut KvBuffer<'a>,
    ) -> Option<&'a str> {
        let caps = self.prefix.captures(path)?;
        let end = caps.get(0).map_or(0, |m| m.end());
        let rest = &path[end..];
        if !(rest.is_empty() || rest.starts_with('/')) {
            return None;
        }
        self.collect(&caps, buf);
        Some(rest)
    }

    fn collect<'a>(&'a self, caps: &regex::Captures<'a>, buf: &mut KvBuffer<'a>) {
        for (name, value) in &self.defaults {
            if !self.has_placeholder(name) {
                buf.push((&**name, &**value));
            }
        }
        for p in self.placeholders() {
            match caps.name(&p.name) {
                Some(m) => buf.push((&*p.name, m.as_str())),
                None => {
                    if let Some(value) = self.default_of(&p.name) {
                        buf.push((&*p.name, value));
                    }
                }
            }
        }
        if self.format != Format::Disabled {
            if let Some(m) = caps.name(FORMAT) {
                buf.push((FORMAT, m.as_str()));
            }
        }
    }
}

/// Splits tokens into `/`-led segments.
fn segments(tokens: &[Token]) -> Vec<&[Token]> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate().skip(1) {
        if let Token::Slash = token {
            segments.push(&tokens[start..i]);
            start = i;
        }
    }
    if !tokens.is_empty() {
        segments.push(&tokens[start..]);
    }
    segments
}

/// A segment may be left out when all its placeholders are optional.
fn segment_optional(segment: &[Token]) -> bool {
    let mut any = false;
    for token in segment {
        match token {
            Token::Slash => {}
            Token::Literal(_) => return false,
            Token::Placeholder(p) => {
                if !p.optional {
                    return false;
                }
                any = true;
            }
        }
    }
    any
}
