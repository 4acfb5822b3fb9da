use super::parse::{self, RawToken};
use super::{segment_optional, segments, Format, Kind, Pattern, PatternOptions, Placeholder, Token};
use super::{TypeDef, TypeRegistry, FORMAT};
use crate::router::CompileError;

use std::fmt::Write as _;

use regex::Regex;
use smallvec::SmallVec;

pub(super) fn build(
    template: &str,
    opts: &PatternOptions,
    types: &TypeRegistry,
    detect: bool,
) -> Result<Pattern, CompileError> {
    let raw = parse::normalize(template);
    let raw_tokens = parse::tokenize(&raw)?;

    check_tokens(&raw_tokens, opts)?;

    let mut tokens = Vec::with_capacity(raw_tokens.len());
    for token in raw_tokens {
        tokens.push(match token {
            RawToken::Slash => Token::Slash,
            RawToken::Literal(text) => Token::Literal(text.into()),
            RawToken::Placeholder { name, kind, ty } => {
                Token::Placeholder(placeholder(name, kind, ty, opts, types)?)
            }
        });
    }
    check_boundaries(&tokens)?;
    mark_optional(&mut tokens, opts);

    let owns_format = tokens
        .iter()
        .any(|t| matches!(t, Token::Placeholder(p) if &*p.name == FORMAT));

    let format = match opts.format {
        _ if owns_format || tokens.is_empty() => Format::Disabled,
        Some(Format::OneOf(ref list)) if list.is_empty() => Format::Disabled,
        Some(ref f) => f.clone(),
        None if detect => Format::Detect,
        None => Format::Disabled,
    };

    let (body, can_be_empty) = body(&tokens);
    let suffix = format_suffix(&format, opts.default_of(FORMAT).is_some());

    let full = if can_be_empty {
        format!("^(?:{}{}|/)$", body, suffix)
    } else {
        format!("^{}{}$", body, suffix)
    };
    tracing::trace!(pattern = %raw, regex = %full, "compiled pattern");

    Ok(Pattern {
        full: Regex::new(&full)?,
        prefix: Regex::new(&format!("^{}", body))?,
        raw: raw.into(),
        tokens,
        constraints: box_pairs(&opts.constraints),
        defaults: box_pairs(&opts.defaults),
        format,
    })
}

fn check_tokens(tokens: &[RawToken<'_>], opts: &PatternOptions) -> Result<(), CompileError> {
    let mut seen: SmallVec<[&str; 8]> = SmallVec::new();
    let mut after_optional = false;
    // whether the previous token is a placeholder, and if so, whether it is restricted
    let mut prev: Option<bool> = None;

    for (i, token) in tokens.iter().enumerate() {
        let (name, kind, ty) = match *token {
            RawToken::Placeholder { name, kind, ty } => (name, kind, ty),
            _ => {
                prev = None;
                continue;
            }
        };

        if seen.contains(&name) {
            return Err(CompileError::DuplicatePlaceholder(name.to_owned()));
        }
        if kind == Kind::Wildcard && i + 1 != tokens.len() {
            return Err(CompileError::WildcardNotLast(name.to_owned()));
        }

        let restricted = ty.is_some() || opts.constraint_of(name).is_some();
        if let Some(prev_restricted) = prev {
            if !(prev_restricted && restricted) {
                return Err(CompileError::AmbiguousBoundary(name.to_owned()));
            }
        }

        let has_default = opts.default_of(name).is_some();
        if after_optional && !has_default {
            return Err(CompileError::RequiredAfterOptional(name.to_owned()));
        }

        after_optional |= has_default;
        prev = Some(restricted);
        seen.push(name);
    }

    Ok(())
}

fn placeholder(
    name: &str,
    kind: Kind,
    ty: Option<&str>,
    opts: &PatternOptions,
    types: &TypeRegistry,
) -> Result<Placeholder, CompileError> {
    let typed = match ty {
        Some(ty) => match types.get(ty) {
            Some(def) => Some(def.fragment()),
            None => return Err(CompileError::UnknownType(ty.to_owned())),
        },
        None => None,
    };

    let fragment = match opts.constraint_of(name) {
        Some(re) => format!("(?:{})", re),
        None => match typed {
            Some(re) => format!("(?:{})", re),
            None => kind.fragment().to_owned(),
        },
    };
    let check = Regex::new(&format!("^{}$", fragment))?;

    Ok(Placeholder {
        name: name.into(),
        kind,
        fragment: fragment.into(),
        check,
        optional: false,
    })
}

/// Adjacent placeholders need distinguishable values: their fragments must
/// differ and no single character may satisfy both.
fn check_boundaries(tokens: &[Token]) -> Result<(), CompileError> {
    let mut buf = [0u8; 4];
    for pair in tokens.windows(2) {
        if let [Token::Placeholder(a), Token::Placeholder(b)] = pair {
            let overlap = a.fragment == b.fragment
                || (' '..='~').any(|c| {
                    let c: &str = c.encode_utf8(&mut buf);
                    a.check.is_match(c) && b.check.is_match(c)
                });
            if overlap {
                return Err(CompileError::AmbiguousBoundary(b.name.to_string()));
            }
        }
    }
    Ok(())
}

/// A placeholder is optional when it has a default, its segment has no
/// literal text, and nothing but optional segments follow it.
fn mark_optional(tokens: &mut [Token], opts: &PatternOptions) {
    let starts: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|&(i, t)| i == 0 || matches!(t, Token::Slash))
        .map(|(i, _)| i)
        .collect();

    let mut tail = true;
    let mut end = tokens.len();
    for &start in starts.iter().rev() {
        let segment = &mut tokens[start..end];
        let literal = segment.iter().any(|t| matches!(t, Token::Literal(_)));
        for token in segment.iter_mut().rev() {
            if let Token::Placeholder(p) = token {
                p.optional = tail && !literal && opts.default_of(&p.name).is_some();
                tail = p.optional;
            }
        }
        tail &= !literal;
        end = start;
    }
}

/// Builds the unanchored body regex, nesting optional segments right to left.
fn body(tokens: &[Token]) -> (String, bool) {
    let segments = segments(tokens);
    let mut regex = String::new();

    for segment in segments.iter().rev() {
        let mut part = String::new();
        for token in segment.iter() {
            match token {
                Token::Slash => part.push('/'),
                Token::Literal(text) => part.push_str(&regex::escape(text)),
                Token::Placeholder(p) => {
                    let _ = write!(part, "(?P<{}>{})", p.name, p.fragment);
                }
            }
        }
        regex = if segment_optional(segment) {
            format!("(?:{}{})?", part, regex)
        } else {
            part + &regex
        };
    }

    let can_be_empty = segments.first().map_or(true, |s| segment_optional(s));
    (regex, can_be_empty)
}

fn format_suffix(format: &Format, has_default: bool) -> String {
    match format {
        Format::Disabled => String::new(),
        Format::Detect => format!(r"(?:\.(?P<{}>[^/.]+))?", FORMAT),
        Format::OneOf(list) => {
            let alts = TypeDef::OneOf(list.clone()).fragment();
            if has_default {
                format!(r"(?:\.(?P<{}>{}))?", FORMAT, alts)
            } else {
                format!(r"\.(?P<{}>{})", FORMAT, alts)
            }
        }
    }
}

fn box_pairs(pairs: &[(String, String)]) -> Vec<(Box<str>, Box<str>)> {
    pairs
        .iter()
        .map(|(k, v)| (k.as_str().into(), v.as_str().into()))
        .collect()
}
