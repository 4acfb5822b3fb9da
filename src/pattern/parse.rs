use super::Kind;
use crate::router::CompileError;

const SLASH: char = '/';
const COLON: char = ':';
const HASH: char = '#';
const STAR: char = '*';
const OPEN: char = '{';
const CLOSE: char = '}';
const PIPE: char = '|';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RawToken<'t> {
    Slash,
    Literal(&'t str),
    Placeholder {
        name: &'t str,
        kind: Kind,
        ty: Option<&'t str>,
    },
}

/// Adds the leading slash and strips trailing ones; the root becomes `""`.
pub(super) fn normalize(template: &str) -> String {
    let trimmed = template.trim_end_matches(SLASH);
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with(SLASH) {
        trimmed.to_owned()
    } else {
        format!("/{}", trimmed)
    }
}

pub(super) fn tokenize(template: &str) -> Result<Vec<RawToken<'_>>, CompileError> {
    let mut tokens = Vec::new();
    let mut rest = template;

    while let Some(c) = rest.chars().next() {
        match c {
            SLASH => {
                tokens.push(RawToken::Slash);
                rest = &rest[1..];
            }
            COLON | HASH | STAR => {
                let kind = match c {
                    COLON => Kind::Standard,
                    HASH => Kind::Relaxed,
                    _ => Kind::Wildcard,
                };
                let (token, tail) = placeholder(&rest[1..], kind)?;
                tokens.push(token);
                rest = tail;
            }
            OPEN => {
                let (token, tail) = placeholder(rest, Kind::Standard)?;
                tokens.push(token);
                rest = tail;
            }
            _ => {
                let end = rest.find(is_marker).unwrap_or_else(|| rest.len());
                tokens.push(RawToken::Literal(&rest[..end]));
                rest = &rest[end..];
            }
        }
    }

    Ok(tokens)
}

fn placeholder(s: &str, kind: Kind) -> Result<(RawToken<'_>, &str), CompileError> {
    if let Some(inner) = s.strip_prefix(OPEN) {
        let end = inner.find(CLOSE).ok_or(CompileError::UnclosedBrace)?;
        let body = &inner[..end];
        let (name, ty) = match body.find(PIPE) {
            Some(i) => (&body[..i], Some(&body[i + 1..])),
            None => (body, None),
        };
        check_name(name)?;
        if let Some(ty) = ty {
            check_name(ty)?;
        }
        return Ok((RawToken::Placeholder { name, kind, ty }, &inner[end + 1..]));
    }

    let end = word_end(s);
    let name = &s[..end];
    check_name(name)?;

    let mut rest = &s[end..];
    let mut ty = None;
    if let Some(tail) = rest.strip_prefix(PIPE) {
        let end = word_end(tail);
        check_name(&tail[..end])?;
        ty = Some(&tail[..end]);
        rest = &tail[end..];
    }

    Ok((RawToken::Placeholder { name, kind, ty }, rest))
}

fn check_name(name: &str) -> Result<(), CompileError> {
    if name.is_empty() {
        return Err(CompileError::EmptyName);
    }
    if !name.chars().all(is_word) {
        return Err(CompileError::InvalidName(name.to_owned()));
    }
    Ok(())
}

#[inline]
fn word_end(s: &str) -> usize {
    s.find(|c: char| !is_word(c)).unwrap_or_else(|| s.len())
}

#[inline]
fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[inline]
fn is_marker(c: char) -> bool {
    matches!(c, SLASH | COLON | HASH | STAR | OPEN)
}
