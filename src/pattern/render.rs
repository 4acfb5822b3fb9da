use super::{segment_optional, segments, Format, Pattern, Token, FORMAT};
use crate::router::RouterError;

impl Pattern {
    /// Renders the pattern with `values`, falling back to defaults.
    ///
    /// Trailing optional segments whose value equals the default are left out.
    /// With `with_format`, a `format` value accepted by the format rule is
    /// appended as `.ext`; patterns without format detection ignore it.
    pub fn render(&self, values: &[(&str, &str)], with_format: bool) -> Result<String, RouterError> {
        let segments = segments(&self.tokens);
        let mut parts: Vec<String> = Vec::with_capacity(segments.len());
        let mut omit = true;

        for segment in segments.iter().rev() {
            if omit && segment_optional(segment) && self.is_defaulted(segment, values) {
                continue;
            }
            omit = false;

            let mut part = String::new();
            for token in segment.iter() {
                match token {
                    Token::Slash => part.push('/'),
                    Token::Literal(text) => part.push_str(text),
                    Token::Placeholder(p) => {
                        let value = lookup(values, &p.name)
                            .or_else(|| self.default_of(&p.name))
                            .ok_or_else(|| RouterError::MissingPlaceholder(p.name.to_string()))?;
                        if !p.check.is_match(value) {
                            return Err(RouterError::InvalidPlaceholder {
                                name: p.name.to_string(),
                                value: value.to_owned(),
                            });
                        }
                        part.push_str(value);
                    }
                }
            }
            parts.push(part);
        }

        let mut path: String = parts.into_iter().rev().collect();

        if with_format && !self.has_placeholder(FORMAT) {
            match (lookup(values, FORMAT), &self.format) {
                (_, Format::Disabled) => {}
                (Some(format), rule) => {
                    if !format_allowed(rule, format) {
                        return Err(RouterError::InvalidPlaceholder {
                            name: FORMAT.to_owned(),
                            value: format.to_owned(),
                        });
                    }
                    path.push('.');
                    path.push_str(format);
                }
                (None, Format::OneOf(_)) if self.default_of(FORMAT).is_none() => {
                    return Err(RouterError::MissingPlaceholder(FORMAT.to_owned()));
                }
                (None, _) => {}
            }
        }

        Ok(path)
    }

    fn is_defaulted(&self, segment: &[Token], values: &[(&str, &str)]) -> bool {
        segment.iter().all(|token| match token {
            Token::Placeholder(p) => match lookup(values, &p.name) {
                Some(value) => self.default_of(&p.name) == Some(value),
                None => true,
            },
            _ => true,
        })
    }
}

/// Whether the matcher would accept `format` as the extension.
fn format_allowed(rule: &Format, format: &str) -> bool {
    match rule {
        Format::Detect => !format.is_empty() && !format.contains(|c| c == '/' || c == '.'),
        Format::OneOf(list) => list.iter().any(|f| f == format),
        Format::Disabled => false,
    }
}

fn lookup<'v>(values: &[(&str, &'v str)], name: &str) -> Option<&'v str> {
    values
        .iter()
        .rev()
        .find_map(|&(k, v)| if k == name { Some(v) } else { None })
}
