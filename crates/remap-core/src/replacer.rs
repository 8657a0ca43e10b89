//! Replacement producers.

use crate::{Pattern, ReplaceError};
use regex::Captures;
use std::borrow::Cow;
use std::fmt;

/// Everything a replacer can see about one match.
pub struct MatchContext<'l> {
    pub(crate) line_number: u32,
    pub(crate) column: u32,
    pub(crate) line: &'l str,
    pub(crate) matched: &'l str,
    pub(crate) captures: Option<Captures<'l>>,
}

impl<'l> MatchContext<'l> {
    /// The full matched text.
    pub fn matched(&self) -> &'l str {
        self.matched
    }

    /// A capture group by index. Index 0 is the full match.
    ///
    /// Returns `None` for groups that did not participate in the match.
    pub fn group(&self, index: usize) -> Option<&'l str> {
        if index == 0 {
            return Some(self.matched);
        }
        self.captures
            .as_ref()
            .and_then(|c| c.get(index))
            .map(|m| m.as_str())
    }

    /// A capture group by name.
    pub fn named(&self, name: &str) -> Option<&'l str> {
        self.captures
            .as_ref()
            .and_then(|c| c.name(name))
            .map(|m| m.as_str())
    }

    /// All capture groups after the full match, in order.
    pub fn groups(&self) -> Vec<Option<&'l str>> {
        match &self.captures {
            Some(captures) => captures
                .iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// 0-indexed column of the match in the original line, in UTF-16 code units.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// 1-indexed line number.
    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    /// The complete line as it was before any replacement.
    pub fn line(&self) -> &'l str {
        self.line
    }

    /// Builds a replacer failure located at this match.
    pub fn fail(&self, message: impl Into<String>) -> ReplaceError {
        ReplaceError::Replacer {
            message: message.into(),
            line: self.line_number,
            column: self.column,
        }
    }
}

/// A boxed replacer callback.
pub type ReplacerFn<'a> =
    Box<dyn FnMut(&MatchContext<'_>) -> Result<String, ReplaceError> + 'a>;

/// Produces the text substituted for each match.
pub enum Replacer<'a> {
    /// Inserted verbatim.
    Fixed(String),
    /// Expanded with capture groups (`$1`, `${1}`, `${name}`, `$$`).
    Template(Template),
    /// Computed per match.
    Function(ReplacerFn<'a>),
}

impl<'a> Replacer<'a> {
    /// A replacer inserting `text` verbatim.
    pub fn fixed(text: impl Into<String>) -> Self {
        Replacer::Fixed(text.into())
    }

    /// A replacer expanding capture group references in `template`.
    pub fn template(template: &str) -> Self {
        Replacer::Template(Template::parse(template))
    }

    /// A replacer calling `f` for every match.
    pub fn function(
        f: impl FnMut(&MatchContext<'_>) -> Result<String, ReplaceError> + 'a,
    ) -> Self {
        Replacer::Function(Box::new(f))
    }

    /// Produces the replacement for one match.
    pub(crate) fn produce(
        &mut self,
        pattern: &Pattern,
        ctx: &MatchContext<'_>,
    ) -> Result<Cow<'_, str>, ReplaceError> {
        match self {
            Replacer::Fixed(text) => Ok(Cow::Borrowed(text.as_str())),
            Replacer::Template(template) => template.expand(pattern, ctx).map(Cow::Owned),
            Replacer::Function(f) => f(ctx).map(Cow::Owned),
        }
    }
}

impl fmt::Debug for Replacer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacer::Fixed(text) => f.debug_tuple("Fixed").field(text).finish(),
            Replacer::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Replacer::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// A parsed replacement template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pieces: Vec<Piece>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Index(usize),
    Name(String),
}

impl Template {
    /// Parses `template`.
    ///
    /// `$n` takes the longest run of digits, `${...}` is a group index or name and `$$` is a
    /// literal dollar sign. Any other `$` is kept as is.
    pub fn parse(template: &str) -> Self {
        let mut pieces = Vec::new();
        let mut text = String::new();
        let mut rest = template;

        while let Some(pos) = rest.find('$') {
            text.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            if let Some(stripped) = after.strip_prefix('$') {
                text.push('$');
                rest = stripped;
                continue;
            }

            if let Some((reference, remaining)) = parse_reference(after) {
                if !text.is_empty() {
                    pieces.push(Piece::Text(std::mem::take(&mut text)));
                }
                pieces.push(reference);
                rest = remaining;
                continue;
            }

            text.push('$');
            rest = after;
        }

        text.push_str(rest);
        if !text.is_empty() {
            pieces.push(Piece::Text(text));
        }

        Self { pieces }
    }

    /// Expands the template for one match.
    pub(crate) fn expand(
        &self,
        pattern: &Pattern,
        ctx: &MatchContext<'_>,
    ) -> Result<String, ReplaceError> {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Index(index) => {
                    if !pattern.defines_group(*index) {
                        return Err(unknown_group(index.to_string(), ctx));
                    }
                    out.push_str(ctx.group(*index).unwrap_or(""));
                }
                Piece::Name(name) => {
                    if !pattern.defines_name(name) {
                        return Err(unknown_group(name.clone(), ctx));
                    }
                    out.push_str(ctx.named(name).unwrap_or(""));
                }
            }
        }
        Ok(out)
    }
}

/// Parses the group reference following a `$`.
fn parse_reference(after: &str) -> Option<(Piece, &str)> {
    if let Some(braced) = after.strip_prefix('{') {
        let close = braced.find('}')?;
        let reference = &braced[..close];
        if reference.is_empty() {
            return None;
        }
        let piece = match reference.parse::<usize>() {
            Ok(index) => Piece::Index(index),
            Err(_) => Piece::Name(reference.to_string()),
        };
        return Some((piece, &braced[close + 1..]));
    }

    let digits = after.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let index = after[..digits].parse().ok()?;
    Some((Piece::Index(index), &after[digits..]))
}

fn unknown_group(group: String, ctx: &MatchContext<'_>) -> ReplaceError {
    ReplaceError::UnknownGroup {
        group,
        line: ctx.line_number,
        column: ctx.column,
    }
}
