//! Source provenance.
//!
//! A [`Position`] records where a type or member came from. It is purely
//! informational: nothing in hierarchy resolution ever reads it.

use std::fmt;

use crate::{Name, StringLookup};

/// Byte range within a source or class file.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from file start
/// - end: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span for synthetic declarations.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if an offset is within this span.
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Merge two spans to create one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Opaque provenance handle: origin url plus location inside it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Interned origin url, e.g. `file:/src/Leaf.java` or
    /// `jar:file:/lib/rt.jar!/java/lang/Object.class`.
    pub url: Name,
    pub span: Span,
    /// 1-based first line, 0 when unknown.
    pub line: u32,
    /// 1-based column, 0 when unknown.
    pub column: u32,
}

impl Position {
    #[inline]
    pub const fn new(url: Name, span: Span, line: u32, column: u32) -> Self {
        Position {
            url,
            span,
            line,
            column,
        }
    }

    /// A position that only knows its origin.
    #[inline]
    pub const fn whole_file(url: Name) -> Self {
        Position::new(url, Span::DUMMY, 0, 0)
    }

    /// The full origin url.
    pub fn source_url<'a, L: StringLookup + ?Sized>(&self, lookup: &'a L) -> &'a str {
        lookup.lookup(self.url)
    }

    /// The file part of the origin url: everything after the outer
    /// `scheme:` and any `//authority`, up to the `#fragment`. A `?query`
    /// is kept, and only the outer scheme is removed, so
    /// `jar:file:/rt.jar!/A.class` yields `file:/rt.jar!/A.class`. A url
    /// without a scheme is returned unchanged.
    pub fn source_file<'a, L: StringLookup + ?Sized>(&self, lookup: &'a L) -> &'a str {
        let url = lookup.lookup(self.url);
        let url = url.split_once('#').map_or(url, |(head, _)| head);
        let Some(rest) = strip_scheme(url) else {
            return url;
        };
        match rest.strip_prefix("//") {
            Some(authority) => authority
                .find(['/', '?'])
                .map_or("", |end| &authority[end..]),
            None => rest,
        }
    }
}

/// `url` after its leading `scheme:`, if it has one.
fn strip_scheme(url: &str) -> Option<&str> {
    let (scheme, rest) = url.split_once(':')?;
    let mut bytes = scheme.bytes();
    let valid = bytes.next().is_some_and(|b| b.is_ascii_alphabetic())
        && bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'));
    valid.then_some(rest)
}
