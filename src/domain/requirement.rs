use std::{fmt, ops::Range};

/// A half-open byte range `[start, end)` into a resource's content.
///
/// Spans mark exactly the text of a dependency declaration, so replacing
/// the range removes the declaration cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Creates a span covering `[start, end)`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The span as a standard half-open [`Range`] for slicing strings.
    #[must_use]
    pub const fn range(self) -> Range<usize> {
        self.start..self.end
    }

    /// The number of bytes covered by the span.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start >= self.end
    }
}

/// The declaration syntax a requirement was written in.
///
/// The two syntaxes are carried through for reporting but do not alter how
/// a requirement is resolved or merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind {
    /// Angle-bracket reference: `//= require <name>`.
    Global,
    /// Quoted reference: `//= require "name"` or `@import url("name")`.
    Local,
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// A dependency declaration detected inside a resource's content.
///
/// A requirement asks for another resource's content to be spliced in
/// place of the declaration text. It refers to its target by name; the
/// target is looked up by base name at merge time, never owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    name: String,
    kind: RequirementKind,
    span: Span,
}

/// Error returned when a requirement is constructed with invalid parts.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidRequirementError {
    /// The requirement name was empty.
    #[error("requirement name must not be empty")]
    EmptyName,
    /// The span was empty or inverted.
    #[error("requirement span [{start}, {end}) must cover at least one byte")]
    EmptySpan {
        /// Start offset of the rejected span.
        start: usize,
        /// End offset of the rejected span.
        end: usize,
    },
}

impl Requirement {
    /// Creates a requirement, validating its parts.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is empty or `span` covers no bytes.
    pub fn new(
        name: impl Into<String>,
        kind: RequirementKind,
        span: Span,
    ) -> Result<Self, InvalidRequirementError> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidRequirementError::EmptyName);
        }
        if span.is_empty() {
            return Err(InvalidRequirementError::EmptySpan {
                start: span.start,
                end: span.end,
            });
        }
        Ok(Self { name, kind, span })
    }

    /// Constructs a requirement from a scanner match.
    ///
    /// The scan patterns guarantee a non-empty name and a non-empty span.
    pub(crate) fn from_scan(name: String, kind: RequirementKind, span: Span) -> Self {
        debug_assert!(!name.is_empty());
        debug_assert!(!span.is_empty());
        Self { name, kind, span }
    }

    /// The name of the resource this requirement refers to.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declaration syntax this requirement was written in.
    #[must_use]
    pub const fn kind(&self) -> RequirementKind {
        self.kind
    }

    /// The byte range of the declaration text in the owning resource.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_requirement_exposes_its_parts() {
        let requirement =
            Requirement::new("jquery", RequirementKind::Global, Span::new(0, 20)).unwrap();

        assert_eq!(requirement.name(), "jquery");
        assert_eq!(requirement.kind(), RequirementKind::Global);
        assert_eq!(requirement.span(), Span::new(0, 20));
    }

    #[test]
    fn empty_name_is_rejected() {
        let result = Requirement::new("", RequirementKind::Local, Span::new(0, 5));
        assert_eq!(result.unwrap_err(), InvalidRequirementError::EmptyName);
    }

    #[test]
    fn empty_span_is_rejected() {
        let result = Requirement::new("openlayers", RequirementKind::Local, Span::new(7, 7));
        assert_eq!(
            result.unwrap_err(),
            InvalidRequirementError::EmptySpan { start: 7, end: 7 }
        );
    }

    #[test]
    fn inverted_span_is_rejected() {
        let result = Requirement::new("openlayers", RequirementKind::Local, Span::new(9, 3));
        assert!(result.is_err());
    }

    #[test]
    fn span_converts_to_range() {
        let span = Span::new(22, 50);
        assert_eq!(span.range(), 22..50);
        assert_eq!(span.len(), 28);
        assert!(!span.is_empty());
    }

    #[test]
    fn display_includes_name_and_kind() {
        let requirement =
            Requirement::new("something.css", RequirementKind::Local, Span::new(22, 50)).unwrap();
        assert_eq!(requirement.to_string(), "something.css (local)");
    }
}
