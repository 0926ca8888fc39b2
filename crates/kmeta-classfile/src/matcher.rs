//! String matchers for class and member names.
//!
//! A matcher decides whether a span `[begin, end)` of a string matches. The
//! span form lets composite matchers check sub-ranges without slicing and
//! reallocating. Spans outside the string, or not on character boundaries,
//! never match.

use regex::Regex;
use thiserror::Error;

/// Error type for matcher construction.
#[derive(Debug, Error)]
pub enum MatcherError {
    /// Invalid regex pattern.
    #[error("invalid regex pattern '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },
}

/// A predicate over string spans.
pub trait StringMatcher {
    /// Returns true if `string[begin..end]` matches.
    fn matches_span(&self, string: &str, begin: usize, end: usize) -> bool;

    /// Returns true if the whole string matches.
    fn matches(&self, string: &str) -> bool {
        self.matches_span(string, 0, string.len())
    }
}

impl<M: StringMatcher + ?Sized> StringMatcher for Box<M> {
    fn matches_span(&self, string: &str, begin: usize, end: usize) -> bool {
        (**self).matches_span(string, begin, end)
    }
}

impl<M: StringMatcher + ?Sized> StringMatcher for &M {
    fn matches_span(&self, string: &str, begin: usize, end: usize) -> bool {
        (**self).matches_span(string, begin, end)
    }
}

/// Matches spans equal to a fixed string.
#[derive(Debug, Clone)]
pub struct FixedStringMatcher {
    expected: String,
}

impl FixedStringMatcher {
    pub fn new(expected: impl Into<String>) -> Self {
        FixedStringMatcher {
            expected: expected.into(),
        }
    }
}

impl StringMatcher for FixedStringMatcher {
    fn matches_span(&self, string: &str, begin: usize, end: usize) -> bool {
        string.get(begin..end) == Some(self.expected.as_str())
    }
}

/// Matches spans that a regular expression matches in full.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// Compile a pattern. The pattern is anchored at both ends of the span.
    pub fn new(pattern: &str) -> Result<Self, MatcherError> {
        let anchored = format!("^(?:{pattern})$");
        let regex = Regex::new(&anchored).map_err(|e| MatcherError::InvalidRegex {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(RegexMatcher { regex })
    }
}

impl StringMatcher for RegexMatcher {
    fn matches_span(&self, string: &str, begin: usize, end: usize) -> bool {
        string
            .get(begin..end)
            .is_some_and(|span| self.regex.is_match(span))
    }
}

/// Matches a span if at least one child matches.
///
/// Children are tried in order and evaluation stops at the first match. With
/// no children nothing matches.
#[derive(Default)]
pub struct OrMatcher {
    matchers: Vec<Box<dyn StringMatcher>>,
}

impl OrMatcher {
    pub fn new(matchers: Vec<Box<dyn StringMatcher>>) -> Self {
        OrMatcher { matchers }
    }

    /// Append a child matcher.
    pub fn or(mut self, matcher: impl StringMatcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }
}

impl StringMatcher for OrMatcher {
    fn matches_span(&self, string: &str, begin: usize, end: usize) -> bool {
        self.matchers
            .iter()
            .any(|m| m.matches_span(string, begin, end))
    }
}

impl std::fmt::Debug for OrMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrMatcher")
            .field("matchers", &self.matchers.len())
            .finish()
    }
}

/// Matches a span if every child matches. With no children everything matches.
#[derive(Default)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn StringMatcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn StringMatcher>>) -> Self {
        AndMatcher { matchers }
    }

    /// Append a child matcher.
    pub fn and(mut self, matcher: impl StringMatcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }
}

impl StringMatcher for AndMatcher {
    fn matches_span(&self, string: &str, begin: usize, end: usize) -> bool {
        self.matchers
            .iter()
            .all(|m| m.matches_span(string, begin, end))
    }
}

impl std::fmt::Debug for AndMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndMatcher")
            .field("matchers", &self.matchers.len())
            .finish()
    }
}

/// Inverts a matcher.
#[derive(Debug, Clone)]
pub struct NotMatcher<M> {
    matcher: M,
}

impl<M: StringMatcher> NotMatcher<M> {
    pub fn new(matcher: M) -> Self {
        NotMatcher { matcher }
    }
}

impl<M: StringMatcher> StringMatcher for NotMatcher<M> {
    fn matches_span(&self, string: &str, begin: usize, end: usize) -> bool {
        !self.matcher.matches_span(string, begin, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Matcher that records how often it was asked.
    struct Counting {
        result: bool,
        calls: Rc<Cell<usize>>,
    }

    impl StringMatcher for Counting {
        fn matches_span(&self, _string: &str, _begin: usize, _end: usize) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.result
        }
    }

    #[test]
    fn test_fixed_matcher_spans() {
        let m = FixedStringMatcher::new("Foo");
        assert!(m.matches("Foo"));
        assert!(!m.matches("Foobar"));
        assert!(m.matches_span("a/Foo/b", 2, 5));
        assert!(!m.matches_span("a/Foo/b", 2, 6));
        // Out of range never matches
        assert!(!m.matches_span("Foo", 0, 10));
        assert!(!m.matches_span("Foo", 2, 1));
    }

    #[test]
    fn test_regex_matcher_is_anchored() {
        let m = RegexMatcher::new(r"com/.*/Test\w*").unwrap();
        assert!(m.matches("com/example/TestCase"));
        assert!(!m.matches("org/com/example/TestCase"));
        assert!(m.matches_span("xcom/a/Testy", 1, 12));
    }

    #[test]
    fn test_regex_matcher_invalid_pattern() {
        let err = RegexMatcher::new("(unclosed").unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_or_matcher() {
        let m = OrMatcher::default()
            .or(FixedStringMatcher::new("a/A"))
            .or(FixedStringMatcher::new("b/B"));
        assert!(m.matches("a/A"));
        assert!(m.matches("b/B"));
        assert!(!m.matches("c/C"));
        assert!(m.matches_span("xxb/B", 2, 5));
    }

    #[test]
    fn test_or_matcher_empty_never_matches() {
        let m = OrMatcher::new(Vec::new());
        assert!(!m.matches(""));
        assert!(!m.matches("anything"));
    }

    #[test]
    fn test_or_matcher_stops_at_first_match() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let m = OrMatcher::new(vec![
            Box::new(Counting {
                result: true,
                calls: Rc::clone(&first),
            }),
            Box::new(Counting {
                result: true,
                calls: Rc::clone(&second),
            }),
        ]);

        assert!(m.matches("x"));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
    }

    #[test]
    fn test_and_and_not_matchers() {
        let m = AndMatcher::default()
            .and(RegexMatcher::new("a/.*").unwrap())
            .and(NotMatcher::new(FixedStringMatcher::new("a/Internal")));
        assert!(m.matches("a/Public"));
        assert!(!m.matches("a/Internal"));
        assert!(!m.matches("b/Public"));
        assert!(AndMatcher::default().matches("anything"));
    }
}
