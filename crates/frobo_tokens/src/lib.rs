#![doc = include_str!("../README.md")]

use crate::location::{Located, Location};
use std::fmt::{Debug, Display, Formatter};

pub mod location;
pub mod snippet;
pub mod token;

/// An error with a location and an optional suggestion on how to fix it
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub struct LocatedError<K> {
    kind: K,
    location: Location,
    suggestion: Option<String>,
}

impl<K> LocatedError<K> {
    /// Creates a new located error
    pub fn new(kind: K, location: Location) -> Self {
        Self {
            kind,
            location,
            suggestion: None,
        }
    }

    /// Attaches a suggestion to this error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Gets the kind of this error
    pub fn kind(&self) -> &K {
        &self.kind
    }

    /// Gets the suggestion, if any
    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }
}

impl<K: Display> LocatedError<K> {
    /// The message of this error, without any location information
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl<K: Display> Display for LocatedError<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.kind,
            self.location.line(),
            self.location.column()
        )
    }
}

impl<K> Located for LocatedError<K> {
    fn location(&self) -> Location {
        self.location
    }
}

/// A uniform view over anything that can be reported against a source file
pub trait Diagnostic: Located {
    /// The message, without location information
    fn message(&self) -> String;

    /// An optional hint on how to fix the problem
    fn suggestion(&self) -> Option<&str> {
        None
    }
}

impl<K: Display + Debug> Diagnostic for LocatedError<K> {
    fn message(&self) -> String {
        LocatedError::message(self)
    }

    fn suggestion(&self) -> Option<&str> {
        LocatedError::suggestion(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[derive(Debug, thiserror::Error)]
    #[error("bad thing")]
    struct BadThing;

    #[test]
    fn test_display_includes_position() {
        let error = LocatedError::new(BadThing, Location::new(3, 7, 1));
        assert_eq!(error.to_string(), "bad thing at line 3, column 7");
        assert_eq!(error.message(), "bad thing");
    }

    #[test]
    fn test_suggestion() {
        let error = LocatedError::new(BadThing, Location::new(1, 1, 1)).with_suggestion("try again");
        assert_eq!(Diagnostic::suggestion(&error), Some("try again"));
    }
}
