//! Positions of tokens and nodes within a source text

/// A 1-based line and column, plus the length in characters of the thing being located.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display(fmt = "{}:{}", line, column)]
pub struct Location {
    line: usize,
    column: usize,
    length: usize,
}

impl Location {
    /// Creates a new location
    pub const fn new(line: usize, column: usize, length: usize) -> Self {
        Self {
            line,
            column,
            length,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// The number of characters covered by this location
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Creates a location starting at this one and ending at the end of `other`, if both are on
    /// the same line. Otherwise this location is returned unchanged.
    pub fn join(self, other: Location) -> Location {
        if self.line == other.line && other.column >= self.column {
            Location {
                length: other.column + other.length - self.column,
                ..self
            }
        } else {
            self
        }
    }
}

/// Something that has a location in the source text
pub trait Located {
    fn location(&self) -> Location;
}

impl Located for Location {
    fn location(&self) -> Location {
        *self
    }
}
