//! Qualifies state names inside raw script text.
//!
//! Function, hook and watcher bodies and computed expressions are kept as text, so names are
//! rewritten textually: every whole word naming a state variable becomes `state.name`. This also
//! happens inside string literals.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_$][A-Za-z0-9_$]*").expect("word pattern is valid"));

/// Keywords that declare a local binding
const DECLARATIONS: [&str; 3] = ["let", "const", "var"];

/// Rewrites bare names in script text to reads and writes of `state`
#[derive(Debug, Clone, Default)]
pub struct Qualifier {
    names: HashSet<String>,
    excluded: HashSet<String>,
    assignments: bool,
}

impl Qualifier {
    /// Creates a qualifier for the given state names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Names that are never rewritten, such as parameters
    pub fn excluding<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
        self
    }

    /// Also qualify any name that is assigned to, even when it is not a known state name.
    /// Locals declared with `let`, `const` or `var` are left alone.
    pub fn qualify_assignments(mut self) -> Self {
        self.assignments = true;
        self
    }

    /// Rewrites a body
    pub fn rewrite(&self, body: &str) -> String {
        let mut output = String::with_capacity(body.len() + 32);
        let mut locals = HashSet::new();
        let mut previous_word: Option<&str> = None;
        let mut last = 0;

        for word in WORD.find_iter(body) {
            let start = word.start();
            if start < last {
                continue;
            }
            let name = word.as_str();
            let declared_here = previous_word.is_some_and(|prev| DECLARATIONS.contains(&prev));
            previous_word = Some(name);
            if declared_here {
                locals.insert(name);
                continue;
            }
            if self.excluded.contains(name) || locals.contains(name) {
                continue;
            }
            let preceding = body[..start].chars().next_back();
            if preceding.is_some_and(|c| c == '.' || c.is_ascii_digit()) {
                continue;
            }

            let rest = &body[word.end()..];
            let after_space = rest.trim_start();
            let assigned = after_space.starts_with('=')
                && !after_space.starts_with("==")
                && !after_space.starts_with("=>");
            let qualify = self.names.contains(name) || (self.assignments && assigned);
            if !qualify {
                continue;
            }

            output.push_str(&body[last..start]);
            output.push_str("state.");
            output.push_str(name);
            last = word.end();
            if assigned {
                // `name   =` collapses to `state.name =`
                output.push_str(" =");
                last = word.end() + (rest.len() - after_space.len()) + 1;
            }
        }
        output.push_str(&body[last..]);
        output
    }
}
