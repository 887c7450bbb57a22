//! One parsed key/value record.

use crate::value::{Kind, Value};
use std::fmt;

/// A qualified key with its typed value.
///
/// Symbols come out of the parser in definition order and are owned by a
/// [`Table`](crate::Table) once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    key: String,
    value: Value,
    line: usize,
}

impl Symbol {
    /// Creates a symbol defined at `line` (1-based).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use koml::{Kind, Symbol, Value};
    ///
    /// let sym = Symbol::new("section:a", Value::Int(1), 2);
    /// assert_eq!(sym.key(), "section:a");
    /// assert_eq!(sym.kind(), Kind::Int);
    /// ```
    pub fn new(key: impl Into<String>, value: Value, line: usize) -> Self {
        Symbol {
            key: key.into(),
            value,
            line,
        }
    }

    /// The fully qualified key, e.g. `section.sub:key`.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    /// Source line of the definition that won.
    #[inline]
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Section part of the key, or `None` for a bare key.
    ///
    /// ```rust
    /// use koml::{Symbol, Value};
    ///
    /// assert_eq!(Symbol::new("a.b:k", Value::Bool(true), 1).section(), Some("a.b"));
    /// assert_eq!(Symbol::new("k", Value::Bool(true), 1).section(), None);
    /// ```
    #[must_use]
    pub fn section(&self) -> Option<&str> {
        self.key.rfind(':').map(|i| &self.key[..i])
    }

    pub(crate) fn redefine(&mut self, value: Value, line: usize) {
        self.value = value;
        self.line = line;
    }

    pub(crate) fn into_value(self) -> Value {
        self.value
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.key, self.kind(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_dump_format() {
        let sym = Symbol::new("section.sub:c", Value::Float(3.5), 4);
        assert_eq!(sym.to_string(), "section.sub:c (float): 3.5");

        let sym = Symbol::new("section:s", Value::from("hi"), 5);
        assert_eq!(sym.to_string(), "section:s (string): \"hi\"");
    }

    #[test]
    fn test_redefine_replaces_value_and_line() {
        let mut sym = Symbol::new("k", Value::Int(1), 1);
        sym.redefine(Value::Bool(false), 7);
        assert_eq!(sym.value(), &Value::Bool(false));
        assert_eq!(sym.line(), 7);
        assert_eq!(sym.key(), "k");
    }
}
