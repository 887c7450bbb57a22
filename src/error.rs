//! Error types for loading and querying KOML tables.
//!
//! ## Error Categories
//!
//! - **Parse errors**: malformed source text, always with line/column and a
//!   rendered snippet pointing at the offending column
//! - **Duplicate keys**: only raised under [`DuplicateKeys::Reject`](crate::DuplicateKeys)
//! - **Not found / type mismatch**: returned by the checked typed getters on
//!   [`Table`](crate::Table)
//! - **I/O and encoding**: reading from a stream or non UTF-8 input
//!
//! ## Examples
//!
//! ```rust
//! use koml::{Error, ParseErrorKind};
//!
//! let err = koml::from_str("name = \"unterminated").unwrap_err();
//! assert!(matches!(
//!     err,
//!     Error::Parse { line: 1, kind: ParseErrorKind::UnterminatedString, .. }
//! ));
//! ```

use crate::value::Kind;
use thiserror::Error;

/// The specific reason a source failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("string literal never ended")]
    UnterminatedString,

    #[error("invalid escape sequence `\\{0}`")]
    InvalidEscape(char),

    #[error("section header never closed")]
    UnterminatedSection,

    #[error("invalid section name")]
    InvalidSection,

    #[error("invalid key name")]
    InvalidKey,

    #[error("expected `=` after key")]
    MissingEquals,

    #[error("missing value")]
    MissingValue,

    #[error("invalid integer value `{0}`")]
    InvalidInteger(String),

    #[error("integer value `{0}` does not fit in 32 bits")]
    IntegerOverflow(String),

    #[error("invalid float value `{0}`")]
    InvalidFloat(String),

    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),

    #[error("unexpected characters after value")]
    TrailingCharacters,

    #[error("reference to undefined key `{0}`")]
    UndefinedReference(String),
}

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed source text. No table is produced.
    #[error("{kind} (line {line}: column {col})\n{snippet}")]
    Parse {
        line: usize,
        col: usize,
        kind: ParseErrorKind,
        snippet: String,
    },

    /// A qualified key was defined twice while duplicates are rejected.
    #[error("duplicate key `{key}` at line {line} (first defined at line {first_line})")]
    DuplicateKey {
        key: String,
        line: usize,
        first_line: usize,
    },

    /// Source bytes are not valid UTF-8.
    #[error("source is not valid UTF-8 (byte offset {offset})")]
    InvalidUtf8 { offset: usize },

    /// The requested key is not defined in the table.
    #[error("key not found: `{0}`")]
    NotFound(String),

    /// The key exists but holds a value of another kind.
    #[error("type mismatch for `{key}`: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: Kind,
        found: Kind,
    },

    /// IO error while reading the source
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Creates a parse error, rendering `source_line` with a caret under `col`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use koml::{Error, ParseErrorKind};
    ///
    /// let err = Error::parse(3, 5, ParseErrorKind::MissingEquals, "key 1");
    /// assert_eq!(err.line(), Some(3));
    /// assert!(err.to_string().contains("  | key 1\n  |     ^"));
    /// ```
    pub fn parse(line: usize, col: usize, kind: ParseErrorKind, source_line: &str) -> Self {
        Error::Parse {
            line,
            col,
            kind,
            snippet: render_snippet(source_line, col),
        }
    }

    /// Creates a type mismatch error for `key`.
    pub fn type_mismatch(key: &str, expected: Kind, found: Kind) -> Self {
        Error::TypeMismatch {
            key: key.to_string(),
            expected,
            found,
        }
    }

    /// Creates an I/O error for stream reading failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the source line this error points at, if it has one.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Parse { line, .. } | Error::DuplicateKey { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Returns `true` for errors that abort a load.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            Error::Parse { .. } | Error::DuplicateKey { .. } | Error::InvalidUtf8 { .. }
        )
    }
}

fn render_snippet(source_line: &str, col: usize) -> String {
    // Tabs are kept so the caret lines up with the echoed line in a terminal.
    let pad: String = source_line
        .chars()
        .take(col.saturating_sub(1))
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    format!("  | {}\n  | {}^", source_line, pad)
}

pub type Result<T> = std::result::Result<T, Error>;
