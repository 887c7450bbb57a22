//! # koml
//!
//! A loader for KOML, a compact configuration format whose source text is
//! compiled into an immutable, hash-indexed table of typed values.
//!
//! ## What is KOML?
//!
//! ```text
//! # comments start with '#'
//! name = "demo"
//!
//! [section]
//! a = 1
//! f = -2
//! s = "hi"
//!
//! [section.sub]
//! c = 3.5
//! b = true
//! alias = @section:a
//! ```
//!
//! Every key is qualified by the section it appears in, so the values above
//! are addressed as `name`, `section:a`, `section.sub:c` and so on. Values
//! are typed by their literal syntax: integers, floats, quoted strings and
//! `true`/`false`. See the [`format`] module for the full grammar.
//!
//! ## Key Features
//!
//! - **Typed values**: [`Value`] is a sum type; reading the wrong kind is a
//!   compile error, or a checked [`Error::TypeMismatch`] through the typed getters
//! - **O(1) lookups**: an open-addressed index with per-symbol probe strides
//! - **All-or-nothing loading**: any error aborts with a line/column position
//! - **Immutable tables**: `Table` is `Send + Sync` and never mutated after load
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ```rust
//! use koml::{Kind, Value};
//!
//! let src = b"[section]\na = 1\ns = \"hi\"\n[section.sub]\nc = 3.5\nb = true\n";
//! let table = koml::load(src).unwrap();
//!
//! assert_eq!(table.get("section:a"), Some(&Value::Int(1)));
//! assert_eq!(table.lookup("section.sub:c").unwrap().kind(), Kind::Float);
//! assert_eq!(table.get_str("section:s").unwrap(), "hi");
//! assert!(table.get_bool("section.sub:b").unwrap());
//! assert!(table.get("section:missing").is_none());
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Loading**: O(n) in the source size, single pass
//! - **Lookup**: O(1) expected, no allocation
//! - **Memory**: string values are copied out of the source buffer, which can
//!   be dropped as soon as [`load`] returns

pub mod error;
pub mod format;
pub mod hash;
mod lexer;
pub mod options;
pub mod parser;
pub mod symbol;
pub mod table;
pub mod value;

pub use error::{Error, ParseErrorKind, Result};
pub use options::{DuplicateKeys, LoadOptions};
pub use symbol::Symbol;
pub use table::Table;
pub use value::{Kind, Value};

use std::io;

/// Loads a table from KOML source bytes with default options.
///
/// # Examples
///
/// ```rust
/// let table = koml::load(b"answer = 42").unwrap();
/// assert_eq!(table.get_i32("answer").unwrap(), 42);
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not UTF-8 or the source does not parse.
/// No partial table is ever returned.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn load(bytes: &[u8]) -> Result<Table> {
    load_with_options(bytes, &LoadOptions::default())
}

/// Loads a table from KOML source bytes with custom options.
///
/// # Examples
///
/// ```rust
/// use koml::{load_with_options, Error, LoadOptions};
///
/// let err = load_with_options(b"a = 1\na = 2", &LoadOptions::strict()).unwrap_err();
/// assert!(matches!(err, Error::DuplicateKey { line: 2, first_line: 1, .. }));
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not UTF-8, the source does not parse,
/// or a key is duplicated while [`DuplicateKeys::Reject`] is in effect.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn load_with_options(bytes: &[u8], options: &LoadOptions) -> Result<Table> {
    let src = std::str::from_utf8(bytes).map_err(|e| Error::InvalidUtf8 {
        offset: e.valid_up_to(),
    })?;
    from_str_with_options(src, options)
}

/// Loads a table from KOML source text.
///
/// # Errors
///
/// Returns an error if the source does not parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(src: &str) -> Result<Table> {
    from_str_with_options(src, &LoadOptions::default())
}

/// Loads a table from KOML source text with custom options.
///
/// # Errors
///
/// See [`load_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(src: &str, options: &LoadOptions) -> Result<Table> {
    let symbols = parser::parse_with_options(src, options)?;
    Table::build(symbols, options.duplicate_keys)
}

/// Loads a table from bytes of KOML text. Same as [`load`].
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or not valid KOML.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Table> {
    load(v)
}

/// Reads the whole stream and loads a table from it.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
///
/// let table = koml::from_reader(Cursor::new(b"[a]\nb = false")).unwrap();
/// assert_eq!(table.get_bool("a:b").unwrap(), false);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the data is not valid KOML.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Table>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    load(&bytes)
}
