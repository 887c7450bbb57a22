//! KOML source parsing.
//!
//! Turns source text into the ordered list of [`Symbol`]s that
//! [`Table::build`](crate::Table::build) indexes. Parsing is single pass and
//! all-or-nothing: the first error aborts and no symbols are returned.
//!
//! ```rust
//! use koml::parser::parse;
//!
//! let symbols = parse("top = 1\n[section]\na = 2\n[section.sub]\nb = true\n").unwrap();
//! let keys: Vec<_> = symbols.iter().map(|s| s.key()).collect();
//! assert_eq!(keys, ["top", "section:a", "section.sub:b"]);
//! ```

use crate::error::{ParseErrorKind, Result};
use crate::lexer::{Cursor, Literal};
use crate::options::LoadOptions;
use crate::symbol::Symbol;
use crate::value::Value;
use indexmap::IndexMap;

/// Parses `src` with default options.
///
/// # Errors
///
/// Returns [`Error::Parse`](crate::Error::Parse) with the line and column of
/// the first malformed construct.
pub fn parse(src: &str) -> Result<Vec<Symbol>> {
    parse_with_options(src, &LoadOptions::default())
}

/// Parses `src`, honouring `options.references`.
///
/// Duplicate keys are all returned in definition order; the duplicate
/// policy is applied by the table builder.
///
/// # Errors
///
/// Returns [`Error::Parse`](crate::Error::Parse) on the first malformed line.
pub fn parse_with_options(src: &str, options: &LoadOptions) -> Result<Vec<Symbol>> {
    let src = src.strip_prefix('\u{feff}').unwrap_or(src);
    let mut parser = Parser {
        options,
        section: None,
        symbols: Vec::new(),
        defined: IndexMap::new(),
    };

    for (index, raw_line) in src.split('\n').enumerate() {
        let text = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        parser.parse_line(Cursor::new(text, index + 1), index + 1)?;
    }

    Ok(parser.symbols)
}

struct Parser<'o> {
    options: &'o LoadOptions,
    /// Current `section[.sub]` path, `None` before the first header.
    section: Option<String>,
    symbols: Vec<Symbol>,
    /// Qualified key -> position of its latest definition, for references.
    defined: IndexMap<String, usize>,
}

impl Parser<'_> {
    fn parse_line(&mut self, mut cursor: Cursor<'_>, line: usize) -> Result<()> {
        cursor.skip_whitespace();
        match cursor.peek() {
            None | Some('#') => Ok(()),
            Some('[') => self.parse_header(cursor),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.parse_assignment(cursor, line),
            Some(ch) => Err(cursor.error(ParseErrorKind::UnexpectedToken(ch.to_string()))),
        }
    }

    fn parse_header(&mut self, mut cursor: Cursor<'_>) -> Result<()> {
        cursor.bump(); // '['
        cursor.skip_whitespace();
        let path = cursor
            .scan_path()
            .ok_or_else(|| match cursor.peek() {
                None => cursor.error(ParseErrorKind::UnterminatedSection),
                Some(_) => cursor.error(ParseErrorKind::InvalidSection),
            })?;
        cursor.skip_whitespace();

        match cursor.peek() {
            Some(']') => {
                cursor.bump();
            }
            None => return Err(cursor.error(ParseErrorKind::UnterminatedSection)),
            Some(_) => return Err(cursor.error(ParseErrorKind::InvalidSection)),
        }
        cursor.expect_line_end()?;

        self.section = Some(path.to_string());
        Ok(())
    }

    fn parse_assignment(&mut self, mut cursor: Cursor<'_>, line: usize) -> Result<()> {
        let key = cursor.scan_key()?;
        cursor.skip_whitespace();
        if !cursor.eat('=') {
            return Err(cursor.error(ParseErrorKind::MissingEquals));
        }
        cursor.skip_whitespace();

        let value_col = cursor.column();
        let value = match cursor.scan_literal(self.options.references)? {
            Literal::Value(value) => value,
            Literal::Reference(target) => self.resolve(target).ok_or_else(|| {
                cursor.error_at(
                    value_col,
                    ParseErrorKind::UndefinedReference(target.to_string()),
                )
            })?,
        };
        cursor.expect_line_end()?;

        let qualified = self.qualify(key);
        self.defined.insert(qualified.clone(), self.symbols.len());
        self.symbols.push(Symbol::new(qualified, value, line));
        Ok(())
    }

    /// `key` -> `section[.sub]:key`; keys written with a `:` are kept as is.
    fn qualify(&self, key: &str) -> String {
        match &self.section {
            Some(section) if !key.contains(':') => format!("{}:{}", section, key),
            _ => key.to_string(),
        }
    }

    /// Bare names inside a section are looked up in that section first.
    fn resolve(&self, target: &str) -> Option<Value> {
        let scoped = match &self.section {
            Some(_) if !target.contains(':') => self.lookup(&self.qualify(target)),
            _ => None,
        };
        scoped
            .or_else(|| self.lookup(target))
            .cloned()
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        self.defined
            .get(key)
            .map(|&position| self.symbols[position].value())
    }
}
