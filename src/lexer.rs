//! Character cursor and token scanners for a single source line.
//!
//! KOML is line oriented, so the cursor never crosses a newline. Columns
//! are 1-based and count characters, not bytes.

use crate::error::{Error, ParseErrorKind, Result};
use crate::value::Value;

/// A scanned value position: either a literal or an `@` reference that the
/// parser resolves against earlier definitions.
#[derive(Debug, PartialEq)]
pub(crate) enum Literal<'a> {
    Value(Value),
    Reference(&'a str),
}

pub(crate) struct Cursor<'a> {
    text: &'a str,
    position: usize,
    column: usize,
    line: usize,
}

#[inline]
fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

#[inline]
fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

#[inline]
fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

fn is_sign(ch: char) -> bool {
    ch == '+' || ch == '-'
}

fn is_exponent(ch: char) -> bool {
    ch == 'e' || ch == 'E'
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str, line: usize) -> Self {
        Cursor {
            text,
            position: 0,
            column: 1,
            line,
        }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.text[self.position..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.text[self.position..].chars();
        chars.next();
        chars.next()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        self.column += 1;
        Some(ch)
    }

    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if is_blank(ch) {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// True at the end of the line or at the start of a trailing comment.
    pub(crate) fn at_line_end(&self) -> bool {
        matches!(self.peek(), None | Some('#'))
    }

    pub(crate) fn column(&self) -> usize {
        self.column
    }

    pub(crate) fn error(&self, kind: ParseErrorKind) -> Error {
        self.error_at(self.column, kind)
    }

    pub(crate) fn error_at(&self, column: usize, kind: ParseErrorKind) -> Error {
        Error::parse(self.line, column, kind, self.text)
    }

    /// Skips blanks and requires the rest of the line to be empty or a comment.
    pub(crate) fn expect_line_end(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.at_line_end() {
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::TrailingCharacters))
        }
    }

    /// `[A-Za-z_][A-Za-z0-9_-]*`
    pub(crate) fn scan_name(&mut self) -> Option<&'a str> {
        let start = self.position;
        match self.peek() {
            Some(ch) if is_name_start(ch) => {
                self.bump();
            }
            _ => return None,
        }
        while let Some(ch) = self.peek() {
            if is_name_char(ch) {
                self.bump();
            } else {
                break;
            }
        }
        Some(&self.text[start..self.position])
    }

    /// `name ( '.' name )*`. A dot not followed by a name is left unconsumed.
    pub(crate) fn scan_path(&mut self) -> Option<&'a str> {
        let start = self.position;
        self.scan_name()?;
        while self.peek() == Some('.') && self.peek_second().map_or(false, is_name_start) {
            self.bump();
            self.scan_name();
        }
        Some(&self.text[start..self.position])
    }

    /// `name | path ':' name`, as written in the source.
    pub(crate) fn scan_key(&mut self) -> Result<&'a str> {
        let start_col = self.column;
        let start = self.position;
        let path = self
            .scan_path()
            .ok_or_else(|| self.error(ParseErrorKind::InvalidKey))?;

        if self.eat(':') {
            if self.scan_name().is_none() {
                return Err(self.error(ParseErrorKind::InvalidKey));
            }
        } else if path.contains('.') {
            // A dotted path only names a section; a key needs `:name`.
            return Err(self.error_at(start_col, ParseErrorKind::InvalidKey));
        }

        match self.peek() {
            None | Some('=') => {}
            Some(ch) if is_blank(ch) || ch == '#' => {}
            Some(_) => return Err(self.error(ParseErrorKind::InvalidKey)),
        }
        Ok(&self.text[start..self.position])
    }

    /// Scans the value part of an assignment.
    pub(crate) fn scan_literal(&mut self, references: bool) -> Result<Literal<'a>> {
        match self.peek() {
            None | Some('#') => Err(self.error(ParseErrorKind::MissingValue)),
            Some('"') => self.scan_string().map(|s| Literal::Value(Value::String(s))),
            Some('@') if references => {
                self.bump();
                self.scan_key().map(Literal::Reference)
            }
            Some(ch) if ch.is_ascii_digit() || ch == '-' || ch == '+' || ch == '.' => {
                self.scan_number().map(Literal::Value)
            }
            Some(ch) if ch.is_ascii_alphabetic() => self.scan_word().map(Literal::Value),
            Some(ch) => Err(self.error(ParseErrorKind::UnexpectedToken(ch.to_string()))),
        }
    }

    fn scan_string(&mut self) -> Result<String> {
        let open_col = self.column;
        self.bump(); // opening quote
        let mut result = String::new();

        loop {
            let escape_col = self.column;
            match self.bump() {
                None => return Err(self.error_at(open_col, ParseErrorKind::UnterminatedString)),
                Some('"') => return Ok(result),
                Some('\\') => match self.bump() {
                    None => {
                        return Err(self.error_at(open_col, ParseErrorKind::UnterminatedString))
                    }
                    Some('"') => result.push('"'),
                    Some('\\') => result.push('\\'),
                    Some('n') => result.push('\n'),
                    Some('r') => result.push('\r'),
                    Some('t') => result.push('\t'),
                    Some('0') => result.push('\0'),
                    Some('u') => result.push(self.scan_unicode_escape(escape_col)?),
                    Some(other) => {
                        return Err(self.error_at(escape_col, ParseErrorKind::InvalidEscape(other)))
                    }
                },
                Some(ch) => result.push(ch),
            }
        }
    }

    /// `\uXXXX`, the `\u` already consumed.
    fn scan_unicode_escape(&mut self, escape_col: usize) -> Result<char> {
        let mut code_point = 0u32;
        for _ in 0..4 {
            match self.peek().and_then(|ch| ch.to_digit(16)) {
                Some(digit) => {
                    self.bump();
                    code_point = code_point * 16 + digit;
                }
                None => {
                    return Err(self.error_at(escape_col, ParseErrorKind::InvalidEscape('u')))
                }
            }
        }
        char::from_u32(code_point)
            .ok_or_else(|| self.error_at(escape_col, ParseErrorKind::InvalidEscape('u')))
    }

    /// Takes the raw run of characters up to a blank or a comment.
    fn scan_raw_word(&mut self) -> &'a str {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if is_blank(ch) || ch == '#' {
                break;
            }
            self.bump();
        }
        &self.text[start..self.position]
    }

    fn scan_number(&mut self) -> Result<Value> {
        let start_col = self.column;
        let raw = self.scan_raw_word();
        classify_number(raw).map_err(|kind| self.error_at(start_col, kind))
    }

    fn scan_word(&mut self) -> Result<Value> {
        let start_col = self.column;
        match self.scan_raw_word() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            other => Err(self.error_at(
                start_col,
                ParseErrorKind::UnexpectedToken(other.to_string()),
            )),
        }
    }
}

/// Types a numeric literal: all digits after an optional sign is an `Int`,
/// a decimal point or exponent makes it a `Float`.
fn classify_number(raw: &str) -> std::result::Result<Value, ParseErrorKind> {
    let body = raw.strip_prefix(is_sign).unwrap_or(raw);

    if !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<i32>()
            .map(Value::Int)
            .map_err(|_| ParseErrorKind::IntegerOverflow(raw.to_string()));
    }

    let looks_float = body.contains('.') || body.contains(is_exponent);
    if !looks_float || !is_float_syntax(body) {
        return Err(if body.contains('.') {
            ParseErrorKind::InvalidFloat(raw.to_string())
        } else {
            ParseErrorKind::InvalidInteger(raw.to_string())
        });
    }

    match raw.parse::<f32>() {
        Ok(x) if x.is_finite() => Ok(Value::Float(x)),
        _ => Err(ParseErrorKind::InvalidFloat(raw.to_string())),
    }
}

/// `( digits '.' digits? | '.' digits | digits ) ( [eE] [+-]? digits )?`
fn is_float_syntax(body: &str) -> bool {
    let (mantissa, exponent) = match body.find(is_exponent) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return false;
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let digits = exp.strip_prefix(is_sign).unwrap_or(exp);
            !digits.is_empty() && all_digits(digits)
        }
    }
}
