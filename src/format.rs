//! KOML Format Reference
//!
//! This module documents the KOML text format as implemented by this
//! library. It contains no code.
//!
//! # Overview
//!
//! A KOML source is a sequence of lines. Each line is blank, a comment, a
//! section header, or a single `key = value` assignment. There are no
//! nested tables, arrays or multi-line values: the whole file compiles to a
//! flat table of qualified keys.
//!
//! # Core Syntax
//!
//! ## Comments and blank lines
//!
//! `#` starts a comment that runs to the end of the line, either on its own
//! line or after a header or value. A `#` inside a quoted string is part of
//! the string. Blank lines are ignored. Both `\n` and `\r\n` line endings
//! are accepted, and a leading UTF-8 byte order mark is skipped.
//!
//! ## Section headers
//!
//! ```text
//! [server]
//! [server.tls]
//! ```
//!
//! A header sets the section for every following assignment, up to the
//! next header. The path is one or more names joined by `.`; blanks inside
//! the brackets around the path are allowed. Empty headers (`[]`), names
//! with other characters, or anything but a comment after `]` are errors.
//! Repeating a header re-enters the section.
//!
//! ## Names
//!
//! Names start with an ASCII letter or `_` and continue with ASCII letters,
//! digits, `_` or `-`.
//!
//! ## Assignments and key qualification
//!
//! ```text
//! top = 1           # stored as `top`
//! [server]
//! port = 8080       # stored as `server:port`
//! [server.tls]
//! enabled = true    # stored as `server.tls:enabled`
//! other:key = 2     # already qualified, stored as `other:key`
//! ```
//!
//! A bare key is joined to the current section path with `:`. Keys before
//! the first header stay bare. A key written with a `:` is taken as fully
//! qualified and ignores the current section.
//!
//! **Rules**:
//! - The `=` is mandatory and must be followed by a value on the same line
//! - One assignment per line; anything after the value other than a comment
//!   is an error
//! - By default a key defined twice keeps the last value (see
//!   [`DuplicateKeys`](crate::DuplicateKeys))
//!
//! ## Values
//!
//! | Kind | Syntax | Example |
//! |------|--------|---------|
//! | Int | optional sign and decimal digits, 32-bit signed range | `-2`, `+7` |
//! | Float | contains `.` or an exponent, finite 32-bit float | `3.5`, `.5`, `1e-3` |
//! | String | double-quoted | `"hi"` |
//! | Boolean | lowercase `true` / `false` | `true` |
//! | Reference | `@` followed by a key | `@server:port` |
//!
//! Digits followed by letters (`12abc`), `True`, `yes`, or an integer that
//! overflows 32 bits are errors.
//!
//! ## Strings
//!
//! | Escape | Meaning |
//! |--------|---------|
//! | `\"` | quote |
//! | `\\` | backslash |
//! | `\n`, `\r`, `\t` | newline, carriage return, tab |
//! | `\0` | NUL |
//! | `\uXXXX` | Unicode scalar value, four hex digits |
//!
//! Any other escape is an error, as is a string still open at the end of
//! the line.
//!
//! ## References
//!
//! ```text
//! [server]
//! port = 8080
//! [client]
//! port = @server:port
//! ```
//!
//! A reference copies the value of a key defined earlier in the file. A
//! bare name inside a section is looked up in the current section first,
//! then as a top-level key. Forward references and references to unknown
//! keys are errors. References can be turned off with
//! [`LoadOptions::with_references`](crate::LoadOptions::with_references).
//!
//! # Dump
//!
//! The `Display` form of a [`Table`](crate::Table) lists one symbol per
//! line as `key (kind): value`. Strings are quoted and escaped so a dumped
//! value reads back as the same literal. Floats print in their shortest
//! round-tripping form, never with fixed six-decimal padding: `3.5` dumps
//! as `3.5` and very large or very small magnitudes switch to exponent
//! notation, so `1.0e20` dumps as `1e20`.
//!
//! ```text
//! {
//!   section:a (int): 1
//!   section.sub:c (float): 3.5
//!   big (float): 1e20
//! }
//! ```
//!
//! # Errors
//!
//! Loading stops at the first error. The error carries the 1-based line and
//! column and echoes the line with a caret:
//!
//! ```text
//! string literal never ended (line 3: column 5)
//!   | s = "hi
//!   |     ^
//! ```
