//! Typed values stored in a KOML table.
//!
//! ## Core Types
//!
//! - [`Kind`]: the stable type tag (`Unknown`, `Int`, `Float`, `String`, `Boolean`)
//! - [`Value`]: the discriminated value itself
//!
//! A [`Value`] can only be read through its variant, so reading an integer
//! slot as a float is impossible by construction.
//!
//! ### Extracting Values
//!
//! ```rust
//! use koml::{Kind, Value};
//! use std::convert::TryFrom;
//!
//! let value = Value::from(42);
//! assert_eq!(value.kind(), Kind::Int);
//! assert_eq!(value.as_i32(), Some(42));
//! assert_eq!(value.as_f32(), None);
//!
//! let n: i32 = i32::try_from(value).unwrap();
//! assert_eq!(n, 42);
//! ```

use serde::{Serialize, Serializer};
use std::fmt;

/// Type tag of a stored value.
///
/// The discriminants are stable and match the tags used by foreign callers.
/// `Unknown` is reserved: no loaded value ever has this kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    Unknown = 0,
    Int = 1,
    Float = 2,
    String = 3,
    Boolean = 4,
}

impl Kind {
    /// Returns the stable numeric tag.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use koml::Kind;
    ///
    /// assert_eq!(Kind::Float.as_u8(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Maps a numeric tag back to a kind. Unassigned tags map to `Unknown`.
    #[must_use]
    pub const fn from_u8(tag: u8) -> Self {
        match tag {
            1 => Kind::Int,
            2 => Kind::Float,
            3 => Kind::String,
            4 => Kind::Boolean,
            _ => Kind::Unknown,
        }
    }

    /// Returns the lowercase name used in dumps and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Unknown => "unknown",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed value parsed from a KOML literal.
///
/// # Examples
///
/// ```rust
/// use koml::Value;
///
/// let text = Value::from("hello");
/// assert!(text.is_string());
/// assert_eq!(text.as_str(), Some("hello"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f32),
    String(String),
    Bool(bool),
}

impl Value {
    /// Returns the type tag of this value. Never `Kind::Unknown`.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Bool(_) => Kind::Boolean,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use koml::Value;
    ///
    /// assert_eq!(Value::Int(-2).as_i32(), Some(-2));
    /// assert_eq!(Value::Float(1.0).as_i32(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a float, returns it. Otherwise returns `None`.
    ///
    /// Integers are not widened; use [`Value::kind`] to branch explicitly.
    #[inline]
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::String(s) => {
                f.write_str("\"")?;
                for ch in s.chars() {
                    match ch {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        '\t' => f.write_str("\\t")?,
                        '\0' => f.write_str("\\0")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Int(i) => serializer.serialize_i32(*i),
            Value::Float(x) => serializer.serialize_f32(*x),
            Value::String(s) => serializer.serialize_str(s),
            Value::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

// TryFrom implementations for extracting values. The key is unknown here,
// so mismatches report an empty key.
impl TryFrom<Value> for i32 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(crate::Error::type_mismatch("", Kind::Int, other.kind())),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Float(x) => Ok(x),
            other => Err(crate::Error::type_mismatch("", Kind::Float, other.kind())),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(crate::Error::type_mismatch("", Kind::Boolean, other.kind())),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(crate::Error::type_mismatch("", Kind::String, other.kind())),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}
