//! The immutable symbol table and its hash index.
//!
//! A [`Table`] owns its symbols in definition order, parallel vectors of
//! precomputed key hashes and probe strides, and an open-addressed slot
//! array used for lookups. Slots are filled with linear probing and Robin
//! Hood displacement. A symbol's stride is its distance from its home
//! bucket, so a lookup can stop as soon as it meets a resident that sits
//! closer to home than the probe has travelled. Strides stay inside the
//! index and never show on a [`Symbol`].
//!
//! ## Examples
//!
//! ```rust
//! use koml::{Kind, Value};
//!
//! let table = koml::from_str("[net]\nport = 8080\nhost = \"localhost\"\n").unwrap();
//!
//! let port = table.lookup("net:port").unwrap();
//! assert_eq!(port.kind(), Kind::Int);
//! assert_eq!(port.value(), &Value::Int(8080));
//!
//! assert_eq!(table.get_str("net:host").unwrap(), "localhost");
//! assert!(table.lookup("port").is_none());
//! ```

use crate::error::{Error, Result};
use crate::hash::fnv1a;
use crate::options::DuplicateKeys;
use crate::symbol::Symbol;
use crate::value::{Kind, Value};
use indexmap::IndexSet;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

const EMPTY: u32 = u32::MAX;

/// Smallest power of two keeping the load factor at or below 0.75.
fn capacity_for(count: usize) -> usize {
    (count * 4 / 3 + 1).next_power_of_two()
}

/// An immutable, hash-indexed table of typed symbols.
///
/// Built once by [`load`](crate::load) (or [`Table::build`]) and read-only
/// afterwards, so a table can be shared across threads without locking.
#[derive(Clone, Debug)]
pub struct Table {
    symbols: Vec<Symbol>,
    /// `hashes[i]` is the hash of `symbols[i].key()`.
    hashes: Vec<u64>,
    /// `strides[i]` is the distance of `symbols[i]` from its home bucket.
    strides: Vec<usize>,
    /// Open-addressed buckets holding positions into `symbols`.
    slots: Vec<u32>,
    mask: usize,
    max_stride: usize,
}

impl Table {
    /// Builds a table from parsed symbols.
    ///
    /// # Errors
    ///
    /// With [`DuplicateKeys::Reject`], returns [`Error::DuplicateKey`] for
    /// the first key defined twice. With [`DuplicateKeys::LastWins`] this
    /// never fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use koml::{DuplicateKeys, Symbol, Table, Value};
    ///
    /// let symbols = vec![
    ///     Symbol::new("a", Value::Int(1), 1),
    ///     Symbol::new("a", Value::Int(2), 2),
    /// ];
    /// let table = Table::build(symbols, DuplicateKeys::LastWins).unwrap();
    /// assert_eq!(table.len(), 1);
    /// assert_eq!(table.get("a"), Some(&Value::Int(2)));
    /// ```
    pub fn build(symbols: Vec<Symbol>, policy: DuplicateKeys) -> Result<Self> {
        let capacity = capacity_for(symbols.len());
        let mut table = Table {
            symbols: Vec::with_capacity(symbols.len()),
            hashes: Vec::with_capacity(symbols.len()),
            strides: Vec::with_capacity(symbols.len()),
            slots: vec![EMPTY; capacity],
            mask: capacity - 1,
            max_stride: 0,
        };

        for symbol in symbols {
            let hash = fnv1a(symbol.key());
            match table.find(symbol.key(), hash) {
                None => table.insert(symbol, hash),
                Some(position) => {
                    let first = &mut table.symbols[position];
                    if policy == DuplicateKeys::Reject {
                        return Err(Error::DuplicateKey {
                            key: symbol.key().to_string(),
                            line: symbol.line(),
                            first_line: first.line(),
                        });
                    }
                    log::trace!(
                        "`{}` redefined at line {}, replacing line {}",
                        symbol.key(),
                        symbol.line(),
                        first.line()
                    );
                    let line = symbol.line();
                    first.redefine(symbol.into_value(), line);
                }
            }
        }

        log::debug!(
            "built table: {} symbols, {} slots, max stride {}",
            table.symbols.len(),
            table.slots.len(),
            table.max_stride
        );
        Ok(table)
    }

    fn insert(&mut self, symbol: Symbol, hash: u64) {
        // Positions are u32; a source with u32::MAX keys is not loadable anyway.
        let mut position = self.symbols.len() as u32;
        self.symbols.push(symbol);
        self.hashes.push(hash);
        self.strides.push(0);

        let mut slot = (hash as usize) & self.mask;
        let mut stride = 0;
        loop {
            let resident = self.slots[slot];
            if resident == EMPTY {
                self.place(slot, position, stride);
                return;
            }
            // Robin Hood: the entry further from home keeps the slot.
            let resident_stride = self.strides[resident as usize];
            if resident_stride < stride {
                self.place(slot, position, stride);
                position = resident;
                stride = resident_stride;
            }
            slot = (slot + 1) & self.mask;
            stride += 1;
        }
    }

    fn place(&mut self, slot: usize, position: u32, stride: usize) {
        self.slots[slot] = position;
        self.strides[position as usize] = stride;
        self.max_stride = self.max_stride.max(stride);
    }

    #[inline]
    fn find(&self, key: &str, hash: u64) -> Option<usize> {
        let mut slot = (hash as usize) & self.mask;
        for stride in 0..=self.max_stride {
            let position = self.slots[slot];
            if position == EMPTY {
                return None;
            }
            let position = position as usize;
            if self.strides[position] < stride {
                return None;
            }
            if self.hashes[position] == hash && self.symbols[position].key() == key {
                return Some(position);
            }
            slot = (slot + 1) & self.mask;
        }
        None
    }

    /// Resolves a qualified key (`section[.sub]:key` or a bare key).
    ///
    /// Expected O(1), no allocation.
    #[inline]
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&Symbol> {
        self.find(key, fnv1a(key)).map(|position| &self.symbols[position])
    }

    /// Returns the value stored under `key`.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.lookup(key).map(Symbol::value)
    }

    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    fn require(&self, key: &str) -> Result<&Value> {
        self.get(key).ok_or_else(|| Error::NotFound(key.to_string()))
    }

    /// Returns the integer stored under `key`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the key is absent, [`Error::TypeMismatch`] if
    /// it holds another kind of value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use koml::{Error, Kind};
    ///
    /// let table = koml::from_str("a = 1\nb = 1.0").unwrap();
    /// assert_eq!(table.get_i32("a"), Ok(1));
    /// assert!(matches!(table.get_i32("b"), Err(Error::TypeMismatch { found: Kind::Float, .. })));
    /// assert!(matches!(table.get_i32("c"), Err(Error::NotFound(_))));
    /// ```
    pub fn get_i32(&self, key: &str) -> Result<i32> {
        match self.require(key)? {
            Value::Int(i) => Ok(*i),
            other => Err(Error::type_mismatch(key, Kind::Int, other.kind())),
        }
    }

    /// Returns the float stored under `key`. Integers are not widened.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] or [`Error::TypeMismatch`].
    pub fn get_f32(&self, key: &str) -> Result<f32> {
        match self.require(key)? {
            Value::Float(x) => Ok(*x),
            other => Err(Error::type_mismatch(key, Kind::Float, other.kind())),
        }
    }

    /// Returns the string stored under `key`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] or [`Error::TypeMismatch`].
    pub fn get_str(&self, key: &str) -> Result<&str> {
        match self.require(key)? {
            Value::String(s) => Ok(s),
            other => Err(Error::type_mismatch(key, Kind::String, other.kind())),
        }
    }

    /// Returns the boolean stored under `key`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] or [`Error::TypeMismatch`].
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        match self.require(key)? {
            Value::Bool(b) => Ok(*b),
            other => Err(Error::type_mismatch(key, Kind::Boolean, other.kind())),
        }
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates symbols in definition order. A redefined key keeps the
    /// position of its first definition.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.symbols.iter().map(Symbol::key)
    }

    /// Distinct section paths in order of first appearance.
    ///
    /// ```rust
    /// let table = koml::from_str("x = 1\n[b]\nk = 1\n[a.c]\nk = 2\n[b]\nj = 3\n").unwrap();
    /// let sections: Vec<_> = table.sections().into_iter().collect();
    /// assert_eq!(sections, ["b", "a.c"]);
    /// ```
    #[must_use]
    pub fn sections(&self) -> IndexSet<&str> {
        self.symbols.iter().filter_map(Symbol::section).collect()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for symbol in &self.symbols {
            writeln!(f, "  {}", symbol)?;
        }
        write!(f, "}}")
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.symbols.len()))?;
        for symbol in &self.symbols {
            map.serialize_entry(symbol.key(), symbol.value())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(pairs: &[(&str, Value)]) -> Vec<Symbol> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, (k, v))| Symbol::new(*k, v.clone(), i + 1))
            .collect()
    }

    /// Every symbol sits exactly `stride` slots after its home bucket.
    fn assert_strides_consistent(table: &Table) {
        for (slot, &position) in table.slots.iter().enumerate() {
            if position == EMPTY {
                continue;
            }
            let position = position as usize;
            let home = (table.hashes[position] as usize) & table.mask;
            let stride = table.strides[position];
            assert_eq!((home + stride) & table.mask, slot);
            assert!(stride <= table.max_stride);
        }
    }

    #[test]
    fn test_capacity_keeps_load_factor() {
        assert_eq!(capacity_for(0), 1);
        assert_eq!(capacity_for(1), 2);
        assert_eq!(capacity_for(3), 8);
        assert_eq!(capacity_for(6), 16);
        for n in 0..2000 {
            let cap = capacity_for(n);
            assert!(cap.is_power_of_two());
            assert!(n * 4 <= cap * 3, "n={} cap={}", n, cap);
            assert!(cap > n);
        }
    }

    #[test]
    fn test_empty_table() {
        let table = Table::build(Vec::new(), DuplicateKeys::LastWins).unwrap();
        assert!(table.is_empty());
        assert!(table.lookup("").is_none());
        assert!(table.lookup("anything").is_none());
        assert_eq!(table.to_string(), "{\n}");
    }

    #[test]
    fn test_hashes_align_with_symbols() {
        let table = Table::build(
            symbols(&[
                ("a", Value::Int(1)),
                ("s:b", Value::Bool(true)),
                ("s.t:c", Value::from("x")),
            ]),
            DuplicateKeys::LastWins,
        )
        .unwrap();
        assert_eq!(table.hashes.len(), table.symbols.len());
        assert_eq!(table.strides.len(), table.symbols.len());
        for (symbol, &hash) in table.symbols.iter().zip(&table.hashes) {
            assert_eq!(fnv1a(symbol.key()), hash);
        }
        assert_strides_consistent(&table);
    }

    #[test]
    fn test_many_keys_force_collisions() {
        let pairs: Vec<(String, Value)> = (0..5000)
            .map(|i| (format!("section{}.sub:key{}", i % 17, i), Value::Int(i)))
            .collect();
        let input: Vec<Symbol> = pairs
            .iter()
            .map(|(k, v)| Symbol::new(k.as_str(), v.clone(), 1))
            .collect();
        let table = Table::build(input, DuplicateKeys::Reject).unwrap();

        assert!(table.max_stride > 0, "expected at least one collision");
        assert_strides_consistent(&table);
        for (key, value) in &pairs {
            assert_eq!(table.get(key), Some(value), "key {}", key);
        }
        assert!(table.get("section0.sub:key5000").is_none());
    }

    #[test]
    fn test_last_wins_keeps_first_position() {
        let table = Table::build(
            symbols(&[
                ("a", Value::Int(1)),
                ("b", Value::Int(2)),
                ("a", Value::from("again")),
            ]),
            DuplicateKeys::LastWins,
        )
        .unwrap();
        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, ["a", "b"]);
        let a = table.lookup("a").unwrap();
        assert_eq!(a.value(), &Value::from("again"));
        assert_eq!(a.line(), 3);
    }

    #[test]
    fn test_reject_reports_both_lines() {
        let err = Table::build(
            symbols(&[("a", Value::Int(1)), ("b", Value::Int(2)), ("a", Value::Int(3))]),
            DuplicateKeys::Reject,
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateKey {
                key: "a".to_string(),
                line: 3,
                first_line: 1,
            }
        );
    }

    #[test]
    fn test_typed_getters() {
        let table = Table::build(
            symbols(&[
                ("i", Value::Int(-2)),
                ("f", Value::Float(3.5)),
                ("s", Value::from("hi")),
                ("b", Value::Bool(true)),
            ]),
            DuplicateKeys::LastWins,
        )
        .unwrap();
        assert_eq!(table.get_i32("i"), Ok(-2));
        assert_eq!(table.get_f32("f"), Ok(3.5));
        assert_eq!(table.get_str("s"), Ok("hi"));
        assert_eq!(table.get_bool("b"), Ok(true));
        assert_eq!(
            table.get_f32("i"),
            Err(Error::type_mismatch("i", Kind::Float, Kind::Int))
        );
        assert_eq!(table.get_bool("nope"), Err(Error::NotFound("nope".to_string())));
    }

    #[test]
    fn test_symbols_equal_regardless_of_neighbours() {
        let alone =
            Table::build(symbols(&[("k", Value::Int(1))]), DuplicateKeys::LastWins).unwrap();

        let mut input = symbols(&[("k", Value::Int(1))]);
        input.extend((0..64).map(|i| Symbol::new(format!("filler{}", i), Value::Int(i), 1)));
        let crowded = Table::build(input, DuplicateKeys::LastWins).unwrap();
        assert!(crowded.max_stride > 0, "expected at least one collision");

        assert_eq!(alone.lookup("k"), crowded.lookup("k"));
        assert_eq!(
            format!("{:?}", alone.lookup("k")),
            format!("{:?}", crowded.lookup("k"))
        );
    }

    #[test]
    fn test_display_dump() {
        let table = Table::build(
            symbols(&[("s:a", Value::Int(1)), ("s.sub:b", Value::Bool(true))]),
            DuplicateKeys::LastWins,
        )
        .unwrap();
        assert_eq!(
            table.to_string(),
            "{\n  s:a (int): 1\n  s.sub:b (boolean): true\n}"
        );
    }
}
