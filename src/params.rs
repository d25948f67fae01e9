//! Wire-format request parameters.
//!
//! The Backlog API takes its inputs as query-string or form-encoded
//! parameters rather than JSON bodies. `Params` is an ordered list of
//! `(name, value)` pairs; request structs serialize their present optional
//! fields into one, and the client encodes it into the query string (GET,
//! DELETE) or the request body (POST, PATCH).

use std::fmt;

/// An ordered list of wire-format request parameters.
///
/// Entry order is preserved, including repeated names: a set of identifiers
/// serializes as multiple `name[]` entries in the order they were pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(&'static str, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single parameter.
    pub fn push(&mut self, name: &'static str, value: impl fmt::Display) {
        self.pairs.push((name, value.to_string()));
    }

    /// Append a parameter only when the value is present.
    pub fn push_opt(&mut self, name: &'static str, value: Option<&(impl fmt::Display + ?Sized)>) {
        if let Some(value) = value {
            self.push(name, value);
        }
    }

    /// Append one same-named entry per value, in input order.
    pub fn push_all(&mut self, name: &'static str, values: &[impl fmt::Display]) {
        for value in values {
            self.push(name, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The pairs in insertion order, ready for query or form encoding.
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }
}
