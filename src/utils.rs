//! Assorted utilities and helpers.
//!
//! Both input formats are plain whitespace-separated token streams; these
//! helpers pull typed fields off such a stream and report what was expected
//! when they fail.

use crate::error::{HmmError, Result};
use std::collections::HashMap;
use std::str::SplitWhitespace;

/// Largest alphabet expressible with single lowercase letters.
pub const MAX_ALPHABET_SIZE: usize = 26;

/// Whitespace token cursor over a text source.
pub(crate) struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    /// Next raw token; `what` names the field for the error message.
    pub(crate) fn next_str(&mut self, what: &str) -> Result<&'a str> {
        self.inner
            .next()
            .ok_or_else(|| HmmError::Parse(format!("unexpected end of input, expected {what}")))
    }

    pub(crate) fn next_usize(&mut self, what: &str) -> Result<usize> {
        let token = self.next_str(what)?;
        token
            .parse::<usize>()
            .map_err(|_| HmmError::Parse(format!("expected {what} (non-negative integer), found '{token}'")))
    }

    pub(crate) fn next_f64(&mut self, what: &str) -> Result<f64> {
        let token = self.next_str(what)?;
        token
            .parse::<f64>()
            .map_err(|_| HmmError::Parse(format!("expected {what} (number), found '{token}'")))
    }
}

/// Map a symbol token to its index (`'a' -> 0`, `'b' -> 1`, ...).
///
/// Only the first character is significant, matching the file formats.
#[inline]
pub fn symbol_index(token: &str) -> Result<usize> {
    match token.bytes().next() {
        Some(c @ b'a'..=b'z') => Ok(usize::from(c - b'a')),
        _ => Err(HmmError::InvalidSymbol(token.to_string())),
    }
}

/// Resolve a symbol token against an alphabet of `alphabet_size` letters.
pub(crate) fn resolve_symbol(token: &str, alphabet_size: usize) -> Result<usize> {
    match symbol_index(token)? {
        symbol if symbol < alphabet_size => Ok(symbol),
        _ => Err(HmmError::InvalidSymbol(token.to_string())),
    }
}

/// Look a state name up in a name-to-index map.
pub(crate) fn resolve_state(index: &HashMap<String, usize>, name: &str) -> Result<usize> {
    index
        .get(name)
        .copied()
        .ok_or_else(|| HmmError::UnknownState(name.to_string()))
}

/// Inverse of [`symbol_index`], for presentation.
#[inline]
pub fn symbol_char(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|&i| usize::from(i) < MAX_ALPHABET_SIZE)
        .map(|i| char::from(b'a' + i))
}
