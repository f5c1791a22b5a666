//! Generated key values.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A generated key.
///
/// The value is owned by the caller and wiped from memory on drop.
/// `Debug` never prints it; use [`GeneratedKey::as_str`] to read it.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct GeneratedKey {
    value: String,
    char_count: usize,
}

impl GeneratedKey {
    pub(crate) fn new(value: String, char_count: usize) -> Self {
        Self { value, char_count }
    }

    /// The key text.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The key as bytes (UTF-8).
    pub fn as_bytes(&self) -> &[u8] {
        self.value.as_bytes()
    }

    /// Number of characters (code points) in the key.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Take the key text out. The caller becomes responsible for wiping it.
    pub fn into_string(mut self) -> String {
        std::mem::take(&mut self.value)
    }
}

impl AsRef<str> for GeneratedKey {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for GeneratedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeneratedKey({} chars, redacted)", self.char_count)
    }
}
