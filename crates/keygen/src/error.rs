//! Error types for keygen.
//!
//! Configuration errors surface when a request is built and are never
//! retryable. Generation can only fail because the entropy source did.
//! Generated key material is never included in error messages.

/// Keygen error types covering configuration and generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeygenError {
    #[error("charset must not be empty")]
    EmptyCharset,

    #[error("charset must contain more than 1 character")]
    CharsetTooSmall,

    #[error("non printable unicode: '{}'", unicode_escape(.0))]
    NonPrintableCharacter(char),

    #[error("duplicate character in charset: '{}'", unicode_escape(.0))]
    DuplicateCharacter(char),

    #[error("key length must be at least 1")]
    InvalidLength,

    #[error("minimum entropy must be at least 1 bit")]
    InvalidEntropy,

    #[error("key length of {length} characters exceeds the supported maximum of {max}")]
    KeyTooLong { length: usize, max: usize },

    #[error("charset of {size} characters exceeds the supported maximum of {max}")]
    UnsupportedCharsetSize { size: usize, max: usize },

    #[error("bit width must be between 1 and {} inclusive, got {0}", crate::bits::MAX_DRAW_BITS)]
    InvalidBitWidth(u32),

    #[error("entropy source unavailable: {0}")]
    EntropySourceUnavailable(String),
}

impl KeygenError {
    /// Whether retrying the same call could succeed.
    ///
    /// Only a failing entropy source is an operational condition; every
    /// other variant means the configuration itself is wrong.
    pub fn is_retryable(&self) -> bool {
        matches!(self, KeygenError::EntropySourceUnavailable(_))
    }
}

impl From<rand_core::Error> for KeygenError {
    fn from(e: rand_core::Error) -> Self {
        KeygenError::EntropySourceUnavailable(e.to_string())
    }
}

/// Format a code point as `U+XXXX`.
fn unicode_escape(c: &char) -> String {
    format!("U+{:04X}", *c as u32)
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, KeygenError>;
