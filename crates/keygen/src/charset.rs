//! Character sets keys are drawn from.
//!
//! A [`Charset`] is an ordered list of distinct, printable, non-space
//! code points. Validation happens once, in [`Charset::new`]; a value of
//! this type is always safe to index with rejection sampling.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::bits::MAX_DRAW_BITS;
use crate::error::{KeygenError, Result};

/// Alphanumerics minus the ambiguous characters `0`, `I`, `O` and `l`.
pub const BASE58: &str = "123456789ABCDEFGHJKMNPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Alphanumeric characters, good for human readable keys.
pub const BASE62: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// RFC 6265 cookie-octet safe characters, good for cookie values.
pub const RFC6265: &str = concat!(
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz",
    "!#$%&'()*+-./:<=>?@[]^_`{|}~"
);

/// Largest charset a single draw can index.
pub const MAX_CHARSET_SIZE: usize = 1 << MAX_DRAW_BITS;

/// Named, well-known charsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Base58,
    Base62,
    Rfc6265,
}

impl Preset {
    /// The characters of this preset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Base58 => BASE58,
            Preset::Base62 => BASE62,
            Preset::Rfc6265 => RFC6265,
        }
    }

    /// Build the validated charset for this preset.
    pub fn charset(&self) -> Charset {
        // Presets are ASCII, distinct and printable.
        Charset {
            chars: self.as_str().chars().collect(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Preset::Base58 => "base58",
            Preset::Base62 => "base62",
            Preset::Rfc6265 => "rfc6265",
        };
        f.write_str(name)
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base58" => Ok(Preset::Base58),
            "base62" => Ok(Preset::Base62),
            "rfc6265" | "cookie" => Ok(Preset::Rfc6265),
            other => Err(format!("unknown charset preset: {other}")),
        }
    }
}

/// A validated character set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    chars: Vec<char>,
}

impl Charset {
    /// Validate a candidate charset.
    ///
    /// Checks run in this order: empty input, then each character for
    /// printability and uniqueness, then the distinct count through
    /// [`check_size`].
    pub fn new(candidate: &str) -> Result<Self> {
        if candidate.is_empty() {
            return Err(KeygenError::EmptyCharset);
        }

        let mut seen = HashSet::new();
        let mut chars = Vec::new();
        for c in candidate.chars() {
            if !is_printable(c) {
                return Err(KeygenError::NonPrintableCharacter(c));
            }
            if !seen.insert(c) {
                return Err(KeygenError::DuplicateCharacter(c));
            }
            chars.push(c);
        }

        check_size(chars.len())?;
        Ok(Self { chars })
    }

    /// Wrap characters without validation.
    #[cfg(test)]
    pub(crate) fn from_chars_unchecked(chars: Vec<char>) -> Self {
        Self { chars }
    }

    /// Number of characters in the set.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; a validated charset holds at least two characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Whether `c` is a member of the set.
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// Position of `c` in the set.
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.chars.iter().position(|&m| m == c)
    }

    /// The characters in order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Bits consumed per draw: `ceil(log2(len))`.
    ///
    /// The smallest width whose range `[0, 2^b)` covers every index.
    pub fn bits_per_draw(&self) -> u32 {
        ceil_log2(self.chars.len())
    }

    /// Information carried by one uniformly drawn character: `log2(len)`.
    pub fn entropy_per_char(&self) -> f64 {
        (self.chars.len() as f64).log2()
    }

    /// Widest UTF-8 encoding of any member, in bytes.
    pub fn max_utf8_len(&self) -> usize {
        self.chars.iter().map(|c| c.len_utf8()).max().unwrap_or(1)
    }
}

impl Default for Charset {
    fn default() -> Self {
        Preset::Base62.charset()
    }
}

impl From<Preset> for Charset {
    fn from(preset: Preset) -> Self {
        preset.charset()
    }
}

impl FromStr for Charset {
    type Err = KeygenError;

    fn from_str(s: &str) -> Result<Self> {
        Charset::new(s)
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Check a distinct character count against the charset size bounds.
///
/// Fails with [`KeygenError::CharsetTooSmall`] below two characters and
/// [`KeygenError::UnsupportedCharsetSize`] above [`MAX_CHARSET_SIZE`].
pub fn check_size(size: usize) -> Result<()> {
    if size < 2 {
        return Err(KeygenError::CharsetTooSmall);
    }
    if size > MAX_CHARSET_SIZE {
        return Err(KeygenError::UnsupportedCharsetSize {
            size,
            max: MAX_CHARSET_SIZE,
        });
    }
    Ok(())
}

/// `ceil(log2(n))` for `n >= 2`.
pub(crate) fn ceil_log2(n: usize) -> u32 {
    usize::BITS - (n - 1).leading_zeros()
}

/// Printable, non-space code point.
///
/// Letters, marks, numbers, punctuation and symbols are printable.
/// Separators (the ASCII space included), control, format, private use
/// and unassigned code points are not.
fn is_printable(c: char) -> bool {
    use GeneralCategory::*;

    matches!(
        get_general_category(c),
        UppercaseLetter
            | LowercaseLetter
            | TitlecaseLetter
            | ModifierLetter
            | OtherLetter
            | NonspacingMark
            | SpacingMark
            | EnclosingMark
            | DecimalNumber
            | LetterNumber
            | OtherNumber
            | ConnectorPunctuation
            | DashPunctuation
            | OpenPunctuation
            | ClosePunctuation
            | InitialPunctuation
            | FinalPunctuation
            | OtherPunctuation
            | MathSymbol
            | CurrencySymbol
            | ModifierSymbol
            | OtherSymbol
    )
}
