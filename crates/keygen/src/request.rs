//! Key requests: validated configuration and length resolution.
//!
//! Every check runs when a [`KeyRequest`] is built, through either
//! [`KeyBuilder`] or [`KeyRequest::from_config`]. A built request can
//! only fail generation because the entropy source failed.

use serde::{Deserialize, Serialize};

use crate::charset::{Charset, Preset};
use crate::error::{KeygenError, Result};

/// Entropy used when no sizing is configured.
pub const DEFAULT_MIN_ENTROPY: u32 = 128;

/// Longest key, in characters, a request may ask for.
pub const MAX_KEY_LENGTH: usize = 1 << 20;

/// How the key length is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sizing {
    /// Exactly this many characters.
    Length(usize),
    /// Enough characters to carry at least this many bits.
    MinEntropy(u32),
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing::MinEntropy(DEFAULT_MIN_ENTROPY)
    }
}

/// Serializable key configuration.
///
/// Missing fields fall back to the defaults: the base62 charset and 128
/// bits of entropy. A present `key_length` wins over `min_entropy`,
/// which is then ignored entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyConfig {
    /// Allowed characters; printable, no spaces, no duplicates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    /// Minimum entropy in bits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_entropy: Option<u32>,
    /// Number of characters in the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_length: Option<usize>,
}

impl KeyConfig {
    /// Sizing mode described by this config.
    pub fn sizing(&self) -> Sizing {
        match (self.key_length, self.min_entropy) {
            (Some(length), _) => Sizing::Length(length),
            (None, Some(bits)) => Sizing::MinEntropy(bits),
            (None, None) => Sizing::default(),
        }
    }
}

/// Required character count and draw width for a charset and sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthPlan {
    /// Characters in the generated key.
    pub char_count: usize,
    /// Random bits consumed per draw.
    pub bits_per_draw: u32,
}

/// Resolve the key length for `charset` under `sizing`.
///
/// In entropy mode the count is `ceil(bits / ceil(log2(len)))`: each
/// character is credited with the whole bits of its draw width. Either
/// mode fails with [`KeygenError::KeyTooLong`] past [`MAX_KEY_LENGTH`].
pub fn resolve_length(charset: &Charset, sizing: Sizing) -> Result<LengthPlan> {
    let bits_per_draw = charset.bits_per_draw();
    let char_count = match sizing {
        Sizing::Length(0) => return Err(KeygenError::InvalidLength),
        Sizing::Length(length) => length,
        Sizing::MinEntropy(0) => return Err(KeygenError::InvalidEntropy),
        Sizing::MinEntropy(bits) => bits.div_ceil(bits_per_draw) as usize,
    };
    if char_count > MAX_KEY_LENGTH {
        return Err(KeygenError::KeyTooLong {
            length: char_count,
            max: MAX_KEY_LENGTH,
        });
    }
    Ok(LengthPlan {
        char_count,
        bits_per_draw,
    })
}

/// A validated request for keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRequest {
    pub(crate) charset: Charset,
    pub(crate) plan: LengthPlan,
}

impl KeyRequest {
    /// Validate `charset` and resolve `sizing`.
    pub fn new(charset: &str, sizing: Sizing) -> Result<Self> {
        let charset = Charset::new(charset)?;
        Self::with_charset(charset, sizing)
    }

    /// Resolve `sizing` against an already validated charset.
    pub fn with_charset(charset: Charset, sizing: Sizing) -> Result<Self> {
        let plan = resolve_length(&charset, sizing)?;
        Ok(Self { charset, plan })
    }

    /// Build a request from a [`KeyConfig`].
    pub fn from_config(config: &KeyConfig) -> Result<Self> {
        let charset = match &config.charset {
            Some(candidate) => Charset::new(candidate)?,
            None => Charset::default(),
        };
        Self::with_charset(charset, config.sizing())
    }

    /// The validated charset.
    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    /// Characters per generated key.
    pub fn key_length(&self) -> usize {
        self.plan.char_count
    }

    /// Random bits consumed per draw.
    pub fn bits_per_draw(&self) -> u32 {
        self.plan.bits_per_draw
    }

    /// Entropy of one generated key: `key_length * log2(charset size)`.
    pub fn entropy_bits(&self) -> f64 {
        self.plan.char_count as f64 * self.charset.entropy_per_char()
    }
}

impl Default for KeyRequest {
    fn default() -> Self {
        let charset = Charset::default();
        let plan = LengthPlan {
            char_count: DEFAULT_MIN_ENTROPY.div_ceil(charset.bits_per_draw()) as usize,
            bits_per_draw: charset.bits_per_draw(),
        };
        Self { charset, plan }
    }
}

/// Builder for key requests.
///
/// Starts from the base62 charset and 128 bits of entropy.
#[derive(Debug, Clone, Default)]
pub struct KeyBuilder {
    charset: Option<String>,
    length: Option<usize>,
    min_entropy: Option<u32>,
}

impl KeyBuilder {
    /// Start a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given characters.
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Use a predefined charset.
    pub fn preset(mut self, preset: Preset) -> Self {
        self.charset = Some(preset.as_str().to_string());
        self
    }

    /// Generate exactly `length` characters. Overrides any entropy setting.
    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Generate enough characters for at least `bits` of entropy.
    pub fn min_entropy(mut self, bits: u32) -> Self {
        self.min_entropy = Some(bits);
        self
    }

    /// Validate and build the request.
    pub fn build(self) -> Result<KeyRequest> {
        KeyRequest::from_config(&KeyConfig {
            charset: self.charset,
            min_entropy: self.min_entropy,
            key_length: self.length,
        })
    }
}
