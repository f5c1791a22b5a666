//! Rejection-sampling key generation.
//!
//! Each draw takes `ceil(log2(len))` bits from a [`BitCache`]. Values
//! inside the charset become the next character; values past the end
//! are discarded. The draw is never reduced modulo the charset size,
//! which would favour low indices whenever the size is not a power of
//! two.

use rand_core::{CryptoRng, RngCore};

use crate::bits::BitCache;
use crate::charset::Charset;
use crate::error::Result;
use crate::key::GeneratedKey;
use crate::request::{KeyRequest, MAX_KEY_LENGTH};

/// Draw `count` characters uniformly from `charset`.
///
/// No partial key is returned: a source failure discards everything
/// drawn so far.
pub fn sample_key<R: RngCore + CryptoRng>(
    charset: &Charset,
    count: usize,
    cache: &mut BitCache<R>,
) -> Result<GeneratedKey> {
    let bits = charset.bits_per_draw();
    let size = charset.len();

    let capacity = count.min(MAX_KEY_LENGTH) * charset.max_utf8_len();
    let mut key = String::with_capacity(capacity);
    let mut accepted = 0usize;
    let mut rejected = 0u64;

    while accepted < count {
        let idx = cache.take(bits)? as usize;
        match charset.get(idx) {
            Some(c) => {
                key.push(c);
                accepted += 1;
            }
            None => rejected += 1,
        }
    }

    log::debug!(
        "generated key: {} chars from {} (bits/draw {}, rejected draws {})",
        count,
        size,
        bits,
        rejected
    );

    Ok(GeneratedKey::new(key, count))
}

impl KeyRequest {
    /// Generate one key from the operating system's random source.
    pub fn generate(&self) -> Result<GeneratedKey> {
        let mut cache = BitCache::new();
        self.generate_with(&mut cache)
    }

    /// Generate one key from a caller-owned cache.
    pub fn generate_with<R: RngCore + CryptoRng>(
        &self,
        cache: &mut BitCache<R>,
    ) -> Result<GeneratedKey> {
        sample_key(&self.charset, self.plan.char_count, cache)
    }

    /// Generate `count` keys sharing one cache.
    pub fn generate_batch(&self, count: usize) -> Result<Vec<GeneratedKey>> {
        let mut cache = BitCache::new();
        (0..count).map(|_| self.generate_with(&mut cache)).collect()
    }
}
