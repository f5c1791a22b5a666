//! Cached random bit extraction.
//!
//! [`BitCache`] amortizes calls into the cryptographic byte source: one
//! 8-byte refill serves several narrow draws (ten 6-bit draws, for
//! example) before the source is touched again.
//!
//! A cache is a plain owned value. It is `Send` but mutated on every
//! draw, so sharing one between threads needs external synchronization;
//! the usual pattern is one cache per generation call.

use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{KeygenError, Result};

/// Widest draw a single [`BitCache::take`] serves.
pub const MAX_DRAW_BITS: u32 = 18;

const CACHE_BITS: u32 = u64::BITS;

/// A 64-bit buffer of random bits over a cryptographic byte source.
///
/// Bits are consumed low to high from a little-endian refill. Each bit
/// is handed out at most once; bits left over when a draw does not fit
/// are dropped with the old buffer.
pub struct BitCache<R: RngCore + CryptoRng = OsRng> {
    source: R,
    cache: u64,
    cursor: u32,
    refills: u64,
}

impl BitCache<OsRng> {
    /// A cache over the operating system's random source.
    pub fn new() -> Self {
        Self::with_source(OsRng)
    }
}

impl Default for BitCache<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> BitCache<R> {
    /// A cache over `source`. The first draw always triggers a refill.
    pub fn with_source(source: R) -> Self {
        Self {
            source,
            cache: 0,
            cursor: CACHE_BITS,
            refills: 0,
        }
    }

    /// Take `n` uniformly random bits as the low bits of a `u32`.
    ///
    /// `n` must be in `1..=MAX_DRAW_BITS`. Fails with
    /// [`KeygenError::EntropySourceUnavailable`] if a refill is needed
    /// and the source cannot supply bytes; the cache is left exhausted.
    pub fn take(&mut self, n: u32) -> Result<u32> {
        if n == 0 || n > MAX_DRAW_BITS {
            return Err(KeygenError::InvalidBitWidth(n));
        }

        if self.cursor + n > CACHE_BITS {
            self.refill()?;
        }

        let bits = (self.cache >> self.cursor) & ((1u64 << n) - 1);
        self.cursor += n;

        Ok(bits as u32)
    }

    /// Number of times the source has been read.
    pub fn refills(&self) -> u64 {
        self.refills
    }

    /// Bits still unread in the current buffer.
    pub fn remaining(&self) -> u32 {
        CACHE_BITS - self.cursor
    }

    fn refill(&mut self) -> Result<()> {
        let mut buf = [0u8; 8];
        // Leave the cache exhausted so a failed refill is retried next draw.
        self.cache.zeroize();
        self.cursor = CACHE_BITS;

        self.source.try_fill_bytes(&mut buf)?;
        self.cache = u64::from_le_bytes(buf);
        self.cursor = 0;
        self.refills += 1;
        buf.zeroize();

        log::trace!("bit cache refilled (refill #{})", self.refills);
        Ok(())
    }
}

impl<R: RngCore + CryptoRng> Drop for BitCache<R> {
    fn drop(&mut self) {
        self.cache.zeroize();
    }
}
