//! Keygen — random keys from arbitrary character sets.
//!
//! Generates tokens, identifiers and cookie values from a caller-supplied
//! charset, sized either by an explicit character count or by a minimum
//! entropy in bits. Characters are drawn by rejection sampling over bits
//! cached from the operating system's cryptographic random source, so
//! every member of the charset is exactly equally likely.
//!
//! ```no_run
//! use keygen::{KeyBuilder, Preset};
//!
//! let request = KeyBuilder::new().preset(Preset::Base58).min_entropy(160).build()?;
//! let key = request.generate()?;
//! assert_eq!(key.char_count(), 27);
//! # Ok::<(), keygen::KeygenError>(())
//! ```

pub mod bits;
pub mod charset;
pub mod error;
pub mod generate;
pub mod key;
pub mod request;


// Re-export primary types
pub use bits::{BitCache, MAX_DRAW_BITS};
pub use charset::{check_size, Charset, Preset, BASE58, BASE62, MAX_CHARSET_SIZE, RFC6265};
pub use error::{KeygenError, Result};
pub use generate::sample_key;
pub use key::GeneratedKey;
pub use request::{
    resolve_length, KeyBuilder, KeyConfig, KeyRequest, LengthPlan, Sizing, MAX_KEY_LENGTH,
};
