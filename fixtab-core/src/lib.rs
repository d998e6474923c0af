//! # fixtab-core
//!
//! Coefficient encoding and table rendering on top of [`fixtab_math`].
//!
//! - [`FixedPointEncoder`]: signed coefficient → 32-bit [`FixedPointWord`] → `"XXXXXXXX",`
//! - [`SignEncoding`]: the sign conventions the encoder can dispatch to
//!   ([`OffsetMagnitude`], [`TwosComplement`], [`SignMagnitude`])
//! - [`BitWidthTruncator`]: keep the most-significant characters of a binary literal
//! - [`TableFormatter`] / [`TableWriter`]: quoting, commas and row wrapping
//! - [`stream`]: line-oriented drivers with a per-line [`ErrorPolicy`]

pub mod encoder;
pub mod format;
pub mod stream;
pub mod truncate;
pub mod word;

pub use encoder::{
    EncodeError, EncodingStrategy, FixedPointEncoder, OffsetMagnitude, SignEncoding,
    SignMagnitude, TwosComplement,
};
pub use format::{LiteralStyle, TableFormatter, TableWriter};
pub use stream::{encode_stream, truncate_stream, ErrorPolicy, StreamError, StreamReport};
pub use truncate::{BitWidthTruncator, TruncateError, DEFAULT_INPUT_WIDTH};
pub use word::{FixedPointWord, MAGNITUDE_BITS, WORD_WIDTH};
