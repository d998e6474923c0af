//! Fixed-point constant tables for HDL synthesis flows.
//!
//! Umbrella crate over the workspace libraries:
//!
//! - [`math`]: greedy bit quantization into MSB-first [`BitVector`](math::BitVector)s
//! - [`core`]: 32-bit coefficient words, literal truncation, table layout and line streaming
//! - [`lut`]: probability-density lookup tables

pub use fixtab_core as core;
pub use fixtab_lut as lut;
pub use fixtab_math as math;

pub use fixtab_core::{
    BitWidthTruncator, EncodingStrategy, ErrorPolicy, FixedPointEncoder, TableFormatter,
};
pub use fixtab_lut::{LookupTable, LutBuilder, LutConfig};
pub use fixtab_math::{BitQuantizer, BitVector, OverflowPolicy};
