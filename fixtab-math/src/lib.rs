//! # fixtab-math
//!
//! Greedy fixed-point quantization for HDL constant tables.
//!
//! This crate provides [`BitVector`], an MSB-first sequence of bits with a width fixed
//! at construction, and [`BitQuantizer`], which turns a bounded non-negative real into
//! an N-bit binary fraction by testing decreasing powers of two.
//!
//! Full scale is always `2^N` for an N-bit vector: bit `p` weighs `2^p / 2^N`, so the
//! quantizer is a floor of the value's binary expansion to N fractional bits.
//!
//! **No external dependencies** besides `thiserror` for error types and `serde` for the
//! policy enum, so the arithmetic is auditable in isolation.

pub mod bits;
pub mod quantize;

pub use bits::BitVector;
pub use quantize::{quantize_bits, BitQuantizer, OverflowPolicy, FULL_SCALE, MAX_WIDTH};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantizeError {
    #[error("invalid bit width {0} (must be 1..={max})", max = MAX_WIDTH)]
    InvalidWidth(usize),
    #[error("value {0} is not finite")]
    NonFinite(f64),
    #[error("value {value} exceeds full scale {full_scale}")]
    Overflow { value: f64, full_scale: f64 },
    #[error("value {0} is negative")]
    Negative(f64),
}
