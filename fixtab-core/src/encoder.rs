use std::num::ParseFloatError;

use fixtab_math::{quantize_bits, OverflowPolicy, QuantizeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::word::{FixedPointWord, MAGNITUDE_BITS};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    #[error("cannot parse {input:?} as a decimal coefficient: {source}")]
    Parse {
        input: String,
        source: ParseFloatError,
    },
    #[error("coefficient {0} outside [-1, 1]")]
    OutOfRange(f64),
    #[error("magnitude must be {expected} bits, got {0}", expected = MAGNITUDE_BITS)]
    MagnitudeWidth(usize),
    #[error("Quantize error: {0}")]
    Quantize(#[from] QuantizeError),
}

/// Sign convention for packing a coefficient in [-1, 1] into a [`FixedPointWord`].
///
/// Implementations receive values already range-checked by [`FixedPointEncoder`].
pub trait SignEncoding {
    fn encode(&self, coefficient: f64, policy: OverflowPolicy)
        -> Result<FixedPointWord, EncodeError>;

    /// Real value represented by `word` under this convention.
    fn decode(&self, word: &FixedPointWord) -> f64;
}

/// Negative `c` stores `1 - |c|` under a set sign bit.
///
/// This is the layout existing coefficient tables were generated with. With
/// the magnitude read as a fraction of 1.0 it matches two's complement up to
/// the rounding of `1 - |c|` in floating point.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetMagnitude;

impl SignEncoding for OffsetMagnitude {
    fn encode(
        &self,
        coefficient: f64,
        policy: OverflowPolicy,
    ) -> Result<FixedPointWord, EncodeError> {
        if coefficient < 0.0 {
            let magnitude = quantize_bits(1.0 - coefficient.abs(), MAGNITUDE_BITS, policy)?;
            FixedPointWord::new(true, magnitude)
        } else {
            let magnitude = quantize_bits(coefficient, MAGNITUDE_BITS, policy)?;
            FixedPointWord::new(false, magnitude)
        }
    }

    fn decode(&self, word: &FixedPointWord) -> f64 {
        let m = word.magnitude().to_fraction();
        if word.sign() {
            m - 1.0
        } else {
            m
        }
    }
}

/// Q1.31 two's complement: `floor(c * 2^31)` as a signed 32-bit integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwosComplement;

const Q31_SCALE: f64 = 2147483648.0; // 2^31

impl SignEncoding for TwosComplement {
    fn encode(
        &self,
        coefficient: f64,
        _policy: OverflowPolicy,
    ) -> Result<FixedPointWord, EncodeError> {
        // +1.0 has no Q1.31 code; clamp to the largest positive word like the greedy path
        let scaled = (coefficient * Q31_SCALE).floor() as i64;
        let raw = scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        FixedPointWord::from_raw(raw as u32)
    }

    fn decode(&self, word: &FixedPointWord) -> f64 {
        f64::from(word.raw() as i32) / Q31_SCALE
    }
}

/// Sign bit plus `|c|` quantized directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignMagnitude;

impl SignEncoding for SignMagnitude {
    fn encode(
        &self,
        coefficient: f64,
        policy: OverflowPolicy,
    ) -> Result<FixedPointWord, EncodeError> {
        let magnitude = quantize_bits(coefficient.abs(), MAGNITUDE_BITS, policy)?;
        FixedPointWord::new(coefficient < 0.0, magnitude)
    }

    fn decode(&self, word: &FixedPointWord) -> f64 {
        let m = word.magnitude().to_fraction();
        if word.sign() {
            -m
        } else {
            m
        }
    }
}

/// Encoding strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingStrategy {
    /// Negative values stored as `1 - |c|` (existing tables)
    #[default]
    OffsetMagnitude,
    /// Standard Q1.31
    TwosComplement,
    SignMagnitude,
}

impl EncodingStrategy {
    pub fn description(&self) -> &'static str {
        match self {
            EncodingStrategy::OffsetMagnitude => "offset-magnitude (sign + 1-|c|)",
            EncodingStrategy::TwosComplement => "two's complement Q1.31",
            EncodingStrategy::SignMagnitude => "sign-magnitude (sign + |c|)",
        }
    }
}

/// Encodes signed coefficients into 32-bit words and hex literals.
///
/// # Example
/// ```
/// use fixtab_core::{EncodingStrategy, FixedPointEncoder};
/// use fixtab_math::OverflowPolicy;
///
/// let encoder = FixedPointEncoder::new(EncodingStrategy::OffsetMagnitude, OverflowPolicy::Saturate);
/// assert_eq!(encoder.encode(-0.5).unwrap().to_hex(), "C0000000");
/// assert_eq!(encoder.encode_line("1.0").unwrap(), "7FFFFFFF");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPointEncoder {
    strategy: EncodingStrategy,
    policy: OverflowPolicy,
}

impl FixedPointEncoder {
    pub fn new(strategy: EncodingStrategy, policy: OverflowPolicy) -> Self {
        Self { strategy, policy }
    }

    pub fn strategy(&self) -> EncodingStrategy {
        self.strategy
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Encode one coefficient.
    ///
    /// Under [`OverflowPolicy::Saturate`] coefficients are clamped to [-1, 1];
    /// under [`OverflowPolicy::Reject`] anything outside is an error.
    pub fn encode(&self, coefficient: f64) -> Result<FixedPointWord, EncodeError> {
        if !coefficient.is_finite() {
            return Err(QuantizeError::NonFinite(coefficient).into());
        }
        let coefficient = match self.policy {
            OverflowPolicy::Saturate => coefficient.clamp(-1.0, 1.0),
            OverflowPolicy::Reject if !(-1.0..=1.0).contains(&coefficient) => {
                return Err(EncodeError::OutOfRange(coefficient));
            }
            OverflowPolicy::Reject => coefficient,
        };

        match self.strategy {
            EncodingStrategy::OffsetMagnitude => OffsetMagnitude.encode(coefficient, self.policy),
            EncodingStrategy::TwosComplement => TwosComplement.encode(coefficient, self.policy),
            EncodingStrategy::SignMagnitude => SignMagnitude.encode(coefficient, self.policy),
        }
    }

    pub fn decode(&self, word: &FixedPointWord) -> f64 {
        match self.strategy {
            EncodingStrategy::OffsetMagnitude => OffsetMagnitude.decode(word),
            EncodingStrategy::TwosComplement => TwosComplement.decode(word),
            EncodingStrategy::SignMagnitude => SignMagnitude.decode(word),
        }
    }

    /// Parse one decimal literal and return the word's hex digits (unquoted).
    pub fn encode_line(&self, line: &str) -> Result<String, EncodeError> {
        let text = line.trim();
        let coefficient: f64 = text.parse().map_err(|source| EncodeError::Parse {
            input: text.to_string(),
            source,
        })?;
        Ok(self.encode(coefficient)?.to_hex())
    }
}
