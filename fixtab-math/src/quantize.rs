use serde::{Deserialize, Serialize};

use crate::{BitVector, QuantizeError};

/// Widest vector the quantizer produces.
pub const MAX_WIDTH: u32 = 64;

/// Value represented by "all bits set" plus one LSB. Inputs are fractions of this.
pub const FULL_SCALE: f64 = 1.0;

/// What to do with inputs outside `[0, FULL_SCALE]`.
///
/// Greedy thresholding saturates to all ones for anything at or above full scale, so
/// `Saturate` only makes that explicit (and maps negatives to zero). `Reject` reports
/// the out-of-range value instead. Non-finite values are an error under both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    #[default]
    Saturate,
    Reject,
}

impl OverflowPolicy {
    /// Apply the policy, returning the value the quantizer will decompose.
    pub fn check(self, value: f64) -> Result<f64, QuantizeError> {
        if !value.is_finite() {
            return Err(QuantizeError::NonFinite(value));
        }
        match self {
            OverflowPolicy::Saturate => Ok(value.clamp(0.0, FULL_SCALE)),
            OverflowPolicy::Reject => {
                if value < 0.0 {
                    Err(QuantizeError::Negative(value))
                } else if value > FULL_SCALE {
                    Err(QuantizeError::Overflow {
                        value,
                        full_scale: FULL_SCALE,
                    })
                } else {
                    Ok(value)
                }
            }
        }
    }
}

/// Greedy bit-by-bit quantization of `value` into `width` bits.
///
/// Bit `p` (counted from the LSB) weighs `2^p / 2^width`. From the MSB down, a bit is
/// set when the remainder is at least its weight, and the weight is subtracted. The
/// result is `floor(value * 2^width)` in binary, so decoding gives `r` with
/// `r <= value < r + 2^-width` for every value in `[0, 1)`.
///
/// Each subtraction is exact in `f64`: the remainder stays in `[w, 2w)` whenever a
/// weight `w` is taken.
pub fn quantize_bits(
    value: f64,
    width: u32,
    policy: OverflowPolicy,
) -> Result<BitVector, QuantizeError> {
    if width == 0 || width > MAX_WIDTH {
        return Err(QuantizeError::InvalidWidth(width as usize));
    }
    let mut remainder = policy.check(value)?;

    let full_scale = 2f64.powi(width as i32);
    let mut bits = Vec::with_capacity(width as usize);
    for position in (0..width).rev() {
        let weight = 2f64.powi(position as i32) / full_scale;
        if remainder >= weight {
            bits.push(true);
            remainder -= weight;
        } else {
            bits.push(false);
        }
    }

    BitVector::from_msb_first(bits)
}

/// Quantizer bound to one word width and overflow policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitQuantizer {
    width: u32,
    policy: OverflowPolicy,
}

impl BitQuantizer {
    pub fn new(width: u32, policy: OverflowPolicy) -> Result<Self, QuantizeError> {
        if width == 0 || width > MAX_WIDTH {
            return Err(QuantizeError::InvalidWidth(width as usize));
        }
        Ok(Self { width, policy })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub fn quantize(&self, value: f64) -> Result<BitVector, QuantizeError> {
        quantize_bits(value, self.width, self.policy)
    }

    /// Weight of the least-significant bit, `2^-width`.
    pub fn lsb(&self) -> f64 {
        2f64.powi(-(self.width as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_all_zeros() {
        let bits = quantize_bits(0.0, 12, OverflowPolicy::Saturate).unwrap();
        assert_eq!(bits.to_binary_string(), "000000000000");

        let bits = quantize_bits(-0.0, 12, OverflowPolicy::Reject).unwrap();
        assert_eq!(bits.count_ones(), 0);
    }

    #[test]
    fn test_dyadic_values_exact() {
        let q = BitQuantizer::new(4, OverflowPolicy::Reject).unwrap();
        assert_eq!(q.quantize(0.5).unwrap().to_binary_string(), "1000");
        assert_eq!(q.quantize(0.25).unwrap().to_binary_string(), "0100");
        assert_eq!(q.quantize(0.8125).unwrap().to_binary_string(), "1101");
        assert_eq!(q.quantize(0.0625).unwrap().to_binary_string(), "0001");
    }

    #[test]
    fn test_floor_not_round() {
        // 0.09 * 16 = 1.44 -> 1; 0.12 * 16 = 1.92 -> 1 (rounding would give 2)
        let q = BitQuantizer::new(4, OverflowPolicy::Reject).unwrap();
        assert_eq!(q.quantize(0.09).unwrap().to_word(), 1);
        assert_eq!(q.quantize(0.12).unwrap().to_word(), 1);
        // just under one LSB
        assert_eq!(q.quantize(0.0624).unwrap().to_word(), 0);
    }

    #[test]
    fn test_full_scale_saturates_to_all_ones() {
        let bits = quantize_bits(1.0, 31, OverflowPolicy::Saturate).unwrap();
        assert_eq!(bits.to_word(), (1 << 31) - 1);

        // 1.0 is inside the accepted range under Reject as well
        let bits = quantize_bits(1.0, 31, OverflowPolicy::Reject).unwrap();
        assert_eq!(bits.count_ones(), 31);

        let bits = quantize_bits(7.5, 8, OverflowPolicy::Saturate).unwrap();
        assert_eq!(bits.to_word(), 0xFF);
    }

    #[test]
    fn test_reject_policy() {
        assert_eq!(
            quantize_bits(1.5, 8, OverflowPolicy::Reject),
            Err(QuantizeError::Overflow {
                value: 1.5,
                full_scale: FULL_SCALE
            })
        );
        assert_eq!(
            quantize_bits(-0.25, 8, OverflowPolicy::Reject),
            Err(QuantizeError::Negative(-0.25))
        );
    }

    #[test]
    fn test_saturate_negative_to_zero() {
        let bits = quantize_bits(-0.25, 8, OverflowPolicy::Saturate).unwrap();
        assert_eq!(bits.to_word(), 0);
    }

    #[test]
    fn test_non_finite_always_rejected() {
        for policy in [OverflowPolicy::Saturate, OverflowPolicy::Reject] {
            assert!(matches!(
                quantize_bits(f64::NAN, 8, policy),
                Err(QuantizeError::NonFinite(_))
            ));
            assert!(matches!(
                quantize_bits(f64::INFINITY, 8, policy),
                Err(QuantizeError::NonFinite(_))
            ));
        }
    }

    #[test]
    fn test_invalid_width() {
        assert_eq!(
            BitQuantizer::new(0, OverflowPolicy::Saturate),
            Err(QuantizeError::InvalidWidth(0))
        );
        assert_eq!(
            quantize_bits(0.5, 65, OverflowPolicy::Saturate),
            Err(QuantizeError::InvalidWidth(65))
        );
    }

    #[test]
    fn test_lut_peak_value() {
        // Standard normal peak 1/sqrt(2*pi) ~= 0.398942 -> floor(0.398942 * 4096) = 1634
        let peak = 1.0 / (2.0 * std::f64::consts::PI).sqrt();
        let bits = quantize_bits(peak, 12, OverflowPolicy::Saturate).unwrap();
        assert_eq!(bits.to_word(), 1634);
        assert_eq!(bits.to_binary_string(), "011001100010");
    }
}
