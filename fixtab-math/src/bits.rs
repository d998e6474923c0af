use std::fmt;

use crate::{QuantizeError, MAX_WIDTH};

/// Fixed-width bit sequence, most-significant bit first.
///
/// Width is between 1 and [`MAX_WIDTH`] and never changes after construction.
/// Bit indices used by [`BitVector::bit`] follow hardware convention: index 0 is
/// the least-significant bit, index `width - 1` the most-significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitVector {
    bits: Vec<bool>,
}

fn check_width(width: usize) -> Result<(), QuantizeError> {
    if width == 0 || width > MAX_WIDTH as usize {
        return Err(QuantizeError::InvalidWidth(width));
    }
    Ok(())
}

impl BitVector {
    /// All-zero vector of the given width.
    pub fn zeros(width: usize) -> Result<Self, QuantizeError> {
        check_width(width)?;
        Ok(Self {
            bits: vec![false; width],
        })
    }

    /// Build from bits listed most-significant first.
    pub fn from_msb_first(bits: Vec<bool>) -> Result<Self, QuantizeError> {
        check_width(bits.len())?;
        Ok(Self { bits })
    }

    /// Low `width` bits of `word`. Higher bits are discarded.
    pub fn from_word(word: u64, width: usize) -> Result<Self, QuantizeError> {
        check_width(width)?;
        let bits = (0..width).rev().map(|i| (word >> i) & 1 == 1).collect();
        Ok(Self { bits })
    }

    /// New vector with `msb` placed above the current most-significant bit.
    pub fn with_leading(&self, msb: bool) -> Result<Self, QuantizeError> {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.push(msb);
        bits.extend_from_slice(&self.bits);
        Self::from_msb_first(bits)
    }

    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Bit at hardware index `index` (0 = LSB). Returns `None` past the width.
    pub fn bit(&self, index: usize) -> Option<bool> {
        let width = self.bits.len();
        if index >= width {
            return None;
        }
        Some(self.bits[width - 1 - index])
    }

    /// Bits most-significant first.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Unsigned integer value of the bits.
    pub fn to_word(&self) -> u64 {
        self.bits
            .iter()
            .fold(0u64, |acc, &b| (acc << 1) | u64::from(b))
    }

    /// Sum of the set-bit weights `2^p / 2^N`.
    pub fn to_fraction(&self) -> f64 {
        // MSB at list position i weighs 2^-(i+1)
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(|(i, _)| 2f64.powi(-(i as i32) - 1))
            .sum()
    }

    /// `0`/`1` characters, most-significant first.
    pub fn to_binary_string(&self) -> String {
        self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }

    /// Uppercase hex, most-significant nibble first.
    ///
    /// A width that is not a multiple of four is padded with leading zeros.
    pub fn to_hex_string(&self) -> String {
        let digits = self.bits.len().div_ceil(4);
        format!("{:0digits$X}", self.to_word(), digits = digits)
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_binary_string())
    }
}
