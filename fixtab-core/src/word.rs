use fixtab_math::BitVector;

use crate::encoder::EncodeError;

/// Total width of an encoded coefficient.
pub const WORD_WIDTH: usize = 32;
/// Bits below the sign bit.
pub const MAGNITUDE_BITS: u32 = 31;

/// 32-bit coefficient word: sign indicator at bit 31, 31 magnitude bits below it.
///
/// How the sign and magnitude combine into a real value depends on the
/// [`SignEncoding`](crate::SignEncoding) that produced the word; see
/// [`FixedPointEncoder::decode`](crate::FixedPointEncoder::decode).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixedPointWord {
    sign: bool,
    magnitude: BitVector,
}

impl FixedPointWord {
    pub fn new(sign: bool, magnitude: BitVector) -> Result<Self, EncodeError> {
        if magnitude.width() != MAGNITUDE_BITS as usize {
            return Err(EncodeError::MagnitudeWidth(magnitude.width()));
        }
        Ok(Self { sign, magnitude })
    }

    /// Split a raw 32-bit pattern into sign and magnitude.
    pub fn from_raw(raw: u32) -> Result<Self, EncodeError> {
        let magnitude =
            BitVector::from_word(u64::from(raw & 0x7FFF_FFFF), MAGNITUDE_BITS as usize)?;
        Ok(Self {
            sign: raw >> 31 == 1,
            magnitude,
        })
    }

    pub fn sign(&self) -> bool {
        self.sign
    }

    pub fn magnitude(&self) -> &BitVector {
        &self.magnitude
    }

    /// Raw 32-bit pattern.
    pub fn raw(&self) -> u32 {
        (u32::from(self.sign) << 31) | self.magnitude.to_word() as u32
    }

    /// The full word as a 32-bit vector, sign first.
    pub fn to_bits(&self) -> Result<BitVector, EncodeError> {
        Ok(BitVector::from_word(u64::from(self.raw()), WORD_WIDTH)?)
    }

    /// Eight uppercase hex digits, most-significant nibble first.
    pub fn to_hex(&self) -> String {
        format!("{:0width$X}", self.raw(), width = WORD_WIDTH / 4)
    }
}
