//! Address Decoder.
//!
//! Splits a 32-bit address into its tag, set, and offset fields for a given
//! geometry. Decoding is a pure bit-field extraction: it holds no state and
//! is defined for every input. Shifts of 32 bits or more produce 0 instead
//! of overflowing.

use crate::common::addr::DecodedAddress;
use crate::config::CacheGeometry;

/// Returns a mask of the low `bits` bits, saturating at all ones.
#[inline(always)]
const fn low_mask(bits: u32) -> u32 {
    match 1u32.checked_shl(bits) {
        Some(bit) => bit - 1,
        None => u32::MAX,
    }
}

/// Shifts right, yielding 0 when every bit is shifted out.
#[inline(always)]
const fn shr(value: u32, bits: u32) -> u32 {
    match value.checked_shr(bits) {
        Some(v) => v,
        None => 0,
    }
}

/// Shifts left, yielding 0 when every bit is shifted out.
#[inline(always)]
const fn shl(value: u32, bits: u32) -> u32 {
    match value.checked_shl(bits) {
        Some(v) => v,
        None => 0,
    }
}

/// Extracts the tag, set, and offset fields of `address`.
///
/// * `set`: bits `[offset_bits, offset_bits + set_bits)`.
/// * `tag`: bits `[offset_bits + set_bits, 32)`.
/// * `offset`: bits `[0, offset_bits)`.
///
/// With `set_bits == 0` (fully associative) the set index is always 0.
pub const fn decode(address: u32, offset_bits: u32, set_bits: u32) -> DecodedAddress {
    DecodedAddress {
        tag: shr(address, offset_bits + set_bits),
        set: shr(address, offset_bits) & low_mask(set_bits),
        offset: address & low_mask(offset_bits),
    }
}

/// Reassembles an address from its fields; the inverse of [`decode`].
pub const fn reconstruct(
    tag: u32,
    set: u32,
    offset: u32,
    offset_bits: u32,
    set_bits: u32,
) -> u32 {
    shl(tag, offset_bits + set_bits)
        | shl(set & low_mask(set_bits), offset_bits)
        | (offset & low_mask(offset_bits))
}

/// Decoder bound to one cache geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressDecoder {
    offset_bits: u32,
    set_bits: u32,
}

impl AddressDecoder {
    /// Creates a decoder for the field widths of `geometry`.
    pub const fn new(geometry: &CacheGeometry) -> Self {
        Self {
            offset_bits: geometry.offset_bits,
            set_bits: geometry.set_bits,
        }
    }

    /// Decodes `address` under this decoder's geometry.
    #[inline(always)]
    pub const fn decode(&self, address: u32) -> DecodedAddress {
        decode(address, self.offset_bits, self.set_bits)
    }

    /// Width of the offset field.
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Width of the set field.
    pub const fn set_bits(&self) -> u32 {
        self.set_bits
    }
}
