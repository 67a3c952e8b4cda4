//! Bit-mask arithmetic over fixed-width unsigned integers.
//!
//! Every helper works on a `u128` carrier wide enough for any supported
//! storage type and is a `const fn`, so masks for static layouts are folded
//! at compile time. Out-of-range offsets or widths panic, which turns into a
//! compile error wherever the arguments are constants.
//!
//! ## Layout
//!
//! Offsets are counted from the least significant bit unless the parameter
//! name says `offset_from_msb`. A field of `width` bits at `offset` occupies
//! bits `offset..offset + width`.

/// Bit width of the carrier used for all mask arithmetic.
pub const CARRIER_BITS: u32 = u128::BITS;

/// Mask with the low `n` bits set.
///
/// # Panics
/// Panics if `n > 128`.
#[inline]
pub const fn low_ones(n: u32) -> u128 {
    assert!(n <= CARRIER_BITS, "mask wider than the carrier");
    if n == 0 { 0 } else { u128::MAX >> (CARRIER_BITS - n) }
}

/// Mask isolating a field of `width` bits sitting `offset` bits above bit 0
/// of a `total_bits` wide integer.
///
/// # Panics
/// Panics if `total_bits > 128` or `offset + width > total_bits`.
#[inline]
pub const fn field_mask(total_bits: u32, offset: u32, width: u32) -> u128 {
    assert!(total_bits <= CARRIER_BITS, "storage wider than the carrier");
    assert!(offset + width <= total_bits, "field exceeds storage width");
    if width == 0 {
        return 0;
    }
    low_ones(width) << offset
}

/// Complement of [`field_mask`] confined to `total_bits`.
///
/// Built as `1…1 | 0…0 | 1…1`: a prefix of ones above the field, a run of
/// `width` zeros, and `offset` ones below it.
///
/// # Panics
/// Same conditions as [`field_mask`].
#[inline]
pub const fn complement_mask(total_bits: u32, offset: u32, width: u32) -> u128 {
    assert!(total_bits <= CARRIER_BITS, "storage wider than the carrier");
    assert!(offset + width <= total_bits, "field exceeds storage width");
    let prefix = total_bits - width - offset;
    let high = if prefix == 0 {
        0
    } else {
        low_ones(prefix) << (offset + width)
    };
    high | low_ones(offset)
}

/// Convert an MSB-relative field position to an LSB-relative offset.
#[inline]
pub const fn lsb_offset(total_bits: u32, offset_from_msb: u32, width: u32) -> u32 {
    assert!(offset_from_msb + width <= total_bits, "field exceeds storage width");
    total_bits - offset_from_msb - width
}

/// Place `value` into the field at `offset_from_msb`, truncated to `width`.
///
/// Bits of `value` above `width` are dropped, never spilled into the
/// neighbouring field.
#[inline]
pub const fn place_field(total_bits: u32, offset_from_msb: u32, width: u32, value: u128) -> u128 {
    let offset = lsb_offset(total_bits, offset_from_msb, width);
    if width == 0 {
        return 0;
    }
    (value << offset) & field_mask(total_bits, offset, width)
}

/// Extract the field of `width` bits at `offset` (LSB-relative), shifted down
/// to bit 0.
#[inline]
pub const fn extract_field(bits: u128, offset: u32, width: u32) -> u128 {
    if width == 0 {
        return 0;
    }
    (bits & field_mask(CARRIER_BITS, offset, width)) >> offset
}

/// Read slot `index` of a container partitioned into `slot_bits` wide slots.
#[inline]
pub const fn slot(container: u128, slot_bits: u32, index: u32) -> u128 {
    extract_field(container, slot_bits * index, slot_bits)
}

/// Overwrite slot `index` with `value`, leaving every other slot untouched.
#[inline]
pub const fn with_slot(container: u128, slot_bits: u32, index: u32, value: u128) -> u128 {
    let offset = slot_bits * index;
    let mask = field_mask(CARRIER_BITS, offset, slot_bits);
    (container & !mask) | ((value << offset) & mask)
}
