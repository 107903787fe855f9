//! IEEE-754 binary16 / binary32 conversion
//!
//! Velocity, rotation, and joint-transform components travel on the wire
//! as half-precision floats but are held in memory as ordinary `f32`
//! values. These two functions convert at the codec boundary.
//!
//! Narrowing rounds half-up: when the most significant discarded mantissa
//! bit is set, the result is bumped by one ULP. A bump that carries into
//! the infinity encoding is the correct result and is not special-cased.
//! Every NaN collapses to the canonical quiet NaN; infinities, signed
//! zeros, and subnormals convert exactly.
//!
//! Both functions are `const fn`, so conversions of literal values fold
//! at compile time.

/// Canonical binary16 quiet NaN (sign bit excluded)
const F16_NAN: u16 = 0x7E00;
/// binary16 infinity: exponent all ones, zero mantissa
const F16_INF: u16 = 0x7C00;
/// Canonical binary32 quiet NaN (sign bit excluded)
const F32_NAN: u32 = 0x7FC0_0000;
/// binary32 infinity
const F32_INF: u32 = 0x7F80_0000;

/// Narrow a binary32 value to its binary16 bit pattern.
pub const fn f32_to_f16(value: f32) -> u16 {
    let bits = value.to_bits();

    // Sign into bit 15, exponent and mantissa into their final widths
    let sign = ((bits & 0x8000_0000) >> 16) as u16;
    let exponent = (bits & 0x7f80_0000) >> 23;
    let mantissa = ((bits & 0x007f_ffff) >> 13) as u16;

    if exponent == 0xff {
        // Infinity carries a zero mantissa; anything else is a NaN
        return if bits & 0x007f_ffff == 0 {
            sign | F16_INF
        } else {
            sign | F16_NAN
        };
    }

    if exponent >= 113 && exponent <= 142 {
        // Within binary16 normal range: rebias and truncate
        let mut h = sign | ((exponent as u16 - 112) << 10) | mantissa;

        // Round up when the Msb of the truncated remainder is set.
        // This may carry into infinity, which is the correct result.
        if bits & 0x0000_1000 != 0 {
            h += 1;
        }
        h
    } else if exponent == 0 {
        // Zero, or a binary32 subnormal far below binary16 range
        sign
    } else if exponent <= 112 {
        // Representable only as a binary16 subnormal: restore the
        // implicit leading 1 and shift it down into the mantissa
        let m = ((mantissa as u32) | 0x0400) >> (113 - exponent);
        sign | m as u16
    } else {
        // Magnitude exceeds the binary16 range
        sign | F16_INF
    }
}

/// Widen a binary16 bit pattern to a binary32 value.
pub const fn f16_to_f32(half: u16) -> f32 {
    let bits = half as u32;

    let sign = (bits & 0x8000) << 16;
    let exponent = (bits & 0x7c00) >> 10;
    let mantissa = (bits & 0x03ff) << 13;

    if exponent == 0x1f {
        return f32::from_bits(if bits & 0x03ff == 0 {
            sign | F32_INF
        } else {
            sign | F32_NAN
        });
    }

    let out = if exponent != 0 {
        // Normal value: rebias, mantissa already in position
        sign | ((exponent + 112) << 23) | mantissa
    } else if mantissa == 0 {
        sign
    } else {
        // Subnormal: promote to a normal binary32 by shifting the
        // mantissa until its leading 1 becomes the implicit bit
        let mut m = bits & 0x03ff;
        let mut b = 0;

        // Msb position of the 10-bit mantissa, by binary search
        if m >= 1 << 8 {
            b += 8;
            m >>= 8;
        }
        if m >= 1 << 4 {
            b += 4;
            m >>= 4;
        }
        if m >= 1 << 2 {
            b += 2;
            m >>= 2;
        }
        if m >= 1 << 1 {
            b += 1;
        }

        let mantissa = (mantissa << (10 - b)) & 0x007f_ffff;
        let exponent = 113 - (10 - b);

        sign | (exponent << 23) | mantissa
    };

    f32::from_bits(out)
}
