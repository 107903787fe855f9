//! Primitive deserializers
//!
//! Inverse of the writers in [`super::write`]. Every reader consumes at
//! the buffer's read cursor; insufficient data fails with
//! `ReadPastEnd` and a first octet matching no varint prefix fails with
//! `MalformedVarInt`.

use super::{PREFIX_U32, PREFIX_U64};
use crate::buffer::DataBuffer;
use crate::error::WireError;
use crate::half::f16_to_f32;

pub fn read_u8(buf: &mut DataBuffer) -> Result<u8, WireError> {
    buf.read_u8()
}

pub fn read_u16(buf: &mut DataBuffer) -> Result<u16, WireError> {
    buf.read_u16()
}

pub fn read_u32(buf: &mut DataBuffer) -> Result<u32, WireError> {
    buf.read_u32()
}

pub fn read_u64(buf: &mut DataBuffer) -> Result<u64, WireError> {
    buf.read_u64()
}

pub fn read_i8(buf: &mut DataBuffer) -> Result<i8, WireError> {
    Ok(buf.read_u8()? as i8)
}

pub fn read_i16(buf: &mut DataBuffer) -> Result<i16, WireError> {
    Ok(buf.read_u16()? as i16)
}

pub fn read_i32(buf: &mut DataBuffer) -> Result<i32, WireError> {
    Ok(buf.read_u32()? as i32)
}

pub fn read_i64(buf: &mut DataBuffer) -> Result<i64, WireError> {
    Ok(buf.read_u64()? as i64)
}

pub fn read_f32(buf: &mut DataBuffer) -> Result<f32, WireError> {
    buf.read_f32()
}

pub fn read_f64(buf: &mut DataBuffer) -> Result<f64, WireError> {
    buf.read_f64()
}

/// Read two octets big-endian and widen from binary16.
pub fn read_f16(buf: &mut DataBuffer) -> Result<f32, WireError> {
    Ok(f16_to_f32(buf.read_u16()?))
}

/// Any nonzero octet reads as `true`; round trips canonicalize to `0x01`.
pub fn read_bool(buf: &mut DataBuffer) -> Result<bool, WireError> {
    Ok(buf.read_u8()? != 0)
}

/// Read an unsigned variable-length integer in any of the five shapes.
pub fn read_varuint(buf: &mut DataBuffer) -> Result<u64, WireError> {
    let first = buf.read_u8()?;

    if first & 0b1000_0000 == 0 {
        return Ok((first & 0b0111_1111) as u64);
    }

    if first & 0b1100_0000 == 0b1000_0000 {
        let low = buf.read_u8()?;
        return Ok((((first & 0b0011_1111) as u64) << 8) | low as u64);
    }

    if first & 0b1110_0000 == 0b1100_0000 {
        let low = buf.read_u16()?;
        return Ok((((first & 0b0001_1111) as u64) << 16) | low as u64);
    }

    if first == PREFIX_U32 {
        return Ok(buf.read_u32()? as u64);
    }

    if first == PREFIX_U64 {
        return buf.read_u64();
    }

    Err(WireError::MalformedVarInt(first))
}

/// Read a signed variable-length integer, sign-extending the payload
/// from its 7/14/21/32/64-bit width.
pub fn read_varint(buf: &mut DataBuffer) -> Result<i64, WireError> {
    let first = buf.read_u8()?;

    if first & 0b1000_0000 == 0 {
        let raw = (first & 0b0111_1111) as i64;
        return Ok(raw << 57 >> 57);
    }

    if first & 0b1100_0000 == 0b1000_0000 {
        let low = buf.read_u8()?;
        let raw = ((((first & 0b0011_1111) as u16) << 8) | low as u16) as i64;
        return Ok(raw << 50 >> 50);
    }

    if first & 0b1110_0000 == 0b1100_0000 {
        let low = buf.read_u16()?;
        let raw = ((((first & 0b0001_1111) as u32) << 16) | low as u32) as i64;
        return Ok(raw << 43 >> 43);
    }

    if first == PREFIX_U32 {
        return Ok(buf.read_u32()? as i32 as i64);
    }

    if first == PREFIX_U64 {
        return Ok(buf.read_u64()? as i64);
    }

    Err(WireError::MalformedVarInt(first))
}

/// Length-prefixed UTF-8 content. Invalid UTF-8 is an error; callers
/// that need arbitrary octets use [`read_blob`].
pub fn read_string(buf: &mut DataBuffer) -> Result<String, WireError> {
    String::from_utf8(read_blob(buf)?).map_err(|_| WireError::InvalidString)
}

/// Length-prefixed opaque octets.
pub fn read_blob(buf: &mut DataBuffer) -> Result<Vec<u8>, WireError> {
    let len = read_varuint(buf)?;
    let len = usize::try_from(len).map_err(|_| WireError::ReadPastEnd)?;
    buf.read_vec(len)
}
