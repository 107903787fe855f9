//! Primitive serializers
//!
//! Every writer appends to the buffer and returns the octet count it
//! produces. Run against a sink buffer, nothing is stored but the count
//! is identical, which is how body lengths are precomputed before a
//! framed write.

use super::{PREFIX_U32, PREFIX_U64};
use crate::buffer::DataBuffer;
use crate::error::WireError;
use crate::half::f32_to_f16;

pub fn write_u8(buf: &mut DataBuffer, value: u8) -> Result<usize, WireError> {
    buf.append_u8(value)?;
    Ok(1)
}

pub fn write_u16(buf: &mut DataBuffer, value: u16) -> Result<usize, WireError> {
    buf.append_u16(value)?;
    Ok(2)
}

pub fn write_u32(buf: &mut DataBuffer, value: u32) -> Result<usize, WireError> {
    buf.append_u32(value)?;
    Ok(4)
}

pub fn write_u64(buf: &mut DataBuffer, value: u64) -> Result<usize, WireError> {
    buf.append_u64(value)?;
    Ok(8)
}

pub fn write_i8(buf: &mut DataBuffer, value: i8) -> Result<usize, WireError> {
    write_u8(buf, value as u8)
}

pub fn write_i16(buf: &mut DataBuffer, value: i16) -> Result<usize, WireError> {
    write_u16(buf, value as u16)
}

pub fn write_i32(buf: &mut DataBuffer, value: i32) -> Result<usize, WireError> {
    write_u32(buf, value as u32)
}

pub fn write_i64(buf: &mut DataBuffer, value: i64) -> Result<usize, WireError> {
    write_u64(buf, value as u64)
}

pub fn write_f32(buf: &mut DataBuffer, value: f32) -> Result<usize, WireError> {
    buf.append_f32(value)?;
    Ok(4)
}

pub fn write_f64(buf: &mut DataBuffer, value: f64) -> Result<usize, WireError> {
    buf.append_f64(value)?;
    Ok(8)
}

/// Narrow to binary16 and write the two octets big-endian.
pub fn write_f16(buf: &mut DataBuffer, value: f32) -> Result<usize, WireError> {
    buf.append_u16(f32_to_f16(value))?;
    Ok(2)
}

/// Booleans always canonicalize to `0x01` / `0x00` on the wire.
pub fn write_bool(buf: &mut DataBuffer, value: bool) -> Result<usize, WireError> {
    buf.append_u8(u8::from(value))?;
    Ok(1)
}

/// Write an unsigned variable-length integer in its narrowest shape.
pub fn write_varuint(buf: &mut DataBuffer, value: u64) -> Result<usize, WireError> {
    if value <= 0x7f {
        buf.append_u8(value as u8)?;
        return Ok(1);
    }

    if value <= 0x3fff {
        buf.append_u16(value as u16 | 0x8000)?;
        return Ok(2);
    }

    if value <= 0x001f_ffff {
        let v = value as u32 | 0x00c0_0000;
        buf.append_u8((v >> 16) as u8)?;
        buf.append_u16(v as u16)?;
        return Ok(3);
    }

    if value <= 0xffff_ffff {
        buf.append_u8(PREFIX_U32)?;
        buf.append_u32(value as u32)?;
        return Ok(5);
    }

    buf.append_u8(PREFIX_U64)?;
    buf.append_u64(value)?;
    Ok(9)
}

/// Write a signed variable-length integer in the narrowest shape whose
/// two's-complement payload range contains the value.
pub fn write_varint(buf: &mut DataBuffer, value: i64) -> Result<usize, WireError> {
    if (-0x40..0x40).contains(&value) {
        buf.append_u8(value as u8 & 0x7f)?;
        return Ok(1);
    }

    if (-0x2000..0x2000).contains(&value) {
        buf.append_u16((value as u16 & 0x3fff) | 0x8000)?;
        return Ok(2);
    }

    if (-0x0010_0000..0x0010_0000).contains(&value) {
        let v = (value as u32 & 0x001f_ffff) | 0x00c0_0000;
        buf.append_u8((v >> 16) as u8)?;
        buf.append_u16(v as u16)?;
        return Ok(3);
    }

    if (-0x8000_0000..0x8000_0000).contains(&value) {
        buf.append_u8(PREFIX_U32)?;
        buf.append_u32(value as u32)?;
        return Ok(5);
    }

    buf.append_u8(PREFIX_U64)?;
    buf.append_u64(value as u64)?;
    Ok(9)
}

/// Length-prefixed UTF-8 content.
pub fn write_string(buf: &mut DataBuffer, value: &str) -> Result<usize, WireError> {
    write_blob(buf, value.as_bytes())
}

/// Length-prefixed opaque octets.
pub fn write_blob(buf: &mut DataBuffer, value: &[u8]) -> Result<usize, WireError> {
    let written = write_varuint(buf, value.len() as u64)?;
    buf.append_bytes(value)?;
    Ok(written + value.len())
}
