//! Object decoding
//!
//! Reads a record's tag, dispatches to the matching body decoder, and
//! lets the declared body length dominate: octets beyond the fields a
//! decoder understands are skipped, consuming more than declared is a
//! hard error. Unrecognized tags become [`UnknownObject`]s that carry
//! their body verbatim.

use tracing::{debug, trace};

use crate::buffer::DataBuffer;
use crate::error::WireError;
use crate::types::{
    Finger, GsObject, Hand1, Hand2, Head1, HeadIpd1, Loc1, Loc2, Mesh1, Norm1, Object1, Rot1,
    Rot2, Tag, TextureUv1, Thumb, Transform1, UnknownObject,
};
use crate::wire::{read_blob, read_bool, read_f16, read_f32, read_u16, read_varuint};

/// Decode every remaining record in the buffer, in stream order.
pub fn decode_objects(buf: &mut DataBuffer) -> Result<Vec<GsObject>, WireError> {
    let mut objects = Vec::new();

    while buf.remaining() > 0 {
        objects.push(decode_object(buf)?);
    }

    Ok(objects)
}

/// Decode the next record at the buffer's read cursor.
pub fn decode_object(buf: &mut DataBuffer) -> Result<GsObject, WireError> {
    let raw_tag = read_varuint(buf)?;

    if raw_tag == 0 {
        return Err(WireError::InvalidTagOnDecode);
    }

    match Tag::from_raw(raw_tag) {
        Some(Tag::Head1) => Ok(GsObject::Head1(decode_head1(buf)?)),
        Some(Tag::Hand1) => Ok(GsObject::Hand1(decode_hand1(buf)?)),
        Some(Tag::Object1) => Ok(GsObject::Object1(decode_object1(buf)?)),
        Some(Tag::Mesh1) => Ok(GsObject::Mesh1(decode_mesh1(buf)?)),
        Some(Tag::Hand2) => Ok(GsObject::Hand2(decode_hand2(buf)?)),
        Some(Tag::HeadIpd1) => Ok(GsObject::HeadIpd1(decode_head_ipd1(buf)?)),
        None => {
            debug!(tag = raw_tag, "preserving object with unrecognized tag");
            let data = read_blob(buf)?;
            Ok(GsObject::Unknown(UnknownObject { tag: raw_tag, data }))
        }
    }
}

/// Read a declared body length, rejecting zero: every recognized object
/// has at least one required field.
fn read_body_len(buf: &mut DataBuffer) -> Result<u64, WireError> {
    let declared = read_varuint(buf)?;
    if declared == 0 {
        return Err(WireError::LengthMismatch {
            declared: 0,
            consumed: 0,
        });
    }
    Ok(declared)
}

fn consumed_since(buf: &DataBuffer, body_start: usize) -> u64 {
    (buf.read_pos() - body_start) as u64
}

/// Close out a body: error on overrun, skip whatever the declared
/// length covers beyond the fields we understood.
fn finish_body(buf: &mut DataBuffer, body_start: usize, declared: u64) -> Result<(), WireError> {
    let consumed = consumed_since(buf, body_start);

    if consumed > declared {
        return Err(WireError::LengthMismatch { declared, consumed });
    }

    if consumed < declared {
        let skip = declared - consumed;
        trace!(octets = skip, "skipping unrecognized octets in object body");
        buf.advance_read(usize::try_from(skip).map_err(|_| WireError::ReadPastEnd)?)?;
    }

    Ok(())
}

fn decode_head1(buf: &mut DataBuffer) -> Result<Head1, WireError> {
    let declared = read_body_len(buf)?;
    let body_start = buf.read_pos();

    let mut value = Head1 {
        id: read_varuint(buf)?,
        time: read_u16(buf)?,
        location: decode_loc2(buf)?,
        rotation: decode_rot2(buf)?,
        ipd: None,
    };

    // A trailer, when present, must be a framed HeadIpd1 record
    if consumed_since(buf, body_start) < declared {
        match decode_object(buf)? {
            GsObject::HeadIpd1(ipd) => value.ipd = Some(ipd),
            other => return Err(WireError::UnexpectedOptional(other.raw_tag())),
        }
    }

    finish_body(buf, body_start, declared)?;
    Ok(value)
}

fn decode_hand1(buf: &mut DataBuffer) -> Result<Hand1, WireError> {
    let declared = read_body_len(buf)?;
    let body_start = buf.read_pos();

    let value = Hand1 {
        id: read_varuint(buf)?,
        time: read_u16(buf)?,
        left: read_bool(buf)?,
        location: decode_loc2(buf)?,
        rotation: decode_rot2(buf)?,
    };

    finish_body(buf, body_start, declared)?;
    Ok(value)
}

/// `time` is never on the wire; the decoded struct keeps it at zero.
/// A trailer, when present, is a bare `VarUint` parent id, not a
/// framed record.
fn decode_object1(buf: &mut DataBuffer) -> Result<Object1, WireError> {
    let declared = read_body_len(buf)?;
    let body_start = buf.read_pos();

    let mut value = Object1 {
        id: read_varuint(buf)?,
        time: 0,
        position: decode_loc1(buf)?,
        rotation: decode_rot1(buf)?,
        scale: decode_loc1(buf)?,
        parent: None,
    };

    if consumed_since(buf, body_start) < declared {
        value.parent = Some(read_varuint(buf)?);
    }

    finish_body(buf, body_start, declared)?;
    Ok(value)
}

fn decode_mesh1(buf: &mut DataBuffer) -> Result<Mesh1, WireError> {
    let declared = read_body_len(buf)?;
    let body_start = buf.read_pos();

    let value = Mesh1 {
        id: read_varuint(buf)?,
        vertices: decode_vec(buf, decode_loc1)?,
        normals: decode_vec(buf, decode_norm1)?,
        textures: decode_vec(buf, decode_texture_uv1)?,
        triangles: decode_vec(buf, read_varuint)?,
    };

    finish_body(buf, body_start, declared)?;
    Ok(value)
}

fn decode_hand2(buf: &mut DataBuffer) -> Result<Hand2, WireError> {
    let declared = read_body_len(buf)?;
    let body_start = buf.read_pos();

    let value = Hand2 {
        id: read_varuint(buf)?,
        time: read_u16(buf)?,
        left: read_bool(buf)?,
        location: decode_loc2(buf)?,
        rotation: decode_rot2(buf)?,
        wrist: decode_transform1(buf)?,
        thumb: decode_thumb(buf)?,
        index: decode_finger(buf)?,
        middle: decode_finger(buf)?,
        ring: decode_finger(buf)?,
        pinky: decode_finger(buf)?,
    };

    finish_body(buf, body_start, declared)?;
    Ok(value)
}

fn decode_head_ipd1(buf: &mut DataBuffer) -> Result<HeadIpd1, WireError> {
    let declared = read_body_len(buf)?;
    let body_start = buf.read_pos();

    let value = HeadIpd1 {
        ipd: read_f16(buf)?,
    };

    finish_body(buf, body_start, declared)?;
    Ok(value)
}

// ============================================================================
// Component readers
// ============================================================================

fn decode_loc1(buf: &mut DataBuffer) -> Result<Loc1, WireError> {
    Ok(Loc1 {
        x: read_f32(buf)?,
        y: read_f32(buf)?,
        z: read_f32(buf)?,
    })
}

/// Velocity arrives `vx, vy, vz`; assignment maps it back onto the
/// struct's declared order.
fn decode_loc2(buf: &mut DataBuffer) -> Result<Loc2, WireError> {
    let x = read_f32(buf)?;
    let y = read_f32(buf)?;
    let z = read_f32(buf)?;
    let vx = read_f16(buf)?;
    let vy = read_f16(buf)?;
    let vz = read_f16(buf)?;

    Ok(Loc2 {
        x,
        y,
        z,
        vy,
        vx,
        vz,
    })
}

fn decode_norm1(buf: &mut DataBuffer) -> Result<Norm1, WireError> {
    Ok(Norm1 {
        x: read_f16(buf)?,
        y: read_f16(buf)?,
        z: read_f16(buf)?,
    })
}

fn decode_texture_uv1(buf: &mut DataBuffer) -> Result<TextureUv1, WireError> {
    Ok(TextureUv1 {
        u: read_varuint(buf)?,
        v: read_varuint(buf)?,
    })
}

fn decode_rot1(buf: &mut DataBuffer) -> Result<Rot1, WireError> {
    Ok(Rot1 {
        i: read_f16(buf)?,
        j: read_f16(buf)?,
        k: read_f16(buf)?,
    })
}

fn decode_rot2(buf: &mut DataBuffer) -> Result<Rot2, WireError> {
    Ok(Rot2 {
        si: read_f16(buf)?,
        sj: read_f16(buf)?,
        sk: read_f16(buf)?,
        ei: read_f16(buf)?,
        ej: read_f16(buf)?,
        ek: read_f16(buf)?,
    })
}

fn decode_transform1(buf: &mut DataBuffer) -> Result<Transform1, WireError> {
    Ok(Transform1 {
        tx: read_f16(buf)?,
        ty: read_f16(buf)?,
        tz: read_f16(buf)?,
    })
}

fn decode_thumb(buf: &mut DataBuffer) -> Result<Thumb, WireError> {
    Ok(Thumb {
        tip: decode_transform1(buf)?,
        ip: decode_transform1(buf)?,
        mcp: decode_transform1(buf)?,
        cmc: decode_transform1(buf)?,
    })
}

fn decode_finger(buf: &mut DataBuffer) -> Result<Finger, WireError> {
    Ok(Finger {
        tip: decode_transform1(buf)?,
        dip: decode_transform1(buf)?,
        pip: decode_transform1(buf)?,
        mcp: decode_transform1(buf)?,
        cmc: decode_transform1(buf)?,
    })
}

/// Element count as a `VarUint`, then that many elements. The capacity
/// hint is clamped by the octets actually remaining in the buffer.
fn decode_vec<T>(
    buf: &mut DataBuffer,
    mut read_item: impl FnMut(&mut DataBuffer) -> Result<T, WireError>,
) -> Result<Vec<T>, WireError> {
    let count = read_varuint(buf)?;
    let count = usize::try_from(count).map_err(|_| WireError::ReadPastEnd)?;

    let mut items = Vec::with_capacity(count.min(buf.remaining()));
    for _ in 0..count {
        items.push(read_item(buf)?);
    }

    Ok(items)
}
