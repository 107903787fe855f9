//! Object encoding
//!
//! One function per catalog object, each following the same shape:
//! measure the body against a sink buffer, check the record fits, then
//! append tag, length, and fields in wire order. Field order here is
//! the wire contract; reordering anything breaks bit compatibility.

use crate::buffer::DataBuffer;
use crate::error::WireError;
use crate::types::{
    Finger, GsObject, Hand1, Hand2, Head1, HeadIpd1, Loc1, Loc2, Mesh1, Norm1, Object1, Rot1,
    Rot2, Tag, TextureUv1, Thumb, Transform1, UnknownObject,
};
use crate::wire::{write_blob, write_bool, write_f16, write_f32, write_u16, write_varuint};

/// Count of objects and octets appended by an encode call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EncodeResult {
    pub objects: usize,
    pub octets: usize,
}

const NO_ROOM: EncodeResult = EncodeResult {
    objects: 0,
    octets: 0,
};

/// Append one object as a framed record.
///
/// Returns `{1, octets}` on success and `{0, 0}` when the record would
/// not fit, in which case nothing was written and the caller may retry
/// on a fresh buffer.
pub fn encode_object(buf: &mut DataBuffer, object: &GsObject) -> Result<EncodeResult, WireError> {
    match object {
        GsObject::Head1(value) => encode_head1(buf, value),
        GsObject::Hand1(value) => encode_hand1(buf, value),
        GsObject::Object1(value) => encode_object1(buf, value),
        GsObject::Mesh1(value) => encode_mesh1(buf, value),
        GsObject::Hand2(value) => encode_hand2(buf, value),
        GsObject::HeadIpd1(value) => encode_head_ipd1(buf, value),
        GsObject::Unknown(value) => encode_unknown(buf, value),
    }
}

/// Append a sequence of objects, stopping cleanly at the first one that
/// does not fit. Objects already appended stay appended; a result with
/// `objects` short of the slice length means the rest are pending.
pub fn encode_objects(buf: &mut DataBuffer, objects: &[GsObject]) -> Result<EncodeResult, WireError> {
    let mut total = EncodeResult::default();

    for object in objects {
        let one = encode_object(buf, object)?;
        if one.objects == 0 {
            break;
        }
        total.objects += one.objects;
        total.octets += one.octets;
    }

    Ok(total)
}

/// Does a record of `body` octets under `tag` fit behind the data
/// already in the buffer?
fn record_fits(buf: &DataBuffer, tag: Tag, body: usize) -> Result<bool, WireError> {
    let mut sink = DataBuffer::sink();
    let framing = write_varuint(&mut sink, tag.raw())? + write_varuint(&mut sink, body as u64)?;
    Ok(body <= buf.capacity() - buf.len() && framing <= buf.capacity() - buf.len() - body)
}

fn write_frame(buf: &mut DataBuffer, tag: Tag, body: usize) -> Result<usize, WireError> {
    let mut octets = write_varuint(buf, tag.raw())?;
    octets += write_varuint(buf, body as u64)?;
    Ok(octets)
}

fn encode_head1(buf: &mut DataBuffer, value: &Head1) -> Result<EncodeResult, WireError> {
    let mut sink = DataBuffer::sink();
    let mut body = write_varuint(&mut sink, value.id)?
        + write_u16(&mut sink, value.time)?
        + write_loc2(&mut sink, &value.location)?
        + write_rot2(&mut sink, &value.rotation)?;
    if let Some(ipd) = &value.ipd {
        body += write_framed_ipd(&mut sink, ipd)?;
    }

    if !record_fits(buf, Tag::Head1, body)? {
        return Ok(NO_ROOM);
    }

    let mut octets = write_frame(buf, Tag::Head1, body)?;
    octets += write_varuint(buf, value.id)?;
    octets += write_u16(buf, value.time)?;
    octets += write_loc2(buf, &value.location)?;
    octets += write_rot2(buf, &value.rotation)?;
    if let Some(ipd) = &value.ipd {
        octets += write_framed_ipd(buf, ipd)?;
    }

    Ok(EncodeResult { objects: 1, octets })
}

fn encode_hand1(buf: &mut DataBuffer, value: &Hand1) -> Result<EncodeResult, WireError> {
    let mut sink = DataBuffer::sink();
    let body = write_varuint(&mut sink, value.id)?
        + write_u16(&mut sink, value.time)?
        + write_bool(&mut sink, value.left)?
        + write_loc2(&mut sink, &value.location)?
        + write_rot2(&mut sink, &value.rotation)?;

    if !record_fits(buf, Tag::Hand1, body)? {
        return Ok(NO_ROOM);
    }

    let mut octets = write_frame(buf, Tag::Hand1, body)?;
    octets += write_varuint(buf, value.id)?;
    octets += write_u16(buf, value.time)?;
    octets += write_bool(buf, value.left)?;
    octets += write_loc2(buf, &value.location)?;
    octets += write_rot2(buf, &value.rotation)?;

    Ok(EncodeResult { objects: 1, octets })
}

/// `time` is deliberately absent from the wire body; the field is
/// in-memory state only.
fn encode_object1(buf: &mut DataBuffer, value: &Object1) -> Result<EncodeResult, WireError> {
    let mut sink = DataBuffer::sink();
    let mut body = write_varuint(&mut sink, value.id)?
        + write_loc1(&mut sink, &value.position)?
        + write_rot1(&mut sink, &value.rotation)?
        + write_loc1(&mut sink, &value.scale)?;
    if let Some(parent) = value.parent {
        body += write_varuint(&mut sink, parent)?;
    }

    if !record_fits(buf, Tag::Object1, body)? {
        return Ok(NO_ROOM);
    }

    let mut octets = write_frame(buf, Tag::Object1, body)?;
    octets += write_varuint(buf, value.id)?;
    octets += write_loc1(buf, &value.position)?;
    octets += write_rot1(buf, &value.rotation)?;
    octets += write_loc1(buf, &value.scale)?;
    if let Some(parent) = value.parent {
        octets += write_varuint(buf, parent)?;
    }

    Ok(EncodeResult { objects: 1, octets })
}

fn encode_mesh1(buf: &mut DataBuffer, value: &Mesh1) -> Result<EncodeResult, WireError> {
    let mut sink = DataBuffer::sink();
    let body = write_varuint(&mut sink, value.id)?
        + write_vec(&mut sink, &value.vertices, write_loc1)?
        + write_vec(&mut sink, &value.normals, write_norm1)?
        + write_vec(&mut sink, &value.textures, write_texture_uv1)?
        + write_vec(&mut sink, &value.triangles, |b, t| write_varuint(b, *t))?;

    if !record_fits(buf, Tag::Mesh1, body)? {
        return Ok(NO_ROOM);
    }

    let mut octets = write_frame(buf, Tag::Mesh1, body)?;
    octets += write_varuint(buf, value.id)?;
    octets += write_vec(buf, &value.vertices, write_loc1)?;
    octets += write_vec(buf, &value.normals, write_norm1)?;
    octets += write_vec(buf, &value.textures, write_texture_uv1)?;
    octets += write_vec(buf, &value.triangles, |b, t| write_varuint(b, *t))?;

    Ok(EncodeResult { objects: 1, octets })
}

fn encode_hand2(buf: &mut DataBuffer, value: &Hand2) -> Result<EncodeResult, WireError> {
    let mut sink = DataBuffer::sink();
    let body = write_hand2_body(&mut sink, value)?;

    if !record_fits(buf, Tag::Hand2, body)? {
        return Ok(NO_ROOM);
    }

    let mut octets = write_frame(buf, Tag::Hand2, body)?;
    octets += write_hand2_body(buf, value)?;

    Ok(EncodeResult { objects: 1, octets })
}

fn encode_head_ipd1(buf: &mut DataBuffer, value: &HeadIpd1) -> Result<EncodeResult, WireError> {
    let mut sink = DataBuffer::sink();
    let record = write_framed_ipd(&mut sink, value)?;

    if record > buf.capacity() - buf.len() {
        return Ok(NO_ROOM);
    }

    let octets = write_framed_ipd(buf, value)?;
    Ok(EncodeResult { objects: 1, octets })
}

fn encode_unknown(buf: &mut DataBuffer, value: &UnknownObject) -> Result<EncodeResult, WireError> {
    if value.tag == 0 {
        return Err(WireError::InvalidTagOnEncode);
    }

    let mut sink = DataBuffer::sink();
    let record = write_varuint(&mut sink, value.tag)? + write_blob(&mut sink, &value.data)?;

    if record > buf.capacity() - buf.len() {
        return Ok(NO_ROOM);
    }

    let mut octets = write_varuint(buf, value.tag)?;
    octets += write_blob(buf, &value.data)?;

    Ok(EncodeResult { objects: 1, octets })
}

// ============================================================================
// Component writers
// ============================================================================

/// A `HeadIpd1` is a complete framed record even when nested inside a
/// `Head1` body.
fn write_framed_ipd(buf: &mut DataBuffer, value: &HeadIpd1) -> Result<usize, WireError> {
    let mut sink = DataBuffer::sink();
    let body = write_f16(&mut sink, value.ipd)?;

    let mut octets = write_frame(buf, Tag::HeadIpd1, body)?;
    octets += write_f16(buf, value.ipd)?;
    Ok(octets)
}

fn write_loc1(buf: &mut DataBuffer, value: &Loc1) -> Result<usize, WireError> {
    Ok(write_f32(buf, value.x)? + write_f32(buf, value.y)? + write_f32(buf, value.z)?)
}

/// Velocity goes out `vx, vy, vz` regardless of the struct's declared
/// field order.
fn write_loc2(buf: &mut DataBuffer, value: &Loc2) -> Result<usize, WireError> {
    Ok(write_f32(buf, value.x)?
        + write_f32(buf, value.y)?
        + write_f32(buf, value.z)?
        + write_f16(buf, value.vx)?
        + write_f16(buf, value.vy)?
        + write_f16(buf, value.vz)?)
}

fn write_norm1(buf: &mut DataBuffer, value: &Norm1) -> Result<usize, WireError> {
    Ok(write_f16(buf, value.x)? + write_f16(buf, value.y)? + write_f16(buf, value.z)?)
}

fn write_texture_uv1(buf: &mut DataBuffer, value: &TextureUv1) -> Result<usize, WireError> {
    Ok(write_varuint(buf, value.u)? + write_varuint(buf, value.v)?)
}

fn write_rot1(buf: &mut DataBuffer, value: &Rot1) -> Result<usize, WireError> {
    Ok(write_f16(buf, value.i)? + write_f16(buf, value.j)? + write_f16(buf, value.k)?)
}

fn write_rot2(buf: &mut DataBuffer, value: &Rot2) -> Result<usize, WireError> {
    Ok(write_f16(buf, value.si)?
        + write_f16(buf, value.sj)?
        + write_f16(buf, value.sk)?
        + write_f16(buf, value.ei)?
        + write_f16(buf, value.ej)?
        + write_f16(buf, value.ek)?)
}

fn write_transform1(buf: &mut DataBuffer, value: &Transform1) -> Result<usize, WireError> {
    Ok(write_f16(buf, value.tx)? + write_f16(buf, value.ty)? + write_f16(buf, value.tz)?)
}

fn write_thumb(buf: &mut DataBuffer, value: &Thumb) -> Result<usize, WireError> {
    Ok(write_transform1(buf, &value.tip)?
        + write_transform1(buf, &value.ip)?
        + write_transform1(buf, &value.mcp)?
        + write_transform1(buf, &value.cmc)?)
}

fn write_finger(buf: &mut DataBuffer, value: &Finger) -> Result<usize, WireError> {
    Ok(write_transform1(buf, &value.tip)?
        + write_transform1(buf, &value.dip)?
        + write_transform1(buf, &value.pip)?
        + write_transform1(buf, &value.mcp)?
        + write_transform1(buf, &value.cmc)?)
}

fn write_hand2_body(buf: &mut DataBuffer, value: &Hand2) -> Result<usize, WireError> {
    Ok(write_varuint(buf, value.id)?
        + write_u16(buf, value.time)?
        + write_bool(buf, value.left)?
        + write_loc2(buf, &value.location)?
        + write_rot2(buf, &value.rotation)?
        + write_transform1(buf, &value.wrist)?
        + write_thumb(buf, &value.thumb)?
        + write_finger(buf, &value.index)?
        + write_finger(buf, &value.middle)?
        + write_finger(buf, &value.ring)?
        + write_finger(buf, &value.pinky)?)
}

/// Element count as a `VarUint`, then each element in turn.
fn write_vec<T>(
    buf: &mut DataBuffer,
    items: &[T],
    mut write_item: impl FnMut(&mut DataBuffer, &T) -> Result<usize, WireError>,
) -> Result<usize, WireError> {
    let mut octets = write_varuint(buf, items.len() as u64)?;
    for item in items {
        octets += write_item(buf, item)?;
    }
    Ok(octets)
}
