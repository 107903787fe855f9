//! In-memory game state object catalog
//!
//! These are the machine representations of the telemetry objects, not
//! their wire shapes. Fields that travel as half-precision floats are
//! ordinary `f32` here; the codec converts at the boundary. Field order
//! inside the component structs is load-bearing for the codec, with one
//! historical exception noted on [`Loc2`].

use serde::{Deserialize, Serialize};

/// Identifier carried by every trackable object, a `VarUint` on the wire.
pub type ObjectId = u64;

/// 16-bit capture timestamp.
pub type Time1 = u16;

/// Tag values identifying the recognized object variants. The raw value
/// zero is reserved and invalid on both the encode and decode paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Head1 = 0x01,
    Hand1 = 0x02,
    Object1 = 0x03,
    Mesh1 = 0x8000,
    Hand2 = 0x8001,
    HeadIpd1 = 0x8002,
}

impl Tag {
    /// The wire value of this tag.
    pub fn raw(self) -> u64 {
        self as u64
    }

    /// Map a raw wire value back to a recognized tag.
    pub fn from_raw(raw: u64) -> Option<Tag> {
        match raw {
            0x01 => Some(Tag::Head1),
            0x02 => Some(Tag::Hand1),
            0x03 => Some(Tag::Object1),
            0x8000 => Some(Tag::Mesh1),
            0x8001 => Some(Tag::Hand2),
            0x8002 => Some(Tag::HeadIpd1),
            _ => None,
        }
    }
}

/// Position in metres, full precision.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Loc1 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Position with velocity. The velocity components are half-precision on
/// the wire, and the wire order is `vx, vy, vz` even though the struct
/// declares `vy` first (a historical artifact kept for compatibility).
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Loc2 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub vy: f32,
    pub vx: f32,
    pub vz: f32,
}

/// Surface normal, half-precision components.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Norm1 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Texture coordinate pair, variable-width integers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureUv1 {
    pub u: u64,
    pub v: u64,
}

/// Rotation as axis components, half-precision.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rot1 {
    pub i: f32,
    pub j: f32,
    pub k: f32,
}

/// Rotation as start/end axis components, half-precision.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rot2 {
    pub si: f32,
    pub sj: f32,
    pub sk: f32,
    pub ei: f32,
    pub ej: f32,
    pub ek: f32,
}

/// Joint translation, half-precision components.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform1 {
    pub tx: f32,
    pub ty: f32,
    pub tz: f32,
}

/// Thumb joint chain, tip to carpometacarpal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thumb {
    pub tip: Transform1,
    pub ip: Transform1,
    pub mcp: Transform1,
    pub cmc: Transform1,
}

/// Finger joint chain, tip to carpometacarpal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Finger {
    pub tip: Transform1,
    pub dip: Transform1,
    pub pip: Transform1,
    pub mcp: Transform1,
    pub cmc: Transform1,
}

/// Inter-pupillary distance in millimetres. Appears both as a top-level
/// record and as the optional trailer of [`Head1`]; it is framed
/// identically (tag, length, body) in both positions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadIpd1 {
    pub ipd: f32,
}

/// Head pose.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Head1 {
    pub id: ObjectId,
    pub time: Time1,
    pub location: Loc2,
    pub rotation: Rot2,
    pub ipd: Option<HeadIpd1>,
}

/// Hand pose, original version.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hand1 {
    pub id: ObjectId,
    pub time: Time1,
    pub left: bool,
    pub location: Loc2,
    pub rotation: Rot2,
}

/// Hand pose with full finger-joint tracking.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hand2 {
    pub id: ObjectId,
    pub time: Time1,
    pub left: bool,
    pub location: Loc2,
    pub rotation: Rot2,
    pub wrist: Transform1,
    pub thumb: Thumb,
    pub index: Finger,
    pub middle: Finger,
    pub ring: Finger,
    pub pinky: Finger,
}

/// Generic scene object transform.
///
/// `time` exists only in memory: the wire body is `id, position,
/// rotation, scale` plus the optional bare-`VarUint` `parent`. Decoding
/// always leaves `time` at zero.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object1 {
    pub id: ObjectId,
    pub time: Time1,
    pub position: Loc1,
    pub rotation: Rot1,
    pub scale: Loc1,
    pub parent: Option<ObjectId>,
}

/// Indexed triangle mesh.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh1 {
    pub id: ObjectId,
    pub vertices: Vec<Loc1>,
    pub normals: Vec<Norm1>,
    pub textures: Vec<TextureUv1>,
    pub triangles: Vec<u64>,
}

/// Forward-compatibility container for unrecognized tags. `data` holds
/// the record body exactly as read (length prefix excluded), so a
/// decode/re-encode round trip reproduces the original octets.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownObject {
    pub tag: u64,
    pub data: Vec<u8>,
}

/// Any object the codec can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GsObject {
    Head1(Head1),
    Hand1(Hand1),
    Object1(Object1),
    Mesh1(Mesh1),
    Hand2(Hand2),
    HeadIpd1(HeadIpd1),
    Unknown(UnknownObject),
}

impl GsObject {
    /// The raw wire tag this object encodes under.
    pub fn raw_tag(&self) -> u64 {
        match self {
            GsObject::Head1(_) => Tag::Head1.raw(),
            GsObject::Hand1(_) => Tag::Hand1.raw(),
            GsObject::Object1(_) => Tag::Object1.raw(),
            GsObject::Mesh1(_) => Tag::Mesh1.raw(),
            GsObject::Hand2(_) => Tag::Hand2.raw(),
            GsObject::HeadIpd1(_) => Tag::HeadIpd1.raw(),
            GsObject::Unknown(unknown) => unknown.tag,
        }
    }
}

impl From<Head1> for GsObject {
    fn from(value: Head1) -> Self {
        GsObject::Head1(value)
    }
}

impl From<Hand1> for GsObject {
    fn from(value: Hand1) -> Self {
        GsObject::Hand1(value)
    }
}

impl From<Object1> for GsObject {
    fn from(value: Object1) -> Self {
        GsObject::Object1(value)
    }
}

impl From<Mesh1> for GsObject {
    fn from(value: Mesh1) -> Self {
        GsObject::Mesh1(value)
    }
}

impl From<Hand2> for GsObject {
    fn from(value: Hand2) -> Self {
        GsObject::Hand2(value)
    }
}

impl From<HeadIpd1> for GsObject {
    fn from(value: HeadIpd1) -> Self {
        GsObject::HeadIpd1(value)
    }
}

impl From<UnknownObject> for GsObject {
    fn from(value: UnknownObject) -> Self {
        GsObject::Unknown(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_raw_values() {
        assert_eq!(Tag::Head1.raw(), 0x01);
        assert_eq!(Tag::Hand1.raw(), 0x02);
        assert_eq!(Tag::Object1.raw(), 0x03);
        assert_eq!(Tag::Mesh1.raw(), 0x8000);
        assert_eq!(Tag::Hand2.raw(), 0x8001);
        assert_eq!(Tag::HeadIpd1.raw(), 0x8002);
    }

    #[test]
    fn tag_round_trip() {
        for tag in [
            Tag::Head1,
            Tag::Hand1,
            Tag::Object1,
            Tag::Mesh1,
            Tag::Hand2,
            Tag::HeadIpd1,
        ] {
            assert_eq!(Tag::from_raw(tag.raw()), Some(tag));
        }
        assert_eq!(Tag::from_raw(0), None);
        assert_eq!(Tag::from_raw(0x20), None);
        assert_eq!(Tag::from_raw(0x8003), None);
    }

    #[test]
    fn raw_tag_of_unknown_is_the_carried_value() {
        let object = GsObject::from(UnknownObject {
            tag: 0x7777,
            data: vec![1, 2, 3],
        });
        assert_eq!(object.raw_tag(), 0x7777);
    }
}
