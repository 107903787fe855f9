//! Gamestate-Wire: compact binary codec for real-time game state telemetry
//!
//! This crate encodes and decodes a small catalog of game state objects
//! (head pose, hand pose in two versions, generic scene object
//! transforms, inter-pupillary distance, and indexed triangle meshes) as
//! framed records that concatenate into a stream. Senders and receivers agree on
//! the format to the bit, and records under tags a decoder does not
//! recognize survive a decode/re-encode round trip unchanged.
//!
//! # Wire Format Overview
//!
//! ```text
//! stream  := record*
//! record  := varuint_tag varuint_body_length body_octets
//! ```
//!
//! | Tag    | Object   |
//! |--------|----------|
//! | 0x00   | reserved, never valid |
//! | 0x01   | Head1    |
//! | 0x02   | Hand1    |
//! | 0x03   | Object1  |
//! | 0x8000 | Mesh1    |
//! | 0x8001 | Hand2    |
//! | 0x8002 | HeadIPD1 |
//!
//! All multi-octet integers are big-endian. Floats travel as the raw bit
//! pattern of the equally-wide unsigned integer; half-precision fields
//! are `f32` in memory and convert at the codec boundary. Variable-length
//! integers use a five-shape prefix code (see [`wire`]).
//!
//! Forward compatibility rests on two rules: a reader carries
//! unrecognized tags as [`UnknownObject`]s instead of failing, and extra
//! octets inside a recognized object's declared body are skipped. An
//! older reader therefore survives a newer writer.
//!
//! # Usage
//!
//! ```
//! use gamestate_wire::{
//!     DataBuffer, DecodeStatus, EncodeStatus, GsObject, Head1, Loc2, StreamDecoder,
//!     StreamEncoder,
//! };
//!
//! // Encode into a caller-owned buffer
//! let mut wire = [0u8; 1500];
//! let buf = DataBuffer::from_slice(&mut wire, 0).unwrap();
//! let mut encoder = StreamEncoder::new(buf);
//!
//! let head = Head1 {
//!     id: 7,
//!     time: 0x0500,
//!     location: Loc2 { x: 1.5, y: 0.25, z: -3.0, ..Default::default() },
//!     ..Default::default()
//! };
//! assert_eq!(encoder.encode(&GsObject::Head1(head.clone())), EncodeStatus::Ok);
//! let written = encoder.data_len();
//!
//! // Decode from the received octets
//! let buf = DataBuffer::from_slice(&mut wire, written).unwrap();
//! let mut decoder = StreamDecoder::new(buf);
//! assert_eq!(decoder.decode(), DecodeStatus::Decoded(GsObject::Head1(head)));
//! assert_eq!(decoder.decode(), DecodeStatus::Eof);
//! ```
//!
//! The free functions in [`codec`] offer the same capability without a
//! context, and [`wire`] exposes the primitive layer for callers that
//! frame their own data.

mod api;
mod buffer;
mod error;
mod half;
mod types;

pub mod codec;
pub mod wire;

pub use api::{DecodeStatus, EncodeStatus, StreamDecoder, StreamEncoder};
pub use buffer::DataBuffer;
pub use codec::{decode_object, decode_objects, encode_object, encode_objects, EncodeResult};
pub use error::WireError;
pub use half::{f16_to_f32, f32_to_f16};
pub use types::{
    Finger, GsObject, Hand1, Hand2, Head1, HeadIpd1, Loc1, Loc2, Mesh1, Norm1, Object1, ObjectId,
    Rot1, Rot2, Tag, TextureUv1, Thumb, Time1, Transform1, UnknownObject,
};
