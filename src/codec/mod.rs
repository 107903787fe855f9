//! Object codec
//!
//! Frames each catalog object as a record: `VarUint` tag, `VarUint` body
//! length, then the body octets. Records concatenate back-to-back into a
//! stream with no outer header, checksum, or version field.
//!
//! Encoding is two-pass: the body is first serialized against a sink
//! buffer to learn its length, then appended for real only if the whole
//! record fits. An object that does not fit is reported rather
//! than partially written, so a caller can flush and retry on a fresh
//! buffer.
//!
//! Decoding dispatches on the tag. Unrecognized tags are preserved as
//! [`crate::UnknownObject`] and re-encode to the original octets; extra
//! octets inside a recognized object's declared body are skipped, which
//! is how an older reader survives a newer writer.

mod decode;
mod encode;


pub use decode::{decode_object, decode_objects};
pub use encode::{encode_object, encode_objects, EncodeResult};
