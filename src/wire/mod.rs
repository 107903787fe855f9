//! Primitive wire codec
//!
//! Fixed-width integers are big-endian. Floats travel as the raw bit
//! pattern of the equally-wide unsigned integer, with half-precision
//! values converted through [`crate::half`] at the boundary. Strings and
//! blobs are a `VarUint` length followed by that many raw octets.
//!
//! # Variable-length integers
//!
//! `VarUint` and `VarInt` share five prefix-coded shapes; the writer
//! always picks the narrowest shape that holds the value, the reader
//! accepts any of the five regardless of magnitude (so oversized
//! encodings from third parties decode fine):
//!
//! ```text
//! 0vvvvvvv                      1 octet,  7 payload bits
//! 10vvvvvv vvvvvvvv             2 octets, 14 payload bits
//! 110vvvvv vvvvvvvv vvvvvvvv    3 octets, 21 payload bits
//! 11100001 + 4 octets BE        5 octets, 32 payload bits
//! 11100010 + 8 octets BE        9 octets, 64 payload bits
//! ```
//!
//! For `VarInt` the payload is two's-complement within its bit width;
//! the top payload bit is the sign. Any other first octet is malformed.
//!
//! Writers return the octet count they produce, and against a
//! [`crate::DataBuffer::sink`] they store nothing, which is how the
//! object encoder precomputes body lengths.

mod read;
mod write;

#[cfg(test)]
mod tests;

pub use read::*;
pub use write::*;

/// First octet announcing a 4-octet big-endian payload.
pub(crate) const PREFIX_U32: u8 = 0xE1;
/// First octet announcing an 8-octet big-endian payload.
pub(crate) const PREFIX_U64: u8 = 0xE2;
