//! Error types for buffers and the wire codec

use thiserror::Error;

/// Errors that can occur while operating on a buffer or running the codec
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    /// An index or offset lay outside the accessible region of a buffer
    #[error("access at offset {0} is beyond the end of the buffer")]
    OutOfRange(usize),

    /// An append would grow the data past the buffer capacity
    #[error("append exceeds the buffer capacity")]
    Overflow,

    /// A read would advance the read cursor past the buffered data
    #[error("read past the end of the buffered data")]
    ReadPastEnd,

    /// First octet of a variable-length integer matches none of the five prefixes
    #[error("invalid variable-length integer prefix 0x{0:02X}")]
    MalformedVarInt(u8),

    /// Attempt to encode the reserved zero tag
    #[error("cannot encode an invalid (0) object tag")]
    InvalidTagOnEncode,

    /// Decoded the reserved zero tag from the stream
    #[error("cannot decode an invalid (0) object tag")]
    InvalidTagOnDecode,

    /// Declared body length disagrees with the octets the body required
    #[error("encoded object length error: declared {declared}, consumed {consumed}")]
    LengthMismatch { declared: u64, consumed: u64 },

    /// An optional trailer record was not the type the object permits
    #[error("unexpected optional object with tag 0x{0:X}")]
    UnexpectedOptional(u64),

    /// String content was not valid UTF-8
    #[error("string content is not valid UTF-8")]
    InvalidString,
}
