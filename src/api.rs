//! Stateful stream contexts
//!
//! Thin stateful wrappers over the object codec for callers that feed a
//! buffer record by record: an encoder attached to a writable buffer
//! and a decoder draining a received one. Each context keeps the last
//! error as text, cleared again by the next call, so a foreign-function
//! or scripting layer can poll it without threading `Result` values
//! through.

use tracing::warn;

use crate::buffer::DataBuffer;
use crate::codec::{decode_object, encode_object};
use crate::types::GsObject;

/// Outcome of [`StreamEncoder::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeStatus {
    /// The record was appended.
    Ok,
    /// The record does not fit; nothing was written. The caller may
    /// flush the buffer and retry.
    NoRoom,
    /// Encoding failed; see [`StreamEncoder::last_error`]. The buffer
    /// data length was restored to its pre-call value.
    Error,
}

/// Outcome of [`StreamDecoder::decode`].
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeStatus {
    /// The next record, decoded.
    Decoded(GsObject),
    /// All buffered data has been consumed.
    Eof,
    /// Decoding failed; see [`StreamDecoder::last_error`].
    Error,
}

/// Encoder context attached to a writable buffer.
#[derive(Debug)]
pub struct StreamEncoder<'a> {
    buf: DataBuffer<'a>,
    error: Option<String>,
}

impl<'a> StreamEncoder<'a> {
    pub fn new(buf: DataBuffer<'a>) -> Self {
        StreamEncoder { buf, error: None }
    }

    /// Append one object as a framed record.
    pub fn encode(&mut self, object: &GsObject) -> EncodeStatus {
        self.error = None;
        let data_len = self.buf.len();

        match encode_object(&mut self.buf, object) {
            Ok(result) if result.objects == 1 => EncodeStatus::Ok,
            Ok(_) => EncodeStatus::NoRoom,
            Err(err) => {
                warn!(%err, "object encode failed");
                // The failed record must not leave partial octets behind
                let _ = self.buf.set_len(data_len);
                self.error = Some(err.to_string());
                EncodeStatus::Error
            }
        }
    }

    /// Octets written so far.
    pub fn data_len(&self) -> usize {
        self.buf.len()
    }

    /// The encoded stream produced so far.
    pub fn data(&self) -> &[u8] {
        self.buf.as_data()
    }

    /// Text of the last error, until the next call clears it.
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Release the context, handing the buffer back. A borrowed buffer's
    /// storage stays with its owner throughout.
    pub fn into_buffer(self) -> DataBuffer<'a> {
        self.buf
    }
}

/// Decoder context draining a received buffer.
#[derive(Debug)]
pub struct StreamDecoder<'a> {
    buf: DataBuffer<'a>,
    error: Option<String>,
}

impl<'a> StreamDecoder<'a> {
    pub fn new(buf: DataBuffer<'a>) -> Self {
        StreamDecoder { buf, error: None }
    }

    /// Decode the next record, or report that the stream is drained.
    pub fn decode(&mut self) -> DecodeStatus {
        self.error = None;

        if self.buf.remaining() == 0 {
            return DecodeStatus::Eof;
        }

        match decode_object(&mut self.buf) {
            Ok(object) => DecodeStatus::Decoded(object),
            Err(err) => {
                warn!(%err, "object decode failed");
                self.error = Some(err.to_string());
                DecodeStatus::Error
            }
        }
    }

    /// Text of the last error, until the next call clears it.
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Release the context, handing the buffer back.
    pub fn into_buffer(self) -> DataBuffer<'a> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Head1, UnknownObject};

    fn head(id: u64) -> GsObject {
        GsObject::Head1(Head1 {
            id,
            time: 0x0500,
            ..Default::default()
        })
    }

    #[test]
    fn encode_into_a_borrowed_buffer() {
        let mut scratch = [0u8; 256];
        let buf = DataBuffer::from_slice(&mut scratch, 0).unwrap();
        let mut encoder = StreamEncoder::new(buf);

        assert_eq!(encoder.encode(&head(1)), EncodeStatus::Ok);
        assert_eq!(encoder.encode(&head(2)), EncodeStatus::Ok);
        assert_eq!(encoder.data_len(), 70);
        assert!(encoder.last_error().is_none());

        let produced = encoder.into_buffer().len();
        assert_eq!(scratch[0], 0x01);
        assert_eq!(produced, 70);
    }

    #[test]
    fn no_room_is_not_an_error() {
        let mut encoder = StreamEncoder::new(DataBuffer::new(10));
        assert_eq!(encoder.encode(&head(1)), EncodeStatus::NoRoom);
        assert_eq!(encoder.data_len(), 0);
        assert!(encoder.last_error().is_none());
    }

    #[test]
    fn errors_surface_as_text_and_clear_on_success() {
        let mut encoder = StreamEncoder::new(DataBuffer::new(256));
        let bad = GsObject::Unknown(UnknownObject {
            tag: 0,
            data: vec![1],
        });

        assert_eq!(encoder.encode(&bad), EncodeStatus::Error);
        assert_eq!(
            encoder.last_error(),
            Some("cannot encode an invalid (0) object tag")
        );
        assert_eq!(encoder.data_len(), 0);

        assert_eq!(encoder.encode(&head(1)), EncodeStatus::Ok);
        assert!(encoder.last_error().is_none());
    }

    #[test]
    fn decode_until_eof() {
        let mut encoder = StreamEncoder::new(DataBuffer::new(256));
        encoder.encode(&head(1));
        encoder.encode(&head(2));

        let mut decoder = StreamDecoder::new(encoder.into_buffer());
        assert_eq!(decoder.decode(), DecodeStatus::Decoded(head(1)));
        assert_eq!(decoder.decode(), DecodeStatus::Decoded(head(2)));
        assert_eq!(decoder.decode(), DecodeStatus::Eof);
        assert_eq!(decoder.decode(), DecodeStatus::Eof);
    }

    #[test]
    fn decode_error_is_reported_with_text() {
        let mut data = [0x00u8, 0x21];
        let buf = DataBuffer::from_slice(&mut data, 2).unwrap();
        let mut decoder = StreamDecoder::new(buf);

        assert_eq!(decoder.decode(), DecodeStatus::Error);
        assert_eq!(
            decoder.last_error(),
            Some("cannot decode an invalid (0) object tag")
        );
    }
}
