//! Tests for the primitive wire codec

use super::*;
use crate::buffer::DataBuffer;
use crate::error::WireError;

fn encoded(write: impl FnOnce(&mut DataBuffer) -> Result<usize, WireError>) -> Vec<u8> {
    let mut buf = DataBuffer::new(64);
    let written = write(&mut buf).unwrap();
    assert_eq!(written, buf.len());
    buf.as_data().to_vec()
}

#[test]
fn fixed_width_unsigned_are_big_endian() {
    assert_eq!(encoded(|b| write_u8(b, 0x7f)), [0x7f]);
    assert_eq!(encoded(|b| write_u16(b, 0x8000)), [0x80, 0x00]);
    assert_eq!(
        encoded(|b| write_u32(b, 0xDEADBEEF)),
        [0xDE, 0xAD, 0xBE, 0xEF]
    );
    assert_eq!(
        encoded(|b| write_u64(b, 0xDEADBEEF_CAFEBABE)),
        [0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE, 0xBA, 0xBE]
    );
}

#[test]
fn fixed_width_signed_are_twos_complement() {
    assert_eq!(encoded(|b| write_i8(b, -1)), [0xFF]);
    assert_eq!(encoded(|b| write_i16(b, -2)), [0xFF, 0xFE]);
    assert_eq!(
        encoded(|b| write_i32(b, i32::MIN)),
        [0x80, 0x00, 0x00, 0x00]
    );

    let mut buf = DataBuffer::new(16);
    write_i64(&mut buf, -3).unwrap();
    assert_eq!(read_i64(&mut buf).unwrap(), -3);
}

#[test]
fn floats_are_raw_bit_patterns() {
    assert_eq!(encoded(|b| write_f32(b, 1.1)), [0x3F, 0x8C, 0xCC, 0xCD]);
    assert_eq!(
        encoded(|b| write_f64(b, 1.0)),
        [0x3F, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
    assert_eq!(encoded(|b| write_f16(b, 3.140625)), [0x42, 0x48]);
}

#[test]
fn f16_round_trip_through_the_buffer() {
    let mut buf = DataBuffer::new(8);
    write_f16(&mut buf, 3.140625).unwrap();
    write_f16(&mut buf, -1.0).unwrap();
    assert_eq!(read_f16(&mut buf).unwrap(), 3.140625);
    assert_eq!(read_f16(&mut buf).unwrap(), -1.0);
}

#[test]
fn bool_writes_are_canonical() {
    assert_eq!(encoded(|b| write_bool(b, true)), [0x01]);
    assert_eq!(encoded(|b| write_bool(b, false)), [0x00]);
}

#[test]
fn bool_reads_accept_any_nonzero_octet() {
    let mut buf = DataBuffer::new(4);
    buf.append_bytes(&[0x00, 0x01, 0xFF]).unwrap();
    assert!(!read_bool(&mut buf).unwrap());
    assert!(read_bool(&mut buf).unwrap());
    assert!(read_bool(&mut buf).unwrap());
}

#[test]
fn varuint_width_boundaries() {
    // Width classes change exactly at the 7/14/21/32-bit payload limits
    let cases: [(u64, usize); 9] = [
        (0, 1),
        (127, 1),
        (128, 2),
        (16_383, 2),
        (16_384, 3),
        (2_097_151, 3),
        (2_097_152, 5),
        (0xFFFF_FFFF, 5),
        (0x1_0000_0000, 9),
    ];
    for (value, width) in cases {
        let mut buf = DataBuffer::new(16);
        assert_eq!(write_varuint(&mut buf, value).unwrap(), width, "{value}");
        assert_eq!(buf.len(), width);
        assert_eq!(read_varuint(&mut buf).unwrap(), value);
        assert_eq!(buf.read_pos(), width);
    }
}

#[test]
fn varuint_shapes() {
    assert_eq!(encoded(|b| write_varuint(b, 0x05)), [0x05]);
    assert_eq!(encoded(|b| write_varuint(b, 128)), [0x80, 0x80]);
    assert_eq!(encoded(|b| write_varuint(b, 16_383)), [0xBF, 0xFF]);
    assert_eq!(encoded(|b| write_varuint(b, 16_384)), [0xC0, 0x40, 0x00]);
    assert_eq!(encoded(|b| write_varuint(b, 0x1F_FFFF)), [0xDF, 0xFF, 0xFF]);
    assert_eq!(
        encoded(|b| write_varuint(b, 0x20_0000)),
        [0xE1, 0x00, 0x20, 0x00, 0x00]
    );
    assert_eq!(
        encoded(|b| write_varuint(b, u64::MAX)),
        [0xE2, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
    );
}

#[test]
fn varint_width_boundaries() {
    let cases: [(i64, usize); 12] = [
        (0, 1),
        (63, 1),
        (-64, 1),
        (64, 2),
        (-65, 2),
        (8_191, 2),
        (-8_192, 2),
        (8_192, 3),
        (1_048_575, 3),
        (1_048_576, 5),
        (i64::from(i32::MAX), 5),
        (i64::from(i32::MAX) + 1, 9),
    ];
    for (value, width) in cases {
        let mut buf = DataBuffer::new(16);
        assert_eq!(write_varint(&mut buf, value).unwrap(), width, "{value}");
        assert_eq!(read_varint(&mut buf).unwrap(), value);
    }
}

#[test]
fn varint_shapes_carry_the_sign_in_the_payload() {
    assert_eq!(encoded(|b| write_varint(b, -1)), [0x7F]);
    assert_eq!(encoded(|b| write_varint(b, -64)), [0x40]);
    assert_eq!(encoded(|b| write_varint(b, -65)), [0xBF, 0xBF]);
    assert_eq!(encoded(|b| write_varint(b, -8_192)), [0xA0, 0x00]);
    assert_eq!(encoded(|b| write_varint(b, -8_193)), [0xDD, 0xFF, 0xFF]);
    assert_eq!(
        encoded(|b| write_varint(b, i64::from(i32::MIN))),
        [0xE1, 0x80, 0x00, 0x00, 0x00]
    );
    assert_eq!(
        encoded(|b| write_varint(b, i64::MIN)),
        [0xE2, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
}

#[test]
fn varint_extreme_round_trips() {
    for value in [i64::MIN, i64::MAX, -1, 0, 1] {
        let mut buf = DataBuffer::new(16);
        write_varint(&mut buf, value).unwrap();
        assert_eq!(read_varint(&mut buf).unwrap(), value);
    }
}

#[test]
fn oversized_varint_shapes_decode_fine() {
    // Third parties may pick a wider shape than necessary; the reader
    // accepts all five regardless of value magnitude
    let mut buf = DataBuffer::new(16);
    buf.append_bytes(&[0x80, 0x05]).unwrap();
    buf.append_bytes(&[0xE1, 0x00, 0x00, 0x00, 0x05]).unwrap();
    assert_eq!(read_varuint(&mut buf).unwrap(), 5);
    assert_eq!(read_varuint(&mut buf).unwrap(), 5);

    let mut buf = DataBuffer::new(16);
    buf.append_bytes(&[0xE1, 0xFF, 0xFF, 0xFF, 0xFB]).unwrap();
    assert_eq!(read_varint(&mut buf).unwrap(), -5);
}

#[test]
fn malformed_varint_prefixes() {
    for first in [0xE0u8, 0xE3, 0xF0, 0xFF] {
        let mut buf = DataBuffer::new(16);
        buf.append_bytes(&[first, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(
            read_varuint(&mut buf).unwrap_err(),
            WireError::MalformedVarInt(first)
        );

        buf.reset_read();
        assert_eq!(
            read_varint(&mut buf).unwrap_err(),
            WireError::MalformedVarInt(first)
        );
    }
}

#[test]
fn truncated_varint_payload_reads_past_end() {
    let mut buf = DataBuffer::new(16);
    buf.append_bytes(&[0xE1, 0x01]).unwrap();
    assert_eq!(read_varuint(&mut buf).unwrap_err(), WireError::ReadPastEnd);
}

#[test]
fn string_layout_and_round_trip() {
    assert_eq!(
        encoded(|b| write_string(b, "Hello")),
        [0x05, b'H', b'e', b'l', b'l', b'o']
    );
    assert_eq!(encoded(|b| write_string(b, "")), [0x00]);

    let mut buf = DataBuffer::new(64);
    let written = write_string(&mut buf, "game state").unwrap();
    assert_eq!(read_string(&mut buf).unwrap(), "game state");
    assert_eq!(buf.read_pos(), written);
}

#[test]
fn invalid_utf8_is_rejected_for_strings_only() {
    let mut buf = DataBuffer::new(8);
    buf.append_bytes(&[0x02, 0xFF, 0xFE]).unwrap();
    assert_eq!(read_string(&mut buf).unwrap_err(), WireError::InvalidString);

    buf.reset_read();
    assert_eq!(read_blob(&mut buf).unwrap(), vec![0xFF, 0xFE]);
}

#[test]
fn blob_round_trip_with_long_length_prefix() {
    let payload: Vec<u8> = (0..200).map(|i| i as u8).collect();
    let mut buf = DataBuffer::new(256);
    let written = write_blob(&mut buf, &payload).unwrap();
    // 200 needs the two-octet length shape
    assert_eq!(written, 2 + payload.len());
    assert_eq!(read_blob(&mut buf).unwrap(), payload);
}

#[test]
fn blob_with_truncated_content() {
    let mut buf = DataBuffer::new(8);
    buf.append_bytes(&[0x05, 0x01, 0x02]).unwrap();
    assert_eq!(read_blob(&mut buf).unwrap_err(), WireError::ReadPastEnd);
}

#[test]
fn sink_counts_match_real_writes() {
    let mut sink = DataBuffer::sink();
    let mut real = DataBuffer::new(256);

    for value in [0u64, 127, 128, 16_384, 0x20_0000, u64::MAX] {
        assert_eq!(
            write_varuint(&mut sink, value).unwrap(),
            write_varuint(&mut real, value).unwrap()
        );
    }
    assert_eq!(write_f16(&mut sink, 1.5).unwrap(), 2);
    assert_eq!(write_blob(&mut sink, &[0; 40]).unwrap(), 41);
    assert_eq!(sink.len(), 0);
}
