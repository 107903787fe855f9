//! Bounded octet buffer with independent append and read cursors
//!
//! `DataBuffer` is the storage every serializer and decoder in this crate
//! works against. It is a contiguous region tracked by two counters:
//! `len` (octets of meaningful data) and `read_pos` (the next read
//! offset, always `<= len`). Appends land at `len`, reads advance
//! `read_pos`, and random access never moves either cursor.
//!
//! Three storage modes:
//!
//! - **Owned** ([`DataBuffer::new`]): allocates and frees its region.
//! - **Borrowed** ([`DataBuffer::from_slice`]): operates on a caller's
//!   slice, which outlives the buffer and is never freed by it.
//! - **Sink** ([`DataBuffer::sink`]): storage-less. Every append is a
//!   successful no-op; serializers run against a sink to measure how
//!   many octets a write *would* produce before committing to a real
//!   buffer.
//!
//! All multi-octet values are big-endian. Floats are stored through the
//! raw bit pattern of the equally-sized unsigned integer.

use crate::error::WireError;

enum Storage<'a> {
    Owned(Box<[u8]>),
    Borrowed(&'a mut [u8]),
    None,
}

/// Bounded octet region with append and read cursors.
pub struct DataBuffer<'a> {
    storage: Storage<'a>,
    len: usize,
    read_pos: usize,
}

impl<'a> DataBuffer<'a> {
    /// Create an owned, zero-filled buffer of the given capacity.
    pub fn new(capacity: usize) -> DataBuffer<'static> {
        DataBuffer {
            storage: Storage::Owned(vec![0u8; capacity].into_boxed_slice()),
            len: 0,
            read_pos: 0,
        }
    }

    /// Wrap a caller-provided slice, treating its first `len` octets as
    /// existing data. The slice is never freed by the buffer.
    pub fn from_slice(slice: &'a mut [u8], len: usize) -> Result<DataBuffer<'a>, WireError> {
        if len > slice.len() {
            return Err(WireError::Overflow);
        }
        Ok(DataBuffer {
            storage: Storage::Borrowed(slice),
            len,
            read_pos: 0,
        })
    }

    /// Create an owned buffer pre-filled with a copy of `data`. A zero
    /// `capacity` sizes the buffer to the data exactly; anything smaller
    /// than the data fails with `Overflow`.
    pub fn from_data(data: &[u8], capacity: usize) -> Result<DataBuffer<'static>, WireError> {
        let capacity = if capacity == 0 { data.len() } else { capacity };
        if data.len() > capacity {
            return Err(WireError::Overflow);
        }
        let mut buf = DataBuffer::new(capacity);
        buf.append_bytes(data)?;
        Ok(buf)
    }

    /// A storage-less measuring buffer: appends succeed without storing
    /// anything and the counters stay at zero.
    pub fn sink() -> DataBuffer<'static> {
        DataBuffer {
            storage: Storage::None,
            len: 0,
            read_pos: 0,
        }
    }

    fn bytes(&self) -> &[u8] {
        match &self.storage {
            Storage::Owned(b) => b,
            Storage::Borrowed(s) => s,
            Storage::None => &[],
        }
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        match &mut self.storage {
            Storage::Owned(b) => b,
            Storage::Borrowed(s) => s,
            Storage::None => &mut [],
        }
    }

    /// True when this is a measuring buffer without storage.
    pub fn is_sink(&self) -> bool {
        matches!(self.storage, Storage::None)
    }

    /// Maximum writable size.
    pub fn capacity(&self) -> usize {
        self.bytes().len()
    }

    /// Count of meaningful octets.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no data has been appended.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Offset of the next read.
    pub fn read_pos(&self) -> usize {
        self.read_pos
    }

    /// Octets of data not yet consumed by reads.
    pub fn remaining(&self) -> usize {
        self.len - self.read_pos
    }

    /// View of the meaningful data region.
    pub fn as_data(&self) -> &[u8] {
        &self.bytes()[..self.len]
    }

    /// Force the data length. Shrinking clamps the read cursor down with
    /// it. Fails with `Overflow` past the capacity, which also rejects
    /// any nonzero length on a storage-less buffer.
    pub fn set_len(&mut self, len: usize) -> Result<(), WireError> {
        if len > self.capacity() {
            return Err(WireError::Overflow);
        }
        self.len = len;
        self.read_pos = self.read_pos.min(len);
        Ok(())
    }

    /// Move the read cursor back to the start of the data.
    pub fn reset_read(&mut self) {
        self.read_pos = 0;
    }

    /// Skip `count` octets of data without copying them out.
    pub fn advance_read(&mut self, count: usize) -> Result<(), WireError> {
        if count > self.remaining() {
            return Err(WireError::ReadPastEnd);
        }
        self.read_pos += count;
        Ok(())
    }

    /// Take the owned storage out of the buffer, leaving it storage-less
    /// with zeroed counters. Borrowed and sink buffers yield `None`;
    /// their storage is not this buffer's to give away.
    pub fn take_storage(&mut self) -> Option<Box<[u8]>> {
        match std::mem::replace(&mut self.storage, Storage::None) {
            Storage::Owned(b) => {
                self.len = 0;
                self.read_pos = 0;
                Some(b)
            }
            other => {
                self.storage = other;
                None
            }
        }
    }

    /// Deep copy into an owned buffer with the same capacity, data, and
    /// cursors.
    pub fn to_owned_buffer(&self) -> DataBuffer<'static> {
        if self.is_sink() {
            return DataBuffer::sink();
        }
        let mut copy = DataBuffer::new(self.capacity());
        copy.bytes_mut()[..self.len].copy_from_slice(self.as_data());
        copy.len = self.len;
        copy.read_pos = self.read_pos;
        copy
    }

    // ========================================================================
    // Random access (cursors untouched)
    // ========================================================================

    /// Read one octet anywhere within the capacity.
    pub fn get(&self, offset: usize) -> Result<u8, WireError> {
        if offset >= self.capacity() {
            return Err(WireError::OutOfRange(offset));
        }
        Ok(self.bytes()[offset])
    }

    /// Overwrite one octet anywhere within the capacity. Does not move
    /// the data length.
    pub fn set(&mut self, offset: usize, value: u8) -> Result<(), WireError> {
        if offset >= self.capacity() {
            return Err(WireError::OutOfRange(offset));
        }
        self.bytes_mut()[offset] = value;
        Ok(())
    }

    /// Copy octets out of the data region at an arbitrary offset.
    pub fn get_bytes_at(&self, offset: usize, dst: &mut [u8]) -> Result<(), WireError> {
        if offset > self.len || dst.len() > self.len - offset {
            return Err(WireError::OutOfRange(offset));
        }
        dst.copy_from_slice(&self.bytes()[offset..offset + dst.len()]);
        Ok(())
    }

    /// Overwrite octets at an arbitrary offset within the capacity.
    /// Does not move the data length.
    pub fn set_bytes_at(&mut self, offset: usize, src: &[u8]) -> Result<(), WireError> {
        if offset > self.capacity() || src.len() > self.capacity() - offset {
            return Err(WireError::OutOfRange(offset));
        }
        self.bytes_mut()[offset..offset + src.len()].copy_from_slice(src);
        Ok(())
    }

    pub fn get_u16_at(&self, offset: usize) -> Result<u16, WireError> {
        let mut raw = [0u8; 2];
        self.get_bytes_at(offset, &mut raw)?;
        Ok(u16::from_be_bytes(raw))
    }

    pub fn get_u32_at(&self, offset: usize) -> Result<u32, WireError> {
        let mut raw = [0u8; 4];
        self.get_bytes_at(offset, &mut raw)?;
        Ok(u32::from_be_bytes(raw))
    }

    pub fn get_u64_at(&self, offset: usize) -> Result<u64, WireError> {
        let mut raw = [0u8; 8];
        self.get_bytes_at(offset, &mut raw)?;
        Ok(u64::from_be_bytes(raw))
    }

    pub fn get_f32_at(&self, offset: usize) -> Result<f32, WireError> {
        Ok(f32::from_bits(self.get_u32_at(offset)?))
    }

    pub fn get_f64_at(&self, offset: usize) -> Result<f64, WireError> {
        Ok(f64::from_bits(self.get_u64_at(offset)?))
    }

    pub fn set_u16_at(&mut self, offset: usize, value: u16) -> Result<(), WireError> {
        self.set_bytes_at(offset, &value.to_be_bytes())
    }

    pub fn set_u32_at(&mut self, offset: usize, value: u32) -> Result<(), WireError> {
        self.set_bytes_at(offset, &value.to_be_bytes())
    }

    pub fn set_u64_at(&mut self, offset: usize, value: u64) -> Result<(), WireError> {
        self.set_bytes_at(offset, &value.to_be_bytes())
    }

    pub fn set_f32_at(&mut self, offset: usize, value: f32) -> Result<(), WireError> {
        self.set_u32_at(offset, value.to_bits())
    }

    pub fn set_f64_at(&mut self, offset: usize, value: f64) -> Result<(), WireError> {
        self.set_u64_at(offset, value.to_bits())
    }

    // ========================================================================
    // Appends (advance the data length)
    // ========================================================================

    /// Append raw octets at the end of the data. Fails with `Overflow`
    /// when the capacity cannot hold them; against a sink this is a
    /// successful no-op.
    pub fn append_bytes(&mut self, src: &[u8]) -> Result<(), WireError> {
        if self.is_sink() {
            return Ok(());
        }
        if src.len() > self.capacity() - self.len {
            return Err(WireError::Overflow);
        }
        let offset = self.len;
        self.len += src.len();
        self.bytes_mut()[offset..offset + src.len()].copy_from_slice(src);
        Ok(())
    }

    pub fn append_u8(&mut self, value: u8) -> Result<(), WireError> {
        self.append_bytes(&[value])
    }

    pub fn append_u16(&mut self, value: u16) -> Result<(), WireError> {
        self.append_bytes(&value.to_be_bytes())
    }

    pub fn append_u32(&mut self, value: u32) -> Result<(), WireError> {
        self.append_bytes(&value.to_be_bytes())
    }

    pub fn append_u64(&mut self, value: u64) -> Result<(), WireError> {
        self.append_bytes(&value.to_be_bytes())
    }

    pub fn append_f32(&mut self, value: f32) -> Result<(), WireError> {
        self.append_u32(value.to_bits())
    }

    pub fn append_f64(&mut self, value: f64) -> Result<(), WireError> {
        self.append_u64(value.to_bits())
    }

    // ========================================================================
    // Reads (advance the read cursor)
    // ========================================================================

    /// Copy octets out at the read cursor, advancing it.
    pub fn read_bytes(&mut self, dst: &mut [u8]) -> Result<(), WireError> {
        if dst.len() > self.remaining() {
            return Err(WireError::ReadPastEnd);
        }
        dst.copy_from_slice(&self.bytes()[self.read_pos..self.read_pos + dst.len()]);
        self.read_pos += dst.len();
        Ok(())
    }

    /// Copy `len` octets out at the read cursor into a fresh vector.
    pub fn read_vec(&mut self, len: usize) -> Result<Vec<u8>, WireError> {
        if len > self.remaining() {
            return Err(WireError::ReadPastEnd);
        }
        let out = self.bytes()[self.read_pos..self.read_pos + len].to_vec();
        self.read_pos += len;
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        let mut raw = [0u8; 1];
        self.read_bytes(&mut raw)?;
        Ok(raw[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, WireError> {
        let mut raw = [0u8; 2];
        self.read_bytes(&mut raw)?;
        Ok(u16::from_be_bytes(raw))
    }

    pub fn read_u32(&mut self) -> Result<u32, WireError> {
        let mut raw = [0u8; 4];
        self.read_bytes(&mut raw)?;
        Ok(u32::from_be_bytes(raw))
    }

    pub fn read_u64(&mut self) -> Result<u64, WireError> {
        let mut raw = [0u8; 8];
        self.read_bytes(&mut raw)?;
        Ok(u64::from_be_bytes(raw))
    }

    pub fn read_f32(&mut self) -> Result<f32, WireError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, WireError> {
        Ok(f64::from_bits(self.read_u64()?))
    }
}

/// Two buffers are equal when they hold the same data octets; capacity
/// and read position do not participate.
impl PartialEq for DataBuffer<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_data() == other.as_data()
    }
}

impl Eq for DataBuffer<'_> {}

impl std::fmt::Debug for DataBuffer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataBuffer")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .field("read_pos", &self.read_pos)
            .field("sink", &self.is_sink())
            .finish()
    }
}
