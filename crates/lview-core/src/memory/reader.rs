use crate::error::{Error, Result};
use crate::memory::ProcessHandle;
use crate::memory::layout::object::NAME_MAX;

/// Read access to the target process.
///
/// Only `read_bytes` and `base_address` are required; the typed helpers
/// decode little-endian values on top of it.
pub trait ReadMemory {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>>;

    /// Base address of the main module
    fn base_address(&self) -> u64;

    fn read_u8(&self, address: u64) -> Result<u8> {
        let bytes = self.read_bytes(address, 1)?;
        Ok(bytes[0])
    }

    fn read_i32(&self, address: u64) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array(address)?))
    }

    fn read_u32(&self, address: u64) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array(address)?))
    }

    fn read_f32(&self, address: u64) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array(address)?))
    }

    fn read_u64(&self, address: u64) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array(address)?))
    }

    /// Read a pointer of the target's width (32-bit)
    fn read_ptr(&self, address: u64) -> Result<u64> {
        self.read_u32(address).map(u64::from)
    }

    /// Read a NUL-terminated string of at most `NAME_MAX` bytes
    fn read_c_string(&self, address: u64) -> Result<String> {
        let bytes = self.read_bytes(address, NAME_MAX)?;
        Ok(decode_c_string(&bytes))
    }

    fn read_array<const N: usize>(&self, address: u64) -> Result<[u8; N]> {
        let bytes = self.read_bytes(address, N)?;
        bytes
            .try_into()
            .map_err(|_| Error::read_failed(address, format!("short read of {} bytes", N)))
    }
}

/// Decode bytes up to the first NUL, replacing invalid UTF-8
pub fn decode_c_string(bytes: &[u8]) -> String {
    let len = memchr::memchr(0, bytes).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..len]).into_owned()
}

/// Little-endian field access into a block already copied out of the process
#[derive(Debug, Clone, Copy)]
pub struct ByteBuffer<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteBuffer<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Fields past the end of the block (or past `usize`) read as zero
    fn field<const N: usize>(&self, offset: u64) -> [u8; N] {
        usize::try_from(offset)
            .ok()
            .and_then(|start| Some(start..start.checked_add(N)?))
            .and_then(|range| self.bytes.get(range))
            .and_then(|slice| slice.try_into().ok())
            .unwrap_or([0; N])
    }

    pub fn u8_at(&self, offset: u64) -> u8 {
        self.field::<1>(offset)[0]
    }

    pub fn i16_at(&self, offset: u64) -> i16 {
        i16::from_le_bytes(self.field(offset))
    }

    pub fn i32_at(&self, offset: u64) -> i32 {
        i32::from_le_bytes(self.field(offset))
    }

    pub fn u32_at(&self, offset: u64) -> u32 {
        u32::from_le_bytes(self.field(offset))
    }

    pub fn f32_at(&self, offset: u64) -> f32 {
        f32::from_le_bytes(self.field(offset))
    }

    pub fn ptr_at(&self, offset: u64) -> u64 {
        u64::from(self.u32_at(offset))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// [`ReadMemory`] over an open process
pub struct MemoryReader<'a> {
    process: &'a ProcessHandle,
}

impl<'a> MemoryReader<'a> {
    pub fn new(process: &'a ProcessHandle) -> Self {
        Self { process }
    }

    pub fn process(&self) -> &ProcessHandle {
        self.process
    }
}

impl ReadMemory for MemoryReader<'_> {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        self.process.read_bytes(address, size)
    }

    fn base_address(&self) -> u64 {
        self.process.base_address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MockMemoryBuilder;

    #[test]
    fn test_typed_reads() {
        let reader = MockMemoryBuilder::new()
            .base(0x40_0000)
            .write_u32(0x1000, 0xDEAD_BEEF)
            .write_f32(0x1004, 512.5)
            .write_i32(0x1008, -200)
            .build();

        assert_eq!(reader.read_u32(0x1000).unwrap(), 0xDEAD_BEEF);
        assert_eq!(reader.read_ptr(0x1000).unwrap(), 0xDEAD_BEEF);
        assert_eq!(reader.read_f32(0x1004).unwrap(), 512.5);
        assert_eq!(reader.read_i32(0x1008).unwrap(), -200);
        assert_eq!(reader.base_address(), 0x40_0000);
    }

    #[test]
    fn test_unmapped_read_fails() {
        let reader = MockMemoryBuilder::new().write_u32(0x1000, 1).build();
        assert!(reader.read_u32(0x2000).is_err());
    }

    #[test]
    fn test_read_c_string() {
        let reader = MockMemoryBuilder::new()
            .write_c_string(0x5000, "SRU_ChaosMinionRanged")
            .build();
        assert_eq!(
            reader.read_c_string(0x5000).unwrap(),
            "SRU_ChaosMinionRanged"
        );
    }

    #[test]
    fn test_decode_c_string_without_terminator() {
        assert_eq!(decode_c_string(b"ashe"), "ashe");
        assert_eq!(decode_c_string(b"ashe\0garbage"), "ashe");
        assert_eq!(decode_c_string(b"\0"), "");
    }

    #[test]
    fn test_byte_buffer_out_of_range_is_zero() {
        let bytes = [1u8, 0, 0, 0, 0, 0, 0x80, 0x3F];
        let buffer = ByteBuffer::new(&bytes);
        assert_eq!(buffer.u32_at(0), 1);
        assert_eq!(buffer.f32_at(4), 1.0);
        assert_eq!(buffer.u32_at(6), 0);
        assert_eq!(buffer.u8_at(100), 0);
    }

    #[test]
    fn test_byte_buffer_offset_near_u64_max_is_zero() {
        let bytes = [0xFFu8; 8];
        let buffer = ByteBuffer::new(&bytes);
        assert_eq!(buffer.u32_at(u64::MAX), 0);
        assert_eq!(buffer.u32_at(u64::MAX - 2), 0);
        assert_eq!(buffer.f32_at(usize::MAX as u64), 0.0);
    }
}
