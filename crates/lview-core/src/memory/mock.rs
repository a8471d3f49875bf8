//! In-memory stand-in for a game process, for tests.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::memory::ReadMemory;

/// Sparse byte map; reads touching an unwritten byte fail
#[derive(Debug, Default)]
pub struct MockMemoryReader {
    base: u64,
    bytes: BTreeMap<u64, u8>,
}

impl ReadMemory for MockMemoryReader {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        (0..size as u64)
            .map(|i| {
                self.bytes
                    .get(&(address + i))
                    .copied()
                    .ok_or_else(|| Error::read_failed(address + i, "unmapped"))
            })
            .collect()
    }

    fn base_address(&self) -> u64 {
        self.base
    }
}

#[derive(Debug, Default)]
pub struct MockMemoryBuilder {
    reader: MockMemoryReader,
}

impl MockMemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(mut self, base: u64) -> Self {
        self.reader.base = base;
        self
    }

    pub fn write_bytes(mut self, address: u64, bytes: &[u8]) -> Self {
        for (i, &b) in bytes.iter().enumerate() {
            self.reader.bytes.insert(address + i as u64, b);
        }
        self
    }

    /// Map `size` zero bytes at `address` (fields not written stay zero)
    pub fn zeroed(self, address: u64, size: usize) -> Self {
        self.write_bytes(address, &vec![0; size])
    }

    pub fn write_u8(self, address: u64, value: u8) -> Self {
        self.write_bytes(address, &[value])
    }

    pub fn write_i16(self, address: u64, value: i16) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_i32(self, address: u64, value: i32) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_u32(self, address: u64, value: u32) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_f32(self, address: u64, value: f32) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    /// Write a 32-bit pointer
    pub fn write_ptr(self, address: u64, value: u64) -> Self {
        self.write_u32(address, value as u32)
    }

    /// Write a NUL-terminated string padded to the name buffer size
    pub fn write_c_string(self, address: u64, value: &str) -> Self {
        let mut bytes = value.as_bytes().to_vec();
        bytes.resize(crate::memory::layout::object::NAME_MAX.max(bytes.len() + 1), 0);
        self.write_bytes(address, &bytes)
    }

    pub fn write_f32s(self, address: u64, values: &[f32]) -> Self {
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.write_bytes(address, &bytes)
    }

    pub fn build(self) -> MockMemoryReader {
        self.reader
    }
}
