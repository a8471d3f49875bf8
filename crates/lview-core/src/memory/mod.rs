pub mod layout;
mod process;
mod reader;

#[cfg(test)]
pub mod mock;

pub use process::*;
pub use reader::{ByteBuffer, MemoryReader, ReadMemory, decode_c_string};

#[cfg(test)]
pub use mock::{MockMemoryBuilder, MockMemoryReader};
