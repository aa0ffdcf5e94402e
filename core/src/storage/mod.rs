//! Storage areas backing [`crate::store::MappingStore`].

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;
