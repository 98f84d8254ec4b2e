//! Storer adapters

mod memory;

pub use memory::MemoryStore;
