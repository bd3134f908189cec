//! Pool config store implementations.

mod memory;

pub use memory::InMemoryPoolStore;
