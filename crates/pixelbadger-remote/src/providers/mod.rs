//! Drive provider implementations.

pub mod graph;
pub mod memory;

pub use graph::GraphDriveProvider;
pub use memory::MemoryDriveProvider;
