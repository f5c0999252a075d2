//! Document store backends for the repository ports.

mod memory;

pub use memory::{MemoryPostRepository, MemoryUserRepository};

#[cfg(test)]
mod tests;
