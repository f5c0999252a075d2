//! # Sogram Infrastructure
//!
//! Concrete implementations of the ports defined in `sogram-core`:
//! JWT session tokens, Argon2 password hashing, and the in-process
//! document store backing the repositories.

pub mod auth;
pub mod store;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use store::{MemoryPostRepository, MemoryUserRepository};
