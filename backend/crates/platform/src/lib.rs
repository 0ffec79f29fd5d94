//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (CSPRNG, Base64, constant-time compare)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Caller context threaded through engine operations

pub mod client;
pub mod crypto;
pub mod password;
