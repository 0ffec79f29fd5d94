//! Domain Layer
//!
//! Entities, value objects, the lockout policy, and collaborator contracts.

pub mod entity;
pub mod lockout;
pub mod repository;
pub mod value_object;
