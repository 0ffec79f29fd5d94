//! Domain Entities

pub mod account;
pub mod refresh_token;

pub use account::Account;
pub use refresh_token::{NewRefreshToken, RefreshToken};
