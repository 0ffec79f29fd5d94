//! Value Objects

pub mod account_id;
pub mod email;
pub mod user_name;

pub use account_id::AccountId;
pub use email::Email;
pub use user_name::UserName;
