//! Data models
//!
//! Domain entities as the remote backend reports them. All backend IDs are
//! numeric (`i64`); user IDs travel as strings on query parameters.

pub mod friend;
pub mod receipt;
pub mod user;

// Re-exports
pub use friend::*;
pub use receipt::*;
pub use user::*;
