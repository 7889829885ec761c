//! Shared types for the CheckMate client
//!
//! Common types used across crates: domain models, API request/response
//! DTOs, and the bill-split engine (quantity expansion, claim tracking,
//! reconciliation, owed-amount math).

pub mod client;
pub mod models;
pub mod split;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Split engine re-exports (for convenient access)
pub use split::{ClaimTable, LineItem, PaymentInfo, ReceiptDraft};
