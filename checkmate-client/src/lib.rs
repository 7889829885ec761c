//! CheckMate Client - HTTP client for the bill-splitting backend
//!
//! Provides network-based calls to the remote CheckMate API plus the local
//! state the screens need: a persisted session, the bill-split session with
//! optimistic claim toggling, and a supersedable receipt-scan flow.

pub mod api;
pub mod bill;
pub mod config;
pub mod error;
pub mod http;
pub mod scan;
pub mod session;

pub use api::{ParseApi, ReceiptApi};
pub use bill::{BillSession, ToggleOutcome};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use scan::ScanSession;
pub use session::{Session, SessionStorage};

// Re-export shared types for convenience
pub use shared::split::{ClaimTable, LineItem, PaymentInfo, RawReceipt, ReceiptDraft, UnitClaim};
