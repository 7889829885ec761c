//! Remote API surface, grouped by backend service
//!
//! Each group is an `impl HttpClient` block mirroring the backend's
//! endpoint families. The two traits below are the seams the stateful
//! sessions ([`crate::bill::BillSession`], [`crate::scan::ScanSession`])
//! depend on, so their logic is testable without a network.

pub mod auth;
pub mod balance;
pub mod friends;
pub mod receipts;

use crate::ClientResult;
use async_trait::async_trait;
use shared::client::{AssignmentsResponse, ClaimResponse, PayResponse};
use shared::split::RawReceipt;

/// Claim/assignment/payment operations for one shared receipt
#[async_trait]
pub trait ReceiptApi: Send + Sync {
    /// Claim `quantity` of an original item for the current user
    async fn claim_item(
        &self,
        receipt_id: i64,
        item_id: &str,
        quantity: i32,
    ) -> ClientResult<ClaimResponse>;

    /// Release the current user's claim on an original item
    async fn unclaim_item(&self, receipt_id: i64, item_id: &str) -> ClientResult<ClaimResponse>;

    /// Fetch the authoritative assignment snapshot
    async fn item_assignments(&self, receipt_id: i64) -> ClientResult<AssignmentsResponse>;

    /// Settle the current user's owed amount
    async fn pay_receipt(&self, receipt_id: i64) -> ClientResult<PayResponse>;
}

/// Receipt-image parsing
#[async_trait]
pub trait ParseApi: Send + Sync {
    /// Send raw image bytes to the parsing backend
    async fn parse_receipt(&self, image: Vec<u8>) -> ClientResult<RawReceipt>;
}
