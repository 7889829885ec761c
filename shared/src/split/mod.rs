//! Bill-split engine
//!
//! A scanned or fetched receipt is normalized ([`raw`]), expanded into one
//! claimable unit per physical item ([`draft`]), and tracked through the
//! claim/payment lifecycle ([`claim`]). All monetary math runs through
//! [`money`] with `Decimal` precision.

pub mod claim;
pub mod draft;
pub mod money;
pub mod raw;

pub use claim::{AssignmentSnapshot, ClaimTable, PaymentInfo, UnitClaim};
pub use draft::{BillTotals, LineItem, ReceiptDraft};
pub use raw::{RawItem, RawReceipt};
