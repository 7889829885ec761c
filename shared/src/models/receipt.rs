//! Receipt Model

use crate::split::draft::ReceiptDraft;
use crate::split::raw::{RawItem, RawReceipt};
use serde::{Deserialize, Serialize};

/// Receipt lifecycle status from the sharing backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Paid,
}

/// Receipt entry as listed by the pending/activity endpoints
///
/// Items come back in the backend's raw shape; callers normalize through
/// `ReceiptDraft::from_raw` before any split work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptSummary {
    #[serde(alias = "receiptId")]
    pub receipt_id: i64,
    #[serde(alias = "restaurantName")]
    pub restaurant_name: String,
    #[serde(alias = "totalAmount", alias = "total")]
    pub total_amount: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub tip: f64,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub status: ReceiptStatus,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "uploaderName")]
    pub uploader_name: Option<String>,
    #[serde(default)]
    pub items: Vec<RawItem>,
}

impl ReceiptSummary {
    /// Expand this listing entry into a claimable draft carrying its
    /// backend id
    pub fn to_draft(&self) -> ReceiptDraft {
        let raw = RawReceipt {
            merchant: Some(self.restaurant_name.clone()),
            date: self.date.clone(),
            items: self.items.clone(),
            subtotal: (self.subtotal > 0.0).then_some(self.subtotal),
            tax: (self.tax > 0.0).then_some(self.tax),
            tip: (self.tip > 0.0).then_some(self.tip),
            total: Some(self.total_amount),
        };
        ReceiptDraft::from_raw(&raw).with_receipt_id(self.receipt_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_to_draft_carries_id_and_items() {
        let summary: ReceiptSummary = serde_json::from_str(
            r#"{"receiptId": 5, "restaurantName": "Mario's", "totalAmount": 39.0,
                "tax": 3.0, "tip": 6.0, "subtotal": 30.0, "status": "accepted",
                "items": [{"itemId": "t", "name": "Taco", "price": 5.0, "qty": 2}]}"#,
        )
        .unwrap();
        assert_eq!(summary.status, ReceiptStatus::Accepted);

        let draft = summary.to_draft();
        assert_eq!(draft.receipt_id, Some(5));
        assert_eq!(draft.merchant_name, "Mario's");
        assert_eq!(draft.units.len(), 2);
        assert_eq!(draft.totals.tip, 6.0);
    }
}
