//! Client-related types shared across crates
//!
//! Request/response DTOs for the remote CheckMate API. The backend answers
//! every call with a flat JSON object carrying `success` and an optional
//! `message`; typed payload fields ride alongside. Field names on the wire
//! are camelCase except the receipt-create body, which the backend expects
//! in snake_case.

use crate::models::{Friend, FriendRequest, ReceiptSummary};
use crate::split::claim::{AssignmentSnapshot, PaymentInfo};
use crate::split::draft::ReceiptDraft;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

// =============================================================================
// Common
// =============================================================================

/// Plain acknowledgment (`{ success, message }`) for operations without a payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email_or_phone: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Signup request, validated client-side before it is sent
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

// =============================================================================
// Receipt API DTOs
// =============================================================================

/// Item entry in a receipt-create body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReceiptItem {
    pub name: String,
    pub price: f64,
    pub qty: i32,
    pub claimed_by: Option<String>,
}

/// Receipt-create body (snake_case, the sharing backend's contract)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReceiptRequest {
    pub restaurant_name: String,
    pub total_amount: f64,
    pub tax: f64,
    pub tip: f64,
    pub subtotal: f64,
    pub items: Vec<CreateReceiptItem>,
    pub participants: Vec<String>,
    pub status: String,
    pub share_code: String,
}

impl CreateReceiptRequest {
    /// Build a create request from a reviewed draft.
    ///
    /// Units are folded back to `(name, price)` line items with quantities,
    /// and a fresh share code is generated locally.
    pub fn from_draft(draft: &ReceiptDraft, participants: Vec<String>) -> Self {
        let mut items: Vec<CreateReceiptItem> = Vec::new();
        for unit in &draft.units {
            match items.iter_mut().find(|i| {
                i.name == unit.name && i.price == unit.unit_price
            }) {
                Some(existing) => existing.qty += 1,
                None => items.push(CreateReceiptItem {
                    name: unit.name.clone(),
                    price: unit.unit_price,
                    qty: 1,
                    claimed_by: None,
                }),
            }
        }

        Self {
            restaurant_name: draft.merchant_name.clone(),
            total_amount: draft.totals.total,
            tax: draft.totals.tax,
            tip: draft.totals.tip,
            subtotal: draft.totals.subtotal,
            items,
            participants,
            status: "pending".to_string(),
            share_code: new_share_code(),
        }
    }
}

/// Short human-shareable code for a freshly created receipt
pub fn new_share_code() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

/// Receipt-create response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceiptResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub receipt_id: Option<i64>,
}

/// Pending/activity listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptListResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub receipts: Vec<ReceiptSummary>,
}

/// Claim/unclaim response; `owed_amount` is the server-confirmed figure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub owed_amount: Option<f64>,
}

/// Assignment snapshot response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentsResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// Claimed quantity per original item id
    #[serde(default)]
    pub assignments: HashMap<String, i32>,
    /// Payment metadata per original item id
    #[serde(default, alias = "itemPaymentInfo")]
    pub item_payments: HashMap<String, PaymentInfo>,
    #[serde(default)]
    pub owed_amount: Option<f64>,
}

impl AssignmentsResponse {
    pub fn into_snapshot(self) -> AssignmentSnapshot {
        AssignmentSnapshot {
            claimed_quantities: self.assignments,
            item_payments: self.item_payments,
        }
    }
}

/// Payment settlement response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub amount_paid: Option<f64>,
}

/// Add-participants body for an existing receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddParticipantsRequest {
    pub participants: Vec<String>,
}

// =============================================================================
// Friends API DTOs
// =============================================================================

/// Friends listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendsListResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub friends: Vec<Friend>,
}

/// Pending friend requests response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestsResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub requests: Vec<FriendRequest>,
}

// =============================================================================
// Balance API DTOs
// =============================================================================

/// Balance query/mutation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::raw::RawReceipt;

    #[test]
    fn test_share_code_shape() {
        let code = new_share_code();
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(code, code.to_uppercase());
    }

    #[test]
    fn test_create_request_folds_units_back_to_quantities() {
        let raw: RawReceipt = serde_json::from_str(
            r#"{"merchant": "Mario's", "total": 39.0, "tax": 3.0, "tip": 6.0, "subtotal": 30.0,
                "items": [
                    {"itemId": "t", "name": "Taco", "price": 5.0, "qty": 2},
                    {"itemId": "s", "name": "Soda", "price": 2.0}
                ]}"#,
        )
        .unwrap();
        let draft = ReceiptDraft::from_raw(&raw);
        let req = CreateReceiptRequest::from_draft(&draft, vec!["sarah@email.com".into()]);

        assert_eq!(req.items.len(), 2);
        assert_eq!(req.items[0].qty, 2);
        assert_eq!(req.items[1].qty, 1);
        assert_eq!(req.status, "pending");
        assert!(req.items.iter().all(|i| i.claimed_by.is_none()));
    }

    #[test]
    fn test_assignments_response_aliases() {
        let resp: AssignmentsResponse = serde_json::from_str(
            r#"{
                "success": true,
                "assignments": {"3": 2},
                "itemPaymentInfo": {"3": {"payerUserId": "42", "payerName": "Sarah"}},
                "owedAmount": 13.0
            }"#,
        )
        .unwrap();
        assert_eq!(resp.owed_amount, Some(13.0));
        let snapshot = resp.into_snapshot();
        assert_eq!(snapshot.claimed_quantities["3"], 2);
        assert_eq!(snapshot.item_payments["3"].payer_name, "Sarah");
    }

    #[test]
    fn test_signup_validation() {
        let ok = SignupRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone_number: "555-0100".into(),
            password: "hunter22".into(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = SignupRequest {
            email: "not-an-email".into(),
            ..ok.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = SignupRequest {
            password: "abc".into(),
            ..ok
        };
        assert!(short_password.validate().is_err());
    }
}
