//! Receipts API
//!
//! Receipt creation/sharing, pending and activity listings, per-item
//! claiming, assignment snapshots and payment. The backend addresses
//! everything with query parameters; `userId` always travels alongside.

use crate::api::{ParseApi, ReceiptApi};
use crate::{ClientError, ClientResult, HttpClient};
use async_trait::async_trait;
use shared::client::{
    Ack, AddParticipantsRequest, AssignmentsResponse, ClaimResponse, CreateReceiptRequest,
    CreateReceiptResponse, PayResponse, ReceiptListResponse,
};
use shared::models::ReceiptSummary;
use shared::split::RawReceipt;

impl HttpClient {
    /// Create and share a receipt; returns the backend receipt id
    pub async fn create_receipt(&self, request: &CreateReceiptRequest) -> ClientResult<i64> {
        if request.participants.is_empty() {
            return Err(ClientError::Validation(
                "At least one participant is required".to_string(),
            ));
        }
        let user_id = self.user_id()?.to_string();
        let response: CreateReceiptResponse = self
            .post("receipts/create", &[("userId", user_id)], request)
            .await?;
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        response
            .receipt_id
            .ok_or_else(|| ClientError::InvalidResponse("Missing receipt id".to_string()))
    }

    /// Receipts shared with the user and awaiting a response
    pub async fn pending_receipts(&self) -> ClientResult<Vec<ReceiptSummary>> {
        let user_id = self.user_id()?.to_string();
        let response: ReceiptListResponse = self
            .get("receipts/pending", &[("userId", user_id)])
            .await?;
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        Ok(response.receipts)
    }

    /// Full history: accepted, declined and uploaded receipts
    pub async fn activity_receipts(&self) -> ClientResult<Vec<ReceiptSummary>> {
        let user_id = self.user_id()?.to_string();
        let response: ReceiptListResponse = self
            .get("receipts/activity", &[("userId", user_id)])
            .await?;
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        Ok(response.receipts)
    }

    /// Accept a shared receipt
    pub async fn accept_receipt(&self, receipt_id: i64) -> ClientResult<()> {
        self.respond_to_receipt("receipts/accept", receipt_id).await
    }

    /// Decline a shared receipt
    pub async fn decline_receipt(&self, receipt_id: i64) -> ClientResult<()> {
        self.respond_to_receipt("receipts/decline", receipt_id).await
    }

    async fn respond_to_receipt(&self, path: &str, receipt_id: i64) -> ClientResult<()> {
        let user_id = self.user_id()?.to_string();
        let response: Ack = self
            .post_empty(
                path,
                &[("receiptId", receipt_id.to_string()), ("userId", user_id)],
            )
            .await?;
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        Ok(())
    }

    /// Invite more participants to an existing receipt
    pub async fn add_participants(
        &self,
        receipt_id: i64,
        participant_emails: Vec<String>,
    ) -> ClientResult<()> {
        let user_id = self.user_id()?.to_string();
        let body = AddParticipantsRequest {
            participants: participant_emails,
        };
        let response: Ack = self
            .post(
                "receipts/add-participants",
                &[("receiptId", receipt_id.to_string()), ("userId", user_id)],
                &body,
            )
            .await?;
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        Ok(())
    }
}

#[async_trait]
impl ReceiptApi for HttpClient {
    async fn claim_item(
        &self,
        receipt_id: i64,
        item_id: &str,
        quantity: i32,
    ) -> ClientResult<ClaimResponse> {
        let user_id = self.user_id()?.to_string();
        let response: ClaimResponse = self
            .post_empty(
                "receipts/items/claim",
                &[
                    ("receiptId", receipt_id.to_string()),
                    ("itemId", item_id.to_string()),
                    ("userId", user_id),
                    ("quantity", quantity.to_string()),
                ],
            )
            .await?;
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        Ok(response)
    }

    async fn unclaim_item(&self, receipt_id: i64, item_id: &str) -> ClientResult<ClaimResponse> {
        let user_id = self.user_id()?.to_string();
        let response: ClaimResponse = self
            .delete(
                "receipts/items/claim",
                &[
                    ("receiptId", receipt_id.to_string()),
                    ("itemId", item_id.to_string()),
                    ("userId", user_id),
                ],
            )
            .await?;
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        Ok(response)
    }

    async fn item_assignments(&self, receipt_id: i64) -> ClientResult<AssignmentsResponse> {
        let user_id = self.user_id()?.to_string();
        let response: AssignmentsResponse = self
            .get(
                "receipts/items/assignments",
                &[("receiptId", receipt_id.to_string()), ("userId", user_id)],
            )
            .await?;
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        Ok(response)
    }

    async fn pay_receipt(&self, receipt_id: i64) -> ClientResult<PayResponse> {
        let user_id = self.user_id()?.to_string();
        let response: PayResponse = self
            .post_empty(
                "receipts/pay",
                &[("receiptId", receipt_id.to_string()), ("userId", user_id)],
            )
            .await?;
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        Ok(response)
    }
}

#[async_trait]
impl ParseApi for HttpClient {
    async fn parse_receipt(&self, image: Vec<u8>) -> ClientResult<RawReceipt> {
        if image.is_empty() {
            return Err(ClientError::Validation("Empty image".to_string()));
        }
        self.post_bytes("receipt/parse", image).await
    }
}
