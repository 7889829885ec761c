//! Receipt-scan flow with supersession
//!
//! Parsing a photo can take a long time; the user may retake the picture
//! before the first parse returns. Each scan bumps a generation counter and
//! a result is only surfaced when its generation is still the latest, so a
//! slow early parse can never overwrite a newer one.

use crate::api::ParseApi;
use crate::error::ClientResult;
use shared::split::ReceiptDraft;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Supersedable photograph-to-draft pipeline
pub struct ScanSession<A: ParseApi> {
    api: Arc<A>,
    generation: AtomicU64,
}

impl<A: ParseApi> ScanSession<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            generation: AtomicU64::new(0),
        }
    }

    /// Parse a receipt photograph into an expanded draft.
    ///
    /// Returns `Ok(None)` when a newer scan was started while this one was
    /// in flight; the caller drops the stale result without comment.
    pub async fn scan(&self, image: Vec<u8>) -> ClientResult<Option<ReceiptDraft>> {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let raw = self.api.parse_receipt(image).await?;

        if self.generation.load(Ordering::SeqCst) != my_generation {
            tracing::debug!(generation = my_generation, "scan superseded, dropping result");
            return Ok(None);
        }
        Ok(Some(ReceiptDraft::from_raw(&raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shared::split::RawReceipt;
    use tokio::sync::Notify;

    struct GatedParse {
        gate: Notify,
    }

    #[async_trait]
    impl ParseApi for GatedParse {
        async fn parse_receipt(&self, image: Vec<u8>) -> ClientResult<RawReceipt> {
            // first byte selects the merchant so tests can tell results apart
            let merchant = format!("Merchant {}", image[0]);
            self.gate.notified().await;
            Ok(serde_json::from_str(&format!(
                r#"{{"merchant": "{merchant}", "total": 10.0,
                     "items": [{{"itemId": "a", "name": "Item", "price": 10.0}}]}}"#
            ))
            .unwrap())
        }
    }

    #[tokio::test]
    async fn test_single_scan_produces_draft() {
        let api = Arc::new(GatedParse { gate: Notify::new() });
        let session = Arc::new(ScanSession::new(api.clone()));

        let handle = {
            let session = session.clone();
            tokio::spawn(async move { session.scan(vec![1]).await })
        };
        tokio::task::yield_now().await;
        api.gate.notify_one();

        let draft = handle.await.unwrap().unwrap().expect("not superseded");
        assert_eq!(draft.merchant_name, "Merchant 1");
        assert_eq!(draft.units.len(), 1);
    }

    #[tokio::test]
    async fn test_older_scan_is_superseded() {
        let api = Arc::new(GatedParse { gate: Notify::new() });
        let session = Arc::new(ScanSession::new(api.clone()));

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.scan(vec![1]).await })
        };
        tokio::task::yield_now().await;
        let second = {
            let session = session.clone();
            tokio::spawn(async move { session.scan(vec![2]).await })
        };
        tokio::task::yield_now().await;

        // release both parses; the first finished after being superseded
        api.gate.notify_one();
        api.gate.notify_one();

        assert!(first.await.unwrap().unwrap().is_none());
        let draft = second.await.unwrap().unwrap().expect("latest scan wins");
        assert_eq!(draft.merchant_name, "Merchant 2");
    }
}
