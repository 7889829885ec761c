//! Bill-split session: optimistic claim toggling over a shared receipt
//!
//! One [`BillSession`] exists per opened receipt. All claim state lives
//! behind a single async mutex; the lock is never held across a network
//! await, so toggles on different units proceed concurrently while each
//! individual unit admits at most one outstanding request.

use crate::api::ReceiptApi;
use crate::error::{ClientError, ClientResult};
use shared::split::money::is_payable;
use shared::split::{AssignmentSnapshot, ClaimTable, ReceiptDraft, UnitClaim};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Result of a toggle attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// The toggle was accepted by the server
    Applied { claimed: bool, owed: f64 },
    /// A request for this unit is already outstanding; the tap was dropped
    AlreadyPending,
    /// The unit is paid and can no longer change hands
    Paid,
}

struct BillState {
    draft: ReceiptDraft,
    claims: ClaimTable,
    /// Unit ids with a claim/unclaim request outstanding
    in_flight: HashSet<String>,
    /// A pay request is outstanding; further pay attempts are refused
    pay_in_flight: bool,
    has_paid: bool,
    /// Server-confirmed owed figure; cleared by any local mutation so a
    /// stale number is never shown over a fresher local derivation
    server_owed: Option<f64>,
}

impl BillState {
    fn effective_owed(&self) -> f64 {
        if self.has_paid {
            return 0.0;
        }
        self.server_owed
            .unwrap_or_else(|| self.claims.owed(&self.draft))
    }
}

/// Stateful claim/payment flow for one shared receipt
pub struct BillSession<A: ReceiptApi> {
    api: Arc<A>,
    receipt_id: i64,
    state: Mutex<BillState>,
}

impl<A: ReceiptApi> BillSession<A> {
    /// Open a session over a draft that already carries a backend id
    pub fn new(api: Arc<A>, draft: ReceiptDraft) -> ClientResult<Self> {
        let receipt_id = draft
            .receipt_id
            .ok_or_else(|| ClientError::InvalidResponse("Receipt has no backend id".to_string()))?;
        Ok(Self {
            api,
            receipt_id,
            state: Mutex::new(BillState {
                draft,
                claims: ClaimTable::new(),
                in_flight: HashSet::new(),
                pay_in_flight: false,
                has_paid: false,
                server_owed: None,
            }),
        })
    }

    pub fn receipt_id(&self) -> i64 {
        self.receipt_id
    }

    pub async fn draft(&self) -> ReceiptDraft {
        self.state.lock().await.draft.clone()
    }

    /// The user's current owed amount; the last server-confirmed figure
    /// when one is current, a local derivation otherwise
    pub async fn owed_amount(&self) -> f64 {
        self.state.lock().await.effective_owed()
    }

    pub async fn has_paid(&self) -> bool {
        self.state.lock().await.has_paid
    }

    /// Claim state for one unit
    pub async fn unit_claim(&self, unit_id: &str) -> UnitClaim {
        self.state.lock().await.claims.get(unit_id)
    }

    /// Flip the user's claim on one unit, optimistically.
    ///
    /// The local flag flips before the request is sent; on failure the
    /// previous state is restored exactly and the error is propagated.
    /// While the request is outstanding further taps on the same unit
    /// return [`ToggleOutcome::AlreadyPending`].
    pub async fn toggle_unit(&self, unit_id: &str) -> ClientResult<ToggleOutcome> {
        let (item_id, claiming, previous) = {
            let mut state = self.state.lock().await;

            let unit = state
                .draft
                .unit(unit_id)
                .ok_or_else(|| ClientError::UnknownUnit(unit_id.to_string()))?;
            let item_id = unit.original_item_id.clone();

            if state.has_paid || state.claims.is_paid(unit_id) {
                return Ok(ToggleOutcome::Paid);
            }
            if state.in_flight.contains(unit_id) {
                return Ok(ToggleOutcome::AlreadyPending);
            }

            let claiming = !state.claims.is_claimed_by_me(unit_id);
            let previous = state.claims.set_claimed(unit_id, claiming);
            state.server_owed = None;
            state.in_flight.insert(unit_id.to_string());
            (item_id, claiming, previous)
        };

        let result = if claiming {
            self.api.claim_item(self.receipt_id, &item_id, 1).await
        } else {
            self.api.unclaim_item(self.receipt_id, &item_id).await
        };

        let mut state = self.state.lock().await;
        state.in_flight.remove(unit_id);
        match result {
            Ok(response) => {
                // a response that predates another unit's pending toggle
                // excludes its optimistic claim, so it must not be shown
                state.server_owed = if state.in_flight.is_empty() {
                    response.owed_amount
                } else {
                    None
                };
                Ok(ToggleOutcome::Applied {
                    claimed: claiming,
                    owed: state.effective_owed(),
                })
            }
            Err(err) => {
                state.claims.restore(unit_id, previous);
                state.server_owed = None;
                Err(err)
            }
        }
    }

    /// Pull the authoritative assignment snapshot and reconcile it.
    ///
    /// Units with a toggle still outstanding keep their optimistic flag;
    /// the server's owed figure is only adopted when nothing is in flight.
    pub async fn refresh(&self) -> ClientResult<()> {
        let response = self.api.item_assignments(self.receipt_id).await?;
        let owed = response.owed_amount;
        let snapshot: AssignmentSnapshot = response.into_snapshot();

        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let protect = state.in_flight.clone();
        state.claims.apply_snapshot(&state.draft, &snapshot, &protect);
        if protect.is_empty() {
            state.server_owed = owed;
        }
        Ok(())
    }

    /// Settle the user's owed amount.
    ///
    /// Refuses sub-cent amounts locally and admits at most one outstanding
    /// pay request; on success the session is marked paid and a best-effort
    /// refresh pulls the backend's payment records.
    pub async fn pay(&self) -> ClientResult<f64> {
        {
            let mut state = self.state.lock().await;
            if state.pay_in_flight {
                return Err(ClientError::PaymentPending);
            }
            if !is_payable(state.effective_owed()) {
                return Err(ClientError::NothingOwed);
            }
            state.pay_in_flight = true;
        }

        let result = self.api.pay_receipt(self.receipt_id).await;

        let amount = {
            let mut state = self.state.lock().await;
            state.pay_in_flight = false;
            match result {
                Ok(response) => {
                    state.has_paid = true;
                    state.server_owed = None;
                    response.amount_paid.unwrap_or(0.0)
                }
                Err(err) => return Err(err),
            }
        };

        if let Err(err) = self.refresh().await {
            tracing::warn!(error = %err, "post-payment refresh failed");
        }
        Ok(amount)
    }
}
