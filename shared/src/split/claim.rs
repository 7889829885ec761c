//! Per-unit claim tracking and server reconciliation
//!
//! The backend records claims per `original_item_id` with a claimed
//! quantity; locally the bill is expanded to units. Reconciliation maps the
//! quantity back onto units by instance index: the first `claimedQuantity`
//! units of an item are the claimed ones. Payment is recorded per original
//! item, not per unit, so one payment record covers every unit of that item.

use super::draft::{LineItem, ReceiptDraft};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Backend-confirmed payment record for an original item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInfo {
    #[serde(alias = "payerUserId")]
    pub payer_user_id: String,
    #[serde(alias = "payerName", alias = "payerDisplayName")]
    pub payer_name: String,
    #[serde(default, alias = "paidAt")]
    pub paid_at: Option<DateTime<Utc>>,
}

/// Claim state of a single unit
///
/// Paid status supersedes claimed status: a unit with payment info is never
/// presented as "claimed, unpaid" and cannot be toggled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitClaim {
    pub claimed_by_me: bool,
    pub payment: Option<PaymentInfo>,
}

impl UnitClaim {
    pub fn is_paid(&self) -> bool {
        self.payment.is_some()
    }
}

/// Authoritative server snapshot: claimed quantity and payment metadata,
/// both keyed by `original_item_id`
#[derive(Debug, Clone, Default)]
pub struct AssignmentSnapshot {
    pub claimed_quantities: HashMap<String, i32>,
    pub item_payments: HashMap<String, PaymentInfo>,
}

/// Side table of claim state, keyed by `unit_id`
#[derive(Debug, Clone, Default)]
pub struct ClaimTable {
    claims: HashMap<String, UnitClaim>,
}

impl ClaimTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for a unit; unknown units are unclaimed and unpaid
    pub fn get(&self, unit_id: &str) -> UnitClaim {
        self.claims.get(unit_id).cloned().unwrap_or_default()
    }

    pub fn is_claimed_by_me(&self, unit_id: &str) -> bool {
        self.claims
            .get(unit_id)
            .map(|c| c.claimed_by_me)
            .unwrap_or(false)
    }

    pub fn is_paid(&self, unit_id: &str) -> bool {
        self.claims
            .get(unit_id)
            .map(|c| c.is_paid())
            .unwrap_or(false)
    }

    /// Flip the local claimed flag, returning the previous state so a
    /// failed remote call can restore it exactly
    pub fn set_claimed(&mut self, unit_id: &str, claimed: bool) -> UnitClaim {
        let entry = self.claims.entry(unit_id.to_string()).or_default();
        let previous = entry.clone();
        entry.claimed_by_me = claimed;
        previous
    }

    /// Roll back a failed optimistic toggle. Only the claimed flag reverts;
    /// payment info a snapshot confirmed in the meantime is kept, since
    /// server-confirmed payment facts never regress.
    pub fn restore(&mut self, unit_id: &str, previous: UnitClaim) {
        let entry = self.claims.entry(unit_id.to_string()).or_default();
        entry.claimed_by_me = previous.claimed_by_me;
        if entry.payment.is_none() {
            entry.payment = previous.payment;
        }
    }

    /// Merge an authoritative server snapshot into the per-unit table.
    ///
    /// A unit is claimed when its instance index among units of the same
    /// original item is below that item's claimed quantity. Marking is
    /// implicitly capped at the available unit count; an over-count from
    /// the backend is logged, never fatal. Unit ids in `protect` (toggles
    /// still in flight) keep their local claimed flag so the snapshot
    /// cannot transiently revert an optimistic change; payment info is
    /// applied unconditionally.
    ///
    /// Applying the same snapshot twice yields the same table.
    pub fn apply_snapshot(
        &mut self,
        draft: &ReceiptDraft,
        snapshot: &AssignmentSnapshot,
        protect: &HashSet<String>,
    ) {
        let mut seen: HashMap<&str, i32> = HashMap::new();
        for unit in &draft.units {
            let index = seen.entry(unit.original_item_id.as_str()).or_insert(0);
            let instance = *index;
            *index += 1;

            let claimed_qty = snapshot
                .claimed_quantities
                .get(&unit.original_item_id)
                .copied()
                .unwrap_or(0);
            let payment = snapshot.item_payments.get(&unit.original_item_id).cloned();

            let entry = self.claims.entry(unit.unit_id.clone()).or_default();
            if !protect.contains(&unit.unit_id) {
                entry.claimed_by_me = instance < claimed_qty;
            }
            entry.payment = payment;
        }

        for (item_id, qty) in &snapshot.claimed_quantities {
            let available = draft.unit_count_for(item_id) as i32;
            if *qty > available {
                tracing::warn!(
                    item_id = %item_id,
                    claimed = qty,
                    available,
                    "claimed quantity exceeds expanded unit count, capping"
                );
            }
        }
    }

    /// Units currently claimed by the user and not yet paid
    pub fn claimed_unpaid<'a>(&self, draft: &'a ReceiptDraft) -> Vec<&'a LineItem> {
        draft
            .units
            .iter()
            .filter(|u| {
                self.claims
                    .get(&u.unit_id)
                    .map(|c| c.claimed_by_me && !c.is_paid())
                    .unwrap_or(false)
            })
            .collect()
    }

    /// The user's owed share across claimed, unpaid units; derived fresh on
    /// every call
    pub fn owed(&self, draft: &ReceiptDraft) -> f64 {
        draft.owed_for(self.claimed_unpaid(draft))
    }
}
