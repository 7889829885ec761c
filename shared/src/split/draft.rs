//! Receipt draft and quantity expansion
//!
//! Claiming happens at unit granularity (a user may take 2 of 3 identical
//! items), so a raw item with `qty = N` is expanded into exactly N units
//! that share one `original_item_id` and differ only in `unit_id`.

use super::money::{sum_shares, to_decimal, to_f64, unit_share};
use super::raw::RawReceipt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One physical unit of a line item, the atomic claimable entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique per unit: `"{original_item_id}_{instance}"`
    pub unit_id: String,
    /// Identifier the backend recognizes for claim/unclaim; shared by all
    /// units expanded from one raw item
    pub original_item_id: String,
    pub name: String,
    pub unit_price: f64,
}

/// Monetary summary of a bill; `total` is authoritative, the rest may be derived
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BillTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub tip: f64,
    pub total: f64,
}

/// In-memory representation of a parsed or fetched receipt, expanded to
/// unit granularity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptDraft {
    /// Backend receipt id; None until the receipt has been created/shared
    pub receipt_id: Option<i64>,
    pub merchant_name: String,
    pub date: String,
    pub units: Vec<LineItem>,
    pub totals: BillTotals,
}

impl ReceiptDraft {
    /// Normalize a backend-shaped receipt into an expanded draft.
    ///
    /// Subtotal, when not supplied, is the sum of all unit prices. Tip,
    /// when not supplied, is `max(0, total - subtotal - tax)`. Neither
    /// derivation can produce a negative displayed value.
    pub fn from_raw(raw: &RawReceipt) -> Self {
        let mut units = Vec::new();
        for (index, item) in raw.items.iter().enumerate() {
            let base_id = item.base_id(index);
            let name = item.display_name();
            let unit_price = if item.price.is_finite() {
                item.price.max(0.0)
            } else {
                0.0
            };
            for instance in 0..item.qty {
                units.push(LineItem {
                    unit_id: format!("{}_{}", base_id, instance),
                    original_item_id: base_id.clone(),
                    name: name.clone(),
                    unit_price,
                });
            }
        }

        let tax = raw.tax.unwrap_or(0.0).max(0.0);
        let total = raw.total.unwrap_or(0.0).max(0.0);

        // A zero subtotal from the parser means "could not read it".
        let subtotal = match raw.subtotal.filter(|v| *v > 0.0) {
            Some(v) => v,
            None => {
                let sum: Decimal = units.iter().map(|u| to_decimal(u.unit_price)).sum();
                to_f64(sum)
            }
        };
        let tip = match raw.tip.filter(|v| *v > 0.0) {
            Some(v) => v,
            None => {
                let derived = to_decimal(total) - to_decimal(subtotal) - to_decimal(tax);
                to_f64(derived.max(Decimal::ZERO))
            }
        };

        Self {
            receipt_id: None,
            merchant_name: raw
                .merchant
                .clone()
                .unwrap_or_else(|| "Unknown Merchant".to_string()),
            date: raw
                .date
                .clone()
                .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string()),
            units,
            totals: BillTotals {
                subtotal,
                tax,
                tip,
                total,
            },
        }
    }

    /// Attach the backend id after the receipt has been created or fetched
    pub fn with_receipt_id(mut self, receipt_id: i64) -> Self {
        self.receipt_id = Some(receipt_id);
        self
    }

    pub fn unit(&self, unit_id: &str) -> Option<&LineItem> {
        self.units.iter().find(|u| u.unit_id == unit_id)
    }

    /// Number of units expanded from one original item
    pub fn unit_count_for(&self, original_item_id: &str) -> usize {
        self.units
            .iter()
            .filter(|u| u.original_item_id == original_item_id)
            .count()
    }

    /// This unit's zero-based position among units sharing its original item
    pub fn instance_index(&self, unit_id: &str) -> Option<usize> {
        let unit = self.unit(unit_id)?;
        self.units
            .iter()
            .filter(|u| u.original_item_id == unit.original_item_id)
            .position(|u| u.unit_id == unit_id)
    }

    /// Owed amount for an arbitrary set of units, with proportional tax/tip
    pub fn owed_for<'a, I>(&self, units: I) -> f64
    where
        I: IntoIterator<Item = &'a LineItem>,
    {
        let t = &self.totals;
        sum_shares(
            units
                .into_iter()
                .map(|u| unit_share(u.unit_price, t.subtotal, t.tax, t.tip)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::raw::RawReceipt;

    fn parse(json: &str) -> ReceiptDraft {
        let raw: RawReceipt = serde_json::from_str(json).unwrap();
        ReceiptDraft::from_raw(&raw)
    }

    #[test]
    fn test_expansion_count_equals_qty_sum() {
        let draft = parse(
            r#"{
                "merchant": "Mario's",
                "total": 39.0, "tax": 3.0, "subtotal": 30.0,
                "items": [
                    {"itemId": "t", "name": "Taco", "price": 5.0, "qty": 2},
                    {"itemId": "s", "name": "Soda", "price": 2.0},
                    {"itemId": "w", "name": "Water", "price": 0.0, "qty": 3}
                ]
            }"#,
        );
        assert_eq!(draft.units.len(), 6);
        assert!(draft.units.iter().all(|u| {
            let source_price = match u.original_item_id.as_str() {
                "t" => 5.0,
                "s" => 2.0,
                _ => 0.0,
            };
            u.unit_price == source_price
        }));
    }

    #[test]
    fn test_unit_ids_are_indexed_per_original_item() {
        let draft = parse(
            r#"{"items": [{"itemId": "t", "name": "Taco", "price": 5.0, "qty": 3}]}"#,
        );
        let ids: Vec<&str> = draft.units.iter().map(|u| u.unit_id.as_str()).collect();
        assert_eq!(ids, vec!["t_0", "t_1", "t_2"]);
        assert!(draft.units.iter().all(|u| u.original_item_id == "t"));
    }

    #[test]
    fn test_missing_item_id_falls_back_to_position() {
        let draft = parse(
            r#"{"items": [
                {"name": "A", "price": 1.0},
                {"name": "B", "price": 2.0, "qty": 2}
            ]}"#,
        );
        let ids: Vec<&str> = draft.units.iter().map(|u| u.unit_id.as_str()).collect();
        assert_eq!(ids, vec!["0_0", "1_0", "1_1"]);
    }

    #[test]
    fn test_derived_subtotal_sums_unit_prices() {
        let draft = parse(
            r#"{"total": 12.0, "items": [
                {"itemId": "t", "name": "Taco", "price": 5.0, "qty": 2},
                {"itemId": "s", "name": "Soda", "price": 2.0}
            ]}"#,
        );
        assert_eq!(draft.totals.subtotal, 12.0);
    }

    #[test]
    fn test_derived_tip_never_negative() {
        // total < subtotal + tax would derive a negative tip
        let draft = parse(
            r#"{"total": 10.0, "tax": 3.0, "subtotal": 12.0, "items": []}"#,
        );
        assert_eq!(draft.totals.tip, 0.0);
    }

    #[test]
    fn test_derived_tip_from_total() {
        let draft = parse(
            r#"{"total": 39.0, "tax": 3.0, "subtotal": 30.0,
                "items": [{"itemId": "t", "name": "Taco", "price": 5.0}]}"#,
        );
        assert_eq!(draft.totals.tip, 6.0);
    }

    #[test]
    fn test_owed_for_taco_scenario() {
        // subtotal 30, tax 3, tip 6: claiming both tacos owes 2*5*1.3 = 13.00
        let draft = parse(
            r#"{"total": 39.0, "tax": 3.0, "tip": 6.0, "subtotal": 30.0,
                "items": [
                    {"itemId": "t", "name": "Taco", "price": 5.0, "qty": 2},
                    {"itemId": "s", "name": "Soda", "price": 2.0}
                ]}"#,
        );
        assert_eq!(draft.units.len(), 3);
        let tacos: Vec<&LineItem> = draft
            .units
            .iter()
            .filter(|u| u.original_item_id == "t")
            .collect();
        assert_eq!(draft.owed_for(tacos.into_iter()), 13.0);
    }

    #[test]
    fn test_instance_index() {
        let draft = parse(
            r#"{"items": [
                {"itemId": "t", "name": "Taco", "price": 5.0, "qty": 2},
                {"itemId": "s", "name": "Soda", "price": 2.0}
            ]}"#,
        );
        assert_eq!(draft.instance_index("t_0"), Some(0));
        assert_eq!(draft.instance_index("t_1"), Some(1));
        assert_eq!(draft.instance_index("s_0"), Some(0));
        assert_eq!(draft.instance_index("missing"), None);
    }

    #[test]
    fn test_merchant_and_date_fallbacks() {
        let draft = parse(r#"{"items": []}"#);
        assert_eq!(draft.merchant_name, "Unknown Merchant");
        assert!(!draft.date.is_empty());
    }
}
