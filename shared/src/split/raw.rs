//! Boundary normalization for backend-shaped receipt payloads
//!
//! The parsing backend is loose about field names (`qty` vs `quantity`,
//! `id` vs `itemId`) and value types (numbers sometimes arrive as strings).
//! Everything is normalized here, once, so the rest of the engine only ever
//! sees one canonical shape.

use serde::{Deserialize, Deserializer, Serialize};

/// Raw receipt payload as returned by the parse endpoint or a history fetch
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReceipt {
    /// Merchant name (`merchant` from the parser, `restaurant_name` from history)
    #[serde(default, alias = "restaurant_name")]
    pub merchant: Option<String>,
    /// Display date, if the source provides one
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub items: Vec<RawItem>,
    #[serde(default, deserialize_with = "de_opt_money")]
    pub subtotal: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_money")]
    pub tax: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_money")]
    pub tip: Option<f64>,
    #[serde(default, alias = "total_amount", deserialize_with = "de_opt_money")]
    pub total: Option<f64>,
}

/// Raw line item record (`{ itemId, name, price, qty }` in the backend's shape)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawItem {
    /// Identifier the backend recognizes for claim/unclaim operations
    #[serde(default, alias = "itemId", deserialize_with = "de_opt_id")]
    pub item_id: Option<String>,
    /// Alternate identifier field used by some responses
    #[serde(default, deserialize_with = "de_opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_money")]
    pub price: f64,
    #[serde(default = "default_qty", alias = "quantity", deserialize_with = "de_qty")]
    pub qty: i32,
}

impl RawItem {
    /// Base identifier for claim addressing: `itemId ?? id ?? position`
    pub fn base_id(&self, index: usize) -> String {
        self.item_id
            .clone()
            .or_else(|| self.id.clone())
            .unwrap_or_else(|| index.to_string())
    }

    /// Display name, never empty
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => "Unknown Item".to_string(),
        }
    }
}

fn default_qty() -> i32 {
    1
}

fn money_from_value(value: &serde_json::Value) -> Option<f64> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Tolerant money deserializer: number or numeric string, else 0.0
fn de_money<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(money_from_value(&value).unwrap_or(0.0))
}

/// Tolerant optional money deserializer: absent/invalid becomes None
fn de_opt_money<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(money_from_value(&value))
}

/// Quantity deserializer: non-numeric or non-positive values fall back to 1
/// so a malformed record never drops an item.
fn de_qty<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let qty = match &value {
        serde_json::Value::Number(n) => n.as_f64().map(|v| v.trunc() as i64),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(match qty {
        Some(q) if q >= 1 => q.min(i32::MAX as i64) as i32,
        _ => 1,
    })
}

/// Identifier deserializer: accepts string or numeric ids
fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_field_aliases() {
        let a: RawItem = serde_json::from_str(r#"{"itemId": 7, "name": "Taco", "price": 5.0, "qty": 2}"#).unwrap();
        assert_eq!(a.item_id.as_deref(), Some("7"));
        assert_eq!(a.qty, 2);

        let b: RawItem = serde_json::from_str(r#"{"id": "7", "name": "Taco", "price": 5.0, "quantity": 2}"#).unwrap();
        assert_eq!(b.id.as_deref(), Some("7"));
        assert_eq!(b.qty, 2);
    }

    #[test]
    fn test_price_accepts_numeric_string() {
        let item: RawItem = serde_json::from_str(r#"{"name": "Soda", "price": "2.50"}"#).unwrap();
        assert_eq!(item.price, 2.50);
        assert_eq!(item.qty, 1);
    }

    #[test]
    fn test_invalid_qty_defaults_to_one() {
        for qty in [r#""two""#, "0", "-3", "null"] {
            let json = format!(r#"{{"name": "X", "price": 1.0, "qty": {qty}}}"#);
            let item: RawItem = serde_json::from_str(&json).unwrap();
            assert_eq!(item.qty, 1, "qty {qty} should default to 1");
        }
    }

    #[test]
    fn test_base_id_fallback_chain() {
        let both: RawItem =
            serde_json::from_str(r#"{"itemId": "a", "id": "b", "price": 1.0}"#).unwrap();
        assert_eq!(both.base_id(3), "a");

        let id_only: RawItem = serde_json::from_str(r#"{"id": "b", "price": 1.0}"#).unwrap();
        assert_eq!(id_only.base_id(3), "b");

        let neither: RawItem = serde_json::from_str(r#"{"price": 1.0}"#).unwrap();
        assert_eq!(neither.base_id(3), "3");
    }

    #[test]
    fn test_display_name_fallback() {
        let item: RawItem = serde_json::from_str(r#"{"price": 1.0, "name": "  "}"#).unwrap();
        assert_eq!(item.display_name(), "Unknown Item");
    }

    #[test]
    fn test_receipt_merchant_alias_and_total_amount() {
        let receipt: RawReceipt = serde_json::from_str(
            r#"{"restaurant_name": "Mario's", "total_amount": 39.0, "items": []}"#,
        )
        .unwrap();
        assert_eq!(receipt.merchant.as_deref(), Some("Mario's"));
        assert_eq!(receipt.total, Some(39.0));
    }

    #[test]
    fn test_receipt_invalid_money_becomes_none() {
        // the parser emits explicit nulls for fields it could not read
        let receipt: RawReceipt =
            serde_json::from_str(r#"{"merchant": "M", "subtotal": null, "tax": "bad"}"#).unwrap();
        assert!(receipt.subtotal.is_none());
        assert!(receipt.tax.is_none());
    }
}
