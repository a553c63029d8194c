// Line item rows inside the decoded `structured` object
use serde_json::Value;

pub const LINE_ITEMS_KEY: &str = "line_items";
pub const ITEM_FIELD: &str = "item";
pub const PRICE_FIELD: &str = "price";

/// The `line_items` array, if present and non-empty. Row shape is not checked here.
pub fn line_item_rows(structured: &Value) -> Option<&[Value]> {
    match structured.get(LINE_ITEMS_KEY)? {
        Value::Array(rows) if !rows.is_empty() => Some(rows.as_slice()),
        _ => None,
    }
}

/// Sum of numeric prices, `None` when any row has no numeric price.
pub fn total_price(rows: &[Value]) -> Option<f64> {
    rows.iter()
        .map(|row| row.get(PRICE_FIELD).and_then(Value::as_f64))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_need_a_non_empty_array() {
        assert!(line_item_rows(&json!({})).is_none());
        assert!(line_item_rows(&json!({"line_items": []})).is_none());
        assert!(line_item_rows(&json!({"line_items": "Widget x1"})).is_none());
        assert!(line_item_rows(&json!([1, 2])).is_none());

        let doc = json!({"line_items": [{"item": "Widget", "price": 100}]});
        assert_eq!(line_item_rows(&doc).unwrap().len(), 1);
    }

    #[test]
    fn total_requires_every_price() {
        let rows = json!([{"item": "a", "price": 1.5}, {"item": "b", "price": 2}]);
        assert_eq!(total_price(rows.as_array().unwrap()), Some(3.5));

        let rows = json!([{"item": "a", "price": 1.5}, {"item": "b"}]);
        assert_eq!(total_price(rows.as_array().unwrap()), None);
    }
}
