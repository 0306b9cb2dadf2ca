//! Request record models

use serde_json::{Map, Value};

/// Request lifecycle status, driven by the back office
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Pending,
    Approved,
    Rejected,
}

impl Status {
    /// Parse the stored status string; anything else is unrecognized
    pub fn parse(raw: &str) -> Option<Status> {
        match raw {
            "pending" => Some(Status::Pending),
            "approved" => Some(Status::Approved),
            "rejected" => Some(Status::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two watched request collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Deposit,
    Withdraw,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 2] = [CollectionKind::Deposit, CollectionKind::Withdraw];

    /// External collection name, part of the change-stream contract
    pub fn collection_name(&self) -> &'static str {
        match self {
            CollectionKind::Deposit => "depositRequests",
            CollectionKind::Withdraw => "withdrawRequests",
        }
    }

    /// Backing table in the MySQL store
    pub fn table_name(&self) -> &'static str {
        match self {
            CollectionKind::Deposit => "deposit_requests",
            CollectionKind::Withdraw => "withdraw_requests",
        }
    }
}

/// Full current snapshot of one deposit/withdraw request.
///
/// Requests are schemaless documents; beyond `status`, `notified` and
/// `method` every field is optional display data, so access goes through
/// fallback-aware helpers instead of a fixed struct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestRecord {
    fields: Map<String, Value>,
}

impl RequestRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build from any JSON value; non-objects yield an empty record
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    /// Overwrite one field (the store merges the watermark column in here)
    pub fn set(&mut self, key: &str, value: Value) {
        self.fields.insert(key.to_string(), value);
    }

    /// Canonical serialized form, used to detect modifications between polls
    pub fn fingerprint(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }

    pub fn status(&self) -> Option<Status> {
        self.fields
            .get("status")
            .and_then(Value::as_str)
            .and_then(Status::parse)
    }

    /// Last status for which delivery was confirmed (the dedup watermark)
    pub fn notified(&self) -> Option<&str> {
        self.fields.get("notified").and_then(Value::as_str)
    }

    /// Routing key; an empty string counts as missing
    pub fn method(&self) -> Option<&str> {
        match self.fields.get("method").and_then(Value::as_str) {
            Some(m) if !m.is_empty() => Some(m),
            _ => None,
        }
    }

    /// Display form of a field; absent, null and empty values are missing
    pub fn display(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }

    /// Display form with a fallback for missing fields
    pub fn display_or(&self, key: &str, fallback: &str) -> String {
        self.display(key).unwrap_or_else(|| fallback.to_string())
    }

    /// Payment number: prefer `Number`, else `number`, else `N/A`
    pub fn number(&self) -> String {
        self.display("Number")
            .or_else(|| self.display("number"))
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// Customer identity: explicit `id` field, else the record's own id
    pub fn customer_id(&self, record_id: &str) -> String {
        self.display("id")
            .unwrap_or_else(|| record_id.to_string())
    }

    /// Raw amount field exactly as stored
    pub fn amount_raw(&self) -> String {
        self.display_or("amount", "N/A")
    }

    /// Amount coerced to a number, when it is one
    pub fn amount_f64(&self) -> Option<f64> {
        match self.fields.get("amount")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RequestRecord {
        RequestRecord::from_value(value)
    }

    #[test]
    fn test_status_parse_recognizes_the_three_values() {
        assert_eq!(Status::parse("pending"), Some(Status::Pending));
        assert_eq!(Status::parse("approved"), Some(Status::Approved));
        assert_eq!(Status::parse("rejected"), Some(Status::Rejected));
        assert_eq!(Status::parse("cancelled"), None);
        assert_eq!(Status::parse(""), None);
    }

    #[test]
    fn test_number_prefers_capitalized_field() {
        let rec = record(json!({"Number": "017", "number": "018"}));
        assert_eq!(rec.number(), "017");

        let rec = record(json!({"number": "018"}));
        assert_eq!(rec.number(), "018");

        let rec = record(json!({}));
        assert_eq!(rec.number(), "N/A");
    }

    #[test]
    fn test_customer_id_falls_back_to_record_id() {
        let rec = record(json!({"id": "C1"}));
        assert_eq!(rec.customer_id("doc-9"), "C1");

        let rec = record(json!({}));
        assert_eq!(rec.customer_id("doc-9"), "doc-9");
    }

    #[test]
    fn test_amount_coercion_handles_numbers_and_strings() {
        assert_eq!(record(json!({"amount": 500})).amount_f64(), Some(500.0));
        assert_eq!(record(json!({"amount": "12.5"})).amount_f64(), Some(12.5));
        assert_eq!(record(json!({"amount": "N/A"})).amount_f64(), None);
        assert_eq!(record(json!({})).amount_f64(), None);
    }

    #[test]
    fn test_method_rejects_empty_string() {
        assert_eq!(record(json!({"method": ""})).method(), None);
        assert_eq!(record(json!({"method": "bKash"})).method(), Some("bKash"));
    }

    #[test]
    fn test_fingerprint_changes_with_fields() {
        let a = record(json!({"status": "pending"}));
        let mut b = a.clone();
        assert_eq!(a.fingerprint(), b.fingerprint());
        b.set("status", json!("approved"));
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
