use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use common::OrderId;

/// A persisted order record.
///
/// The store is agnostic of the order's typed shape: it keeps the full order
/// document as JSON alongside the status column it can filter and guard on.
/// The typed model lives in the domain layer, which encodes into and decodes
/// out of this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    /// The order this record belongs to.
    pub order_id: OrderId,

    /// Current lifecycle status (e.g., "CREATED", "NOTARY_ASSIGNED").
    ///
    /// This is the only field the store filters and conditions updates on.
    pub status: String,

    /// The full order document as JSON.
    pub payload: serde_json::Value,

    /// When the order was first persisted. Never changes after insert.
    pub created_at: DateTime<Utc>,

    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Creates a new record with both timestamps set to now.
    pub fn new(order_id: OrderId, status: impl Into<String>, payload: serde_json::Value) -> Self {
        let now = Utc::now();
        Self {
            order_id,
            status: status.into(),
            payload,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a record from a serializable order document.
    pub fn from_state<T: Serialize>(
        order_id: OrderId,
        status: impl Into<String>,
        state: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(order_id, status, serde_json::to_value(state)?))
    }

    /// Decodes the payload into a typed order document.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        count: u32,
    }

    #[test]
    fn new_sets_matching_timestamps() {
        let record = OrderRecord::new(OrderId::new(), "CREATED", serde_json::json!({}));
        assert_eq!(record.created_at, record.updated_at);
        assert_eq!(record.status, "CREATED");
    }

    #[test]
    fn from_state_and_decode_roundtrip() {
        let doc = Doc {
            name: "Rental Agreement".to_string(),
            count: 2,
        };
        let record = OrderRecord::from_state(OrderId::new(), "CREATED", &doc).unwrap();
        let decoded: Doc = record.decode().unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn decode_wrong_shape_fails() {
        let record = OrderRecord::new(OrderId::new(), "CREATED", serde_json::json!("not a doc"));
        let result: Result<Doc, _> = record.decode();
        assert!(result.is_err());
    }
}
