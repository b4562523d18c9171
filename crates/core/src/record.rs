use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One greet call, in the shape written to the greeting log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetingRecord {
    pub greeting: String,
    pub name: String,
    pub message: String,
    pub greeted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn serializes_with_rfc3339_timestamp() {
        let record = GreetingRecord {
            greeting: "Hello".into(),
            name: "David".into(),
            message: "Hello David".into(),
            greeted_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        };

        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(
            value,
            json!({
                "greeting": "Hello",
                "name": "David",
                "message": "Hello David",
                "greeted_at": "2024-05-01T12:30:00Z",
            })
        );
    }

    #[test]
    fn deserializes_from_json() {
        let record: GreetingRecord = serde_json::from_value(json!({
            "greeting": "Hi",
            "name": "Rust",
            "message": "Hi Rust",
            "greeted_at": "2024-01-02T03:04:05.678Z",
        }))
        .expect("deserialize");
        assert_eq!(record.message, "Hi Rust");
        assert_eq!(record.greeted_at.timestamp_subsec_millis(), 678);
    }
}
