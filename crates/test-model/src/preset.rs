use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// What the fake provider answers to one request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// Hands back the envelope as-is.
    #[serde(rename = "envelope")]
    Envelope(Value),
    /// Fails like a broken connection would.
    #[serde(rename = "transport_failure")]
    TransportFailure(String),
    /// Fails like an undecodable body would.
    #[serde(rename = "invalid_response")]
    InvalidResponse(String),
}

impl PresetReply {
    /// Creates a well-formed envelope with a single choice.
    #[inline]
    pub fn with_text<S: Into<String>>(text: S) -> Self {
        let text: String = text.into();
        PresetReply::Envelope(json!({
            "id": "cmpl-test",
            "object": "text_completion",
            "choices": [{ "index": 0, "text": text, "finish_reason": "stop" }]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_deserialize() {
        let replies = vec![
            PresetReply::with_text("Hi!"),
            PresetReply::TransportFailure("connection reset".to_string()),
        ];

        let serialized = serde_json::to_string(&replies).unwrap();
        let deserialized: Vec<PresetReply> =
            serde_json::from_str(&serialized).unwrap();

        assert_eq!(replies, deserialized);
    }
}
