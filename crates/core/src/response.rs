use serde::{Deserialize, Serialize};

/// HTTP status code the provider reports on an accepted send.
pub const SUCCESS_STATUS_CODE: u16 = 200;

/// Response returned by the provider after a raw send.
///
/// The serde field names preserve the provider's wire shape (`MessageId`
/// and `@metadata.statusCode`) so that a serialized response reads the same
/// in diagnostics as the provider's own payload.
///
/// # Examples
///
/// ```
/// use courier_core::SendResponse;
///
/// let response = SendResponse::success("0100018c-example");
/// assert!(response.is_success());
///
/// let response = SendResponse::default();
/// assert!(response.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResponse {
    /// Provider-assigned message identifier, if any.
    #[serde(rename = "MessageId", default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// Transport-level response metadata.
    #[serde(rename = "@metadata", default)]
    pub metadata: ResponseMetadata,
}

/// Transport-level metadata attached to a provider response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// HTTP status code of the underlying call. `0` when no response was
    /// received at all.
    #[serde(rename = "statusCode", default)]
    pub status_code: u16,
}

impl SendResponse {
    /// Create a successful response carrying the given message identifier.
    #[must_use]
    pub fn success(message_id: impl Into<String>) -> Self {
        Self {
            message_id: Some(message_id.into()),
            metadata: ResponseMetadata {
                status_code: SUCCESS_STATUS_CODE,
            },
        }
    }

    /// Create a response with an explicit message id and status code.
    #[must_use]
    pub fn with_status(message_id: Option<String>, status_code: u16) -> Self {
        Self {
            message_id,
            metadata: ResponseMetadata { status_code },
        }
    }

    /// Whether the provider confirmed delivery: a non-empty message
    /// identifier and a [`SUCCESS_STATUS_CODE`] status.
    pub fn is_success(&self) -> bool {
        matches!(&self.message_id, Some(id) if !id.is_empty())
            && self.metadata.status_code == SUCCESS_STATUS_CODE
    }

    /// Whether this is a blank response, i.e. the call produced no usable
    /// response data at all.
    pub fn is_empty(&self) -> bool {
        self.message_id.is_none() && self.metadata.status_code == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response() {
        let response = SendResponse::success("abc");
        assert!(response.is_success());
        assert!(!response.is_empty());
        assert_eq!(response.metadata.status_code, 200);
    }

    #[test]
    fn empty_message_id_is_not_success() {
        let response = SendResponse::with_status(Some(String::new()), 200);
        assert!(!response.is_success());
        assert!(!response.is_empty());
    }

    #[test]
    fn non_200_status_is_not_success() {
        let response = SendResponse::with_status(Some("abc".into()), 500);
        assert!(!response.is_success());
    }

    #[test]
    fn default_is_empty() {
        let response = SendResponse::default();
        assert!(response.is_empty());
        assert!(!response.is_success());
    }

    #[test]
    fn serialize_preserves_wire_shape() {
        let response = SendResponse::success("abc");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"MessageId": "abc", "@metadata": {"statusCode": 200}})
        );
    }

    #[test]
    fn deserialize_from_provider_payload() {
        let json = serde_json::json!({"MessageId": "xyz", "@metadata": {"statusCode": 200}});
        let response: SendResponse = serde_json::from_value(json).unwrap();
        assert!(response.is_success());
        assert_eq!(response.message_id.as_deref(), Some("xyz"));
    }

    #[test]
    fn deserialize_missing_fields_defaults() {
        let response: SendResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.is_empty());
    }
}
