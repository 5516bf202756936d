//! Types shared by several ChannelApe resources.

use serde::{Deserialize, Serialize};

/// API version prefix shared by every resource path.
pub const API_VERSION: &str = "v1";

/// A free-form name/value pair attached to orders, line items and fulfillments.
///
/// # Example
///
/// ```rust
/// use channelape::resources::AdditionalField;
///
/// let field = AdditionalField {
///     name: "name".to_string(),
///     value: "CA1001".to_string(),
/// };
/// assert_eq!(
///     serde_json::to_string(&field).unwrap(),
///     r#"{"name":"name","value":"CA1001"}"#
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AdditionalField {
    /// Field name.
    pub name: String,
    /// Field value.
    pub value: String,
}

/// Builds `/v1/<resource>`.
pub(crate) fn collection_path(resource: &str) -> String {
    format!("/{API_VERSION}/{resource}")
}

/// Builds `/v1/<resource>/<id>`, percent-encoding the id.
pub(crate) fn member_path(resource: &str, id: &str) -> String {
    format!("/{API_VERSION}/{resource}/{}", urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_path() {
        assert_eq!(collection_path("orders"), "/v1/orders");
    }

    #[test]
    fn test_member_path_encodes_id() {
        assert_eq!(
            member_path("orders", "c0f45529-cbed-4e90-9a38-c208d409ef2a"),
            "/v1/orders/c0f45529-cbed-4e90-9a38-c208d409ef2a"
        );
        assert_eq!(member_path("orders", "a/b c"), "/v1/orders/a%2Fb%20c");
    }

    #[test]
    fn test_additional_field_round_trips_missing_as_error() {
        let parsed: Result<AdditionalField, _> = serde_json::from_str(r#"{"name":"x"}"#);
        assert!(parsed.is_err());
    }
}
