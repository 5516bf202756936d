//! Actions: long-running jobs such as product pulls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::{HttpMethod, HttpRequest, RequestClient, Transport};
use crate::resources::common::member_path;
use crate::rest::{
    coerce_dates, coerce_integers, fetch_one, ChannelApeError, ExpectedStatus, Normalize,
    NormalizeError,
};

const RESOURCE: &str = "actions";

/// A ChannelApe action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Action ID.
    pub id: String,
    /// Kind of job (e.g., `PRODUCT_PULL`).
    pub action: String,
    /// Owning business.
    pub business_id: String,
    /// Human-readable summary.
    #[serde(default)]
    pub description: String,
    /// Seconds between health checks.
    pub health_check_interval_in_seconds: i64,
    /// Last time the action reported in.
    pub last_health_check_time: DateTime<Utc>,
    /// Processing state (e.g., `error`, `completed`).
    pub processing_status: String,
    /// When the action started.
    pub start_time: DateTime<Utc>,
    /// When the action ended, if it has.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// ID of the channel or supplier the action runs against.
    pub target_id: String,
    /// Kind of target (e.g., `supplier`).
    pub target_type: String,
}

impl Normalize for Action {
    fn coerce(object: &mut Map<String, Value>) -> Result<(), NormalizeError> {
        coerce_dates(object, &["lastHealthCheckTime", "startTime", "endTime"])?;
        coerce_integers(object, &["healthCheckIntervalInSeconds"])
    }
}

/// Reads actions.
#[derive(Debug)]
pub struct ActionsService<'a, T> {
    client: &'a RequestClient<T>,
}

impl<'a, T: Transport> ActionsService<'a, T> {
    /// Creates a service over `client`.
    #[must_use]
    pub const fn new(client: &'a RequestClient<T>) -> Self {
        Self { client }
    }

    /// Fetches one action (`GET /v1/actions/{id}`, expects 200).
    ///
    /// # Errors
    ///
    /// Returns [`ChannelApeError`] if the request fails, the status is not
    /// 200, or the body is not an action.
    pub async fn get(&self, action_id: &str) -> Result<Action, ChannelApeError> {
        let request = HttpRequest {
            http_method: HttpMethod::Get,
            path: member_path(RESOURCE, action_id),
            query: Vec::new(),
            body: None,
        };
        fetch_one(self.client, &request, ExpectedStatus::Ok).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn action_json() -> Value {
        json!({
            "action": "PRODUCT_PULL",
            "businessId": "4baafa5b-4fbf-404e-9766-8a02ad45c3a4",
            "description": "Encountered error during product pull for Europa Sports",
            "healthCheckIntervalInSeconds": "300",
            "id": "a85d7463-a2f2-46ae-95a1-549e70ecb2ca",
            "lastHealthCheckTime": "2018-04-24T14:02:34.703Z",
            "processingStatus": "error",
            "startTime": "2018-04-24T14:02:34.703Z",
            "targetId": "1e4ebaa6-9796-4ccf-bd73-8765893a66bd",
            "targetType": "supplier"
        })
    }

    #[test]
    fn test_action_normalizes() {
        let action = Action::normalize(action_json()).unwrap();
        assert_eq!(action.health_check_interval_in_seconds, 300);
        assert_eq!(action.processing_status, "error");
        assert!(action.end_time.is_none());
        assert_eq!(
            action.start_time.to_rfc3339(),
            "2018-04-24T14:02:34.703+00:00"
        );
    }

    #[test]
    fn test_action_end_time_parsed_when_present() {
        let mut json = action_json();
        json["endTime"] = json!("2018-04-24T15:00:00.000Z");
        let action = Action::normalize(json).unwrap();
        assert_eq!(
            action.end_time.map(|t| t.to_rfc3339()),
            Some("2018-04-24T15:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_action_bad_date_rejected() {
        let mut json = action_json();
        json["startTime"] = json!("yesterday");
        assert!(matches!(
            Action::normalize(json),
            Err(NormalizeError::InvalidDate { .. })
        ));
    }
}
