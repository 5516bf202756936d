//! Integration tests for the channel, action and session services.

use std::collections::BTreeMap;
use std::time::Duration;

use channelape::resources::{ChannelSettings, CreateChannelRequest};
use channelape::{
    ChannelApeClient, ChannelApeError, ClientConfiguration, Endpoint, Environment, SessionId,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SESSION_ID: &str = "b9a1c5f2-7e3d-4a6b-8c9d-0e1f2a3b4c5d";
const CHANNEL_ID: &str = "9c728601-0286-457d-b0d6-ec19292d4485";
const BUSINESS_ID: &str = "4baafa5b-4fbf-404e-9766-8a02ad45c3a4";
const INTEGRATION_ID: &str = "02df0b31-a071-4791-b9c2-aa01e4fb0ce6";

fn create_client(server: &MockServer) -> ChannelApeClient {
    let config = ClientConfiguration::builder()
        .session_id(SessionId::new(SESSION_ID).unwrap())
        .environment(Environment::Custom(Endpoint::new(server.uri()).unwrap()))
        .timeout(Duration::from_millis(2000))
        .build();
    ChannelApeClient::new(config).unwrap()
}

fn channel_json() -> Value {
    json!({
        "businessId": BUSINESS_ID,
        "id": CHANNEL_ID,
        "enabled": true,
        "integrationId": INTEGRATION_ID,
        "name": "Custom Column Export",
        "settings": {
            "allowCreate": false,
            "allowRead": true,
            "allowUpdate": false,
            "allowDelete": false,
            "disableVariants": false,
            "priceType": "retail",
            "updateFields": [
                "images",
                "inventoryQuantity",
                "vendor",
                "price",
                "weight",
                "description",
                "title",
                "tags"
            ]
        },
        "createdAt": "2018-02-22T16:04:29.030Z",
        "updatedAt": "2018-04-02T13:04:27.299Z"
    })
}

// ============================================================================
// Channels
// ============================================================================

#[tokio::test]
async fn test_get_channel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/channels/{CHANNEL_ID}")))
        .and(header("X-Channel-Ape-Authorization-Token", SESSION_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(channel_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let channel = client.channels().get(CHANNEL_ID).await.unwrap();

    assert_eq!(channel.id, CHANNEL_ID);
    assert_eq!(channel.integration_id, INTEGRATION_ID);
    assert_eq!(channel.settings.price_type, "retail");
    assert_eq!(channel.settings.update_fields.len(), 8);
    assert_eq!(
        channel.created_at.to_rfc3339(),
        "2018-02-22T16:04:29.030+00:00"
    );
}

#[tokio::test]
async fn test_get_unknown_channel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/channels/c0eb01a0-bcd5-4dba-98fb-fd7f7993ecb2"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "statusCode": 404,
            "errors": [{ "code": 70, "message": "Channel could not be found for business." }]
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = client
        .channels()
        .get("c0eb01a0-bcd5-4dba-98fb-fd7f7993ecb2")
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), 404);
    assert_eq!(error.api_errors()[0].code, 70);
    assert_eq!(
        error.api_errors()[0].message,
        "Channel could not be found for business."
    );
}

#[tokio::test]
async fn test_create_channel_posts_body_and_expects_created() {
    let server = MockServer::start().await;
    let mut credentials = BTreeMap::new();
    credentials.insert("apiKey".to_string(), "secret".to_string());
    let request = CreateChannelRequest {
        business_id: BUSINESS_ID.to_string(),
        integration_id: INTEGRATION_ID.to_string(),
        name: "Custom Column Export".to_string(),
        enabled: true,
        credentials,
        settings: ChannelSettings {
            allow_read: true,
            price_type: "retail".to_string(),
            ..ChannelSettings::default()
        },
    };

    Mock::given(method("POST"))
        .and(path("/v1/channels"))
        .and(body_json(serde_json::to_value(&request).unwrap()))
        .respond_with(ResponseTemplate::new(201).set_body_json(channel_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let channel = client.channels().create(&request).await.unwrap();

    assert_eq!(channel.id, CHANNEL_ID);
    assert!(channel.enabled);
}

#[tokio::test]
async fn test_create_channel_rejects_ok_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(channel_json()))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = client
        .channels()
        .create(&CreateChannelRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ChannelApeError::HttpStatus {
            status_code: 200,
            ..
        }
    ));
    assert!(error.api_errors().is_empty());
}

// ============================================================================
// Actions
// ============================================================================

#[tokio::test]
async fn test_get_action() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/actions/a85d7463-a2f2-46ae-95a1-549e70ecb2ca"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "action": "PRODUCT_PULL",
            "businessId": BUSINESS_ID,
            "description": "Encountered error during product pull for Europa Sports",
            "healthCheckIntervalInSeconds": 300,
            "id": "a85d7463-a2f2-46ae-95a1-549e70ecb2ca",
            "lastHealthCheckTime": "2018-04-24T14:02:34.703Z",
            "processingStatus": "error",
            "startTime": "2018-04-24T14:02:34.703Z",
            "targetId": "1e4ebaa6-9796-4ccf-bd73-8765893a66bd",
            "targetType": "supplier"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let action = client
        .actions()
        .get("a85d7463-a2f2-46ae-95a1-549e70ecb2ca")
        .await
        .unwrap();

    assert_eq!(action.action, "PRODUCT_PULL");
    assert_eq!(action.health_check_interval_in_seconds, 300);
    assert_eq!(action.target_type, "supplier");
    assert_eq!(action.start_time, action.last_health_check_time);
    assert!(action.end_time.is_none());
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_get_session_uses_configured_session_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/sessions/{SESSION_ID}")))
        .and(header("X-Channel-Ape-Authorization-Token", SESSION_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userId": "8a4d1c3e-0f1b-4c55-9c8f-2a3b5d6e7f80",
            "sessionId": SESSION_ID
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let session = client.sessions().get().await.unwrap();

    assert_eq!(session.session_id, SESSION_ID);
    assert_eq!(session.user_id, "8a4d1c3e-0f1b-4c55-9c8f-2a3b5d6e7f80");
}

#[tokio::test]
async fn test_session_body_that_is_not_json_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/sessions/{SESSION_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = client.sessions().get().await.unwrap_err();

    assert!(matches!(error, ChannelApeError::MalformedResponse { .. }));
    assert!(error.to_string().contains("invalid JSON"));
    assert_eq!(error.status_code(), 200);
}
