// Integration tests for the request wrapper against a mock backend

use dhclient::client::{ApiClient, ApiRequest};
use dhclient::config::ClientConfig;
use dhclient::{ApiError, ErrorKind};
use mockito::Matcher;
use serde_json::json;

fn client_for(base_url: String) -> ApiClient {
    ApiClient::new(ClientConfig::new(base_url)).expect("Failed to create API client")
}

#[tokio::test]
async fn test_post_sends_exact_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/StopDigitalHumanStreamTask")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Exact(r#"{"TaskId":"x"}"#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"Code":0,"Message":"ok","Data":{}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(server.url());
    let response = client
        .post("/api/StopDigitalHumanStreamTask", &json!({"TaskId": "x"}))
        .await
        .unwrap();

    assert_eq!(response, json!({"Code": 0, "Message": "ok", "Data": {}}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_empty_object_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/QueryDigitalHumanStreamTasks")
        .match_body(Matcher::Exact("{}".to_string()))
        .with_status(200)
        .with_body(r#"{"Code":0}"#)
        .create_async()
        .await;

    let client = client_for(server.url());
    let response = client
        .post("QueryDigitalHumanStreamTasks", &json!({}))
        .await
        .unwrap();

    assert_eq!(response, json!({"Code": 0}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_base_url_ending_in_api_is_not_doubled() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/DriveByAudio")
        .with_status(200)
        .with_body("{}")
        .expect(2)
        .create_async()
        .await;

    for base in [format!("{}/api", server.url()), format!("{}/api/", server.url())] {
        let client = client_for(base);
        client.post("api/DriveByAudio", &json!({})).await.unwrap();
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_sends_query_params() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/api/Echo".to_string()))
        .match_header("content-type", "application/json")
        .match_query(Matcher::UrlEncoded("a".to_string(), "1".to_string()))
        .with_status(200)
        .with_body(r#"{"echo":"1"}"#)
        .create_async()
        .await;

    let client = client_for(server.url());
    let response = client.get("Echo", &[("a", "1")]).await.unwrap();

    assert_eq!(response, json!({"echo": "1"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_descriptor_roundtrip() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/Custom")
        .match_body(Matcher::Json(json!({"k": [1, 2, 3]})))
        .with_status(201)
        .with_body(r#"[1,"two",null]"#)
        .create_async()
        .await;

    let client = client_for(server.url());
    let response = client
        .request(ApiRequest::post("Custom", json!({"k": [1, 2, 3]})))
        .await
        .unwrap();

    assert_eq!(response, json!([1, "two", null]));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_with_json_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/DriveByText")
        .with_status(500)
        .with_body(r#"{"Code":500,"Message":"server config missing"}"#)
        .create_async()
        .await;

    let client = client_for(server.url());
    let err = client
        .post("DriveByText", &json!({"TaskId": "T1"}))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HttpStatus);
    assert_eq!(err.status(), Some(500));
    match err {
        ApiError::HttpStatus { body, url, .. } => {
            assert!(url.ends_with("/api/DriveByText"));
            assert_eq!(body.unwrap()["Message"], "server config missing");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_with_non_json_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/DriveByText")
        .with_status(500)
        .with_body("<html>Internal Server Error</html>")
        .create_async()
        .await;

    let client = client_for(server.url());
    let err = client
        .post("DriveByText", &json!({"TaskId": "T1"}))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HttpStatus);
    assert!(matches!(err, ApiError::HttpStatus { status: 500, body: None, .. }));
}

#[tokio::test]
async fn test_success_with_non_json_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/DriveByText")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = client_for(server.url());
    let err = client
        .post("DriveByText", &json!({"TaskId": "T1"}))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(matches!(err, ApiError::Decode { status: 200, .. }));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // Nothing listens on port 1
    let client = client_for("http://127.0.0.1:1".to_string());
    let err = client
        .post("DriveByText", &json!({"TaskId": "T1"}))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.url(), Some("http://127.0.0.1:1/api/DriveByText"));
    assert!(err.chain().len() > 1);
}
