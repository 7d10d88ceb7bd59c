//! End-to-end tests: real server, real HTTP, mock upstream.

use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

mod common;

use common::{client, closed_addr, start_fixed_upstream, start_proxy, start_upstream, test_config};

const CREDENTIAL_MESSAGE: &str =
    "Client ID is required. Set SOUNDCLOUD_CLIENT_ID secret or pass it as query parameter";

fn assert_cors(response: &reqwest::Response) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "GET, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

fn assert_json(response: &reqwest::Response) {
    assert_eq!(response.headers()["content-type"], "application/json");
}

#[tokio::test]
async fn test_preflight_on_any_path() {
    let (proxy, _shutdown) = start_proxy(test_config(closed_addr().await)).await;
    let client = client();

    for path in ["/api/soundcloud/search", "/health", "/anything/else"] {
        let res = client
            .request(Method::OPTIONS, format!("{}{}", proxy, path))
            .send()
            .await
            .expect("Proxy unreachable");

        assert_eq!(res.status(), StatusCode::OK, "path {}", path);
        assert_cors(&res);
        assert!(res.headers().get("content-type").is_none());
        assert!(res.text().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_health() {
    let mut config = test_config(closed_addr().await);
    config.server.name = "Test Proxy".into();
    config.server.version = "9.9.9".into();
    let (proxy, _shutdown) = start_proxy(config).await;

    let res = client().get(format!("{}/health", proxy)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_cors(&res);
    assert_json(&res);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok", "service": "Test Proxy", "version": "9.9.9"}));
}

#[tokio::test]
async fn test_health_ignores_method() {
    let (proxy, _shutdown) = start_proxy(test_config(closed_addr().await)).await;

    let res = client().post(format!("{}/health", proxy)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_missing_query() {
    let (proxy, _shutdown) = start_proxy(test_config(closed_addr().await)).await;
    let client = client();

    for url in [
        format!("{}/api/soundcloud/search", proxy),
        format!("{}/api/soundcloud/search?q=&client_id=X", proxy),
    ] {
        let res = client.get(url).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_cors(&res);
        assert_json(&res);

        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({"error": "Query parameter \"q\" is required"}));
    }
}

#[tokio::test]
async fn test_missing_client_id() {
    let (upstream, mut requests) = start_fixed_upstream(200, r#"{"collection": []}"#).await;
    let (proxy, _shutdown) = start_proxy(test_config(upstream)).await;

    let res = client()
        .get(format!("{}/api/soundcloud/search?q=test&client_id=", proxy))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"error": CREDENTIAL_MESSAGE}));
    assert!(requests.try_recv().is_err(), "upstream must not be called");
}

#[tokio::test]
async fn test_upstream_request_shape_and_limit_clamp() {
    let (upstream, mut requests) = start_fixed_upstream(200, r#"{"collection": []}"#).await;
    let (proxy, _shutdown) = start_proxy(test_config(upstream)).await;

    let res = client()
        .get(format!(
            "{}/api/soundcloud/search?q=daft%20punk&limit=1000&client_id=X",
            proxy
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let seen = requests.recv().await.unwrap();
    assert!(seen.target.starts_with("/search/tracks?"), "target {}", seen.target);
    assert_eq!(seen.query_param("q").as_deref(), Some("daft punk"));
    assert_eq!(seen.query_param("limit").as_deref(), Some("50"));
    assert_eq!(seen.query_param("client_id").as_deref(), Some("X"));
    assert_eq!(seen.header("accept"), Some("application/json"));
    assert!(seen.header("user-agent").unwrap().starts_with("Mozilla/5.0"));
}

#[tokio::test]
async fn test_default_and_negative_limit() {
    let (upstream, mut requests) = start_fixed_upstream(200, r#"{"collection": []}"#).await;
    let (proxy, _shutdown) = start_proxy(test_config(upstream)).await;
    let client = client();

    client
        .get(format!("{}/api/soundcloud/search?q=a&limit=abc&client_id=X", proxy))
        .send()
        .await
        .unwrap();
    let seen = requests.recv().await.unwrap();
    assert_eq!(seen.query_param("limit").as_deref(), Some("10"));

    client
        .get(format!("{}/api/soundcloud/search?q=a&limit=-5&client_id=X", proxy))
        .send()
        .await
        .unwrap();
    let seen = requests.recv().await.unwrap();
    assert_eq!(seen.query_param("limit").as_deref(), Some("-5"));
}

#[tokio::test]
async fn test_configured_credential_is_used() {
    let (upstream, mut requests) = start_fixed_upstream(200, r#"{"collection": []}"#).await;
    let mut config = test_config(upstream);
    config.soundcloud.client_id = Some("configured".into());
    let (proxy, _shutdown) = start_proxy(config).await;
    let client = client();

    let res = client
        .get(format!("{}/api/soundcloud/search?q=test", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let seen = requests.recv().await.unwrap();
    assert_eq!(seen.query_param("client_id").as_deref(), Some("configured"));

    client
        .get(format!("{}/api/soundcloud/search?q=test&client_id=override", proxy))
        .send()
        .await
        .unwrap();
    let seen = requests.recv().await.unwrap();
    assert_eq!(seen.query_param("client_id").as_deref(), Some("override"));
}

#[tokio::test]
async fn test_tracks_are_normalized() {
    let (upstream, _requests) =
        start_fixed_upstream(200, r#"{"collection": [{"id": 1, "title": "A"}]}"#).await;
    let (proxy, _shutdown) = start_proxy(test_config(upstream)).await;

    let res = client()
        .get(format!("{}/api/soundcloud/search?q=test&client_id=X", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_cors(&res);
    assert_json(&res);

    let body: Value = res.json().await.unwrap();
    let tracks = body.as_array().expect("bare JSON array");
    assert_eq!(tracks.len(), 1);

    let track = &tracks[0];
    assert_eq!(track["id"], "1");
    assert_eq!(track["title"], "A");
    assert_eq!(track["source"], "soundcloud");
    assert_eq!(track["duration"], 0);
    assert_eq!(track["viewCount"], 0);
    assert_eq!(track["channelTitle"], "Unknown Artist");
    assert_eq!(track["description"], "");
    assert_eq!(track["thumbnail"], "");
    assert!(track["publishedAt"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn test_off_type_counter_keeps_the_page() {
    let (upstream, _requests) = start_fixed_upstream(
        200,
        r#"{"collection": [{"id": 1, "title": "ok"}, {"id": 2, "duration": "180000", "playback_count": null}]}"#,
    )
    .await;
    let (proxy, _shutdown) = start_proxy(test_config(upstream)).await;

    let res = client()
        .get(format!("{}/api/soundcloud/search?q=test&client_id=X", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    let tracks = body.as_array().expect("bare JSON array");
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0]["title"], "ok");
    assert_eq!(tracks[1]["id"], "2");
    assert_eq!(tracks[1]["duration"], "180000");
    assert_eq!(tracks[1]["viewCount"], 0);
}

#[tokio::test]
async fn test_missing_collection_is_empty() {
    let (upstream, _requests) = start_fixed_upstream(200, r#"{"next_href": null}"#).await;
    let (proxy, _shutdown) = start_proxy(test_config(upstream)).await;

    let res = client()
        .get(format!("{}/api/soundcloud/search?q=test&client_id=X", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_upstream_error_is_relayed() {
    let (upstream, _requests) = start_fixed_upstream(429, "rate limited").await;
    let (proxy, _shutdown) = start_proxy(test_config(upstream)).await;

    let res = client()
        .get(format!("{}/api/soundcloud/search?q=test&client_id=X", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_cors(&res);
    assert_json(&res);

    let body: Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("429"));
    assert_eq!(body["details"], "rate limited");
}

#[tokio::test]
async fn test_invalid_upstream_json_is_internal_error() {
    let (upstream, _requests) = start_fixed_upstream(200, "<html>not json</html>").await;
    let (proxy, _shutdown) = start_proxy(test_config(upstream)).await;

    let res = client()
        .get(format!("{}/api/soundcloud/search?q=test&client_id=X", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_json(&res);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Internal server error");
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_upstream_is_internal_error() {
    let (proxy, _shutdown) = start_proxy(test_config(closed_addr().await)).await;

    let res = client()
        .get(format!("{}/api/soundcloud/search?q=test&client_id=X", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&res);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Internal server error");
    let message = body["message"].as_str().unwrap();
    assert!(!message.contains("client_id"), "message leaks the upstream URL: {message}");
}

#[tokio::test]
async fn test_transport_error_hides_configured_credential() {
    let mut config = test_config(closed_addr().await);
    config.soundcloud.client_id = Some("configured-secret".into());
    let (proxy, _shutdown) = start_proxy(config).await;

    let res = client()
        .get(format!("{}/api/soundcloud/search?q=test", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Internal server error");
    let message = body["message"].as_str().unwrap();
    assert!(!message.is_empty());
    assert!(!message.contains("configured-secret"), "message leaks the credential: {message}");
}

#[tokio::test]
async fn test_unknown_path() {
    let (proxy, _shutdown) = start_proxy(test_config(closed_addr().await)).await;
    let client = client();

    for path in ["/foo", "/health/", "/api/soundcloud"] {
        let res = client.get(format!("{}{}", proxy, path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "path {}", path);
        assert_cors(&res);
        assert_json(&res);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({"error": "Not found"}));
    }
}

#[tokio::test]
async fn test_request_id() {
    let (proxy, _shutdown) = start_proxy(test_config(closed_addr().await)).await;
    let client = client();

    let res = client.get(format!("{}/health", proxy)).send().await.unwrap();
    let generated = res.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());

    let res = client
        .get(format!("{}/health", proxy))
        .header("x-request-id", "client-chosen")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "client-chosen");
}

#[tokio::test]
async fn test_repeated_search_is_stable() {
    let (upstream, _requests) = start_upstream(|_| async {
        (
            200,
            r#"{"collection": [
                {"id": 2, "title": "B", "created_at": "2021-05-01T10:00:00Z",
                 "user": {"username": "u", "permalink": "u"}, "permalink": "b", "duration": 1000},
                {"id": 1, "title": "A", "created_at": "2020-01-01T00:00:00Z", "playback_count": 5}
            ]}"#
            .to_string(),
        )
    })
    .await;
    let (proxy, _shutdown) = start_proxy(test_config(upstream)).await;
    let client = client();
    let url = format!("{}/api/soundcloud/search?q=test&client_id=X", proxy);

    let first: Value = client.get(&url).send().await.unwrap().json().await.unwrap();
    let second: Value = client.get(&url).send().await.unwrap().json().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0]["id"], "2");
    assert_eq!(first[0]["permalinkUrl"], "https://soundcloud.com/u/b");
    assert_eq!(first[1]["viewCount"], 5);
}
