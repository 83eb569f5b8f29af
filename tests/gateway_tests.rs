//! Gateway integration tests over real sockets.

mod support;

use axum::http::StatusCode;
use reqwest::Client;

use support::config::{gateway_config, write_bundle};
use support::upstream::{
    closed_addr, completion, spawn_gateway, spawn_silent_upstream, spawn_upstream,
};

fn client() -> Client {
    Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client")
}

#[tokio::test]
async fn chat_request_is_rewritten_and_forwarded_intact() {
    let upstream = spawn_upstream(|_| (StatusCode::OK, completion("Bullish"))).await;
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());
    let gateway = spawn_gateway(gateway_config(&upstream.origin(), dir.path())).await;

    let body = r#"{"model":"llama","messages":[{"role":"user","content":"hi"}]}"#;
    let response = client()
        .post(format!("http://{gateway}/api/llama/chat"))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let text = response.text().await.unwrap();
    assert!(text.contains("Bullish"), "{text}");

    let recorded = upstream.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].method, "POST");
    assert_eq!(recorded[0].path_and_query, "/v1/chat");
    assert_eq!(recorded[0].body_text(), body);
    assert_eq!(
        recorded[0].host.as_deref(),
        Some(upstream.addr.to_string().as_str())
    );
}

#[tokio::test]
async fn query_string_survives_rewrite() {
    let upstream = spawn_upstream(|_| (StatusCode::OK, "{}".into())).await;
    let dir = tempfile::tempdir().unwrap();
    let gateway = spawn_gateway(gateway_config(&upstream.origin(), dir.path())).await;

    let response = client()
        .get(format!("http://{gateway}/api/llama/models?limit=2&owner=me"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let recorded = upstream.recorded();
    assert_eq!(recorded[0].method, "GET");
    assert_eq!(recorded[0].path_and_query, "/v1/models?limit=2&owner=me");
}

#[tokio::test]
async fn upstream_error_status_passes_through() {
    let upstream = spawn_upstream(|_| {
        (
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":"rate limited"}"#.into(),
        )
    })
    .await;
    let dir = tempfile::tempdir().unwrap();
    let gateway = spawn_gateway(gateway_config(&upstream.origin(), dir.path())).await;

    let response = client()
        .post(format!("http://{gateway}/api/llama/chat"))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 429);
    assert_eq!(response.text().await.unwrap(), r#"{"error":"rate limited"}"#);
    assert_eq!(upstream.recorded().len(), 1);
}

#[tokio::test]
async fn unreachable_upstream_yields_bad_gateway() {
    let dead = closed_addr().await;
    let dir = tempfile::tempdir().unwrap();
    let gateway = spawn_gateway(gateway_config(&format!("http://{dead}"), dir.path())).await;

    let response = client()
        .post(format!("http://{gateway}/api/llama/chat"))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn silent_upstream_yields_gateway_timeout_once() {
    let upstream = spawn_silent_upstream().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = gateway_config(&upstream.origin(), dir.path());
    config.timeout_secs = 1;
    let gateway = spawn_gateway(config).await;

    let started = std::time::Instant::now();
    let response = client()
        .post(format!("http://{gateway}/api/llama/chat"))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 504);
    assert!(started.elapsed() < std::time::Duration::from_secs(5));
    assert_eq!(upstream.accepted(), 1);
}

#[tokio::test]
async fn oversized_body_is_rejected_without_forwarding() {
    let upstream = spawn_upstream(|_| (StatusCode::OK, "{}".into())).await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = gateway_config(&upstream.origin(), dir.path());
    config.max_body_bytes = 16;
    let gateway = spawn_gateway(config).await;

    let response = client()
        .post(format!("http://{gateway}/api/llama/chat"))
        .body(vec![b'x'; 64])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 413);
    assert!(upstream.recorded().is_empty());
}

#[tokio::test]
async fn unmatched_route_serves_entry_document() {
    let upstream = spawn_upstream(|_| (StatusCode::OK, "{}".into())).await;
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());
    let gateway = spawn_gateway(gateway_config(&upstream.origin(), dir.path())).await;

    let response = client()
        .get(format!("http://{gateway}/nonexistent-path"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains("id=\"root\""));
    assert!(upstream.recorded().is_empty());
}

#[tokio::test]
async fn static_asset_is_served_with_content_type() {
    let upstream = spawn_upstream(|_| (StatusCode::OK, "{}".into())).await;
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());
    let gateway = spawn_gateway(gateway_config(&upstream.origin(), dir.path())).await;

    let response = client()
        .get(format!("http://{gateway}/app.css"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/css"), "{content_type}");
    assert_eq!(response.text().await.unwrap(), "body { margin: 0 }");
}

#[tokio::test]
async fn lookalike_prefix_is_not_proxied() {
    let upstream = spawn_upstream(|_| (StatusCode::OK, "{}".into())).await;
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());
    let gateway = spawn_gateway(gateway_config(&upstream.origin(), dir.path())).await;

    let response = client()
        .get(format!("http://{gateway}/api/llamas/chat"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains("id=\"root\""));
    assert!(upstream.recorded().is_empty());
}
