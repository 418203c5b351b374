//! End-to-end tests for the forwarding error table and CORS contract.

use serde_json::Value;

mod common;

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn test_missing_url_parameter() {
    let (addr, shutdown) = common::spawn_proxy().await;

    let res = client()
        .get(format!("http://{addr}/"))
        .send()
        .await
        .expect("proxy unreachable");

    assert_eq!(res.status(), 400);
    assert_eq!(
        res.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    assert_eq!(res.headers().get("content-type").unwrap(), "application/json");
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"error":"Missing ?url= parameter"}"#
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_empty_url_parameter_is_missing() {
    let (addr, shutdown) = common::spawn_proxy().await;

    let res = client()
        .get(format!("http://{addr}/?url="))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"error":"Missing ?url= parameter"}"#
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_unparseable_target_url() {
    let (addr, shutdown) = common::spawn_proxy().await;

    let res = client()
        .get(format!("http://{addr}/?url=not%20a%20url"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    assert_eq!(
        res.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    assert_eq!(res.text().await.unwrap(), r#"{"error":"Invalid target URL"}"#);

    shutdown.trigger();
}

#[tokio::test]
async fn test_non_https_targets_rejected() {
    let (addr, shutdown) = common::spawn_proxy().await;
    let client = client();

    for target in ["http://example.com", "ftp://example.com"] {
        let res = client
            .get(format!("http://{addr}/?url={target}"))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), 400, "target {target} should be rejected");
        assert_eq!(
            res.text().await.unwrap(),
            r#"{"error":"Only https targets are allowed"}"#
        );
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_upstream_is_502() {
    let (addr, shutdown) = common::spawn_proxy().await;
    let port = common::unreachable_port().await;

    let res = client()
        .get(format!("http://{addr}/?url=https://127.0.0.1:{port}/"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 502);
    assert_eq!(
        res.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );

    let body: Value = res.json().await.unwrap();
    let message = body["error"].as_str().unwrap();
    assert!(
        message.starts_with("Failed to reach upstream: "),
        "unexpected detail: {message}"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_post_with_body_to_unreachable_upstream() {
    // The non-GET path (body forwarded) still maps transport failure to 502.
    let (addr, shutdown) = common::spawn_proxy().await;
    let port = common::unreachable_port().await;

    let res = client()
        .post(format!("http://{addr}/?url=https://127.0.0.1:{port}/submit"))
        .header("content-type", "application/octet-stream")
        .body(vec![0u8, 1, 2, 3])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 502);

    shutdown.trigger();
}

#[tokio::test]
async fn test_any_method_and_path_reach_the_pipeline() {
    let (addr, shutdown) = common::spawn_proxy().await;
    let client = client();

    // No route table: every method and path lands in the same handler,
    // and each rejection still carries the CORS header.
    let requests = [
        client.get(format!("http://{addr}/deep/nested/path")),
        client.post(format!("http://{addr}/")),
        client.delete(format!("http://{addr}/x")),
        client.request(reqwest::Method::OPTIONS, format!("http://{addr}/")),
    ];

    for request in requests {
        let res = request.send().await.unwrap();
        assert_eq!(res.status(), 400);
        assert_eq!(
            res.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert_eq!(
            res.text().await.unwrap(),
            r#"{"error":"Missing ?url= parameter"}"#
        );
    }

    shutdown.trigger();
}
