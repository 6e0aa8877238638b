//! End-to-end tests against a live listener.

use std::time::Duration;

use ant_router::http::X_ROUTE_NAME;
use reqwest::StatusCode;

mod common;
use common::{config, route, start_server};

#[tokio::test]
async fn test_serves_configured_routes() {
    let mut created = route("upload", "POST", "/files/**");
    created.status = 201;
    created.body = "stored".into();

    let server = start_server(config(vec![
        route("jakarta", "GET", "/org/apache/jakarta/**"),
        route("cvs", "GET", "/**/CVS/*"),
        created,
        route("health", "*", "/health"),
    ]))
    .await;
    let client = reqwest::Client::new();

    let res = client
        .get(server.url("/org/apache/jakarta/test.xml"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[X_ROUTE_NAME], "jakarta");
    assert_eq!(res.headers()["content-type"], "text/plain; charset=utf-8");
    assert_eq!(res.text().await.unwrap(), "jakarta");

    let res = client.get(server.url("/CVS/Repository")).send().await.unwrap();
    assert_eq!(res.headers()[X_ROUTE_NAME], "cvs");

    let res = client
        .get(server.url("/org/apache/CVS/foo/bar/Entries"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.post(server.url("/files/a/b.txt")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.text().await.unwrap(), "stored");

    let res = client.head(server.url("/health/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[X_ROUTE_NAME], "health");

    server.shutdown.trigger();
    server.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_config_update_swaps_routes() {
    let server = start_server(config(vec![route("v1", "GET", "/api/**")])).await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/users")).send().await.unwrap();
    assert_eq!(res.headers()[X_ROUTE_NAME], "v1");

    server
        .updates
        .send(config(vec![route("v2", "GET", "/api/*")]))
        .unwrap();

    // The reload task runs concurrently; poll until it has been applied.
    let mut name = String::new();
    for _ in 0..50 {
        let res = client.get(server.url("/api/users")).send().await.unwrap();
        name = res.headers()[X_ROUTE_NAME].to_str().unwrap().to_string();
        if name == "v2" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(name, "v2");

    let res = client.get(server.url("/api/users/42")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.shutdown.trigger();
    server.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_shutdown_stops_server() {
    let server = start_server(config(vec![])).await;

    server.shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
}
