use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use common::prelude::FutureTimeout;
use hyper::StatusCode;
use routerify::RouterService;
use serde_json::{json, Value};

use crate::api::{routes, run};
use crate::tests::global::{mock_global_state, test_config, TestServer};

mod status;
mod users;

#[tokio::test]
async fn test_health() {
	let server = TestServer::default().await;

	let resp = server
		.client
		.get(server.url("/health"))
		.send()
		.await
		.expect("failed to get health");

	assert_eq!(resp.status(), StatusCode::OK);
	assert_eq!(
		resp.headers().get("content-type").expect("missing content-type"),
		"application/json"
	);
	let body = resp.text().await.expect("failed to read body");
	assert_eq!(body, "{\"status\":\"ok\"}");

	server.shutdown().await;
}

#[tokio::test]
async fn test_not_found() {
	let server = TestServer::default().await;

	let resp = server
		.client
		.get(server.url("/nope"))
		.send()
		.await
		.expect("failed to send request");

	assert_eq!(resp.status(), StatusCode::NOT_FOUND);
	let body: Value = resp.json().await.expect("failed to parse body");
	assert_eq!(body, json!({ "error": "not found" }));

	server.shutdown().await;
}

#[tokio::test]
async fn test_router_builds() {
	let (global, handler) = mock_global_state(test_config()).await;
	let global = Arc::new(global);

	let router = routes(&global).expect("failed to build router");
	RouterService::new(router).expect("failed to build router service");

	drop(global);
	handler
		.cancel()
		.timeout(Duration::from_secs(1))
		.await
		.expect("failed to cancel context");
}

#[tokio::test]
async fn test_api_bad_bind() {
	let mut config = test_config();

	// Occupy the port so the api cannot bind it.
	let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("failed to bind");
	config.api.bind_address = SocketAddr::from(([127, 0, 0, 1], listener.local_addr().expect("no addr").port()));

	let (global, handler) = mock_global_state(config).await;

	assert!(run(Arc::new(global)).await.is_err());

	handler
		.cancel()
		.timeout(Duration::from_secs(1))
		.await
		.expect("failed to cancel context");
}

#[tokio::test]
async fn test_internal_error_hides_details() {
	let server = TestServer::default().await;

	// Closing the pool makes every query fail.
	server.global.db.close().await;

	let resp = server
		.client
		.get(server.url("/users"))
		.send()
		.await
		.expect("failed to send request");

	assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
	let body: Value = resp.json().await.expect("failed to parse body");
	assert_eq!(body, json!({ "error": "internal server error" }));

	server.shutdown().await;
}
