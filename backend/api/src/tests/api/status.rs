use hyper::StatusCode;
use serde_json::{json, Value};

use crate::identifier::IDENTIFIER_LENGTH;
use crate::tests::global::{racing_server, TestServer};

async fn new_uid(server: &TestServer) -> String {
	let resp = server
		.client
		.post(server.url("/uid"))
		.send()
		.await
		.expect("failed to create identifier");
	assert_eq!(resp.status(), StatusCode::OK);

	let body: Value = resp.json().await.expect("failed to parse body");
	assert_eq!(body["status"], json!(false));

	let uid = body["uid"].as_str().expect("missing uid").to_string();
	assert_eq!(uid.len(), IDENTIFIER_LENGTH);
	uid
}

#[tokio::test]
async fn test_status_round_trip() {
	let server = TestServer::default().await;
	let uid = new_uid(&server).await;

	let resp = server
		.client
		.get(server.url(&format!("/uid/{uid}")))
		.send()
		.await
		.expect("failed to get status");
	assert_eq!(resp.status(), StatusCode::OK);
	let body: Value = resp.json().await.expect("failed to parse body");
	assert_eq!(body, json!({ "uid": uid, "status": false }));

	for status in [true, false, true] {
		let resp = server
			.client
			.put(server.url(&format!("/uid/{uid}")))
			.json(&json!({ "status": status }))
			.send()
			.await
			.expect("failed to update status");
		assert_eq!(resp.status(), StatusCode::OK);
		let body: Value = resp.json().await.expect("failed to parse body");
		assert_eq!(body, json!({ "uid": uid, "status": status }));

		let resp = server
			.client
			.get(server.url(&format!("/uid/{uid}")))
			.send()
			.await
			.expect("failed to get status");
		let body: Value = resp.json().await.expect("failed to parse body");
		assert_eq!(body, json!({ "uid": uid, "status": status }));
	}

	let resp = server
		.client
		.get(server.url("/uid"))
		.send()
		.await
		.expect("failed to list statuses");
	let body: Value = resp.json().await.expect("failed to parse body");
	assert_eq!(body, json!([{ "uid": uid, "status": true }]));

	server.shutdown().await;
}

#[tokio::test]
async fn test_status_is_strict() {
	let server = TestServer::default().await;
	let uid = new_uid(&server).await;

	for body in [json!({}), json!({ "status": 1 }), json!({ "status": "true" }), json!({ "status": null })] {
		let resp = server
			.client
			.put(server.url(&format!("/uid/{uid}")))
			.json(&body)
			.send()
			.await
			.expect("failed to update status");
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
		let resp: Value = resp.json().await.expect("failed to parse body");
		assert_eq!(resp, json!({ "error": "Request must include a boolean status" }));
	}

	let status = server.global.db.get_status(&uid).await.expect("failed to get status");
	assert_eq!(status.map(|s| s.status), Some(false));

	server.shutdown().await;
}

#[tokio::test]
async fn test_status_not_found() {
	let server = TestServer::default().await;

	let resp = server
		.client
		.get(server.url("/uid/missing"))
		.send()
		.await
		.expect("failed to get status");
	assert_eq!(resp.status(), StatusCode::NOT_FOUND);
	let body: Value = resp.json().await.expect("failed to parse body");
	assert_eq!(body, json!({ "error": "Identifier not found" }));

	let resp = server
		.client
		.put(server.url("/uid/missing"))
		.json(&json!({ "status": true }))
		.send()
		.await
		.expect("failed to update status");
	assert_eq!(resp.status(), StatusCode::NOT_FOUND);

	let resp = server
		.client
		.delete(server.url("/uid/missing"))
		.send()
		.await
		.expect("failed to delete status");
	assert_eq!(resp.status(), StatusCode::NOT_FOUND);

	server.shutdown().await;
}

#[tokio::test]
async fn test_status_delete() {
	let server = TestServer::default().await;
	let uid = new_uid(&server).await;

	let resp = server
		.client
		.delete(server.url(&format!("/uid/{uid}")))
		.send()
		.await
		.expect("failed to delete status");
	assert_eq!(resp.status(), StatusCode::OK);
	let body: Value = resp.json().await.expect("failed to parse body");
	assert_eq!(body, json!({ "result": true }));

	assert_eq!(server.global.db.get_status(&uid).await.expect("failed to get"), None);

	server.shutdown().await;
}

#[tokio::test]
async fn test_status_lost_race() {
	let server = racing_server("taken00000").await;
	server.global.db.insert_status("taken00000", true).await.expect("failed to insert");

	let resp = server
		.client
		.post(server.url("/uid"))
		.send()
		.await
		.expect("failed to create identifier");
	assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	let body: Value = resp.json().await.expect("failed to parse body");
	assert_eq!(body, json!({ "error": "Identifier already exists" }));

	let status = server.global.db.get_status("taken00000").await.expect("failed to get status");
	assert_eq!(status.map(|s| s.status), Some(true));

	server.shutdown().await;
}
