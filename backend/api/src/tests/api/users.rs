use hyper::StatusCode;
use serde_json::{json, Value};

use crate::tests::global::TestServer;

#[tokio::test]
async fn test_create_and_get() {
	let server = TestServer::default().await;

	let resp = server
		.client
		.post(server.url("/users"))
		.json(&json!({ "identifier": "abc123", "name": "Alice" }))
		.send()
		.await
		.expect("failed to create user");
	assert_eq!(resp.status(), StatusCode::CREATED);
	let body: Value = resp.json().await.expect("failed to parse body");
	assert_eq!(body, json!({ "uid": "abc123", "name": "Alice" }));

	let resp = server
		.client
		.get(server.url("/users/abc123"))
		.send()
		.await
		.expect("failed to get user");
	assert_eq!(resp.status(), StatusCode::OK);
	let body: Value = resp.json().await.expect("failed to parse body");
	assert_eq!(body, json!({ "uid": "abc123", "name": "Alice" }));

	let resp = server
		.client
		.get(server.url("/users"))
		.send()
		.await
		.expect("failed to list users");
	assert_eq!(resp.status(), StatusCode::OK);
	let body: Value = resp.json().await.expect("failed to parse body");
	assert_eq!(body, json!([{ "uid": "abc123", "name": "Alice" }]));

	server.shutdown().await;
}

#[tokio::test]
async fn test_create_conflict() {
	let server = TestServer::default().await;

	for (name, status) in [("Alice", StatusCode::CREATED), ("Bob", StatusCode::BAD_REQUEST)] {
		let resp = server
			.client
			.post(server.url("/users"))
			.json(&json!({ "uid": "abc123", "name": name }))
			.send()
			.await
			.expect("failed to create user");
		assert_eq!(resp.status(), status);

		if status == StatusCode::BAD_REQUEST {
			let body: Value = resp.json().await.expect("failed to parse body");
			assert_eq!(body, json!({ "error": "User with this uid already exists" }));
		}
	}

	// The original mapping is untouched.
	let user = server.global.db.get_user("abc123").await.expect("failed to get user");
	assert_eq!(user.map(|u| u.name), Some("Alice".to_string()));

	server.shutdown().await;
}

#[tokio::test]
async fn test_create_validation() {
	let server = TestServer::default().await;

	let bodies = [
		None,
		Some("not json".to_string()),
		Some(json!({ "uid": "abc123" }).to_string()),
		Some(json!({ "name": "Alice" }).to_string()),
		Some(json!({ "uid": "", "name": "Alice" }).to_string()),
		Some(json!({ "uid": "abc123", "name": "" }).to_string()),
		Some(json!({ "uid": 5, "name": "Alice" }).to_string()),
	];

	for body in bodies {
		let mut req = server.client.post(server.url("/users"));
		if let Some(body) = &body {
			req = req.body(body.clone());
		}

		let resp = req.send().await.expect("failed to send request");
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body:?}");
		let resp: Value = resp.json().await.expect("failed to parse body");
		assert_eq!(resp, json!({ "error": "Request must include uid and name" }), "{body:?}");
	}

	assert!(server.global.db.list_users().await.expect("failed to list").is_empty());

	server.shutdown().await;
}

#[tokio::test]
async fn test_update() {
	let server = TestServer::default().await;
	server.global.db.insert_user("abc123", "Alice").await.expect("failed to insert");

	let resp = server
		.client
		.put(server.url("/users/abc123"))
		.json(&json!({ "name": "Alicia" }))
		.send()
		.await
		.expect("failed to update user");
	assert_eq!(resp.status(), StatusCode::OK);
	let body: Value = resp.json().await.expect("failed to parse body");
	assert_eq!(body, json!({ "uid": "abc123", "name": "Alicia" }));

	let resp = server
		.client
		.put(server.url("/users/abc123"))
		.json(&json!({ "nickname": "Al" }))
		.send()
		.await
		.expect("failed to update user");
	assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	let body: Value = resp.json().await.expect("failed to parse body");
	assert_eq!(body, json!({ "error": "Request must include name" }));

	let resp = server
		.client
		.put(server.url("/users/missing"))
		.json(&json!({ "name": "Nobody" }))
		.send()
		.await
		.expect("failed to update user");
	assert_eq!(resp.status(), StatusCode::NOT_FOUND);
	let body: Value = resp.json().await.expect("failed to parse body");
	assert_eq!(body, json!({ "error": "User not found" }));

	server.shutdown().await;
}

#[tokio::test]
async fn test_delete() {
	let server = TestServer::default().await;
	server.global.db.insert_user("abc123", "Alice").await.expect("failed to insert");

	let resp = server
		.client
		.delete(server.url("/users/abc123"))
		.send()
		.await
		.expect("failed to delete user");
	assert_eq!(resp.status(), StatusCode::OK);
	let body: Value = resp.json().await.expect("failed to parse body");
	assert_eq!(body, json!({ "result": true }));

	let resp = server
		.client
		.get(server.url("/users/abc123"))
		.send()
		.await
		.expect("failed to get user");
	assert_eq!(resp.status(), StatusCode::NOT_FOUND);

	// Deleting again, or something that never existed, is a 404.
	for uid in ["abc123", "nonexistent"] {
		let resp = server
			.client
			.delete(server.url(&format!("/users/{uid}")))
			.send()
			.await
			.expect("failed to delete user");
		assert_eq!(resp.status(), StatusCode::NOT_FOUND);
		let body: Value = resp.json().await.expect("failed to parse body");
		assert_eq!(body, json!({ "error": "User not found" }));
	}

	server.shutdown().await;
}
