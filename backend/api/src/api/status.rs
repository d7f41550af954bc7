use common::http::ext::{OptionExt, ResultExt};
use common::http::RouteError;
use common::make_response;
use hyper::{Body, Request, Response, StatusCode};
use routerify::RouterBuilder;
use serde_json::json;

use super::error::{insert_error, ApiError, Result, INTERNAL_ERROR};
use super::ext::{read_json, RequestExt};

const NOT_FOUND: &str = "Identifier not found";
const MISSING_STATUS: &str = "Request must include a boolean status";
const ALREADY_EXISTS: &str = "Identifier already exists";

#[derive(Debug, Default, serde::Deserialize)]
struct UpdateStatusRequest {
	// Strict, `1` or `"true"` are rejected rather than coerced.
	status: Option<bool>,
}

#[tracing::instrument(skip_all)]
async fn list(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.global()?;

	let statuses = global
		.db
		.list_statuses()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR))?;

	Ok(make_response!(StatusCode::OK, json!(statuses)))
}

#[tracing::instrument(skip_all)]
async fn create(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.global()?;

	let uid = global
		.identifiers
		.allocate(|candidate| {
			let db = global.db.clone();
			async move { db.status_exists(&candidate).await }
		})
		.await?;

	let status = global
		.db
		.insert_status(&uid, false)
		.await
		.map_err(|err| insert_error(ALREADY_EXISTS, err))?;

	tracing::debug!(uid = %status.uid, "identifier created");

	Ok(make_response!(StatusCode::OK, json!(status)))
}

#[tracing::instrument(skip_all, fields(uid = %req.uid()))]
async fn get(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.global()?;

	let status = global
		.db
		.get_status(&req.uid())
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR))?
		.map_err_route((StatusCode::NOT_FOUND, NOT_FOUND))?;

	Ok(make_response!(StatusCode::OK, json!(status)))
}

#[tracing::instrument(skip_all, fields(uid = %req.uid()))]
async fn update(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.global()?;
	let uid = req.uid();

	let body: UpdateStatusRequest = read_json(req)
		.await
		.map_err_route((StatusCode::BAD_REQUEST, MISSING_STATUS))?;
	let status = body.status.map_err_route((StatusCode::BAD_REQUEST, MISSING_STATUS))?;

	let affected = global
		.db
		.update_status(&uid, status)
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR))?;

	if affected == 0 {
		return Err(RouteError::from((StatusCode::NOT_FOUND, NOT_FOUND)));
	}

	Ok(make_response!(StatusCode::OK, json!({ "uid": uid, "status": status })))
}

#[tracing::instrument(skip_all, fields(uid = %req.uid()))]
async fn delete(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.global()?;

	let affected = global
		.db
		.delete_status(&req.uid())
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR))?;

	if affected == 0 {
		return Err(RouteError::from((StatusCode::NOT_FOUND, NOT_FOUND)));
	}

	Ok(make_response!(StatusCode::OK, json!({ "result": true })))
}

pub fn routes(builder: RouterBuilder<Body, RouteError<ApiError>>) -> RouterBuilder<Body, RouteError<ApiError>> {
	builder
		.get("/uid", list)
		.post("/uid", create)
		.get("/uid/:uid", get)
		.put("/uid/:uid", update)
		.delete("/uid/:uid", delete)
}
