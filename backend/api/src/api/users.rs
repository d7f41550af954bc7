use common::http::ext::{OptionExt, ResultExt};
use common::http::RouteError;
use common::make_response;
use hyper::{Body, Request, Response, StatusCode};
use routerify::RouterBuilder;
use serde_json::json;

use super::error::{insert_error, ApiError, Result, INTERNAL_ERROR};
use super::ext::{read_json, RequestExt};

const NOT_FOUND: &str = "User not found";
const MISSING_UID_AND_NAME: &str = "Request must include uid and name";
const MISSING_NAME: &str = "Request must include name";
const ALREADY_EXISTS: &str = "User with this uid already exists";

#[derive(Debug, Default, serde::Deserialize)]
struct CreateUserRequest {
	#[serde(alias = "identifier")]
	uid: Option<String>,
	name: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct UpdateUserRequest {
	name: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.is_empty())
}

#[tracing::instrument(skip_all)]
async fn list(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.global()?;

	let users = global
		.db
		.list_users()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR))?;

	Ok(make_response!(StatusCode::OK, json!(users)))
}

#[tracing::instrument(skip_all, fields(uid = %req.uid()))]
async fn get(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.global()?;

	let user = global
		.db
		.get_user(&req.uid())
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR))?
		.map_err_route((StatusCode::NOT_FOUND, NOT_FOUND))?;

	Ok(make_response!(StatusCode::OK, json!(user)))
}

#[tracing::instrument(skip_all)]
async fn create(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.global()?;

	let body: CreateUserRequest = read_json(req)
		.await
		.map_err_route((StatusCode::BAD_REQUEST, MISSING_UID_AND_NAME))?;

	let (Some(uid), Some(name)) = (non_empty(body.uid), non_empty(body.name)) else {
		return Err(RouteError::from((StatusCode::BAD_REQUEST, MISSING_UID_AND_NAME)));
	};

	let user = global
		.db
		.insert_user(&uid, &name)
		.await
		.map_err(|err| insert_error(ALREADY_EXISTS, err))?;

	tracing::debug!(uid = %user.uid, "user created");

	Ok(make_response!(StatusCode::CREATED, json!(user)))
}

#[tracing::instrument(skip_all, fields(uid = %req.uid()))]
async fn update(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.global()?;
	let uid = req.uid();

	let body: UpdateUserRequest = read_json(req).await.map_err_route((StatusCode::BAD_REQUEST, MISSING_NAME))?;
	let name = non_empty(body.name).map_err_route((StatusCode::BAD_REQUEST, MISSING_NAME))?;

	let affected = global
		.db
		.update_user(&uid, &name)
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR))?;

	if affected == 0 {
		return Err(RouteError::from((StatusCode::NOT_FOUND, NOT_FOUND)));
	}

	Ok(make_response!(StatusCode::OK, json!({ "uid": uid, "name": name })))
}

#[tracing::instrument(skip_all, fields(uid = %req.uid()))]
async fn delete(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.global()?;

	let affected = global
		.db
		.delete_user(&req.uid())
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR))?;

	if affected == 0 {
		return Err(RouteError::from((StatusCode::NOT_FOUND, NOT_FOUND)));
	}

	Ok(make_response!(StatusCode::OK, json!({ "result": true })))
}

pub fn routes(builder: RouterBuilder<Body, RouteError<ApiError>>) -> RouterBuilder<Body, RouteError<ApiError>> {
	builder
		.get("/users", list)
		.post("/users", create)
		.get("/users/:uid", get)
		.put("/users/:uid", update)
		.delete("/users/:uid", delete)
}
