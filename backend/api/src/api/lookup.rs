use common::http::ext::ResultExt;
use common::http::RouteError;
use common::make_response;
use hyper::{Body, Request, Response, StatusCode};
use routerify::RouterBuilder;
use serde_json::json;

use super::error::{insert_error, ApiError, Result, INTERNAL_ERROR};
use super::ext::{read_json, RequestExt};

const MISSING_NAME_OR_UID: &str = "Request must include name or uid";
const ALREADY_EXISTS: &str = "User with this uid already exists";

/// Returned in place of a name when a uid lookup misses. Existing clients
/// expect a 200 with this value rather than a 404.
pub const NOT_FOUND_SENTINEL: &str = "not found";

#[derive(Debug, Default, serde::Deserialize)]
struct LookupRequest {
	name: Option<String>,
	uid: Option<String>,
}

/// With `name`: returns the uid mapped to it, allocating and storing a fresh
/// one the first time the name is seen. With `uid`: returns its name.
#[tracing::instrument(skip_all)]
async fn lookup(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.global()?;

	let body: LookupRequest = read_json(req)
		.await
		.map_err_route((StatusCode::BAD_REQUEST, MISSING_NAME_OR_UID))?;

	match (body.name.filter(|n| !n.is_empty()), body.uid.filter(|u| !u.is_empty())) {
		(Some(name), _) => {
			if let Some(user) = global
				.db
				.find_user_by_name(&name)
				.await
				.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR))?
			{
				return Ok(make_response!(StatusCode::OK, json!({ "uid": user.uid })));
			}

			let uid = global
				.identifiers
				.allocate(|candidate| {
					let db = global.db.clone();
					async move { db.user_exists(&candidate).await }
				})
				.await?;

			let user = global
				.db
				.insert_user(&uid, &name)
				.await
				.map_err(|err| insert_error(ALREADY_EXISTS, err))?;

			tracing::debug!(uid = %user.uid, "user created by lookup");

			Ok(make_response!(StatusCode::OK, json!({ "uid": user.uid })))
		}
		(None, Some(uid)) => {
			let name = global
				.db
				.get_user(&uid)
				.await
				.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR))?
				.map(|user| user.name)
				.unwrap_or_else(|| NOT_FOUND_SENTINEL.to_string());

			Ok(make_response!(StatusCode::OK, json!({ "name": name })))
		}
		(None, None) => Err(RouteError::from((StatusCode::BAD_REQUEST, MISSING_NAME_OR_UID))),
	}
}

pub fn routes(builder: RouterBuilder<Body, RouteError<ApiError>>) -> RouterBuilder<Body, RouteError<ApiError>> {
	builder.post("/lookup", lookup)
}
