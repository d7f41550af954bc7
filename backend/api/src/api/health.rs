use common::http::RouteError;
use common::make_response;
use hyper::{Body, Request, Response, StatusCode};
use routerify::RouterBuilder;
use serde_json::json;

use super::error::{ApiError, Result};

async fn health(_: Request<Body>) -> Result<Response<Body>> {
	tracing::trace!("health check");

	Ok(make_response!(StatusCode::OK, json!({ "status": "ok" })))
}

pub fn routes(builder: RouterBuilder<Body, RouteError<ApiError>>) -> RouterBuilder<Body, RouteError<ApiError>> {
	builder.get("/health", health)
}
