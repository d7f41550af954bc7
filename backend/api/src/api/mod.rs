use std::sync::Arc;

use common::http::RouteError;
use common::make_response;
use hyper::{Body, Request, Response, StatusCode};
use routerify::{Middleware, RequestInfo, Router, RouterService};
use serde_json::json;

use self::error::ApiError;
use crate::global::GlobalState;

pub mod error;
mod ext;
mod health;
mod lookup;
mod status;
mod users;

async fn not_found(_: Request<Body>) -> error::Result<Response<Body>> {
	Ok(make_response!(StatusCode::NOT_FOUND, json!({ "error": "not found" })))
}

async fn log_response(res: Response<Body>, info: RequestInfo) -> error::Result<Response<Body>> {
	tracing::debug!(method = %info.method(), path = %info.uri(), status = %res.status(), "request served");
	Ok(res)
}

pub fn routes(global: &Arc<GlobalState>) -> routerify::Result<Router<Body, RouteError<ApiError>>> {
	// The router only holds a weak reference, idle keep-alive connections must
	// not keep the global state alive once shutdown starts.
	let weak = Arc::downgrade(global);

	let builder = Router::builder()
		.data(weak)
		.middleware(Middleware::post_with_info(log_response));

	let builder = health::routes(builder);
	let builder = users::routes(builder);
	let builder = lookup::routes(builder);
	let builder = status::routes(builder);

	builder
		.any(not_found)
		.err_handler_with_info(common::http::error_handler::<ApiError>)
		.build()
}

pub async fn run(global: Arc<GlobalState>) -> anyhow::Result<()> {
	let bind_address = global.config.api.bind_address;

	let router = routes(&global).map_err(|err| anyhow::anyhow!("failed to build router: {err}"))?;
	let service = RouterService::new(router).map_err(|err| anyhow::anyhow!("failed to build router service: {err}"))?;
	let server = hyper::Server::try_bind(&bind_address)?.serve(service);

	tracing::info!("listening on {}", server.local_addr());

	let ctx = global.ctx.clone();
	drop(global);

	server
		.with_graceful_shutdown(async move {
			ctx.done().await;
		})
		.await?;

	tracing::info!("api stopped");

	Ok(())
}
