use std::sync::Arc;

use common::http::ext::RequestGlobalExt;
use hyper::{Body, Request};
use routerify::ext::RequestExt as _;
use serde::de::DeserializeOwned;

use super::error::{ApiError, Result};
use crate::global::GlobalState;

pub trait RequestExt {
	fn global(&self) -> Result<Arc<GlobalState>>;

	/// The `:uid` path parameter.
	fn uid(&self) -> String;
}

impl RequestExt for Request<Body> {
	fn global(&self) -> Result<Arc<GlobalState>> {
		<Self as RequestGlobalExt<ApiError>>::get_global::<GlobalState>(self)
	}

	fn uid(&self) -> String {
		self.param("uid").cloned().unwrap_or_default()
	}
}

/// Reads the whole body and parses it as JSON.
pub async fn read_json<T: DeserializeOwned>(req: Request<Body>) -> std::result::Result<T, ApiError> {
	let body = hyper::body::to_bytes(req.into_body()).await?;
	Ok(serde_json::from_slice(&body)?)
}
