use common::http::RouteError;
use hyper::StatusCode;

use crate::database::DatabaseError;
use crate::identifier::IdentifierError;

pub type Result<T, E = RouteError<ApiError>> = std::result::Result<T, E>;

/// Message returned for any unexpected backend failure, the details are
/// only logged.
pub const INTERNAL_ERROR: &str = "internal server error";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
	#[error("failed to read http body: {0}")]
	ReadBody(#[from] hyper::Error),
	#[error("failed to parse json body: {0}")]
	ParseJson(#[from] serde_json::Error),
	#[error("database: {0}")]
	Database(#[from] DatabaseError),
	#[error("identifier: {0}")]
	Identifier(#[from] IdentifierError),
}

impl From<IdentifierError> for RouteError<ApiError> {
	#[track_caller]
	fn from(err: IdentifierError) -> Self {
		match err {
			IdentifierError::Exhausted(_) => {
				RouteError::from((StatusCode::SERVICE_UNAVAILABLE, "failed to allocate a unique identifier", err))
			}
			IdentifierError::Database(_) => RouteError::from((StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR, err)),
		}
	}
}

/// Maps an insert failure, a uniqueness violation becomes a 400 with
/// `conflict` as the message.
#[track_caller]
pub fn insert_error(conflict: &str, err: DatabaseError) -> RouteError<ApiError> {
	match err {
		DatabaseError::UniqueViolation => RouteError::from((StatusCode::BAD_REQUEST, conflict, err)),
		err => RouteError::from((StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR, err)),
	}
}
