use std::sync::Arc;

use crate::config::DatabaseConfig;

mod postgres;
mod sqlite;
mod status;
mod user;

pub use postgres::PgStore;
pub use sqlite::SqliteStore;
pub use status::Status;
pub use user::User;

pub type Result<T, E = DatabaseError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
	#[error("a record with this uid already exists")]
	UniqueViolation,
	#[error("unsupported database uri: {0}")]
	UnsupportedUri(String),
	#[error("database error: {0}")]
	Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
	fn from(err: sqlx::Error) -> Self {
		match &err {
			sqlx::Error::Database(db) if db.is_unique_violation() => Self::UniqueViolation,
			_ => Self::Sqlx(err),
		}
	}
}

/// Parameterized access to the `users` and `statuses` tables.
///
/// Every backend binds its values with its own placeholder syntax, query
/// text is never assembled at runtime.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync + 'static {
	/// Creates the tables if they are missing.
	async fn migrate(&self) -> Result<()>;

	async fn list_users(&self) -> Result<Vec<User>>;
	async fn get_user(&self, uid: &str) -> Result<Option<User>>;
	async fn find_user_by_name(&self, name: &str) -> Result<Option<User>>;
	async fn user_exists(&self, uid: &str) -> Result<bool>;
	async fn insert_user(&self, uid: &str, name: &str) -> Result<User>;
	/// Returns the number of rows affected.
	async fn update_user(&self, uid: &str, name: &str) -> Result<u64>;
	/// Returns the number of rows affected.
	async fn delete_user(&self, uid: &str) -> Result<u64>;

	async fn list_statuses(&self) -> Result<Vec<Status>>;
	async fn get_status(&self, uid: &str) -> Result<Option<Status>>;
	async fn status_exists(&self, uid: &str) -> Result<bool>;
	async fn insert_status(&self, uid: &str, status: bool) -> Result<Status>;
	async fn update_status(&self, uid: &str, status: bool) -> Result<u64>;
	async fn delete_status(&self, uid: &str) -> Result<u64>;

	/// Closes the underlying pool, waiting for checked out connections.
	async fn close(&self);
}

/// Opens the store selected by the scheme of `config.uri`.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn RecordStore>> {
	let uri = config.uri.as_str();

	if uri.starts_with("postgres://") || uri.starts_with("postgresql://") {
		tracing::debug!("using postgres backend");
		Ok(Arc::new(PgStore::connect(uri, config.max_connections).await?))
	} else if uri.starts_with("sqlite:") {
		tracing::debug!("using sqlite backend");
		Ok(Arc::new(SqliteStore::connect(uri, config.max_connections).await?))
	} else {
		Err(DatabaseError::UnsupportedUri(uri.to_string()))
	}
}
