use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};

use super::{RecordStore, Result, Status, User};

pub struct PgStore {
	pool: PgPool,
}

impl PgStore {
	pub async fn connect(uri: &str, max_connections: u32) -> Result<Self> {
		let options = PgConnectOptions::from_str(uri)?.disable_statement_logging();

		let pool = PgPoolOptions::new()
			.max_connections(max_connections)
			.connect_with(options)
			.await?;

		Ok(Self::new(pool))
	}

	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}

#[async_trait::async_trait]
impl RecordStore for PgStore {
	async fn migrate(&self) -> Result<()> {
		sqlx::query("CREATE TABLE IF NOT EXISTS users (uid TEXT PRIMARY KEY, name TEXT NOT NULL)")
			.execute(&self.pool)
			.await?;

		sqlx::query("CREATE TABLE IF NOT EXISTS statuses (uid TEXT PRIMARY KEY, status BOOLEAN NOT NULL DEFAULT FALSE)")
			.execute(&self.pool)
			.await?;

		Ok(())
	}

	async fn list_users(&self) -> Result<Vec<User>> {
		Ok(sqlx::query_as("SELECT uid, name FROM users ORDER BY uid")
			.fetch_all(&self.pool)
			.await?)
	}

	async fn get_user(&self, uid: &str) -> Result<Option<User>> {
		Ok(sqlx::query_as("SELECT uid, name FROM users WHERE uid = $1")
			.bind(uid)
			.fetch_optional(&self.pool)
			.await?)
	}

	async fn find_user_by_name(&self, name: &str) -> Result<Option<User>> {
		Ok(sqlx::query_as("SELECT uid, name FROM users WHERE name = $1 ORDER BY uid LIMIT 1")
			.bind(name)
			.fetch_optional(&self.pool)
			.await?)
	}

	async fn user_exists(&self, uid: &str) -> Result<bool> {
		let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE uid = $1")
			.bind(uid)
			.fetch_one(&self.pool)
			.await?;

		Ok(count > 0)
	}

	async fn insert_user(&self, uid: &str, name: &str) -> Result<User> {
		sqlx::query("INSERT INTO users (uid, name) VALUES ($1, $2)")
			.bind(uid)
			.bind(name)
			.execute(&self.pool)
			.await?;

		Ok(User {
			uid: uid.to_string(),
			name: name.to_string(),
		})
	}

	async fn update_user(&self, uid: &str, name: &str) -> Result<u64> {
		Ok(sqlx::query("UPDATE users SET name = $1 WHERE uid = $2")
			.bind(name)
			.bind(uid)
			.execute(&self.pool)
			.await?
			.rows_affected())
	}

	async fn delete_user(&self, uid: &str) -> Result<u64> {
		Ok(sqlx::query("DELETE FROM users WHERE uid = $1")
			.bind(uid)
			.execute(&self.pool)
			.await?
			.rows_affected())
	}

	async fn list_statuses(&self) -> Result<Vec<Status>> {
		Ok(sqlx::query_as("SELECT uid, status FROM statuses ORDER BY uid")
			.fetch_all(&self.pool)
			.await?)
	}

	async fn get_status(&self, uid: &str) -> Result<Option<Status>> {
		Ok(sqlx::query_as("SELECT uid, status FROM statuses WHERE uid = $1")
			.bind(uid)
			.fetch_optional(&self.pool)
			.await?)
	}

	async fn status_exists(&self, uid: &str) -> Result<bool> {
		let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM statuses WHERE uid = $1")
			.bind(uid)
			.fetch_one(&self.pool)
			.await?;

		Ok(count > 0)
	}

	async fn insert_status(&self, uid: &str, status: bool) -> Result<Status> {
		sqlx::query("INSERT INTO statuses (uid, status) VALUES ($1, $2)")
			.bind(uid)
			.bind(status)
			.execute(&self.pool)
			.await?;

		Ok(Status {
			uid: uid.to_string(),
			status,
		})
	}

	async fn update_status(&self, uid: &str, status: bool) -> Result<u64> {
		Ok(sqlx::query("UPDATE statuses SET status = $1 WHERE uid = $2")
			.bind(status)
			.bind(uid)
			.execute(&self.pool)
			.await?
			.rows_affected())
	}

	async fn delete_status(&self, uid: &str) -> Result<u64> {
		Ok(sqlx::query("DELETE FROM statuses WHERE uid = $1")
			.bind(uid)
			.execute(&self.pool)
			.await?
			.rows_affected())
	}

	async fn close(&self) {
		self.pool.close().await;
	}
}
