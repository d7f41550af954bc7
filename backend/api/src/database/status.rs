#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, sqlx::FromRow)]
pub struct Status {
	pub uid: String,
	pub status: bool,
}
