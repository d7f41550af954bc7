#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, sqlx::FromRow)]
pub struct User {
	/// The identifier the name is mapped to.
	pub uid: String,
	/// The display name.
	pub name: String,
}
