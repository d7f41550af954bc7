use std::net::SocketAddr;

use anyhow::Result;
use common::config::LoggingConfig;

/// Environment variables overriding the config are prefixed with this, e.g.
/// `UIDMAP_DATABASE__URI`.
pub const ENV_PREFIX: &str = "UIDMAP";

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
/// The identifier mapping API server
pub struct AppConfig {
	/// The path to the config file
	pub config_file: Option<String>,

	/// Name of this instance
	pub name: String,

	/// The logging config
	pub logging: LoggingConfig,

	/// API Config
	pub api: ApiConfig,

	/// Database Config
	pub database: DatabaseConfig,

	/// Identifier generation Config
	pub identifier: IdentifierConfig,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct ApiConfig {
	/// Bind address for the API
	pub bind_address: SocketAddr,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			bind_address: "[::]:5000".parse().expect("failed to parse bind address"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
	/// The database URL to use, `postgres://...` or `sqlite:...`
	pub uri: String,

	/// Maximum number of pooled connections
	pub max_connections: u32,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			uri: "sqlite:users.db".to_string(),
			max_connections: 10,
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct IdentifierConfig {
	/// How many candidates to try before giving up on allocating an unused
	/// identifier
	pub max_attempts: u32,
}

impl Default for IdentifierConfig {
	fn default() -> Self {
		Self { max_attempts: 100 }
	}
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			config_file: Some("config".to_string()),
			name: "uidmap-api".to_string(),
			logging: LoggingConfig::default(),
			api: ApiConfig::default(),
			database: DatabaseConfig::default(),
			identifier: IdentifierConfig::default(),
		}
	}
}

impl AppConfig {
	pub fn parse() -> Result<Self> {
		// An explicitly requested file must exist, the default one is optional.
		let explicit = std::env::var(format!("{ENV_PREFIX}_CONFIG_FILE")).ok();
		let required = explicit.is_some();
		let path = explicit.or(Self::default().config_file);

		let (mut config, config_file) = common::config::parse::<Self>(ENV_PREFIX, path.as_deref(), required)?;

		config.config_file = config_file;

		Ok(config)
	}
}
