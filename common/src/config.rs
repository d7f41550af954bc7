use serde::de::DeserializeOwned;

use crate::logging;

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
	/// The log level to use, this is a tracing env filter
	pub level: String,

	/// What logging mode we should use
	pub mode: logging::Mode,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			mode: logging::Mode::Default,
		}
	}
}

/// Loads `C` from its serde defaults, then the config file, then environment
/// variables named `{PREFIX}_{KEY}` with `__` separating nested keys.
///
/// A missing `config_file` is only an error when `required` is set. Returns
/// the config together with the path of the file that was actually read.
pub fn parse<C: DeserializeOwned>(
	env_prefix: &str,
	config_file: Option<&str>,
	required: bool,
) -> Result<(C, Option<String>), config::ConfigError> {
	let mut builder = config::Config::builder();
	let mut config_path = None;

	if let Some(path) = config_file.filter(|p| !p.is_empty()) {
		let exists = std::path::Path::new(path).exists()
			|| ["toml", "yaml", "yml", "json"]
				.iter()
				.any(|ext| std::path::Path::new(&format!("{path}.{ext}")).exists());

		if exists {
			config_path = Some(path.to_string());
		} else if !required {
			tracing::debug!(path, "config file not found, skipping");
		}

		builder = builder.add_source(config::File::with_name(path).required(required));
	}

	builder = builder.add_source(
		config::Environment::with_prefix(env_prefix)
			.prefix_separator("_")
			.separator("__")
			.try_parsing(true),
	);

	let config = builder.build()?.try_deserialize()?;

	Ok((config, config_path))
}
