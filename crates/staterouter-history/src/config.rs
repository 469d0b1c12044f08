//! Configuration for history providers.
//!
//! Supports TOML configuration files as well as builder-style overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::error::ConfigError;

/// Default origin that root-relative entry URLs are resolved against.
pub const DEFAULT_BASE_URL: &str = "http://localhost/";

/// Configuration for [`MemoryHistory`](crate::MemoryHistory).
///
/// ```toml
/// base_url = "http://example.com/"
/// initial_path = "/"
/// max_entries = 50
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
	/// Origin used to turn pushed paths into absolute URLs.
	pub base_url: String,

	/// Path of the entry the history starts with; `None` starts empty.
	pub initial_path: Option<String>,

	/// Maximum number of retained entries; the oldest are dropped first.
	pub max_entries: Option<usize>,
}

impl Default for HistoryConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			initial_path: Some("/".to_string()),
			max_entries: None,
		}
	}
}

impl HistoryConfig {
	/// Sets the base URL.
	pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = url.into();
		self
	}

	/// Sets the initial entry path, or `None` for an empty history.
	pub fn with_initial_path(mut self, path: Option<&str>) -> Self {
		self.initial_path = path.map(str::to_string);
		self
	}

	/// Caps the number of retained entries.
	pub fn with_max_entries(mut self, max_entries: usize) -> Self {
		self.max_entries = Some(max_entries);
		self
	}

	/// Load configuration from a TOML file.
	///
	/// # Errors
	///
	/// Returns error if file cannot be read or parsed.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
			path: path.as_ref().to_path_buf(),
			source: e,
		})?;

		Self::from_toml(&content)
	}

	/// Parse configuration from TOML string.
	pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(content)?)
	}

	/// Parses [`base_url`](Self::base_url).
	pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
		Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
			url: self.base_url.clone(),
			source,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::io::Write;

	#[rstest]
	fn test_defaults() {
		let config = HistoryConfig::default();

		assert_eq!(config.base_url, "http://localhost/");
		assert_eq!(config.initial_path.as_deref(), Some("/"));
		assert_eq!(config.max_entries, None);
	}

	#[rstest]
	fn test_from_toml_partial_uses_defaults() {
		// Arrange
		let content = r#"base_url = "http://example.com/""#;

		// Act
		let config = HistoryConfig::from_toml(content).unwrap();

		// Assert
		assert_eq!(config.base_url, "http://example.com/");
		assert_eq!(config.initial_path.as_deref(), Some("/"));
		assert_eq!(config.max_entries, None);
	}

	#[rstest]
	fn test_from_toml_all_fields() {
		let content = r#"
			base_url = "http://example.com/app/"
			initial_path = "/start"
			max_entries = 10
		"#;

		let config = HistoryConfig::from_toml(content).unwrap();

		assert_eq!(
			config,
			HistoryConfig::default()
				.with_base_url("http://example.com/app/")
				.with_initial_path(Some("/start"))
				.with_max_entries(10)
		);
	}

	#[rstest]
	fn test_from_toml_rejects_wrong_types() {
		let result = HistoryConfig::from_toml("max_entries = \"many\"");

		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}

	#[rstest]
	fn test_from_file() {
		// Arrange
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "base_url = \"http://files.example/\"").unwrap();

		// Act
		let config = HistoryConfig::from_file(file.path()).unwrap();

		// Assert
		assert_eq!(config.base_url, "http://files.example/");
	}

	#[rstest]
	fn test_from_missing_file() {
		let result = HistoryConfig::from_file("/nonexistent/staterouter/history.toml");

		assert!(matches!(result, Err(ConfigError::Io { .. })));
	}

	#[rstest]
	#[case("not a url")]
	#[case("/relative/only")]
	fn test_invalid_base_url(#[case] base_url: &str) {
		let config = HistoryConfig::default().with_base_url(base_url);

		assert!(matches!(
			config.parsed_base_url(),
			Err(ConfigError::InvalidBaseUrl { .. })
		));
	}
}
