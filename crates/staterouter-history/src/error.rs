//! Error types for history providers and their configuration.

use std::path::PathBuf;

/// Error returned by a history listener.
///
/// Listeners are supplied by whoever subscribes to a provider, so the error
/// type is erased here and recovered by the subscriber if it needs to.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for history operations.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
	/// The cursor cannot be moved by the requested number of steps.
	#[error("cannot move {steps} step(s) from entry {cursor:?}: history holds {len} entries")]
	OutOfBounds {
		/// Cursor position before the move, `None` for an empty history.
		cursor: Option<usize>,
		/// Requested offset.
		steps: isize,
		/// Number of recorded entries.
		len: usize,
	},

	/// A subscribed listener failed while handling a change notification.
	#[error("history listener failed: {0}")]
	Listener(#[source] ListenerError),
}

/// Error type for loading a [`HistoryConfig`](crate::HistoryConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The configuration file could not be read.
	#[error("failed to read history config {}: {source}", path.display())]
	Io {
		/// File that was being read.
		path: PathBuf,
		/// Underlying I/O error.
		#[source]
		source: std::io::Error,
	},

	/// The configuration is not valid TOML for this schema.
	#[error("failed to parse history config: {0}")]
	Parse(#[from] toml::de::Error),

	/// The configured base URL cannot be parsed as an absolute URL.
	#[error("invalid base URL '{url}': {source}")]
	InvalidBaseUrl {
		/// Offending value.
		url: String,
		/// Parse failure.
		#[source]
		source: url::ParseError,
	},
}
