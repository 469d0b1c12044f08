//! Error types for client-side routing.

use staterouter_history::HistoryError;

/// Error produced by a fallible route handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for path parameter extraction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
	/// Failed to parse a parameter value.
	#[error("Failed to parse parameter[{param_index}] '{raw_value}' as {param_type}: {reason}")]
	ParseError {
		/// Index of the parameter that failed to parse.
		param_index: usize,
		/// Expected type name.
		param_type: &'static str,
		/// Raw string value that failed to parse.
		raw_value: String,
		/// Error message from parsing.
		reason: String,
	},
	/// Parameter count mismatch.
	#[error("Parameter count mismatch: expected {expected}, got {actual}")]
	CountMismatch {
		/// Expected number of parameters.
		expected: usize,
		/// Actual number of parameters.
		actual: usize,
	},
	/// Custom error message.
	#[error("{0}")]
	Custom(String),
}

/// Error type for router operations.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
	/// The history provider rejected the operation.
	#[error("History error: {0}")]
	History(#[source] HistoryError),
	/// A route handler failed.
	#[error("Route handler failed: {0}")]
	Handler(#[source] HandlerError),
	/// Path parameter extraction failed.
	#[error("Path extraction error: {0}")]
	PathExtraction(#[from] PathError),
}

impl From<HistoryError> for RouterError {
	/// Router errors raised inside a history listener come back boxed in
	/// [`HistoryError::Listener`]; they are unwrapped here.
	fn from(err: HistoryError) -> Self {
		match err {
			HistoryError::Listener(source) => match source.downcast::<RouterError>() {
				Ok(inner) => *inner,
				Err(other) => Self::Handler(other),
			},
			other => Self::History(other),
		}
	}
}
