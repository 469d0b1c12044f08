//! Path Pattern Matching for client-side routing.
//!
//! Patterns are plain paths in which any segment token of the form `:name`
//! captures one path segment.

use regex::{Regex, RegexBuilder};

use super::params::ParamContext;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_PATTERN_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// Regex that a `:name` token compiles to: one or more non-`/` characters.
const PARAM_CAPTURE: &str = "([^/]+)";

/// Prepends `/` to `path` unless it already starts with one.
pub fn normalize_path(path: &str) -> String {
	if path.starts_with('/') {
		path.to_string()
	} else {
		format!("/{}", path)
	}
}

/// Represents a compiled path pattern.
///
/// Supports patterns like:
/// - `/persons` - Exact match
/// - `/persons/:id` - Single path parameter
/// - `/persons/:id/:resource` - Multiple parameters
///
/// A parameter token is a colon followed by one or more characters other
/// than `/`. Everything else is matched literally, and the whole path must
/// match: there is no prefix matching and no trailing slash leniency.
#[derive(Debug, Clone)]
pub struct RoutePattern {
	/// The normalized pattern string.
	pattern: String,
	/// Compiled regex, `None` if the regex engine refused the pattern.
	regex: Option<Regex>,
	/// Parameter names in order.
	param_names: Vec<String>,
}

impl RoutePattern {
	/// Creates a new pattern.
	///
	/// Any string is accepted. A pattern not starting with `/` is treated as
	/// if it did. A pattern that cannot be compiled is kept but never matches.
	pub fn new(pattern: &str) -> Self {
		let pattern = normalize_path(pattern);
		let (regex_str, param_names) = Self::compile_pattern(&pattern);

		let regex = match RegexBuilder::new(&regex_str)
			.size_limit(MAX_PATTERN_REGEX_SIZE)
			.build()
		{
			Ok(regex) => Some(regex),
			Err(err) => {
				tracing::warn!(%pattern, error = %err, "route pattern cannot be compiled and will never match");
				None
			}
		};

		Self {
			pattern,
			regex,
			param_names,
		}
	}

	/// Compiles a pattern string into a regex and extracts parameter names.
	fn compile_pattern(pattern: &str) -> (String, Vec<String>) {
		let mut regex_str = String::from("^");
		let mut param_names = Vec::new();
		let mut rest = pattern;

		while let Some(colon) = rest.find(':') {
			let after = &rest[colon + 1..];
			let name_len = after.find('/').unwrap_or(after.len());

			if name_len == 0 {
				// A bare colon is literal text
				regex_str.push_str(&regex::escape(&rest[..=colon]));
				rest = after;
				continue;
			}

			regex_str.push_str(&regex::escape(&rest[..colon]));
			regex_str.push_str(PARAM_CAPTURE);
			param_names.push(after[..name_len].to_string());
			rest = &after[name_len..];
		}

		regex_str.push_str(&regex::escape(rest));
		regex_str.push('$');
		(regex_str, param_names)
	}

	/// Returns the normalized pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Attempts to match a path against this pattern.
	///
	/// Returns the captured values in the order their tokens appear in the
	/// pattern.
	pub fn matches(&self, path: &str) -> Option<ParamContext> {
		let caps = self.regex.as_ref()?.captures(path)?;
		let values = caps
			.iter()
			.skip(1)
			.map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
			.collect();

		Some(ParamContext::new(self.param_names.clone(), values))
	}

	/// Checks if this pattern would match the given path.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.as_ref().is_some_and(|regex| regex.is_match(path))
	}

	/// Returns whether this is an exact match pattern (no parameters).
	pub fn is_exact(&self) -> bool {
		self.param_names.is_empty()
	}
}

impl PartialEq for RoutePattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for RoutePattern {}

impl std::fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}
