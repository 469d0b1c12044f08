//! Navigation state stored in each history entry.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::{Position, Url};

/// Origin used to parse entry URLs that carry no scheme or host.
const PLACEHOLDER_ORIGIN: &str = "http://localhost/";

/// A single entry of navigation history.
///
/// `data` and `title` are opaque to the router: they are supplied by the caller
/// at navigation time and handed back to route handlers unchanged. `url` is the
/// URL the entry represents, usually absolute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
	/// Caller supplied payload.
	#[serde(default)]
	pub data: Option<Value>,
	/// Caller supplied title.
	#[serde(default)]
	pub title: Option<String>,
	/// URL of the entry.
	pub url: String,
}

impl NavigationState {
	/// Creates a state for `url` without data or title.
	pub fn new(url: impl Into<String>) -> Self {
		Self {
			data: None,
			title: None,
			url: url.into(),
		}
	}

	/// Attaches a data payload.
	pub fn with_data(mut self, data: Value) -> Self {
		self.data = Some(data);
		self
	}

	/// Attaches a title.
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Returns the payload, treating JSON `null` as absent.
	pub fn data(&self) -> Option<&Value> {
		self.data.as_ref().filter(|data| !data.is_null())
	}

	/// Returns the title, treating an empty title as absent.
	pub fn title(&self) -> Option<&str> {
		self.title.as_deref().filter(|title| !title.is_empty())
	}

	/// Returns whether `other` carries the same data and title.
	///
	/// History backends disagree on how "nothing" is reported, so `None`,
	/// JSON `null` and an empty title all compare equal.
	pub fn same_payload(&self, other: &Self) -> bool {
		self.data() == other.data() && self.title() == other.title()
	}

	/// Returns whether `other` represents the same entry: same URL and payload.
	pub fn is_equivalent(&self, other: &Self) -> bool {
		self.url == other.url && self.same_payload(other)
	}

	/// Returns the path component of the entry URL.
	///
	/// Query string and fragment are discarded.
	pub fn path(&self) -> String {
		match parse_entry_url(&self.url) {
			Some(url) => url.path().to_string(),
			None => self
				.url
				.split(['?', '#'])
				.next()
				.unwrap_or_default()
				.to_string(),
		}
	}

	/// Returns the entry URL without its origin: path, query and fragment.
	pub fn location(&self) -> String {
		match parse_entry_url(&self.url) {
			Some(url) => url[Position::BeforePath..].to_string(),
			None => self.url.clone(),
		}
	}
}

/// Parses an entry URL, resolving relative URLs against a placeholder origin.
fn parse_entry_url(raw: &str) -> Option<Url> {
	match Url::parse(raw) {
		Ok(url) => Some(url),
		Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(PLACEHOLDER_ORIGIN)
			.and_then(|base| join_entry_url(&base, raw))
			.ok(),
		Err(_) => None,
	}
}

/// Resolves `raw` against `base`.
///
/// A reference starting with `/` always stays on `base`'s origin: `//a/b` is
/// the path `//a/b`, not a URL on host `a`.
pub(crate) fn join_entry_url(base: &Url, raw: &str) -> Result<Url, url::ParseError> {
	if !raw.starts_with('/') {
		return base.join(raw);
	}

	let (rest, fragment) = match raw.split_once('#') {
		Some((rest, fragment)) => (rest, Some(fragment)),
		None => (raw, None),
	};
	let (path, query) = match rest.split_once('?') {
		Some((path, query)) => (path, Some(query)),
		None => (rest, None),
	};

	let mut url = base.clone();
	url.set_path(path);
	url.set_query(query);
	url.set_fragment(fragment);
	Ok(url)
}
