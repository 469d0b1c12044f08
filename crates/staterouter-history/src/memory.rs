//! In-memory history provider.
//!
//! [`MemoryHistory`] behaves like a browser's session history without a
//! browser: pushing after going back discards the forward entries, `go`
//! refuses to leave the recorded range, and re-pushing the current entry is
//! ignored without a notification.

use std::cell::RefCell;
use url::Url;

use crate::config::{DEFAULT_BASE_URL, HistoryConfig};
use crate::error::{ConfigError, HistoryError};
use crate::provider::{HistoryProvider, ListenerSet, StateListener, SubscriptionId};
use crate::state::{NavigationState, join_entry_url};

/// Recorded entries and the cursor into them.
///
/// `cursor` is `None` exactly when `entries` is empty.
#[derive(Debug, Default)]
struct Timeline {
	entries: Vec<NavigationState>,
	cursor: Option<usize>,
}

/// History provider backed by a `Vec` of entries.
pub struct MemoryHistory {
	base_url: Url,
	max_entries: Option<usize>,
	timeline: RefCell<Timeline>,
	listeners: ListenerSet,
}

impl std::fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let timeline = self.timeline.borrow();
		f.debug_struct("MemoryHistory")
			.field("base_url", &self.base_url.as_str())
			.field("entries_count", &timeline.entries.len())
			.field("cursor", &timeline.cursor)
			.field("listeners", &self.listeners)
			.finish()
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryHistory {
	/// Creates a history with the default configuration: a single entry for
	/// `/` under `http://localhost/`.
	///
	/// # Panics
	///
	/// Panics if [`DEFAULT_BASE_URL`] is not an absolute URL.
	pub fn new() -> Self {
		let base_url = Url::parse(DEFAULT_BASE_URL)
			.unwrap_or_else(|e| panic!("Invalid default base URL '{}': {}", DEFAULT_BASE_URL, e));
		let history = Self::with_base_url(base_url);
		history.seed("/");
		history
	}

	/// Creates a history from configuration.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::InvalidBaseUrl`] if the base URL cannot be parsed.
	pub fn from_config(config: &HistoryConfig) -> Result<Self, ConfigError> {
		let mut history = Self::with_base_url(config.parsed_base_url()?);
		history.max_entries = config.max_entries;
		if let Some(path) = &config.initial_path {
			history.seed(path);
		}
		Ok(history)
	}

	fn with_base_url(base_url: Url) -> Self {
		Self {
			base_url,
			max_entries: None,
			timeline: RefCell::new(Timeline::default()),
			listeners: ListenerSet::new(),
		}
	}

	fn seed(&self, path: &str) {
		let mut timeline = self.timeline.borrow_mut();
		timeline
			.entries
			.push(NavigationState::new(self.absolutize(path)));
		timeline.cursor = Some(0);
	}

	/// Resolves `url` against the base URL.
	///
	/// Absolute URLs are returned unchanged and paths starting with `/` never
	/// leave the base origin. Unparseable input is kept as is.
	pub fn absolutize(&self, url: &str) -> String {
		match join_entry_url(&self.base_url, url) {
			Ok(absolute) => absolute.into(),
			Err(err) => {
				tracing::warn!(url, error = %err, "cannot resolve history URL against base");
				url.to_string()
			}
		}
	}

	/// Returns the base URL.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Returns a copy of every recorded entry, oldest first.
	pub fn entries(&self) -> Vec<NavigationState> {
		self.timeline.borrow().entries.clone()
	}

	/// Returns the cursor position.
	pub fn cursor(&self) -> Option<usize> {
		self.timeline.borrow().cursor
	}

	/// Returns the number of recorded entries.
	pub fn len(&self) -> usize {
		self.timeline.borrow().entries.len()
	}

	/// Returns whether no entry is recorded.
	pub fn is_empty(&self) -> bool {
		self.timeline.borrow().entries.is_empty()
	}

	/// Returns the number of subscribed listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}
}

impl HistoryProvider for MemoryHistory {
	fn state(&self) -> Option<NavigationState> {
		let timeline = self.timeline.borrow();
		timeline
			.cursor
			.and_then(|cursor| timeline.entries.get(cursor))
			.cloned()
	}

	fn push_state(&self, mut state: NavigationState) -> Result<(), HistoryError> {
		state.url = self.absolutize(&state.url);

		{
			let mut timeline = self.timeline.borrow_mut();
			let current = timeline
				.cursor
				.and_then(|cursor| timeline.entries.get(cursor));
			if current.is_some_and(|current| current.is_equivalent(&state)) {
				tracing::trace!(url = %state.url, "ignoring push of the current entry");
				return Ok(());
			}

			let keep = timeline.cursor.map_or(0, |cursor| cursor + 1);
			timeline.entries.truncate(keep);
			tracing::debug!(url = %state.url, "pushing history entry");
			timeline.entries.push(state);

			if let Some(max) = self.max_entries.filter(|max| *max > 0)
				&& timeline.entries.len() > max
			{
				let overflow = timeline.entries.len() - max;
				timeline.entries.drain(..overflow);
			}
			timeline.cursor = Some(timeline.entries.len() - 1);
		}

		self.listeners.emit()
	}

	fn go(&self, steps: isize) -> Result<(), HistoryError> {
		{
			let mut timeline = self.timeline.borrow_mut();
			let len = timeline.entries.len();
			let target = timeline
				.cursor
				.and_then(|cursor| cursor.checked_add_signed(steps))
				.filter(|target| *target < len);
			let Some(target) = target else {
				return Err(HistoryError::OutOfBounds {
					cursor: timeline.cursor,
					steps,
					len,
				});
			};
			tracing::debug!(from = ?timeline.cursor, to = target, "moving history cursor");
			timeline.cursor = Some(target);
		}

		self.listeners.emit()
	}

	fn notify(&self) -> Result<(), HistoryError> {
		self.listeners.emit()
	}

	fn subscribe(&self, listener: StateListener) -> SubscriptionId {
		self.listeners.subscribe(listener)
	}

	fn unsubscribe(&self, id: SubscriptionId) -> bool {
		self.listeners.unsubscribe(id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ListenerError;
	use rstest::{fixture, rstest};
	use serde_json::json;
	use std::cell::Cell;
	use std::rc::Rc;

	#[fixture]
	fn history() -> MemoryHistory {
		MemoryHistory::new()
	}

	fn counting_listener(history: &MemoryHistory) -> Rc<Cell<usize>> {
		let count = Rc::new(Cell::new(0));
		let counter = Rc::clone(&count);
		let listener: StateListener = Rc::new(move || -> Result<(), ListenerError> {
			counter.set(counter.get() + 1);
			Ok(())
		});
		history.subscribe(listener);
		count
	}

	fn urls(history: &MemoryHistory) -> Vec<String> {
		history.entries().into_iter().map(|entry| entry.url).collect()
	}

	#[rstest]
	fn test_new_starts_at_root(history: MemoryHistory) {
		assert_eq!(history.len(), 1);
		assert_eq!(history.cursor(), Some(0));
		assert_eq!(history.state(), Some(NavigationState::new("http://localhost/")));
	}

	#[rstest]
	fn test_push_appends_and_notifies(history: MemoryHistory) {
		// Arrange
		let notified = counting_listener(&history);

		// Act
		history
			.push_state(NavigationState::new("/persons").with_title("Persons"))
			.unwrap();

		// Assert
		assert_eq!(notified.get(), 1);
		assert_eq!(history.cursor(), Some(1));
		let state = history.state().unwrap();
		assert_eq!(state.url, "http://localhost/persons");
		assert_eq!(state.title(), Some("Persons"));
	}

	#[rstest]
	fn test_push_after_back_truncates_forward_entries(history: MemoryHistory) {
		// Arrange
		history.push_state(NavigationState::new("/a")).unwrap();
		history.push_state(NavigationState::new("/b")).unwrap();
		history.back().unwrap();

		// Act
		history.push_state(NavigationState::new("/c")).unwrap();

		// Assert
		assert_eq!(
			urls(&history),
			vec![
				"http://localhost/",
				"http://localhost/a",
				"http://localhost/c"
			]
		);
		assert_eq!(history.cursor(), Some(2));
	}

	#[rstest]
	fn test_repushing_current_entry_is_silent(history: MemoryHistory) {
		history.push_state(NavigationState::new("/x")).unwrap();
		let notified = counting_listener(&history);

		history.push_state(NavigationState::new("/x")).unwrap();

		assert_eq!(notified.get(), 0);
		assert_eq!(history.len(), 2);
	}

	#[rstest]
	fn test_push_with_new_payload_is_recorded(history: MemoryHistory) {
		history.push_state(NavigationState::new("/p")).unwrap();
		history
			.push_state(NavigationState::new("/p").with_data(json!("A")))
			.unwrap();

		assert_eq!(history.len(), 3);
	}

	#[rstest]
	fn test_go_moves_cursor_and_notifies(history: MemoryHistory) {
		// Arrange
		history.push_state(NavigationState::new("/a")).unwrap();
		history.push_state(NavigationState::new("/b")).unwrap();
		let notified = counting_listener(&history);

		// Act
		history.go(-2).unwrap();
		history.go(1).unwrap();

		// Assert
		assert_eq!(notified.get(), 2);
		assert_eq!(history.state().unwrap().url, "http://localhost/a");
	}

	#[rstest]
	#[case(1)]
	#[case(5)]
	#[case(-1)]
	fn test_go_out_of_bounds_leaves_cursor(history: MemoryHistory, #[case] steps: isize) {
		// Arrange
		let notified = counting_listener(&history);

		// Act
		let result = history.go(steps);

		// Assert
		assert!(matches!(
			result,
			Err(HistoryError::OutOfBounds { cursor: Some(0), len: 1, .. })
		));
		assert_eq!(history.cursor(), Some(0));
		assert_eq!(notified.get(), 0);
	}

	#[rstest]
	fn test_empty_history() {
		let config = HistoryConfig::default().with_initial_path(None);
		let history = MemoryHistory::from_config(&config).unwrap();

		assert!(history.is_empty());
		assert_eq!(history.state(), None);
		assert!(history.back().is_err());

		history.push_state(NavigationState::new("/first")).unwrap();
		assert_eq!(history.cursor(), Some(0));
	}

	#[rstest]
	fn test_max_entries_drops_oldest() {
		// Arrange
		let config = HistoryConfig::default().with_max_entries(2);
		let history = MemoryHistory::from_config(&config).unwrap();

		// Act
		history.push_state(NavigationState::new("/a")).unwrap();
		history.push_state(NavigationState::new("/b")).unwrap();

		// Assert
		assert_eq!(urls(&history), vec!["http://localhost/a", "http://localhost/b"]);
		assert_eq!(history.cursor(), Some(1));
	}

	#[rstest]
	fn test_from_config_base_url() {
		let config = HistoryConfig::default().with_base_url("http://example.com");
		let history = MemoryHistory::from_config(&config).unwrap();

		assert_eq!(history.base_url().as_str(), "http://example.com/");
		assert_eq!(history.state().unwrap().url, "http://example.com/");
		assert_eq!(history.absolutize("persons/1"), "http://example.com/persons/1");
		assert_eq!(
			history.absolutize("https://other.example/x"),
			"https://other.example/x"
		);
	}

	#[rstest]
	#[case("//double/x", "http://localhost//double/x")]
	#[case("//double/x?q=1#top", "http://localhost//double/x?q=1#top")]
	#[case("/persons/../teams", "http://localhost/teams")]
	fn test_absolutize_keeps_root_relative_paths_on_origin(
		history: MemoryHistory,
		#[case] url: &str,
		#[case] expected: &str,
	) {
		assert_eq!(history.absolutize(url), expected);
		assert_eq!(history.base_url().host_str(), Some("localhost"));
	}

	#[rstest]
	fn test_listener_can_read_state_during_dispatch(history: MemoryHistory) {
		// Arrange
		let history = Rc::new(history);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let weak = Rc::downgrade(&history);
		let log = Rc::clone(&seen);
		let listener: StateListener = Rc::new(move || -> Result<(), ListenerError> {
			if let Some(history) = weak.upgrade() {
				log.borrow_mut().push(history.state().map(|state| state.path()));
			}
			Ok(())
		});
		history.subscribe(listener);

		// Act
		history.push_state(NavigationState::new("/inside")).unwrap();
		history.notify().unwrap();

		// Assert
		assert_eq!(
			*seen.borrow(),
			vec![Some("/inside".to_string()), Some("/inside".to_string())]
		);
	}

	#[rstest]
	fn test_listener_failure_propagates_after_state_change(history: MemoryHistory) {
		let listener: StateListener = Rc::new(|| -> Result<(), ListenerError> { Err("nope".into()) });
		history.subscribe(listener);

		let result = history.push_state(NavigationState::new("/fails"));

		assert!(matches!(result, Err(HistoryError::Listener(_))));
		assert_eq!(history.state().unwrap().path(), "/fails");
	}
}
