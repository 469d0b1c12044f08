//! Integration tests for the in-memory history provider
//!
//! These tests use [`MemoryHistory`] through the [`HistoryProvider`] trait
//! object, the way a router holds it, and load it from configuration files.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use rstest::rstest;
use serde_json::json;
use staterouter_history::{
	ConfigError, HistoryConfig, HistoryError, HistoryProvider, ListenerError, MemoryHistory,
	NavigationState, StateListener,
};

/// Listener recording the current path on every notification.
fn path_recorder(provider: &Rc<dyn HistoryProvider>) -> (Rc<RefCell<Vec<String>>>, StateListener) {
	let seen = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&seen);
	let weak = Rc::downgrade(provider);
	let listener: StateListener = Rc::new(move || -> Result<(), ListenerError> {
		if let Some(provider) = weak.upgrade() {
			let path = provider.state().map(|state| state.path()).unwrap_or_default();
			sink.borrow_mut().push(path);
		}
		Ok(())
	});
	(seen, listener)
}

#[rstest]
fn test_provider_trait_object_round_trip() {
	// Arrange
	let provider: Rc<dyn HistoryProvider> = Rc::new(MemoryHistory::new());
	let (seen, listener) = path_recorder(&provider);
	provider.subscribe(listener);

	// Act
	provider.push_state(NavigationState::new("/a")).unwrap();
	provider.push_state(NavigationState::new("/b")).unwrap();
	provider.back().unwrap();
	provider.go(1).unwrap();
	provider.notify().unwrap();

	// Assert
	assert_eq!(*seen.borrow(), ["/a", "/b", "/a", "/b", "/b"]);
}

#[rstest]
fn test_push_after_back_discards_forward_entries() {
	// Arrange
	let history = MemoryHistory::new();
	for path in ["/a", "/b", "/c"] {
		history.push_state(NavigationState::new(path)).unwrap();
	}

	// Act
	history.go(-2).unwrap();
	history.push_state(NavigationState::new("/d")).unwrap();

	// Assert
	let paths: Vec<String> = history.entries().iter().map(NavigationState::path).collect();
	assert_eq!(paths, ["/", "/a", "/d"]);
	assert!(matches!(
		history.go(1),
		Err(HistoryError::OutOfBounds { cursor: Some(2), steps: 1, len: 3 })
	));
}

#[rstest]
fn test_payload_is_kept_with_entry() {
	let history = MemoryHistory::new();

	history
		.push_state(
			NavigationState::new("/persons?page=2")
				.with_data(json!({"id": 1}))
				.with_title("Persons"),
		)
		.unwrap();
	history.back().unwrap();
	history.go(1).unwrap();

	let state = history.state().unwrap();
	assert_eq!(state.url, "http://localhost/persons?page=2");
	assert_eq!(state.location(), "/persons?page=2");
	assert_eq!(state.data(), Some(&json!({"id": 1})));
	assert_eq!(state.title(), Some("Persons"));
}

#[rstest]
fn test_history_from_config_file() {
	// Arrange
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(
		file,
		r#"
base_url = "https://app.example.com/"
initial_path = "/dashboard"
max_entries = 3
"#
	)
	.unwrap();

	// Act
	let config = HistoryConfig::from_file(file.path()).unwrap();
	let history = MemoryHistory::from_config(&config).unwrap();
	for path in ["/a", "/b", "/c"] {
		history.push_state(NavigationState::new(path)).unwrap();
	}

	// Assert
	assert_eq!(history.len(), 3);
	assert_eq!(history.cursor(), Some(2));
	assert_eq!(
		history.entries()[0].url,
		"https://app.example.com/a"
	);
}

#[rstest]
fn test_config_with_invalid_base_url() {
	let config = HistoryConfig::from_toml(r#"base_url = "not a url""#).unwrap();

	let err = MemoryHistory::from_config(&config).unwrap_err();

	assert!(matches!(err, ConfigError::InvalidBaseUrl { ref url, .. } if url == "not a url"));
}

#[rstest]
fn test_missing_config_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("history.toml");

	let err = HistoryConfig::from_file(&path).unwrap_err();

	assert!(matches!(err, ConfigError::Io { path: ref p, .. } if *p == path));
}
