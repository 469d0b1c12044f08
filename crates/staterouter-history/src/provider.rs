//! The history provider contract and listener bookkeeping.
//!
//! A [`HistoryProvider`] owns an ordered sequence of [`NavigationState`]
//! entries and a cursor into it. Whenever the cursor moves, or a caller asks
//! for it explicitly through [`HistoryProvider::notify`], every subscribed
//! [`StateListener`] is invoked synchronously, in subscription order.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{HistoryError, ListenerError};
use crate::state::NavigationState;

/// Callback invoked when the current history entry changes.
pub type StateListener = Rc<dyn Fn() -> Result<(), ListenerError>>;

/// Handle returned by [`HistoryProvider::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
	/// Returns the raw identifier.
	pub fn get(self) -> u64 {
		self.0
	}
}

/// Source of navigation history.
///
/// Implementations must emit the change notification synchronously from
/// `push_state`, `back`, `go` and `notify`, and must not hold any internal
/// borrow while listeners run: listeners read [`HistoryProvider::state`].
pub trait HistoryProvider {
	/// Returns the entry at the cursor, or `None` if there is no history.
	fn state(&self) -> Option<NavigationState>;

	/// Appends `state` after the cursor, discarding any forward entries, then
	/// notifies listeners.
	///
	/// Re-pushing an entry equivalent to the current one may be ignored
	/// without a notification.
	fn push_state(&self, state: NavigationState) -> Result<(), HistoryError>;

	/// Moves the cursor one entry back.
	fn back(&self) -> Result<(), HistoryError> {
		self.go(-1)
	}

	/// Moves the cursor by `steps` (negative moves back).
	///
	/// # Errors
	///
	/// Returns [`HistoryError::OutOfBounds`] without moving the cursor or
	/// notifying when the target lies outside the recorded entries.
	fn go(&self, steps: isize) -> Result<(), HistoryError>;

	/// Emits the change notification without touching history.
	fn notify(&self) -> Result<(), HistoryError>;

	/// Registers a change listener.
	fn subscribe(&self, listener: StateListener) -> SubscriptionId;

	/// Removes a change listener. Returns `false` if `id` was not subscribed.
	fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// Ordered set of listeners shared by provider implementations.
#[derive(Default)]
pub struct ListenerSet {
	next_id: Cell<u64>,
	listeners: RefCell<Vec<(SubscriptionId, StateListener)>>,
}

impl std::fmt::Debug for ListenerSet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ListenerSet")
			.field("listeners_count", &self.len())
			.finish()
	}
}

impl ListenerSet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a listener at the end of the dispatch order.
	pub fn subscribe(&self, listener: StateListener) -> SubscriptionId {
		let id = SubscriptionId(self.next_id.get());
		self.next_id.set(id.0 + 1);
		self.listeners.borrow_mut().push((id, listener));
		tracing::trace!(subscription = id.0, "history listener subscribed");
		id
	}

	/// Removes the listener registered under `id`.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut listeners = self.listeners.borrow_mut();
		let before = listeners.len();
		listeners.retain(|(existing, _)| *existing != id);
		let removed = listeners.len() != before;
		if removed {
			tracing::trace!(subscription = id.0, "history listener unsubscribed");
		}
		removed
	}

	/// Returns the number of subscribed listeners.
	pub fn len(&self) -> usize {
		self.listeners.borrow().len()
	}

	/// Returns whether no listener is subscribed.
	pub fn is_empty(&self) -> bool {
		self.listeners.borrow().is_empty()
	}

	/// Invokes every listener in subscription order.
	///
	/// Dispatch stops at the first failing listener.
	pub fn emit(&self) -> Result<(), HistoryError> {
		// Snapshot so listeners may subscribe or unsubscribe while running.
		let snapshot: Vec<StateListener> = self
			.listeners
			.borrow()
			.iter()
			.map(|(_, listener)| Rc::clone(listener))
			.collect();

		for listener in snapshot {
			listener().map_err(HistoryError::Listener)?;
		}
		Ok(())
	}
}
