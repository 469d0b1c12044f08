//! Core Router Implementation.
//!
//! This module provides the [`Router`] struct: the ordered route table, the
//! navigation operations and the dispatch that runs whenever the history
//! provider reports a change.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Value;
use staterouter_history::{
	HistoryProvider, ListenerError, NavigationState, StateListener, SubscriptionId,
};

use super::error::{HandlerError, RouterError};
use super::handler::{
	RouteHandler, fallible_handler, positional_handler, single_path_handler, two_path_handler,
	with_params_handler,
};
use super::params::{FromPath, ParamContext, Path, SingleFromPath};
use super::pattern::{RoutePattern, normalize_path};

/// Routes in registration order, shared with the history listener.
type RouteTable = Rc<RefCell<Vec<Route>>>;

/// A matched route with extracted parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch {
	/// The matched pattern.
	pub pattern: RoutePattern,
	/// Position of the route in registration order.
	pub index: usize,
	/// Extracted path parameters.
	pub params: ParamContext,
}

/// A single route definition.
#[derive(Clone)]
struct Route {
	pattern: RoutePattern,
	handler: Rc<dyn RouteHandler>,
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern)
			.finish()
	}
}

/// The main client-side router.
///
/// A router is bound to one [`HistoryProvider`] for its whole life. It
/// subscribes to the provider's change notification on construction and
/// unsubscribes when dropped or [detached](Router::detach).
///
/// ```
/// use std::rc::Rc;
/// use staterouter_history::{HistoryProvider, MemoryHistory};
/// use staterouter_urls::Router;
///
/// let history = Rc::new(MemoryHistory::new());
/// let router = Router::new(history.clone())
/// 	.route("/persons/:id", |state, params| {
/// 		println!("person {} at {}", params[0], state.url);
/// 	});
///
/// router.navigate("/persons/1").unwrap();
/// assert_eq!(history.state().unwrap().path(), "/persons/1");
/// ```
pub struct Router {
	/// Registered routes.
	routes: RouteTable,
	/// History provider driving navigation.
	history: Rc<dyn HistoryProvider>,
	/// Change subscription, `None` once detached.
	subscription: Cell<Option<SubscriptionId>>,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.routes.borrow())
			.field("subscription", &self.subscription.get())
			.finish()
	}
}

impl Router {
	/// Creates a router bound to `history` and subscribes to its changes.
	pub fn new(history: Rc<dyn HistoryProvider>) -> Self {
		let routes: RouteTable = Rc::new(RefCell::new(Vec::new()));

		// Weak: the provider owns this listener.
		let provider = Rc::downgrade(&history);
		let table = Rc::clone(&routes);
		let listener: StateListener = Rc::new(move || -> Result<(), ListenerError> {
			let Some(history) = provider.upgrade() else {
				return Ok(());
			};
			dispatch(&table, history.state().as_ref()).map_err(|err| Box::new(err) as ListenerError)
		});
		let subscription = history.subscribe(listener);

		Self {
			routes,
			history,
			subscription: Cell::new(Some(subscription)),
		}
	}

	fn push_route(self, pattern: &str, handler: Rc<dyn RouteHandler>) -> Self {
		let pattern = RoutePattern::new(pattern);
		tracing::trace!(pattern = %pattern, "registering route");
		self.routes.borrow_mut().push(Route { pattern, handler });
		self
	}

	/// Adds a route to the router.
	///
	/// The handler receives the current navigation state and the captured
	/// parameter values in pattern order. Routes are tried in registration
	/// order; a later route with the same pattern never fires.
	pub fn route<F>(self, pattern: &str, handler: F) -> Self
	where
		F: Fn(&NavigationState, &[String]) + 'static,
	{
		self.push_route(pattern, positional_handler(handler))
	}

	/// Adds a route whose handler may fail.
	///
	/// The error is returned from whichever call triggered the dispatch.
	pub fn try_route<F, E>(self, pattern: &str, handler: F) -> Self
	where
		F: Fn(&NavigationState, &[String]) -> Result<(), E> + 'static,
		E: Into<HandlerError> + 'static,
	{
		self.push_route(pattern, fallible_handler(handler))
	}

	/// Adds a route with typed path parameters.
	pub fn route_params<F, T>(self, pattern: &str, handler: F) -> Self
	where
		F: Fn(&NavigationState, Path<T>) + 'static,
		T: FromPath + 'static,
	{
		self.push_route(pattern, with_params_handler(handler))
	}

	/// Adds a route with a single path parameter using `Path<T>` extractor.
	///
	/// # Example
	///
	/// ```
	/// use std::cell::Cell;
	/// use std::rc::Rc;
	/// use staterouter_history::MemoryHistory;
	/// use staterouter_urls::{Path, Router};
	///
	/// let shown = Rc::new(Cell::new(0));
	/// let sink = Rc::clone(&shown);
	/// let router = Router::new(Rc::new(MemoryHistory::new()))
	/// 	.route_path("/users/:id", move |_state, Path(id): Path<i64>| sink.set(id));
	///
	/// router.navigate("/users/42").unwrap();
	/// assert_eq!(shown.get(), 42);
	/// ```
	pub fn route_path<F, T>(self, pattern: &str, handler: F) -> Self
	where
		F: Fn(&NavigationState, Path<T>) + 'static,
		T: SingleFromPath + 'static,
	{
		self.push_route(pattern, single_path_handler(handler))
	}

	/// Adds a route with two path parameters using multiple `Path<T>` extractors.
	pub fn route_path2<F, T1, T2>(self, pattern: &str, handler: F) -> Self
	where
		F: Fn(&NavigationState, Path<T1>, Path<T2>) + 'static,
		T1: SingleFromPath + 'static,
		T2: SingleFromPath + 'static,
	{
		self.push_route(pattern, two_path_handler(handler))
	}

	/// Adds a route backed by an existing handler object.
	pub fn route_handler(self, pattern: &str, handler: Rc<dyn RouteHandler>) -> Self {
		self.push_route(pattern, handler)
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.routes.borrow().len()
	}

	/// Returns the history provider.
	pub fn history(&self) -> &Rc<dyn HistoryProvider> {
		&self.history
	}

	/// Returns the current history entry.
	pub fn current_state(&self) -> Option<NavigationState> {
		self.history.state()
	}

	/// Matches a path against registered routes without dispatching.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
		let path = normalize_path(path);
		let routes = self.routes.borrow();
		find_route(&routes, &path).map(|(index, route, params)| RouteMatch {
			pattern: route.pattern,
			index,
			params,
		})
	}

	/// Resolves a navigation target to a root-relative path.
	///
	/// Paths starting with `/` are returned unchanged. Anything else is
	/// relative to the directory of the current entry's path, `/persons`
	/// being treated as `/persons/`. Without a current entry the root is used.
	pub fn resolve_target(&self, path: &str) -> String {
		if path.starts_with('/') {
			return path.to_string();
		}

		let mut base = self
			.history
			.state()
			.map(|state| normalize_path(&state.path()))
			.unwrap_or_else(|| "/".to_string());
		if !base.ends_with('/') {
			base.push('/');
		}
		base.push_str(path);
		base
	}

	/// Navigates to `path`.
	///
	/// Equivalent to [`navigate_with`](Self::navigate_with) without data or
	/// title.
	pub fn navigate(&self, path: &str) -> Result<&Self, RouterError> {
		self.navigate_with(path, None, None)
	}

	/// Navigates to `path`, attaching `data` and `title` to the new entry.
	///
	/// A new entry is pushed when the target, data or title differ from the
	/// current entry. Otherwise nothing is pushed and the change notification
	/// is emitted directly, so routing runs again either way.
	///
	/// # Errors
	///
	/// Returns the history provider's error, or the error of the handler the
	/// navigation dispatched to. In the latter case the entry has already
	/// been pushed.
	pub fn navigate_with(
		&self,
		path: &str,
		data: Option<Value>,
		title: Option<&str>,
	) -> Result<&Self, RouterError> {
		let target = self.resolve_target(path);
		let next = NavigationState {
			data,
			title: title.map(str::to_string),
			url: target,
		};

		let unchanged = self
			.history
			.state()
			.is_some_and(|current| current.location() == next.location() && current.same_payload(&next));

		if unchanged {
			tracing::debug!(target = %next.url, "state unchanged, re-dispatching current entry");
			self.history.notify()?;
		} else {
			tracing::debug!(target = %next.url, "navigating");
			self.history.push_state(next)?;
		}
		Ok(self)
	}

	/// Dispatches the current history entry to the first matching route.
	///
	/// Nothing happens if there is no current entry or no route matches.
	pub fn perform(&self) -> Result<&Self, RouterError> {
		dispatch(&self.routes, self.history.state().as_ref())?;
		Ok(self)
	}

	/// Moves one entry back in history.
	///
	/// # Errors
	///
	/// Returns [`RouterError::History`] if there is no earlier entry.
	pub fn back(&self) -> Result<&Self, RouterError> {
		self.history.back()?;
		Ok(self)
	}

	/// Moves `steps` entries through history, forward when positive.
	///
	/// # Errors
	///
	/// Returns [`RouterError::History`] if the target entry was never
	/// recorded. History is left untouched and no route is dispatched.
	pub fn go(&self, steps: isize) -> Result<&Self, RouterError> {
		self.history.go(steps)?;
		Ok(self)
	}

	/// Unsubscribes from the history provider.
	///
	/// Afterwards history changes no longer dispatch to this router; explicit
	/// [`perform`](Self::perform) still works. Returns `false` if the router
	/// was already detached.
	pub fn detach(&self) -> bool {
		match self.subscription.take() {
			Some(id) => self.history.unsubscribe(id),
			None => false,
		}
	}

	/// Returns whether the router still listens to history changes.
	pub fn is_attached(&self) -> bool {
		self.subscription.get().is_some()
	}
}

impl Drop for Router {
	fn drop(&mut self) {
		self.detach();
	}
}

/// Finds the first route matching the normalized `path`.
fn find_route(routes: &[Route], path: &str) -> Option<(usize, Route, ParamContext)> {
	routes.iter().enumerate().find_map(|(index, route)| {
		route
			.pattern
			.matches(path)
			.map(|params| (index, route.clone(), params))
	})
}

/// Runs the handler of the first route matching `state`'s path.
fn dispatch(routes: &RefCell<Vec<Route>>, state: Option<&NavigationState>) -> Result<(), RouterError> {
	let Some(state) = state else {
		tracing::trace!("no current history entry, nothing to dispatch");
		return Ok(());
	};

	let path = normalize_path(&state.path());
	// Release the table before running user code.
	let matched = find_route(&routes.borrow(), &path);

	match matched {
		Some((index, route, params)) => {
			tracing::trace!(%path, pattern = %route.pattern, index, "route matched");
			route.handler.handle(state, &params)
		}
		None => {
			tracing::trace!(%path, "no route matched");
			Ok(())
		}
	}
}
