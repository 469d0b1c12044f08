//! # staterouter
//!
//! A minimal client-side URL router driven by a pluggable navigation history.
//!
//! Routes pair a path pattern such as `/persons/:id/:resource` with a handler.
//! A [`Router`] subscribes to a [`HistoryProvider`]; every time the history
//! changes, the current entry's path is matched against the routes in
//! registration order and the first match's handler runs with the entry's
//! [`NavigationState`] and the captured parameters.
//!
//! ## Crates
//!
//! - [`history`]: navigation state, the provider trait, [`MemoryHistory`]
//!   and its configuration
//! - [`urls`]: route patterns, handlers, typed parameter extraction and the
//!   router
//!
//! ## Quick Example
//!
//! ```rust
//! use std::rc::Rc;
//! use staterouter::prelude::*;
//!
//! let history = Rc::new(MemoryHistory::new());
//! let router = Router::new(history.clone())
//! 	.route("/persons", |_state, _params| println!("list"))
//! 	.route_path2(
//! 		"/persons/:id/:resource",
//! 		|state, Path(id): Path<u32>, Path(resource): Path<String>| {
//! 			println!("{} of person {} ({})", resource, id, state.url);
//! 		},
//! 	);
//!
//! router.navigate("/persons")?;
//! router.navigate("1/name")?;
//! router.back()?;
//!
//! assert_eq!(history.state().unwrap().path(), "/persons");
//! # Ok::<(), RouterError>(())
//! ```
//!
//! ## Logging
//!
//! Navigation is logged through `tracing` at `debug` level and route
//! matching at `trace` level. No subscriber is installed by this crate.

pub use staterouter_history as history;
pub use staterouter_urls as urls;

pub use staterouter_history::{
	ConfigError, HistoryConfig, HistoryError, HistoryProvider, MemoryHistory, NavigationState,
	StateListener, SubscriptionId,
};
pub use staterouter_urls::{
	FromPath, ParamContext, Path, PathError, RouteHandler, RouteMatch, RoutePattern, Router,
	RouterError,
};

/// Re-export of commonly used types.
pub mod prelude {
	pub use crate::{
		HistoryConfig, HistoryError, HistoryProvider, MemoryHistory, NavigationState, Path,
		RouteHandler, Router, RouterError,
	};
}
