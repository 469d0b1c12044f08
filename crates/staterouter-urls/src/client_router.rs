//! Client-side router driven by a history provider.
//!
//! Routes are registered as `(pattern, handler)` pairs. Whenever the bound
//! [`HistoryProvider`](staterouter_history::HistoryProvider) reports a change,
//! the current entry's path is matched against the routes in registration
//! order and the first match's handler runs.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use staterouter_history::MemoryHistory;
//! use staterouter_urls::client_router::{Path, Router};
//!
//! let router = Router::new(Rc::new(MemoryHistory::new()))
//! 	.route("/", |_state, _params| println!("home"))
//! 	.route_path("/persons/:id", |_state, Path(id): Path<u32>| {
//! 		println!("person {id}");
//! 	});
//!
//! router.navigate("/persons/7").unwrap();
//! assert!(router.match_path("/persons/7").is_some());
//! ```

mod core;
mod error;
mod handler;
mod params;
mod pattern;

pub use self::core::{RouteMatch, Router};
pub use error::{HandlerError, PathError, RouterError};
pub use handler::RouteHandler;
pub use params::{FromPath, ParamContext, Path, SingleFromPath};
pub use pattern::{RoutePattern, normalize_path};
