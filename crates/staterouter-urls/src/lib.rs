//! Route patterns and the client-side router for staterouter.
//!
//! This crate maps history entries to handlers: patterns such as
//! `/persons/:id` are compiled into anchored matchers, and a [`Router`]
//! dispatches every change reported by a
//! [`HistoryProvider`](staterouter_history::HistoryProvider) to the first
//! route matching the current path.
//!
//! Handlers either receive the captured values as strings or extract them
//! into typed values through [`Path`].

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod client_router;

pub use client_router::{
	FromPath, HandlerError, ParamContext, Path, PathError, RouteHandler, RouteMatch, RoutePattern,
	Router, RouterError, SingleFromPath, normalize_path,
};

/// Commonly used routing types.
pub mod prelude {
	pub use crate::client_router::{Path, RouteHandler, Router, RouterError};
}
