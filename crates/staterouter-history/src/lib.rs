//! Navigation history for staterouter.
//!
//! This crate defines what a router needs from a navigation history and
//! ships an in-memory implementation of it:
//!
//! - [`NavigationState`]: the data/title/url triple stored in each entry
//! - [`HistoryProvider`]: push, back, go, explicit notification and
//!   change subscriptions
//! - [`MemoryHistory`]: a provider that keeps its entries in a `Vec`
//! - [`HistoryConfig`]: TOML-loadable settings for [`MemoryHistory`]
//!
//! ## Example
//!
//! ```
//! use staterouter_history::{HistoryProvider, MemoryHistory, NavigationState};
//!
//! let history = MemoryHistory::new();
//! history.push_state(NavigationState::new("/persons")).unwrap();
//! history.back().unwrap();
//!
//! assert_eq!(history.state().unwrap().path(), "/");
//! assert_eq!(history.len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod memory;
pub mod provider;
pub mod state;

pub use config::HistoryConfig;
pub use error::{ConfigError, HistoryError, ListenerError};
pub use memory::MemoryHistory;
pub use provider::{HistoryProvider, ListenerSet, StateListener, SubscriptionId};
pub use state::NavigationState;
