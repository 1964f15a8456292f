//! Client-side navigation engine.
//!
//! The engine maps URL paths to view trees and keeps the host's address bar
//! and the rendered tree in sync, without full page reloads. It is composed
//! of small, separately testable parts:
//!
//! - [`pattern`]: pure path matching and parameter extraction.
//! - [`params`]: the per-resolution parameter map and typed extraction.
//! - [`history`]: the bridge to the host history mechanism.
//! - [`state`]: the navigation state container, the single writer of the
//!   current path.
//! - [`core`]: the two-pass route resolver and the redirect-acting render
//!   loop.
//! - [`components`]: link and redirect primitives plus access-control
//!   guards.
//!
//! ## Wiring it up
//!
//! ```
//! use std::rc::Rc;
//! use shoal::component::View;
//! use shoal::router::{MemoryHistory, NavigationState, Router, guard_redirect};
//!
//! let logged_in = false;
//! let router = Router::new()
//! 	.route("/", |_| View::text("Landing"))
//! 	.route("/fishpedia", |_| View::text("Fishpedia"))
//! 	.dispatch_route("/member/*", move |_| {
//! 		guard_redirect(|| logged_in, View::text("Member area"), "/")
//! 	})
//! 	.redirect_route("*", "/");
//!
//! let state = NavigationState::new(Rc::new(MemoryHistory::new("/member/devices")));
//! let view = router.render_current(&state);
//!
//! // Not logged in: the guard redirected back to the landing page.
//! assert_eq!(state.path(), "/");
//! assert_eq!(view.render_to_string(), "Landing");
//! ```

pub mod components;
pub mod core;
pub mod history;
pub mod params;
pub mod pattern;
pub mod state;

pub use components::{Activation, Link, Redirect, guard, guard_or, guard_redirect};
pub use core::{Directive, Route, RouteMatch, Router, RouterError};
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
pub use history::{HistoryDriver, HistoryListener, HistoryState, MemoryHistory, NavigationError};
pub use params::{FromPath, PathError, PathParams, RouteParams};
pub use pattern::RoutePattern;
pub use state::{NavigationState, Navigator};
