//! Shoal - a small client-side navigation engine.
//!
//! Shoal maps URL paths to view trees: it matches declared route patterns
//! against the current path, extracts named parameters, keeps the host's
//! address bar and the rendered tree in sync (back/forward included), and
//! intercepts in-app link activation so navigation never causes a full page
//! reload.
//!
//! ## Design
//!
//! - **Explicit state**: the current path lives in a [`NavigationState`]
//!   you construct (one per application, one per test), never in process
//!   globals. Readers subscribe to its [`Signal`]; the container is the only
//!   writer.
//! - **Explicit parameters**: the resolver hands the extracted
//!   [`RouteParams`] straight to the route's content producer. No ambient
//!   context to misplace.
//! - **Explicit redirects**: route-decision logic returns a
//!   [`Directive`], either "render this" or "redirect there", and the resolver's
//!   outer loop acts on it. Redirecting is never a render side effect.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use shoal::component::View;
//! use shoal::router::{MemoryHistory, NavigationState, Router};
//!
//! let router = Router::new()
//! 	.route("/", |_| View::text("Landing"))
//! 	.route("/forum/topic/:topicId", |params| {
//! 		View::text(format!("Topic {}", params.get("topicId").unwrap_or("?")))
//! 	})
//! 	.redirect_route("*", "/");
//!
//! let state = NavigationState::new(Rc::new(MemoryHistory::new("/")));
//! state.navigate("/forum/topic/7").unwrap();
//!
//! assert_eq!(router.render_current(&state).render_to_string(), "Topic 7");
//! ```
//!
//! On wasm32 the same wiring runs against the real History API through
//! `BrowserHistory`; natively and in tests, [`MemoryHistory`] provides a
//! faithful in-process stack whose `back`/`forward` fire the change listener
//! exactly like a popstate event.

#![warn(missing_docs)]

pub mod component;
pub mod logging;
pub mod reactive;
pub mod router;

pub use component::{Component, ElementView, IntoView, View};
pub use reactive::{Signal, Subscription};
#[cfg(target_arch = "wasm32")]
pub use router::BrowserHistory;
pub use router::{
	Activation, Directive, FromPath, HistoryDriver, HistoryState, Link, MemoryHistory,
	NavigationError, NavigationState, Navigator, PathError, PathParams, Redirect, Route,
	RouteMatch, RouteParams, RoutePattern, Router, RouterError, guard, guard_or, guard_redirect,
};
