//! Route table and resolver.
//!
//! A [`Router`] holds an ordered list of declared routes. Resolution runs in
//! two passes: specific routes first, in declaration order, first match wins;
//! then the `*` fallback entry, wherever it was declared; and if neither pass
//! matches, the result is an empty view: a silent no-op, not an error. The
//! two-pass design keeps catch-all entries from shadowing specific routes
//! regardless of where the application declares them.
//!
//! Content producers receive the extracted [`RouteParams`] explicitly and
//! yield a [`Directive`]: either a view to render, or an instruction to
//! redirect, which the outer loop ([`Router::render`]) acts upon. A redirect
//! is data returned by route-decision logic, never a render side effect.
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
//! 	.route("/fishpedia", |_| View::text("Fishpedia"))
//! 	.route("/member/device/:deviceId/dashboard", |params| {
//! 		View::text(format!("Device {}", params.get("deviceId").unwrap_or("?")))
//! 	})
//! 	.redirect_route("*", "/");
//!
//! let state = NavigationState::new(Rc::new(MemoryHistory::new("/")));
//! state.navigate("/member/device/42/dashboard").unwrap();
//!
//! let view = router.render_current(&state);
//! assert_eq!(view.render_to_string(), "Device 42");
//! ```

use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use crate::component::{IntoView, View};
use crate::warn_log;

use super::params::RouteParams;
use super::pattern::RoutePattern;
use super::state::{NavigationState, Navigator};

/// Bound on redirect chains in one render pass. A chain this deep is a
/// cycle in practice and degrades to an empty view.
const REDIRECT_CHAIN_LIMIT: usize = 8;

/// What a content producer yields for a resolved route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
	/// Render this view.
	Render(View),
	/// Navigate elsewhere instead of rendering.
	Redirect {
		/// The target path.
		to: String,
		/// Replace the current history entry instead of pushing.
		replace: bool,
	},
}

impl Directive {
	/// A redirect that replaces the current history entry.
	pub fn redirect(to: impl Into<String>) -> Self {
		Self::Redirect {
			to: to.into(),
			replace: true,
		}
	}

	/// A redirect that pushes a new history entry.
	pub fn redirect_push(to: impl Into<String>) -> Self {
		Self::Redirect {
			to: to.into(),
			replace: false,
		}
	}
}

type ContentProducer = Rc<dyn Fn(&RouteParams) -> Directive>;

/// A declared route: a pattern plus an opaque content producer.
#[derive(Clone)]
pub struct Route {
	pattern: RoutePattern,
	name: Option<String>,
	producer: ContentProducer,
}

impl Route {
	/// Declares a route rendering the producer's view.
	pub fn new<F, V>(pattern: impl Into<RoutePattern>, producer: F) -> Self
	where
		F: Fn(&RouteParams) -> V + 'static,
		V: IntoView,
	{
		Self::dispatch(pattern, move |params| {
			Directive::Render(producer(params).into_view())
		})
	}

	/// Declares a route whose producer decides between rendering and
	/// redirecting.
	pub fn dispatch<F>(pattern: impl Into<RoutePattern>, producer: F) -> Self
	where
		F: Fn(&RouteParams) -> Directive + 'static,
	{
		Self {
			pattern: pattern.into(),
			name: None,
			producer: Rc::new(producer),
		}
	}

	/// Declares a named route, usable with [`Router::reverse`].
	pub fn named<F, V>(name: impl Into<String>, pattern: impl Into<RoutePattern>, producer: F) -> Self
	where
		F: Fn(&RouteParams) -> V + 'static,
		V: IntoView,
	{
		let mut route = Self::new(pattern, producer);
		route.name = Some(name.into());
		route
	}

	/// Returns the route's name, if any.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Returns the route's pattern.
	pub fn pattern(&self) -> &RoutePattern {
		&self.pattern
	}

	fn produce(&self, params: &RouteParams) -> Directive {
		(self.producer)(params)
	}
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern.as_str())
			.field("name", &self.name)
			.finish()
	}
}

/// A successful match from the first resolution pass.
#[derive(Debug, Clone)]
pub struct RouteMatch {
	/// The matched pattern's string form.
	pub pattern: String,
	/// The extracted parameter bindings.
	pub params: RouteParams,
}

/// Errors from reverse URL generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// No route was declared under the given name.
	#[error("no route named {0:?}")]
	InvalidRouteName(String),
	/// The named route's pattern needs a parameter the caller did not supply.
	#[error("missing parameter for route pattern {pattern:?}")]
	MissingParameter {
		/// The pattern that could not be filled in.
		pattern: String,
	},
}

/// An ordered route table with two-pass resolution.
#[derive(Debug, Clone, Default)]
pub struct Router {
	routes: Vec<Route>,
	named: HashMap<String, usize>,
}

impl Router {
	/// Creates an empty router.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a route rendering the producer's view.
	pub fn route<F, V>(mut self, pattern: &str, producer: F) -> Self
	where
		F: Fn(&RouteParams) -> V + 'static,
		V: IntoView,
	{
		self.routes.push(Route::new(pattern, producer));
		self
	}

	/// Appends a named route.
	pub fn named_route<F, V>(mut self, name: &str, pattern: &str, producer: F) -> Self
	where
		F: Fn(&RouteParams) -> V + 'static,
		V: IntoView,
	{
		let index = self.routes.len();
		self.routes.push(Route::named(name, pattern, producer));
		self.named.insert(name.to_string(), index);
		self
	}

	/// Appends a route whose producer yields a [`Directive`].
	pub fn dispatch_route<F>(mut self, pattern: &str, producer: F) -> Self
	where
		F: Fn(&RouteParams) -> Directive + 'static,
	{
		self.routes.push(Route::dispatch(pattern, producer));
		self
	}

	/// Appends a route that always redirects. Declaring it with pattern `*`
	/// gives the usual not-found redirect.
	pub fn redirect_route(self, pattern: &str, to: &str) -> Self {
		let to = to.to_string();
		self.dispatch_route(pattern, move |_| Directive::redirect(to.clone()))
	}

	/// Appends a pre-built [`Route`].
	pub fn with_route(mut self, route: Route) -> Self {
		if let Some(name) = route.name() {
			self.named.insert(name.to_string(), self.routes.len());
		}
		self.routes.push(route);
		self
	}

	/// Returns the number of declared routes.
	pub fn route_count(&self) -> usize {
		self.routes.len()
	}

	/// Returns `true` if a route was declared under `name`.
	pub fn has_route(&self, name: &str) -> bool {
		self.named.contains_key(name)
	}

	/// Runs the first resolution pass: specific routes in declaration order.
	///
	/// The `*` fallback is never considered here; see [`resolve`](Self::resolve)
	/// for the full two-pass algorithm.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
		self.routes
			.iter()
			.filter(|route| !route.pattern.is_fallback())
			.find(|route| route.pattern.matches(path))
			.map(|route| RouteMatch {
				pattern: route.pattern.as_str().to_string(),
				params: route.pattern.params(path),
			})
	}

	/// Resolves `path` to a single directive, or `None` when no route and no
	/// fallback apply.
	///
	/// Pass 1 walks specific routes in declaration order and stops at the
	/// first pattern match, invoking its producer with the extracted
	/// parameters. Pass 2 looks for a `*` entry and invokes it with an empty
	/// parameter map.
	pub fn resolve(&self, path: &str) -> Option<Directive> {
		for route in &self.routes {
			if route.pattern.is_fallback() {
				continue;
			}
			if route.pattern.matches(path) {
				let params = route.pattern.params(path);
				return Some(route.produce(&params));
			}
		}

		self.routes
			.iter()
			.find(|route| route.pattern.is_fallback())
			.map(|route| route.produce(&RouteParams::empty()))
	}

	/// Resolves `path` and acts on redirect directives through `navigator`,
	/// producing the final view.
	///
	/// Redirect chains are followed up to a fixed bound; beyond it (or when
	/// the host rejects the navigation) the result degrades to
	/// [`View::Empty`].
	pub fn render(&self, path: &str, navigator: &Navigator) -> View {
		let mut path = path.to_string();
		for _ in 0..REDIRECT_CHAIN_LIMIT {
			match self.resolve(&path) {
				None => return View::Empty,
				Some(Directive::Render(view)) => return view,
				Some(Directive::Redirect { to, replace }) => {
					let result = if replace {
						navigator.replace(&to)
					} else {
						navigator.navigate(&to)
					};
					if let Err(err) = result {
						warn_log!("redirect to {to} failed: {err}");
						return View::Empty;
					}
					path = to;
				}
			}
		}
		warn_log!("redirect chain exceeded {REDIRECT_CHAIN_LIMIT} hops at {path}");
		View::Empty
	}

	/// Renders the route matching the container's current path.
	pub fn render_current(&self, state: &NavigationState) -> View {
		self.render(&state.path(), &state.navigator())
	}

	/// Generates a URL for the named route, filling in its parameters.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		let index = self
			.named
			.get(name)
			.ok_or_else(|| RouterError::InvalidRouteName(name.to_string()))?;
		let route = &self.routes[*index];

		let map: HashMap<String, String> = params
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();

		route
			.pattern
			.reverse(&map)
			.ok_or_else(|| RouterError::MissingParameter {
				pattern: route.pattern.as_str().to_string(),
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::router::MemoryHistory;
	use std::cell::RefCell;

	fn page(label: &'static str) -> impl Fn(&RouteParams) -> View {
		move |_| View::text(label)
	}

	fn fixture() -> Router {
		Router::new()
			.route("/fishpedia", page("A"))
			.route("/:page", page("B"))
			.route("*", page("C"))
	}

	#[test]
	fn test_declaration_order_precedence() {
		let router = fixture();
		// The literal route wins over the parameterized one declared later.
		let view = match router.resolve("/fishpedia") {
			Some(Directive::Render(view)) => view,
			other => panic!("expected render, got {other:?}"),
		};
		assert_eq!(view.render_to_string(), "A");
	}

	#[test]
	fn test_param_route_matches_other_single_segment_paths() {
		let router = fixture();
		let Some(Directive::Render(view)) = router.resolve("/produk") else {
			panic!("expected render");
		};
		assert_eq!(view.render_to_string(), "B");
	}

	#[test]
	fn test_fallback_selected_only_when_nothing_matches() {
		let router = fixture();
		let Some(Directive::Render(view)) = router.resolve("/a/b/c") else {
			panic!("expected render");
		};
		assert_eq!(view.render_to_string(), "C");
	}

	#[test]
	fn test_fallback_position_is_irrelevant() {
		// Catch-all declared first must not shadow specific routes.
		let router = Router::new()
			.route("*", page("C"))
			.route("/fishpedia", page("A"));

		let Some(Directive::Render(view)) = router.resolve("/fishpedia") else {
			panic!("expected render");
		};
		assert_eq!(view.render_to_string(), "A");
	}

	#[test]
	fn test_no_match_no_fallback_is_none() {
		let router = Router::new().route("/only", page("X"));
		assert_eq!(router.resolve("/other"), None);
	}

	#[test]
	fn test_producer_receives_extracted_params() {
		let router = Router::new().route("/member/device/:deviceId/dashboard", |params| {
			View::text(params.get("deviceId").unwrap_or("missing").to_string())
		});

		let Some(Directive::Render(view)) = router.resolve("/member/device/42/dashboard") else {
			panic!("expected render");
		};
		assert_eq!(view.render_to_string(), "42");
	}

	#[test]
	fn test_fallback_producer_gets_empty_params() {
		let router = Router::new().route("*", |params: &RouteParams| {
			assert!(params.is_empty());
			View::text("fallback")
		});
		assert!(router.resolve("/whatever").is_some());
	}

	#[test]
	fn test_match_path_skips_fallback() {
		let router = fixture();
		assert!(router.match_path("/a/b/c").is_none());

		let matched = router.match_path("/produk").unwrap();
		assert_eq!(matched.pattern, "/:page");
		assert_eq!(matched.params.get("page"), Some("produk"));
	}

	#[test]
	fn test_render_empty_when_table_is_empty() {
		let router = Router::new();
		let state = NavigationState::new(Rc::new(MemoryHistory::new("/")));
		assert!(router.render_current(&state).is_empty());
	}

	#[test]
	fn test_render_acts_on_redirect() {
		let router = Router::new()
			.route("/", page("Landing"))
			.redirect_route("*", "/");

		let history = MemoryHistory::new("/nowhere");
		let state = NavigationState::new(Rc::new(history.clone()));

		let view = router.render_current(&state);
		assert_eq!(view.render_to_string(), "Landing");
		// Access-control style redirect replaces, so the bogus entry is gone.
		assert_eq!(state.path(), "/");
		assert_eq!(history.entries(), ["/"]);
	}

	#[test]
	fn test_rerender_from_subscription_follows_redirect() {
		// The designed wiring: a subscriber on the current path re-renders
		// on every change. A fallback redirect then writes the path from
		// inside the notification, which must complete, not panic.
		let router = Router::new()
			.route("/", page("Landing"))
			.redirect_route("*", "/");

		let state = NavigationState::new(Rc::new(MemoryHistory::new("/")));
		let rendered = Rc::new(RefCell::new(Vec::new()));

		let _sub = state.current_path().subscribe({
			let router = router.clone();
			let nav = state.navigator();
			let rendered = Rc::clone(&rendered);
			move |path: &String| {
				let view = router.render(path, &nav).render_to_string();
				rendered.borrow_mut().push(view);
			}
		});

		state.navigate("/no/such/page").unwrap();

		assert_eq!(state.path(), "/");
		// Once for the replace-redirect landing, once for the outer render.
		assert_eq!(*rendered.borrow(), ["Landing", "Landing"]);
	}

	#[test]
	fn test_redirect_cycle_degrades_to_empty() {
		let router = Router::new()
			.dispatch_route("/ping", |_| Directive::redirect("/pong"))
			.dispatch_route("/pong", |_| Directive::redirect("/ping"));

		let state = NavigationState::new(Rc::new(MemoryHistory::new("/ping")));
		assert!(router.render_current(&state).is_empty());
	}

	#[test]
	fn test_redirect_push_grows_history() {
		let router = Router::new()
			.route("/home", page("Home"))
			.dispatch_route("/old-home", |_| Directive::redirect_push("/home"));

		let history = MemoryHistory::new("/old-home");
		let state = NavigationState::new(Rc::new(history.clone()));

		let view = router.render_current(&state);
		assert_eq!(view.render_to_string(), "Home");
		assert_eq!(history.entries(), ["/old-home", "/home"]);
	}

	#[test]
	fn test_reverse_by_name() {
		let router = Router::new()
			.named_route("home", "/", page("Home"))
			.named_route("device_dashboard", "/member/device/:deviceId/dashboard", page("D"));

		assert_eq!(router.reverse("home", &[]).unwrap(), "/");
		assert_eq!(
			router
				.reverse("device_dashboard", &[("deviceId", "42")])
				.unwrap(),
			"/member/device/42/dashboard"
		);
	}

	#[test]
	fn test_reverse_unknown_name() {
		let router = Router::new();
		assert_eq!(
			router.reverse("nope", &[]),
			Err(RouterError::InvalidRouteName("nope".to_string()))
		);
	}

	#[test]
	fn test_reverse_missing_param() {
		let router = Router::new().named_route("detail", "/users/:id", page("U"));
		assert!(matches!(
			router.reverse("detail", &[]),
			Err(RouterError::MissingParameter { .. })
		));
	}

	#[test]
	fn test_has_route_and_count() {
		let router = Router::new()
			.named_route("home", "/", page("H"))
			.route("/other", page("O"));

		assert_eq!(router.route_count(), 2);
		assert!(router.has_route("home"));
		assert!(!router.has_route("other"));
	}
}
