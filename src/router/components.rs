//! Navigation primitives: links, redirects, and access-control guards.
//!
//! [`Link`] is the in-app navigation trigger. It always renders a real
//! `<a href>` so it stays usable as a plain hyperlink when the engine is not
//! wired up; on activation it suppresses the host's default navigation and
//! calls into the navigation state instead. Activations carrying a modifier
//! key or a non-primary button are left to the browser, preserving
//! open-in-new-tab conventions.
//!
//! [`Redirect`] is the content-less redirect directive: its output is an
//! explicit [`Directive::Redirect`] instruction for the resolver's outer
//! loop, not a render side effect. Access-control wrappers compose it via
//! [`guard_redirect`].

use crate::component::{Component, ElementView, IntoView, View};

use super::core::Directive;
use super::history::NavigationError;
use super::state::Navigator;

/// A link activation event, abstracted from the host event type.
///
/// Tracks whether default navigation was suppressed, so tests can assert the
/// prevention call was made.
#[derive(Debug, Clone, Default)]
pub struct Activation {
	button: i16,
	ctrl: bool,
	alt: bool,
	shift: bool,
	meta: bool,
	default_prevented: bool,
}

impl Activation {
	/// A plain primary-button activation with no modifiers.
	pub fn primary() -> Self {
		Self::default()
	}

	/// Sets the mouse button (0 is primary).
	pub fn button(mut self, button: i16) -> Self {
		self.button = button;
		self
	}

	/// Sets the ctrl-key flag.
	pub fn ctrl(mut self, pressed: bool) -> Self {
		self.ctrl = pressed;
		self
	}

	/// Sets the alt-key flag.
	pub fn alt(mut self, pressed: bool) -> Self {
		self.alt = pressed;
		self
	}

	/// Sets the shift-key flag.
	pub fn shift(mut self, pressed: bool) -> Self {
		self.shift = pressed;
		self
	}

	/// Sets the meta-key flag.
	pub fn meta(mut self, pressed: bool) -> Self {
		self.meta = pressed;
		self
	}

	/// Returns `true` if the activation should fall back to native behavior.
	pub fn wants_native(&self) -> bool {
		self.button != 0 || self.ctrl || self.alt || self.shift || self.meta
	}

	/// Suppresses the host's default navigation.
	pub fn prevent_default(&mut self) {
		self.default_prevented = true;
	}

	/// Returns `true` if default navigation was suppressed.
	pub fn default_prevented(&self) -> bool {
		self.default_prevented
	}

	/// Captures button and modifier state from a DOM mouse event.
	#[cfg(target_arch = "wasm32")]
	pub fn from_mouse_event(event: &web_sys::MouseEvent) -> Self {
		Self {
			button: event.button(),
			ctrl: event.ctrl_key(),
			alt: event.alt_key(),
			shift: event.shift_key(),
			meta: event.meta_key(),
			default_prevented: false,
		}
	}
}

/// An in-app navigation trigger.
///
/// ## Example
///
/// ```
/// use shoal::component::Component;
/// use shoal::router::Link;
///
/// let link = Link::new("/fishpedia", "Fishpedia").class("nav-link");
/// let html = link.render().render_to_string();
/// assert!(html.contains("href=\"/fishpedia\""));
/// ```
#[derive(Debug, Clone)]
pub struct Link {
	to: String,
	content: String,
	class: Option<String>,
	replace: bool,
	attrs: Vec<(String, String)>,
}

impl Link {
	/// Creates a link to `to` with text content.
	pub fn new(to: impl Into<String>, content: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			content: content.into(),
			class: None,
			replace: false,
			attrs: Vec::new(),
		}
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Makes activation replace the current history entry.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Adds a custom attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Returns the destination path.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Handles an activation.
	///
	/// For a primary unmodified activation: suppresses default navigation and
	/// requests in-app navigation, returning `Ok(true)`. Otherwise leaves the
	/// event alone and returns `Ok(false)` so the browser takes over.
	pub fn activate(
		&self,
		navigator: &Navigator,
		activation: &mut Activation,
	) -> Result<bool, NavigationError> {
		if activation.wants_native() {
			return Ok(false);
		}
		activation.prevent_default();
		if self.replace {
			navigator.replace(&self.to)?;
		} else {
			navigator.navigate(&self.to)?;
		}
		Ok(true)
	}

	/// DOM click handler: captures the event, activates, and propagates the
	/// prevention to the real event.
	#[cfg(target_arch = "wasm32")]
	pub fn on_click(
		&self,
		navigator: &Navigator,
		event: &web_sys::MouseEvent,
	) -> Result<bool, NavigationError> {
		let mut activation = Activation::from_mouse_event(event);
		let handled = self.activate(navigator, &mut activation)?;
		if activation.default_prevented() {
			event.prevent_default();
		}
		Ok(handled)
	}
}

impl Component for Link {
	fn render(&self) -> View {
		// The href is always present so the element degrades to a plain
		// hyperlink when activation is not intercepted.
		let mut el = ElementView::new("a")
			.attr("href", self.to.clone())
			.attr("data-link", "true");

		if let Some(ref class) = self.class {
			el = el.attr("class", class.clone());
		}
		if self.replace {
			el = el.attr("data-replace", "true");
		}
		for (name, value) in &self.attrs {
			el = el.attr(name.clone(), value.clone());
		}

		el.child(self.content.clone()).into_view()
	}

	fn name() -> &'static str {
		"Link"
	}
}

/// A content-less redirect directive.
///
/// Rendering it produces nothing; its [`directive`](Self::directive) output
/// tells the resolver's outer loop to navigate. Replaces the current history
/// entry by default, as access-control redirects should.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
	to: String,
	replace: bool,
}

impl Redirect {
	/// Creates a redirect to `to`.
	pub fn new(to: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			replace: true,
		}
	}

	/// Sets whether to replace the current history entry.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Returns the destination path.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Returns the navigation instruction this redirect stands for.
	pub fn directive(&self) -> Directive {
		Directive::Redirect {
			to: self.to.clone(),
			replace: self.replace,
		}
	}
}

impl From<Redirect> for Directive {
	fn from(redirect: Redirect) -> Self {
		redirect.directive()
	}
}

impl Component for Redirect {
	fn render(&self) -> View {
		View::Empty
	}

	fn name() -> &'static str {
		"Redirect"
	}
}

/// Renders `content` when `allowed` holds, nothing otherwise.
pub fn guard<F, V>(allowed: F, content: V) -> Directive
where
	F: FnOnce() -> bool,
	V: IntoView,
{
	if allowed() {
		Directive::Render(content.into_view())
	} else {
		Directive::Render(View::Empty)
	}
}

/// Renders `content` when `allowed` holds, `fallback` otherwise.
pub fn guard_or<F, V, U>(allowed: F, content: V, fallback: U) -> Directive
where
	F: FnOnce() -> bool,
	V: IntoView,
	U: IntoView,
{
	if allowed() {
		Directive::Render(content.into_view())
	} else {
		Directive::Render(fallback.into_view())
	}
}

/// Renders `content` when `allowed` holds, redirects to `to` otherwise.
///
/// The access-control building block: the capability check is supplied by the
/// external session owner.
pub fn guard_redirect<F, V>(allowed: F, content: V, to: impl Into<String>) -> Directive
where
	F: FnOnce() -> bool,
	V: IntoView,
{
	if allowed() {
		Directive::Render(content.into_view())
	} else {
		Redirect::new(to).directive()
	}
}
