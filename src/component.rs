//! Minimal view-tree model consumed by the router.
//!
//! Route content producers are opaque to the navigation engine: they yield a
//! [`View`] and the engine never inspects what the view means. This module
//! provides just enough structure for that contract: an element builder, a
//! text node, a fragment, and an explicit empty view for unmatched paths.
//!
//! ## Usage
//!
//! ```
//! use shoal::component::{ElementView, IntoView, View};
//!
//! let view = ElementView::new("nav")
//! 	.attr("class", "site-nav")
//! 	.child("Fishpedia")
//! 	.into_view();
//!
//! assert_eq!(view.render_to_string(), "<nav class=\"site-nav\">Fishpedia</nav>");
//! ```

use std::fmt;

/// A renderable view tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
	/// Renders nothing. Produced by unmatched paths and denied guards.
	Empty,
	/// A text node. Escaped on render.
	Text(String),
	/// An element with attributes and children.
	Element(ElementView),
	/// A sequence of sibling views.
	Fragment(Vec<View>),
}

impl View {
	/// Creates a text view.
	pub fn text(content: impl Into<String>) -> Self {
		Self::Text(content.into())
	}

	/// Returns `true` if this view renders nothing.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Empty => true,
			Self::Fragment(children) => children.iter().all(View::is_empty),
			_ => false,
		}
	}

	/// Renders the view to an HTML string.
	pub fn render_to_string(&self) -> String {
		let mut out = String::new();
		self.write_html(&mut out);
		out
	}

	fn write_html(&self, out: &mut String) {
		match self {
			Self::Empty => {}
			Self::Text(text) => out.push_str(&escape_text(text)),
			Self::Element(el) => el.write_html(out),
			Self::Fragment(children) => {
				for child in children {
					child.write_html(out);
				}
			}
		}
	}
}

/// An HTML element under construction.
///
/// Builder-style: every method consumes and returns `self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementView {
	tag: String,
	attrs: Vec<(String, String)>,
	children: Vec<View>,
}

impl ElementView {
	/// Creates an element with the given tag name.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attrs: Vec::new(),
			children: Vec::new(),
		}
	}

	/// Adds an attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Appends a child view.
	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}

	/// Returns the value of the first attribute with the given name.
	pub fn attr_value(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_str())
	}

	/// Returns the tag name.
	pub fn tag(&self) -> &str {
		&self.tag
	}

	fn write_html(&self, out: &mut String) {
		out.push('<');
		out.push_str(&self.tag);
		for (name, value) in &self.attrs {
			out.push(' ');
			out.push_str(name);
			out.push_str("=\"");
			out.push_str(&escape_attr(value));
			out.push('"');
		}
		if self.children.is_empty() && is_void_tag(&self.tag) {
			out.push_str(" />");
			return;
		}
		out.push('>');
		for child in &self.children {
			child.write_html(out);
		}
		out.push_str("</");
		out.push_str(&self.tag);
		out.push('>');
	}
}

fn is_void_tag(tag: &str) -> bool {
	matches!(tag, "br" | "hr" | "img" | "input" | "link" | "meta")
}

fn escape_text(raw: &str) -> String {
	raw.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
}

fn escape_attr(raw: &str) -> String {
	escape_text(raw).replace('"', "&quot;")
}

/// Conversion into a [`View`].
pub trait IntoView {
	/// Converts `self` into a view.
	fn into_view(self) -> View;
}

impl IntoView for View {
	fn into_view(self) -> View {
		self
	}
}

impl IntoView for ElementView {
	fn into_view(self) -> View {
		View::Element(self)
	}
}

impl IntoView for &str {
	fn into_view(self) -> View {
		View::Text(self.to_string())
	}
}

impl IntoView for String {
	fn into_view(self) -> View {
		View::Text(self)
	}
}

impl<T: IntoView> IntoView for Vec<T> {
	fn into_view(self) -> View {
		View::Fragment(self.into_iter().map(IntoView::into_view).collect())
	}
}

/// A reusable UI component.
pub trait Component {
	/// Renders the component to a view.
	fn render(&self) -> View;

	/// Returns the component's name, for diagnostics.
	fn name() -> &'static str
	where
		Self: Sized;
}

impl fmt::Display for View {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render_to_string())
	}
}
