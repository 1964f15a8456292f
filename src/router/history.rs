//! Host history bridge.
//!
//! The engine talks to the environment's history stack through the
//! [`HistoryDriver`] trait: read the current location, push or replace an
//! entry keyed by an absolute path, and get notified when the host restores
//! an entry (back/forward). Entries carry a serialized [`HistoryState`]
//! payload holding nothing beyond the path itself.
//!
//! Two drivers ship with the crate: [`BrowserHistory`] wraps the History API
//! on wasm32, and [`MemoryHistory`] keeps a real in-process entry stack for
//! native builds and tests, with `back`/`forward` firing the change listener
//! exactly like a popstate event would.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The payload attached to a pushed history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
	path: String,
}

impl HistoryState {
	/// Creates a state record for `path`.
	pub fn new(path: impl Into<String>) -> Self {
		Self { path: path.into() }
	}

	/// Returns the entry's path.
	pub fn path(&self) -> &str {
		&self.path
	}
}

/// Errors surfaced by the host history mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
	/// The host rejected a push/replace operation.
	#[error("host history rejected the operation: {0}")]
	Host(String),
}

/// Listener invoked with the restored path on back/forward navigation.
pub type HistoryListener = Rc<dyn Fn(&str)>;

/// Bridge to a host history mechanism.
///
/// `push`/`replace` never fire the listener; the listener reports only
/// host-initiated restores (back/forward), for which an entry already exists.
pub trait HistoryDriver {
	/// Returns the current location as an absolute path.
	fn location(&self) -> String;

	/// Pushes a new entry. Duplicate consecutive paths still push.
	fn push(&self, state: &HistoryState) -> Result<(), NavigationError>;

	/// Replaces the current entry.
	fn replace(&self, state: &HistoryState) -> Result<(), NavigationError>;

	/// Installs the change listener for the driver's lifetime.
	fn set_listener(&self, listener: HistoryListener);
}

struct MemoryHistoryInner {
	entries: RefCell<Vec<String>>,
	index: RefCell<usize>,
	listener: RefCell<Option<HistoryListener>>,
}

/// An in-process history stack.
///
/// Used natively and in tests. Clones share the same stack, so a test can
/// keep a handle for `back`/`forward` simulation while the navigation state
/// owns another.
#[derive(Clone)]
pub struct MemoryHistory {
	inner: Rc<MemoryHistoryInner>,
}

impl MemoryHistory {
	/// Creates a stack with a single initial entry.
	pub fn new(initial: impl Into<String>) -> Self {
		Self {
			inner: Rc::new(MemoryHistoryInner {
				entries: RefCell::new(vec![initial.into()]),
				index: RefCell::new(0),
				listener: RefCell::new(None),
			}),
		}
	}

	/// Moves one entry back, firing the change listener. No-op at the
	/// oldest entry.
	pub fn back(&self) {
		let moved = {
			let mut index = self.inner.index.borrow_mut();
			if *index == 0 {
				false
			} else {
				*index -= 1;
				true
			}
		};
		if moved {
			self.fire();
		}
	}

	/// Moves one entry forward, firing the change listener. No-op at the
	/// newest entry.
	pub fn forward(&self) {
		let moved = {
			let mut index = self.inner.index.borrow_mut();
			if *index + 1 >= self.inner.entries.borrow().len() {
				false
			} else {
				*index += 1;
				true
			}
		};
		if moved {
			self.fire();
		}
	}

	/// Returns the number of entries on the stack.
	pub fn len(&self) -> usize {
		self.inner.entries.borrow().len()
	}

	/// Returns `true` if the stack holds no entries.
	///
	/// Never true in practice: construction seeds the initial entry.
	pub fn is_empty(&self) -> bool {
		self.inner.entries.borrow().is_empty()
	}

	/// Returns a snapshot of the entry stack, oldest first.
	pub fn entries(&self) -> Vec<String> {
		self.inner.entries.borrow().clone()
	}

	fn fire(&self) {
		let listener = self.inner.listener.borrow().clone();
		if let Some(listener) = listener {
			listener(&self.location());
		}
	}
}

impl HistoryDriver for MemoryHistory {
	fn location(&self) -> String {
		let index = *self.inner.index.borrow();
		self.inner.entries.borrow()[index].clone()
	}

	fn push(&self, state: &HistoryState) -> Result<(), NavigationError> {
		let mut entries = self.inner.entries.borrow_mut();
		let mut index = self.inner.index.borrow_mut();
		// Pushing discards any forward entries, as the host stack does.
		entries.truncate(*index + 1);
		entries.push(state.path().to_string());
		*index = entries.len() - 1;
		Ok(())
	}

	fn replace(&self, state: &HistoryState) -> Result<(), NavigationError> {
		let index = *self.inner.index.borrow();
		self.inner.entries.borrow_mut()[index] = state.path().to_string();
		Ok(())
	}

	fn set_listener(&self, listener: HistoryListener) {
		*self.inner.listener.borrow_mut() = Some(listener);
	}
}

impl fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryHistory")
			.field("entries", &self.inner.entries.borrow())
			.field("index", &self.inner.index.borrow())
			.finish()
	}
}

/// Browser History API driver.
#[cfg(target_arch = "wasm32")]
pub struct BrowserHistory {
	window: web_sys::Window,
	// Kept alive for the driver's lifetime; dropping it would detach the
	// popstate subscription.
	popstate: RefCell<Option<wasm_bindgen::prelude::Closure<dyn FnMut(web_sys::PopStateEvent)>>>,
}

#[cfg(target_arch = "wasm32")]
impl BrowserHistory {
	/// Creates a driver over the global window.
	pub fn new() -> Result<Self, NavigationError> {
		let window = web_sys::window()
			.ok_or_else(|| NavigationError::Host("no global window".to_string()))?;
		Ok(Self {
			window,
			popstate: RefCell::new(None),
		})
	}

	fn history(&self) -> Result<web_sys::History, NavigationError> {
		self.window
			.history()
			.map_err(|e| NavigationError::Host(format!("{e:?}")))
	}

	fn state_value(state: &HistoryState) -> wasm_bindgen::JsValue {
		match serde_json::to_string(state) {
			Ok(json) => wasm_bindgen::JsValue::from_str(&json),
			Err(_) => wasm_bindgen::JsValue::NULL,
		}
	}
}

#[cfg(target_arch = "wasm32")]
impl HistoryDriver for BrowserHistory {
	fn location(&self) -> String {
		self.window
			.location()
			.pathname()
			.unwrap_or_else(|_| "/".to_string())
	}

	fn push(&self, state: &HistoryState) -> Result<(), NavigationError> {
		self.history()?
			.push_state_with_url(&Self::state_value(state), "", Some(state.path()))
			.map_err(|e| NavigationError::Host(format!("{e:?}")))
	}

	fn replace(&self, state: &HistoryState) -> Result<(), NavigationError> {
		self.history()?
			.replace_state_with_url(&Self::state_value(state), "", Some(state.path()))
			.map_err(|e| NavigationError::Host(format!("{e:?}")))
	}

	fn set_listener(&self, listener: HistoryListener) {
		use wasm_bindgen::JsCast;
		use wasm_bindgen::prelude::Closure;

		let window = self.window.clone();
		let closure = Closure::wrap(Box::new(move |_event: web_sys::PopStateEvent| {
			let path = window
				.location()
				.pathname()
				.unwrap_or_else(|_| "/".to_string());
			listener(&path);
		}) as Box<dyn FnMut(web_sys::PopStateEvent)>);

		if self
			.window
			.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
			.is_ok()
		{
			*self.popstate.borrow_mut() = Some(closure);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_initial_entry_is_location() {
		let history = MemoryHistory::new("/");
		assert_eq!(history.location(), "/");
		assert_eq!(history.len(), 1);
	}

	#[test]
	fn test_push_appends_and_moves() {
		let history = MemoryHistory::new("/");
		history.push(&HistoryState::new("/fishpedia")).unwrap();

		assert_eq!(history.location(), "/fishpedia");
		assert_eq!(history.entries(), ["/", "/fishpedia"]);
	}

	#[test]
	fn test_duplicate_push_keeps_both_entries() {
		let history = MemoryHistory::new("/");
		history.push(&HistoryState::new("/produk")).unwrap();
		history.push(&HistoryState::new("/produk")).unwrap();

		assert_eq!(history.entries(), ["/", "/produk", "/produk"]);
	}

	#[test]
	fn test_replace_rewrites_current_entry() {
		let history = MemoryHistory::new("/");
		history.push(&HistoryState::new("/a")).unwrap();
		history.replace(&HistoryState::new("/b")).unwrap();

		assert_eq!(history.entries(), ["/", "/b"]);
		assert_eq!(history.location(), "/b");
	}

	#[test]
	fn test_back_fires_listener_with_restored_path() {
		let history = MemoryHistory::new("/");
		history.push(&HistoryState::new("/member")).unwrap();

		let seen = Rc::new(RefCell::new(Vec::new()));
		history.set_listener(Rc::new({
			let seen = Rc::clone(&seen);
			move |path: &str| seen.borrow_mut().push(path.to_string())
		}));

		history.back();
		assert_eq!(history.location(), "/");
		assert_eq!(*seen.borrow(), ["/"]);
	}

	#[test]
	fn test_back_at_oldest_entry_is_noop() {
		let history = MemoryHistory::new("/");
		let seen = Rc::new(RefCell::new(0));
		history.set_listener(Rc::new({
			let seen = Rc::clone(&seen);
			move |_: &str| *seen.borrow_mut() += 1
		}));

		history.back();
		assert_eq!(history.location(), "/");
		assert_eq!(*seen.borrow(), 0);
	}

	#[test]
	fn test_forward_after_back() {
		let history = MemoryHistory::new("/");
		history.push(&HistoryState::new("/admin")).unwrap();
		history.back();
		history.forward();

		assert_eq!(history.location(), "/admin");
	}

	#[test]
	fn test_push_discards_forward_entries() {
		let history = MemoryHistory::new("/");
		history.push(&HistoryState::new("/a")).unwrap();
		history.back();
		history.push(&HistoryState::new("/b")).unwrap();

		assert_eq!(history.entries(), ["/", "/b"]);
		history.forward(); // nothing ahead
		assert_eq!(history.location(), "/b");
	}

	#[test]
	fn test_history_state_round_trips_through_json() {
		let state = HistoryState::new("/member/device/42/dashboard");
		let json = serde_json::to_string(&state).unwrap();
		let back: HistoryState = serde_json::from_str(&json).unwrap();
		assert_eq!(back, state);
	}
}
