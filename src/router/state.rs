//! Navigation state container.
//!
//! [`NavigationState`] is the single source of truth for "where we are". It
//! owns the current path as a [`Signal`], is its only writer, and is the sole
//! bridge to the host history mechanism: `navigate` pushes an entry and then
//! updates the signal synchronously, and a driver subscription held for the
//! container's lifetime mirrors host-initiated restores (back/forward)
//! without pushing.
//!
//! The container is an explicit, owned value: construct one per application
//! (or per test) with whatever [`HistoryDriver`] fits; no process-global
//! state is involved.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use shoal::router::{MemoryHistory, NavigationState};
//!
//! let history = MemoryHistory::new("/");
//! let state = NavigationState::new(Rc::new(history.clone()));
//!
//! state.navigate("/produk").unwrap();
//! assert_eq!(state.path(), "/produk");
//!
//! history.back();
//! assert_eq!(state.path(), "/");
//! ```

use std::rc::{Rc, Weak};

use crate::debug_log;
use crate::reactive::Signal;

use super::history::{HistoryDriver, HistoryState, NavigationError};

/// Owner of the current path, synchronized with the host history stack.
pub struct NavigationState {
	driver: Rc<dyn HistoryDriver>,
	current: Signal<String>,
}

impl NavigationState {
	/// Creates a container over `driver`.
	///
	/// The current path is initialized from the driver's location, and the
	/// driver's change listener is installed so back/forward restores update
	/// the path without pushing a new entry.
	pub fn new(driver: Rc<dyn HistoryDriver>) -> Self {
		let current = Signal::new(driver.location());
		driver.set_listener(Rc::new({
			let current = current.clone();
			move |path: &str| {
				debug_log!("history restored {path}");
				current.set(path.to_string());
			}
		}));
		Self { driver, current }
	}

	/// Returns the current path signal.
	///
	/// Readers subscribe here; the container remains the only writer.
	pub fn current_path(&self) -> &Signal<String> {
		&self.current
	}

	/// Returns a clone of the current path.
	pub fn path(&self) -> String {
		self.current.get()
	}

	/// Navigates to `path`: pushes a history entry, then updates the current
	/// path synchronously.
	///
	/// Navigating to the path already current still pushes a new entry; the
	/// engine does not deduplicate.
	pub fn navigate(&self, path: &str) -> Result<(), NavigationError> {
		self.driver.push(&HistoryState::new(path))?;
		debug_log!("navigate -> {path}");
		self.current.set(path.to_string());
		Ok(())
	}

	/// Navigates to `path` replacing the current history entry.
	pub fn replace(&self, path: &str) -> Result<(), NavigationError> {
		self.driver.replace(&HistoryState::new(path))?;
		debug_log!("replace -> {path}");
		self.current.set(path.to_string());
		Ok(())
	}

	/// Returns a cheap clonable handle for links and redirects.
	pub fn navigator(&self) -> Navigator {
		Navigator {
			driver: Rc::downgrade(&self.driver),
			current: self.current.clone(),
		}
	}
}

impl std::fmt::Debug for NavigationState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NavigationState")
			.field("current", &self.current.get())
			.finish()
	}
}

/// A weak handle on a [`NavigationState`].
///
/// Held by links and redirect directives. If the container is gone by the
/// time the handle is used (a trigger unmounted between render and
/// activation), every operation is a no-op rather than a panic.
#[derive(Clone)]
pub struct Navigator {
	driver: Weak<dyn HistoryDriver>,
	current: Signal<String>,
}

impl Navigator {
	/// Requests navigation to `path`. No-op if the container is gone.
	pub fn navigate(&self, path: &str) -> Result<(), NavigationError> {
		let Some(driver) = self.driver.upgrade() else {
			return Ok(());
		};
		driver.push(&HistoryState::new(path))?;
		self.current.set(path.to_string());
		Ok(())
	}

	/// Requests replace-navigation to `path`. No-op if the container is gone.
	pub fn replace(&self, path: &str) -> Result<(), NavigationError> {
		let Some(driver) = self.driver.upgrade() else {
			return Ok(());
		};
		driver.replace(&HistoryState::new(path))?;
		self.current.set(path.to_string());
		Ok(())
	}

	/// Returns the current path.
	pub fn path(&self) -> String {
		self.current.get()
	}
}

impl std::fmt::Debug for Navigator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Navigator")
			.field("attached", &(self.driver.upgrade().is_some()))
			.finish()
	}
}
