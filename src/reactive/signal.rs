//! Signal - the engine's observable store.
//!
//! `Signal<T>` holds a value behind `Rc<RefCell<T>>` and notifies an explicit
//! per-instance subscriber list on every write. There is no global runtime and
//! no automatic dependency tracking: the navigation engine needs change
//! notification with a single writer, and an instance-scoped store can be
//! constructed fresh in every test without leaking state across tests.
//!
//! ## Example
//!
//! ```
//! use shoal::reactive::Signal;
//!
//! let path = Signal::new("/".to_string());
//! assert_eq!(path.get(), "/");
//!
//! path.set("/fishpedia".to_string());
//! assert_eq!(path.get(), "/fishpedia");
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// A shared observable value with an explicit subscriber list.
///
/// Clones share the same underlying value and subscriber list. `Signal` is
/// intentionally `!Send`: the engine is single-threaded and synchronous.
pub struct Signal<T> {
	value: Rc<RefCell<T>>,
	subscribers: Rc<RefCell<Vec<(u64, Subscriber<T>)>>>,
	next_id: Rc<RefCell<u64>>,
}

impl<T> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			value: Rc::clone(&self.value),
			subscribers: Rc::clone(&self.subscribers),
			next_id: Rc::clone(&self.next_id),
		}
	}
}

impl<T> Signal<T> {
	/// Creates a signal holding `value`.
	pub fn new(value: T) -> Self {
		Self {
			value: Rc::new(RefCell::new(value)),
			subscribers: Rc::new(RefCell::new(Vec::new())),
			next_id: Rc::new(RefCell::new(0)),
		}
	}

	/// Returns a clone of the current value.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Reads the current value through a borrow, without cloning.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.value.borrow())
	}

	/// Replaces the value and notifies all subscribers.
	pub fn set(&self, value: T)
	where
		T: Clone,
	{
		*self.value.borrow_mut() = value;
		self.notify();
	}

	/// Mutates the value in place and notifies subscribers once.
	pub fn update(&self, f: impl FnOnce(&mut T))
	where
		T: Clone,
	{
		f(&mut self.value.borrow_mut());
		self.notify();
	}

	/// Registers a subscriber called after every write.
	///
	/// The subscriber runs until the returned [`Subscription`] is dropped or
	/// explicitly unsubscribed.
	pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription<T> {
		let id = {
			let mut next = self.next_id.borrow_mut();
			*next += 1;
			*next
		};
		self.subscribers.borrow_mut().push((id, Rc::new(f)));
		Subscription {
			id,
			subscribers: Rc::downgrade(&self.subscribers),
		}
	}

	/// Returns the number of live subscribers.
	pub fn subscriber_count(&self) -> usize {
		self.subscribers.borrow().len()
	}

	fn notify(&self)
	where
		T: Clone,
	{
		// Snapshot the value and the list so a subscriber may read, write,
		// subscribe, or unsubscribe reentrantly without poisoning a borrow.
		// No borrow is held while a subscriber runs.
		let value = self.value.borrow().clone();
		let snapshot: Vec<Subscriber<T>> = self
			.subscribers
			.borrow()
			.iter()
			.map(|(_, f)| Rc::clone(f))
			.collect();
		for f in snapshot {
			f(&value);
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &self.value.borrow())
			.field("subscribers", &self.subscribers.borrow().len())
			.finish()
	}
}

/// Handle for a registered subscriber.
///
/// Dropping the subscription removes the subscriber from the signal.
pub struct Subscription<T> {
	id: u64,
	subscribers: Weak<RefCell<Vec<(u64, Subscriber<T>)>>>,
}

impl<T> Subscription<T> {
	/// Removes the subscriber immediately.
	pub fn unsubscribe(self) {
		// Removal happens in Drop.
	}
}

impl<T> Drop for Subscription<T> {
	fn drop(&mut self) {
		if let Some(subscribers) = self.subscribers.upgrade() {
			subscribers.borrow_mut().retain(|(id, _)| *id != self.id);
		}
	}
}

impl<T> fmt::Debug for Subscription<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription").field("id", &self.id).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_signal_creation() {
		let signal = Signal::new(42);
		assert_eq!(signal.get(), 42);
	}

	#[test]
	fn test_signal_set() {
		let signal = Signal::new(0);
		signal.set(100);
		assert_eq!(signal.get(), 100);
	}

	#[test]
	fn test_signal_update() {
		let signal = Signal::new(1);
		signal.update(|n| *n += 1);
		signal.update(|n| *n *= 10);
		assert_eq!(signal.get(), 20);
	}

	#[test]
	fn test_signal_clone_shares_value() {
		let a = Signal::new("x".to_string());
		let b = a.clone();
		a.set("y".to_string());
		assert_eq!(b.get(), "y");
	}

	#[test]
	fn test_subscriber_is_notified() {
		let signal = Signal::new(0);
		let seen = Rc::new(RefCell::new(Vec::new()));

		let sub = signal.subscribe({
			let seen = Rc::clone(&seen);
			move |v| seen.borrow_mut().push(*v)
		});

		signal.set(1);
		signal.set(2);
		drop(sub);
		signal.set(3);

		assert_eq!(*seen.borrow(), vec![1, 2]);
	}

	#[test]
	fn test_unsubscribe_removes_subscriber() {
		let signal = Signal::new(0);
		let sub = signal.subscribe(|_| {});
		assert_eq!(signal.subscriber_count(), 1);
		sub.unsubscribe();
		assert_eq!(signal.subscriber_count(), 0);
	}

	#[test]
	fn test_two_subscribers_both_fire() {
		let signal = Signal::new(0);
		let count = Rc::new(RefCell::new(0));

		let _a = signal.subscribe({
			let count = Rc::clone(&count);
			move |_| *count.borrow_mut() += 1
		});
		let _b = signal.subscribe({
			let count = Rc::clone(&count);
			move |_| *count.borrow_mut() += 1
		});

		signal.set(9);
		assert_eq!(*count.borrow(), 2);
	}

	#[test]
	fn test_subscriber_may_write_reentrantly() {
		let signal = Signal::new(0);
		let seen = Rc::new(RefCell::new(Vec::new()));

		let _sub = signal.subscribe({
			let signal = signal.clone();
			let seen = Rc::clone(&seen);
			move |v| {
				seen.borrow_mut().push(*v);
				// A subscriber writing back must not poison the borrow.
				if *v == 1 {
					signal.set(2);
				}
			}
		});

		signal.set(1);
		assert_eq!(*seen.borrow(), vec![1, 2]);
		assert_eq!(signal.get(), 2);
	}

	#[test]
	fn test_subscriber_may_read_reentrantly() {
		let signal = Signal::new(7);
		let seen = Rc::new(RefCell::new(0));

		let _sub = signal.subscribe({
			let signal = signal.clone();
			let seen = Rc::clone(&seen);
			move |_| *seen.borrow_mut() = signal.get()
		});

		signal.set(8);
		assert_eq!(*seen.borrow(), 8);
	}

	#[test]
	fn test_with_borrows_without_clone() {
		let signal = Signal::new(vec![1, 2, 3]);
		let len = signal.with(Vec::len);
		assert_eq!(len, 3);
	}

	#[test]
	fn test_subscription_outliving_signal_is_harmless() {
		let sub = {
			let signal = Signal::new(0);
			signal.subscribe(|_| {})
		};
		// The signal is gone; dropping the subscription must not panic.
		drop(sub);
	}
}
