//! Reactive primitives backing the navigation state.
//!
//! The engine carries a single observable store, [`Signal`], with explicit
//! subscriptions. See the module docs in [`signal`] for the design rationale.

pub mod signal;

pub use signal::{Signal, Subscription};
