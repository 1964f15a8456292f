//! Browser-backed tests for the History API driver and DOM event capture.
//! Run with `wasm-pack test --chrome --headless`.

#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use wasm_bindgen_test::wasm_bindgen_test;

use shoal::router::{
	Activation, BrowserHistory, HistoryDriver, HistoryState, Link, NavigationState,
};

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_browser_history_push_updates_location() {
	let history = BrowserHistory::new().unwrap();
	history.push(&HistoryState::new("/fishpedia")).unwrap();
	assert_eq!(history.location(), "/fishpedia");
}

#[wasm_bindgen_test]
fn test_browser_history_replace_updates_location() {
	let history = BrowserHistory::new().unwrap();
	history.push(&HistoryState::new("/login")).unwrap();
	history.replace(&HistoryState::new("/member")).unwrap();
	assert_eq!(history.location(), "/member");
}

#[wasm_bindgen_test]
fn test_plain_click_is_captured_as_primary() {
	let event = web_sys::MouseEvent::new("click").unwrap();
	let activation = Activation::from_mouse_event(&event);
	assert!(!activation.wants_native());
}

#[wasm_bindgen_test]
fn test_ctrl_click_falls_back_to_native() {
	let init = web_sys::MouseEventInit::new();
	init.set_ctrl_key(true);
	let event = web_sys::MouseEvent::new_with_mouse_event_init_dict("click", &init).unwrap();

	let activation = Activation::from_mouse_event(&event);
	assert!(activation.wants_native());
}

#[wasm_bindgen_test]
fn test_link_click_drives_browser_history() {
	let state = NavigationState::new(Rc::new(BrowserHistory::new().unwrap()));
	let link = Link::new("/produk", "Products");
	let event = web_sys::MouseEvent::new("click").unwrap();

	let handled = link.on_click(&state.navigator(), &event).unwrap();

	assert!(handled);
	assert_eq!(state.path(), "/produk");
}
