use crate::{Error, Result};
use core::{cell::Cell, ops::ControlFlow};
use std::rc::Rc;
use tracing::{instrument, trace};
use wasm_bindgen::{closure::Closure, JsCast};

/// An owned [***setInterval***](https://developer.mozilla.org/en-US/docs/Web/API/setInterval) registration.
///
/// The tick callback stops the interval by returning [`ControlFlow::Break`].
/// Dropping the [`Interval`] clears it too, so the [`Closure`] never outlives its registration.
#[derive(Debug)]
pub struct Interval {
	window: web_sys::Window,
	handle: Rc<Cell<Option<i32>>>,
	_tick: Closure<dyn FnMut()>,
}

impl Interval {
	/// # Errors
	///
	/// Iff there is no global `window` or the interval couldn't be registered.
	#[instrument(skip(tick))]
	pub fn start(timeout_ms: i32, mut tick: impl 'static + FnMut() -> ControlFlow<()>) -> Result<Self> {
		let window = web_sys::window().ok_or(Error::NoWindow)?;
		let handle = Rc::new(Cell::new(None));

		let tick = Closure::wrap(Box::new({
			let window = window.clone();
			let handle = Rc::clone(&handle);
			move || {
				if tick().is_break() {
					if let Some(id) = handle.take() {
						window.clear_interval_with_handle(id);
						trace!("Interval {} finished.", id);
					}
				}
			}
		}) as Box<dyn FnMut()>);

		let id = window
			.set_interval_with_callback_and_timeout_and_arguments_0(tick.as_ref().unchecked_ref(), timeout_ms)
			.map_err(Error::js("setInterval"))?;
		handle.set(Some(id));
		trace!("Interval {} started.", id);

		Ok(Self { window, handle, _tick: tick })
	}

	#[must_use]
	pub fn is_running(&self) -> bool {
		self.handle.get().is_some()
	}
}

impl Drop for Interval {
	fn drop(&mut self) {
		if let Some(id) = self.handle.take() {
			self.window.clear_interval_with_handle(id);
			trace!("Interval {} cleared early.", id);
		}
	}
}
