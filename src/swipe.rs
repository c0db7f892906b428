//! Lateral swipe running alongside a fade-out.
//!
//! The swipe has its own timer. It watches the same element's opacity as the fade-out does
//! and stops as soon as that reaches 0, or after [`SwipeConfig::max_ms`], whichever is first.
//! Either way the element is pinned back to [`SwipeConfig::rest_px`].

use crate::{fade::opacity, timer::Interval, Animation, Result};
use core::ops::ControlFlow;
use futures_channel::oneshot;
use serde::Deserialize;
use tracing::{error, instrument, trace};
use web_sys::{CssStyleDeclaration, HtmlElement, Performance};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwipeConfig {
	/// Rightward movement per tick, in CSS pixels.
	pub step_px: f64,
	pub tick_ms: i32,
	/// Upper bound on the swipe's duration in real time, measured from its start.
	pub max_ms: u32,
	/// Horizontal offset the element returns to.
	pub rest_px: f64,
}

impl Default for SwipeConfig {
	fn default() -> Self {
		Self {
			step_px: 12.0,
			tick_ms: 10,
			max_ms: 300,
			rest_px: 0.0,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeStep {
	MoveTo(f64),
	Rest(f64),
}

/// Pure swipe state, advanced once per tick.
///
/// Time is passed in by the caller as milliseconds on any monotonic clock.
#[derive(Debug, Clone)]
pub struct SwipeProgress {
	config: SwipeConfig,
	started_ms: f64,
	offset_px: f64,
}

impl SwipeProgress {
	#[must_use]
	pub fn new(config: SwipeConfig, offset_px: f64, started_ms: f64) -> Self {
		Self {
			config,
			started_ms,
			offset_px,
		}
	}

	/// `opacity` is the swiped element's current opacity, shared with the concurrent fade-out.
	pub fn tick(&mut self, opacity: f64, now_ms: f64) -> SwipeStep {
		if opacity <= 0.0 || now_ms - self.started_ms >= f64::from(self.config.max_ms) {
			return SwipeStep::Rest(self.config.rest_px);
		}
		self.offset_px += self.config.step_px;
		SwipeStep::MoveTo(self.offset_px)
	}
}

/// Milliseconds from [***performance.now()***](https://developer.mozilla.org/en-US/docs/Web/API/Performance/now),
/// or from `Date.now()` where that isn't available.
fn clock() -> impl Fn() -> f64 {
	let performance = web_sys::window().and_then(|window| window.performance());
	move || performance.as_ref().map_or_else(js_sys::Date::now, Performance::now)
}

fn left(style: &CssStyleDeclaration) -> Option<f64> {
	let value = style.get_property_value("left").ok()?;
	value.trim().trim_end_matches("px").parse().ok()
}

fn set_left(style: &CssStyleDeclaration, px: f64) {
	if let Err(error) = style.set_property("left", &format!("{}px", px)) {
		error!("Failed to set left offset to {}px: {:?}", px, error)
	}
}

impl Animation {
	/// Starts swiping `element` to the right.
	///
	/// The element should be positioned (`relative`, for example) for `left` to have an effect.
	///
	/// # Errors
	///
	/// Iff the timer couldn't be started.
	#[instrument(skip(element))]
	pub fn swipe_right(element: &HtmlElement, config: SwipeConfig) -> Result<Self> {
		let style = element.style();
		let now = clock();
		let mut progress = SwipeProgress::new(config, left(&style).unwrap_or(config.rest_px), now());
		let (done, finished) = oneshot::channel();
		let mut done = Some(done);

		let interval = Interval::start(config.tick_ms, move || match progress.tick(opacity(&style), now()) {
			SwipeStep::MoveTo(px) => {
				set_left(&style, px);
				ControlFlow::Continue(())
			}
			SwipeStep::Rest(px) => {
				trace!("Swipe ended. Pinning to {}px.", px);
				set_left(&style, px);
				if let Some(done) = done.take() {
					done.send(()).ok();
				}
				ControlFlow::Break(())
			}
		})?;

		Ok(Self::new(interval, finished))
	}
}
