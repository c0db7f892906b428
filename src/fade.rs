//! Opacity fades.
//!
//! Fading in and out is one routine, parameterized by [`Fade`]:
//! Each direction supplies its comparison, its arithmetic and its bound, everything else is shared.

use crate::{timer::Interval, Animation, Result};
use core::ops::ControlFlow;
use futures_channel::oneshot;
use serde::Deserialize;
use tracing::{error, instrument};
use web_sys::{CssStyleDeclaration, HtmlElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
	/// Towards opacity 1.
	In,
	/// Towards opacity 0.
	Out,
}

/// Outcome of a single fade tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeStep {
	Continue(f64),
	/// The bound was reached. The value is exactly the bound.
	Done(f64),
}

impl Fade {
	#[must_use]
	pub fn bound(self) -> f64 {
		match self {
			Fade::In => 1.0,
			Fade::Out => 0.0,
		}
	}

	fn short_of_bound(self, opacity: f64) -> bool {
		match self {
			Fade::In => opacity < 1.0,
			Fade::Out => opacity > 0.0,
		}
	}

	fn apply(self, opacity: f64, step: f64) -> f64 {
		match self {
			Fade::In => opacity + step,
			Fade::Out => opacity - step,
		}
	}

	/// Advances `opacity` by one `step` in this direction.
	#[must_use]
	pub fn advance(self, opacity: f64, step: f64) -> FadeStep {
		if !self.short_of_bound(opacity) {
			return FadeStep::Done(self.bound());
		}
		let next = self.apply(opacity, step);
		if self.short_of_bound(next) {
			FadeStep::Continue(next)
		} else {
			FadeStep::Done(self.bound())
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FadeConfig {
	/// Opacity change per tick.
	pub step: f64,
	pub tick_ms: i32,
}

impl Default for FadeConfig {
	fn default() -> Self {
		Self { step: 0.1, tick_ms: 25 }
	}
}

/// Reads the inline opacity.
///
/// Missing or unparsable values count as fully opaque, which is what the browser renders for them.
#[must_use]
pub fn opacity(style: &CssStyleDeclaration) -> f64 {
	style.get_property_value("opacity").ok().and_then(|value| value.trim().parse().ok()).unwrap_or(1.0)
}

pub fn set_opacity(style: &CssStyleDeclaration, opacity: f64) {
	if let Err(error) = style.set_property("opacity", &opacity.to_string()) {
		error!("Failed to set opacity to {}: {:?}", opacity, error)
	}
}

impl Animation {
	/// Starts fading `element` from its current opacity in `direction`.
	///
	/// The animation ends with opacity set to exactly [`Fade::bound`] and its timer cleared.
	///
	/// # Errors
	///
	/// Iff the timer couldn't be started.
	#[instrument(skip(element))]
	pub fn fade(element: &HtmlElement, direction: Fade, config: FadeConfig) -> Result<Self> {
		let style = element.style();
		let (done, finished) = oneshot::channel();
		let mut done = Some(done);

		let interval = Interval::start(config.tick_ms, move || match direction.advance(opacity(&style), config.step) {
			FadeStep::Continue(next) => {
				set_opacity(&style, next);
				ControlFlow::Continue(())
			}
			FadeStep::Done(bound) => {
				set_opacity(&style, bound);
				if let Some(done) = done.take() {
					done.send(()).ok();
				}
				ControlFlow::Break(())
			}
		})?;

		Ok(Self::new(interval, finished))
	}
}
