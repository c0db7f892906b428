//! Image-load gate.
//!
//! New scene content is only attached once all of its images are ready.
//! This isn't polled: Each pending image reports back through its `load` or `error` event,
//! and the gate opens on the report of the last image that hadn't reported yet.

use crate::{Error, Result};
use core::cell::RefCell;
use futures_channel::oneshot;
use std::rc::Rc;
use tracing::{debug, error, instrument, trace};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{AddEventListenerOptions, Document, Element, EventTarget, HtmlImageElement};

/// Where to look for images.
#[derive(Debug, Clone, Copy)]
pub enum ImageScope<'a> {
	/// Images inside (and including) a content root, attached or not.
	Content(&'a Element),
	/// Every image currently in the document. Used on initial page load.
	Document(&'a Document),
}

impl ImageScope<'_> {
	/// Collects all images in scope that haven't completed yet.
	///
	/// # Errors
	///
	/// Iff the selector query fails.
	pub fn pending_images(self) -> Result<Vec<HtmlImageElement>> {
		let (root, nodes) = match self {
			ImageScope::Content(element) => (
				element.dyn_ref::<HtmlImageElement>().cloned(),
				element.query_selector_all("img").map_err(Error::js("querySelectorAll"))?,
			),
			ImageScope::Document(document) => (None, document.query_selector_all("img").map_err(Error::js("querySelectorAll"))?),
		};

		Ok(root
			.into_iter()
			.chain((0..nodes.length()).filter_map(|i| nodes.item(i)).filter_map(|node| node.dyn_into::<HtmlImageElement>().ok()))
			.filter(|image| !image.complete())
			.collect())
	}
}

/// Outstanding completions, one per item.
///
/// Repeated or unknown completions are ignored, so each item counts exactly once.
#[derive(Debug)]
pub struct Pending<T> {
	remaining: Vec<T>,
}

impl<T: PartialEq> Pending<T> {
	#[must_use]
	pub fn new(items: Vec<T>) -> Self {
		Self { remaining: items }
	}

	#[must_use]
	pub fn remaining(&self) -> usize {
		self.remaining.len()
	}

	/// Records `item` as complete. Returns `true` for the completion that leaves nothing pending.
	pub fn complete(&mut self, item: &T) -> bool {
		match self.remaining.iter().position(|pending| pending == item) {
			Some(index) => {
				self.remaining.swap_remove(index);
				self.remaining.is_empty()
			}
			None => false,
		}
	}
}

const COMPLETION_EVENTS: [&str; 2] = ["load", "error"];

type CompletionListener = Closure<dyn FnMut(web_sys::Event)>;

/// Resolves once every image in `scope` that was pending at the time of the call has loaded or failed to.
///
/// If there are none (for example because a cached scene was shown before), this resolves immediately.
///
/// # Errors
///
/// Iff the images couldn't be queried or a listener couldn't be attached.
#[instrument(skip(scope))]
pub async fn images_loaded(scope: ImageScope<'_>) -> Result<()> {
	let pending = scope.pending_images()?;
	if pending.is_empty() {
		trace!("No pending images.");
		return Ok(());
	}
	debug!("Waiting for {} image(s).", pending.len());
	completions(&pending.into_iter().map(EventTarget::from).collect::<Vec<_>>()).await
}

/// Resolves once each of `targets` has dispatched `load` or `error` at least once.
///
/// Completion is tracked per target: Further events from a target that already completed don't count.
///
/// # Errors
///
/// Iff a listener couldn't be attached. Listeners attached up to that point are removed again.
pub async fn completions(targets: &[EventTarget]) -> Result<()> {
	if targets.is_empty() {
		return Ok(());
	}

	let (done, all_complete) = oneshot::channel::<()>();
	let state = Rc::new(RefCell::new((Pending::new(targets.to_vec()), Some(done))));

	let listener: CompletionListener = Closure::wrap(Box::new({
		let state = Rc::clone(&state);
		move |event: web_sys::Event| {
			let target = match event.current_target() {
				Some(target) => target,
				None => return,
			};
			let mut state = state.borrow_mut();
			let (pending, done) = &mut *state;
			if pending.complete(&target) {
				if let Some(done) = done.take() {
					done.send(()).ok();
				}
			}
			trace!("Completion by {}: {} remaining.", event.type_(), pending.remaining());
		}
	}) as Box<dyn FnMut(web_sys::Event)>);

	let options = AddEventListenerOptions::new();
	options.set_once(true);
	let mut attached = Vec::with_capacity(targets.len() * COMPLETION_EVENTS.len());
	for target in targets {
		for event in COMPLETION_EVENTS {
			if let Err(error) =
				target.add_event_listener_with_callback_and_add_event_listener_options(event, listener.as_ref().unchecked_ref(), &options)
			{
				detach(&attached, &listener);
				return Err(Error::js("addEventListener")(error));
			}
			attached.push((target, event));
		}
	}

	all_complete.await.ok();
	detach(&attached, &listener);
	Ok(())
}

/// Removes `listener` everywhere it was attached, so that it can be dropped.
fn detach(attached: &[(&EventTarget, &str)], listener: &CompletionListener) {
	for (target, event) in attached {
		if let Err(error) = target.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref()) {
			error!("Failed to remove {} listener: {:?}", event, error);
		}
	}
}
