//! Scene transitions.
//!
//! A [`Stage`] owns one container element and swaps scenes into it:
//!
//! 1. fade the container out, optionally swiping it to the right at the same time,
//! 2. take the scene from the cache or build (and cache) it,
//! 3. wait for the new content's images,
//! 4. replace the container's children with the new content,
//! 5. fade back in.
//!
//! # Overlapping transitions
//!
//! Transitions on the same stage are expected to run one at a time.
//! Starting one while another is still running is logged, but not prevented:
//! Both then animate the same opacity and the last one to swap wins.

use crate::{
	fade::{self, Fade},
	images::{images_loaded, ImageScope},
	Animation, Error, Result, Scene, SceneBuilder, SceneCache, TransitionConfig,
};
use core::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, error, instrument, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

pub struct Stage<B> {
	document: Document,
	container: HtmlElement,
	scenes: RefCell<SceneCache<Element>>,
	builder: B,
	config: TransitionConfig,
	in_flight: Cell<usize>,
}

impl<B: SceneBuilder> Stage<B> {
	/// # Errors
	///
	/// Iff `container` isn't part of a document.
	pub fn new(container: HtmlElement, builder: B, config: TransitionConfig) -> Result<Self> {
		let document = container.owner_document().ok_or(Error::NoDocument)?;
		Ok(Self {
			document,
			container,
			scenes: RefCell::new(SceneCache::new()),
			builder,
			config,
			in_flight: Cell::new(0),
		})
	}

	/// Uses the first element in `document` that matches `selector` as container.
	///
	/// # Errors
	///
	/// Iff the selector is invalid or doesn't match an HTML element.
	pub fn select(document: &Document, selector: &str, builder: B, config: TransitionConfig) -> Result<Self> {
		let container = document
			.query_selector(selector)
			.map_err(Error::js("querySelector"))?
			.and_then(|element| element.dyn_into::<HtmlElement>().ok())
			.ok_or_else(|| Error::MissingContainer(selector.to_owned()))?;
		Self::new(container, builder, config)
	}

	#[must_use]
	pub fn container(&self) -> &HtmlElement {
		&self.container
	}

	#[must_use]
	pub fn builder(&self) -> &B {
		&self.builder
	}

	#[must_use]
	pub fn is_cached(&self, scene: Scene) -> bool {
		self.scenes.borrow().contains(scene)
	}

	/// The cached root element of `scene`, if it was shown before.
	#[must_use]
	pub fn cached(&self, scene: Scene) -> Option<Element> {
		self.scenes.borrow().get(scene).cloned()
	}

	#[must_use]
	pub fn is_transitioning(&self) -> bool {
		self.in_flight.get() > 0
	}

	/// Replaces the container's content with `scene`.
	///
	/// The scene is built through the [`SceneBuilder`] only if it isn't cached yet.
	///
	/// # Errors
	///
	/// Iff the scene couldn't be built or the DOM refused an operation.
	/// When building fails, the container stays at opacity 0 with its previous content.
	#[instrument(skip(self))]
	pub async fn transition(&self, swipe: bool, scene: Scene) -> Result<()> {
		let _in_flight = self.enter();
		self.fade_out(swipe).await?;
		let content = self.resolve(scene)?;
		self.swap_in(&content, ImageScope::Content(&content)).await
	}

	/// Shows `scene` for the first time after the page loaded.
	///
	/// Unlike [`transition`](`Stage::transition`), this starts from opacity 0 without fading out
	/// and also waits for every image that is already in the document.
	///
	/// # Errors
	///
	/// Iff the scene couldn't be built or the DOM refused an operation.
	#[instrument(skip(self))]
	pub async fn open(&self, scene: Scene) -> Result<()> {
		let _in_flight = self.enter();
		fade::set_opacity(&self.container.style(), 0.0);
		let content = self.resolve(scene)?;
		images_loaded(ImageScope::Document(&self.document)).await?;
		self.swap_in(&content, ImageScope::Content(&content)).await
	}

	/// Transitions to `content` that isn't associated with any scene, like an error message.
	///
	/// Nothing is cached.
	///
	/// # Errors
	///
	/// Iff the DOM refused an operation.
	#[instrument(skip(self, content))]
	pub async fn present(&self, swipe: bool, content: Element) -> Result<()> {
		let _in_flight = self.enter();
		self.fade_out(swipe).await?;
		self.swap_in(&content, ImageScope::Content(&content)).await
	}

	/// Runs [`transition`](`Stage::transition`) in the background. Failures are logged.
	pub fn launch(self: &Rc<Self>, swipe: bool, scene: Scene)
	where
		B: 'static,
	{
		let stage = Rc::clone(self);
		wasm_bindgen_futures::spawn_local(async move {
			if let Err(error) = stage.transition(swipe, scene).await {
				error!("Transition to {} failed: {}", scene, error);
			}
		});
	}

	fn enter(&self) -> InFlight<'_> {
		let running = self.in_flight.get();
		if running > 0 {
			warn!("Starting a transition while {} other(s) still run on the same container. Their effects will interleave.", running);
		}
		self.in_flight.set(running + 1);
		InFlight(&self.in_flight)
	}

	fn resolve(&self, scene: Scene) -> Result<Element> {
		let mut scenes = self.scenes.borrow_mut();
		let content = scenes.get_or_try_insert_with(scene, || self.builder.build(&self.document, scene))?;
		Ok(content.clone())
	}

	/// Resolves once opacity is exactly 0 and a concurrent swipe, if any, has pinned the container back.
	async fn fade_out(&self, swipe: bool) -> Result<()> {
		let mut swipe = if swipe { Some(Animation::swipe_right(&self.container, self.config.swipe)?) } else { None };
		Animation::fade(&self.container, Fade::Out, self.config.fade)?.wait().await;
		if let Some(swipe) = &mut swipe {
			swipe.wait().await;
		}
		Ok(())
	}

	async fn swap_in(&self, content: &Element, images: ImageScope<'_>) -> Result<()> {
		images_loaded(images).await?;
		self.replace_children(content)?;
		Animation::fade(&self.container, Fade::In, self.config.fade)?.wait().await;
		Ok(())
	}

	fn replace_children(&self, content: &Element) -> Result<()> {
		let container: &web_sys::Node = self.container.as_ref();
		while let Some(child) = container.first_child() {
			container.remove_child(&child).map_err(Error::js("removeChild"))?;
		}
		container.append_child(content).map_err(Error::js("appendChild"))?;
		debug!("Swapped in new content.");
		Ok(())
	}
}

struct InFlight<'a>(&'a Cell<usize>);
impl Drop for InFlight<'_> {
	fn drop(&mut self) {
		self.0.set(self.0.get() - 1);
	}
}
