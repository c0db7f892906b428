use crate::{
	assemble_element,
	cache::ContentStore,
	content::Envelope,
	fetch::{self, Method},
	templates, Error, Result, Scene, SiteConfig, Stage, Templates,
};
use core::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{error, info, instrument, warn};
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, JsValue};
use web_sys::{Document, Element};

/// What became of a scene's content after fetching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
	/// Loaded (now or earlier). The scene can be shown.
	Ready,
	/// The payload was malformed or reported `success: false`. Navigation should stop without changing the scene.
	Declined,
}

/// Merges a fetched payload into `store`.
pub fn accept_payload(store: &mut ContentStore, scene: Scene, body: &str) -> Availability {
	match Envelope::parse(body) {
		Ok(Envelope { success: true, data }) => {
			store.merge(data);
			Availability::Ready
		}
		Ok(Envelope { success: false, .. }) => {
			warn!("Content for {} reported `success: false`. Staying on the current scene.", scene);
			Availability::Declined
		}
		Err(error) => {
			warn!("Malformed content for {}: {}. Staying on the current scene.", scene, error);
			Availability::Declined
		}
	}
}

type ClickListener = Closure<dyn FnMut(web_sys::Event)>;

/// Everything that lives for the duration of the page: configuration, both caches and the stage.
pub struct Site {
	document: Document,
	config: SiteConfig,
	store: Rc<RefCell<ContentStore>>,
	stage: Rc<Stage<Templates>>,
	listeners: RefCell<Vec<(Element, ClickListener)>>,
}

impl Site {
	/// # Errors
	///
	/// Iff the configured container can't be found.
	pub fn new(document: Document, config: SiteConfig) -> Result<Rc<Self>> {
		let store = Rc::new(RefCell::new(ContentStore::new()));
		let stage = Stage::select(&document, &config.container, Templates::new(Rc::clone(&store)), config.transition)?;
		Ok(Rc::new(Self {
			document,
			config,
			store,
			stage: Rc::new(stage),
			listeners: RefCell::default(),
		}))
	}

	#[must_use]
	pub fn config(&self) -> &SiteConfig {
		&self.config
	}

	#[must_use]
	pub fn store(&self) -> &Rc<RefCell<ContentStore>> {
		&self.store
	}

	#[must_use]
	pub fn stage(&self) -> &Rc<Stage<Templates>> {
		&self.stage
	}

	/// Makes sure `scene`'s content is in the store, fetching `<content_dir>/<scene>.json` if it isn't.
	///
	/// # Errors
	///
	/// [`Error::Transport`] iff the content had to be fetched and that failed.
	#[instrument(skip(self))]
	pub async fn load_content(&self, scene: Scene) -> Result<Availability> {
		if self.stage.is_cached(scene) || self.store.borrow().contains(scene.key()) {
			return Ok(Availability::Ready);
		}
		let body = fetch::request(Method::Get, &scene.json_path(&self.config.content_dir), None).await?;
		Ok(accept_payload(&mut self.store.borrow_mut(), scene, &body))
	}

	/// Fetches content as needed and transitions to `scene`.
	///
	/// Transport failures and scenes that fail to build are shown as error scene instead.
	///
	/// # Errors
	///
	/// Iff even the error scene couldn't be shown.
	#[instrument(skip(self))]
	pub async fn navigate(&self, scene: Scene, swipe: bool) -> Result<()> {
		match self.load_content(scene).await {
			Ok(Availability::Ready) => (),
			Ok(Availability::Declined) => return Ok(()),
			Err(error) => return self.show_error(swipe, &error).await,
		}
		if let Err(error) = self.stage.transition(swipe, scene).await {
			error!("Couldn't show {}: {}", scene, error);
			return self.show_error(false, &error).await;
		}
		Ok(())
	}

	/// Initial page load: Shows `scene` once all images in the document are ready.
	///
	/// # Errors
	///
	/// Iff even the error scene couldn't be shown.
	#[instrument(skip(self))]
	pub async fn open(&self, scene: Scene) -> Result<()> {
		let shown = match self.load_content(scene).await {
			Ok(Availability::Ready) => self.stage.open(scene).await,
			Ok(Availability::Declined) => Err(Error::MissingContent(scene.key().to_owned())),
			Err(error) => Err(error),
		};
		match shown {
			Ok(()) => Ok(()),
			Err(error) => {
				error!("Couldn't open {}: {}", scene, error);
				self.show_error(false, &error).await
			}
		}
	}

	/// Replaces the content region with the error scene for `error`.
	///
	/// # Errors
	///
	/// Iff the error scene couldn't be built or swapped in.
	pub async fn show_error(&self, swipe: bool, error: &Error) -> Result<()> {
		let content = assemble_element(&self.document, &templates::error_scene(&error.to_string()))?;
		self.stage.present(swipe, content).await
	}

	/// Runs [`navigate`](`Site::navigate`) in the background.
	pub fn launch(self: &Rc<Self>, scene: Scene, swipe: bool) {
		let site = Rc::clone(self);
		wasm_bindgen_futures::spawn_local(async move {
			if let Err(error) = site.navigate(scene, swipe).await {
				error!("Navigation to {} failed: {}", scene, error);
			}
		});
	}

	/// Makes every element with a `data-scene="<scene>"` attribute navigate there when clicked.
	/// Elements that also have a `data-swipe` attribute request the lateral swipe.
	///
	/// Returns the number of bound elements.
	///
	/// # Errors
	///
	/// Iff the elements couldn't be queried or a listener couldn't be added.
	#[instrument(skip(self))]
	pub fn bind_navigation(self: &Rc<Self>) -> Result<usize> {
		let targets = self.document.query_selector_all("[data-scene]").map_err(Error::js("querySelectorAll"))?;
		let mut bound = 0;
		for element in (0..targets.length()).filter_map(|i| targets.item(i)).filter_map(|node| node.dyn_into::<Element>().ok()) {
			let name = element.get_attribute("data-scene").unwrap_or_default();
			let scene = match name.parse::<Scene>() {
				Ok(scene) => scene,
				Err(unknown) => {
					warn!("Not binding navigation: {}", unknown);
					continue;
				}
			};
			let swipe = element.has_attribute("data-swipe");

			let site: Weak<Self> = Rc::downgrade(self);
			let listener = Closure::wrap(Box::new(move |event: web_sys::Event| {
				event.prevent_default();
				if let Some(site) = site.upgrade() {
					site.launch(scene, swipe);
				}
			}) as Box<dyn FnMut(web_sys::Event)>);
			element
				.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
				.map_err(Error::js("addEventListener"))?;
			self.listeners.borrow_mut().push((element, listener));
			bound += 1;
		}
		info!("Bound navigation on {} element(s).", bound);
		Ok(bound)
	}
}

impl Drop for Site {
	fn drop(&mut self) {
		for (element, listener) in self.listeners.get_mut().drain(..) {
			if let Err(error) = element.remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref()) {
				error!("Failed to remove navigation listener: {:?}", error);
			}
		}
	}
}

thread_local! {
	static SITE: RefCell<Option<Rc<Site>>> = RefCell::new(None);
}

#[cfg(feature = "console-logging")]
fn init_logging() {
	if tracing_wasm::try_set_as_global_default().is_err() {
		warn!("A global tracing subscriber was already set.");
	}
}

#[cfg(not(feature = "console-logging"))]
fn init_logging() {}

/// Page entry point.
///
/// `config` is an optional JSON object overriding parts of [`SiteConfig`].
/// Binds navigation and opens the home scene in the background.
///
/// # Errors
///
/// Iff the configuration is malformed or the page lacks the content container.
#[wasm_bindgen]
pub fn boot(config: Option<String>) -> core::result::Result<(), JsValue> {
	init_logging();

	let config = match config {
		Some(json) => SiteConfig::from_json(&json).map_err(Error::from)?,
		None => SiteConfig::default(),
	};
	let document = web_sys::window().ok_or(Error::NoWindow)?.document().ok_or(Error::NoDocument)?;

	let site = Site::new(document, config)?;
	site.bind_navigation()?;
	SITE.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&site)));

	wasm_bindgen_futures::spawn_local(async move {
		if let Err(error) = site.open(Scene::Home).await {
			error!("Opening the site failed: {}", error);
		}
	});
	Ok(())
}
