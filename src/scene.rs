use crate::{
	assemble_element,
	cache::ContentStore,
	content::{HomeContent, SceneContent},
	templates, Description, Result,
};
use core::{cell::RefCell, fmt, str::FromStr};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::instrument;

/// A named, cacheable unit of content shown in the main content region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
	Home,
	About,
	Experience,
	Education,
	Contact,
}

/// Builds a scene's description from the loaded content.
pub type Handler = fn(&ContentStore, Scene) -> Result<Description>;

const HANDLERS: [(Scene, Handler); 5] = [
	(Scene::Home, home),
	(Scene::About, diptych),
	(Scene::Experience, diptych),
	(Scene::Education, diptych),
	(Scene::Contact, diptych),
];

fn home(store: &ContentStore, scene: Scene) -> Result<Description> {
	Ok(templates::home(&store.get::<HomeContent>(scene.key())?))
}

fn diptych(store: &ContentStore, scene: Scene) -> Result<Description> {
	Ok(templates::diptych(&store.get::<SceneContent>(scene.key())?))
}

impl Scene {
	pub const ALL: [Scene; 5] = [Scene::Home, Scene::About, Scene::Experience, Scene::Education, Scene::Contact];

	/// Cache key, content key and file stem in one.
	#[must_use]
	pub fn name(self) -> &'static str {
		match self {
			Scene::Home => "home",
			Scene::About => "about",
			Scene::Experience => "experience",
			Scene::Education => "education",
			Scene::Contact => "contact",
		}
	}

	/// Top-level key of this scene's content in a payload's `data`.
	#[must_use]
	pub fn key(self) -> &'static str {
		self.name()
	}

	#[must_use]
	pub fn json_path(self, content_dir: &str) -> String {
		format!("{}/{}.json", content_dir.trim_end_matches('/'), self.name())
	}

	#[must_use]
	pub fn handler(self) -> Handler {
		let (scene, handler) = HANDLERS[self as usize];
		debug_assert_eq!(scene, self, "`HANDLERS` is out of order");
		handler
	}
}

impl fmt::Display for Scene {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScene(pub String);

impl fmt::Display for UnknownScene {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown scene {:?}", self.0)
	}
}

impl std::error::Error for UnknownScene {}

impl FromStr for Scene {
	type Err = UnknownScene;

	fn from_str(name: &str) -> core::result::Result<Self, Self::Err> {
		Scene::ALL.iter().copied().find(|scene| scene.name() == name).ok_or_else(|| UnknownScene(name.to_owned()))
	}
}

/// Produces the root element for a scene that isn't cached yet.
pub trait SceneBuilder {
	/// # Errors
	///
	/// Iff the scene's content is missing or malformed, or the DOM refuses to build it.
	fn build(&self, document: &web_sys::Document, scene: Scene) -> Result<web_sys::Element>;
}

impl<F> SceneBuilder for F
where
	F: Fn(&web_sys::Document, Scene) -> Result<web_sys::Element>,
{
	fn build(&self, document: &web_sys::Document, scene: Scene) -> Result<web_sys::Element> {
		self(document, scene)
	}
}

/// The [`SceneBuilder`] used by [`Site`](`crate::Site`): Looks up the scene's [`Handler`] and assembles its description.
#[derive(Debug, Clone, Default)]
pub struct Templates {
	store: Rc<RefCell<ContentStore>>,
}

impl Templates {
	#[must_use]
	pub fn new(store: Rc<RefCell<ContentStore>>) -> Self {
		Self { store }
	}

	#[must_use]
	pub fn store(&self) -> &Rc<RefCell<ContentStore>> {
		&self.store
	}
}

impl SceneBuilder for Templates {
	#[instrument(skip(self, document))]
	fn build(&self, document: &web_sys::Document, scene: Scene) -> Result<web_sys::Element> {
		let description = (scene.handler())(&self.store.borrow(), scene)?;
		assemble_element(document, &description)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Error;
	use serde_json::json;

	#[test]
	fn names_round_trip() {
		for scene in Scene::ALL {
			assert_eq!(scene.name().parse::<Scene>(), Ok(scene));
		}
		assert_eq!("projects".parse::<Scene>(), Err(UnknownScene("projects".to_owned())));
	}

	#[test]
	fn handler_table_covers_every_scene() {
		for (i, scene) in Scene::ALL.into_iter().enumerate() {
			assert_eq!(HANDLERS[i].0, scene);
			let _ = scene.handler();
		}
	}

	#[test]
	fn json_paths() {
		assert_eq!(Scene::About.json_path("json"), "json/about.json");
		assert_eq!(Scene::Contact.json_path("content/"), "content/contact.json");
	}

	#[test]
	fn serde_names_match() {
		assert_eq!(serde_json::to_value(Scene::Education).unwrap(), json!("education"));
		assert_eq!(serde_json::from_value::<Scene>(json!("experience")).unwrap(), Scene::Experience);
	}

	#[test]
	fn handlers_read_their_own_key() {
		let mut store = ContentStore::new();
		store.merge(
			json!({
				"home": { "header": "Jane Doe" },
				"about": {
					"aside": { "header": "About" },
					"article": { "header": "Story", "essaySections": [] }
				}
			})
			.as_object()
			.unwrap()
			.clone(),
		);

		assert_eq!(Scene::Home.handler()(&store, Scene::Home).unwrap().attribute("class"), Some("scene home"));
		assert_eq!(Scene::About.handler()(&store, Scene::About).unwrap().attribute("class"), Some("scene diptych"));
		assert!(matches!(Scene::Contact.handler()(&store, Scene::Contact), Err(Error::MissingContent(key)) if key == "contact"));
	}
}
