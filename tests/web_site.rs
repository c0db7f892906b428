use diptych::{
	fade::FadeConfig, swipe::SwipeConfig, templates::ERROR_MESSAGE, Error, Scene, Site, SiteConfig, TransitionConfig,
};
use std::rc::Rc;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

use web_setup_::{container, document, init_logging, until};

fn site(id: &str) -> Rc<Site> {
	let container = container();
	container.set_id(id);
	Site::new(
		document(),
		SiteConfig {
			container: format!("#{}", id),
			content_dir: "/definitely-missing".to_owned(),
			transition: TransitionConfig {
				fade: FadeConfig { step: 0.5, tick_ms: 1 },
				swipe: SwipeConfig {
					step_px: 4.0,
					tick_ms: 1,
					max_ms: 10,
					rest_px: 0.0,
				},
			},
		},
	)
	.unwrap()
}

#[wasm_bindgen_test]
async fn error_scene_replaces_content() {
	init_logging();
	let site = site("site-error-scene");

	site.show_error(false, &Error::Transport("Not Found".to_owned())).await.unwrap();

	let container = site.stage().container();
	let scene = container.first_element_child().unwrap();
	assert_eq!(scene.class_name(), "scene error");
	let text = scene.text_content().unwrap();
	assert!(text.contains(ERROR_MESSAGE));
	assert!(text.contains("Not Found"));
	container.remove();
}

#[wasm_bindgen_test]
async fn failed_fetch_shows_error_scene() {
	init_logging();
	let site = site("site-failed-fetch");

	site.navigate(Scene::About, true).await.unwrap();

	let container = site.stage().container();
	assert_eq!(container.first_element_child().unwrap().class_name(), "scene error");
	assert!(!site.stage().is_cached(Scene::About));
	assert!(!site.store().borrow().contains("about"));
	container.remove();
}

#[wasm_bindgen_test]
async fn launched_navigation_completes_in_background() {
	init_logging();
	let site = site("site-launch");

	site.launch(Scene::Contact, false);
	let container = site.stage().container().clone();
	until(|| container.first_element_child().map_or(false, |scene| scene.class_name() == "scene error")).await;
	until(|| !site.stage().is_transitioning()).await;
	container.remove();
}

#[wasm_bindgen_test]
fn navigation_binds_known_scenes_only() {
	init_logging();
	let site = site("site-navigation");
	let document = document();
	let body = document.body().unwrap();

	let about = document.create_element("a").unwrap();
	about.set_attribute("data-scene", "about").unwrap();
	about.set_attribute("data-swipe", "").unwrap();
	let unknown = document.create_element("a").unwrap();
	unknown.set_attribute("data-scene", "projects").unwrap();
	body.append_child(&about).unwrap();
	body.append_child(&unknown).unwrap();

	assert_eq!(site.bind_navigation().unwrap(), 1);

	about.remove();
	unknown.remove();
	site.stage().container().remove();
}

#[wasm_bindgen_test]
fn missing_container_fails_construction() {
	init_logging();
	let config = SiteConfig {
		container: "#nowhere".to_owned(),
		..SiteConfig::default()
	};
	assert!(matches!(Site::new(document(), config), Err(Error::MissingContainer(_))));
}
