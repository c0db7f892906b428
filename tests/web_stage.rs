use core::cell::{Cell, RefCell};
use diptych::{
	assemble_element, description, fade::opacity, fade::FadeConfig, swipe::SwipeConfig, templates, ContentStore, Error, Result, Scene, Stage, Templates,
	TransitionConfig,
};
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, Element, Node};

wasm_bindgen_test_configure!(run_in_browser);

use web_setup_::{container, dispatch, document, init_logging, next_task, until, PIXEL};

fn fast() -> TransitionConfig {
	TransitionConfig {
		fade: FadeConfig { step: 0.5, tick_ms: 1 },
		swipe: SwipeConfig {
			step_px: 4.0,
			tick_ms: 1,
			max_ms: 20,
			rest_px: 0.0,
		},
	}
}

fn counting_builder(builds: Rc<Cell<usize>>) -> impl Fn(&Document, Scene) -> Result<Element> {
	move |document: &Document, scene: Scene| {
		builds.set(builds.get() + 1);
		assemble_element(document, &description!["section", {"data-scene" => scene.name()}, ["img", {"src" => PIXEL}], scene.name()])
	}
}

fn sole_child(stage: &Stage<impl diptych::SceneBuilder>) -> Node {
	let children = stage.container().child_nodes();
	assert_eq!(children.length(), 1);
	children.item(0).unwrap()
}

#[wasm_bindgen_test]
async fn scenes_are_built_once() {
	init_logging();
	let builds = Rc::new(Cell::new(0));
	let stage = Stage::new(container(), counting_builder(Rc::clone(&builds)), fast()).unwrap();

	stage.transition(false, Scene::About).await.unwrap();
	assert_eq!(builds.get(), 1);
	let about = stage.cached(Scene::About).unwrap();
	assert!(sole_child(&stage).is_same_node(Some(about.as_ref())));
	assert_eq!(opacity(&stage.container().style()), 1.0);

	stage.transition(true, Scene::Contact).await.unwrap();
	assert_eq!(builds.get(), 2);
	assert_eq!(sole_child(&stage).text_content().as_deref(), Some("contact"));

	stage.transition(false, Scene::About).await.unwrap();
	assert_eq!(builds.get(), 2);
	assert!(sole_child(&stage).is_same_node(Some(about.as_ref())));
	assert_eq!(opacity(&stage.container().style()), 1.0);
	assert_eq!(stage.container().style().get_property_value("left").unwrap(), "0px");
	assert!(!stage.is_transitioning());

	stage.container().remove();
}

#[wasm_bindgen_test]
async fn repeated_scene_is_swapped_in_again() {
	init_logging();
	let builds = Rc::new(Cell::new(0));
	let stage = Stage::new(container(), counting_builder(Rc::clone(&builds)), fast()).unwrap();

	stage.transition(false, Scene::Education).await.unwrap();
	stage.transition(false, Scene::Education).await.unwrap();

	assert_eq!(builds.get(), 1);
	let education: Node = stage.cached(Scene::Education).unwrap().into();
	assert!(sole_child(&stage).is_same_node(Some(&education)));
	stage.container().remove();
}

#[wasm_bindgen_test]
async fn open_starts_transparent_and_ends_opaque() {
	init_logging();
	let builds = Rc::new(Cell::new(0));
	let stage = Stage::new(container(), counting_builder(Rc::clone(&builds)), fast()).unwrap();

	stage.open(Scene::Home).await.unwrap();

	assert_eq!(builds.get(), 1);
	assert!(stage.is_cached(Scene::Home));
	assert_eq!(opacity(&stage.container().style()), 1.0);
	stage.container().remove();
}

#[wasm_bindgen_test]
async fn failed_build_keeps_previous_content_and_caches_nothing() {
	init_logging();
	let attempts = Rc::new(Cell::new(0));
	let stage = Stage::new(
		container(),
		{
			let attempts = Rc::clone(&attempts);
			move |_: &Document, scene: Scene| -> Result<Element> {
				attempts.set(attempts.get() + 1);
				Err(Error::MissingContent(scene.key().to_owned()))
			}
		},
		fast(),
	)
	.unwrap();
	let previous = assemble_element(&document(), &description!["p", "previous"]).unwrap();
	stage.container().append_child(&previous).unwrap();

	let result = stage.transition(false, Scene::Experience).await;
	assert!(matches!(result, Err(Error::MissingContent(key)) if key == "experience"));
	assert!(!stage.is_cached(Scene::Experience));
	assert!(sole_child(&stage).is_same_node(Some(previous.as_ref())));
	assert!(!stage.is_transitioning());

	assert!(stage.transition(false, Scene::Experience).await.is_err());
	assert_eq!(attempts.get(), 2);
	stage.container().remove();
}

#[wasm_bindgen_test]
async fn present_is_not_cached() {
	init_logging();
	let builds = Rc::new(Cell::new(0));
	let stage = Stage::new(container(), counting_builder(Rc::clone(&builds)), fast()).unwrap();

	let content = assemble_element(&document(), &templates::error_scene("Not Found")).unwrap();
	stage.present(true, content.clone()).await.unwrap();

	assert!(sole_child(&stage).is_same_node(Some(content.as_ref())));
	assert_eq!(builds.get(), 0);
	assert!(Scene::ALL.iter().all(|scene| !stage.is_cached(*scene)));
	assert_eq!(opacity(&stage.container().style()), 1.0);
	stage.container().remove();
}

#[wasm_bindgen_test]
async fn templates_render_loaded_content() {
	init_logging();
	let store = Rc::new(RefCell::new(ContentStore::new()));
	store.borrow_mut().merge(
		json!({
			"about": {
				"aside": { "header": "About", "paragraphs": ["Hi."] },
				"article": {
					"header": "Story",
					"essaySections": [{ "title": "Beginnings", "paragraphs": ["One."] }]
				}
			}
		})
		.as_object()
		.unwrap()
		.clone(),
	);
	let stage = Stage::new(container(), Templates::new(Rc::clone(&store)), fast()).unwrap();

	stage.transition(false, Scene::About).await.unwrap();
	let scene = stage.cached(Scene::About).unwrap();
	assert_eq!(scene.class_name(), "scene diptych");
	assert!(scene.text_content().unwrap().contains("Beginnings"));

	let missing = stage.transition(false, Scene::Contact).await;
	assert!(matches!(missing, Err(Error::MissingContent(_))));
	stage.container().remove();
}

#[wasm_bindgen_test]
fn missing_container_is_reported() {
	init_logging();
	let result = Stage::select(&document(), "#no-such-container", Templates::default(), fast());
	assert!(matches!(result, Err(Error::MissingContainer(selector)) if selector == "#no-such-container"));
}

#[wasm_bindgen_test]
async fn launched_transition_swaps_only_after_images_completed() {
	init_logging();
	let stage = Rc::new(
		Stage::new(
			container(),
			|document: &Document, scene: Scene| {
				// Detached lazy images don't load by themselves.
				assemble_element(document, &description!["section", ["img", {"loading" => "lazy", "src" => PIXEL}], scene.name()])
			},
			fast(),
		)
		.unwrap(),
	);
	let previous = assemble_element(&document(), &description!["p", "previous"]).unwrap();
	stage.container().append_child(&previous).unwrap();

	stage.launch(false, Scene::About);
	until(|| stage.is_cached(Scene::About)).await;
	let scene = stage.cached(Scene::About).unwrap();
	let image = scene.query_selector("img").unwrap().unwrap();

	for _ in 0..5 {
		next_task().await;
	}
	assert!(stage.is_transitioning());
	assert!(sole_child(&stage).is_same_node(Some(previous.as_ref())));
	assert_eq!(opacity(&stage.container().style()), 0.0);

	dispatch(&image, "load");
	until(|| !stage.is_transitioning()).await;
	assert!(sole_child(&stage).is_same_node(Some(scene.as_ref())));
	assert_eq!(opacity(&stage.container().style()), 1.0);
	stage.container().remove();
}
