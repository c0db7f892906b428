//! Scene-based portfolio pages for the browser.
//!
//! Content is described declaratively ([`Description`], [`description!`]) and materialized with [`assemble_element`].
//! A [`Stage`] swaps whole scenes in and out of one container element, with fades, an optional swipe,
//! image-load gating and a per-scene cache. [`Site`] ties this to JSON content files and page navigation.

#![doc(html_root_url = "https://docs.rs/diptych/0.0.1")]
#![warn(clippy::pedantic)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

mod animation;
mod assemble;
pub mod cache;
mod config;
pub mod content;
mod error;
pub mod fade;
pub mod fetch;
pub mod images;
pub mod load;
mod scene;
mod site;
mod stage;
pub mod swipe;
pub mod templates;
pub mod timer;

pub use animation::Animation;
pub use assemble::{assemble_element, Child, Description};
pub use cache::{ContentStore, SceneCache};
pub use config::{SiteConfig, TransitionConfig};
pub use error::{Error, Result};
pub use scene::{Handler, Scene, SceneBuilder, Templates, UnknownScene};
pub use site::{accept_payload, boot, Availability, Site};
pub use stage::Stage;
