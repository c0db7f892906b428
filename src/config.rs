use crate::{fade::FadeConfig, swipe::SwipeConfig};
use serde::Deserialize;

/// Site-wide settings.
///
/// Every field has a default, so a partial JSON object only overrides what it names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
	/// Selector of the element whose content is replaced by scenes.
	pub container: String,
	/// Directory (relative to the page) that holds `<scene>.json` files.
	pub content_dir: String,
	pub transition: TransitionConfig,
}

impl Default for SiteConfig {
	fn default() -> Self {
		Self {
			container: "#content".to_owned(),
			content_dir: "json".to_owned(),
			transition: TransitionConfig::default(),
		}
	}
}

impl SiteConfig {
	/// # Errors
	///
	/// Iff `json` isn't an object matching this structure.
	pub fn from_json(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str(json)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
	pub fade: FadeConfig,
	pub swipe: SwipeConfig,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_is_default() {
		assert_eq!(SiteConfig::from_json("{}").unwrap(), SiteConfig::default());
	}

	#[test]
	fn partial_override() {
		let config = SiteConfig::from_json(r#"{ "contentDir": "content", "transition": { "fade": { "tickMs": 5 } } }"#).unwrap();
		assert_eq!(config.container, "#content");
		assert_eq!(config.content_dir, "content");
		assert_eq!(config.transition.fade.tick_ms, 5);
		assert_eq!(config.transition.fade.step, FadeConfig::default().step);
		assert_eq!(config.transition.swipe, SwipeConfig::default());
	}
}
