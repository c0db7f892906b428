//! Schema of the JSON content files.
//!
//! Every file is an [`Envelope`]. Its `data` maps scene keys to [`SceneContent`] (or [`HomeContent`] for `home`).

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
	pub success: bool,
	#[serde(default)]
	pub data: Map<String, Value>,
}

impl Envelope {
	/// # Errors
	///
	/// Iff `body` isn't an envelope-shaped JSON object.
	pub fn parse(body: &str) -> serde_json::Result<Self> {
		serde_json::from_str(body)
	}
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContent {
	pub header: String,
	#[serde(default)]
	pub subheader: Option<String>,
	#[serde(default)]
	pub portrait: Option<Image>,
	#[serde(default)]
	pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Image {
	pub src: String,
	#[serde(default)]
	pub alt: String,
}

/// A diptych: summary on the left, detail on the right.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SceneContent {
	pub aside: Aside,
	pub article: Article,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aside {
	pub header: String,
	#[serde(default)]
	pub subheader: Option<String>,
	#[serde(default)]
	pub table_display: bool,
	#[serde(default)]
	pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
	pub header: String,
	#[serde(default)]
	pub table_display: bool,
	#[serde(flatten)]
	pub body: ArticleBody,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArticleBody {
	EssaySections(Vec<EssaySection>),
	Entries(Vec<Entry>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EssaySection {
	pub title: String,
	#[serde(default)]
	pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Entry {
	pub header: String,
	#[serde(default)]
	pub subheader: Option<String>,
	#[serde(default)]
	pub date: Option<String>,
	#[serde(flatten)]
	pub body: EntryBody,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryBody {
	Summary(String),
	Listing(Vec<String>),
}
