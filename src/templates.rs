//! Scene templates.
//!
//! These only describe markup. They're turned into DOM by [`assemble_element`](`crate::assemble_element`).

use crate::{
	content::{Article, ArticleBody, Aside, Entry, EntryBody, EssaySection, HomeContent, SceneContent},
	description, Description,
};

/// Shown in place of a scene whose content couldn't be loaded.
pub const ERROR_MESSAGE: &str = "Sorry, this page couldn't be loaded.";

fn panel_class(base: &str, table_display: bool) -> String {
	if table_display {
		format!("{} table", base)
	} else {
		base.to_owned()
	}
}

fn paragraphs(paragraphs: &[String]) -> impl '_ + Iterator<Item = Description> {
	paragraphs.iter().map(|paragraph| description!["p", paragraph])
}

#[must_use]
pub fn home(content: &HomeContent) -> Description {
	description![
		"section",
		{"class" => "scene home"},
		..content.portrait.iter().map(|portrait| description!("img", {"class" => "portrait", "src" => &portrait.src, "alt" => &portrait.alt})),
		["h1", &content.header],
		..content.subheader.iter().map(|subheader| description!["h2", subheader]),
		["div", {"class" => "intro"}, ..paragraphs(&content.paragraphs)],
	]
}

/// Two-panel layout used by every scene except [`home`].
#[must_use]
pub fn diptych(content: &SceneContent) -> Description {
	description!["div", {"class" => "scene diptych"}, aside(&content.aside), article(&content.article)]
}

#[must_use]
pub fn aside(aside: &Aside) -> Description {
	description![
		"aside",
		{"class" => panel_class("panel summary", aside.table_display)},
		["h2", &aside.header],
		..aside.subheader.iter().map(|subheader| description!["h3", subheader]),
		..paragraphs(&aside.paragraphs),
	]
}

#[must_use]
pub fn article(article: &Article) -> Description {
	let mut description = description![
		"article",
		{"class" => panel_class("panel detail", article.table_display)},
		["h2", &article.header],
	];
	match &article.body {
		ArticleBody::EssaySections(sections) => description.extend_children(sections.iter().map(essay_section)),
		ArticleBody::Entries(entries) => description.extend_children(entries.iter().map(entry)),
	}
	description
}

#[must_use]
pub fn essay_section(section: &EssaySection) -> Description {
	description!["section", {"class" => "essay"}, ["h3", &section.title], ..paragraphs(&section.paragraphs)]
}

#[must_use]
pub fn entry(entry: &Entry) -> Description {
	let body = match &entry.body {
		EntryBody::Summary(summary) => description!("p", {"class" => "summary"}, summary),
		EntryBody::Listing(items) => description!["ul", {"class" => "listing"}, ..items.iter().map(|item| description!["li", item])],
	};
	description![
		"div",
		{"class" => "entry"},
		[
			"div",
			{"class" => "entry-heading"},
			["h3", &entry.header],
			..entry.subheader.iter().map(|subheader| description!["h4", subheader]),
			..entry.date.iter().map(|date| description!("span", {"class" => "date"}, date)),
		],
		body,
	]
}

/// Fixed message plus the raw error text.
#[must_use]
pub fn error_scene(error: &str) -> Description {
	description![
		"section",
		{"class" => "scene error"},
		["h2", ERROR_MESSAGE],
		["pre", {"class" => "error-detail"}, error],
	]
}
