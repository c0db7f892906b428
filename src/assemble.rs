//! Declarative DOM assembly.
//!
//! A [`Description`] is a tag name, an ordered attribute map and a list of [`Child`]ren.
//! [`assemble_element`] materializes it into a detached [`web_sys::Element`] without touching anything but its arguments.

use crate::{Error, Result};
use tracing::{instrument, trace_span};
use wasm_bindgen::JsCast;

/// Builds a [`Description`] from the flat literal form.
///
/// ```
/// use diptych::{description, Child};
///
/// let description = description!("div", {"id" => "x"}, "hello", ["span", {"class" => "aside"}, "nested"]);
/// assert_eq!(description.name(), "div");
/// assert_eq!(description.attribute("id"), Some("x"));
/// assert_eq!(description.children().len(), 2);
/// assert!(matches!(&description.children()[1], Child::Description(span) if span.name() == "span"));
/// ```
///
/// - `[…]` children are nested descriptions in the same form.
/// - `..iterable` splices every item of `iterable` (which must convert [`Into`] [`Child`]).
/// - Anything else is converted through [`Child::from`], so `&str`/[`String`] become text and
///   [`web_sys::Node`]s are attached as they are.
#[macro_export]
macro_rules! description {
	(@children $description:ident; $(,)?) => {};
	(@children $description:ident; .. $iterable:expr $(, $($rest:tt)*)?) => {
		$description.extend_children($iterable);
		$($crate::description!(@children $description; $($rest)*);)?
	};
	(@children $description:ident; [$($nested:tt)*] $(, $($rest:tt)*)?) => {
		$description.push_child($crate::description!($($nested)*));
		$($crate::description!(@children $description; $($rest)*);)?
	};
	(@children $description:ident; $child:expr $(, $($rest:tt)*)?) => {
		$description.push_child($child);
		$($crate::description!(@children $description; $($rest)*);)?
	};

	($name:expr $(,)?) => {
		$crate::Description::new($name)
	};
	($name:expr, { $($key:expr => $value:expr),* $(,)? } $(, $($children:tt)*)?) => {{
		#[allow(unused_mut)]
		let mut description = $crate::Description::new($name);
		$(description.set_attribute($key, $value);)*
		$($crate::description!(@children description; $($children)*);)?
		description
	}};
	($name:expr, $($children:tt)*) => {{
		let mut description = $crate::Description::new($name);
		$crate::description!(@children description; $($children)*);
		description
	}};
}

/// Literal description of an element subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
	name: String,
	attributes: Vec<(String, String)>,
	children: Vec<Child>,
}

/// A single child slot of a [`Description`].
///
/// The variant is chosen by the caller, so nothing is inferred from the value's shape at assembly time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
	/// Assembled recursively.
	Description(Description),
	/// Attached as-is. The very same node ends up in the tree, it's not cloned.
	Built(web_sys::Node),
	/// Becomes a text node.
	Text(String),
}

impl Description {
	#[must_use]
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			attributes: Vec::new(),
			children: Vec::new(),
		}
	}

	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Attributes in insertion order.
	#[must_use]
	pub fn attributes(&self) -> &[(String, String)] {
		&self.attributes
	}

	#[must_use]
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
	}

	#[must_use]
	pub fn children(&self) -> &[Child] {
		&self.children
	}

	/// Sets `name` to `value`, replacing an earlier value for the same name in place.
	pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();
		match self.attributes.iter_mut().find(|(key, _)| *key == name) {
			Some((_, previous)) => *previous = value,
			None => self.attributes.push((name, value)),
		}
	}

	pub fn push_child(&mut self, child: impl Into<Child>) {
		self.children.push(child.into())
	}

	pub fn extend_children<I>(&mut self, children: I)
	where
		I: IntoIterator,
		I::Item: Into<Child>,
	{
		self.children.extend(children.into_iter().map(Into::into))
	}

	/// Builder-style [`set_attribute`](`Description::set_attribute`).
	#[must_use]
	pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.set_attribute(name, value);
		self
	}

	/// Builder-style [`push_child`](`Description::push_child`).
	#[must_use]
	pub fn with_child(mut self, child: impl Into<Child>) -> Self {
		self.push_child(child);
		self
	}
}

impl From<Description> for Child {
	fn from(description: Description) -> Self {
		Self::Description(description)
	}
}

impl From<&str> for Child {
	fn from(text: &str) -> Self {
		Self::Text(text.to_owned())
	}
}

impl From<String> for Child {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<&String> for Child {
	fn from(text: &String) -> Self {
		Self::Text(text.clone())
	}
}

impl From<web_sys::Node> for Child {
	fn from(node: web_sys::Node) -> Self {
		Self::Built(node)
	}
}

impl From<web_sys::Element> for Child {
	fn from(element: web_sys::Element) -> Self {
		Self::Built(element.unchecked_into())
	}
}

impl From<web_sys::HtmlElement> for Child {
	fn from(element: web_sys::HtmlElement) -> Self {
		Self::Built(element.unchecked_into())
	}
}

/// Materializes `description` into a new, detached element owned by the caller.
///
/// Attributes are set verbatim, children are appended in order.
/// No caching or other state is involved.
///
/// # Errors
///
/// Iff the DOM rejects a tag or attribute name, or refuses to append a child
/// (for example because a [`Child::Built`] node is an ancestor of the new element).
#[instrument(skip(document, description), fields(tag = %description.name))]
pub fn assemble_element(document: &web_sys::Document, description: &Description) -> Result<web_sys::Element> {
	let element = document.create_element(&description.name).map_err(Error::js("createElement"))?;

	for (name, value) in &description.attributes {
		element.set_attribute(name, value).map_err(Error::js("setAttribute"))?;
	}

	let parent: &web_sys::Node = element.as_ref();
	for child in &description.children {
		match child {
			Child::Description(nested) => {
				let nested = assemble_element(document, nested)?;
				parent.append_child(&nested).map_err(Error::js("appendChild"))?;
			}
			Child::Built(node) => {
				let span = trace_span!("Attaching built node", ?node);
				let _enter = span.enter();
				parent.append_child(node).map_err(Error::js("appendChild"))?;
			}
			Child::Text(text) => {
				let text = document.create_text_node(text);
				parent.append_child(&text).map_err(Error::js("appendChild"))?;
			}
		}
	}

	Ok(element)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn literal_form() {
		let description = description!("div", {"id" => "x"}, "hello");
		assert_eq!(
			description,
			Description {
				name: "div".to_owned(),
				attributes: vec![("id".to_owned(), "x".to_owned())],
				children: vec![Child::Text("hello".to_owned())],
			}
		);
	}

	#[test]
	fn bare_tag() {
		let description = description!("hr");
		assert_eq!(description.name(), "hr");
		assert!(description.attributes().is_empty());
		assert!(description.children().is_empty());
	}

	#[test]
	fn nesting_without_attributes() {
		let description = description!["ul", ["li", "a"], ["li", ["em", "b"]]];
		assert_eq!(
			description,
			Description::new("ul")
				.with_child(Description::new("li").with_child("a"))
				.with_child(Description::new("li").with_child(Description::new("em").with_child("b")))
		);
	}

	#[test]
	fn splice_and_expressions() {
		let items = vec!["one".to_owned(), "two".to_owned()];
		let title = String::from("Title");
		let description = description![
			"section",
			{"class" => "list", "data-count" => items.len().to_string()},
			["h3", &title],
			..items.iter().map(|item| description!["p", item]),
		];
		assert_eq!(description.attribute("data-count"), Some("2"));
		assert_eq!(description.children().len(), 3);
		assert_eq!(description.children()[2], Child::Description(Description::new("p").with_child("two")));
	}

	#[test]
	fn repeated_attribute_keeps_position() {
		let mut description = description!("a", {"href" => "#", "class" => "x"});
		description.set_attribute("href", "#about");
		assert_eq!(description.attributes(), &[("href".to_owned(), "#about".to_owned()), ("class".to_owned(), "x".to_owned())]);
	}
}
