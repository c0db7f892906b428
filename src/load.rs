//! Snapshots of live DOM subtrees as [`Description`]s.
//!
//! This is the inverse of [`assemble_element`](`crate::assemble_element`) for element and text content:
//! Loading a freshly assembled element yields a description equal to the one it was built from,
//! as long as that contained no [`Child::Built`] nodes (which are loaded like any other content).

use crate::{Child, Description};
use tracing::trace;
use wasm_bindgen::JsCast;
use web_sys::{Attr, Element, NamedNodeMap, NodeList, Text};

#[must_use]
pub fn load_child_nodes(child_nodes: &NodeList) -> Vec<Child> {
	(0..child_nodes.length())
		.filter_map(|i| child_nodes.item(i))
		.filter_map(|child| {
			if let Some(element) = child.dyn_ref::<Element>() {
				Some(Child::Description(load_element(element)))
			} else if let Some(text) = child.dyn_ref::<Text>() {
				Some(Child::Text(text.data()))
			} else {
				trace!("Skipping non-element, non-text child node: {:?}", child);
				None
			}
		})
		.collect()
}

/// Uses the element's [***localName***](https://developer.mozilla.org/en-US/docs/Web/API/Element/localName),
/// so HTML tag names come back in the case they were created with rather than upper case.
#[must_use]
pub fn load_element(element: &Element) -> Description {
	let mut description = Description::new(element.local_name());
	for (name, value) in load_attributes(&element.attributes()) {
		description.set_attribute(name, value);
	}
	description.extend_children(load_child_nodes(&element.child_nodes()));
	description
}

#[must_use]
pub fn load_attributes(attributes: &NamedNodeMap) -> Vec<(String, String)> {
	(0..attributes.length()).filter_map(|i| attributes.item(i)).map(|attribute| load_attribute(&attribute)).collect()
}

#[must_use]
pub fn load_attribute(attribute: &Attr) -> (String, String) {
	(attribute.name(), attribute.value())
}
