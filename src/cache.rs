//! Session-scoped caches.
//!
//! Both are append-only: Entries are added lazily and never evicted, so they live exactly as long as the page.

use crate::{Error, Result, Scene};
use hashbrown::{hash_map::Entry, HashMap};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::trace;

/// Built root nodes by scene.
///
/// Generic over the node type so that memoization doesn't depend on a DOM.
#[derive(Debug)]
pub struct SceneCache<N> {
	scenes: HashMap<Scene, N>,
}

impl<N> Default for SceneCache<N> {
	fn default() -> Self {
		Self::new()
	}
}

impl<N> SceneCache<N> {
	#[must_use]
	pub fn new() -> Self {
		Self { scenes: HashMap::new() }
	}

	#[must_use]
	pub fn get(&self, scene: Scene) -> Option<&N> {
		self.scenes.get(&scene)
	}

	#[must_use]
	pub fn contains(&self, scene: Scene) -> bool {
		self.scenes.contains_key(&scene)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.scenes.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.scenes.is_empty()
	}

	/// Returns the cached node for `scene`, building and storing it first if necessary.
	///
	/// `build` is called at most once per scene over the cache's lifetime, unless it fails.
	///
	/// # Errors
	///
	/// Iff `build` is called and fails. Nothing is cached in that case.
	pub fn get_or_try_insert_with<E>(&mut self, scene: Scene, build: impl FnOnce() -> core::result::Result<N, E>) -> core::result::Result<&N, E> {
		match self.scenes.entry(scene) {
			Entry::Occupied(occupied) => {
				trace!("Reusing cached {:?} scene.", scene);
				Ok(occupied.into_mut())
			}
			Entry::Vacant(vacant) => {
				trace!("Building {:?} scene.", scene);
				Ok(vacant.insert(build()?))
			}
		}
	}
}

/// Parsed JSON content by top-level key, merged from every payload fetched so far.
#[derive(Debug, Default)]
pub struct ContentStore {
	data: HashMap<String, Value>,
}

impl ContentStore {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds every top-level key of `data`. Later payloads win for keys that were already present.
	pub fn merge(&mut self, data: Map<String, Value>) {
		for (key, value) in data {
			trace!("Merging content key {:?}.", key);
			self.data.insert(key, value);
		}
	}

	#[must_use]
	pub fn contains(&self, key: &str) -> bool {
		self.data.contains_key(key)
	}

	#[must_use]
	pub fn raw(&self, key: &str) -> Option<&Value> {
		self.data.get(key)
	}

	/// Deserializes the content stored under `key`.
	///
	/// # Errors
	///
	/// [`Error::MissingContent`] if nothing was merged for `key` yet, [`Error::Json`] if it doesn't fit `T`.
	pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
		let value = self.data.get(key).ok_or_else(|| Error::MissingContent(key.to_owned()))?;
		Ok(T::deserialize(value)?)
	}
}
