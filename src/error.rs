use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
	/// A DOM or JavaScript call threw or rejected.
	///
	/// The original [`JsValue`] is rendered immediately, since it can't leave the thread it was created on.
	#[error("{context} failed: {message}")]
	Js { context: &'static str, message: String },

	/// Non-200 response or network failure, carrying the transport's status text.
	#[error("{0}")]
	Transport(String),

	#[error("malformed JSON content: {0}")]
	Json(#[from] serde_json::Error),

	#[error("no content loaded for key {0:?}")]
	MissingContent(String),

	#[error("no global `window` available")]
	NoWindow,

	#[error("no `document` available")]
	NoDocument,

	#[error("no element matches container selector {0:?}")]
	MissingContainer(String),
}

impl Error {
	/// Adapter for [`Result::map_err`] on `web-sys` calls.
	pub fn js(context: &'static str) -> impl FnOnce(JsValue) -> Self {
		move |value| Self::Js {
			context,
			message: describe(&value),
		}
	}
}

impl From<Error> for JsValue {
	fn from(error: Error) -> Self {
		JsValue::from_str(&error.to_string())
	}
}

/// Best-effort human readable text for a thrown value.
pub(crate) fn describe(value: &JsValue) -> String {
	if let Some(text) = value.as_string() {
		return text;
	}
	if let Some(error) = value.dyn_ref::<js_sys::Error>() {
		return String::from(error.message());
	}
	format!("{:?}", value)
}
