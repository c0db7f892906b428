//! Minimal HTTP helper on top of [***fetch***](https://developer.mozilla.org/en-US/docs/Web/API/Fetch_API).

use crate::{error::describe, Error, Result};
use tracing::{debug, instrument};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
	Get,
	Post,
}

impl Method {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
		}
	}
}

/// Request data.
///
/// For [`Method::Get`] either kind is appended to the URL as query string.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
	/// `application/json` body.
	Json(serde_json::Value),
	/// `application/x-www-form-urlencoded` body.
	Form(Vec<(String, String)>),
}

/// Encodes `pairs` as `application/x-www-form-urlencoded`, using [***encodeURIComponent***](https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/encodeURIComponent).
#[must_use]
pub fn encode_form(pairs: &[(String, String)]) -> String {
	pairs
		.iter()
		.map(|(key, value)| format!("{}={}", String::from(js_sys::encode_uri_component(key)), String::from(js_sys::encode_uri_component(value))))
		.collect::<Vec<_>>()
		.join("&")
}

fn query(payload: &Payload) -> String {
	match payload {
		Payload::Form(pairs) => encode_form(pairs),
		Payload::Json(serde_json::Value::Object(object)) => encode_form(
			&object
				.iter()
				.map(|(key, value)| {
					let value = match value {
						serde_json::Value::String(text) => text.clone(),
						other => other.to_string(),
					};
					(key.clone(), value)
				})
				.collect::<Vec<_>>(),
		),
		Payload::Json(other) => String::from(js_sys::encode_uri_component(&other.to_string())),
	}
}

/// Sends a request and resolves to the raw response body.
///
/// # Errors
///
/// [`Error::Transport`] with the status text for any status other than 200,
/// or with the error message if the request couldn't be made at all.
#[instrument(skip(data))]
pub async fn request(method: Method, path: &str, data: Option<&Payload>) -> Result<String> {
	let window = web_sys::window().ok_or(Error::NoWindow)?;

	let init = RequestInit::new();
	init.set_method(method.as_str());

	let url = match (method, data) {
		(Method::Get, Some(payload)) => {
			let separator = if path.contains('?') { '&' } else { '?' };
			format!("{}{}{}", path, separator, query(payload))
		}
		_ => path.to_owned(),
	};

	let content_type = match (method, data) {
		(Method::Post, Some(Payload::Json(value))) => {
			init.set_body(&JsValue::from_str(&value.to_string()));
			Some("application/json")
		}
		(Method::Post, Some(Payload::Form(pairs))) => {
			init.set_body(&JsValue::from_str(&encode_form(pairs)));
			Some("application/x-www-form-urlencoded")
		}
		_ => None,
	};

	let request = Request::new_with_str_and_init(&url, &init).map_err(Error::js("new Request"))?;
	if let Some(content_type) = content_type {
		request.headers().set("Content-Type", content_type).map_err(Error::js("Headers.set"))?;
	}

	let response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(|error| Error::Transport(describe(&error)))?;
	let response: Response = response.dyn_into().map_err(Error::js("fetch response"))?;

	debug!("{} {} -> {} {}", method.as_str(), url, response.status(), response.status_text());
	if response.status() != 200 {
		// HTTP/2 responses have no reason phrase.
		let status_text = response.status_text();
		return Err(Error::Transport(if status_text.is_empty() { response.status().to_string() } else { status_text }));
	}

	let body = JsFuture::from(response.text().map_err(Error::js("Response.text"))?)
		.await
		.map_err(|error| Error::Transport(describe(&error)))?;
	Ok(body.as_string().unwrap_or_default())
}
