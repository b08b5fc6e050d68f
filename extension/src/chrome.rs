//! Untyped access to the `chrome.*` extension namespaces.
//!
//! `web-sys` has no bindings for extension APIs, so calls go through
//! `Reflect`. Manifest V3 APIs return promises when no callback is given;
//! [`call_async`] awaits them.

use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Resolve a dotted path under the global `chrome` object.
pub fn namespace(path: &str) -> Result<Object, JsValue> {
    let mut current: JsValue = Reflect::get(&js_sys::global(), &JsValue::from_str("chrome"))?;
    for part in path.split('.') {
        if current.is_undefined() || current.is_null() {
            break;
        }
        current = Reflect::get(&current, &JsValue::from_str(part))?;
    }
    current
        .dyn_into::<Object>()
        .map_err(|_| JsValue::from_str(&format!("chrome.{path} is unavailable")))
}

fn method(target: &Object, name: &str) -> Result<Function, JsValue> {
    Reflect::get(target, &JsValue::from_str(name))?
        .dyn_into::<Function>()
        .map_err(|_| JsValue::from_str(&format!("{name} is not a function")))
}

/// Call `target.name(...args)` synchronously.
pub fn call(target: &Object, name: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let array = args.iter().collect::<js_sys::Array>();
    method(target, name)?.apply(target, &array)
}

/// Call `target.name(...args)` and await the promise it returns.
pub async fn call_async(target: &Object, name: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let returned = call(target, name, args)?;
    let promise = returned
        .dyn_into::<Promise>()
        .map_err(|_| JsValue::from_str(&format!("{name} did not return a promise")))?;
    JsFuture::from(promise).await
}

/// Best-effort text for a thrown JS value.
pub fn describe(error: &JsValue) -> String {
    if let Some(text) = error.as_string() {
        return text;
    }
    if let Ok(message) = Reflect::get(error, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{error:?}")
}

/// Plain JS object → `serde_json::Value`, through `JSON.stringify`.
pub fn to_json(value: &JsValue) -> Result<serde_json::Value, String> {
    if value.is_undefined() {
        return Ok(serde_json::Value::Null);
    }
    let text = js_sys::JSON::stringify(value)
        .map_err(|e| describe(&e))?
        .as_string()
        .unwrap_or_default();
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

/// `serde_json::Value` → plain JS object, through `JSON.parse`.
pub fn from_json(value: &serde_json::Value) -> Result<JsValue, String> {
    js_sys::JSON::parse(&value.to_string()).map_err(|e| describe(&e))
}

/// `chrome.runtime.getURL(path)`.
pub fn asset_url(path: &str) -> Result<String, JsValue> {
    let runtime = namespace("runtime")?;
    call(&runtime, "getURL", &[JsValue::from_str(path)])?
        .as_string()
        .ok_or_else(|| JsValue::from_str("getURL returned a non-string"))
}
