//! [`AuthFlow`] over `chrome.identity.launchWebAuthFlow`.

use async_trait::async_trait;
use boards::error::AuthError;
use boards::token::AuthFlow;
use js_sys::{Object, Reflect};
use wasm_bindgen::JsValue;

use crate::chrome;

#[derive(Debug, Clone, Copy, Default)]
pub struct WebAuthFlow;

#[async_trait(?Send)]
impl AuthFlow for WebAuthFlow {
    fn redirect_url(&self) -> Option<String> {
        let identity = match chrome::namespace("identity") {
            Ok(identity) => identity,
            Err(e) => {
                log::error!("identity API unavailable: {}", chrome::describe(&e));
                return None;
            }
        };
        match chrome::call(&identity, "getRedirectURL", &[]) {
            Ok(url) => url.as_string().filter(|u| !u.is_empty()),
            Err(e) => {
                log::error!("getRedirectURL failed: {}", chrome::describe(&e));
                None
            }
        }
    }

    async fn launch(&self, authorize_url: &str) -> Result<String, AuthError> {
        let identity = chrome::namespace("identity").map_err(|e| AuthError::Flow(chrome::describe(&e)))?;
        let details = Object::new();
        Reflect::set(&details, &JsValue::from_str("url"), &JsValue::from_str(authorize_url))
            .and_then(|_| Reflect::set(&details, &JsValue::from_str("interactive"), &JsValue::TRUE))
            .map_err(|e| AuthError::Flow(chrome::describe(&e)))?;
        let redirect = chrome::call_async(&identity, "launchWebAuthFlow", &[details.into()])
            .await
            .map_err(|e| AuthError::Flow(chrome::describe(&e)))?;
        redirect
            .as_string()
            .ok_or_else(|| AuthError::Flow("auth flow returned no redirect".to_owned()))
    }
}
