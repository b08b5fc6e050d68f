//! Content ↔ background messaging over `chrome.runtime`.

use async_trait::async_trait;
use boards::message::{RuntimeMessage, TokenReply};
use boards::token::{Token, TokenProvider};
use js_sys::Function;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use crate::chrome;

/// Content-side token provider: asks the background script for the token.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageTokenProvider;

impl MessageTokenProvider {
    async fn request(&self) -> Result<TokenReply, String> {
        let runtime = chrome::namespace("runtime").map_err(|e| chrome::describe(&e))?;
        let message = serde_json::to_value(RuntimeMessage::GetToken).map_err(|e| e.to_string())?;
        let reply = chrome::call_async(&runtime, "sendMessage", &[chrome::from_json(&message)?])
            .await
            .map_err(|e| chrome::describe(&e))?;
        let value = chrome::to_json(&reply)?;
        serde_json::from_value(value).map_err(|e| e.to_string())
    }
}

#[async_trait(?Send)]
impl TokenProvider for MessageTokenProvider {
    async fn acquire_token(&self) -> Option<Token> {
        match self.request().await {
            Ok(reply) => reply.into_token(),
            Err(e) => {
                log::error!("token request to background failed: {e}");
                None
            }
        }
    }
}

/// Install the background `onMessage` listener. `handler` receives each
/// parsed message and a callback that must be called exactly once with the
/// reply. The listener lives for the life of the background context.
pub fn listen<F>(mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(RuntimeMessage, Box<dyn FnOnce(serde_json::Value)>) + 'static,
{
    let on_message = chrome::namespace("runtime.onMessage")?;
    let listener = Closure::<dyn FnMut(JsValue, JsValue, Function) -> bool>::new(
        move |message: JsValue, _sender: JsValue, send_response: Function| {
            let parsed = match chrome::to_json(&message) {
                Ok(value) => RuntimeMessage::parse(&value),
                Err(e) => {
                    log::warn!("unreadable runtime message: {e}");
                    None
                }
            };
            let Some(parsed) = parsed else {
                return false;
            };
            let respond = Box::new(move |reply: serde_json::Value| {
                let delivered = chrome::from_json(&reply)
                    .and_then(|js| send_response.call1(&JsValue::NULL, &js).map_err(|e| chrome::describe(&e)));
                if let Err(e) = delivered {
                    log::error!("failed to reply to runtime message: {e}");
                }
            });
            handler(parsed, respond);
            // Keep the channel open for the asynchronous reply.
            true
        },
    );
    chrome::call(&on_message, "addListener", &[listener.as_ref().clone()])?;
    listener.forget();
    Ok(())
}
