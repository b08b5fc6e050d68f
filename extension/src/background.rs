//! Background-script entry: answers token requests from content scripts.
//!
//! The interactive auth window can only be opened from the background
//! context, so the OAuth token provider lives here and content scripts
//! reach it through [`RuntimeMessage::GetToken`].

use std::rc::Rc;

use boards::config::ApiConfig;
use boards::message::{RuntimeMessage, TokenReply};
use boards::token::{OAuthTokenProvider, TokenProvider};
use wasm_bindgen::JsValue;

use crate::auth::WebAuthFlow;
use crate::http::GlooHttp;
use crate::runtime;
use crate::storage::ExtensionStorage;

type Provider = OAuthTokenProvider<WebAuthFlow, GlooHttp, ExtensionStorage>;

pub fn start(config: ApiConfig) -> Result<(), JsValue> {
    let provider: Rc<Provider> = Rc::new(OAuthTokenProvider::new(config, WebAuthFlow, GlooHttp, ExtensionStorage));
    runtime::listen(move |message, respond| match message {
        RuntimeMessage::GetToken => {
            let provider = Rc::clone(&provider);
            wasm_bindgen_futures::spawn_local(async move {
                let reply = TokenReply::from_token(provider.acquire_token().await);
                respond(reply.to_json());
            });
        }
    })?;
    log::info!("background ready");
    Ok(())
}
