//! [`HttpClient`] over `gloo-net`'s fetch wrapper.

use async_trait::async_trait;
use boards::error::ApiError;
use boards::http::{Body, HttpClient, HttpRequest, HttpResponse, Method};
use gloo_net::http::RequestBuilder;

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooHttp;

#[async_trait(?Send)]
impl HttpClient for GlooHttp {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = match request.method {
            Method::Get => RequestBuilder::new(&request.url).method(gloo_net::http::Method::GET),
            Method::Post => RequestBuilder::new(&request.url).method(gloo_net::http::Method::POST),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let outgoing = match request.body {
            None => builder.build(),
            Some(Body::Json(value)) => builder.json(&value),
            Some(Body::Form(encoded)) => builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(encoded),
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let response = outgoing
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}
