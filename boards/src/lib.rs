//! Board collection client for the image-saving extension.
//!
//! This crate owns everything that talks to the remote collection API or to
//! the extension's durable storage: the [`board::Board`] value type, the
//! most-recently-used [`recents::RecentBoards`] cache, the REST-backed
//! [`repo::BoardRepository`], and the OAuth-backed [`token::TokenProvider`].
//! Transport and storage are reached only through the [`http::HttpClient`] and
//! [`store::KeyValueStore`] seams so the whole crate runs natively in tests;
//! the `extension` crate supplies the browser implementations.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`board`] | `Board` value type |
//! | [`recents`] | Size-capped MRU cache of boards |
//! | [`api`] | Wire DTOs for the collection API |
//! | [`config`] | Base URLs, client id, log level, endpoint builders |
//! | [`http`] | Transport-neutral request/response types and `HttpClient` |
//! | [`store`] | Durable key/value storage seam and in-memory store |
//! | [`repo`] | `BoardRepository` trait and its REST implementation |
//! | [`token`] | `Token`, `TokenProvider`, and the OAuth code flow |
//! | [`message`] | Content-script ↔ background message protocol |
//! | [`error`] | Error enums shared by the modules above |

pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod http;
pub mod message;
pub mod recents;
pub mod repo;
pub mod store;
pub mod token;

#[cfg(test)]
pub(crate) mod test_helpers;
