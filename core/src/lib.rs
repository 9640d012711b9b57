//! Typed remote-data client core for the card feed.
//!
//! # Overview
//! `FetchClient` turns a declarative `Endpoint` into an `HttpRequest`,
//! executes it through a `Transport`, validates the status and decodes a
//! JSON array into `Vec<T>`. `ResourceCache` keeps fetched image bytes for
//! the session, and `ImageLoader` drives one consumer's load of one URL
//! with cooperative cancellation.
//!
//! # Design
//! - The client is stateless; request building and response parsing are
//!   pure and tested without I/O.
//! - `Transport` is the only I/O seam. `ReqwestTransport` is the real one;
//!   tests script their own.
//! - Every suspendable call takes a `CancellationToken` and returns `None`
//!   once it has fired, before any decode or state mutation.
//! - Failures past request validation go to a `Reporter`.

pub mod cache;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod loader;
pub mod report;
pub mod transport;
pub mod types;

pub use cache::ResourceCache;
pub use client::FetchClient;
pub use config::ClientConfig;
pub use endpoint::{Endpoint, EndpointDescriptor, UserEndpoint};
pub use error::{FetchError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use loader::{ImageLoader, LoadState};
pub use report::{LogReporter, NoopReporter, ReportEvent, Reporter};
pub use tokio_util::sync::CancellationToken;
pub use transport::{ReqwestTransport, Transport};
pub use types::User;
