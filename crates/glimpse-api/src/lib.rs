#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

//! HTTP surface for link batches, directory lifecycle, status, and health.
//!
//! Layout: `app/` (shared state), `http/` (router, handlers, problem
//! responses), `error.rs` (server bootstrap errors).

pub mod app;
pub mod error;
pub mod http;

pub use app::state::ApiState;
pub use error::{ApiServerError, ApiServerResult};
pub use http::router::ApiServer;
