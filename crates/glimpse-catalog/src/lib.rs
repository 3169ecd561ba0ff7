#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

//! Client for the remote media catalog's virtual folder API.
//!
//! Layout: `client.rs` (reqwest implementation), `service.rs` (the `Catalog`
//! trait and the ensure sequence), `model.rs` (wire types), `error.rs`.

pub mod client;
pub mod error;
pub mod model;
pub mod service;

pub use client::CatalogClient;
pub use error::{CatalogError, CatalogResult};
pub use model::{CatalogFolder, EnsureOutcome, LibraryOptions};
pub use service::{Catalog, DEFAULT_SETTLE_DELAY};
