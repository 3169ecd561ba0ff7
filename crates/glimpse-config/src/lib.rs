#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

//! Start-up configuration for the Glimpse service.
//!
//! Layout: `model.rs` (typed settings), `loader.rs` (environment parsing),
//! `defaults.rs` (fallback values), `error.rs` (validation errors).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_from_env, load_with};
pub use model::{AppConfig, CatalogConfig, LoggingSettings};
