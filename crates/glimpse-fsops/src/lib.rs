#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

//! Filesystem link store backing the preview directories.
//!
//! Layout: `service.rs` (link and directory operations), `model/` (records),
//! `error.rs` (failure taxonomy).

pub mod error;
pub mod model;
pub mod service;

pub use error::{FsOpsError, FsOpsResult};
pub use model::{ClearReport, LinkRecord};
pub use service::LinkStore;
