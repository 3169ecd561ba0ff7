#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

//! Batch reconciliation of preview links and catalog synchronisation.
//!
//! Layout: `coordinator.rs` (batch execution), `model.rs` (requests and
//! results), `error.rs` (whole-call failures and error rendering).

pub mod coordinator;
pub mod error;
pub mod model;

pub use coordinator::{BatchCoordinator, CatalogTarget};
pub use error::{BatchError, BatchResult, render_error};
pub use model::{BatchOutcome, CatalogHealth, ClearOutcome, LinkRequest};
