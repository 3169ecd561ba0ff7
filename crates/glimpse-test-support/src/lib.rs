#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

//! Shared test helpers used across the Glimpse crates.
//! Layout: fixtures.rs (scratch directories, media files), mocks.rs (in-memory catalog).

pub mod fixtures;
pub mod mocks;
