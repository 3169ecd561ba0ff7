//! State handed to every handler.

use glimpse_batch::BatchCoordinator;

/// Dependencies shared by the HTTP handlers.
#[derive(Debug, Clone)]
pub struct ApiState {
    pub(crate) coordinator: BatchCoordinator,
    pub(crate) version: &'static str,
}

impl ApiState {
    /// State reporting this crate's version.
    #[must_use]
    pub const fn new(coordinator: BatchCoordinator) -> Self {
        Self::with_version(coordinator, env!("CARGO_PKG_VERSION"))
    }

    /// State reporting an explicit version string.
    #[must_use]
    pub const fn with_version(coordinator: BatchCoordinator, version: &'static str) -> Self {
        Self {
            coordinator,
            version,
        }
    }
}
