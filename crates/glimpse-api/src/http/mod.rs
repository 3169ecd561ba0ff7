//! HTTP surface modules (router, handlers, problem responses).

/// Shared constants and header names.
pub mod constants;
/// Directory lifecycle handlers.
pub mod directories;
/// Problem response helpers and error types.
pub mod errors;
/// Health and status endpoints.
pub mod health;
/// Router construction and server host.
pub mod router;
/// Link batch handlers.
pub mod symlinks;
