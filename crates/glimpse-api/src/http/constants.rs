//! Shared HTTP constants (headers, problem URIs).

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";

pub(crate) const PROBLEM_INTERNAL: &str = "https://glimpse.dev/problems/internal";
pub(crate) const PROBLEM_BAD_REQUEST: &str = "https://glimpse.dev/problems/bad-request";
