//! Fallback values applied when an environment variable is absent.

use std::net::{IpAddr, Ipv4Addr};

/// Listener address used when `GLIMPSE_BIND_ADDR` is unset.
pub const BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
/// Listener port used when `GLIMPSE_HTTP_PORT` is unset.
pub const HTTP_PORT: u16 = 8090;
/// Virtual folder that receives preview links.
pub const CATALOG_FOLDER: &str = "Leaving Soon";
/// Collection type assigned when the virtual folder is created.
pub const CATALOG_COLLECTION_TYPE: &str = "mixed";
/// Catalog request timeout in seconds.
pub const CATALOG_TIMEOUT_SECS: u64 = 30;
/// Log level used when neither `RUST_LOG` nor `GLIMPSE_LOG_LEVEL` is set.
pub const LOG_LEVEL: &str = "info";
