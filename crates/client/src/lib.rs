//! Archive source clients for archive-fallback.
//!
//! This crate provides the HTTP plumbing shared by all archive backends, one
//! client per backend, and the fallback resolver that tries them in order.

pub mod google;
pub mod http;
pub mod resolver;
pub mod source;
pub mod wayback;

pub use google::GoogleCacheClient;
pub use http::{HttpConfig, build_http_client};
pub use resolver::{FallbackResolver, resolve};
pub use source::SourceClient;
pub use wayback::{AvailabilityResponse, WaybackMachineClient};
