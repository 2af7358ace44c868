//! Core types and shared functionality for archive-fallback.
//!
//! This crate provides:
//! - Archive request/result model shared by sources, resolver and connector
//! - Unified error types
//! - Configuration structures
//! - Strict text encoding for inbound URLs and outbound page bodies

pub mod archive;
pub mod config;
pub mod encoding;
pub mod error;

pub use archive::{ArchiveRequest, ArchiveResult, ArchiveStatus};
pub use config::{AppConfig, ConfigError, SourceKind};
pub use encoding::TextEncoding;
pub use error::Error;
