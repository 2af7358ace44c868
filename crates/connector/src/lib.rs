//! Proxy connector exposing archive fallback resolution.
//!
//! The host proxy hands a connector the requested URL as raw bytes and an
//! output sink. The connector writes the archived page to the sink and reports
//! whether it did.

pub mod connector;
pub mod wayback;

pub use connector::{CONNECTOR_KIND, ConnectTarget, Connector};
pub use wayback::WaybackConnector;
