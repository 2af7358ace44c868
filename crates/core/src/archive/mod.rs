//! Archive lookup model.
//!
//! An [`ArchiveRequest`] names the page to look up; an [`ArchiveResult`] is the
//! classified outcome of asking one archive source for it. Both are created
//! fresh per lookup and never mutated.

mod request;
mod result;

pub use request::ArchiveRequest;
pub use result::{ArchiveResult, ArchiveStatus};
