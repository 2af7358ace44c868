use std::fmt;

/// Outcome of one archive source attempt.
///
/// A body only exists on `Success`, so a result can never be half populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveResult {
    /// The archived page, as text.
    Success { body: String },

    /// The source has no archived copy of the page.
    NotFound,

    /// The source answered with a non-success HTTP status.
    UpstreamError { status: u16 },

    /// The source answered 200 with data that could not be interpreted.
    MalformedResponse { reason: String },

    /// The source could not be reached (connection failure or timeout).
    Unavailable { reason: String, timed_out: bool },
}

/// Classification of an [`ArchiveResult`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveStatus {
    Success,
    NotFound,
    UpstreamError,
    MalformedResponse,
    Unavailable,
}

impl ArchiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveStatus::Success => "success",
            ArchiveStatus::NotFound => "not_found",
            ArchiveStatus::UpstreamError => "upstream_error",
            ArchiveStatus::MalformedResponse => "malformed_response",
            ArchiveStatus::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for ArchiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ArchiveResult {
    pub fn success(body: impl Into<String>) -> Self {
        ArchiveResult::Success { body: body.into() }
    }

    pub fn status(&self) -> ArchiveStatus {
        match self {
            ArchiveResult::Success { .. } => ArchiveStatus::Success,
            ArchiveResult::NotFound => ArchiveStatus::NotFound,
            ArchiveResult::UpstreamError { .. } => ArchiveStatus::UpstreamError,
            ArchiveResult::MalformedResponse { .. } => ArchiveStatus::MalformedResponse,
            ArchiveResult::Unavailable { .. } => ArchiveStatus::Unavailable,
        }
    }

    /// HTTP-style status the host would observe for this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            ArchiveResult::Success { .. } => 200,
            ArchiveResult::NotFound => 404,
            ArchiveResult::UpstreamError { status } => *status,
            ArchiveResult::MalformedResponse { .. } => 502,
            ArchiveResult::Unavailable { timed_out: true, .. } => 504,
            ArchiveResult::Unavailable { timed_out: false, .. } => 503,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ArchiveResult::Success { .. })
    }

    /// Page body, if this is a success.
    pub fn body(&self) -> Option<&str> {
        match self {
            ArchiveResult::Success { body } => Some(body),
            _ => None,
        }
    }

    pub fn into_body(self) -> Option<String> {
        match self {
            ArchiveResult::Success { body } => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ArchiveResult::success("<html></html>").status_code(), 200);
        assert_eq!(ArchiveResult::NotFound.status_code(), 404);
        assert_eq!(ArchiveResult::UpstreamError { status: 403 }.status_code(), 403);
        assert_eq!(ArchiveResult::MalformedResponse { reason: "eof".into() }.status_code(), 502);
        assert_eq!(ArchiveResult::Unavailable { reason: "timeout".into(), timed_out: true }.status_code(), 504);
        assert_eq!(ArchiveResult::Unavailable { reason: "refused".into(), timed_out: false }.status_code(), 503);
    }

    #[test]
    fn test_body_only_on_success() {
        let ok = ArchiveResult::success("<html>old page</html>");
        assert!(ok.is_success());
        assert_eq!(ok.body(), Some("<html>old page</html>"));
        assert_eq!(ok.into_body().as_deref(), Some("<html>old page</html>"));

        let missing = ArchiveResult::NotFound;
        assert!(!missing.is_success());
        assert_eq!(missing.body(), None);
        assert_eq!(missing.into_body(), None);
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(ArchiveResult::success("").status(), ArchiveStatus::Success);
        assert_eq!(ArchiveResult::UpstreamError { status: 500 }.status(), ArchiveStatus::UpstreamError);
        assert_eq!(ArchiveResult::MalformedResponse { reason: String::new() }.status().to_string(), "malformed_response");
    }
}
