//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps to HTTP status codes.

use serde::Serialize;

/// Error classification
///
/// Each variant maps to an RFC 7231/9110 status code. The transport boundary
/// is out of scope for this workspace, but the mapping keeps error semantics
/// stable for whichever boundary consumes them.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::NotFound;
/// assert_eq!(kind.status_code(), 404);
/// assert_eq!(kind.as_str(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - Bad Request
    BadRequest,
    /// 401 - Unauthorized
    Unauthorized,
    /// 403 - Forbidden
    Forbidden,
    /// 404 - Not Found
    NotFound,
    /// 409 - Conflict
    Conflict,
    /// 410 - Gone: resource deleted or expired
    Gone,
    /// 422 - Unprocessable Entity
    UnprocessableEntity,
    /// 423 - Locked: resource is temporarily locked
    Locked,
    /// 429 - Too Many Requests
    TooManyRequests,
    /// 500 - Internal Server Error
    InternalServerError,
    /// 502 - Bad Gateway: an upstream collaborator failed
    BadGateway,
    /// 503 - Service Unavailable
    ServiceUnavailable,
}

impl ErrorKind {
    /// HTTP status code for this kind
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Gone => 410,
            ErrorKind::UnprocessableEntity => 422,
            ErrorKind::Locked => 423,
            ErrorKind::TooManyRequests => 429,
            ErrorKind::InternalServerError => 500,
            ErrorKind::BadGateway => 502,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// Standard reason phrase for this kind
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Gone => "Gone",
            ErrorKind::UnprocessableEntity => "Unprocessable Entity",
            ErrorKind::Locked => "Locked",
            ErrorKind::TooManyRequests => "Too Many Requests",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::BadGateway => "Bad Gateway",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// Whether this is a 5xx error. These should be logged.
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Whether this is a 4xx error.
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        let code = self.status_code();
        code >= 400 && code < 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
