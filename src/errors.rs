use std::{error, fmt};

/// Reasons a request frame, target or query string can be rejected.
///
/// Every variant is a normal, expected outcome of parsing untrusted input.
/// A dispatch layer that only cares about pass/fail can treat any `Err` the
/// same way; [code](Error::code) and [status](Error::status) are there for
/// callers that want to answer with something more precise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input does not start with one of the eight known method tokens
    /// followed by a single space (this includes empty input).
    UnknownMethod,

    /// The request target does not start with `/`.
    MissingLeadingSlash,
    /// The request target is not followed by exactly one space.
    MalformedTarget,
    /// A `?` is followed by content that is not a `key=value(&key=value)*` list.
    MalformedQuery,
    /// The query string holds more pairs than allowed.
    ///
    /// # Fields
    /// - `0`: The maximum allowed number of pairs
    QueryOverLimit(usize),
    /// The request target is longer than allowed.
    TargetTooLarge,

    /// The version is not `HTTP/` followed by `DIGITS "." DIGITS`.
    MalformedVersion,
    /// A line is not terminated by `CRLF`, or the final blank line is missing.
    MissingTerminator,

    /// A header line has no name or no colon after the name.
    MalformedHeaderLine,
    /// A header line continues the previous one (obsolete line folding).
    FoldedHeader,
    /// More header lines than allowed.
    TooManyHeaders,
    /// A header name or value is longer than allowed.
    HeaderTooLarge,

    /// A component (or a percent-decoded query token) is not valid UTF-8.
    InvalidEncoding,

    /// The grammar matched, but bytes remain after the parsed region.
    ///
    /// Only returned by the whole-input entry points such as
    /// [Request::parse](crate::Request::parse); the `*_prefix` variants hand
    /// the consumed length back to the caller instead.
    IncompleteConsumption {
        /// Bytes matched by the grammar.
        consumed: usize,
        /// Length of the supplied input.
        len: usize,
    },
}

macro_rules! error_codes {
    ($($name:ident: $status:literal, $reason:literal => $code:literal, $msg:literal;)*) => {
        /// Stable machine-readable code, e.g. `"UNKNOWN_METHOD"`.
        pub const fn code(&self) -> &'static str {
            match self { $(
                Self::$name { .. } => $code,
            )* }
        }

        /// HTTP status a server would answer this error with.
        ///
        /// # Examples
        /// ```
        /// use maker_request::Error;
        ///
        /// assert_eq!(Error::UnknownMethod.status(), (501, "Not Implemented"));
        /// assert_eq!(Error::MalformedVersion.status(), (400, "Bad Request"));
        /// ```
        pub const fn status(&self) -> (u16, &'static str) {
            match self { $(
                Self::$name { .. } => ($status, $reason),
            )* }
        }

        const fn message(&self) -> &'static str {
            match self { $(
                Self::$name { .. } => $msg,
            )* }
        }
    };
}

impl Error {
    error_codes! {
        UnknownMethod: 501, "Not Implemented"
            => "UNKNOWN_METHOD", "Unknown HTTP method";

        MissingLeadingSlash: 400, "Bad Request"
            => "MISSING_LEADING_SLASH", "Request target must start with '/'";
        MalformedTarget: 400, "Bad Request"
            => "MALFORMED_TARGET", "Malformed request target";
        MalformedQuery: 400, "Bad Request"
            => "MALFORMED_QUERY", "Malformed query string";
        QueryOverLimit: 400, "Bad Request"
            => "QUERY_OVER_LIMIT", "Query parameter limit exceeded";
        TargetTooLarge: 414, "URI Too Long"
            => "TARGET_TOO_LARGE", "Request target too long";

        MalformedVersion: 400, "Bad Request"
            => "MALFORMED_VERSION", "Malformed HTTP version";
        MissingTerminator: 400, "Bad Request"
            => "MISSING_TERMINATOR", "Missing CRLF line terminator";

        MalformedHeaderLine: 400, "Bad Request"
            => "MALFORMED_HEADER_LINE", "Malformed header line";
        FoldedHeader: 400, "Bad Request"
            => "FOLDED_HEADER", "Folded header lines are not supported";
        TooManyHeaders: 431, "Request Header Fields Too Large"
            => "TOO_MANY_HEADERS", "Too many headers";
        HeaderTooLarge: 431, "Request Header Fields Too Large"
            => "HEADER_TOO_LARGE", "Header name or value too long";

        InvalidEncoding: 400, "Bad Request"
            => "INVALID_ENCODING", "Request is not valid UTF-8";

        IncompleteConsumption: 400, "Bad Request"
            => "INCOMPLETE_CONSUMPTION", "Trailing bytes after request";
    }

    /// Returns `true` for [IncompleteConsumption](Error::IncompleteConsumption),
    /// the only error raised after the grammar itself succeeded.
    #[inline]
    pub const fn is_incomplete(&self) -> bool {
        matches!(self, Error::IncompleteConsumption { .. })
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::QueryOverLimit(limit) => {
                write!(f, "{}: limit={}", self.message(), limit)
            }
            Error::IncompleteConsumption { consumed, len } => {
                write!(f, "{}: consumed={} len={}", self.message(), consumed, len)
            }
            _ => f.write_str(self.message()),
        }
    }
}
