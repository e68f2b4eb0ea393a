//! Parser limits
//!
//! The grammar itself accepts requests of any size. A server that parses
//! untrusted input will usually want to bound it, to guard against:
//! - Header flooding
//! - Oversized request targets
//! - Query parameter explosion
//!
//! # Examples
//!
//! ```
//! use maker_request::{limits::ReqLimits, Error, Request};
//!
//! let limits = ReqLimits {
//!     header_count: 1,
//!     ..ReqLimits::default()
//! };
//!
//! let input = b"GET / HTTP/1.1\r\nHost: a\r\nAccept: */*\r\n\r\n";
//! assert_eq!(Request::parse_with(input, &limits), Err(Error::TooManyHeaders));
//! assert!(Request::parse(input).is_ok());
//! ```

/// Caps applied while parsing a request.
///
/// [Default] leaves every field at `usize::MAX`, so the limits never change
/// what the grammar accepts. [ReqLimits::strict] gives conservative values
/// for servers facing the open internet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReqLimits {
    /// Maximum request target length in bytes, from the leading `/` up to the
    /// next space (default: unbounded, strict: `256 B`)
    ///
    /// Checked before any component is parsed.
    pub target_size: usize,
    /// Maximum number of `key=value` pairs in the query (default: unbounded, strict: `8`)
    ///
    /// Duplicate keys are counted every time they appear, even though only
    /// the last one is kept.
    pub query_parts: usize,

    /// Maximum number of header lines per request (default: unbounded, strict: `16`)
    ///
    /// Typical browsers send 10-12 headers.
    pub header_count: usize,
    /// Maximum header name length in bytes (default: unbounded, strict: `64 B`)
    pub header_name_size: usize,
    /// Maximum header value length in bytes (default: unbounded, strict: `512 B`)
    ///
    /// Fits most headers including JWT tokens, cookies, and UUIDs.
    pub header_value_size: usize,

    #[doc(hidden)]
    #[allow(dead_code)]
    pub _priv: (),
}

impl Default for ReqLimits {
    fn default() -> Self {
        Self {
            target_size: usize::MAX,
            query_parts: usize::MAX,

            header_count: usize::MAX,
            header_name_size: usize::MAX,
            header_value_size: usize::MAX,

            _priv: (),
        }
    }
}

impl ReqLimits {
    /// Security-conscious limits for a public-facing server.
    ///
    /// # Example
    /// ```
    /// use maker_request::limits::ReqLimits;
    ///
    /// let limits = ReqLimits::strict();
    /// assert_eq!(limits.header_count, 16);
    /// ```
    pub fn strict() -> Self {
        Self {
            target_size: 256, // Enough for: /api/v1/users/search?q=test&page=1
            query_parts: 8,   // ?sort=name&debug=true

            header_count: 16,       // Typical: 10-12 browser headers + 4-6 custom
            header_name_size: 64,   // Fits: x-custom-auth-token-header-name
            header_value_size: 512, // Fits most JWT tokens and cookies

            _priv: (),
        }
    }
}
