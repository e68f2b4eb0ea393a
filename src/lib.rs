//! maker_request - Zero-copy HTTP/1.1 request-line, target and header parser
//!
//! Turns the head of an HTTP/1.1-style request (everything up to and
//! including the blank line) into a structured, borrowed [Request]. The
//! parser does no I/O and keeps no state between calls: a server reads bytes
//! however it likes and hands the buffer over.
//!
//! # Grammar
//!
//! - **Request line**: one of eight [Method]s, an origin-form target, `HTTP/` and a
//!   `DIGITS "." DIGITS` version, terminated by exactly `CRLF`
//! - **Target**: [Uri] with root segment, hierarchy, percent-decoded [query] and fragment
//! - **Headers**: `name ":" value CRLF` lines followed by a blank line
//!
//! # Performance Characteristics
//!
//! - **Zero-copy** - every component borrows from the input; only query tokens
//!   changed by percent-decoding allocate
//! - **Single pass** - one forward-only cursor, no component is scanned twice
//! - **SIMD assisted** - `memchr` for delimiters, `simdutf8` for UTF-8 validation
//!
//! # Examples
//!
//! Parse a complete request head:
//! ```
//! use maker_request::{Method, Request};
//!
//! let req = Request::parse(b"GET /api/users?id=7 HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();
//!
//! assert_eq!(req.method(), Method::Get);
//! assert_eq!(req.uri().root(), Some("api"));
//! assert_eq!(req.uri().hierarchy(), Some("users"));
//! assert_eq!(req.uri().query("id"), Some("7"));
//! assert_eq!(req.header("Host"), Some("localhost"));
//! ```
//! Read from a buffer that also holds a body:
//! ```
//! use maker_request::Request;
//!
//! let buffer = b"POST /echo HTTP/1.1\r\nContent-Length: 4\r\n\r\nping";
//! let (req, consumed) = Request::parse_prefix(buffer).unwrap();
//!
//! let body = &buffer[consumed..consumed + req.content_length().unwrap()];
//! assert_eq!(body, b"ping");
//! ```
//! Bound untrusted input:
//! ```
//! use maker_request::{limits::ReqLimits, Error, Request};
//!
//! let limits = ReqLimits {
//!     target_size: 16,
//!     ..ReqLimits::strict()
//! };
//!
//! let result = Request::parse_with(b"GET /a/very/long/target HTTP/1.1\r\n\r\n", &limits);
//! assert_eq!(result, Err(Error::TargetTooLarge));
//! assert_eq!(Error::TargetTooLarge.status(), (414, "URI Too Long"));
//! ```
//!
//! # Features
//!
//! - `log` - emit `trace!` records for accepted requests and `debug!` records for
//!   rejected ones through the [`log`](https://docs.rs/log) facade

pub(crate) mod http {
    pub(crate) mod parser;
    pub mod query;
    pub(crate) mod request;
    pub(crate) mod types;
    pub(crate) mod uri;
    pub(crate) mod write;
}
pub(crate) mod errors;
pub mod limits;
mod log;

pub use crate::{
    errors::Error,
    http::{
        query,
        query::QueryMap,
        request::{HeaderMap, Request},
        types::Method,
        uri::Uri,
    },
};
