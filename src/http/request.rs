use crate::{
    errors::Error,
    http::{
        parser::{to_str, Parser},
        types,
        uri,
    },
    limits::ReqLimits,
    log::{debug, trace},
    Method, Uri,
};
use std::collections::HashMap;

/// Header fields keyed by their exact (case-sensitive) name. Later
/// duplicates overwrite earlier ones.
pub type HeaderMap<'a> = HashMap<&'a str, &'a str>;

/// A parsed HTTP request-line and header block.
///
/// All text is borrowed from the input buffer; only query tokens changed by
/// percent-decoding are owned.
///
/// # Input data requirements
///
/// #### Character encoding
///
/// The request line and headers must be `UTF-8`. Otherwise the parser
/// returns [Error::InvalidEncoding].
///
/// #### General designations
/// - `SP`: ASCII space (0x20)
/// - `CRLF`: Carriage return + line feed (`"\r\n"`) - **exactly this sequence required**
///
///   Unlike RFC 7230 which permits `CR`, `LF`, or `CRLF` in certain contexts,
///   this parser requires exactly `CRLF` as line terminator.
/// ---
/// - `[METHOD]`: See the values in [Method]
/// - `[TARGET]`: origin-form target, see [Uri]
///
/// ## First line
///
/// Template: `[METHOD] SP [TARGET] SP "HTTP/" [VERSION] CRLF`,
/// e.g. `GET /api/users HTTP/1.1\r\n`
///
/// Where `[VERSION]` is `DIGITS "." DIGITS` (`1.1`, `1.0`, `2.0`, `12.34`).
///
/// **Invalid**:
/// ```text
/// GET /api/users HTTP/1.1\n   // Missing CR
/// GET /api/users HTTP/1.1\r   // Missing LF
/// GET /api/users http/1.1\r\n // Literal must be "HTTP/"
/// ```
///
/// ## Header
///
/// Template string:
/// ```text
/// [NAME] ":" *(SP / TAB) [VALUE] CRLF
/// ```
/// Where:
/// - `[NAME]`: one or more characters, none of `()<>@,;:\"/[]?={}`, SP, TAB, CR or LF
/// - `[VALUE]`: everything up to the next `CRLF`, kept verbatim (may be empty)
///
/// Examples:
/// ```text
/// Content-Type: plain/text\r\n
/// X-Empty:\r\n                    // Empty value allowed
/// Name:   value  \r\n             // Value: `value  `
/// aaaaaaa:+++++++\r\n             // Value: `+++++++`, never decoded
/// ```
///
/// Header names are kept exactly as sent, and a repeated name replaces the
/// earlier value. Lines starting with SP or TAB (obsolete line folding) are
/// rejected with [Error::FoldedHeader].
///
/// ## End of headers
///
/// Template string:
/// ```text
/// CRLF
/// ```
///
/// Anything after it (a body, a pipelined request) belongs to the caller:
/// see [Request::parse_prefix].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request<'a> {
    method: Method,
    uri: Uri<'a>,
    version: &'a str,

    headers: HeaderMap<'a>,
}

impl<'a> Request<'a> {
    /// Parses a complete request frame; the whole input must be consumed.
    ///
    /// # Examples
    /// ```
    /// use maker_request::{Error, Method, Request};
    ///
    /// let req = Request::parse(b"GET /hello.htm HTTP/1.1\r\nHost: www.google.com\r\n\r\n").unwrap();
    ///
    /// assert_eq!(req.method(), Method::Get);
    /// assert_eq!(req.uri().root(), Some("hello.htm"));
    /// assert_eq!(req.version(), "1.1");
    /// assert_eq!(req.header("Host"), Some("www.google.com"));
    ///
    /// assert_eq!(Request::parse(b""), Err(Error::UnknownMethod));
    /// assert_eq!(Request::parse(b"GET / INVALID/0.0\r\n\r\n"), Err(Error::MalformedVersion));
    /// ```
    #[inline]
    pub fn parse(src: &'a [u8]) -> Result<Self, Error> {
        Self::parse_with(src, &ReqLimits::default())
    }

    /// Like [Request::parse], enforcing `limits`.
    pub fn parse_with(src: &'a [u8], limits: &ReqLimits) -> Result<Self, Error> {
        let mut p = Parser::new(src);
        let request = Self::parse_request(&mut p, limits)
            .and_then(|request| p.finish().map(|()| request))
            .map_err(|err| reject(&p, err))?;

        trace!("parsed {} request ({} bytes)", request.method, p.pos());
        Ok(request)
    }

    /// Parses a request frame at the start of `src` and returns it together
    /// with the number of bytes consumed, up to and including the blank line.
    ///
    /// # Examples
    /// ```
    /// use maker_request::Request;
    ///
    /// let input = b"POST /upload HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
    /// let (req, consumed) = Request::parse_prefix(input).unwrap();
    ///
    /// assert_eq!(req.content_length(), Some(5));
    /// assert_eq!(&input[consumed..], b"hello");
    /// ```
    #[inline]
    pub fn parse_prefix(src: &'a [u8]) -> Result<(Self, usize), Error> {
        Self::parse_prefix_with(src, &ReqLimits::default())
    }

    /// Like [Request::parse_prefix], enforcing `limits`.
    pub fn parse_prefix_with(src: &'a [u8], limits: &ReqLimits) -> Result<(Self, usize), Error> {
        let mut p = Parser::new(src);
        let request = Self::parse_request(&mut p, limits).map_err(|err| reject(&p, err))?;

        trace!("parsed {} request ({} bytes)", request.method, p.pos());
        Ok((request, p.pos()))
    }

    #[inline]
    fn parse_request(p: &mut Parser<'a>, limits: &ReqLimits) -> Result<Self, Error> {
        let (method, len) = Method::from_bytes(p.rest())?;
        p.advance(len);

        let uri = uri::parse(p, limits)?;
        if !p.eat(b' ') {
            return Err(Error::MalformedTarget);
        }

        let version = Self::parse_version(p)?;
        if !p.eat_crlf() {
            return Err(Error::MissingTerminator);
        }

        let headers = Self::parse_headers(p, limits)?;

        Ok(Request {
            method,
            uri,
            version,
            headers,
        })
    }
}

// Parse first line
impl<'a> Request<'a> {
    #[inline]
    fn parse_version(p: &mut Parser<'a>) -> Result<&'a str, Error> {
        if !p.eat_slice(b"HTTP/") {
            return Err(Error::MalformedVersion);
        }

        let start = p.pos();
        p.take_while1(|b| b.is_ascii_digit())
            .ok_or(Error::MalformedVersion)?;
        if !p.eat(b'.') {
            return Err(Error::MalformedVersion);
        }
        p.take_while1(|b| b.is_ascii_digit())
            .ok_or(Error::MalformedVersion)?;

        let version = p
            .get_slice(start, p.pos())
            .ok_or(Error::MalformedVersion)?;

        to_str(version)
    }
}

// Parse headers
impl<'a> Request<'a> {
    fn parse_headers(p: &mut Parser<'a>, limits: &ReqLimits) -> Result<HeaderMap<'a>, Error> {
        let mut headers = HeaderMap::new();
        let mut count = 0;

        while !p.eat_crlf() {
            if p.is_end() {
                return Err(Error::MissingTerminator);
            }
            if count >= limits.header_count {
                return Err(Error::TooManyHeaders);
            }

            let (name, value) = Self::parse_header(p, limits)?;
            headers.insert(name, value);
            count += 1;
        }

        Ok(headers)
    }

    #[inline]
    fn parse_header(p: &mut Parser<'a>, limits: &ReqLimits) -> Result<(&'a str, &'a str), Error> {
        if matches!(p.peek(), Some(b' ' | b'\t')) {
            return Err(Error::FoldedHeader);
        }

        let name = p
            .take_while1(is_field_name)
            .ok_or(Error::MalformedHeaderLine)?;
        if name.len() > limits.header_name_size {
            return Err(Error::HeaderTooLarge);
        }

        if !p.eat(b':') {
            return Err(Error::MalformedHeaderLine);
        }

        p.take_while(|b| b == b' ' || b == b'\t');
        if p.at_crlf() && matches!(p.peek_at(2), Some(b' ' | b'\t')) {
            return Err(Error::FoldedHeader);
        }

        let value = p.take_until_crlf().ok_or(Error::MissingTerminator)?;
        if value.len() > limits.header_value_size {
            return Err(Error::HeaderTooLarge);
        }
        p.eat_crlf();

        Ok((to_str(name)?, to_str(value)?))
    }
}

#[inline(always)]
fn is_field_name(byte: u8) -> bool {
    !matches!(
        byte,
        b'(' | b')'
            | b'<'
            | b'>'
            | b'@'
            | b','
            | b';'
            | b':'
            | b'\\'
            | b'"'
            | b'/'
            | b'['
            | b']'
            | b'?'
            | b'='
            | b'{'
            | b'}'
            | b' '
            | b'\t'
            | b'\r'
            | b'\n'
    )
}

#[cold]
#[cfg_attr(not(feature = "log"), allow(unused_variables))]
fn reject(p: &Parser<'_>, err: Error) -> Error {
    debug!("rejected request at byte {} of {}: {}", p.pos(), p.len(), err.code());
    err
}

impl<'a> TryFrom<&'a [u8]> for Request<'a> {
    type Error = Error;

    #[inline]
    fn try_from(src: &'a [u8]) -> Result<Self, Self::Error> {
        Self::parse(src)
    }
}

// Public API
impl<'a> Request<'a> {
    #[inline(always)]
    pub const fn method(&self) -> Method {
        self.method
    }

    #[inline(always)]
    pub const fn uri(&self) -> &Uri<'a> {
        &self.uri
    }

    /// Returns the version digits without the `HTTP/` prefix, e.g. `"1.1"`.
    #[inline(always)]
    pub const fn version(&self) -> &'a str {
        self.version
    }

    #[inline(always)]
    pub const fn headers(&self) -> &HeaderMap<'a> {
        &self.headers
    }

    /// Returns the header value with exactly this name (case-sensitive).
    #[inline]
    pub fn header(&self, name: &str) -> Option<&'a str> {
        self.headers.get(name).copied()
    }

    /// Returns a header value with case-insensitive name matching
    /// (per [RFC 7230](https://tools.ietf.org/html/rfc7230#section-3.2)).
    /// Uses linear search; when several names differ only in case, which one
    /// is returned is unspecified.
    #[inline]
    pub fn header_ignore_case(&self, name: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }

    /// Returns the value of the `Content-Length` header if it is present and
    /// a plain decimal number.
    #[inline]
    pub fn content_length(&self) -> Option<usize> {
        let value = self.header_ignore_case("content-length")?;
        types::slice_to_usize(value.trim_matches(|c| c == ' ' || c == '\t').as_bytes())
    }

    /// Returns `true` if the last coding in `Transfer-Encoding` is `chunked`.
    #[inline]
    pub fn is_chunked(&self) -> bool {
        self.header_ignore_case("transfer-encoding")
            .and_then(|value| value.rsplit(',').next())
            .is_some_and(|coding| coding.trim().eq_ignore_ascii_case("chunked"))
    }
}

#[cfg(test)]
mod request_self {
    use super::*;

    #[test]
    fn parse_get_request() {
        let input = "GET /hello.htm HTTP/1.1\r\n\
            User-Agent: Mozilla/4.0 (compatible; MSIE5.01; Windows NT)\r\n\
            Host: www.google.com\r\n\
            Accept-Language: en-us\r\n\
            Accept-Encoding: gzip, deflate\r\n\
            Connection: Keep-Alive\r\n\
            \r\n";

        let (req, consumed) = Request::parse_prefix(input.as_bytes()).unwrap();

        assert_eq!(consumed, input.len());
        assert_eq!(req.method(), Method::Get);
        assert_eq!(req.uri().root(), Some("hello.htm"));
        assert_eq!(req.version(), "1.1");

        #[rustfmt::skip]
        let expected = HeaderMap::from([
            ("User-Agent",      "Mozilla/4.0 (compatible; MSIE5.01; Windows NT)"),
            ("Host",            "www.google.com"),
            ("Accept-Language", "en-us"),
            ("Accept-Encoding", "gzip, deflate"),
            ("Connection",      "Keep-Alive"),
        ]);
        assert_eq!(req.headers(), &expected);
    }

    #[test]
    fn parse_strange_header() {
        let input = b"GET / HTTP/1.1\r\naaaaaaa:+++++++\r\n\r\n";
        let (req, consumed) = Request::parse_prefix(input).unwrap();

        assert_eq!(consumed, input.len());
        assert_eq!(req.header("aaaaaaa"), Some("+++++++"));
        assert_eq!(req.uri(), &Uri::default());
    }

    #[test]
    fn parse_method() {
        #[rustfmt::skip]
        let cases = [
            ("OPTIONS / HTTP/1.1\r\n\r\n",   Ok(Method::Options)),
            ("GET / HTTP/1.1\r\n\r\n",       Ok(Method::Get)),
            ("HEAD / HTTP/1.1\r\n\r\n",      Ok(Method::Head)),
            ("POST / HTTP/1.1\r\n\r\n",      Ok(Method::Post)),
            ("PUT / HTTP/1.1\r\n\r\n",       Ok(Method::Put)),
            ("DELETE / HTTP/1.1\r\n\r\n",    Ok(Method::Delete)),
            ("TRACE / HTTP/1.1\r\n\r\n",     Ok(Method::Trace)),
            ("CONNECT / HTTP/1.1\r\n\r\n",   Ok(Method::Connect)),

            ("",                             Err(Error::UnknownMethod)),
            ("PATCH / HTTP/1.1\r\n\r\n",     Err(Error::UnknownMethod)),
            ("get / HTTP/1.1\r\n\r\n",       Err(Error::UnknownMethod)),
            (" GET / HTTP/1.1\r\n\r\n",      Err(Error::UnknownMethod)),
            ("GETGETGET / HTTP/1.1\r\n\r\n", Err(Error::UnknownMethod)),
            ("GET/ HTTP/1.1\r\n\r\n",        Err(Error::UnknownMethod)),
        ];

        for (input, expected) in cases {
            assert_eq!(
                Request::parse(input.as_bytes()).map(|req| req.method()),
                expected,
                "{input:?}"
            );
        }
    }

    #[test]
    fn parse_target() {
        #[rustfmt::skip]
        let cases = [
            ("/",                         Ok((None, None))),
            ("/api",                      Ok((Some("api"), None))),
            ("/api/users/123",            Ok((Some("api"), Some("users/123")))),
            ("/api/find?user=qwe&id=223", Ok((Some("api"), Some("find")))),
            ("/?q=a%20b#frag",            Ok((None, None))),

            ("api",                       Err(Error::MissingLeadingSlash)),
            ("*",                         Err(Error::MissingLeadingSlash)),
            ("http://host/",              Err(Error::MissingLeadingSlash)),
            ("",                          Err(Error::MissingLeadingSlash)),
            ("/api/",                     Err(Error::MalformedTarget)),
            ("//",                        Err(Error::MalformedTarget)),
            ("/a?",                       Err(Error::MalformedTarget)),
            ("/a#",                       Err(Error::MalformedTarget)),
            ("/a?flag",                   Err(Error::MalformedQuery)),
            ("/a?k=1&&",                  Err(Error::MalformedQuery)),
        ];

        for (target, expected) in cases {
            let input = format!("GET {target} HTTP/1.1\r\n\r\n");
            let result = Request::parse(input.as_bytes())
                .map(|req| (req.uri().root(), req.uri().hierarchy()));

            assert_eq!(result, expected, "{input:?}");
        }
    }

    #[test]
    fn parse_target_components() {
        let req = Request::parse(b"DELETE /api/items?id=7&tag=a%2Bb#top HTTP/1.0\r\n\r\n").unwrap();

        assert_eq!(req.method(), Method::Delete);
        assert_eq!(req.version(), "1.0");
        assert_eq!(req.uri().query("id"), Some("7"));
        assert_eq!(req.uri().query("tag"), Some("a+b"));
        assert_eq!(req.uri().fragment(), Some("top"));
        assert!(req.headers().is_empty());
    }

    #[test]
    fn parse_version() {
        #[rustfmt::skip]
        let cases = [
            ("GET / HTTP/1.1\r\n\r\n",     Ok("1.1")),
            ("GET / HTTP/1.0\r\n\r\n",     Ok("1.0")),
            ("GET / HTTP/2.0\r\n\r\n",     Ok("2.0")),
            ("GET / HTTP/12.34\r\n\r\n",   Ok("12.34")),

            ("GET / INVALID/0.0\r\n\r\n",  Err(Error::MalformedVersion)),
            ("GET / http/1.1\r\n\r\n",     Err(Error::MalformedVersion)),
            ("GET / HTTP/1\r\n\r\n",       Err(Error::MalformedVersion)),
            ("GET / HTTP/1.\r\n\r\n",      Err(Error::MalformedVersion)),
            ("GET / HTTP/.1\r\n\r\n",      Err(Error::MalformedVersion)),
            ("GET / HTTP/+1.1\r\n\r\n",    Err(Error::MalformedVersion)),
            ("GET / HTTP/1.x\r\n\r\n",     Err(Error::MalformedVersion)),
            ("GET /\r\n\r\n",              Err(Error::MalformedTarget)),
            ("GET / \r\n\r\n",             Err(Error::MalformedVersion)),

            ("GET / HTTP/1.1\n\n",         Err(Error::MissingTerminator)),
            ("GET / HTTP/1.1\r\r",         Err(Error::MissingTerminator)),
            ("GET / HTTP/1.1 \r\n\r\n",    Err(Error::MissingTerminator)),
            ("GET / HTTP/1.1",             Err(Error::MissingTerminator)),
            ("GET / HTTP/1.1\r\n",         Err(Error::MissingTerminator)),
        ];

        for (input, expected) in cases {
            assert_eq!(
                Request::parse(input.as_bytes()).map(|req| req.version()),
                expected,
                "{input:?}"
            );
        }
    }

    #[test]
    fn parse_header() {
        #[rustfmt::skip]
        let cases = [
            ("Header: value\r\n",         Ok(("Header", "value"))),
            ("Header:value\r\n",          Ok(("Header", "value"))),
            ("Header:\t  value  \r\n",    Ok(("Header", "value  "))),
            ("Header: \r\n",              Ok(("Header", ""))),
            ("Header:\r\n",               Ok(("Header", ""))),
            ("X-Json: {\"a\": [1]}\r\n",  Ok(("X-Json", "{\"a\": [1]}"))),
            ("aaaaaaa:+++++++\r\n",       Ok(("aaaaaaa", "+++++++"))),
            ("Enc: a%20b\r\n",            Ok(("Enc", "a%20b"))),
            ("Bare: a\rb\nc\r\n",         Ok(("Bare", "a\rb\nc"))),
            ("Utf: héllo\r\n",            Ok(("Utf", "héllo"))),

            (": value\r\n",               Err(Error::MalformedHeaderLine)),
            ("No-Colon value\r\n",        Err(Error::MalformedHeaderLine)),
            ("Bad Name: value\r\n",       Err(Error::MalformedHeaderLine)),
            ("Bad(Name): value\r\n",      Err(Error::MalformedHeaderLine)),
            ("Name : value\r\n",          Err(Error::MalformedHeaderLine)),
            ("Bad\tName: value\r\n",      Err(Error::MalformedHeaderLine)),
            ("Bad\rName: value\r\n",      Err(Error::MalformedHeaderLine)),
            ("Bad\nName: value\r\n",      Err(Error::MalformedHeaderLine)),
            ("Bad)Name: value\r\n",       Err(Error::MalformedHeaderLine)),
            ("Bad<Name: value\r\n",       Err(Error::MalformedHeaderLine)),
            ("Bad>Name: value\r\n",       Err(Error::MalformedHeaderLine)),
            ("Bad@Name: value\r\n",       Err(Error::MalformedHeaderLine)),
            ("Bad,Name: value\r\n",       Err(Error::MalformedHeaderLine)),
            ("Bad;Name: value\r\n",       Err(Error::MalformedHeaderLine)),
            ("Bad\\Name: value\r\n",      Err(Error::MalformedHeaderLine)),
            ("Bad\"Name: value\r\n",      Err(Error::MalformedHeaderLine)),
            ("Bad/Name: value\r\n",       Err(Error::MalformedHeaderLine)),
            ("Bad[Name: value\r\n",       Err(Error::MalformedHeaderLine)),
            ("Bad]Name: value\r\n",       Err(Error::MalformedHeaderLine)),
            ("Bad?Name: value\r\n",       Err(Error::MalformedHeaderLine)),
            ("Bad=Name: value\r\n",       Err(Error::MalformedHeaderLine)),
            ("Bad{Name: value\r\n",       Err(Error::MalformedHeaderLine)),
            ("Bad}Name: value\r\n",       Err(Error::MalformedHeaderLine)),
            ("Name\r\n",                  Err(Error::MalformedHeaderLine)),
            ("Header: value\n",           Err(Error::MissingTerminator)),
            ("Header: value\r",           Err(Error::MissingTerminator)),
        ];

        for (header, expected) in cases {
            let input = format!("GET / HTTP/1.1\r\n{header}\r\n");
            let result = Request::parse(input.as_bytes()).map(|req| {
                assert_eq!(req.headers().len(), 1);
                req.headers().iter().map(|(k, v)| (*k, *v)).next().unwrap()
            });

            assert_eq!(result, expected, "{input:?}");
        }
    }

    #[test]
    fn parse_headers() {
        #[rustfmt::skip]
        let cases = [
            ("A: 1\r\nB: 2\r\n\r\n",                 Ok(vec![("A", "1"), ("B", "2")])),
            ("Multi: value1\r\nMulti: value2\r\n\r\n", Ok(vec![("Multi", "value2")])),
            ("Host: a\r\nhost: b\r\n\r\n",           Ok(vec![("Host", "a"), ("host", "b")])),
            ("\r\n",                                 Ok(vec![])),

            ("A: 1\r\n",                             Err(Error::MissingTerminator)),
            ("A: 1\r\n\r",                           Err(Error::MalformedHeaderLine)),
            ("A: 1\nB: 2\r\n\r\n",                   Ok(vec![("A", "1\nB: 2")])),
            ("Valid: ok\r\nInvalidname\r\n\r\n",     Err(Error::MalformedHeaderLine)),
            ("A: 1\r\n continued\r\n\r\n",           Err(Error::FoldedHeader)),
            ("A: 1\r\n\tcontinued\r\n\r\n",          Err(Error::FoldedHeader)),
            ("A:\r\n continued\r\n\r\n",             Err(Error::FoldedHeader)),
            (
                "X-SSL-Shenanigans:    -----BEGIN CERTIFICATE-----\r\n\
                 \ttMIIFbTCCBFWgAwIBAgICH4cwDQYJKoZIhvcNAQEFBQAwcDELMAkGA1UEBhMCVUsx\r\n\r\n",
                Err(Error::FoldedHeader),
            ),
        ];

        for (headers, expected) in cases {
            let input = format!("GET / HTTP/1.1\r\n{headers}");
            let result = Request::parse(input.as_bytes());

            match expected {
                Ok(pairs) => {
                    let req = result.unwrap();
                    assert_eq!(req.headers(), &HeaderMap::from_iter(pairs), "{input:?}");
                }
                Err(e) => assert_eq!(result, Err(e), "{input:?}"),
            }
        }
    }

    #[test]
    fn parse_invalid_encoding() {
        #[rustfmt::skip]
        let cases: [&[u8]; 4] = [
            b"GET /\xFF HTTP/1.1\r\n\r\n",
            b"GET /?k=%FF HTTP/1.1\r\n\r\n",
            b"GET / HTTP/1.1\r\nName: \xC3\x28\r\n\r\n",
            b"GET / HTTP/1.1\r\nN\xFFme: value\r\n\r\n",
        ];

        for input in cases {
            assert_eq!(Request::parse(input), Err(Error::InvalidEncoding), "{input:?}");
        }
    }

    #[test]
    fn consumption() {
        let input = b"POST /upload HTTP/1.1\r\nContent-Length: 17\r\n\r\n{\"data\": \"value\"}";
        let head = input.len() - 17;

        let (req, consumed) = Request::parse_prefix(input).unwrap();
        assert_eq!(consumed, head);
        assert_eq!(req.method(), Method::Post);

        assert_eq!(
            Request::parse(input),
            Err(Error::IncompleteConsumption { consumed: head, len: input.len() })
        );
        assert_eq!(Request::parse(&input[..head]), Ok(req));
    }

    #[test]
    fn pipelined() {
        let input = b"GET /a HTTP/1.1\r\n\r\nGET /b HTTP/1.1\r\nHost: x\r\n\r\n";

        let (first, consumed) = Request::parse_prefix(input).unwrap();
        let (second, rest) = Request::parse_prefix(&input[consumed..]).unwrap();

        assert_eq!(first.uri().root(), Some("a"));
        assert_eq!(second.uri().root(), Some("b"));
        assert_eq!(second.header("Host"), Some("x"));
        assert_eq!(consumed + rest, input.len());
    }

    #[test]
    fn header_lookup() {
        let input = b"GET / HTTP/1.1\r\n\
            content-length: 12\r\n\
            Transfer-Encoding: gzip, Chunked\r\n\
            X-Token: abc\r\n\r\n";
        let req = Request::try_from(&input[..]).unwrap();

        assert_eq!(req.header("X-Token"), Some("abc"));
        assert_eq!(req.header("x-token"), None);
        assert_eq!(req.header_ignore_case("x-token"), Some("abc"));
        assert_eq!(req.content_length(), Some(12));
        assert!(req.is_chunked());

        #[rustfmt::skip]
        let cases = [
            ("Content-Length: 0\r\n",                Some(0), false),
            ("Content-Length: 12asd\r\n",            None,    false),
            ("Content-Length: -1\r\n",               None,    false),
            ("Content-Length: \r\n",                 None,    false),
            ("Transfer-Encoding: chunked\r\n",       None,    true),
            ("Transfer-Encoding: chunked, gzip\r\n", None,    false),
            ("Transfer-Encoding: identity\r\n",      None,    false),
        ];

        for (header, length, chunked) in cases {
            let input = format!("GET / HTTP/1.1\r\n{header}\r\n");
            let req = Request::parse(input.as_bytes()).unwrap();

            assert_eq!(req.content_length(), length, "{header:?}");
            assert_eq!(req.is_chunked(), chunked, "{header:?}");
        }
    }

    #[test]
    fn limits() {
        let limits = ReqLimits {
            header_count: 2,
            header_name_size: 4,
            header_value_size: 4,
            ..ReqLimits::default()
        };

        #[rustfmt::skip]
        let cases = [
            ("A: 1\r\nB: 2\r\n\r\n",           Ok(())),
            ("Name: 1234\r\n\r\n",             Ok(())),
            ("A: 1\r\nB: 2\r\nC: 3\r\n\r\n",   Err(Error::TooManyHeaders)),
            ("Names: 1\r\n\r\n",               Err(Error::HeaderTooLarge)),
            ("Name: 12345\r\n\r\n",            Err(Error::HeaderTooLarge)),
            (": 1\r\n\r\n",                    Err(Error::MalformedHeaderLine)),
        ];

        for (headers, expected) in cases {
            let input = format!("GET / HTTP/1.1\r\n{headers}");
            let result = Request::parse_with(input.as_bytes(), &limits).map(|_| ());

            assert_eq!(result, expected, "{input:?}");
        }
    }
}
