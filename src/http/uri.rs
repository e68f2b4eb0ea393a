use crate::{
    errors::Error,
    http::parser::{to_str, Parser},
    limits::ReqLimits,
    query::{Query, QueryMap},
};
use memchr::{memchr, memchr2};

/// A parsed origin-form request target.
///
/// # Components
///
/// For `/cjgdev/http_parser/api/q?text=ushers#1`:
///
/// - **Root**: first path segment (`cjgdev`)
/// - **Hierarchy**: rest of the path after the next `/` (`http_parser/api/q`)
/// - **Queries**: percent-decoded `key=value` pairs (`{"text": "ushers"}`)
/// - **Fragment**: everything after `#` (`1`)
///
/// Each component is independently optional. A component is absent when its
/// delimiter is missing or nothing follows it; it is never `Some("")`.
///
/// # Grammar
///
/// ```text
/// target    = "/" [root] ["/" hierarchy] ["?" query] ["#" fragment]
/// root      = 1*(char NOT IN "/?# ")
/// hierarchy = 1*(char NOT IN "?# ")
/// query     = pair *("&" pair)        ; see Query
/// fragment  = 1*(char NOT IN " ")
/// ```
///
/// When a delimiter is not followed by its content (`/a/`, `/a?`, `/a#`),
/// the component is absent and the delimiter is left unconsumed, so
/// [Uri::parse] reports [Error::IncompleteConsumption] while
/// [Uri::parse_prefix] stops right before it. A `?` followed by something
/// that is not a pair list is [Error::MalformedQuery].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Uri<'a> {
    pub(crate) root: Option<&'a str>,
    pub(crate) hierarchy: Option<&'a str>,
    pub(crate) queries: Option<QueryMap<'a>>,
    pub(crate) fragment: Option<&'a str>,
}

impl<'a> Uri<'a> {
    /// Parses an entire request target.
    ///
    /// # Examples
    /// ```
    /// use maker_request::Uri;
    ///
    /// let uri = Uri::parse(b"/cjgdev/http_parser/api/q?text=ushers#1").unwrap();
    ///
    /// assert_eq!(uri.root(), Some("cjgdev"));
    /// assert_eq!(uri.hierarchy(), Some("http_parser/api/q"));
    /// assert_eq!(uri.query("text"), Some("ushers"));
    /// assert_eq!(uri.fragment(), Some("1"));
    /// ```
    #[inline]
    pub fn parse(src: &'a [u8]) -> Result<Self, Error> {
        Self::parse_with(src, &ReqLimits::default())
    }

    /// Like [Uri::parse], with caps on target size and query pairs.
    pub fn parse_with(src: &'a [u8], limits: &ReqLimits) -> Result<Self, Error> {
        let mut p = Parser::new(src);
        let uri = parse(&mut p, limits)?;
        p.finish()?;

        Ok(uri)
    }

    /// Parses a request target at the start of `src` and returns it with the
    /// number of bytes consumed.
    ///
    /// # Examples
    /// ```
    /// use maker_request::Uri;
    ///
    /// let (uri, consumed) = Uri::parse_prefix(b"/index.html HTTP/1.1").unwrap();
    /// assert_eq!(uri.root(), Some("index.html"));
    /// assert_eq!(consumed, 11);
    /// ```
    #[inline]
    pub fn parse_prefix(src: &'a [u8]) -> Result<(Self, usize), Error> {
        let mut p = Parser::new(src);
        let uri = parse(&mut p, &ReqLimits::default())?;

        Ok((uri, p.pos()))
    }
}

pub(crate) fn parse<'a>(p: &mut Parser<'a>, limits: &ReqLimits) -> Result<Uri<'a>, Error> {
    // No component reaches past the first space
    let span = memchr(b' ', p.rest()).unwrap_or(p.rest().len());
    if span > limits.target_size {
        return Err(Error::TargetTooLarge);
    }

    if !p.eat(b'/') {
        return Err(Error::MissingLeadingSlash);
    }

    let mut uri = Uri::default();

    if let Some(root) = p.take_while1(|b| !matches!(b, b'/' | b'?' | b'#' | b' ')) {
        uri.root = Some(to_str(root)?);
    }

    if p.peek() == Some(b'/') && p.peek_at(1).is_some_and(is_hierarchy) {
        p.advance(1);
        uri.hierarchy = p.take_while1(is_hierarchy).map(to_str).transpose()?;
    }

    if p.peek() == Some(b'?') {
        let query = &p.rest()[1..];
        let end = memchr2(b'#', b' ', query).unwrap_or(query.len());

        if end > 0 {
            uri.queries = Some(Query::parse(&query[..end], limits.query_parts)?);
            p.advance(1 + end);
        }
    }

    if p.peek() == Some(b'#') && p.peek_at(1).is_some_and(|b| b != b' ') {
        p.advance(1);
        uri.fragment = p.take_while1(|b| b != b' ').map(to_str).transpose()?;
    }

    Ok(uri)
}

#[inline(always)]
fn is_hierarchy(byte: u8) -> bool {
    !matches!(byte, b'?' | b'#' | b' ')
}

// Public API
impl<'a> Uri<'a> {
    /// Returns the first path segment, if any.
    ///
    /// For `/api/users/123`: `Some("api")`. For `/` and `/?q=1`: `None`.
    #[inline(always)]
    pub const fn root(&self) -> Option<&'a str> {
        self.root
    }

    /// Returns the path after the root segment and its trailing `/`.
    ///
    /// For `/api/users/123`: `Some("users/123")`. For `/api`: `None`.
    #[inline(always)]
    pub const fn hierarchy(&self) -> Option<&'a str> {
        self.hierarchy
    }

    /// Returns the decoded query pairs, if the target had a query.
    #[inline(always)]
    pub const fn queries(&self) -> Option<&QueryMap<'a>> {
        self.queries.as_ref()
    }

    /// Returns the decoded value for the specified query key.
    ///
    /// Performs case-sensitive lookup on the decoded key.
    #[inline]
    pub fn query(&self, key: &str) -> Option<&str> {
        self.queries.as_ref()?.get(key).map(|value| &**value)
    }

    /// Returns the fragment, without the leading `#`.
    #[inline(always)]
    pub const fn fragment(&self) -> Option<&'a str> {
        self.fragment
    }

    /// Iterates over the non-empty path segments: the root, then the
    /// hierarchy split on `/`.
    ///
    /// # Examples
    /// ```
    /// use maker_request::Uri;
    ///
    /// let uri = Uri::parse(b"/api/users//123/").unwrap();
    /// let segments: Vec<&str> = uri.path_segments().collect();
    ///
    /// assert_eq!(segments, ["api", "users", "123"]);
    /// ```
    pub fn path_segments(&self) -> impl Iterator<Item = &'a str> {
        let rest = self.hierarchy.into_iter().flat_map(|h| h.split('/'));

        self.root
            .into_iter()
            .chain(rest)
            .filter(|segment| !segment.is_empty())
    }
}
