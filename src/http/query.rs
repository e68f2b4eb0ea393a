//! Percent-decoding URL query string parser with flexible collection support.

use crate::{errors::Error, http::parser::Parser};
use percent_encoding::percent_decode;
use std::{borrow::Cow, collections::HashMap};

/// Decoded query pairs, keyed by decoded key. Later duplicates win.
pub type QueryMap<'a> = HashMap<Cow<'a, str>, Cow<'a, str>>;

/// URL query string parser.
///
/// Parses `key=value` pairs separated by `&`. Keys and values are one or more
/// characters, each either `%XX` (two hex digits, any case, decoded to that
/// byte) or a literal character other than `=`, `&`, `#` and space. A `%`
/// that is not followed by two hex digits stays a literal `%`, and `+` is
/// never turned into a space.
///
/// Tokens borrow from the input and only allocate when percent-decoding
/// changed them.
///
/// # Examples
/// ```rust
/// use maker_request::query::{Query, QueryMap};
/// use std::borrow::Cow;
///
/// let map: QueryMap = Query::parse(b"of=life%20the%20universe&and=everything", 10).unwrap();
/// assert_eq!(map["of"], "life the universe");
/// assert_eq!(map["and"], "everything");
///
/// // Keep order and duplicates with a Vec
/// let pairs: Vec<(Cow<str>, Cow<str>)> = Query::parse(b"a=1&a=2", 10).unwrap();
/// assert_eq!(pairs.len(), 2);
///
/// // Every key and every value needs at least one character
/// assert!(Query::parse::<QueryMap>(b"flag&empty=", 10).is_err());
/// ```
pub struct Query;

impl Query {
    /// Parses an entire query string into a new collection.
    ///
    /// The whole input must be a `pair ("&" pair)*` list (or empty);
    /// nothing is returned for input that only partly matches.
    ///
    /// # Type Parameters
    /// - `C`: Collection type implementing [QueryCollector]
    ///
    /// # Arguments
    /// - `query`: Raw bytes of the query string, without the leading `?`
    /// - `limit`: Maximum number of pairs to parse
    ///
    /// # Errors
    /// - [Error::MalformedQuery]: the input is not a pair list
    /// - [Error::QueryOverLimit]: more than `limit` pairs
    /// - [Error::InvalidEncoding]: a token is not UTF-8 once decoded
    ///
    /// # Examples
    /// ```
    /// use maker_request::{query::{Query, QueryMap}, Error};
    ///
    /// let params: QueryMap = Query::parse(b"key=1&key=2", 10).unwrap();
    /// assert_eq!(params["key"], "2"); // only last value remains
    ///
    /// let result = Query::parse::<QueryMap>(b"a=1&b=2&c=3", 2);
    /// assert_eq!(result, Err(Error::QueryOverLimit(2)));
    /// ```
    #[inline]
    pub fn parse<'a, C: QueryCollector<'a>>(query: &'a [u8], limit: usize) -> Result<C, Error> {
        let mut result = C::with_capacity(limit.min(query.len() / 4 + 1));
        let mut p = Parser::new(query);

        Self::parse_pairs(&mut p, &mut result, limit)?;
        p.finish().map_err(|_| Error::MalformedQuery)?;

        Ok(result)
    }

    fn parse_pairs<'a, C: QueryCollector<'a>>(
        p: &mut Parser<'a>,
        result: &mut C,
        limit: usize,
    ) -> Result<(), Error> {
        if p.is_end() {
            return Ok(());
        }

        let mut count = 0;
        loop {
            if count >= limit {
                return Err(Error::QueryOverLimit(limit));
            }

            let key = Self::token(p)?.ok_or(Error::MalformedQuery)?;
            if !p.eat(b'=') {
                return Err(Error::MalformedQuery);
            }
            let value = Self::token(p)?.ok_or(Error::MalformedQuery)?;

            result.add_param(key, value);
            count += 1;

            if !p.eat(b'&') {
                return Ok(());
            }
        }
    }

    /// One key or value, percent-decoded. `Ok(None)` when not even one
    /// character matched.
    fn token<'a>(p: &mut Parser<'a>) -> Result<Option<Cow<'a, str>>, Error> {
        let Some(raw) = p.take_while1(|b| !matches!(b, b'=' | b'&' | b'#' | b' ')) else {
            return Ok(None);
        };

        percent_decode(raw)
            .decode_utf8()
            .map(Some)
            .map_err(|_| Error::InvalidEncoding)
    }
}

/// A trait for types that can collect parsed query parameters.
///
/// # Lifetime
/// - `'a`: The lifetime of the input query string bytes
///
/// # Examples
/// ```rust
/// use maker_request::query::{Query, QueryCollector};
/// use std::borrow::Cow;
///
/// struct Keys(Vec<String>);
///
/// impl<'a> QueryCollector<'a> for Keys {
///     fn add_param(&mut self, key: Cow<'a, str>, _: Cow<'a, str>) {
///         self.0.push(key.into_owned());
///     }
///
///     fn with_capacity(capacity: usize) -> Self {
///         Keys(Vec::with_capacity(capacity))
///     }
/// }
///
/// let keys: Keys = Query::parse(b"a=1&b=2", 10).unwrap();
/// assert_eq!(keys.0, ["a", "b"]);
/// ```
pub trait QueryCollector<'a>
where
    Self: Sized,
{
    /// Adds a decoded parameter to the collection.
    fn add_param(&mut self, key: Cow<'a, str>, value: Cow<'a, str>);

    /// Creates a new collection with the specified capacity.
    fn with_capacity(capacity: usize) -> Self;
}

// Preserves parameter order and duplicates
impl<'a> QueryCollector<'a> for Vec<(Cow<'a, str>, Cow<'a, str>)> {
    #[inline(always)]
    fn add_param(&mut self, key: Cow<'a, str>, value: Cow<'a, str>) {
        self.push((key, value));
    }

    #[inline(always)]
    fn with_capacity(capacity: usize) -> Self {
        Vec::with_capacity(capacity)
    }
}

// Deduplicates parameters (last wins)
impl<'a> QueryCollector<'a> for QueryMap<'a> {
    #[inline(always)]
    fn add_param(&mut self, key: Cow<'a, str>, value: Cow<'a, str>) {
        self.insert(key, value);
    }

    #[inline(always)]
    fn with_capacity(capacity: usize) -> Self {
        HashMap::with_capacity(capacity)
    }
}
