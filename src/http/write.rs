//! Canonical serialization of parsed requests.

use crate::{Request, Uri};
use percent_encoding::{percent_encode, AsciiSet, CONTROLS};

// Everything the query grammar treats as a delimiter, plus `%` itself so
// literal percent signs survive a round trip. Non-ASCII is always encoded.
const QUERY_TOKEN: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'=');

impl Request<'_> {
    /// Writes the request-line and header block in canonical form.
    ///
    /// Header order follows the map's iteration order. Query keys and values
    /// are re-encoded, so `%7e` comes back as `~` and a literal `%` as `%25`;
    /// parsing the output yields an equal [Request].
    ///
    /// # Examples
    /// ```
    /// use maker_request::Request;
    ///
    /// let req = Request::parse(b"GET /a/b?k=%7e#f HTTP/1.1\r\nHost:   x\r\n\r\n").unwrap();
    ///
    /// let mut buffer = Vec::new();
    /// req.write_to(&mut buffer);
    ///
    /// assert_eq!(buffer, b"GET /a/b?k=~#f HTTP/1.1\r\nHost: x\r\n\r\n");
    /// assert_eq!(Request::parse(&buffer), Ok(req));
    /// ```
    pub fn write_to(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(self.method().as_str().as_bytes());
        buffer.push(b' ');
        self.uri().write_to(buffer);
        buffer.extend_from_slice(b" HTTP/");
        buffer.extend_from_slice(self.version().as_bytes());
        buffer.extend_from_slice(b"\r\n");

        for (name, value) in self.headers() {
            buffer.extend_from_slice(name.as_bytes());
            buffer.extend_from_slice(b": ");
            buffer.extend_from_slice(value.as_bytes());
            buffer.extend_from_slice(b"\r\n");
        }

        buffer.extend_from_slice(b"\r\n");
    }

    /// Same as [write_to](Request::write_to), into a new buffer.
    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.estimated_len());
        self.write_to(&mut buffer);
        buffer
    }

    fn estimated_len(&self) -> usize {
        let headers: usize = self
            .headers()
            .iter()
            .map(|(name, value)| name.len() + value.len() + 4)
            .sum();

        // METHOD SP "/" SP "HTTP/" version CRLF ... CRLF
        self.method().as_str().len() + 64 + self.version().len() + headers
    }
}

impl Uri<'_> {
    /// Writes the target in canonical form, starting with `/`.
    ///
    /// # Examples
    /// ```
    /// use maker_request::Uri;
    ///
    /// let uri = Uri::parse(b"/search?q=a%20b").unwrap();
    ///
    /// let mut buffer = Vec::new();
    /// uri.write_to(&mut buffer);
    /// assert_eq!(buffer, b"/search?q=a%20b");
    /// ```
    pub fn write_to(&self, buffer: &mut Vec<u8>) {
        buffer.push(b'/');

        if let Some(root) = self.root() {
            buffer.extend_from_slice(root.as_bytes());
        }
        if let Some(hierarchy) = self.hierarchy() {
            buffer.push(b'/');
            buffer.extend_from_slice(hierarchy.as_bytes());
        }

        if let Some(queries) = self.queries().filter(|queries| !queries.is_empty()) {
            buffer.push(b'?');

            for (i, (key, value)) in queries.iter().enumerate() {
                if i > 0 {
                    buffer.push(b'&');
                }
                write_encoded(buffer, key);
                buffer.push(b'=');
                write_encoded(buffer, value);
            }
        }

        if let Some(fragment) = self.fragment() {
            buffer.push(b'#');
            buffer.extend_from_slice(fragment.as_bytes());
        }
    }
}

#[inline]
fn write_encoded(buffer: &mut Vec<u8>, token: &str) {
    for chunk in percent_encode(token.as_bytes(), QUERY_TOKEN) {
        buffer.extend_from_slice(chunk.as_bytes());
    }
}
