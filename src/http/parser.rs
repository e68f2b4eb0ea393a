use crate::errors::Error;
use memchr::memmem;

/// Forward-only cursor over one input buffer.
///
/// Every grammar rule takes `&mut Parser`, either advances it past what it
/// matched or leaves it where it was, and never moves it backwards past
/// input another rule already accepted.
#[derive(Debug, Clone)]
pub(crate) struct Parser<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    #[inline(always)]
    pub(crate) const fn new(buffer: &'a [u8]) -> Self {
        Parser { buffer, pos: 0 }
    }

    #[inline(always)]
    pub(crate) const fn pos(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    pub(crate) const fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline(always)]
    pub(crate) const fn is_end(&self) -> bool {
        self.pos >= self.len()
    }

    /// Fails with [Error::IncompleteConsumption] unless the whole buffer
    /// has been consumed.
    #[inline]
    pub(crate) fn finish(&self) -> Result<(), Error> {
        match self.is_end() {
            true => Ok(()),
            false => Err(Error::IncompleteConsumption {
                consumed: self.pos,
                len: self.buffer.len(),
            }),
        }
    }
}

// Matching
impl<'a> Parser<'a> {
    #[inline(always)]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.get_byte(self.pos)
    }

    #[inline(always)]
    pub(crate) fn peek_at(&self, offset: usize) -> Option<u8> {
        self.get_byte(self.pos + offset)
    }

    #[inline(always)]
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.buffer[self.pos..]
    }

    #[inline(always)]
    pub(crate) fn advance(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.buffer.len());
    }

    #[inline]
    pub(crate) fn eat(&mut self, byte: u8) -> bool {
        let matched = self.peek() == Some(byte);
        if matched {
            self.pos += 1;
        }
        matched
    }

    #[inline]
    pub(crate) fn eat_slice(&mut self, literal: &[u8]) -> bool {
        let matched = self.rest().starts_with(literal);
        if matched {
            self.pos += literal.len();
        }
        matched
    }

    #[inline(always)]
    pub(crate) fn eat_crlf(&mut self) -> bool {
        self.eat_slice(b"\r\n")
    }

    #[inline(always)]
    pub(crate) fn at_crlf(&self) -> bool {
        self.rest().starts_with(b"\r\n")
    }

    /// Consumes the longest run of bytes accepted by `accept` and returns it
    /// (possibly empty).
    #[inline]
    pub(crate) fn take_while<F: Fn(u8) -> bool>(&mut self, accept: F) -> &'a [u8] {
        let start = self.pos;
        let len = self.rest().iter().take_while(|&&b| accept(b)).count();
        self.pos += len;

        &self.buffer[start..self.pos]
    }

    /// Consumes the longest run of bytes accepted by `accept` only if it is
    /// at least one byte long.
    #[inline]
    pub(crate) fn take_while1<F: Fn(u8) -> bool>(&mut self, accept: F) -> Option<&'a [u8]> {
        let run = self.take_while(accept);
        (!run.is_empty()).then_some(run)
    }

    /// Consumes everything up to (not including) the next `CRLF`.
    /// Leaves the cursor untouched if there is none.
    #[inline]
    pub(crate) fn take_until_crlf(&mut self) -> Option<&'a [u8]> {
        let offset = memmem::find(self.rest(), b"\r\n")?;
        let start = self.pos;
        self.pos += offset;

        Some(&self.buffer[start..self.pos])
    }
}

// Low level
impl<'a> Parser<'a> {
    #[inline(always)]
    pub(crate) fn get_slice(&self, start: usize, end: usize) -> Option<&'a [u8]> {
        self.buffer.get(start..end)
    }

    #[inline(always)]
    fn get_byte(&self, index: usize) -> Option<u8> {
        self.buffer.get(index).copied()
    }
}

/// Borrows `value` as `&str`, or fails with [Error::InvalidEncoding].
#[inline]
pub(crate) fn to_str(value: &[u8]) -> Result<&str, Error> {
    simdutf8::basic::from_utf8(value).map_err(|_| Error::InvalidEncoding)
}
