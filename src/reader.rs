use crate::errors::LoadError;
use std::io::BufRead;

/// Longest line, in bytes and without its terminator, that is kept whole.
pub const MAX_LINE_LEN: usize = 100;

/// One line of input.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    /// 1-based position in the input, counting every line read.
    pub number: usize,
    /// Line content, cut to [`MAX_LINE_LEN`] bytes.
    pub text: String,
    /// Length of the line as it appeared in the input.
    pub length: usize,
}

impl Line {
    pub fn is_truncated(&self) -> bool {
        self.length > MAX_LINE_LEN
    }
}

/// Splits a byte stream into numbered lines.
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    number: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(MAX_LINE_LEN + 1),
            number: 0,
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<Line, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.inner.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                }
                self.number += 1;

                let length = self.buf.len();
                let kept = &self.buf[..length.min(MAX_LINE_LEN)];
                Some(Ok(Line {
                    number: self.number,
                    text: String::from_utf8_lossy(kept).into_owned(),
                    length,
                }))
            }
            Err(err) => Some(Err(err.into())),
        }
    }
}
