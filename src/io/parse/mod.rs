//! Line-based parsing helpers shared by the text formats.
//!
//! A file is read line by line. Everything from a `#` to the end of the line
//! is a comment. Lines that are empty after removing comments and
//! surrounding whitespace are skipped. The remaining lines are split at
//! whitespace into [`Record`]s: a keyword and a list of fields.

use std::{io::BufRead, str::FromStr};

use crate::error::{Error, Result, Span};


/// Yields the records of a text file one by one.
#[derive(Debug)]
pub(crate) struct Lines<R: BufRead> {
    reader: R,
    raw: Vec<u8>,
    text: String,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            raw: Vec::new(),
            text: String::new(),
            line: 0,
        }
    }

    /// The number of lines read so far.
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// Returns the next non-empty record or `None` at EOF.
    pub(crate) fn next_record(&mut self) -> Result<Option<Record<'_>>> {
        loop {
            self.raw.clear();
            if self.reader.read_until(b'\n', &mut self.raw)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            self.text.clear();
            match std::str::from_utf8(&self.raw) {
                Ok(s) => self.text.push_str(s),
                Err(e) => {
                    let msg = format!("invalid UTF-8: {}", e);
                    return Err(Error::parse(Span::line(self.line), msg));
                }
            }

            if !strip_comment(&self.text).trim().is_empty() {
                break;
            }
        }

        let mut tokens = strip_comment(&self.text).split_whitespace();
        let keyword = tokens.next().unwrap_or("");
        Ok(Some(Record {
            line: self.line,
            keyword,
            fields: tokens.collect(),
        }))
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// One line of a text file split into keyword and fields.
#[derive(Debug, Clone)]
pub(crate) struct Record<'a> {
    pub(crate) line: usize,
    pub(crate) keyword: &'a str,
    pub(crate) fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    pub(crate) fn span(&self) -> Span {
        Span::line(self.line)
    }

    /// The span of the field with the given index (0-based into `fields`).
    /// The keyword is field 0 in spans, so the first field is 1.
    pub(crate) fn field_span(&self, idx: usize) -> Span {
        Span::field(self.line, idx + 1)
    }

    pub(crate) fn error(&self, msg: impl Into<String>) -> Error {
        Error::parse(self.span(), msg)
    }

    /// Fails if the number of fields is not within `min..=max`.
    pub(crate) fn expect_fields(&self, min: usize, max: usize) -> Result<()> {
        let n = self.fields.len();
        if n < min || n > max {
            let expected = if min == max {
                min.to_string()
            } else {
                format!("{} to {}", min, max)
            };
            return Err(self.error(format!(
                "'{}' expects {} fields, found {}",
                self.keyword,
                expected,
                n,
            )));
        }

        Ok(())
    }

    /// For formats without keywords: the keyword is token 0, the fields
    /// follow. Token `i` has the span field `i`.
    pub(crate) fn token(&self, idx: usize) -> Option<&'a str> {
        if idx == 0 {
            Some(self.keyword)
        } else {
            self.fields.get(idx - 1).copied()
        }
    }

    pub(crate) fn num_tokens(&self) -> usize {
        self.fields.len() + 1
    }

    /// Parses a token with `FromStr`. `what` names the expected kind of
    /// value for the error message.
    pub(crate) fn parse_token<T: FromStr>(&self, idx: usize, what: &str) -> Result<T> {
        let span = Span::field(self.line, idx);
        let s = self.token(idx).ok_or_else(|| {
            Error::parse(span, format!("expected {}, found end of line", what))
        })?;

        s.parse::<T>().map_err(|_| Error::parse(span, format!("expected {}, found '{}'", what, s)))
    }

    /// Parses a token as finite float.
    pub(crate) fn float_token(&self, idx: usize) -> Result<f32> {
        let v = self.parse_token::<f32>(idx, "float")?;
        if !v.is_finite() {
            return Err(Error::parse(
                Span::field(self.line, idx),
                format!("expected finite float, found '{}'", v),
            ));
        }

        Ok(v)
    }

    /// Parses a field as finite float.
    pub(crate) fn float(&self, idx: usize) -> Result<f32> {
        self.float_token(idx + 1)
    }

    pub(crate) fn vec2(&self, start: usize) -> Result<[f32; 2]> {
        Ok([self.float(start)?, self.float(start + 1)?])
    }

    pub(crate) fn vec3(&self, start: usize) -> Result<[f32; 3]> {
        Ok([self.float(start)?, self.float(start + 1)?, self.float(start + 2)?])
    }
}
