//! Lenient markup lexer.
//!
//! This is not an HTML parser. It walks the text once and splits it into
//! the attributes of start tags and the plain text between markup. Comments,
//! closing tags and declarations (`<!DOCTYPE>`, `<?xml?>`) are skipped and
//! never reported.
//!
//! Malformed input never fails:
//!
//! - an unterminated quoted value runs to the end of the text
//! - a `<` inside a tag starts a new tag
//! - a `<` not followed by a letter, `/`, `!` or `?` is plain text
//! - stray quotes and `=` inside a tag are skipped

use std::ops::Range;

/// The value of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttributeValue<'a> {
    /// The value without its quotes.
    pub(crate) text: &'a str,
    pub(crate) range: Range<usize>,
    /// True for a value enclosed in matching quotes.
    pub(crate) quoted: bool,
}

/// An attribute inside a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attribute<'a> {
    pub(crate) name: &'a str,
    pub(crate) range: Range<usize>,
    /// True when an `=` follows the name, even if no value follows it.
    pub(crate) has_value: bool,
    pub(crate) value: Option<AttributeValue<'a>>,
}

/// A region of the text reported by [`MarkupLexer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Region<'a> {
    Attribute(Attribute<'a>),
    /// Text outside any tag, comment or declaration.
    Text { text: &'a str, start: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    Tag,
}

/// Iterator over the regions of a text, in source order.
pub(crate) struct MarkupLexer<'a> {
    src: &'a str,
    pos: usize,
    state: State,
}

fn is_name_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'=' | b'>' | b'/' | b'"' | b'\'' | b'<')
}

impl<'a> MarkupLexer<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            state: State::Text,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn find_from(&self, from: usize, needle: &str) -> Option<usize> {
        self.src.get(from..)?.find(needle).map(|i| from + i)
    }

    /// Returns the position just past `needle`, or the end of the text.
    fn skip_past(&self, from: usize, needle: &str) -> usize {
        match self.find_from(from, needle) {
            Some(at) => at + needle.len(),
            None => self.src.len(),
        }
    }

    /// Consumes plain text up to the next markup construct.
    ///
    /// Returns the text consumed, which may be empty. Afterwards the lexer
    /// is either inside a start tag, past a skipped construct, or at the
    /// end of the text.
    fn take_text(&mut self) -> Range<usize> {
        let bytes = self.bytes();
        let start = self.pos;
        let mut search = self.pos;

        loop {
            let Some(lt) = self.find_from(search, "<") else {
                self.pos = bytes.len();
                return start..bytes.len();
            };

            if self.src[lt..].starts_with("<!--") {
                self.pos = self.skip_past(lt + 4, "-->");
                return start..lt;
            }

            match bytes.get(lt + 1) {
                Some(b) if b.is_ascii_alphabetic() => {
                    // Skip the tag name
                    let mut end = lt + 1;
                    while end < bytes.len() && !is_name_delimiter(bytes[end]) {
                        end += 1;
                    }
                    self.pos = end;
                    self.state = State::Tag;
                    return start..lt;
                }
                Some(b'/' | b'!' | b'?') => {
                    self.pos = self.skip_past(lt + 2, ">");
                    return start..lt;
                }
                _ => search = lt + 1,
            }
        }
    }

    /// Returns the next attribute of the current tag, or `None` once the tag
    /// is closed or the text ends.
    fn next_in_tag(&mut self) -> Option<Attribute<'a>> {
        let bytes = self.bytes();
        loop {
            self.skip_whitespace();
            let Some(&b) = bytes.get(self.pos) else {
                self.state = State::Text;
                return None;
            };

            match b {
                b'>' => {
                    self.pos += 1;
                    self.state = State::Text;
                    return None;
                }
                b'<' => {
                    self.state = State::Text;
                    return None;
                }
                b'/' | b'=' => self.pos += 1,
                b'"' | b'\'' => {
                    let quote = if b == b'"' { "\"" } else { "'" };
                    self.pos = self.skip_past(self.pos + 1, quote);
                }
                _ => {
                    let start = self.pos;
                    while self.pos < bytes.len() && !is_name_delimiter(bytes[self.pos]) {
                        self.pos += 1;
                    }
                    let range = start..self.pos;

                    let mut peek = self.pos;
                    while peek < bytes.len() && bytes[peek].is_ascii_whitespace() {
                        peek += 1;
                    }
                    let has_value = bytes.get(peek) == Some(&b'=');
                    let value = if has_value {
                        self.pos = peek + 1;
                        self.take_value()
                    } else {
                        None
                    };

                    return Some(Attribute {
                        name: &self.src[range.clone()],
                        range,
                        has_value,
                        value,
                    });
                }
            }
        }
    }

    /// Consumes the value following an `=`.
    fn take_value(&mut self) -> Option<AttributeValue<'a>> {
        let bytes = self.bytes();
        self.skip_whitespace();

        match bytes.get(self.pos) {
            Some(&quote @ (b'"' | b'\'')) => {
                let start = self.pos + 1;
                let needle = if quote == b'"' { "\"" } else { "'" };
                let (end, quoted) = match self.find_from(start, needle) {
                    Some(close) => (close, true),
                    None => (bytes.len(), false),
                };
                self.pos = if quoted { end + 1 } else { end };
                Some(AttributeValue {
                    text: &self.src[start..end],
                    range: start..end,
                    quoted,
                })
            }
            // `<a href=>` has no value at all
            Some(b'>') | None => None,
            Some(_) => {
                let start = self.pos;
                while self.pos < bytes.len()
                    && !bytes[self.pos].is_ascii_whitespace()
                    && bytes[self.pos] != b'>'
                {
                    self.pos += 1;
                }
                Some(AttributeValue {
                    text: &self.src[start..self.pos],
                    range: start..self.pos,
                    quoted: false,
                })
            }
        }
    }
}

impl<'a> Iterator for MarkupLexer<'a> {
    type Item = Region<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.pos >= self.src.len() {
                return None;
            }

            match self.state {
                State::Text => {
                    let text = self.take_text();
                    if !text.is_empty() {
                        return Some(Region::Text {
                            text: &self.src[text.clone()],
                            start: text.start,
                        });
                    }
                }
                State::Tag => {
                    if let Some(attr) = self.next_in_tag() {
                        return Some(Region::Attribute(attr));
                    }
                }
            }
        }
    }
}
