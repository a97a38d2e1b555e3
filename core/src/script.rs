//! Reader and quoting helpers for the script subset index files are written in.
//!
//! Index files are standalone scripts made of `var name = <literal>;`
//! statements. Literals are strings (single or double quoted), integers,
//! booleans, arrays and objects. Nothing else is evaluated.

use std::fmt;
use thiserror::Error;

/// A parsed literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Bool(bool),
    Array(Vec<Literal>),
    /// Properties in source order.
    Object(Vec<(String, Literal)>),
}

impl Literal {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Literal]> {
        match self {
            Literal::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Integers and booleans both read as flags.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Literal::Int(n) => Some(*n != 0),
            Literal::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Str(_) => "string",
            Literal::Int(_) => "integer",
            Literal::Bool(_) => "boolean",
            Literal::Array(_) => "array",
            Literal::Object(_) => "object",
        }
    }
}

/// One `var name = value;` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub value: Literal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("expected {0}")]
    Expected(&'static str),
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("invalid number")]
    InvalidNumber,
    #[error("unterminated comment")]
    UnterminatedComment,
}

/// Parses every top-level binding of a script.
pub fn parse_script(src: &str) -> Result<Vec<Binding>, ParseError> {
    let mut parser = Parser::new(src);
    let mut bindings = Vec::new();
    loop {
        parser.skip_trivia()?;
        if parser.at_end() {
            break;
        }
        bindings.push(parser.binding()?);
    }
    Ok(bindings)
}

/// Finds the binding called `name`.
pub fn find_binding<'a>(bindings: &'a [Binding], name: &str) -> Option<&'a Literal> {
    bindings.iter().find(|b| b.name == name).map(|b| &b.value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        // A leading byte order mark is not part of the script.
        let pos = if src.starts_with('\u{feff}') { 3 } else { 0 };
        Self { src, pos }
    }

    fn remaining(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        let consumed = &self.src[..self.pos];
        let line = consumed.matches('\n').count() + 1;
        let column = match consumed.rfind('\n') {
            Some(nl) => consumed[nl + 1..].chars().count() + 1,
            None => consumed.chars().count() + 1,
        };
        ParseError { line, column, kind }
    }

    fn unexpected(&self) -> ParseError {
        match self.peek() {
            Some(c) => self.error(ParseErrorKind::UnexpectedChar(c)),
            None => self.error(ParseErrorKind::UnexpectedEof),
        }
    }

    fn expect(&mut self, c: char, what: &'static str) -> Result<(), ParseError> {
        self.skip_trivia()?;
        match self.peek() {
            Some(found) if found == c => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(_) => Err(self.error(ParseErrorKind::Expected(what))),
            None => Err(self.error(ParseErrorKind::UnexpectedEof)),
        }
    }

    fn eat(&mut self, c: char) -> Result<bool, ParseError> {
        self.skip_trivia()?;
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            let rest = self.remaining();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") {
                match trimmed.find('\n') {
                    Some(nl) => self.pos += nl + 1,
                    None => self.pos = self.src.len(),
                }
            } else if trimmed.starts_with("/*") {
                match trimmed[2..].find("*/") {
                    Some(end) => self.pos += end + 4,
                    None => {
                        self.pos = self.src.len();
                        return Err(self.error(ParseErrorKind::UnterminatedComment));
                    }
                }
            } else {
                return Ok(());
            }
        }
    }

    fn identifier(&mut self) -> Option<&'a str> {
        let rest = self.remaining();
        let len = rest
            .char_indices()
            .find(|&(i, c)| {
                !(c == '_' || c == '$' || c.is_alphabetic() || (i > 0 && c.is_ascii_digit()))
            })
            .map_or(rest.len(), |(i, _)| i);
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    fn binding(&mut self) -> Result<Binding, ParseError> {
        let keyword = self.identifier();
        let name = match keyword {
            Some("var") | Some("let") | Some("const") => {
                self.skip_trivia()?;
                self.identifier()
                    .ok_or_else(|| self.error(ParseErrorKind::Expected("identifier")))?
            }
            // Bare `name = value;` assignment.
            Some(name) => name,
            None => return Err(self.unexpected()),
        };
        self.expect('=', "'='")?;
        let value = self.literal()?;
        self.eat(';')?;
        Ok(Binding {
            name: name.to_string(),
            value,
        })
    }

    fn literal(&mut self) -> Result<Literal, ParseError> {
        self.skip_trivia()?;
        match self.peek() {
            Some('[') => self.array(),
            Some('{') => self.object(),
            Some(q @ ('\'' | '"')) => self.string(q).map(Literal::Str),
            Some(c) if c == '-' || c.is_ascii_digit() => self.integer().map(Literal::Int),
            Some(_) => match self.identifier() {
                Some("true") => Ok(Literal::Bool(true)),
                Some("false") => Ok(Literal::Bool(false)),
                Some(_) => Err(self.error(ParseErrorKind::Expected("literal"))),
                None => Err(self.unexpected()),
            },
            None => Err(self.error(ParseErrorKind::UnexpectedEof)),
        }
    }

    fn array(&mut self) -> Result<Literal, ParseError> {
        self.expect('[', "'['")?;
        let mut items = Vec::new();
        loop {
            if self.eat(']')? {
                break;
            }
            items.push(self.literal()?);
            if self.eat(',')? {
                continue;
            }
            self.expect(']', "',' or ']'")?;
            break;
        }
        Ok(Literal::Array(items))
    }

    fn object(&mut self) -> Result<Literal, ParseError> {
        self.expect('{', "'{'")?;
        let mut props = Vec::new();
        loop {
            if self.eat('}')? {
                break;
            }
            let name = self.property_name()?;
            self.expect(':', "':'")?;
            props.push((name, self.literal()?));
            if self.eat(',')? {
                continue;
            }
            self.expect('}', "',' or '}'")?;
            break;
        }
        Ok(Literal::Object(props))
    }

    fn property_name(&mut self) -> Result<String, ParseError> {
        self.skip_trivia()?;
        match self.peek() {
            Some(q @ ('\'' | '"')) => self.string(q),
            Some(c) if c.is_ascii_digit() => self.integer().map(|n| n.to_string()),
            _ => self
                .identifier()
                .map(str::to_string)
                .ok_or_else(|| self.unexpected()),
        }
    }

    fn integer(&mut self) -> Result<i64, ParseError> {
        let rest = self.remaining();
        let sign = usize::from(rest.starts_with('-'));
        let digits = rest[sign..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        let text = &rest[..sign + digits];
        let value = text
            .parse()
            .map_err(|_| self.error(ParseErrorKind::InvalidNumber))?;
        self.pos += text.len();
        Ok(value)
    }

    fn string(&mut self, quote: char) -> Result<String, ParseError> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error(ParseErrorKind::UnexpectedEof)),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => self.escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), ParseError> {
        let c = self
            .bump()
            .ok_or_else(|| self.error(ParseErrorKind::UnexpectedEof))?;
        match c {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            'x' => {
                let code = self.hex_digits(2)?;
                let c = char::from_u32(code)
                    .ok_or_else(|| self.error(ParseErrorKind::InvalidEscape))?;
                out.push(c);
            }
            'u' => {
                let code = self.hex_digits(4)?;
                let c = if (0xd800..0xdc00).contains(&code) {
                    // High surrogate; the low half must follow as another \u escape.
                    if !self.remaining().starts_with("\\u") {
                        return Err(self.error(ParseErrorKind::InvalidEscape));
                    }
                    self.pos += 2;
                    let low = self.hex_digits(4)?;
                    if !(0xdc00..0xe000).contains(&low) {
                        return Err(self.error(ParseErrorKind::InvalidEscape));
                    }
                    char::from_u32(0x10000 + ((code - 0xd800) << 10) + (low - 0xdc00))
                } else {
                    char::from_u32(code)
                };
                out.push(c.ok_or_else(|| self.error(ParseErrorKind::InvalidEscape))?);
            }
            // Line continuation.
            '\n' => {}
            other => out.push(other),
        }
        Ok(())
    }

    fn hex_digits(&mut self, count: usize) -> Result<u32, ParseError> {
        let digits = self
            .remaining()
            .get(..count)
            .filter(|d| d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| self.error(ParseErrorKind::InvalidEscape))?;
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| self.error(ParseErrorKind::InvalidEscape))?;
        self.pos += count;
        Ok(value)
    }
}

/// Writes `s` as a single-quoted script string.
pub fn write_single_quoted(out: &mut impl fmt::Write, s: &str) -> fmt::Result {
    out.write_char('\'')?;
    for c in s.chars() {
        match c {
            '\'' => out.write_str("\\'")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if c.is_control() => write!(out, "\\u{:04x}", c as u32)?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('\'')
}

#[cfg(test)]
mod tests;
