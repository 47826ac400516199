//! Scanning record data from zone file text.
//!
//! The [`Tokenizer`] splits the text of a zone file entry into tokens. It
//! understands whitespace, comments, parentheses for continuing an entry
//! across lines, quoted strings, and backslash escapes. Escape sequences are
//! kept in the token text so that record types can decide how to interpret
//! them. [`Symbol`] decodes them.
//!
//! The [`ScanContext`] holds the origin and relativization settings that
//! apply to domain names found in the text.

use super::name::{Name, NameError};
use bytes::Bytes;
use core::{fmt, str};
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

//------------ Token ---------------------------------------------------------

/// A token of a zone file entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Token {
    /// A sequence of non-space characters, escape sequences included.
    Identifier(String),

    /// The content of a quoted string, escape sequences included.
    QuotedString(String),

    /// The end of the line.
    Eol,

    /// The end of the input.
    Eof,
}

impl Token {
    /// Returns whether the token ends the entry.
    #[must_use]
    pub fn is_eol_or_eof(&self) -> bool {
        matches!(self, Token::Eol | Token::Eof)
    }

    /// Returns whether the token is the given identifier.
    #[must_use]
    pub fn is_identifier(&self, ident: &str) -> bool {
        matches!(self, Token::Identifier(s) if s == ident)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Identifier(s) => f.write_str(s),
            Token::QuotedString(s) => write!(f, "\"{}\"", s),
            Token::Eol => f.write_str("end of line"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}

//------------ Tokenizer -----------------------------------------------------

/// A tokenizer for zone file text.
///
/// Inside parentheses, line breaks are treated as white space. Outside of
/// them, a line break produces [`Token::Eol`]. A single token can be pushed
/// back via [`unget`][Self::unget].
pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    parens: usize,
    ungotten: Option<Token>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Tokenizer {
            chars: text.chars().peekable(),
            line: 1,
            parens: 0,
            ungotten: None,
        }
    }

    /// Returns the current line number starting at 1.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Creates a syntax error for the current position.
    pub fn error(&self, msg: impl Into<String>) -> SyntaxError {
        SyntaxError::new(msg, self.line)
    }

    /// Returns the next token.
    pub fn get(&mut self) -> Result<Token, SyntaxError> {
        if let Some(token) = self.ungotten.take() {
            return Ok(token);
        }
        loop {
            let ch = match self.chars.peek() {
                Some(&ch) => ch,
                None => {
                    if self.parens > 0 {
                        return Err(self.error("unbalanced parentheses"));
                    }
                    return Ok(Token::Eof);
                }
            };
            match ch {
                '\n' => {
                    self.chars.next();
                    self.line += 1;
                    if self.parens == 0 {
                        return Ok(Token::Eol);
                    }
                }
                ';' => {
                    while let Some(&ch) = self.chars.peek() {
                        if ch == '\n' {
                            break;
                        }
                        self.chars.next();
                    }
                }
                '(' => {
                    self.chars.next();
                    self.parens += 1;
                }
                ')' => {
                    self.chars.next();
                    self.parens = self
                        .parens
                        .checked_sub(1)
                        .ok_or_else(|| self.error("unbalanced parentheses"))?;
                }
                '"' => {
                    self.chars.next();
                    return self.quoted_string();
                }
                ch if ch.is_whitespace() => {
                    self.chars.next();
                }
                _ => return self.identifier(),
            }
        }
    }

    fn quoted_string(&mut self) -> Result<Token, SyntaxError> {
        let mut res = String::new();
        loop {
            match self.chars.next() {
                Some('"') => return Ok(Token::QuotedString(res)),
                Some('\\') => {
                    res.push('\\');
                    match self.chars.next() {
                        Some(ch) => res.push(ch),
                        None => break,
                    }
                }
                Some('\n') => {
                    return Err(self.error("line break in quoted string"));
                }
                Some(ch) => res.push(ch),
                None => break,
            }
        }
        Err(self.error("unterminated quoted string"))
    }

    fn identifier(&mut self) -> Result<Token, SyntaxError> {
        let mut res = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() || matches!(ch, '(' | ')' | ';' | '"') {
                break;
            }
            self.chars.next();
            res.push(ch);
            if ch == '\\' {
                match self.chars.next() {
                    Some(ch) => res.push(ch),
                    None => return Err(self.error("incomplete escape sequence")),
                }
            }
        }
        Ok(Token::Identifier(res))
    }

    /// Pushes a token back so it is returned by the next call to `get`.
    ///
    /// Only one token can be pushed back.
    pub fn unget(&mut self, token: Token) -> Result<(), SyntaxError> {
        if self.ungotten.is_some() {
            return Err(self.error("tokenizer already has a pushed back token"));
        }
        self.ungotten = Some(token);
        Ok(())
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> Result<&Token, SyntaxError> {
        if self.ungotten.is_none() {
            let token = self.get()?;
            self.ungotten = Some(token);
        }
        match self.ungotten.as_ref() {
            Some(token) => Ok(token),
            None => Err(self.error("tokenizer lost its pushed back token")),
        }
    }

    /// Returns the next token which must be an identifier.
    pub fn get_identifier(&mut self) -> Result<String, SyntaxError> {
        match self.get()? {
            Token::Identifier(s) => Ok(s),
            token => Err(self.error(format!("expected identifier, found {}", token))),
        }
    }

    /// Returns the next token converted into an integer.
    pub fn get_int<T: str::FromStr>(&mut self) -> Result<T, SyntaxError> {
        let ident = self.get_identifier()?;
        if !ident.bytes().all(|ch| ch.is_ascii_digit()) {
            return Err(self.error(format!("expected integer, found {}", ident)));
        }
        ident
            .parse()
            .map_err(|_| self.error(format!("integer out of range: {}", ident)))
    }

    pub fn get_u8(&mut self) -> Result<u8, SyntaxError> {
        self.get_int()
    }

    pub fn get_u16(&mut self) -> Result<u16, SyntaxError> {
        self.get_int()
    }

    pub fn get_u32(&mut self) -> Result<u32, SyntaxError> {
        self.get_int()
    }

    /// Returns the next identifier or quoted string with escapes decoded.
    pub fn get_string(&mut self) -> Result<Bytes, SyntaxError> {
        let raw = match self.get()? {
            Token::Identifier(s) | Token::QuotedString(s) => s,
            token => {
                return Err(self.error(format!("expected string, found {}", token)))
            }
        };
        unescape(&raw)
            .map(Bytes::from)
            .map_err(|err| self.error(err.to_string()))
    }

    /// Returns the next token as a domain name processed by `ctx`.
    pub fn get_name(&mut self, ctx: &ScanContext) -> Result<Name, SyntaxError> {
        let ident = self.get_identifier()?;
        let name = ident
            .parse::<Name>()
            .map_err(|err| self.error(format!("{}: {}", err, ident)))?;
        ctx.process_name(name)
            .map_err(|err| self.error(format!("{}: {}", err, ident)))
    }

    /// Returns all remaining identifiers of the entry concatenated.
    ///
    /// Consumes the end of line token.
    pub fn concat_remaining(&mut self) -> Result<String, SyntaxError> {
        let mut res = String::new();
        loop {
            match self.get()? {
                Token::Identifier(s) => res.push_str(&s),
                Token::Eol | Token::Eof => return Ok(res),
                token => {
                    return Err(
                        self.error(format!("expected identifier, found {}", token))
                    )
                }
            }
        }
    }

    /// Requires the entry to end here.
    pub fn expect_eol(&mut self) -> Result<(), SyntaxError> {
        match self.get()? {
            Token::Eol | Token::Eof => Ok(()),
            token => Err(self.error(format!("expected end of line, found {}", token))),
        }
    }
}

//------------ ScanContext ---------------------------------------------------

/// How domain names found in zone file text are processed.
///
/// Relative names are made absolute using `origin`. If `relativize` is
/// set, the names are then made relative to `relativize_to`, falling back
/// to `origin`.
#[derive(Clone, Debug, Default)]
pub struct ScanContext {
    pub origin: Option<Name>,
    pub relativize: bool,
    pub relativize_to: Option<Name>,
}

impl ScanContext {
    /// Creates a context that makes names absolute with `origin`.
    #[must_use]
    pub fn with_origin(origin: Name) -> Self {
        ScanContext {
            origin: Some(origin),
            relativize: false,
            relativize_to: None,
        }
    }

    /// Sets the relativization settings.
    #[must_use]
    pub fn relativize(mut self, relativize: bool, to: Option<Name>) -> Self {
        self.relativize = relativize;
        self.relativize_to = to;
        self
    }

    /// Applies the context to a name.
    pub fn process_name(&self, name: Name) -> Result<Name, NameError> {
        let name = name.derelativize(self.origin.as_ref())?;
        if self.relativize {
            if let Some(to) = self.relativize_to.as_ref().or(self.origin.as_ref()) {
                return Ok(name.relativize(to));
            }
        }
        Ok(name)
    }
}

//------------ Symbol --------------------------------------------------------

/// The representation of a single character in presentation format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Symbol {
    /// An unescaped Unicode character.
    Char(char),

    /// A character escaped via a preceding backslash.
    ///
    /// This escape sequence is only allowed for printable ASCII characters.
    SimpleEscape(u8),

    /// A raw octet escaped using the decimal escape sequence.
    ///
    /// This escape sequence consists of a backslash followed by exactly three
    /// decimal digits with the value of the octets.
    DecimalEscape(u8),
}

impl Symbol {
    /// Reads a symbol from a character source.
    ///
    /// Returns the next symbol in the source, `Ok(None)` if the source has
    /// been exhausted, or an error if there wasn’t a valid symbol.
    pub fn from_chars<C>(chars: C) -> Result<Option<Self>, SymbolCharsError>
    where
        C: IntoIterator<Item = char>,
    {
        use self::SymbolCharsError::*;

        let mut chars = chars.into_iter();
        let ch = match chars.next() {
            Some(ch) => ch,
            None => return Ok(None),
        };
        if ch != '\\' {
            return Ok(Some(Symbol::Char(ch)));
        }
        match chars.next() {
            Some(ch) if ch.is_ascii_digit() => {
                let mut res = 0;
                for _ in 0..2 {
                    let digit = chars.next().ok_or(ShortInput)?;
                    res = res * 10 + digit.to_digit(10).ok_or(BadEscape)?;
                }
                let res = ch.to_digit(10).ok_or(BadEscape)? * 100 + res;
                u8::try_from(res)
                    .map(|ch| Some(Symbol::DecimalEscape(ch)))
                    .map_err(|_| BadEscape)
            }
            Some(ch) => {
                let ch = u8::try_from(ch).map_err(|_| BadEscape)?;
                if !(0x20..0x7F).contains(&ch) {
                    Err(BadEscape)
                } else {
                    Ok(Some(Symbol::SimpleEscape(ch)))
                }
            }
            None => Err(ShortInput),
        }
    }

    /// Appends the octets of the symbol to `target`.
    pub fn push_octets(self, target: &mut Vec<u8>) {
        match self {
            Symbol::Char(ch) => {
                let mut buf = [0u8; 4];
                target.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            Symbol::SimpleEscape(ch) | Symbol::DecimalEscape(ch) => target.push(ch),
        }
    }
}

/// Decodes all escape sequences in `raw`.
pub fn unescape(raw: &str) -> Result<Vec<u8>, SymbolCharsError> {
    let mut chars = raw.chars();
    let mut res = Vec::with_capacity(raw.len());
    while let Some(symbol) = Symbol::from_chars(&mut chars)? {
        symbol.push_octets(&mut res);
    }
    Ok(res)
}

//============ Error Types ===================================================

//------------ SymbolCharsError ----------------------------------------------

/// An error happened when reading a symbol.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SymbolCharsError {
    /// An illegal escape sequence was encountered.
    #[error("illegal escape sequence")]
    BadEscape,

    /// Unexpected end of input.
    ///
    /// This can only happen in a decimal escape sequence.
    #[error("unexpected end of input")]
    ShortInput,
}

//------------ SyntaxError ---------------------------------------------------

/// Zone file text did not match the expected grammar.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("line {line}: {msg}")]
pub struct SyntaxError {
    msg: String,
    line: usize,
}

impl SyntaxError {
    pub fn new(msg: impl Into<String>, line: usize) -> Self {
        SyntaxError {
            msg: msg.into(),
            line,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }
}

//============ Testing =======================================================
