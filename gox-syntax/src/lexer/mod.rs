//! Mode-stacked lexer.
//!
//! The active ruleset is the top frame of a [`ModeStack`]: host code, the
//! inside of an open tag, or a tag body. Structural delimiters push and pop
//! frames as they are scanned, so the parser always sees tokens produced under
//! the right rules for the position it is at.

mod host;
mod markup;

use tracing::{error, trace};

use crate::error::{Diagnostic, ErrorKind};
use crate::mode::{Mode, ModeStack};
use crate::source::Span;
use crate::token::{Token, TokenKind};

pub struct Lexer<'src> {
    src: &'src str,
    pos: usize,
    modes: ModeStack,
    /// Whether a newline or end of input in host mode produces a `;`.
    insert_semi: bool,
    /// Kind of the previously emitted token; `None` at the start of input.
    last: Option<TokenKind>,
    /// Set once end of input inside markup has been reported.
    eof_reported: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            pos: 0,
            modes: ModeStack::new(),
            insert_semi: false,
            last: None,
            eof_reported: false,
            diagnostics: Vec::new(),
        }
    }

    /// Scans the next token under the rules of the current mode.
    pub fn next_token(&mut self) -> Token {
        let token = match self.modes.mode() {
            Mode::Host => self.scan_host(),
            Mode::Tag => self.scan_tag(),
            Mode::Text => self.scan_text(),
        };
        self.last = Some(token.kind);
        token
    }

    /// Scans the whole input, up to and including the `Eof` token.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        (tokens, self.diagnostics)
    }

    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    pub fn mode_depth(&self) -> usize {
        self.modes.depth()
    }

    pub fn source(&self) -> &'src str {
        self.src
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn rest(&self) -> &'src str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, &self.src[start..self.pos], start)
    }

    fn error(&mut self, span: Span, kind: ErrorKind) {
        trace!(start = span.start, %kind, "lexical error");
        self.diagnostics.push(Diagnostic::new(span, kind));
    }

    fn push_mode(&mut self, mode: Mode) {
        self.modes.push(mode);
        trace!(?mode, depth = self.modes.depth(), "push mode");
    }

    /// Pops the top frame; a failure is an internal invariant violation.
    fn pop_mode(&mut self, at: usize) -> bool {
        match self.modes.pop() {
            Ok(mode) => {
                trace!(?mode, depth = self.modes.depth(), "pop mode");
                true
            }
            Err(err) => {
                error!(offset = at, "mode stack underflow");
                self.error(Span::at(at), err.into());
                false
            }
        }
    }

    /// Reports end of input inside markup once, then keeps returning `Eof`.
    fn eof_inside(&mut self, kind: ErrorKind) -> Token {
        if !self.eof_reported {
            self.eof_reported = true;
            self.error(Span::at(self.pos), kind);
        }
        Token::new(TokenKind::Eof, "", self.pos)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn scan_identifier(&mut self) {
        while self.peek().is_some_and(|c| is_letter(c) || is_digit(c)) {
            self.bump();
        }
    }

    /// Scans a quoted literal whose opening quote was already consumed.
    fn scan_quoted(&mut self, quote: char, start: usize, what: &'static str) {
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.error(Span::new(start, self.pos), ErrorKind::UnterminatedLiteral(what));
                    return;
                }
                Some('\\') => {
                    self.bump();
                    self.bump();
                }
                Some(c) => {
                    self.bump();
                    if c == quote {
                        return;
                    }
                }
            }
        }
    }
}

pub(crate) fn is_letter(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

pub(crate) fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || c.is_numeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let (tokens, diags) = Lexer::new(src).tokenize();
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn self_closing_tag_pops_straight_back_to_host() {
        use TokenKind::*;
        assert_eq!(
            kinds("x = <br/>"),
            vec![Ident, Assign, TagOpen, Ident, TagSelfClose, Semicolon, Eof]
        );
    }

    #[test]
    fn bare_text_keeps_whitespace() {
        let (tokens, _) = Lexer::new("x = <p>  a b </p>").tokenize();
        let text = tokens
            .iter()
            .find(|t| t.kind == TokenKind::BareText)
            .map(|t| t.text.as_str());
        assert_eq!(text, Some("  a b "));
    }
}
