//! `TAG` and `TEXT` modes.

use super::{Lexer, is_letter};
use crate::error::ErrorKind;
use crate::mode::Mode;
use crate::source::Span;
use crate::token::{Token, TokenKind};

impl Lexer<'_> {
    /// Inside `<name ...`: the tag name, attribute names and values.
    pub(super) fn scan_tag(&mut self) -> Token {
        self.insert_semi = false;
        self.skip_whitespace();

        let start = self.pos;
        let Some(ch) = self.peek() else {
            return self.eof_inside(ErrorKind::EofInTag);
        };
        if is_letter(ch) {
            self.scan_identifier();
            return self.token(TokenKind::Ident, start);
        }

        self.bump();
        let kind = match ch {
            '=' => TokenKind::Assign,
            '.' => TokenKind::Period,
            '{' => {
                self.push_mode(Mode::Host);
                self.modes.top_mut().braces = 1;
                TokenKind::LBrace
            }
            '(' => {
                self.push_mode(Mode::Host);
                self.modes.top_mut().parens = 1;
                TokenKind::LParen
            }
            '"' => {
                self.scan_quoted('"', start, "string");
                TokenKind::String
            }
            '\'' => {
                self.scan_quoted('\'', start, "rune");
                TokenKind::Char
            }
            '>' => {
                if self.pop_mode(start) {
                    self.push_mode(Mode::Text);
                    TokenKind::TagOpenEnd
                } else {
                    TokenKind::Illegal
                }
            }
            '/' if self.eat('>') => {
                if self.pop_mode(start) {
                    self.insert_semi = self.modes.mode() == Mode::Host;
                    TokenKind::TagSelfClose
                } else {
                    TokenKind::Illegal
                }
            }
            other => {
                self.error(Span::new(start, self.pos), ErrorKind::IllegalCharacter(other));
                TokenKind::Illegal
            }
        };
        self.token(kind, start)
    }

    /// Inside a tag body. Whitespace is content here, so nothing is skipped.
    pub(super) fn scan_text(&mut self) -> Token {
        self.insert_semi = false;

        let start = self.pos;
        match self.peek() {
            None => self.eof_inside(ErrorKind::UnterminatedTagBody),
            Some('{') => {
                self.bump();
                self.push_mode(Mode::Host);
                self.modes.top_mut().braces = 1;
                self.token(TokenKind::LBrace, start)
            }
            Some('<') => match self.peek_at(1) {
                Some('/') => self.scan_close_tag(start),
                Some(c) if is_letter(c) => {
                    self.bump();
                    self.push_mode(Mode::Tag);
                    self.token(TokenKind::TagOpen, start)
                }
                _ => {
                    self.bump();
                    self.error(Span::new(start, self.pos), ErrorKind::IllegalCharacter('<'));
                    self.token(TokenKind::Illegal, start)
                }
            },
            Some(_) => {
                while let Some(c) = self.peek() {
                    if c == '{' || c == '<' {
                        return self.token(TokenKind::BareText, start);
                    }
                    self.bump();
                }
                self.eof_reported = true;
                self.error(Span::new(start, self.pos), ErrorKind::UnterminatedTagBody);
                self.token(TokenKind::Illegal, start)
            }
        }
    }

    /// `</name>`: the token text is `name`. Closing the body pops the `TEXT`
    /// frame; landing back in host code ends the enclosing statement.
    fn scan_close_tag(&mut self, start: usize) -> Token {
        self.pos += 2;
        let name_start = self.pos;
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.error(Span::new(start, self.pos), ErrorKind::UnterminatedCloseTag);
                    return self.token(TokenKind::Illegal, start);
                }
                Some('>') => break,
                Some(_) => {
                    self.bump();
                }
            }
        }
        let name = self.src[name_start..self.pos].to_string();
        self.bump();

        if !self.pop_mode(start) {
            return self.token(TokenKind::Illegal, start);
        }
        self.insert_semi = self.modes.mode() == Mode::Host;
        Token::new(TokenKind::TagClose, name, start)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::lexer::Lexer;
    use crate::mode::Mode;
    use crate::token::TokenKind;

    #[test]
    fn close_tag_text_is_the_name() {
        let (tokens, diags) = Lexer::new("x := <a>hi</a>").tokenize();
        assert!(diags.is_empty());
        let close = tokens
            .iter()
            .find(|t| t.kind == TokenKind::TagClose)
            .map(|t| t.text.as_str());
        assert_eq!(close, Some("a"));
    }

    #[test]
    fn eof_inside_open_tag_is_reported_once() {
        let mut lexer = Lexer::new("x := <div class");
        let mut kinds = Vec::new();
        for _ in 0..8 {
            kinds.push(lexer.next_token().kind);
        }
        assert_eq!(lexer.mode(), Mode::Tag);
        assert!(kinds.ends_with(&[TokenKind::Eof, TokenKind::Eof]));
        assert_eq!(lexer.diagnostics().len(), 1);
        assert_eq!(lexer.diagnostics()[0].kind, ErrorKind::EofInTag);
    }
}
