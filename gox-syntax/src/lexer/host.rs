//! `HOST` mode: the host language's own tokenization, plus the `<` override
//! that opens a tag in expression position.

use super::{Lexer, is_letter};
use crate::error::ErrorKind;
use crate::mode::Mode;
use crate::source::Span;
use crate::token::{Token, TokenKind};

impl Lexer<'_> {
    pub(super) fn scan_host(&mut self) -> Token {
        if let Some(semi) = self.skip_host_trivia() {
            return semi;
        }

        let start = self.pos;
        let Some(ch) = self.peek() else {
            if self.insert_semi {
                self.insert_semi = false;
                return Token::new(TokenKind::Semicolon, "\n", start);
            }
            return Token::new(TokenKind::Eof, "", start);
        };

        let mut insert_semi = false;
        let kind = if is_letter(ch) {
            self.scan_identifier();
            let kind = TokenKind::lookup(&self.src[start..self.pos]);
            insert_semi = matches!(
                kind,
                TokenKind::Ident
                    | TokenKind::Break
                    | TokenKind::Continue
                    | TokenKind::Fallthrough
                    | TokenKind::Return
            );
            kind
        } else if ch.is_ascii_digit() || (ch == '.' && self.peek_at(1).is_some_and(|c| c.is_ascii_digit())) {
            insert_semi = true;
            self.scan_number()
        } else {
            self.bump();
            match ch {
                '"' => {
                    insert_semi = true;
                    self.scan_quoted('"', start, "string");
                    TokenKind::String
                }
                '\'' => {
                    insert_semi = true;
                    self.scan_quoted('\'', start, "rune");
                    TokenKind::Char
                }
                '`' => {
                    insert_semi = true;
                    self.scan_raw_string(start);
                    TokenKind::String
                }
                ':' => self.switch2(TokenKind::Colon, TokenKind::Define),
                '.' => {
                    if self.rest().starts_with("..") {
                        self.pos += 2;
                        TokenKind::Ellipsis
                    } else {
                        TokenKind::Period
                    }
                }
                ',' => TokenKind::Comma,
                ';' => TokenKind::Semicolon,
                '(' => {
                    self.modes.top_mut().parens += 1;
                    TokenKind::LParen
                }
                ')' => {
                    insert_semi = true;
                    self.close_paren(start);
                    TokenKind::RParen
                }
                '[' => TokenKind::LBrack,
                ']' => {
                    insert_semi = true;
                    TokenKind::RBrack
                }
                '{' => {
                    self.modes.top_mut().braces += 1;
                    TokenKind::LBrace
                }
                '}' => {
                    insert_semi = true;
                    self.close_brace(start);
                    TokenKind::RBrace
                }
                '+' => {
                    let kind = self.switch3(TokenKind::Add, TokenKind::AddAssign, '+', TokenKind::Inc);
                    insert_semi = kind == TokenKind::Inc;
                    kind
                }
                '-' => {
                    let kind = self.switch3(TokenKind::Sub, TokenKind::SubAssign, '-', TokenKind::Dec);
                    insert_semi = kind == TokenKind::Dec;
                    kind
                }
                '*' => self.switch2(TokenKind::Mul, TokenKind::MulAssign),
                '/' => self.switch2(TokenKind::Quo, TokenKind::QuoAssign),
                '%' => self.switch2(TokenKind::Rem, TokenKind::RemAssign),
                '^' => self.switch2(TokenKind::Xor, TokenKind::XorAssign),
                '<' => {
                    if self.last.is_none_or(TokenKind::permits_tag) && self.peek().is_some_and(is_letter) {
                        self.push_mode(Mode::Tag);
                        TokenKind::TagOpen
                    } else if self.eat('-') {
                        TokenKind::Arrow
                    } else {
                        self.switch4(
                            TokenKind::Lss,
                            TokenKind::Leq,
                            '<',
                            TokenKind::Shl,
                            TokenKind::ShlAssign,
                        )
                    }
                }
                '>' => self.switch4(
                    TokenKind::Gtr,
                    TokenKind::Geq,
                    '>',
                    TokenKind::Shr,
                    TokenKind::ShrAssign,
                ),
                '=' => self.switch2(TokenKind::Assign, TokenKind::Eql),
                '!' => self.switch2(TokenKind::Not, TokenKind::Neq),
                '&' => {
                    if self.eat('^') {
                        self.switch2(TokenKind::AndNot, TokenKind::AndNotAssign)
                    } else {
                        self.switch3(TokenKind::And, TokenKind::AndAssign, '&', TokenKind::LAnd)
                    }
                }
                '|' => self.switch3(TokenKind::Or, TokenKind::OrAssign, '|', TokenKind::LOr),
                other => {
                    self.error(Span::new(start, self.pos), ErrorKind::IllegalCharacter(other));
                    insert_semi = self.insert_semi;
                    TokenKind::Illegal
                }
            }
        };

        self.insert_semi = insert_semi;
        self.token(kind, start)
    }

    /// Skips whitespace and comments. Returns the implicit `;` when a newline
    /// is crossed while one is pending.
    fn skip_host_trivia(&mut self) -> Option<Token> {
        loop {
            match self.peek() {
                Some('\n') if self.insert_semi => {
                    let start = self.pos;
                    self.bump();
                    self.insert_semi = false;
                    return Some(Token::new(TokenKind::Semicolon, "\n", start));
                }
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek_at(1) == Some('/') => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                Some('/') if self.peek_at(1) == Some('*') => {
                    let start = self.pos;
                    self.pos += 2;
                    let Some(len) = self.rest().find("*/") else {
                        self.pos = self.src.len();
                        self.error(Span::new(start, self.pos), ErrorKind::UnterminatedComment);
                        continue;
                    };
                    let spans_lines = self.rest()[..len].contains('\n');
                    self.pos += len + 2;
                    if spans_lines && self.insert_semi {
                        self.insert_semi = false;
                        return Some(Token::new(TokenKind::Semicolon, "\n", start));
                    }
                }
                _ => return None,
            }
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        let mut kind = TokenKind::Int;
        let hex = self.rest().starts_with("0x") || self.rest().starts_with("0X");
        if hex || self.rest().starts_with("0b") || self.rest().starts_with("0o") {
            self.pos += 2;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit() || c == '_') {
                self.bump();
            }
        } else {
            self.scan_digits();
            if self.peek() == Some('.') {
                kind = TokenKind::Float;
                self.bump();
                self.scan_digits();
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                kind = TokenKind::Float;
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
                self.scan_digits();
            }
        }
        if self.eat('i') {
            kind = TokenKind::Imag;
        }
        kind
    }

    fn scan_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.bump();
        }
    }

    fn scan_raw_string(&mut self, start: usize) {
        match self.rest().find('`') {
            Some(len) => self.pos += len + 1,
            None => {
                self.pos = self.src.len();
                self.error(Span::new(start, self.pos), ErrorKind::UnterminatedLiteral("raw string"));
            }
        }
    }

    /// Matching `)`: leaves a frame opened from markup once its parens balance.
    fn close_paren(&mut self, at: usize) {
        let frame = self.modes.top_mut();
        frame.parens = frame.parens.saturating_sub(1);
        if frame.is_balanced() && self.modes.depth() > 1 {
            self.pop_mode(at);
        }
    }

    fn close_brace(&mut self, at: usize) {
        let frame = self.modes.top_mut();
        frame.braces = frame.braces.saturating_sub(1);
        if frame.is_balanced() && self.modes.depth() > 1 {
            self.pop_mode(at);
        }
    }

    fn switch2(&mut self, plain: TokenKind, with_eq: TokenKind) -> TokenKind {
        if self.eat('=') { with_eq } else { plain }
    }

    fn switch3(&mut self, plain: TokenKind, with_eq: TokenKind, ch: char, doubled: TokenKind) -> TokenKind {
        if self.eat('=') {
            with_eq
        } else if self.eat(ch) {
            doubled
        } else {
            plain
        }
    }

    fn switch4(
        &mut self,
        plain: TokenKind,
        with_eq: TokenKind,
        ch: char,
        doubled: TokenKind,
        doubled_eq: TokenKind,
    ) -> TokenKind {
        if self.eat('=') {
            with_eq
        } else if self.eat(ch) {
            self.switch2(doubled, doubled_eq)
        } else {
            plain
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::token::TokenKind;

    #[test]
    fn newline_after_identifier_inserts_semicolon() {
        let (tokens, _) = Lexer::new("a\nb").tokenize();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Eof
            ]
        );
        assert_eq!(tokens[1].text, "\n");
    }

    #[test]
    fn numbers_are_classified() {
        let (tokens, _) = Lexer::new("1 2.5 0x1F 3i 1e9").tokenize();
        let kinds: Vec<_> = tokens.iter().take(5).map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Int,
                TokenKind::Float,
                TokenKind::Int,
                TokenKind::Imag,
                TokenKind::Float
            ]
        );
    }
}
