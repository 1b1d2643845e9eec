//! Recursive-descent parser for host code with embedded markup.
//!
//! The parser owns the [`Lexer`], and through it the mode stack, so the
//! token it looks at was always scanned under the rules of the current
//! position. Errors never abort the parse: each one is recorded, the broken
//! construct becomes a `Bad` node, and the caller gets every diagnostic at
//! the end.

mod expr;
mod markup;
mod stmt;
mod types;

use tracing::debug;

use crate::ast::{Expr, File, Ident};
use crate::error::{Diagnostic, Diagnostics, ErrorKind};
use crate::lexer::Lexer;
use crate::source::Span;
use crate::token::{Token, TokenKind};

/// Parsing stops after this many errors.
pub const MAX_ERRORS: usize = 10;

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    tok: Token,
    /// < 0 in control clauses and tag names, where `T{` is not a composite literal.
    expr_lev: i32,
    diagnostics: Vec<Diagnostic>,
    last_error_at: Option<usize>,
    gave_up: bool,
}

impl<'src> Parser<'src> {
    pub fn new(src: &'src str) -> Self {
        let mut lexer = Lexer::new(src);
        let tok = lexer.next_token();
        Self {
            lexer,
            tok,
            expr_lev: 0,
            diagnostics: Vec::new(),
            last_error_at: None,
            gave_up: false,
        }
    }

    /// Parses a whole compilation unit.
    pub fn parse_file(mut self) -> Result<File, Diagnostics> {
        self.expect(TokenKind::Package);
        let package = self.parse_ident();
        self.expect_semi();

        let mut decls = Vec::new();
        while !self.at(TokenKind::Eof) {
            decls.push(self.guarded(Self::parse_decl));
        }
        self.finish(File { package, decls })
    }

    /// Parses a single expression spanning the whole input.
    pub fn parse_standalone_expr(mut self) -> Result<Expr, Diagnostics> {
        let expr = self.parse_expr();
        if self.at(TokenKind::Semicolon) && self.tok.text == "\n" {
            self.next();
        }
        if !self.at(TokenKind::Eof) {
            self.error_expected("end of input");
        }
        self.finish(expr)
    }

    fn finish<T>(mut self, value: T) -> Result<T, Diagnostics> {
        let depth = self.lexer.mode_depth();
        if depth > 1 && !self.gave_up {
            self.diagnostics.push(Diagnostic::new(
                Span::at(self.tok.start),
                ErrorKind::UnbalancedNesting { depth },
            ));
        }

        let mut all = self.lexer.take_diagnostics();
        all.append(&mut self.diagnostics);
        if all.is_empty() {
            return Ok(value);
        }
        all.sort_by_key(|d| d.span.start);
        Err(Diagnostics(all))
    }

    fn next(&mut self) -> Token {
        let next = if self.gave_up {
            Token::new(TokenKind::Eof, "", self.tok.start)
        } else {
            self.lexer.next_token()
        };
        std::mem::replace(&mut self.tok, next)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.tok.kind == kind
    }

    fn got(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Consumes the current token, reporting it first if it is not `kind`.
    fn expect(&mut self, kind: TokenKind) -> Span {
        let span = self.tok.span();
        if !self.at(kind) {
            self.error_expected(&format!("'{kind}'"));
        }
        if !self.at(TokenKind::Eof) {
            self.next();
        }
        span
    }

    /// A statement terminator, which may be omitted before `)` or `}`.
    fn expect_semi(&mut self) {
        match self.tok.kind {
            TokenKind::RParen | TokenKind::RBrace => {}
            TokenKind::Semicolon => {
                self.next();
            }
            _ => {
                self.error_expected("';'");
                self.sync_stmt();
            }
        }
    }

    /// Skips to just past the next `;`, or to the next `}` or end of input.
    fn sync_stmt(&mut self) {
        loop {
            match self.tok.kind {
                TokenKind::Semicolon => {
                    self.next();
                    return;
                }
                TokenKind::RBrace | TokenKind::Eof => return,
                _ => {
                    self.next();
                }
            }
        }
    }

    /// Runs `f` and skips one token if it consumed nothing, so loops always
    /// make progress.
    fn guarded<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let (start, kind) = (self.tok.start, self.tok.kind);
        let out = f(self);
        if self.tok.start == start && self.tok.kind == kind && !self.at(TokenKind::Eof) {
            self.next();
        }
        out
    }

    /// Runs `f` with composite literals disabled.
    fn no_composite<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let old = std::mem::replace(&mut self.expr_lev, -1);
        let out = f(self);
        self.expr_lev = old;
        out
    }

    fn parse_ident(&mut self) -> Ident {
        let span = self.tok.span();
        if self.at(TokenKind::Ident) {
            let tok = self.next();
            return Ident {
                name: tok.text,
                span,
            };
        }
        self.error_expected("identifier");
        Ident {
            name: "_".to_string(),
            span,
        }
    }

    fn parse_ident_list(&mut self) -> Vec<Ident> {
        let mut idents = vec![self.parse_ident()];
        while self.got(TokenKind::Comma) {
            idents.push(self.parse_ident());
        }
        idents
    }

    fn error_expected(&mut self, what: &str) {
        let kind = ErrorKind::Expected {
            expected: what.to_string(),
            found: self.tok.describe(),
        };
        self.error(self.tok.span(), kind);
    }

    fn error(&mut self, span: Span, kind: ErrorKind) {
        if self.gave_up {
            return;
        }
        // the lexer already reported the token it could not scan
        if self.tok.kind == TokenKind::Illegal && span.start == self.tok.start {
            return;
        }
        if self.last_error_at == Some(span.start) {
            return;
        }
        debug!(start = span.start, %kind, "parse error");
        self.last_error_at = Some(span.start);
        self.diagnostics.push(Diagnostic::new(span, kind));

        if self.diagnostics.len() + self.lexer.diagnostics().len() >= MAX_ERRORS {
            self.diagnostics
                .push(Diagnostic::new(span, ErrorKind::TooManyErrors));
            self.gave_up = true;
            self.tok = Token::new(TokenKind::Eof, "", self.tok.start);
        }
    }
}

/// Parses a compilation unit: `package` clause, imports and declarations.
pub fn parse_file(src: &str) -> Result<File, Diagnostics> {
    Parser::new(src).parse_file()
}

/// Parses one expression, such as a bare tag.
pub fn parse_expr(src: &str) -> Result<Expr, Diagnostics> {
    Parser::new(src).parse_standalone_expr()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_are_capped() {
        let src = "package p\nfunc f() {\n".to_string() + &")\n".repeat(40) + "}\n";
        let err = parse_file(&src).unwrap_err();
        assert!(err.len() <= MAX_ERRORS + 1);
        assert!(err.iter().any(|d| d.kind == ErrorKind::TooManyErrors));
    }

    #[test]
    fn bad_input_still_terminates() {
        for src in ["package p\nvar x = <", "package p\nvar x = <a {", "package p\n)))", "<"] {
            let _ = parse_file(src);
            let _ = parse_expr(src);
        }
    }
}
