//! Tags, attributes, interpolations and body text.

use tracing::trace;

use super::Parser;
use crate::ast::{AttrStmt, BareText, CloseTag, Expr, HostExpr, TagExpr};
use crate::error::ErrorKind;
use crate::printer::print_expr;
use crate::source::Span;
use crate::token::TokenKind;

impl Parser<'_> {
    /// Entered from operand position on a `TagOpen` token.
    pub(super) fn parse_tag(&mut self) -> Expr {
        let open = self.expect(TokenKind::TagOpen);
        let name = self.no_composite(Self::parse_expr);
        trace!(name = %print_expr(&name), "tag");

        let mut attrs = Vec::new();
        loop {
            match self.tok.kind {
                TokenKind::TagOpenEnd | TokenKind::TagSelfClose => break,
                TokenKind::Eof => {
                    let span = self.tok.span();
                    self.error(span, ErrorKind::EofInMarkup);
                    return Expr::Bad(open.to(span));
                }
                TokenKind::Ident => {
                    if let Some(attr) = self.parse_attribute() {
                        attrs.push(attr);
                    }
                }
                _ => {
                    let found = self.tok.describe();
                    self.error(self.tok.span(), ErrorKind::UnexpectedInTag { found });
                    if self.at(TokenKind::LBrace) {
                        // keeps the lexer's frames matched
                        self.parse_host_expr();
                    } else {
                        self.next();
                    }
                }
            }
        }

        if self.at(TokenKind::TagSelfClose) {
            let span = self.next().span();
            return Expr::Tag(TagExpr {
                open,
                name: Box::new(name),
                attrs,
                children: None,
                close: CloseTag {
                    span,
                    name: String::new(),
                },
            });
        }
        self.expect(TokenKind::TagOpenEnd);

        self.expr_lev += 1;
        let children = self.parse_tag_content();
        self.expr_lev -= 1;
        let Some(children) = children else {
            return Expr::Bad(open.to(self.tok.span()));
        };

        let close_tok = self.next();
        let close = CloseTag {
            span: close_tok.span(),
            name: close_tok.text,
        };
        let expected = print_expr(&name);
        if strip_whitespace(&expected) != strip_whitespace(&close.name) {
            self.error(
                close.span,
                ErrorKind::MismatchedCloseTag {
                    open: expected,
                    close: close.name.clone(),
                },
            );
            return Expr::Bad(open.to(close.span));
        }

        Expr::Tag(TagExpr {
            open,
            name: Box::new(name),
            attrs,
            children: Some(children),
            close,
        })
    }

    /// Content items up to, not including, the close tag. `None` when the
    /// content was abandoned; the close tag has then been consumed already,
    /// or end of input reached.
    fn parse_tag_content(&mut self) -> Option<Vec<Expr>> {
        let mut children = Vec::new();
        loop {
            match self.tok.kind {
                TokenKind::TagClose => return Some(children),
                TokenKind::LBrace => children.push(Expr::HostExpr(self.parse_host_expr())),
                TokenKind::BareText => children.push(self.parse_bare_text()),
                TokenKind::TagOpen => children.push(self.parse_tag()),
                TokenKind::Eof => {
                    self.error(self.tok.span(), ErrorKind::EofInMarkup);
                    return None;
                }
                _ => {
                    let found = self.tok.describe();
                    self.error(self.tok.span(), ErrorKind::UnexpectedInTag { found });
                    self.skip_to_close_tag();
                    return None;
                }
            }
        }
    }

    /// Skips past the close tag of the tag being parsed, stepping over any
    /// nested tags.
    fn skip_to_close_tag(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.tok.kind {
                TokenKind::Eof => return,
                TokenKind::TagOpen => depth += 1,
                TokenKind::TagSelfClose => depth = depth.saturating_sub(1),
                TokenKind::TagClose if depth == 0 => {
                    self.next();
                    return;
                }
                TokenKind::TagClose => depth -= 1,
                _ => {}
            }
            self.next();
        }
    }

    /// `name`, `name="text"`, `name='c'` or `name={expr}`.
    fn parse_attribute(&mut self) -> Option<AttrStmt> {
        let name = self.parse_ident();
        if !self.got(TokenKind::Assign) {
            return Some(AttrStmt { name, value: None });
        }

        let value = match self.tok.kind {
            TokenKind::LBrace => Expr::HostExpr(self.parse_host_expr()),
            TokenKind::String | TokenKind::Char => Expr::BasicLit(self.parse_basic_lit()),
            _ => {
                let found = self.tok.describe();
                self.error(self.tok.span(), ErrorKind::IllegalAttrValue { found });
                if !matches!(
                    self.tok.kind,
                    TokenKind::TagOpenEnd | TokenKind::TagSelfClose | TokenKind::Eof
                ) {
                    self.next();
                }
                return None;
            }
        };
        Some(AttrStmt {
            name,
            value: Some(value),
        })
    }

    /// `{expr}` inside a tag.
    pub(super) fn parse_host_expr(&mut self) -> HostExpr {
        let start = self.expect(TokenKind::LBrace);
        let old = std::mem::replace(&mut self.expr_lev, 0);
        let inner = self.parse_expr();
        self.expr_lev = old;
        if self.at(TokenKind::Semicolon) && self.tok.text == "\n" {
            self.next();
        }
        let end = self.expect(TokenKind::RBrace);
        HostExpr {
            inner: Box::new(inner),
            span: start.to(end),
        }
    }

    fn parse_bare_text(&mut self) -> Expr {
        let span = self.tok.span();
        let tok = self.next();
        Expr::BareText(BareText {
            text: tok.text,
            span,
        })
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use crate::ast::Expr;
    use crate::error::ErrorKind;
    use crate::parser::parse_expr;

    fn tag(src: &str) -> crate::ast::TagExpr {
        match parse_expr(src) {
            Ok(Expr::Tag(tag)) => tag,
            other => panic!("expected tag, got {other:?}"),
        }
    }

    #[test]
    fn self_closing_tag_has_no_children() {
        let t = tag("<br/>");
        assert!(t.is_self_closing());
        assert!(t.close.name.is_empty());
    }

    #[test]
    fn attribute_forms() {
        let t = tag(r#"<input type="text" disabled value={v} key='k'/>"#);
        let names: Vec<_> = t.attrs.iter().map(|a| a.name.name.as_str()).collect();
        assert_eq!(names, ["type", "disabled", "value", "key"]);
        assert!(t.attrs[1].value.is_none());
        assert!(matches!(t.attrs[2].value, Some(Expr::HostExpr(_))));
    }

    #[test]
    fn call_tag_name_matches_close_tag_ignoring_spaces() {
        let t = tag("<Foo(1, 2)>bar</Foo(1,2)>");
        assert!(matches!(*t.name, Expr::Call(_)));
        assert_eq!(t.children.map(|c| c.len()), Some(1));
    }

    #[test]
    fn mismatched_close_tag_is_reported() {
        let err = parse_expr("<div>x</span>").unwrap_err();
        assert!(err.iter().any(|d| matches!(
            &d.kind,
            ErrorKind::MismatchedCloseTag { open, close } if open == "div" && close == "span"
        )));
    }

    #[test]
    fn eof_in_body_is_reported() {
        let err = parse_expr("<div>{x}").unwrap_err();
        assert!(err.iter().any(|d| d.kind == ErrorKind::EofInMarkup));
    }

    #[test]
    fn bare_word_attribute_value_is_rejected() {
        let err = parse_expr("<input disabled=true/>").unwrap_err();
        assert!(err
            .iter()
            .any(|d| matches!(d.kind, ErrorKind::IllegalAttrValue { .. })));
    }
}
