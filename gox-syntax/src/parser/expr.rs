use super::Parser;
use crate::ast::{BasicLit, CallExpr, Expr, LitKind};
use crate::token::TokenKind;

impl Parser<'_> {
    pub(super) fn parse_expr(&mut self) -> Expr {
        self.parse_binary_expr(1)
    }

    pub(super) fn parse_expr_list(&mut self) -> Vec<Expr> {
        let mut list = vec![self.parse_expr()];
        while self.got(TokenKind::Comma) {
            list.push(self.parse_expr());
        }
        list
    }

    fn parse_binary_expr(&mut self, min_prec: u8) -> Expr {
        let mut x = self.parse_unary_expr();
        loop {
            let op = self.tok.kind;
            let prec = op.precedence();
            if prec == 0 || prec < min_prec {
                return x;
            }
            self.next();
            let y = self.parse_binary_expr(prec + 1);
            x = Expr::Binary {
                op,
                x: Box::new(x),
                y: Box::new(y),
            };
        }
    }

    fn parse_unary_expr(&mut self) -> Expr {
        match self.tok.kind {
            TokenKind::Add
            | TokenKind::Sub
            | TokenKind::Not
            | TokenKind::Xor
            | TokenKind::And
            | TokenKind::Arrow => {
                let op = self.next().kind;
                let x = self.parse_unary_expr();
                Expr::Unary { op, x: Box::new(x) }
            }
            TokenKind::Mul => {
                self.next();
                Expr::Star(Box::new(self.parse_unary_expr()))
            }
            _ => self.parse_primary_expr(),
        }
    }

    fn parse_operand(&mut self) -> Expr {
        match self.tok.kind {
            TokenKind::Ident => Expr::Ident(self.parse_ident()),
            kind if kind.is_literal() => Expr::BasicLit(self.parse_basic_lit()),
            TokenKind::LParen => {
                self.next();
                self.expr_lev += 1;
                let x = self.parse_expr();
                self.expr_lev -= 1;
                self.expect(TokenKind::RParen);
                Expr::Paren(Box::new(x))
            }
            TokenKind::Func => self.parse_func_type_or_lit(),
            TokenKind::TagOpen => self.parse_tag(),
            _ => {
                if let Some(ty) = self.try_type() {
                    return ty;
                }
                let span = self.tok.span();
                self.error_expected("operand");
                if !matches!(
                    self.tok.kind,
                    TokenKind::RParen
                        | TokenKind::RBrack
                        | TokenKind::RBrace
                        | TokenKind::Semicolon
                        | TokenKind::Eof
                ) {
                    self.next();
                }
                Expr::Bad(span)
            }
        }
    }

    pub(super) fn parse_basic_lit(&mut self) -> BasicLit {
        let span = self.tok.span();
        let tok = self.next();
        let kind = match tok.kind {
            TokenKind::Int => LitKind::Int,
            TokenKind::Float => LitKind::Float,
            TokenKind::Imag => LitKind::Imag,
            TokenKind::Char => LitKind::Char,
            _ => LitKind::String,
        };
        BasicLit {
            kind,
            value: tok.text,
            span,
        }
    }

    fn parse_func_type_or_lit(&mut self) -> Expr {
        self.expect(TokenKind::Func);
        let ty = self.parse_signature();
        if !self.at(TokenKind::LBrace) {
            return Expr::FuncType(ty);
        }
        self.expr_lev += 1;
        let body = self.parse_block();
        self.expr_lev -= 1;
        Expr::FuncLit { ty, body }
    }

    fn parse_primary_expr(&mut self) -> Expr {
        let mut x = self.parse_operand();
        loop {
            match self.tok.kind {
                TokenKind::Period => {
                    self.next();
                    x = match self.tok.kind {
                        TokenKind::Ident => Expr::Selector {
                            x: Box::new(x),
                            sel: self.parse_ident(),
                        },
                        TokenKind::LParen => {
                            self.next();
                            let ty = if self.got(TokenKind::Type) {
                                None
                            } else {
                                Some(Box::new(self.parse_type()))
                            };
                            self.expect(TokenKind::RParen);
                            Expr::TypeAssert { x: Box::new(x), ty }
                        }
                        _ => {
                            let span = self.tok.span();
                            self.error_expected("selector or type assertion");
                            Expr::Bad(span)
                        }
                    };
                }
                TokenKind::LBrack => x = self.parse_index_or_slice(x),
                TokenKind::LParen => x = self.parse_call(x),
                TokenKind::LBrace => {
                    if is_literal_type(&x) && (self.expr_lev >= 0 || !is_type_name(&x)) {
                        x = self.parse_composite_lit(Some(x));
                    } else {
                        return x;
                    }
                }
                _ => return x,
            }
        }
    }

    fn parse_index_or_slice(&mut self, x: Expr) -> Expr {
        self.expect(TokenKind::LBrack);
        self.expr_lev += 1;
        let mut index: [Option<Box<Expr>>; 3] = [None, None, None];
        let mut colons = 0;
        if !self.at(TokenKind::Colon) {
            index[0] = Some(Box::new(self.parse_expr()));
        }
        while self.at(TokenKind::Colon) && colons < 2 {
            colons += 1;
            self.next();
            if !matches!(
                self.tok.kind,
                TokenKind::Colon | TokenKind::RBrack | TokenKind::Eof
            ) {
                index[colons] = Some(Box::new(self.parse_expr()));
            }
        }
        self.expr_lev -= 1;
        let rbrack = self.expect(TokenKind::RBrack);

        let [low, high, max] = index;
        if colons > 0 {
            return Expr::Slice {
                x: Box::new(x),
                low,
                high,
                max,
            };
        }
        Expr::Index {
            x: Box::new(x),
            index: low.unwrap_or_else(|| Box::new(Expr::Bad(rbrack))),
        }
    }

    fn parse_call(&mut self, fun: Expr) -> Expr {
        self.expect(TokenKind::LParen);
        self.expr_lev += 1;
        let mut args = Vec::new();
        let mut ellipsis = false;
        while !self.at(TokenKind::RParen) && !self.at(TokenKind::Eof) {
            args.push(self.parse_expr());
            if self.got(TokenKind::Ellipsis) {
                ellipsis = true;
            }
            if !self.got(TokenKind::Comma) {
                break;
            }
        }
        self.expr_lev -= 1;
        self.expect_closing(TokenKind::RParen, "argument list");
        Expr::Call(CallExpr {
            fun: Box::new(fun),
            args,
            ellipsis,
        })
    }

    pub(super) fn parse_composite_lit(&mut self, ty: Option<Expr>) -> Expr {
        self.expect(TokenKind::LBrace);
        self.expr_lev += 1;
        let mut elts = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            elts.push(self.parse_element());
            if !self.got(TokenKind::Comma) {
                break;
            }
        }
        self.expr_lev -= 1;
        self.expect_closing(TokenKind::RBrace, "composite literal");
        Expr::CompositeLit {
            ty: ty.map(Box::new),
            elts,
        }
    }

    fn parse_element(&mut self) -> Expr {
        let x = self.parse_element_value();
        if self.got(TokenKind::Colon) {
            let value = self.parse_element_value();
            return Expr::key_value(x, value);
        }
        x
    }

    fn parse_element_value(&mut self) -> Expr {
        if self.at(TokenKind::LBrace) {
            return self.parse_composite_lit(None);
        }
        self.parse_expr()
    }

    /// A closing delimiter; a newline right before it means a missing `,`.
    fn expect_closing(&mut self, kind: TokenKind, context: &str) {
        if self.at(TokenKind::Semicolon) && self.tok.text == "\n" {
            self.error_expected(&format!("',' in {context}"));
            self.next();
        }
        self.expect(kind);
    }
}

fn is_type_name(x: &Expr) -> bool {
    match x {
        Expr::Ident(_) => true,
        Expr::Selector { x, .. } => matches!(**x, Expr::Ident(_)),
        _ => false,
    }
}

fn is_literal_type(x: &Expr) -> bool {
    is_type_name(x)
        || matches!(
            x,
            Expr::ArrayType { .. } | Expr::StructType(_) | Expr::MapType { .. }
        )
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expr, LitKind};
    use crate::parser::parse_expr;
    use crate::token::TokenKind;

    #[test]
    fn precedence_climbs() {
        let expr = parse_expr("a + b * c").unwrap();
        let Expr::Binary { op, y, .. } = expr else {
            panic!("expected binary expression");
        };
        assert_eq!(op, TokenKind::Add);
        assert!(matches!(*y, Expr::Binary { op: TokenKind::Mul, .. }));
    }

    #[test]
    fn less_than_stays_a_comparison() {
        let expr = parse_expr("a < b").unwrap();
        assert!(matches!(expr, Expr::Binary { op: TokenKind::Lss, .. }));
    }

    #[test]
    fn composite_literal_with_keys() {
        let expr = parse_expr(r#"T{a: 1, b: "x"}"#).unwrap();
        let Expr::CompositeLit { ty, elts } = expr else {
            panic!("expected composite literal");
        };
        assert!(matches!(ty.as_deref(), Some(Expr::Ident(id)) if id.name == "T"));
        assert_eq!(elts.len(), 2);
        let Expr::KeyValue { value, .. } = &elts[1] else {
            panic!("expected key-value element");
        };
        assert!(matches!(&**value, Expr::BasicLit(lit) if lit.kind == LitKind::String));
    }
}
