use super::Parser;
use crate::ast::{Expr, Field, FuncType, Ident};
use crate::error::ErrorKind;
use crate::token::TokenKind;

impl Parser<'_> {
    pub(super) fn parse_type(&mut self) -> Expr {
        if let Some(ty) = self.try_type() {
            return ty;
        }
        let span = self.tok.span();
        self.error_expected("type");
        Expr::Bad(span)
    }

    /// A type if one starts here; consumes nothing otherwise.
    pub(super) fn try_type(&mut self) -> Option<Expr> {
        let ty = match self.tok.kind {
            TokenKind::Ident => self.parse_type_name(),
            TokenKind::LBrack => {
                self.next();
                let len = if self.at(TokenKind::RBrack) {
                    None
                } else if self.got(TokenKind::Ellipsis) {
                    Some(Box::new(Expr::Ellipsis(None)))
                } else {
                    self.expr_lev += 1;
                    let len = self.parse_expr();
                    self.expr_lev -= 1;
                    Some(Box::new(len))
                };
                self.expect(TokenKind::RBrack);
                Expr::ArrayType {
                    len,
                    elem: Box::new(self.parse_type()),
                }
            }
            TokenKind::Struct => self.parse_struct_type(),
            TokenKind::Interface => self.parse_interface_type(),
            TokenKind::Mul => {
                self.next();
                Expr::Star(Box::new(self.parse_type()))
            }
            TokenKind::Func => {
                self.next();
                Expr::FuncType(self.parse_signature())
            }
            TokenKind::Map => {
                self.next();
                self.expect(TokenKind::LBrack);
                let key = self.parse_type();
                self.expect(TokenKind::RBrack);
                Expr::MapType {
                    key: Box::new(key),
                    value: Box::new(self.parse_type()),
                }
            }
            TokenKind::Chan => {
                self.next();
                if self.at(TokenKind::Arrow) {
                    self.error(self.tok.span(), ErrorKind::Unsupported("channel direction"));
                    self.next();
                }
                Expr::ChanType(Box::new(self.parse_type()))
            }
            TokenKind::LParen => {
                self.next();
                let ty = self.parse_type();
                self.expect(TokenKind::RParen);
                Expr::Paren(Box::new(ty))
            }
            _ => return None,
        };
        Some(ty)
    }

    fn parse_type_name(&mut self) -> Expr {
        let name = Expr::Ident(self.parse_ident());
        if self.got(TokenKind::Period) {
            return Expr::Selector {
                x: Box::new(name),
                sel: self.parse_ident(),
            };
        }
        name
    }

    fn parse_struct_type(&mut self) -> Expr {
        self.expect(TokenKind::Struct);
        self.expect(TokenKind::LBrace);
        let mut fields = Vec::new();
        while self.at(TokenKind::Ident) || self.at(TokenKind::Mul) {
            fields.push(self.parse_field_decl());
            self.expect_semi();
        }
        self.expect(TokenKind::RBrace);
        Expr::StructType(fields)
    }

    fn parse_field_decl(&mut self) -> Field {
        let (names, ty) = if self.at(TokenKind::Mul) {
            (Vec::new(), self.parse_type())
        } else {
            let first = self.parse_ident();
            match self.tok.kind {
                // embedded field
                TokenKind::Period => {
                    self.next();
                    let ty = Expr::Selector {
                        x: Box::new(Expr::Ident(first)),
                        sel: self.parse_ident(),
                    };
                    (Vec::new(), ty)
                }
                TokenKind::Semicolon | TokenKind::RBrace | TokenKind::String => {
                    (Vec::new(), Expr::Ident(first))
                }
                _ => {
                    let mut names = vec![first];
                    while self.got(TokenKind::Comma) {
                        names.push(self.parse_ident());
                    }
                    (names, self.parse_type())
                }
            }
        };
        let tag = self.at(TokenKind::String).then(|| self.parse_basic_lit());
        Field { names, ty, tag }
    }

    fn parse_interface_type(&mut self) -> Expr {
        self.expect(TokenKind::Interface);
        self.expect(TokenKind::LBrace);
        let mut methods = Vec::new();
        while self.at(TokenKind::Ident) {
            let name = self.parse_ident();
            let field = if self.at(TokenKind::LParen) {
                Field {
                    names: vec![name],
                    ty: Expr::FuncType(self.parse_signature()),
                    tag: None,
                }
            } else {
                let mut ty = Expr::Ident(name);
                if self.got(TokenKind::Period) {
                    ty = Expr::Selector {
                        x: Box::new(ty),
                        sel: self.parse_ident(),
                    };
                }
                Field {
                    names: Vec::new(),
                    ty,
                    tag: None,
                }
            };
            methods.push(field);
            self.expect_semi();
        }
        self.expect(TokenKind::RBrace);
        Expr::InterfaceType(methods)
    }

    /// Parameters and optional results of a function.
    pub(super) fn parse_signature(&mut self) -> FuncType {
        let params = self.parse_parameters();
        let results = if self.at(TokenKind::LParen) {
            self.parse_parameters()
        } else if let Some(ty) = self.try_type() {
            vec![Field {
                names: Vec::new(),
                ty,
                tag: None,
            }]
        } else {
            Vec::new()
        };
        FuncType { params, results }
    }

    /// `(a, b int, c ...string)` or `(int, string)`.
    ///
    /// The leading list is ambiguous until its end: if a type follows it, it
    /// was a list of names, otherwise a list of types.
    pub(super) fn parse_parameters(&mut self) -> Vec<Field> {
        self.expect(TokenKind::LParen);
        let mut fields = Vec::new();
        if !self.at(TokenKind::RParen) {
            let mut list = vec![self.parse_param_type()];
            while self.got(TokenKind::Comma) {
                if self.at(TokenKind::RParen) {
                    break;
                }
                list.push(self.parse_param_type());
            }

            match self.try_param_type() {
                Some(ty) => {
                    let names = list.into_iter().map(|x| self.param_name(x)).collect();
                    fields.push(Field {
                        names,
                        ty,
                        tag: None,
                    });
                    if self.got(TokenKind::Comma) {
                        while !self.at(TokenKind::RParen) && !self.at(TokenKind::Eof) {
                            let names = self.parse_ident_list();
                            let ty = self.parse_param_type();
                            fields.push(Field {
                                names,
                                ty,
                                tag: None,
                            });
                            if !self.got(TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                }
                None => fields.extend(list.into_iter().map(|ty| Field {
                    names: Vec::new(),
                    ty,
                    tag: None,
                })),
            }
        }
        self.expect(TokenKind::RParen);
        fields
    }

    fn parse_param_type(&mut self) -> Expr {
        if self.got(TokenKind::Ellipsis) {
            return Expr::Ellipsis(Some(Box::new(self.parse_type())));
        }
        self.parse_type()
    }

    fn try_param_type(&mut self) -> Option<Expr> {
        if self.at(TokenKind::Ellipsis) {
            return Some(self.parse_param_type());
        }
        self.try_type()
    }

    fn param_name(&mut self, x: Expr) -> Ident {
        match x {
            Expr::Ident(ident) => ident,
            _ => {
                self.error(self.tok.span(), ErrorKind::MixedParameters);
                Ident::new("_")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Decl, Expr};
    use crate::parser::parse_file;

    fn signature(src: &str) -> crate::ast::FuncType {
        let file = parse_file(&format!("package p\nfunc f{src}\n")).unwrap();
        match file.decls.into_iter().next() {
            Some(Decl::Func(func)) => func.ty,
            other => panic!("expected func decl, got {other:?}"),
        }
    }

    #[test]
    fn grouped_parameter_names() {
        let ty = signature("(a, b int, c ...string) error");
        assert_eq!(ty.params.len(), 2);
        assert_eq!(ty.params[0].names.len(), 2);
        assert!(matches!(ty.params[1].ty, Expr::Ellipsis(Some(_))));
        assert_eq!(ty.results.len(), 1);
    }

    #[test]
    fn anonymous_parameters() {
        let ty = signature("(int, []string) (bool, error)");
        assert_eq!(ty.params.len(), 2);
        assert!(ty.params.iter().all(|p| p.names.is_empty()));
        assert_eq!(ty.results.len(), 2);
    }
}
