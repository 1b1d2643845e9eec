use super::Parser;
use crate::ast::{
    Block, CaseClause, Decl, Expr, ForStmt, FuncDecl, GenDecl, IfStmt, RangeStmt, Spec, Stmt,
    SwitchStmt,
};
use crate::error::ErrorKind;
use crate::token::TokenKind;

#[derive(Clone, Copy, PartialEq, Eq)]
enum SimpleMode {
    Basic,
    /// A `for` header, where `k, v := range x` may appear.
    RangeOk,
}

impl Parser<'_> {
    pub(super) fn parse_decl(&mut self) -> Decl {
        match self.tok.kind {
            TokenKind::Import | TokenKind::Const | TokenKind::Var | TokenKind::Type => {
                Decl::Gen(self.parse_gen_decl())
            }
            TokenKind::Func => Decl::Func(self.parse_func_decl()),
            _ => {
                let span = self.tok.span();
                self.error_expected("declaration");
                while !matches!(
                    self.tok.kind,
                    TokenKind::Import
                        | TokenKind::Const
                        | TokenKind::Var
                        | TokenKind::Type
                        | TokenKind::Func
                        | TokenKind::Eof
                ) {
                    self.next();
                }
                Decl::Bad(span)
            }
        }
    }

    fn parse_gen_decl(&mut self) -> GenDecl {
        let keyword = self.next().kind;
        let mut specs = Vec::new();
        let grouped = self.got(TokenKind::LParen);
        if grouped {
            while !self.at(TokenKind::RParen) && !self.at(TokenKind::Eof) {
                specs.push(self.guarded(|p| {
                    let spec = p.parse_spec(keyword);
                    p.expect_semi();
                    spec
                }));
            }
            self.expect(TokenKind::RParen);
        } else {
            specs.push(self.parse_spec(keyword));
        }
        self.expect_semi();
        GenDecl {
            keyword,
            grouped,
            specs,
        }
    }

    fn parse_spec(&mut self, keyword: TokenKind) -> Spec {
        match keyword {
            TokenKind::Import => {
                let name = self.at(TokenKind::Ident).then(|| self.parse_ident());
                if !self.at(TokenKind::String) {
                    self.error_expected("import path");
                }
                let path = self.parse_basic_lit();
                Spec::Import { name, path }
            }
            TokenKind::Type => {
                let name = self.parse_ident();
                let assign = self.got(TokenKind::Assign);
                let ty = self.parse_type();
                Spec::Type { name, assign, ty }
            }
            _ => {
                let names = self.parse_ident_list();
                let ty = if matches!(
                    self.tok.kind,
                    TokenKind::Assign | TokenKind::Semicolon | TokenKind::RParen
                ) {
                    None
                } else {
                    Some(self.parse_type())
                };
                let values = if self.got(TokenKind::Assign) {
                    self.parse_expr_list()
                } else {
                    Vec::new()
                };
                Spec::Value { names, ty, values }
            }
        }
    }

    fn parse_func_decl(&mut self) -> FuncDecl {
        self.expect(TokenKind::Func);
        let recv = self
            .at(TokenKind::LParen)
            .then(|| self.parse_parameters());
        let name = self.parse_ident();
        if self.at(TokenKind::LBrack) {
            self.error(self.tok.span(), ErrorKind::Unsupported("type parameters"));
            while !self.at(TokenKind::RBrack) && !self.at(TokenKind::Eof) {
                self.next();
            }
            self.got(TokenKind::RBrack);
        }
        let ty = self.parse_signature();
        let body = self.at(TokenKind::LBrace).then(|| self.parse_block());
        self.expect_semi();
        FuncDecl {
            recv,
            name,
            ty,
            body,
        }
    }

    pub(super) fn parse_block(&mut self) -> Block {
        self.expect(TokenKind::LBrace);
        let stmts = self.parse_stmt_list();
        self.expect(TokenKind::RBrace);
        Block { stmts }
    }

    fn parse_stmt_list(&mut self) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        while !matches!(
            self.tok.kind,
            TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof
        ) {
            stmts.push(self.guarded(Self::parse_stmt));
        }
        stmts
    }

    fn parse_stmt(&mut self) -> Stmt {
        match self.tok.kind {
            TokenKind::Const | TokenKind::Type | TokenKind::Var => {
                Stmt::Decl(self.parse_gen_decl())
            }
            TokenKind::Ident
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::Imag
            | TokenKind::Char
            | TokenKind::String
            | TokenKind::Func
            | TokenKind::LParen
            | TokenKind::LBrack
            | TokenKind::Struct
            | TokenKind::Map
            | TokenKind::Chan
            | TokenKind::Interface
            | TokenKind::Add
            | TokenKind::Sub
            | TokenKind::Mul
            | TokenKind::And
            | TokenKind::Xor
            | TokenKind::Arrow
            | TokenKind::Not
            | TokenKind::TagOpen => {
                let stmt = self.parse_simple_stmt(SimpleMode::Basic);
                self.expect_semi();
                stmt
            }
            TokenKind::Go | TokenKind::Defer => {
                let keyword = self.next().kind;
                let call = self.parse_expr();
                self.expect_semi();
                if keyword == TokenKind::Go {
                    Stmt::Go(call)
                } else {
                    Stmt::Defer(call)
                }
            }
            TokenKind::Return => {
                self.next();
                let results = if matches!(self.tok.kind, TokenKind::Semicolon | TokenKind::RBrace) {
                    Vec::new()
                } else {
                    self.parse_expr_list()
                };
                self.expect_semi();
                Stmt::Return(results)
            }
            TokenKind::Break | TokenKind::Continue | TokenKind::Fallthrough => {
                let keyword = self.next().kind;
                if self.at(TokenKind::Ident) {
                    self.error(self.tok.span(), ErrorKind::Unsupported("branch label"));
                    self.next();
                }
                self.expect_semi();
                Stmt::Branch(keyword)
            }
            TokenKind::LBrace => {
                let block = self.parse_block();
                self.expect_semi();
                Stmt::Block(block)
            }
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::Switch => self.parse_switch_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::Semicolon => {
                self.next();
                Stmt::Empty
            }
            TokenKind::Goto | TokenKind::Select => {
                let span = self.tok.span();
                let what = if self.at(TokenKind::Goto) { "goto" } else { "select" };
                self.error(span, ErrorKind::Unsupported(what));
                self.sync_stmt();
                Stmt::Bad(span)
            }
            _ => {
                let span = self.tok.span();
                self.error_expected("statement");
                self.sync_stmt();
                Stmt::Bad(span)
            }
        }
    }

    fn parse_simple_stmt(&mut self, mode: SimpleMode) -> Stmt {
        let lhs = self.parse_expr_list();

        if self.tok.kind.is_assign_op() {
            let op = self.next().kind;
            if mode == SimpleMode::RangeOk
                && self.at(TokenKind::Range)
                && matches!(op, TokenKind::Assign | TokenKind::Define)
            {
                self.next();
                let x = self.parse_expr();
                let mut lhs = lhs.into_iter();
                return Stmt::Range(RangeStmt {
                    key: lhs.next(),
                    value: lhs.next(),
                    define: op == TokenKind::Define,
                    x,
                    body: Block::default(),
                });
            }
            let rhs = self.parse_expr_list();
            return Stmt::Assign { lhs, op, rhs };
        }

        if lhs.len() > 1 {
            self.error_expected("1 expression");
        }
        let Some(x) = lhs.into_iter().next() else {
            return Stmt::Bad(self.tok.span());
        };
        match self.tok.kind {
            TokenKind::Colon => {
                self.error(self.tok.span(), ErrorKind::Unsupported("labeled statement"));
                self.next();
                Stmt::Expr(x)
            }
            TokenKind::Arrow => {
                self.error(self.tok.span(), ErrorKind::Unsupported("send statement"));
                self.next();
                self.parse_expr();
                Stmt::Expr(x)
            }
            TokenKind::Inc | TokenKind::Dec => {
                let op = self.next().kind;
                Stmt::IncDec { x, op }
            }
            _ => Stmt::Expr(x),
        }
    }

    fn parse_if_stmt(&mut self) -> Stmt {
        let stmt = self.parse_if();
        self.expect_semi();
        Stmt::If(stmt)
    }

    fn parse_if(&mut self) -> IfStmt {
        self.expect(TokenKind::If);
        let (init, cond) = self.no_composite(Self::parse_if_header);
        let body = self.parse_block();
        let els = if self.got(TokenKind::Else) {
            match self.tok.kind {
                TokenKind::If => Some(Box::new(Stmt::If(self.parse_if()))),
                TokenKind::LBrace => Some(Box::new(Stmt::Block(self.parse_block()))),
                _ => {
                    let span = self.tok.span();
                    self.error_expected("if statement or block");
                    Some(Box::new(Stmt::Bad(span)))
                }
            }
        } else {
            None
        };
        IfStmt {
            init,
            cond,
            body,
            els,
        }
    }

    fn parse_if_header(&mut self) -> (Option<Box<Stmt>>, Expr) {
        if self.at(TokenKind::LBrace) {
            let span = self.tok.span();
            self.error_expected("condition");
            return (None, Expr::Bad(span));
        }

        let mut init = None;
        if !self.at(TokenKind::Semicolon) {
            init = Some(self.parse_simple_stmt(SimpleMode::Basic));
        }
        if self.got(TokenKind::Semicolon) {
            let init = init.map(Box::new);
            if self.at(TokenKind::LBrace) {
                let span = self.tok.span();
                self.error_expected("condition");
                return (init, Expr::Bad(span));
            }
            return (init, self.parse_expr());
        }

        match init {
            Some(Stmt::Expr(cond)) => (None, cond),
            _ => {
                let span = self.tok.span();
                self.error_expected("condition");
                (None, Expr::Bad(span))
            }
        }
    }

    fn parse_switch_stmt(&mut self) -> Stmt {
        self.expect(TokenKind::Switch);
        let (init, tag) = self.no_composite(|p| {
            let (mut init, mut tag) = (None, None);
            if !p.at(TokenKind::LBrace) {
                if !p.at(TokenKind::Semicolon) {
                    tag = Some(p.parse_simple_stmt(SimpleMode::Basic));
                }
                if p.got(TokenKind::Semicolon) {
                    init = tag.take();
                    if !p.at(TokenKind::LBrace) {
                        tag = Some(p.parse_simple_stmt(SimpleMode::Basic));
                    }
                }
            }
            (init, tag)
        });
        let tag = match tag {
            None => None,
            Some(Stmt::Expr(x)) => Some(x),
            Some(_) => {
                self.error(self.tok.span(), ErrorKind::Unsupported("type switch"));
                None
            }
        };

        self.expect(TokenKind::LBrace);
        let mut clauses = Vec::new();
        while self.at(TokenKind::Case) || self.at(TokenKind::Default) {
            clauses.push(self.parse_case_clause());
        }
        self.expect(TokenKind::RBrace);
        self.expect_semi();
        Stmt::Switch(SwitchStmt {
            init: init.map(Box::new),
            tag,
            clauses,
        })
    }

    fn parse_case_clause(&mut self) -> CaseClause {
        let list = if self.got(TokenKind::Case) {
            Some(self.parse_expr_list())
        } else {
            self.expect(TokenKind::Default);
            None
        };
        self.expect(TokenKind::Colon);
        let body = self.parse_stmt_list();
        CaseClause { list, body }
    }

    fn parse_for_stmt(&mut self) -> Stmt {
        self.expect(TokenKind::For);
        let (init, cond, post) = self.no_composite(|p| {
            let (mut init, mut cond, mut post) = (None, None, None);
            if p.at(TokenKind::LBrace) {
                return (init, cond, post);
            }
            if p.got(TokenKind::Range) {
                let x = p.parse_expr();
                let range = Stmt::Range(RangeStmt {
                    key: None,
                    value: None,
                    define: false,
                    x,
                    body: Block::default(),
                });
                return (None, Some(range), None);
            }
            if !p.at(TokenKind::Semicolon) {
                cond = Some(p.parse_simple_stmt(SimpleMode::RangeOk));
            }
            if !matches!(cond, Some(Stmt::Range(_))) && p.got(TokenKind::Semicolon) {
                init = cond.take();
                if !p.at(TokenKind::Semicolon) {
                    cond = Some(p.parse_simple_stmt(SimpleMode::Basic));
                }
                p.expect(TokenKind::Semicolon);
                if !p.at(TokenKind::LBrace) {
                    post = Some(p.parse_simple_stmt(SimpleMode::Basic));
                }
            }
            (init, cond, post)
        });
        let body = self.parse_block();
        self.expect_semi();

        if let Some(Stmt::Range(mut range)) = cond {
            range.body = body;
            return Stmt::Range(range);
        }
        let cond = match cond {
            None => None,
            Some(Stmt::Expr(x)) => Some(x),
            Some(_) => {
                self.error_expected("for loop condition");
                None
            }
        };
        Stmt::For(ForStmt {
            init: init.map(Box::new),
            cond,
            post: post.map(Box::new),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Decl, Stmt};
    use crate::error::ErrorKind;
    use crate::parser::parse_file;

    fn body(src: &str) -> Vec<Stmt> {
        let file = parse_file(&format!("package p\nfunc f() {{\n{src}\n}}\n")).unwrap();
        match file.decls.into_iter().next() {
            Some(Decl::Func(func)) => func.body.map(|b| b.stmts).unwrap_or_default(),
            other => panic!("expected func decl, got {other:?}"),
        }
    }

    #[test]
    fn for_forms() {
        let stmts = body("for {}\nfor i < n {}\nfor i := 0; i < n; i++ {}\nfor k, v := range m {}\nfor range ch {}");
        assert!(matches!(stmts[0], Stmt::For(_)));
        assert!(matches!(&stmts[1], Stmt::For(f) if f.init.is_none() && f.cond.is_some()));
        assert!(matches!(&stmts[2], Stmt::For(f) if f.init.is_some() && f.post.is_some()));
        assert!(matches!(&stmts[3], Stmt::Range(r) if r.define && r.value.is_some()));
        assert!(matches!(&stmts[4], Stmt::Range(r) if r.key.is_none()));
    }

    #[test]
    fn if_with_init_and_else_if() {
        let stmts = body("if x := f(); x > 0 {\n} else if y {\n} else {\n}");
        let Stmt::If(s) = &stmts[0] else {
            panic!("expected if statement");
        };
        assert!(s.init.is_some());
        assert!(matches!(s.els.as_deref(), Some(Stmt::If(inner)) if inner.els.is_some()));
    }

    #[test]
    fn composite_literal_not_taken_in_if_header() {
        let stmts = body("if x == T {\n}");
        assert!(matches!(stmts[0], Stmt::If(_)));
    }

    #[test]
    fn type_parameters_are_unsupported() {
        let err = parse_file("package p\nfunc Map[T any](x T) {}\n").unwrap_err();
        assert!(err.iter().any(|d| d.kind == ErrorKind::Unsupported("type parameters")));
        assert_eq!(err.len(), 1);
    }
}
