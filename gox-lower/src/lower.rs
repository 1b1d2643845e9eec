//! Rewrites markup nodes into calls against the rendering API.
//!
//! Lowering consumes the tree and returns a new one. Nodes other than tags
//! come back unchanged apart from their lowered subexpressions, so lowering
//! a tree with no tags left is the identity.

use gox_syntax::ast::{
    AttrStmt, Block, CallExpr, CaseClause, Decl, Expr, File, ForStmt, FuncDecl, GenDecl, Ident,
    IfStmt, RangeStmt, Spec, Stmt, SwitchStmt, TagExpr,
};
use gox_syntax::print_expr;
use tracing::debug;

use crate::tables::{RenderApi, SPREAD_ATTR, TEXT_TAG, event_name, property_name};

/// Translation strategy, picked from the shape of the tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<div>`: lowercase identifier.
    Element,
    /// `<Foo(args)>`: the call itself builds the component.
    ComponentCall,
    /// `<Foo>` or `<pkg.Foo>`: a composite literal of the named type.
    ComponentLiteral,
}

pub fn classify(name: &Expr) -> TagKind {
    match name {
        Expr::Call(_) => TagKind::ComponentCall,
        Expr::Ident(ident) if !ident.is_exported() => TagKind::Element,
        _ => TagKind::ComponentLiteral,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Lowerer {
    api: RenderApi,
}

impl Lowerer {
    pub fn new(api: RenderApi) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &RenderApi {
        &self.api
    }

    pub fn lower_file(&self, file: File) -> File {
        File {
            package: file.package,
            decls: file.decls.into_iter().map(|d| self.lower_decl(d)).collect(),
        }
    }

    fn lower_decl(&self, decl: Decl) -> Decl {
        match decl {
            Decl::Bad(span) => Decl::Bad(span),
            Decl::Gen(gen_decl) => Decl::Gen(self.lower_gen_decl(gen_decl)),
            Decl::Func(func) => Decl::Func(FuncDecl {
                body: func.body.map(|b| self.lower_block(b)),
                ..func
            }),
        }
    }

    fn lower_gen_decl(&self, decl: GenDecl) -> GenDecl {
        let specs = decl
            .specs
            .into_iter()
            .map(|spec| match spec {
                Spec::Value { names, ty, values } => Spec::Value {
                    names,
                    ty,
                    values: self.lower_exprs(values),
                },
                other => other,
            })
            .collect();
        GenDecl { specs, ..decl }
    }

    fn lower_block(&self, block: Block) -> Block {
        Block {
            stmts: block.stmts.into_iter().map(|s| self.lower_stmt(s)).collect(),
        }
    }

    fn lower_stmt(&self, stmt: Stmt) -> Stmt {
        match stmt {
            Stmt::Bad(_) | Stmt::Empty | Stmt::Branch(_) => stmt,
            Stmt::Decl(decl) => Stmt::Decl(self.lower_gen_decl(decl)),
            Stmt::Expr(x) => Stmt::Expr(self.lower_expr(x)),
            Stmt::IncDec { x, op } => Stmt::IncDec {
                x: self.lower_expr(x),
                op,
            },
            Stmt::Assign { lhs, op, rhs } => Stmt::Assign {
                lhs: self.lower_exprs(lhs),
                op,
                rhs: self.lower_exprs(rhs),
            },
            Stmt::Go(x) => Stmt::Go(self.lower_expr(x)),
            Stmt::Defer(x) => Stmt::Defer(self.lower_expr(x)),
            Stmt::Return(results) => Stmt::Return(self.lower_exprs(results)),
            Stmt::Block(block) => Stmt::Block(self.lower_block(block)),
            Stmt::If(s) => Stmt::If(self.lower_if(s)),
            Stmt::Switch(s) => Stmt::Switch(SwitchStmt {
                init: self.lower_boxed_stmt(s.init),
                tag: s.tag.map(|t| self.lower_expr(t)),
                clauses: s
                    .clauses
                    .into_iter()
                    .map(|c| CaseClause {
                        list: c.list.map(|l| self.lower_exprs(l)),
                        body: c.body.into_iter().map(|s| self.lower_stmt(s)).collect(),
                    })
                    .collect(),
            }),
            Stmt::For(s) => Stmt::For(ForStmt {
                init: self.lower_boxed_stmt(s.init),
                cond: s.cond.map(|c| self.lower_expr(c)),
                post: self.lower_boxed_stmt(s.post),
                body: self.lower_block(s.body),
            }),
            Stmt::Range(s) => Stmt::Range(RangeStmt {
                x: self.lower_expr(s.x),
                body: self.lower_block(s.body),
                ..s
            }),
        }
    }

    fn lower_if(&self, s: IfStmt) -> IfStmt {
        IfStmt {
            init: self.lower_boxed_stmt(s.init),
            cond: self.lower_expr(s.cond),
            body: self.lower_block(s.body),
            els: self.lower_boxed_stmt(s.els),
        }
    }

    fn lower_boxed_stmt(&self, stmt: Option<Box<Stmt>>) -> Option<Box<Stmt>> {
        stmt.map(|s| Box::new(self.lower_stmt(*s)))
    }

    fn lower_exprs(&self, exprs: Vec<Expr>) -> Vec<Expr> {
        exprs.into_iter().map(|x| self.lower_expr(x)).collect()
    }

    fn lower_boxed(&self, x: Box<Expr>) -> Box<Expr> {
        Box::new(self.lower_expr(*x))
    }

    fn lower_opt(&self, x: Option<Box<Expr>>) -> Option<Box<Expr>> {
        x.map(|x| self.lower_boxed(x))
    }

    pub fn lower_expr(&self, expr: Expr) -> Expr {
        match expr {
            Expr::Tag(tag) => self.lower_tag(tag),
            Expr::HostExpr(_) | Expr::BareText(_) => self.child(expr),

            Expr::Paren(x) => Expr::Paren(self.lower_boxed(x)),
            Expr::Selector { x, sel } => Expr::Selector {
                x: self.lower_boxed(x),
                sel,
            },
            Expr::Index { x, index } => Expr::Index {
                x: self.lower_boxed(x),
                index: self.lower_boxed(index),
            },
            Expr::Slice { x, low, high, max } => Expr::Slice {
                x: self.lower_boxed(x),
                low: self.lower_opt(low),
                high: self.lower_opt(high),
                max: self.lower_opt(max),
            },
            Expr::TypeAssert { x, ty } => Expr::TypeAssert {
                x: self.lower_boxed(x),
                ty,
            },
            Expr::Call(call) => Expr::Call(CallExpr {
                fun: self.lower_boxed(call.fun),
                args: self.lower_exprs(call.args),
                ellipsis: call.ellipsis,
            }),
            Expr::Star(x) => Expr::Star(self.lower_boxed(x)),
            Expr::Unary { op, x } => Expr::Unary {
                op,
                x: self.lower_boxed(x),
            },
            Expr::Binary { op, x, y } => Expr::Binary {
                op,
                x: self.lower_boxed(x),
                y: self.lower_boxed(y),
            },
            Expr::KeyValue { key, value } => Expr::KeyValue {
                key: self.lower_boxed(key),
                value: self.lower_boxed(value),
            },
            Expr::CompositeLit { ty, elts } => Expr::CompositeLit {
                ty,
                elts: self.lower_exprs(elts),
            },
            Expr::FuncLit { ty, body } => Expr::FuncLit {
                ty,
                body: self.lower_block(body),
            },

            // types and leaves hold no markup
            Expr::Bad(_)
            | Expr::Ident(_)
            | Expr::BasicLit(_)
            | Expr::Ellipsis(_)
            | Expr::ArrayType { .. }
            | Expr::MapType { .. }
            | Expr::ChanType(_)
            | Expr::FuncType(_)
            | Expr::StructType(_)
            | Expr::InterfaceType(_) => expr,
        }
    }

    fn lower_tag(&self, tag: TagExpr) -> Expr {
        let TagExpr {
            name,
            attrs,
            children,
            ..
        } = tag;
        debug!(
            kind = ?classify(&name),
            name = %print_expr(&name),
            attrs = attrs.len(),
            children = children.as_ref().map_or(0, Vec::len),
            "lowering tag"
        );
        match *name {
            Expr::Call(call) => self.component_call(call, attrs, children),
            Expr::Ident(ident) if !ident.is_exported() => {
                self.element(&ident.name, attrs, children.unwrap_or_default())
            }
            ty => self.component_literal(ty, attrs, children.unwrap_or_default()),
        }
    }

    /// `vecty.Tag("div", vecty.Markup(...), children...)`
    fn element(&self, name: &str, attrs: Vec<AttrStmt>, children: Vec<Expr>) -> Expr {
        let names = &self.api.names;
        let mut args = Vec::new();
        let ctor = if name == TEXT_TAG {
            names.plain_text
        } else {
            args.push(Expr::string(name));
            names.tag
        };
        if !attrs.is_empty() {
            args.push(self.markup(attrs));
        }
        args.extend(self.children_args(children));
        Expr::call(self.api_fn(ctor), args)
    }

    /// `&Foo{attr: value, Body: vecty.Writers(children...)}`
    fn component_literal(&self, ty: Expr, attrs: Vec<AttrStmt>, children: Vec<Expr>) -> Expr {
        let mut elts: Vec<Expr> = attrs
            .into_iter()
            .map(|attr| Expr::key_value(Expr::Ident(attr.name), self.attr_value(attr.value)))
            .collect();
        if !children.is_empty() {
            let body = Expr::Ident(Ident::new(self.api.names.body_field));
            elts.push(Expr::key_value(body, self.writers(children)));
        }
        Expr::address_of(Expr::CompositeLit {
            ty: Some(Box::new(self.lower_expr(ty))),
            elts,
        })
    }

    /// The tag's own call, with markup and children appended as arguments.
    fn component_call(
        &self,
        call: CallExpr,
        attrs: Vec<AttrStmt>,
        children: Option<Vec<Expr>>,
    ) -> Expr {
        let mut args = self.lower_exprs(call.args);
        if !attrs.is_empty() {
            args.push(self.markup(attrs));
        }
        if let Some(children) = children.filter(|c| !c.is_empty()) {
            args.push(self.writers(children));
        }
        Expr::Call(CallExpr {
            fun: self.lower_boxed(call.fun),
            args,
            ellipsis: call.ellipsis,
        })
    }

    fn markup(&self, attrs: Vec<AttrStmt>) -> Expr {
        Expr::call(self.api_fn(self.api.names.markup), self.map_props(attrs))
    }

    fn writers(&self, children: Vec<Expr>) -> Expr {
        Expr::call(self.api_fn(self.api.names.writers), self.children_args(children))
    }

    fn map_props(&self, attrs: Vec<AttrStmt>) -> Vec<Expr> {
        let names = &self.api.names;
        attrs
            .into_iter()
            .map(|attr| {
                let name = attr.name.name;
                let value = self.attr_value(attr.value);
                if let Some(event) = event_name(&name) {
                    self.event_listener(event, value)
                } else if let Some(property) = property_name(&name) {
                    Expr::call(
                        self.api_fn(names.property),
                        vec![Expr::string(property), value],
                    )
                } else if name == SPREAD_ATTR {
                    value
                } else {
                    Expr::call(
                        self.api_fn(names.attribute),
                        vec![Expr::string(&name), value],
                    )
                }
            })
            .collect()
    }

    /// Boolean shorthand means `true`; interpolations are unwrapped.
    fn attr_value(&self, value: Option<Expr>) -> Expr {
        match value {
            None => Expr::ident("true"),
            Some(Expr::HostExpr(host)) => self.lower_expr(*host.inner),
            Some(other) => self.lower_expr(other),
        }
    }

    /// `&vecty.EventListener{Name: "click", Listener: f}`
    fn event_listener(&self, event: &str, listener: Expr) -> Expr {
        let names = &self.api.names;
        Expr::address_of(Expr::CompositeLit {
            ty: Some(Box::new(self.api_fn(names.event_listener))),
            elts: vec![
                Expr::key_value(Expr::ident(names.listener_name_field), Expr::string(event)),
                Expr::key_value(Expr::ident(names.listener_func_field), listener),
            ],
        })
    }

    fn children_args(&self, children: Vec<Expr>) -> Vec<Expr> {
        children.into_iter().map(|c| self.child(c)).collect()
    }

    fn child(&self, child: Expr) -> Expr {
        let names = &self.api.names;
        match child {
            Expr::BareText(text) => {
                Expr::call(self.api_fn(names.text), vec![Expr::string(&text.text)])
            }
            Expr::HostExpr(host) => Expr::call(
                self.api_fn(names.value),
                vec![self.lower_expr(*host.inner)],
            ),
            other => self.lower_expr(other),
        }
    }

    /// `pkg.Name`, or a bare `Name` when no package is configured.
    fn api_fn(&self, name: &str) -> Expr {
        if self.api.package.is_empty() {
            return Expr::ident(name);
        }
        Expr::selector(Expr::ident(self.api.package.as_str()), name)
    }
}

/// Lowers one expression against the default rendering API.
pub fn lower(expr: Expr) -> Expr {
    Lowerer::default().lower_expr(expr)
}

/// Lowers every declaration of a file against the default rendering API.
pub fn lower_file(file: File) -> File {
    Lowerer::default().lower_file(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gox_syntax::parse_expr;

    fn name_of(src: &str) -> Expr {
        match parse_expr(src) {
            Ok(Expr::Tag(tag)) => *tag.name,
            other => panic!("expected tag, got {other:?}"),
        }
    }

    #[test]
    fn classify_by_name_shape() {
        assert_eq!(classify(&name_of("<div/>")), TagKind::Element);
        assert_eq!(classify(&name_of("<Card/>")), TagKind::ComponentLiteral);
        assert_eq!(classify(&name_of("<ui.card/>")), TagKind::ComponentLiteral);
        assert_eq!(classify(&name_of("<card(1)/>")), TagKind::ComponentCall);
    }

    #[test]
    fn empty_package_leaves_calls_unqualified() {
        let lowerer = Lowerer::new(RenderApi::with_package(""));
        let out = lowerer.lower_expr(parse_expr("<br/>").unwrap());
        assert_eq!(print_expr(&out), r#"Tag("br")"#);
    }
}
