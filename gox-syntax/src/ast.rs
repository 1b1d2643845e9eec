//! Syntax tree: host-language nodes and the markup nodes embedded in them.
//!
//! Types are expressions, as in the host language's own tree. The markup
//! variants (`Tag`, `HostExpr`, `BareText`) only occur until lowering.

use crate::source::Span;
use crate::token::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: Span::DUMMY,
        }
    }

    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

/// A literal; `value` is the source text, quotes included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicLit {
    pub kind: LitKind,
    pub value: String,
    pub span: Span,
}

impl BasicLit {
    /// A quoted string literal holding `text`.
    pub fn string(text: &str) -> Self {
        Self {
            kind: LitKind::String,
            value: crate::printer::string_lit(text),
            span: Span::DUMMY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    pub fun: Box<Expr>,
    pub args: Vec<Expr>,
    /// `f(xs...)`
    pub ellipsis: bool,
}

/// A parameter, result, struct field or interface method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub names: Vec<Ident>,
    pub ty: Expr,
    pub tag: Option<BasicLit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuncType {
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Placeholder for an expression that failed to parse.
    Bad(Span),
    Ident(Ident),
    BasicLit(BasicLit),
    Paren(Box<Expr>),
    Selector {
        x: Box<Expr>,
        sel: Ident,
    },
    Index {
        x: Box<Expr>,
        index: Box<Expr>,
    },
    Slice {
        x: Box<Expr>,
        low: Option<Box<Expr>>,
        high: Option<Box<Expr>>,
        max: Option<Box<Expr>>,
    },
    /// `x.(T)`; `ty` is `None` for `x.(type)`.
    TypeAssert {
        x: Box<Expr>,
        ty: Option<Box<Expr>>,
    },
    Call(CallExpr),
    /// Pointer type or dereference.
    Star(Box<Expr>),
    Unary {
        op: TokenKind,
        x: Box<Expr>,
    },
    Binary {
        op: TokenKind,
        x: Box<Expr>,
        y: Box<Expr>,
    },
    KeyValue {
        key: Box<Expr>,
        value: Box<Expr>,
    },
    CompositeLit {
        ty: Option<Box<Expr>>,
        elts: Vec<Expr>,
    },
    FuncLit {
        ty: FuncType,
        body: Block,
    },
    Ellipsis(Option<Box<Expr>>),
    /// `[len]elem`, or `[]elem` when `len` is `None`.
    ArrayType {
        len: Option<Box<Expr>>,
        elem: Box<Expr>,
    },
    MapType {
        key: Box<Expr>,
        value: Box<Expr>,
    },
    ChanType(Box<Expr>),
    FuncType(FuncType),
    StructType(Vec<Field>),
    InterfaceType(Vec<Field>),

    Tag(TagExpr),
    HostExpr(HostExpr),
    BareText(BareText),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Ident(Ident::new(name))
    }

    pub fn string(text: &str) -> Expr {
        Expr::BasicLit(BasicLit::string(text))
    }

    pub fn selector(x: Expr, sel: impl Into<String>) -> Expr {
        Expr::Selector {
            x: Box::new(x),
            sel: Ident::new(sel),
        }
    }

    pub fn call(fun: Expr, args: Vec<Expr>) -> Expr {
        Expr::Call(CallExpr {
            fun: Box::new(fun),
            args,
            ellipsis: false,
        })
    }

    pub fn key_value(key: Expr, value: Expr) -> Expr {
        Expr::KeyValue {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// `&x`
    pub fn address_of(x: Expr) -> Expr {
        Expr::Unary {
            op: TokenKind::And,
            x: Box::new(x),
        }
    }

    /// True when any markup node remains anywhere below this expression.
    pub fn contains_markup(&self) -> bool {
        match self {
            Expr::Tag(_) | Expr::HostExpr(_) | Expr::BareText(_) => true,
            Expr::Bad(_) | Expr::Ident(_) | Expr::BasicLit(_) => false,
            Expr::Paren(x) | Expr::Star(x) | Expr::ChanType(x) => x.contains_markup(),
            Expr::Selector { x, .. } | Expr::Unary { x, .. } => x.contains_markup(),
            Expr::Index { x, index } => x.contains_markup() || index.contains_markup(),
            Expr::Slice { x, low, high, max } => {
                x.contains_markup()
                    || [low, high, max]
                        .into_iter()
                        .flatten()
                        .any(|e| e.contains_markup())
            }
            Expr::TypeAssert { x, ty } => {
                x.contains_markup() || ty.as_ref().is_some_and(|t| t.contains_markup())
            }
            Expr::Call(call) => {
                call.fun.contains_markup() || call.args.iter().any(Expr::contains_markup)
            }
            Expr::Binary { x, y, .. } => x.contains_markup() || y.contains_markup(),
            Expr::KeyValue { key, value } => key.contains_markup() || value.contains_markup(),
            Expr::CompositeLit { ty, elts } => {
                ty.as_ref().is_some_and(|t| t.contains_markup())
                    || elts.iter().any(Expr::contains_markup)
            }
            Expr::FuncLit { body, .. } => body.contains_markup(),
            Expr::Ellipsis(elem) => elem.as_ref().is_some_and(|e| e.contains_markup()),
            Expr::ArrayType { .. }
            | Expr::MapType { .. }
            | Expr::FuncType(_)
            | Expr::StructType(_)
            | Expr::InterfaceType(_) => false,
        }
    }
}

/// `<name attrs...>children</name>` or `<name attrs.../>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagExpr {
    /// Position of the opening `<`.
    pub open: Span,
    pub name: Box<Expr>,
    pub attrs: Vec<AttrStmt>,
    /// `None` for a self-closing tag.
    pub children: Option<Vec<Expr>>,
    pub close: CloseTag,
}

impl TagExpr {
    pub fn is_self_closing(&self) -> bool {
        self.children.is_none()
    }
}

/// `name`, `name="value"` or `name={expr}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrStmt {
    pub name: Ident,
    /// `None` is the boolean shorthand.
    pub value: Option<Expr>,
}

/// A brace-delimited interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostExpr {
    pub inner: Box<Expr>,
    pub span: Span,
}

/// Literal tag body text, whitespace included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BareText {
    pub text: String,
    pub span: Span,
}

/// `</name>`; `name` is empty for a self-closing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseTag {
    pub span: Span,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn contains_markup(&self) -> bool {
        self.stmts.iter().any(Stmt::contains_markup)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Bad(Span),
    Empty,
    Decl(GenDecl),
    Expr(Expr),
    IncDec {
        x: Expr,
        op: TokenKind,
    },
    Assign {
        lhs: Vec<Expr>,
        op: TokenKind,
        rhs: Vec<Expr>,
    },
    Go(Expr),
    Defer(Expr),
    Return(Vec<Expr>),
    /// `break`, `continue` or `fallthrough`.
    Branch(TokenKind),
    Block(Block),
    If(IfStmt),
    Switch(SwitchStmt),
    For(ForStmt),
    Range(RangeStmt),
}

impl Stmt {
    pub fn contains_markup(&self) -> bool {
        let any = |exprs: &[Expr]| exprs.iter().any(Expr::contains_markup);
        match self {
            Stmt::Bad(_) | Stmt::Empty | Stmt::Branch(_) => false,
            Stmt::Decl(decl) => decl.contains_markup(),
            Stmt::Expr(x) | Stmt::Go(x) | Stmt::Defer(x) | Stmt::IncDec { x, .. } => {
                x.contains_markup()
            }
            Stmt::Assign { lhs, rhs, .. } => any(lhs) || any(rhs),
            Stmt::Return(results) => any(results),
            Stmt::Block(block) => block.contains_markup(),
            Stmt::If(s) => {
                s.init.as_ref().is_some_and(|i| i.contains_markup())
                    || s.cond.contains_markup()
                    || s.body.contains_markup()
                    || s.els.as_ref().is_some_and(|e| e.contains_markup())
            }
            Stmt::Switch(s) => {
                s.init.as_ref().is_some_and(|i| i.contains_markup())
                    || s.tag.as_ref().is_some_and(Expr::contains_markup)
                    || s.clauses.iter().any(|c| {
                        c.list.as_deref().is_some_and(any) || c.body.iter().any(Stmt::contains_markup)
                    })
            }
            Stmt::For(s) => {
                s.init.as_ref().is_some_and(|i| i.contains_markup())
                    || s.cond.as_ref().is_some_and(Expr::contains_markup)
                    || s.post.as_ref().is_some_and(|p| p.contains_markup())
                    || s.body.contains_markup()
            }
            Stmt::Range(s) => s.x.contains_markup() || s.body.contains_markup(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStmt {
    pub init: Option<Box<Stmt>>,
    pub cond: Expr,
    pub body: Block,
    /// Either another `If` or a `Block`.
    pub els: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseClause {
    /// `None` for `default`.
    pub list: Option<Vec<Expr>>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchStmt {
    pub init: Option<Box<Stmt>>,
    pub tag: Option<Expr>,
    pub clauses: Vec<CaseClause>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForStmt {
    pub init: Option<Box<Stmt>>,
    pub cond: Option<Expr>,
    pub post: Option<Box<Stmt>>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeStmt {
    pub key: Option<Expr>,
    pub value: Option<Expr>,
    /// `:=` rather than `=`.
    pub define: bool,
    pub x: Expr,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spec {
    Import {
        name: Option<Ident>,
        path: BasicLit,
    },
    /// A `var` or `const` spec.
    Value {
        names: Vec<Ident>,
        ty: Option<Expr>,
        values: Vec<Expr>,
    },
    Type {
        name: Ident,
        /// Alias declaration (`type A = B`).
        assign: bool,
        ty: Expr,
    },
}

/// An `import`, `var`, `const` or `type` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenDecl {
    pub keyword: TokenKind,
    /// Written with parentheses.
    pub grouped: bool,
    pub specs: Vec<Spec>,
}

impl GenDecl {
    pub fn contains_markup(&self) -> bool {
        self.specs.iter().any(|spec| match spec {
            Spec::Value { values, .. } => values.iter().any(Expr::contains_markup),
            Spec::Import { .. } | Spec::Type { .. } => false,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub recv: Option<Vec<Field>>,
    pub name: Ident,
    pub ty: FuncType,
    pub body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Bad(Span),
    Gen(GenDecl),
    Func(FuncDecl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub package: Ident,
    pub decls: Vec<Decl>,
}

impl File {
    pub fn contains_markup(&self) -> bool {
        self.decls.iter().any(|decl| match decl {
            Decl::Bad(_) => false,
            Decl::Gen(gen_decl) => gen_decl.contains_markup(),
            Decl::Func(func) => func.body.as_ref().is_some_and(Block::contains_markup),
        })
    }
}
