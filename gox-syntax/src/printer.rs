//! Turns a tree back into host source text, gofmt-style.
//!
//! Markup nodes that are still present print back in tag syntax.

use crate::ast::{
    AttrStmt, Block, CaseClause, Decl, Expr, Field, File, FuncDecl, FuncType, GenDecl, IfStmt,
    Spec, Stmt, TagExpr,
};

pub fn print_file(file: &File) -> String {
    let mut p = Printer::default();
    p.file(file);
    p.out
}

pub fn print_expr(expr: &Expr) -> String {
    let mut p = Printer::default();
    p.expr(expr);
    p.out
}

pub fn print_stmt(stmt: &Stmt) -> String {
    let mut p = Printer::default();
    p.stmt(stmt);
    p.out
}

/// Quotes `s` as an interpreted string literal.
pub fn string_lit(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push('\t');
        }
    }

    fn file(&mut self, file: &File) {
        self.push("package ");
        self.push(&file.package.name);
        self.push("\n");
        for decl in &file.decls {
            self.push("\n");
            match decl {
                Decl::Bad(_) => self.push("BadDecl"),
                Decl::Gen(gen_decl) => self.gen_decl(gen_decl),
                Decl::Func(func) => self.func_decl(func),
            }
            self.push("\n");
        }
    }

    fn gen_decl(&mut self, decl: &GenDecl) {
        self.push(decl.keyword.as_str());
        self.push(" ");
        if !decl.grouped {
            if let Some(spec) = decl.specs.first() {
                self.spec(spec);
            }
            return;
        }
        self.push("(");
        self.indent += 1;
        for spec in &decl.specs {
            self.newline();
            self.spec(spec);
        }
        self.indent -= 1;
        self.newline();
        self.push(")");
    }

    fn spec(&mut self, spec: &Spec) {
        match spec {
            Spec::Import { name, path } => {
                if let Some(name) = name {
                    self.push(&name.name);
                    self.push(" ");
                }
                self.push(&path.value);
            }
            Spec::Value { names, ty, values } => {
                self.idents(names.iter().map(|n| n.name.as_str()));
                if let Some(ty) = ty {
                    self.push(" ");
                    self.expr(ty);
                }
                if !values.is_empty() {
                    self.push(" = ");
                    self.exprs(values);
                }
            }
            Spec::Type { name, assign, ty } => {
                self.push(&name.name);
                self.push(if *assign { " = " } else { " " });
                self.expr(ty);
            }
        }
    }

    fn func_decl(&mut self, func: &FuncDecl) {
        self.push("func ");
        if let Some(recv) = &func.recv {
            self.fields("(", recv, ")");
            self.push(" ");
        }
        self.push(&func.name.name);
        self.signature(&func.ty);
        if let Some(body) = &func.body {
            self.push(" ");
            self.block(body);
        }
    }

    fn signature(&mut self, ty: &FuncType) {
        self.fields("(", &ty.params, ")");
        match ty.results.as_slice() {
            [] => {}
            [single] if single.names.is_empty() => {
                self.push(" ");
                self.expr(&single.ty);
            }
            results => {
                self.push(" ");
                self.fields("(", results, ")");
            }
        }
    }

    fn fields(&mut self, open: &str, fields: &[Field], close: &str) {
        self.push(open);
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.field(field);
        }
        self.push(close);
    }

    fn field(&mut self, field: &Field) {
        if !field.names.is_empty() {
            self.idents(field.names.iter().map(|n| n.name.as_str()));
            self.push(" ");
        }
        self.expr(&field.ty);
        if let Some(tag) = &field.tag {
            self.push(" ");
            self.push(&tag.value);
        }
    }

    /// Struct and interface bodies, one member per line.
    fn member_list(&mut self, keyword: &str, members: &[Field]) {
        self.push(keyword);
        if members.is_empty() {
            self.push("{}");
            return;
        }
        self.push(" {");
        self.indent += 1;
        for member in members {
            self.newline();
            match (&member.ty, member.names.as_slice()) {
                // interface method
                (Expr::FuncType(sig), [name]) if keyword == "interface" => {
                    self.push(&name.name);
                    self.signature(sig);
                }
                _ => self.field(member),
            }
        }
        self.indent -= 1;
        self.newline();
        self.push("}");
    }

    fn idents<'a>(&mut self, names: impl Iterator<Item = &'a str>) {
        for (i, name) in names.enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push(name);
        }
    }

    fn exprs(&mut self, exprs: &[Expr]) {
        for (i, x) in exprs.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expr(x);
        }
    }

    fn block(&mut self, block: &Block) {
        self.brace_body(&block.stmts);
    }

    fn brace_body(&mut self, stmts: &[Stmt]) {
        if stmts.iter().all(|s| matches!(s, Stmt::Empty)) {
            self.push("{}");
            return;
        }
        self.push("{");
        self.indent += 1;
        self.stmt_lines(stmts);
        self.indent -= 1;
        self.newline();
        self.push("}");
    }

    fn stmt_lines(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            if matches!(stmt, Stmt::Empty) {
                continue;
            }
            self.newline();
            self.stmt(stmt);
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Bad(_) => self.push("BadStmt"),
            Stmt::Empty => {}
            Stmt::Decl(decl) => self.gen_decl(decl),
            Stmt::Expr(x) => self.expr(x),
            Stmt::IncDec { x, op } => {
                self.expr(x);
                self.push(op.as_str());
            }
            Stmt::Assign { lhs, op, rhs } => {
                self.exprs(lhs);
                self.push(" ");
                self.push(op.as_str());
                self.push(" ");
                self.exprs(rhs);
            }
            Stmt::Go(x) => {
                self.push("go ");
                self.expr(x);
            }
            Stmt::Defer(x) => {
                self.push("defer ");
                self.expr(x);
            }
            Stmt::Return(results) => {
                self.push("return");
                if !results.is_empty() {
                    self.push(" ");
                    self.exprs(results);
                }
            }
            Stmt::Branch(kind) => self.push(kind.as_str()),
            Stmt::Block(block) => self.block(block),
            Stmt::If(s) => self.if_stmt(s),
            Stmt::Switch(s) => {
                self.push("switch ");
                if let Some(init) = &s.init {
                    self.stmt(init);
                    self.push("; ");
                }
                if let Some(tag) = &s.tag {
                    self.expr(tag);
                    self.push(" ");
                }
                self.push("{");
                for clause in &s.clauses {
                    self.case_clause(clause);
                }
                self.newline();
                self.push("}");
            }
            Stmt::For(s) => {
                self.push("for ");
                match (&s.init, &s.cond, &s.post) {
                    (None, None, None) => {}
                    (None, Some(cond), None) => {
                        self.expr(cond);
                        self.push(" ");
                    }
                    (init, cond, post) => {
                        if let Some(init) = init {
                            self.stmt(init);
                        }
                        self.push("; ");
                        if let Some(cond) = cond {
                            self.expr(cond);
                        }
                        self.push("; ");
                        if let Some(post) = post {
                            self.stmt(post);
                            self.push(" ");
                        }
                    }
                }
                self.block(&s.body);
            }
            Stmt::Range(s) => {
                self.push("for ");
                if let Some(key) = &s.key {
                    self.expr(key);
                    if let Some(value) = &s.value {
                        self.push(", ");
                        self.expr(value);
                    }
                    self.push(if s.define { " := " } else { " = " });
                }
                self.push("range ");
                self.expr(&s.x);
                self.push(" ");
                self.block(&s.body);
            }
        }
    }

    fn if_stmt(&mut self, s: &IfStmt) {
        self.push("if ");
        if let Some(init) = &s.init {
            self.stmt(init);
            self.push("; ");
        }
        self.expr(&s.cond);
        self.push(" ");
        self.block(&s.body);
        match s.els.as_deref() {
            None => {}
            Some(Stmt::If(els)) => {
                self.push(" else ");
                self.if_stmt(els);
            }
            Some(els) => {
                self.push(" else ");
                self.stmt(els);
            }
        }
    }

    fn case_clause(&mut self, clause: &CaseClause) {
        self.newline();
        match &clause.list {
            Some(list) => {
                self.push("case ");
                self.exprs(list);
                self.push(":");
            }
            None => self.push("default:"),
        }
        self.indent += 1;
        self.stmt_lines(&clause.body);
        self.indent -= 1;
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Bad(_) => self.push("BadExpr"),
            Expr::Ident(ident) => self.push(&ident.name),
            Expr::BasicLit(lit) => self.push(&lit.value),
            Expr::Paren(x) => {
                self.push("(");
                self.expr(x);
                self.push(")");
            }
            Expr::Selector { x, sel } => {
                self.expr(x);
                self.push(".");
                self.push(&sel.name);
            }
            Expr::Index { x, index } => {
                self.expr(x);
                self.push("[");
                self.expr(index);
                self.push("]");
            }
            Expr::Slice { x, low, high, max } => {
                self.expr(x);
                self.push("[");
                if let Some(low) = low {
                    self.expr(low);
                }
                self.push(":");
                if let Some(high) = high {
                    self.expr(high);
                }
                if let Some(max) = max {
                    self.push(":");
                    self.expr(max);
                }
                self.push("]");
            }
            Expr::TypeAssert { x, ty } => {
                self.expr(x);
                self.push(".(");
                match ty {
                    Some(ty) => self.expr(ty),
                    None => self.push("type"),
                }
                self.push(")");
            }
            Expr::Call(call) => {
                self.expr(&call.fun);
                self.push("(");
                self.exprs(&call.args);
                if call.ellipsis {
                    self.push("...");
                }
                self.push(")");
            }
            Expr::Star(x) => {
                self.push("*");
                self.expr(x);
            }
            Expr::Unary { op, x } => {
                self.push(op.as_str());
                self.expr(x);
            }
            Expr::Binary { op, x, y } => {
                self.expr(x);
                self.push(" ");
                self.push(op.as_str());
                self.push(" ");
                self.expr(y);
            }
            Expr::KeyValue { key, value } => {
                self.expr(key);
                self.push(": ");
                self.expr(value);
            }
            Expr::CompositeLit { ty, elts } => {
                if let Some(ty) = ty {
                    self.expr(ty);
                }
                self.push("{");
                self.exprs(elts);
                self.push("}");
            }
            Expr::FuncLit { ty, body } => {
                self.push("func");
                self.signature(ty);
                self.push(" ");
                self.block(body);
            }
            Expr::Ellipsis(elem) => {
                self.push("...");
                if let Some(elem) = elem {
                    self.expr(elem);
                }
            }
            Expr::ArrayType { len, elem } => {
                self.push("[");
                if let Some(len) = len {
                    self.expr(len);
                }
                self.push("]");
                self.expr(elem);
            }
            Expr::MapType { key, value } => {
                self.push("map[");
                self.expr(key);
                self.push("]");
                self.expr(value);
            }
            Expr::ChanType(elem) => {
                self.push("chan ");
                self.expr(elem);
            }
            Expr::FuncType(ty) => {
                self.push("func");
                self.signature(ty);
            }
            Expr::StructType(fields) => self.member_list("struct", fields),
            Expr::InterfaceType(methods) => self.member_list("interface", methods),
            Expr::Tag(tag) => self.tag(tag),
            Expr::HostExpr(host) => {
                self.push("{");
                self.expr(&host.inner);
                self.push("}");
            }
            Expr::BareText(text) => self.push(&text.text),
        }
    }

    fn tag(&mut self, tag: &TagExpr) {
        self.push("<");
        self.expr(&tag.name);
        for attr in &tag.attrs {
            self.push(" ");
            self.attr(attr);
        }
        let Some(children) = &tag.children else {
            self.push("/>");
            return;
        };
        self.push(">");
        for child in children {
            self.expr(child);
        }
        self.push("</");
        self.push(&tag.close.name);
        self.push(">");
    }

    fn attr(&mut self, attr: &AttrStmt) {
        self.push(&attr.name.name);
        if let Some(value) = &attr.value {
            self.push("=");
            self.expr(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_expr, parse_file};

    #[test]
    fn quotes_like_go() {
        assert_eq!(string_lit("a\"b\\c\n"), r#""a\"b\\c\n""#);
        assert_eq!(string_lit("\u{1}"), r#""\x01""#);
    }

    #[test]
    fn markup_prints_back_as_tags() {
        let src = r#"<div class="a" hidden>hi {name}<br/></div>"#;
        assert_eq!(print_expr(&parse_expr(src).unwrap()), src);
    }

    #[test]
    fn file_layout() {
        let src = "package main\n\nimport (\n\t\"fmt\"\n)\n\nfunc main() {\n\tfor i := 0; i < 3; i++ {\n\t\tfmt.Println(i)\n\t}\n}\n";
        assert_eq!(print_file(&parse_file(src).unwrap()), src);
    }
}
