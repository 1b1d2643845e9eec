use gox_syntax::ast::{Decl, Expr, File, Stmt, TagExpr};
use gox_syntax::{ErrorKind, parse_expr, parse_file};
use rstest::rstest;

fn func_body(file: &File, name: &str) -> Vec<Stmt> {
    file.decls
        .iter()
        .find_map(|d| match d {
            Decl::Func(f) if f.name.name == name => f.body.clone(),
            _ => None,
        })
        .map(|b| b.stmts)
        .unwrap_or_else(|| panic!("no func {name}"))
}

fn as_tag(expr: &Expr) -> &TagExpr {
    match expr {
        Expr::Tag(tag) => tag,
        other => panic!("expected tag, got {other:?}"),
    }
}

#[test]
fn parse_element_with_text() {
    let expr = parse_expr("<div>hello</div>").unwrap();
    let tag = as_tag(&expr);
    assert!(matches!(&*tag.name, Expr::Ident(id) if id.name == "div"));
    let children = tag.children.as_ref().unwrap();
    assert_eq!(children.len(), 1);
    assert!(matches!(&children[0], Expr::BareText(t) if t.text == "hello"));
    assert_eq!(tag.close.name, "div");
}

#[test]
fn parse_text_interpolation_and_nested_tags() {
    let expr = parse_expr("<p>Hello {user.Name}<b>!</b></p>").unwrap();
    let children = as_tag(&expr).children.clone().unwrap();
    assert_eq!(children.len(), 3);
    assert!(matches!(&children[0], Expr::BareText(_)));
    match &children[1] {
        Expr::HostExpr(host) => assert!(matches!(*host.inner, Expr::Selector { .. })),
        other => panic!("expected interpolation, got {other:?}"),
    }
    assert!(matches!(&children[2], Expr::Tag(_)));
}

#[rstest]
#[case::element("<div/>", "Ident")]
#[case::component("<Card/>", "Ident")]
#[case::qualified("<ui.Card/>", "Selector")]
#[case::call("<Foo(1, 2)/>", "Call")]
fn tag_name_shapes(#[case] src: &str, #[case] shape: &str) {
    let expr = parse_expr(src).unwrap();
    let name = &as_tag(&expr).name;
    let actual = match **name {
        Expr::Ident(_) => "Ident",
        Expr::Selector { .. } => "Selector",
        Expr::Call(_) => "Call",
        _ => "other",
    };
    assert_eq!(actual, shape);
}

#[test]
fn whitespace_only_text_is_kept() {
    let expr = parse_expr("<ul>\n\t<li/>\n</ul>").unwrap();
    let children = as_tag(&expr).children.clone().unwrap();
    assert_eq!(children.len(), 3);
    assert!(matches!(&children[0], Expr::BareText(t) if t.text == "\n\t"));
}

#[test]
fn interpolation_may_end_with_newline() {
    let expr = parse_expr("<p>{\n\tname\n}</p>").unwrap();
    let children = as_tag(&expr).children.clone().unwrap();
    assert!(matches!(&children[0], Expr::HostExpr(_)));
}

#[test]
fn tags_in_function_bodies() {
    let src = r#"package main

import "github.com/gopherjs/vecty"

func render(items []string) vecty.ComponentOrHTML {
	x := <div/>
	y := 2
	if y > 1 {
		return <ul>
			<li class="first">{items[0]}</li>
		</ul>
	}
	return x
}
"#;
    let file = parse_file(src).unwrap();
    let body = func_body(&file, "render");
    assert_eq!(body.len(), 4);
    assert!(matches!(&body[0], Stmt::Assign { rhs, .. } if matches!(rhs[0], Expr::Tag(_))));
    assert!(matches!(&body[1], Stmt::Assign { .. }));
    let Stmt::If(if_stmt) = &body[2] else {
        panic!("expected if");
    };
    assert!(matches!(&if_stmt.body.stmts[0], Stmt::Return(r) if matches!(r[0], Expr::Tag(_))));
}

#[test]
fn tags_as_call_and_composite_elements() {
    let src = "package p\n\nvar a = f(<i/>, <b>x</b>)\nvar b = []T{<i/>, <b>x</b>}\n";
    let file = parse_file(src).unwrap();
    assert_eq!(file.decls.len(), 2);
    assert!(file.contains_markup());
}

#[test]
fn parsing_is_deterministic() {
    let src = "package p\n\nfunc f() {\n\tv := <div id=\"a\" onClick={h}><Item(1)>{n}</Item(1)></div>\n\t_ = v\n}\n";
    assert_eq!(parse_file(src), parse_file(src));
    assert!(parse_file(src).is_ok());
}

#[test]
fn mismatched_close_tag_is_positioned() {
    let src = "package p\nvar x = <div>a</span>\n";
    let err = parse_file(src).unwrap_err();
    assert_eq!(err.render(src, "app.gox"), "app.gox:2:15: tag <div> closed by </span>");
}

#[test]
fn errors_do_not_stop_the_parse() {
    let src = "package p\n\nvar a = <div></span>\nvar b = <p></i>\nvar c = 1\n";
    let err = parse_file(src).unwrap_err();
    let mismatches = err
        .iter()
        .filter(|d| matches!(d.kind, ErrorKind::MismatchedCloseTag { .. }))
        .count();
    assert_eq!(mismatches, 2);
}

#[rstest]
#[case::eof_in_attrs("package p\nvar x = <div class=\"a\"", ErrorKind::EofInMarkup)]
#[case::eof_in_content("package p\nvar x = <div>{a}", ErrorKind::EofInMarkup)]
#[case::unbalanced("package p\nvar x = <div>{a}", ErrorKind::UnbalancedNesting { depth: 2 })]
#[case::bare_value("package p\nvar x = <div a=b/>", ErrorKind::IllegalAttrValue { found: "IDENT b".into() })]
#[case::goto("package p\nfunc f() {\n\tgoto L\n}\n", ErrorKind::Unsupported("goto"))]
fn error_kinds(#[case] src: &str, #[case] expected: ErrorKind) {
    let err = parse_file(src).unwrap_err();
    assert!(err.iter().any(|d| d.kind == expected), "got {err:?}");
}

#[test]
fn comparison_still_parses_as_binary() {
    let src = "package p\n\nfunc f(a, b int) bool {\n\treturn a < b\n}\n";
    let file = parse_file(src).unwrap();
    let body = func_body(&file, "f");
    assert!(matches!(&body[0], Stmt::Return(r) if matches!(r[0], Expr::Binary { .. })));
}
