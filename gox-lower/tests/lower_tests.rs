use gox_lower::{Lowerer, RenderApi, lower, lower_file};
use gox_syntax::{parse_expr, parse_file, print_expr, print_file};
use rstest::rstest;

fn lowered(src: &str) -> String {
    let expr = parse_expr(src).unwrap_or_else(|e| panic!("{src}: {}", e.render(src, "test")));
    print_expr(&lower(expr))
}

#[rstest]
#[case::text_child("<div>hello</div>", r#"vecty.Tag("div", vecty.Text("hello"))"#)]
#[case::property_and_value(
    r#"<div id="x">{v}</div>"#,
    r#"vecty.Tag("div", vecty.Markup(vecty.Property("id", "x")), vecty.Value(v))"#
)]
#[case::event_listener(
    "<div onClick={f}/>",
    r#"vecty.Tag("div", vecty.Markup(&vecty.EventListener{Name: "click", Listener: f}))"#
)]
#[case::component_literal(
    r#"<MyComponent x="1"><span/></MyComponent>"#,
    r#"&MyComponent{x: "1", Body: vecty.Writers(vecty.Tag("span"))}"#
)]
#[case::component_call(
    "<Foo(1,2)>bar</Foo(1,2)>",
    r#"Foo(1, 2, vecty.Writers(vecty.Text("bar")))"#
)]
#[case::component_call_with_attrs(
    r#"<Foo(1) a="x" onClick={h}/>"#,
    r#"Foo(1, vecty.Markup(vecty.Attribute("a", "x"), &vecty.EventListener{Name: "click", Listener: h}))"#
)]
#[case::qualified_component("<ui.Card title={t}/>", "&ui.Card{title: t}")]
#[case::html_for(
    r#"<label for="name"/>"#,
    r#"vecty.Tag("label", vecty.Markup(vecty.Property("htmlFor", "name")))"#
)]
#[case::spread(
    r#"<div attrs={extra} class="c"/>"#,
    r#"vecty.Tag("div", vecty.Markup(extra, vecty.Property("class", "c")))"#
)]
#[case::plain_text("<text>hi</text>", r#"vecty.PlainText(vecty.Text("hi"))"#)]
#[case::quoted_text(r#"<p>say "hi"</p>"#, r#"vecty.Tag("p", vecty.Text("say \"hi\""))"#)]
#[case::tag_inside_attribute(
    r#"<Card icon={<i class="x"/>}/>"#,
    r#"&Card{icon: vecty.Tag("i", vecty.Markup(vecty.Property("class", "x")))}"#
)]
#[case::mouse_leave(
    "<li onMouseLeave={out}/>",
    r#"vecty.Tag("li", vecty.Markup(&vecty.EventListener{Name: "mouseleave", Listener: out}))"#
)]
fn lowers_to_render_calls(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(lowered(src), expected);
}

#[test]
fn boolean_shorthand_is_true() {
    assert_eq!(lowered("<input disabled/>"), lowered("<input disabled={true}/>"));
    assert_eq!(
        lowered("<input disabled/>"),
        r#"vecty.Tag("input", vecty.Markup(vecty.Attribute("disabled", true)))"#
    );
    assert_eq!(lowered("<Toggle on/>"), "&Toggle{on: true}");
}

#[test]
fn whitespace_only_text_is_kept() {
    assert_eq!(
        lowered("<ul>\n\t<li/>\n</ul>"),
        r#"vecty.Tag("ul", vecty.Text("\n\t"), vecty.Tag("li"), vecty.Text("\n"))"#
    );
}

#[test]
fn self_closing_component_has_no_body() {
    assert_eq!(lowered("<Spacer/>"), "&Spacer{}");
    assert_eq!(lowered("<Spacer()/>"), "Spacer()");
}

#[test]
fn package_qualifier_is_configurable() {
    let lowerer = Lowerer::new(RenderApi::with_package("v"));
    let out = lowerer.lower_expr(parse_expr("<p>{n}</p>").unwrap());
    assert_eq!(print_expr(&out), r#"v.Tag("p", v.Value(n))"#);
}

#[test]
fn lowering_is_idempotent() {
    let once = lower(parse_expr(r#"<div class="a"><Item(1) on>x</Item(1)></div>"#).unwrap());
    let twice = lower(once.clone());
    assert_eq!(once, twice);
    assert!(!once.contains_markup());
}

#[test]
fn lowering_is_deterministic() {
    let src = r#"<form onSubmit={save}><input type="text" value={name}/>{err}</form>"#;
    assert_eq!(lower(parse_expr(src).unwrap()), lower(parse_expr(src).unwrap()));
}

#[test]
fn host_code_passes_through() {
    let src = "a + f(b)[1:2]";
    let expr = parse_expr(src).unwrap();
    assert_eq!(lower(expr.clone()), expr);
}

#[test]
fn lowers_whole_file() {
    let src = r#"package main

import "github.com/gopherjs/vecty"

type Page struct {
	vecty.Core
	Title string
}

func (p *Page) Render() vecty.ComponentOrHTML {
	items := []vecty.MarkupOrChild{}
	for _, it := range p.Items {
		items = append(items, <li>{it}</li>)
	}
	return <body>
		<h1 class="title">{p.Title}</h1>
		<ul>{vecty.List(items)}</ul>
	</body>
}
"#;
    let file = parse_file(src).unwrap_or_else(|e| panic!("{}", e.render(src, "page.gox")));
    let out = lower_file(file);
    assert!(!out.contains_markup());

    let go = print_file(&out);
    assert!(go.contains(r#"items = append(items, vecty.Tag("li", vecty.Value(it)))"#));
    assert!(go.contains(
        r#"return vecty.Tag("body", vecty.Text("\n\t\t"), vecty.Tag("h1", vecty.Markup(vecty.Property("class", "title")), vecty.Value(p.Title)), vecty.Text("\n\t\t"), vecty.Tag("ul", vecty.Value(vecty.List(items))), vecty.Text("\n\t"))"#
    ));
    assert!(parse_file(&go).is_ok());
}
