use gox_syntax::{parse_expr, parse_file, print_expr, print_file};
use rstest::rstest;

const PROGRAM: &str = r#"package main

import (
	"fmt"
	v "github.com/gopherjs/vecty"
)

type Point struct {
	X, Y int
	name string `json:"name"`
}

type Renderer interface {
	Render() v.ComponentOrHTML
}

var (
	a = 1
	b, c string
)

const limit = 10

func (p *Point) Scale(k int) (int, int) {
	return p.X * k, p.Y * k
}

func main() {
	items := []string{"a", "b"}
	for i, it := range items {
		if i > 0 && it != "" {
			fmt.Println(i, it)
		} else if i == 0 {
			continue
		} else {
			break
		}
	}
	switch n := len(items); n {
	case 0, 1:
		fmt.Println("few")
	default:
		fmt.Println("many")
	}
	f := func(xs ...int) int {
		return len(xs)
	}
	m := map[string]int{"k": f(1, 2)}
	m["k"]++
	defer fmt.Println(m)
	var p *Point
	_ = p
}
"#;

#[test]
fn canonical_program_prints_unchanged() {
    let file = parse_file(PROGRAM).unwrap();
    assert_eq!(print_file(&file), PROGRAM);
}

#[test]
fn printing_then_reparsing_gives_the_same_tree() {
    let file = parse_file(PROGRAM).unwrap();
    let again = parse_file(&print_file(&file)).unwrap();
    assert_eq!(print_file(&again), print_file(&file));
}

#[rstest]
#[case("x[1:2]")]
#[case("x[:n:m]")]
#[case("v.(fmt.Stringer)")]
#[case("f(xs...)")]
#[case("-a * (b + c)")]
#[case("&T{A: 1}")]
#[case("<-ch")]
#[case("[...]int{1, 2}")]
#[case("struct{}{}")]
fn expressions_print_back(#[case] src: &str) {
    assert_eq!(print_expr(&parse_expr(src).unwrap()), src);
}

#[rstest]
#[case(r#"<a href="/" onClick={nav}>home</a>"#)]
#[case("<Card(1, 2) wide>{title}</Card(1, 2)>")]
#[case("<ui.Icon name='x'/>")]
fn markup_prints_back(#[case] src: &str) {
    assert_eq!(print_expr(&parse_expr(src).unwrap()), src);
}
