//! Rendered output must describe the same program as its source.
//!
//! Every case is parsed, rendered, and reparsed; the two parse trees must
//! serialize identically. A second render of the reparsed tree must then
//! reproduce the first render byte for byte, so rendering is a fixed point.

use cover_js::render;
use cover_js::Ast;
use serde_json::to_string_pretty;
use serde_json::Value;
use similar::ChangeTag;
use similar::TextDiff;

struct Case {
  name: &'static str,
  source: &'static str,
}

const CASES: &[Case] = &[
  Case {
    name: "literals",
    source: "let a = 1; let b = 0.5; let c = 0x10; let d = 1e21; let e = 'it\\'s'; let f = \"say \\\"hi\\\"\"; let g = true; let h = null;",
  },
  Case {
    name: "regex",
    source: "let r = /a[b-c]+/gi; let q = a / b / c;",
  },
  Case {
    name: "templates",
    source: "let t = `a${b}c${d}`; let u = `${x}`; let v = `a\\nb`;",
  },
  Case {
    name: "arrays_and_holes",
    source: "[a, , b]; [a, ]; [, ]; [, , ]; [...xs, 1];",
  },
  Case {
    name: "objects",
    source: "({ a: 1, b, 'c d': 2, 3: 4, 0x10: 5, [k]: 6, ...rest });",
  },
  Case {
    name: "object_methods",
    source: "({ m() {}, async n() {}, *o() {}, async *p() {}, get x() { return 1; }, set x(v) { f(v); }, [k + 1]() {} });",
  },
  Case {
    name: "functions",
    source: "function f(a, b = 1, ...rest) { return a; } async function g() {} function* h() {} async function* i() {}",
  },
  Case {
    name: "function_expressions",
    source: "let f = function named() {}; (function() {})(); let g = async function() {};",
  },
  Case {
    name: "arrows",
    source: "let f = () => 0; let g = x => x; let h = async x => x; let i = (a, b) => { return a + b; }; let j = () => ({});",
  },
  Case {
    name: "destructuring",
    source: "let [a, , b = 1, ...rest] = xs; let { c, d: e, f: { g = 1 } = {}, ...r } = o; [x, y] = pair; ({ z } = o);",
  },
  Case {
    name: "classes",
    source: "class A extends B { constructor() { super(); } static x = 1; y = 2; m() {} static n() {} get p() { return 1; } set p(v) { f(v); } async q() {} *r() {} [k]() {} }",
  },
  Case {
    name: "precedence_ladder",
    source: "let a = 1 + 2 * 3 ** 4; let b = (1 + 2) * 3; let c = a * b + c; let d = (a * b) + c; let e = a << b | c & d ^ e; let f = a < b == c instanceof D;",
  },
  Case {
    name: "unary_operators",
    source: "typeof x; void 0; delete a.b; -x; +x; ~x; !x; --x; ++x; x--; x++; a - -b; a + +b;",
  },
  Case {
    name: "exponent_bases",
    source: "let a = (-b) ** 2; let c = 2 ** -b; let d = 2 ** 3 ** 4;",
  },
  Case {
    name: "logical_and_conditional",
    source: "a && b || c; a || b && c; a && (b || c); a ? b : c ? d : e; (a ? b : c) ? d : e; a ? b ? c : d : e;",
  },
  Case {
    name: "assignment_forms",
    source: "a = b = c; a += 1; a -= 1; a *= 2; a /= 2; a %= 2; a **= 2; a <<= 1; a >>= 1; a >>>= 1; a &= 1; a |= 1; a ^= 1;",
  },
  Case {
    name: "sequences",
    source: "a, b, c; (a, b); f((a, b)); for (a = 0, b = 1; a < b; a++, b--) f(); function s() { return (a, b); }",
  },
  Case {
    name: "member_chains",
    source: "a.b.c; a[b][0]; a.b().c(1)[2]; 1 .toFixed(2); 1.5.toFixed(2);",
  },
  Case {
    name: "new_expressions",
    source: "new Foo; new Foo(); new a.b.C(1); new (f());",
  },
  Case {
    name: "calls_and_spread",
    source: "f(); f(1, 2); f(...xs); f(1, ...xs, 2);",
  },
  Case {
    name: "if_chains",
    source: "if (a) f(); if (a) { f(); } else if (b) g(); else { h(); } if (a) if (b) f(); else g();",
  },
  Case {
    name: "loops",
    source: "while (a) f(); do f(); while (a); for (;;) { break; } for (let i = 0; i < 3; i++) f(i); for (i = 0; i < 3; i++) g();",
  },
  Case {
    name: "for_of_heads",
    source: "for (const x of xs) f(x); for (let [a, b] of pairs) g(a, b); for (var x of xs) f(x); for (x of xs) f(x); for ([a, b] of pairs) g();",
  },
  Case {
    name: "await_forms",
    source: "async function f() { await g(); for await (const x of xs) { h(x); } let y = await p + 1; }",
  },
  Case {
    name: "switch",
    source: "switch (a) { case 1: f(); case 2: case 3: g(); break; default: h(); }",
  },
  Case {
    name: "try_catch",
    source: "try { f(); } catch (e) { g(e); } try { f(); } catch { g(); } finally { h(); } try { f(); } finally { h(); }",
  },
  Case {
    name: "labels",
    source: "outer: for (;;) { inner: for (;;) { continue outer; } break outer; }",
  },
  Case {
    name: "other_statements",
    source: "debugger; ; { { f(); } } throw new Error('x');",
  },
  Case {
    name: "imports",
    source: "import d from 'm'; import d2, { a, b as c } from 'm'; import * as ns from 'm'; import 'm';",
  },
  Case {
    name: "exports",
    source: "export { a, b as c }; export * from 'm'; export * as ns from 'm'; export { d } from 'm'; export const x = 1; export let y; export function f() {} export class A {}",
  },
  Case {
    name: "default_exports",
    source: "export default function f() {} export default class A {} export default 1 + 2;",
  },
  Case {
    name: "statement_start_grouping",
    source: "({ a: 1 }); (function() {})(); ({}).x;",
  },
  Case {
    name: "semicolonless_input",
    source: "let a = 1\nf(a)\nreturn_value = 2",
  },
];

fn tree_of(source: &str) -> Value {
  let parsed = syntax_js::parse(source).unwrap();
  serde_json::to_value(&parsed).unwrap()
}

fn render_of(source: &str) -> String {
  let ast = Ast::parse(source).unwrap();
  render(&ast).unwrap()
}

fn assert_same_tree(name: &str, expected: &Value, actual: &Value) {
  if expected == actual {
    return;
  }
  let expected_fmt = to_string_pretty(expected).unwrap();
  let actual_fmt = to_string_pretty(actual).unwrap();
  let mut msg = format!("Reparse of {} diverged:\n", name);
  let diff = TextDiff::from_lines(&expected_fmt, &actual_fmt);
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    msg.push_str(sign);
    msg.push_str(change.as_str().unwrap());
  }
  panic!("{}", msg);
}

#[test]
fn reparse_preserves_the_tree() {
  for case in CASES {
    let rendered = render_of(case.source);
    assert_same_tree(case.name, &tree_of(case.source), &tree_of(&rendered));
  }
}

#[test]
fn second_render_is_stable() {
  for case in CASES {
    let first = render_of(case.source);
    let second = render_of(&first);
    assert_eq!(second, first, "second render of {} moved", case.name);
  }
}
