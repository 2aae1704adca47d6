//! Rendered output must parse back to the same program.
//!
//! Spans differ between the source and the rendering, so programs are
//! compared through a second rendering: `render(parse(render(p)))` must
//! equal `render(p)`.

use kjs_compress::{beautify, minify, AcceptAll, BeautifyOptions, CompressOptions};
use kjs_parser::{parse, Program};

const SOURCES: &[&str] = &[
    "function f(a,b){return a+ ++b;}",
    "a++ + +b; a-- - -b; x = - -y; z = +-+w;",
    "x = a / /re/g.lastIndex; y = /a/ / 2; q = /x/ in o;",
    "if (a) b(); else if (c) d(); else { e(); f(); }",
    "do x(); while (a) do { y(); } while (b);",
    "for (var i = 0, j = n; i < j; i++, j--) ;",
    "for (var k = 0 in obj) delete obj[k];",
    "for (a.b in c) for (;;) break;",
    "outer: while (1) { inner: for (;;) { continue outer; } }",
    "switch (v) { case 'a': case 'b': f(); break; default: g(); case 3: h(); }",
    "try { risky(); } catch (err) { log(err.message); }",
    "try { risky(); } finally { cleanup(); }",
    "with (document) write(title);",
    "var s = 'tab\\tquote\"back\\\\slash' + \"\\u00e9\";",
    "x = [, 1, , 2, , ]; y = [,]; z = [];",
    "o = {a: 1, 'b c': [2], 3: {d: null}, e: function () { return this; }};",
    "x = new Foo; y = new Foo.Bar(1)(2); z = new (getClass())();",
    "(function () { var self = this; })();",
    "x = 1..toString() + 0.5.toFixed(1) + 1e21 + 0x1F + 017;",
    "x >>>= 1; y >>= 2; z <<= 3; w &= 4; v |= 5; u ^= 6; t %= 7;",
    "x = a ? b ? c : d : e, f;",
    "x = typeof a === 'undefined' && !(b instanceof C) || void 0;",
    "if (a < !--b) c();",
    "return_ = 1; throw_ = 2; function g() { throw new Error('x'); }",
    "var a = b\n++c",
];

fn minified(program: &Program, options: &CompressOptions) -> String {
    minify(Some(program), options, Box::new(AcceptAll)).code
}

fn beautified(program: &Program) -> String {
    beautify(Some(program), &BeautifyOptions::default())
}

#[test]
fn test_minified_output_is_a_fixpoint() {
    let options = CompressOptions::default();
    for source in SOURCES {
        let first = minified(&parse(source).unwrap(), &options);
        let reparsed = parse(&first).unwrap_or_else(|err| panic!("{source}: {first}: {err}"));
        assert_eq!(minified(&reparsed, &options), first, "source: {source}");
    }
}

#[test]
fn test_minified_with_line_breaks_is_a_fixpoint() {
    let options = CompressOptions::default().with_emit_trailing_newlines(true);
    for source in SOURCES {
        let first = minified(&parse(source).unwrap(), &options);
        let reparsed = parse(&first).unwrap_or_else(|err| panic!("{source}: {first}: {err}"));
        assert_eq!(minified(&reparsed, &options), first, "source: {source}");
    }
}

#[test]
fn test_beautified_output_is_a_fixpoint() {
    for source in SOURCES {
        let first = beautified(&parse(source).unwrap());
        let reparsed = parse(&first).unwrap_or_else(|err| panic!("{source}: {first}: {err}"));
        assert_eq!(beautified(&reparsed), first, "source: {source}");
    }
}

#[test]
fn test_modes_agree_on_structure() {
    let plain = CompressOptions::default();
    for source in SOURCES {
        let program = parse(source).unwrap();
        let from_pretty = parse(&beautified(&program)).unwrap();
        let from_compact = parse(&minified(&program, &plain)).unwrap();
        assert_eq!(
            minified(&from_pretty, &plain),
            minified(&from_compact, &plain),
            "source: {source}"
        );
    }
}

#[test]
fn test_obfuscated_output_parses() {
    let options = CompressOptions::default()
        .with_obfuscate(true)
        .with_annotate_original_names(true);
    for source in SOURCES {
        let out = minify(Some(&parse(source).unwrap()), &options, Box::new(AcceptAll));
        assert!(parse(&out.code).is_ok(), "{source}: {}", out.code);
    }
}
