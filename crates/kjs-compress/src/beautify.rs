//! Canonical indented rendering.

use kjs_parser::Program;

use crate::config::BeautifyOptions;
use crate::registry::Naming;
use crate::render::{Emitter, Style};

struct Pretty;

impl Style for Pretty {
    const PRETTY: bool = true;

    fn naming(&mut self, _name: &str, _emitted: &str) -> Naming {
        Naming::Verbatim
    }
}

/// Render `program` with canonical spacing and indentation.
pub fn beautify(program: Option<&Program>, options: &BeautifyOptions) -> String {
    let (code, Pretty) = Emitter::new(Pretty, &options.indent).render(program);
    tracing::debug!(bytes = code.len(), "beautified");
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use kjs_parser::parse;

    fn pretty(source: &str) -> String {
        let program = parse(source).unwrap();
        beautify(Some(&program), &BeautifyOptions::default())
    }

    #[test]
    fn test_if_else_bodies_get_braces() {
        assert_eq!(
            pretty("if(a)b();else c();"),
            "if (a) {\n    b();\n} else {\n    c();\n}"
        );
    }

    #[test]
    fn test_else_if_chain_stays_flat() {
        assert_eq!(
            pretty("if (a) x(); else if (b) y(); else z();"),
            "if (a) {\n    x();\n} else if (b) {\n    y();\n} else {\n    z();\n}"
        );
    }

    #[test]
    fn test_loops() {
        assert_eq!(pretty("while(a)b();"), "while (a) {\n    b();\n}");
        assert_eq!(pretty("do x(); while(a)"), "do {\n    x();\n} while (a);");
        assert_eq!(
            pretty("for(var i=0;i<n;i++)f(i);"),
            "for (var i = 0; i < n; i++) {\n    f(i);\n}"
        );
        assert_eq!(pretty("for(;;){}"), "for (;;) {}");
        assert_eq!(
            pretty("for(var k in o)f(k);"),
            "for (var k in o) {\n    f(k);\n}"
        );
        assert_eq!(pretty("with(o)f();"), "with (o) {\n    f();\n}");
    }

    #[test]
    fn test_nested_blocks_indent() {
        assert_eq!(
            pretty("function f(a,b){if(a){return b;}return a;}"),
            "function f(a, b) {\n    if (a) {\n        return b;\n    }\n    return a;\n}"
        );
    }

    #[test]
    fn test_switch() {
        assert_eq!(
            pretty("switch(x){case 1:a();break;default:b();}"),
            "switch (x) {\n    case 1:\n        a();\n        break;\n    default:\n        b();\n}"
        );
    }

    #[test]
    fn test_labeled_statement_indents_body() {
        assert_eq!(
            pretty("outer:for(;;)break outer;"),
            "outer:\n    for (;;) {\n        break outer;\n    }"
        );
    }

    #[test]
    fn test_try_catch_finally() {
        assert_eq!(
            pretty("try{a();}catch(e){b();}finally{c();}"),
            "try {\n    a();\n} catch (e) {\n    b();\n} finally {\n    c();\n}"
        );
    }

    #[test]
    fn test_operator_spacing() {
        assert_eq!(pretty("x=a+b*c;"), "x = a + b * c;");
        assert_eq!(pretty("x<<=1;"), "x <<= 1;");
        assert_eq!(pretty("x>>>=1;"), "x >>>= 1;");
        assert_eq!(pretty("x=a?b:c;"), "x = a ? b : c;");
        assert_eq!(pretty("x=!a&&-b;"), "x = !a && -b;");
        assert_eq!(pretty("x=typeof a;"), "x = typeof a;");
        assert_eq!(pretty("i++;--j;"), "i++;\n--j;");
        assert_eq!(pretty("a=b,c=d;"), "a = b, c = d;");
        assert_eq!(pretty("x=a+ ++b;"), "x = a + ++b;");
    }

    #[test]
    fn test_literals() {
        assert_eq!(pretty("x={a:1,'b':[1,2]};"), "x = {a: 1, \"b\": [1, 2]};");
        assert_eq!(pretty("f(function(){});"), "f(function () {});");
        assert_eq!(pretty("var f=function g(a){};"), "var f = function g(a) {};");
        assert_eq!(pretty("x=new Date;"), "x = new Date;");
    }

    #[test]
    fn test_custom_indent() {
        let program = parse("if(a)b();").unwrap();
        let options = BeautifyOptions {
            indent: "\t".to_string(),
        };
        assert_eq!(beautify(Some(&program), &options), "if (a) {\n\tb();\n}");
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(beautify(None, &BeautifyOptions::default()), "");
    }
}
