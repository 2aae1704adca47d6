//! kjs-parser: ECMAScript 3 lexer and parser.
//!
//! Produces the closed-sum syntax tree that `kjs-compress` prints back
//! out as minified or beautified source.
//!
//! # Example
//!
//! ```
//! use kjs_parser::{parse, StmtKind};
//!
//! let program = parse("var x = 1 + 2;").unwrap();
//! assert!(matches!(program.body[0].kind, StmtKind::Var(_)));
//! ```

mod ast;
mod lexer;
mod parser;
mod span;
mod token;

pub use ast::*;
pub use lexer::Lexer;
pub use parser::{parse, ParseError, Parser};
pub use span::Span;
pub use token::{Token, TokenKind};
