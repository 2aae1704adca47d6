//! Minifier, identifier obfuscator and beautifier for ECMAScript 3 trees.
//!
//! ```
//! use kjs_compress::{beautify, minify, AcceptAll, BeautifyOptions, CompressOptions};
//!
//! let program = kjs_parser::parse("if (a) b(); else c();").unwrap();
//!
//! let minified = minify(Some(&program), &CompressOptions::default(), Box::new(AcceptAll));
//! assert_eq!(minified.code, "if(a)b();else c();");
//!
//! let pretty = beautify(Some(&program), &BeautifyOptions::default());
//! assert_eq!(pretty, "if (a) {\n    b();\n} else {\n    c();\n}");
//! ```

pub mod artifacts;
pub mod base62;
pub mod beautify;
pub mod blacklist;
pub mod config;
pub mod confirm;
pub mod error;
pub mod escape;
pub mod minify;
pub mod registry;
mod render;

pub use artifacts::{write_blacklist_dump, write_obfuscation_log};
pub use base62::{Base62, MARKER};
pub use beautify::beautify;
pub use blacklist::{Blacklist, SYSTEM_BLACKLIST};
pub use config::{BeautifyOptions, CompressOptions};
pub use confirm::{AcceptAll, Answer, ConfirmPort, DeclineAll, TerminalPrompt};
pub use error::{Error, Result};
pub use escape::escape;
pub use minify::{minify, minify_with, Minified};
pub use registry::{Naming, RenameRegistry, RenameTable};
