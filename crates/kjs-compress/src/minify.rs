//! Shortest-form rendering with optional identifier obfuscation.

use kjs_parser::Program;

use crate::blacklist::Blacklist;
use crate::config::CompressOptions;
use crate::confirm::ConfirmPort;
use crate::registry::{Naming, RenameRegistry, RenameTable};
use crate::render::{Emitter, Style};

/// Output of a minifying render.
#[derive(Debug, Clone)]
pub struct Minified {
    /// The rendered program.
    pub code: String,
    /// Every generated substitute, in first-seen order.
    pub renames: RenameTable,
    /// The blacklist as it stood at the end, including declined names.
    pub blacklist: Blacklist,
}

struct Compact {
    registry: RenameRegistry,
    line_breaks: bool,
}

impl Style for Compact {
    const PRETTY: bool = false;

    fn line_breaks(&self) -> bool {
        self.line_breaks
    }

    fn naming(&mut self, name: &str, emitted: &str) -> Naming {
        self.registry.resolve(name, emitted)
    }
}

/// Minify `program` with the built-in blacklist plus any configured user list.
///
/// `port` answers rename questions when `interactive_confirm` is set.
pub fn minify(
    program: Option<&Program>,
    options: &CompressOptions,
    port: Box<dyn ConfirmPort>,
) -> Minified {
    let registry = RenameRegistry::from_options(options, port);
    minify_with(program, options, registry)
}

/// Minify `program` through an existing registry.
pub fn minify_with(
    program: Option<&Program>,
    options: &CompressOptions,
    registry: RenameRegistry,
) -> Minified {
    let style = Compact {
        registry,
        line_breaks: options.emit_trailing_newlines,
    };
    let (code, style) = Emitter::new(style, "").render(program);
    let (renames, blacklist) = style.registry.into_parts();
    tracing::debug!(bytes = code.len(), renamed = renames.len(), "minified");
    Minified {
        code,
        renames,
        blacklist,
    }
}
