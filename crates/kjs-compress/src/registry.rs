//! Per-session identifier renaming state.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::base62::Base62;
use crate::blacklist::Blacklist;
use crate::config::CompressOptions;
use crate::confirm::{Answer, ConfirmPort};

/// Original name to substitute, in first-seen order.
pub type RenameTable = IndexMap<String, String, FxBuildHasher>;

/// How an identifier is printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Naming {
    /// Print the identifier as written.
    Verbatim,
    /// Print `substitute`, followed by `/*original*/` when `annotate` is set.
    Renamed { substitute: String, annotate: bool },
}

/// Rename table, blacklist and name counter of one minifying render.
///
/// Renaming ignores scope: equal identifier text always maps to the same
/// substitute, wherever it occurs.
pub struct RenameRegistry {
    obfuscate: bool,
    annotate: bool,
    ask: bool,
    exempt_prefix: String,
    prompt_context: usize,
    blacklist: Blacklist,
    table: RenameTable,
    counter: Base62,
    port: Box<dyn ConfirmPort>,
}

impl std::fmt::Debug for RenameRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenameRegistry")
            .field("obfuscate", &self.obfuscate)
            .field("ask", &self.ask)
            .field("exempt_prefix", &self.exempt_prefix)
            .field("blacklist", &self.blacklist.len())
            .field("table", &self.table.len())
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}

impl RenameRegistry {
    pub fn new(options: &CompressOptions, blacklist: Blacklist, port: Box<dyn ConfirmPort>) -> Self {
        Self {
            obfuscate: options.obfuscate,
            annotate: options.annotate_original_names,
            ask: options.interactive_confirm,
            exempt_prefix: options.exempt_prefix.clone(),
            prompt_context: options.prompt_context,
            blacklist,
            table: RenameTable::default(),
            counter: Base62::default(),
            port,
        }
    }

    /// Build a registry over the built-in blacklist plus the configured
    /// user list. An unreadable user list is logged and skipped.
    pub fn from_options(options: &CompressOptions, port: Box<dyn ConfirmPort>) -> Self {
        let mut blacklist = Blacklist::builtin();
        if let Some(path) = &options.blacklist_source {
            match blacklist.load(path) {
                Ok(added) => tracing::debug!(path = %path.display(), added, "loaded user blacklist"),
                Err(err) => {
                    tracing::warn!(error = %err, "continuing with the built-in blacklist");
                }
            }
        }
        tracing::debug!(
            obfuscate = options.obfuscate,
            blacklist = blacklist.len(),
            "rename registry ready"
        );
        Self::new(options, blacklist, port)
    }

    /// Decide how to print `name`. `emitted` is the output rendered so far.
    pub fn resolve(&mut self, name: &str, emitted: &str) -> Naming {
        if !self.obfuscate
            || (!self.exempt_prefix.is_empty() && name.starts_with(&self.exempt_prefix))
            || self.blacklist.contains(name)
        {
            return Naming::Verbatim;
        }

        if let Some(substitute) = self.table.get(name) {
            return self.renamed(substitute.clone());
        }

        if self.ask {
            let context = format!("{}{name}", tail_chars(emitted, self.prompt_context));
            match self.port.confirm(&context, name) {
                Answer::Yes => {}
                Answer::All => {
                    tracing::debug!("confirmation turned off for the rest of the session");
                    self.ask = false;
                }
                Answer::No => {
                    self.blacklist.insert(name);
                    return Naming::Verbatim;
                }
            }
        }

        let substitute = self.counter.next_name();
        tracing::trace!(original = name, %substitute, "new substitute");
        self.table.insert(name.to_string(), substitute.clone());
        self.renamed(substitute)
    }

    fn renamed(&self, substitute: String) -> Naming {
        Naming::Renamed {
            substitute,
            annotate: self.annotate,
        }
    }

    pub fn renames(&self) -> &RenameTable {
        &self.table
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    /// Hand back the finished table and blacklist.
    pub fn into_parts(self) -> (RenameTable, Blacklist) {
        (self.table, self.blacklist)
    }
}

/// The last `count` characters of `text`.
fn tail_chars(text: &str, count: usize) -> &str {
    if count == 0 {
        return "";
    }
    match text.char_indices().rev().nth(count - 1) {
        Some((start, _)) => &text[start..],
        None => text,
    }
}
