//! Options for minifying and beautifying renders.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default path of the `substitute: original` log.
pub const DEFAULT_LOG_PATH: &str = "kjscompress.log";

/// Characters of already emitted output shown with each confirmation prompt.
pub const DEFAULT_PROMPT_CONTEXT: usize = 30;

/// Options for a minifying render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressOptions {
    /// Rewrite identifiers to generated names.
    pub obfuscate: bool,

    /// Follow each generated name with `/*original*/`.
    pub annotate_original_names: bool,

    /// Ask before generating a name for an identifier not seen yet.
    pub interactive_confirm: bool,

    /// Identifiers starting with this prefix are never renamed.
    pub exempt_prefix: String,

    /// Whitespace-separated identifiers merged into the built-in blacklist.
    pub blacklist_source: Option<PathBuf>,

    /// Where to dump the final blacklist, one identifier per line.
    pub blacklist_dump_target: Option<PathBuf>,

    /// Start every statement on a new line.
    pub emit_trailing_newlines: bool,

    /// Where to write the rename log when anything was renamed.
    pub obfuscation_log: PathBuf,

    /// Characters of output shown with each confirmation prompt.
    pub prompt_context: usize,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            obfuscate: false,
            annotate_original_names: false,
            interactive_confirm: false,
            exempt_prefix: String::new(),
            blacklist_source: None,
            blacklist_dump_target: None,
            emit_trailing_newlines: false,
            obfuscation_log: PathBuf::from(DEFAULT_LOG_PATH),
            prompt_context: DEFAULT_PROMPT_CONTEXT,
        }
    }
}

impl CompressOptions {
    /// Read options from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn with_obfuscate(mut self, obfuscate: bool) -> Self {
        self.obfuscate = obfuscate;
        self
    }

    #[must_use]
    pub fn with_annotate_original_names(mut self, annotate: bool) -> Self {
        self.annotate_original_names = annotate;
        self
    }

    #[must_use]
    pub fn with_interactive_confirm(mut self, ask: bool) -> Self {
        self.interactive_confirm = ask;
        self
    }

    #[must_use]
    pub fn with_exempt_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.exempt_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_blacklist_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.blacklist_source = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_blacklist_dump_target(mut self, path: impl Into<PathBuf>) -> Self {
        self.blacklist_dump_target = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_emit_trailing_newlines(mut self, newlines: bool) -> Self {
        self.emit_trailing_newlines = newlines;
        self
    }

    #[must_use]
    pub fn with_obfuscation_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.obfuscation_log = path.into();
        self
    }
}

/// Options for a beautifying render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeautifyOptions {
    /// One level of indentation.
    pub indent: String,
}

impl Default for BeautifyOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CompressOptions::default();
        assert!(!options.obfuscate);
        assert_eq!(options.obfuscation_log, PathBuf::from("kjscompress.log"));
        assert_eq!(options.prompt_context, 30);
        assert_eq!(BeautifyOptions::default().indent, "    ");
    }

    #[test]
    fn test_load_partial_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kjscompress.json");
        std::fs::write(
            &path,
            r#"{"obfuscate": true, "exemptPrefix": "$", "blacklistSource": "names.txt"}"#,
        )
        .unwrap();

        let options = CompressOptions::load(&path).unwrap();
        assert!(options.obfuscate);
        assert_eq!(options.exempt_prefix, "$");
        assert_eq!(options.blacklist_source, Some(PathBuf::from("names.txt")));
        assert!(!options.annotate_original_names);
        assert_eq!(options.obfuscation_log, PathBuf::from(DEFAULT_LOG_PATH));
    }

    #[test]
    fn test_load_errors_name_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = CompressOptions::load(&missing).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ obfuscate").unwrap();
        let err = CompressOptions::load(&broken).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_builder() {
        let options = CompressOptions::default()
            .with_obfuscate(true)
            .with_exempt_prefix("_")
            .with_emit_trailing_newlines(true);
        assert!(options.obfuscate);
        assert_eq!(options.exempt_prefix, "_");
        assert!(options.emit_trailing_newlines);
    }
}
