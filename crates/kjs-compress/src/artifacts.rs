//! Files written after a minifying render.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::blacklist::Blacklist;
use crate::config::CompressOptions;
use crate::error::{Error, Result};
use crate::minify::Minified;
use crate::registry::RenameTable;

/// Write `substitute: original` lines in table order.
///
/// Nothing is written for an empty table; returns whether a file was written.
pub fn write_obfuscation_log(renames: &RenameTable, path: &Path) -> Result<bool> {
    if renames.is_empty() {
        return Ok(false);
    }
    let write = || -> std::io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        for (original, substitute) in renames {
            writeln!(out, "{substitute}: {original}")?;
        }
        out.flush()
    };
    write().map_err(|source| Error::ArtifactWrite {
        what: "obfuscation log",
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Write the blacklist, one identifier per line in sorted order.
pub fn write_blacklist_dump(blacklist: &Blacklist, path: &Path) -> Result<()> {
    File::create(path)
        .and_then(|file| blacklist.write_to(BufWriter::new(file)))
        .map_err(|source| Error::ArtifactWrite {
            what: "blacklist dump",
            path: path.to_path_buf(),
            source,
        })
}

impl Minified {
    /// Write the obfuscation log and, when configured, the blacklist dump.
    ///
    /// Failures are logged and returned; the rendered code is unaffected.
    pub fn write_artifacts(&self, options: &CompressOptions) -> Vec<Error> {
        let mut failures = Vec::new();

        match write_obfuscation_log(&self.renames, &options.obfuscation_log) {
            Ok(true) => tracing::debug!(
                path = %options.obfuscation_log.display(),
                entries = self.renames.len(),
                "wrote obfuscation log"
            ),
            Ok(false) => {}
            Err(err) => failures.push(err),
        }

        if let Some(target) = &options.blacklist_dump_target {
            match write_blacklist_dump(&self.blacklist, target) {
                Ok(()) => tracing::debug!(path = %target.display(), "wrote blacklist dump"),
                Err(err) => failures.push(err),
            }
        }

        for err in &failures {
            tracing::warn!(error = %err, "artifact not written");
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> RenameTable {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_log_lines_in_table_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kjscompress.log");
        let renames = table(&[("zeta", "__0"), ("alpha", "__1")]);

        assert!(write_obfuscation_log(&renames, &path).unwrap());
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "__0: zeta\n__1: alpha\n");
    }

    #[test]
    fn test_empty_table_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kjscompress.log");
        assert!(!write_obfuscation_log(&RenameTable::default(), &path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_target_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = write_blacklist_dump(&Blacklist::builtin(), &path).unwrap_err();
        assert!(matches!(err, Error::ArtifactWrite { what: "blacklist dump", .. }));
    }

    #[test]
    fn test_write_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("renames.log");
        let dump = dir.path().join("blacklist.txt");
        let options = CompressOptions::default()
            .with_obfuscation_log(&log)
            .with_blacklist_dump_target(&dump);
        let minified = Minified {
            code: "__0();".to_string(),
            renames: table(&[("run", "__0")]),
            blacklist: ["b", "a"].into_iter().collect(),
        };

        assert!(minified.write_artifacts(&options).is_empty());
        assert_eq!(std::fs::read_to_string(&log).unwrap(), "__0: run\n");
        assert_eq!(std::fs::read_to_string(&dump).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_write_artifacts_collects_failures() {
        let dir = tempfile::tempdir().unwrap();
        let options = CompressOptions::default()
            .with_obfuscation_log(dir.path().join("no/such/dir/log"))
            .with_blacklist_dump_target(dir.path().join("no/such/dir/dump"));
        let minified = Minified {
            code: String::new(),
            renames: table(&[("x", "__0")]),
            blacklist: Blacklist::new(),
        };
        assert_eq!(minified.write_artifacts(&options).len(), 2);
    }
}
