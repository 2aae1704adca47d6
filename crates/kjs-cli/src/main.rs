#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::missing_errors_doc)]

mod excerpt;
mod logging;
mod pipeline;

use clap::Parser;
use kjs_compress::{BeautifyOptions, CompressOptions};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::pipeline::Job;

#[derive(Parser, Debug)]
#[command(name = "kjscompress")]
#[command(author, version, about = "Minify, obfuscate or beautify JavaScript", long_about = None)]
struct Cli {
    /// Read the program from this file instead of stdin ("-" for stdin)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    from: Option<PathBuf>,

    /// Write the result to this file instead of stdout ("-" for stdout)
    #[arg(short = 't', long = "to", value_name = "PATH")]
    to: Option<PathBuf>,

    /// Beautify instead of minifying
    #[arg(short = 'd', long = "decompress")]
    decompress: bool,

    /// Skip re-parsing the generated code
    #[arg(long)]
    no_validate: bool,

    /// Start every statement of minified code on a new line
    #[arg(short = 'n', long)]
    newlines: bool,

    /// Characters of code shown around a syntax error
    #[arg(short = 'e', long, value_name = "N", default_value_t = 30)]
    context: usize,

    /// Rename identifiers to short generated names
    #[arg(short = 'o', long)]
    obfuscate: bool,

    /// Follow every generated name with the original in a comment
    #[arg(short = 'c', long)]
    comment: bool,

    /// Ask before renaming each new identifier (needs --file)
    #[arg(short = 'a', long)]
    ask: bool,

    /// Never rename identifiers starting with PREFIX
    #[arg(short = 'p', long, value_name = "PREFIX")]
    prefix: Option<String>,

    /// Whitespace-separated identifiers that must not be renamed
    #[arg(short = 'b', long, value_name = "PATH")]
    blacklist: Option<PathBuf>,

    /// Write the final blacklist to PATH
    #[arg(short = 'B', long, value_name = "PATH")]
    blacklist_dump: Option<PathBuf>,

    /// Where to write the rename log
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// Indentation unit of beautified code
    #[arg(long, value_name = "STRING")]
    indent: Option<String>,

    /// JSON file with compression options; flags override it
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Options from `--config`, overridden by the flags given.
    fn compress_options(&self) -> Result<CompressOptions> {
        let mut options = match &self.config {
            Some(path) => CompressOptions::load(path).into_diagnostic()?,
            None => CompressOptions::default(),
        };

        options.obfuscate |= self.obfuscate;
        options.annotate_original_names |= self.comment;
        options.interactive_confirm |= self.ask;
        options.emit_trailing_newlines |= self.newlines;
        if let Some(prefix) = &self.prefix {
            options.exempt_prefix.clone_from(prefix);
        }
        if let Some(path) = &self.blacklist {
            options.blacklist_source = Some(path.clone());
        }
        if let Some(path) = &self.blacklist_dump {
            options.blacklist_dump_target = Some(path.clone());
        }
        if let Some(path) = &self.log {
            options.obfuscation_log.clone_from(path);
        }
        Ok(options)
    }

    fn beautify_options(&self) -> BeautifyOptions {
        match &self.indent {
            Some(indent) => BeautifyOptions {
                indent: indent.clone(),
            },
            None => BeautifyOptions::default(),
        }
    }
}

/// `None` for a missing path or "-".
fn named_path(path: Option<&PathBuf>) -> Option<PathBuf> {
    path.filter(|p| p.as_os_str() != "-").cloned()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json);

    let job = Job {
        input: named_path(cli.from.as_ref()),
        output: named_path(cli.to.as_ref()),
        beautify: cli.decompress,
        validate: !cli.no_validate,
        context: cli.context,
        compress: cli.compress_options()?,
        beautify_options: cli.beautify_options(),
    };

    pipeline::run(job)
}
