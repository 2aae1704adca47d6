//! Read, parse, render, validate, write.

use std::io::{Read, Write};
use std::path::PathBuf;

use kjs_compress::{
    beautify, minify, AcceptAll, BeautifyOptions, CompressOptions, ConfirmPort, TerminalPrompt,
};
use kjs_parser::{parse, ParseError};
use miette::{IntoDiagnostic, Result};

/// Exit code for input that does not parse or output that fails validation.
const EXIT_SYNTAX_ERROR: i32 = 1;

/// One invocation of the tool.
#[derive(Debug)]
pub struct Job {
    /// Input file; stdin when `None`.
    pub input: Option<PathBuf>,
    /// Output file; stdout when `None`.
    pub output: Option<PathBuf>,
    pub beautify: bool,
    pub validate: bool,
    /// Characters of code shown around a syntax error.
    pub context: usize,
    pub compress: CompressOptions,
    pub beautify_options: BeautifyOptions,
}

pub fn run(mut job: Job) -> Result<()> {
    if job.compress.interactive_confirm && job.input.is_none() {
        tracing::warn!("ignoring --ask: it needs the program in --file, stdin carries the answers");
        job.compress.interactive_confirm = false;
    }

    let source = read_input(&job)?;
    let program = match parse(&source) {
        Ok(program) => program,
        Err(err) => report_and_exit("ERR", &err, &source, job.context, None),
    };
    tracing::debug!(statements = program.body.len(), "parsed input");

    let (code, minified) = if job.beautify {
        (beautify(Some(&program), &job.beautify_options), None)
    } else {
        let port: Box<dyn ConfirmPort> = if job.compress.interactive_confirm {
            Box::new(TerminalPrompt::stdio())
        } else {
            Box::new(AcceptAll)
        };
        let minified = minify(Some(&program), &job.compress, port);
        (minified.code.clone(), Some(minified))
    };

    if job.validate {
        if let Err(err) = parse(&code) {
            report_and_exit("VALIDATE_ERR", &err, &code, job.context, Some(job.context));
        }
    }

    write_output(&job, &code)?;

    if let Some(minified) = minified {
        // Failures are logged; the program text is already written.
        minified.write_artifacts(&job.compress);
    }
    Ok(())
}

fn read_input(job: &Job) -> Result<String> {
    match &job.input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| miette::miette!("Cannot read {}: {}", path.display(), e)),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .into_diagnostic()?;
            Ok(source)
        }
    }
}

fn write_output(job: &Job, code: &str) -> Result<()> {
    match &job.output {
        Some(path) => std::fs::write(path, format!("{code}\n"))
            .map_err(|e| miette::miette!("Cannot write {}: {}", path.display(), e)),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{code}").into_diagnostic()?;
            stdout.flush().into_diagnostic()
        }
    }
}

fn report_and_exit(
    label: &str,
    err: &ParseError,
    text: &str,
    context: usize,
    after: Option<usize>,
) -> ! {
    eprintln!("{label}: {}", err.message);
    eprintln!(
        "{}",
        crate::excerpt::excerpt(text, err.span.start as usize, context, after)
    );
    std::process::exit(EXIT_SYNTAX_ERROR);
}
