//! Asking a person whether an identifier may be renamed.

use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Reply to a rename question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Rename this identifier.
    Yes,
    /// Rename this one and stop asking.
    All,
    /// Keep the name and never ask about it again.
    No,
}

impl Answer {
    /// Interpret a typed reply by its first non-whitespace character.
    pub fn from_reply(reply: &str) -> Self {
        match reply.trim_start().chars().next() {
            Some('y' | 'Y') => Self::Yes,
            Some('a' | 'A') => Self::All,
            _ => Self::No,
        }
    }
}

/// Source of rename decisions while interactive confirmation is on.
pub trait ConfirmPort {
    /// Decide for `candidate`; `context` is the tail of the output so far.
    fn confirm(&mut self, context: &str, candidate: &str) -> Answer;
}

/// Accepts every candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ConfirmPort for AcceptAll {
    fn confirm(&mut self, _context: &str, _candidate: &str) -> Answer {
        Answer::Yes
    }
}

/// Declines every candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclineAll;

impl ConfirmPort for DeclineAll {
    fn confirm(&mut self, _context: &str, _candidate: &str) -> Answer {
        Answer::No
    }
}

const RULE: &str = "--------------------------------------";

/// Line-oriented prompt over any reader and writer.
///
/// Blank lines are skipped; end of input counts as a refusal.
#[derive(Debug)]
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, read replies from stdin.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show the question and read one answer.
    pub fn ask(&mut self, context: &str, candidate: &str) -> Result<Answer> {
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "{context}")?;
        writeln!(self.output, "{RULE}")?;
        write!(self.output, "Obfuscate `{candidate}' identifier? (y/n/a) ")?;
        self.output.flush()?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(Answer::No);
            }
            if !line.trim().is_empty() {
                return Ok(Answer::from_reply(&line));
            }
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> ConfirmPort for TerminalPrompt<R, W> {
    fn confirm(&mut self, context: &str, candidate: &str) -> Answer {
        self.ask(context, candidate).unwrap_or_else(|err| {
            tracing::warn!(candidate, error = %err, "confirmation failed, keeping name");
            Answer::No
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(input: &str) -> TerminalPrompt<&[u8], Vec<u8>> {
        TerminalPrompt::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_from_reply() {
        assert_eq!(Answer::from_reply("y"), Answer::Yes);
        assert_eq!(Answer::from_reply("  Yes please"), Answer::Yes);
        assert_eq!(Answer::from_reply("A"), Answer::All);
        assert_eq!(Answer::from_reply("n"), Answer::No);
        assert_eq!(Answer::from_reply("x"), Answer::No);
        assert_eq!(Answer::from_reply(""), Answer::No);
    }

    #[test]
    fn test_prompt_shows_context_and_candidate() {
        let mut p = prompt("y\n");
        assert_eq!(p.confirm("var foo", "foo"), Answer::Yes);
        let (_, out) = p.into_inner();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("\nvar foo\n"));
        assert!(out.contains("Obfuscate `foo' identifier? (y/n/a)"));
        assert!(out.starts_with("-----"));
    }

    #[test]
    fn test_prompt_skips_blank_lines() {
        let mut p = prompt("\n   \n a\n");
        assert_eq!(p.confirm("", "x"), Answer::All);
    }

    #[test]
    fn test_prompt_eof_declines() {
        let mut p = prompt("");
        assert_eq!(p.confirm("", "x"), Answer::No);
    }

    #[test]
    fn test_prompt_reads_one_answer_per_question() {
        let mut p = prompt("y\nn\n");
        assert_eq!(p.confirm("", "a"), Answer::Yes);
        assert_eq!(p.confirm("", "b"), Answer::No);
        assert_eq!(p.confirm("", "c"), Answer::No);
    }

    #[test]
    fn test_fixed_ports() {
        assert_eq!(AcceptAll.confirm("", "x"), Answer::Yes);
        assert_eq!(DeclineAll.confirm("", "x"), Answer::No);
    }
}
