//! Lexer (tokenizer) for ECMAScript 3 source.
//!
//! The lexer is pulled on demand by the parser so that a `/` can be
//! classified as division or the start of a regular expression from the
//! previous token.

use crate::span::Span;
use crate::token::{keyword_from_str, Token, TokenKind};

/// The lexer state.
#[derive(Clone)]
pub struct Lexer<'a> {
    /// Source text; sliced on char boundaries only.
    text: &'a str,
    /// Source code as bytes (for fast indexing).
    source: &'a [u8],
    /// Current byte position.
    pos: usize,
    /// Start position of the current token.
    token_start: usize,
    /// Whether the previous token allows a regex to follow.
    allow_regex: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            text: source,
            source: source.as_bytes(),
            pos: 0,
            token_start: 0,
            allow_regex: true,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token {
        let had_newline_before = self.skip_whitespace_and_comments();
        self.token_start = self.pos;

        if self.is_eof() {
            return self.make_token(TokenKind::Eof, had_newline_before);
        }

        let ch = self.current();
        let kind = match ch {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => self.scan_identifier(),
            b'0'..=b'9' => self.scan_number(),
            b'"' | b'\'' => self.scan_string(ch),

            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'{' => self.single(TokenKind::LBrace),
            b'}' => self.single(TokenKind::RBrace),
            b'[' => self.single(TokenKind::LBracket),
            b']' => self.single(TokenKind::RBracket),
            b';' => self.single(TokenKind::Semicolon),
            b',' => self.single(TokenKind::Comma),
            b':' => self.single(TokenKind::Colon),
            b'?' => self.single(TokenKind::Question),
            b'~' => self.single(TokenKind::Tilde),

            b'.' => self.scan_dot(),
            b'+' => self.scan_plus(),
            b'-' => self.scan_minus(),
            b'*' => self.scan_with_eq(TokenKind::Star, TokenKind::StarEq),
            b'/' => self.scan_slash(),
            b'%' => self.scan_with_eq(TokenKind::Percent, TokenKind::PercentEq),
            b'^' => self.scan_with_eq(TokenKind::Caret, TokenKind::CaretEq),
            b'=' => self.scan_equals(),
            b'!' => self.scan_bang(),
            b'<' => self.scan_less_than(),
            b'>' => self.scan_greater_than(),
            b'&' => self.scan_ampersand(),
            b'|' => self.scan_pipe(),

            _ => match self.current_char() {
                Some(c) if is_id_start(c) => self.scan_identifier(),
                Some(c) => {
                    self.pos += c.len_utf8();
                    TokenKind::Invalid(format!("unexpected character `{c}`"))
                }
                None => {
                    self.advance();
                    TokenKind::Invalid("invalid byte".to_string())
                }
            },
        };

        self.allow_regex = !kind.ends_operand();
        self.make_token(kind, had_newline_before)
    }

    /// Peek at the next token without consuming it.
    pub fn peek(&mut self) -> Token {
        let saved_pos = self.pos;
        let saved_start = self.token_start;
        let saved_regex = self.allow_regex;

        let token = self.next_token();

        self.pos = saved_pos;
        self.token_start = saved_start;
        self.allow_regex = saved_regex;

        token
    }

    // === Helper methods ===

    fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn current(&self) -> u8 {
        self.source.get(self.pos).copied().unwrap_or(0)
    }

    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    fn peek_char(&self) -> u8 {
        self.source.get(self.pos + 1).copied().unwrap_or(0)
    }

    fn peek_char_n(&self, n: usize) -> u8 {
        self.source.get(self.pos + n).copied().unwrap_or(0)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    fn make_token(&self, kind: TokenKind, had_newline_before: bool) -> Token {
        Token::new(
            kind,
            Span::new(self.token_start as u32, self.pos as u32),
            had_newline_before,
        )
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[start..end]
    }

    // === Whitespace and comments ===

    /// Skip trivia; returns whether a line terminator was crossed.
    fn skip_whitespace_and_comments(&mut self) -> bool {
        let mut newline = false;
        loop {
            match self.current() {
                b' ' | b'\t' | 0x0B | 0x0C => self.advance(),
                b'\r' | b'\n' => {
                    newline = true;
                    self.advance();
                }
                b'/' if self.peek_char() == b'/' => self.skip_line_comment(),
                b'/' if self.peek_char() == b'*' => {
                    newline |= self.skip_block_comment();
                }
                // `<!--` opens a single-line comment in script code.
                b'<' if self.peek_char() == b'!'
                    && self.peek_char_n(2) == b'-'
                    && self.peek_char_n(3) == b'-' =>
                {
                    self.skip_line_comment();
                }
                // `-->` at the start of a line does too.
                b'-' if (newline || self.pos == 0)
                    && self.peek_char() == b'-'
                    && self.peek_char_n(2) == b'>' =>
                {
                    self.skip_line_comment();
                }
                b if b >= 0x80 => match self.current_char() {
                    Some(c) if is_line_terminator(c) => {
                        newline = true;
                        self.pos += c.len_utf8();
                    }
                    Some(c) if c.is_whitespace() || c == '\u{FEFF}' => {
                        self.pos += c.len_utf8();
                    }
                    _ => break,
                },
                _ => break,
            }
        }
        newline
    }

    fn skip_line_comment(&mut self) {
        while !self.is_eof() && !matches!(self.current(), b'\n' | b'\r') {
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) -> bool {
        self.advance_n(2); // Skip /*
        let mut newline = false;
        while !self.is_eof() {
            match self.current() {
                b'*' if self.peek_char() == b'/' => {
                    self.advance_n(2);
                    return newline;
                }
                b'\n' | b'\r' => newline = true,
                _ => {}
            }
            self.advance();
        }
        // Unterminated block comment swallows the rest of the input.
        newline
    }

    // === Token scanning ===

    fn scan_identifier(&mut self) -> TokenKind {
        while let Some(c) = self.current_char() {
            if is_id_part(c) {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }

        let ident = self.slice(self.token_start, self.pos);
        keyword_from_str(ident).unwrap_or_else(|| TokenKind::Identifier(ident.to_string()))
    }

    fn scan_number(&mut self) -> TokenKind {
        let start = self.pos;

        if self.current() == b'0' && matches!(self.peek_char(), b'x' | b'X') {
            return self.scan_hex_number();
        }

        while self.current().is_ascii_digit() {
            self.advance();
        }
        let integer = self.slice(start, self.pos);

        // Legacy octal: `017` is 15, `019` is decimal 19.
        if integer.len() > 1
            && integer.starts_with('0')
            && integer.bytes().all(|b| (b'0'..=b'7').contains(&b))
        {
            let value = u64::from_str_radix(&integer[1..], 8).unwrap_or(0) as f64;
            return TokenKind::Number(value);
        }

        if self.current() == b'.' {
            self.advance();
            while self.current().is_ascii_digit() {
                self.advance();
            }
        }

        self.scan_exponent();

        let num_str = self.slice(start, self.pos);
        TokenKind::Number(num_str.parse().unwrap_or(f64::NAN))
    }

    fn scan_exponent(&mut self) {
        if !matches!(self.current(), b'e' | b'E') {
            return;
        }
        let sign = usize::from(matches!(self.peek_char(), b'+' | b'-'));
        if self.peek_char_n(1 + sign).is_ascii_digit() {
            self.advance_n(1 + sign);
            while self.current().is_ascii_digit() {
                self.advance();
            }
        }
    }

    fn scan_hex_number(&mut self) -> TokenKind {
        let start = self.pos;
        self.advance_n(2); // Skip 0x

        while self.current().is_ascii_hexdigit() {
            self.advance();
        }

        let hex_str = self.slice(start + 2, self.pos);
        if hex_str.is_empty() {
            return TokenKind::Invalid("missing hexadecimal digits".to_string());
        }
        let value = hex_str
            .bytes()
            .fold(0f64, |acc, b| acc * 16.0 + f64::from((b as char).to_digit(16).unwrap_or(0)));
        TokenKind::Number(value)
    }

    fn scan_string(&mut self, quote: u8) -> TokenKind {
        self.advance(); // Skip opening quote

        let mut value = String::new();
        loop {
            if self.is_eof() {
                return TokenKind::Invalid("unterminated string literal".to_string());
            }
            match self.current() {
                b if b == quote => {
                    self.advance();
                    return TokenKind::String(value);
                }
                b'\n' | b'\r' => {
                    return TokenKind::Invalid("unterminated string literal".to_string());
                }
                b'\\' => {
                    self.advance();
                    if let Some(c) = self.scan_escape_sequence() {
                        value.push(c);
                    }
                }
                b if b < 0x80 => {
                    value.push(b as char);
                    self.advance();
                }
                _ => match self.current_char() {
                    Some(c) => {
                        value.push(c);
                        self.pos += c.len_utf8();
                    }
                    None => {
                        return TokenKind::Invalid("invalid UTF-8 in string literal".to_string());
                    }
                },
            }
        }
    }

    /// Decode one escape after the backslash. `None` for a line continuation.
    fn scan_escape_sequence(&mut self) -> Option<char> {
        let ch = self.current();
        match ch {
            b'\r' => {
                self.advance();
                if self.current() == b'\n' {
                    self.advance();
                }
                return None;
            }
            b'\n' => {
                self.advance();
                return None;
            }
            b'0'..=b'7' => return Some(self.scan_octal_escape()),
            b'x' if self.peek_char().is_ascii_hexdigit() && self.peek_char_n(2).is_ascii_hexdigit() => {
                self.advance();
                return Some(self.scan_hex_escape(2));
            }
            b'u' if (1..=4).all(|n| self.peek_char_n(n).is_ascii_hexdigit()) => {
                self.advance();
                return Some(self.scan_hex_escape(4));
            }
            _ => {}
        }

        if ch < 0x80 {
            self.advance();
            return Some(match ch {
                b'b' => '\u{8}',
                b'f' => '\u{c}',
                b'n' => '\n',
                b'r' => '\r',
                b't' => '\t',
                b'v' => '\u{b}',
                _ => ch as char,
            });
        }

        let c = self.current_char()?;
        self.pos += c.len_utf8();
        if is_line_terminator(c) {
            None
        } else {
            Some(c)
        }
    }

    fn scan_octal_escape(&mut self) -> char {
        // Up to three digits when the first is 0-3, otherwise two.
        let max = if self.current() <= b'3' { 3 } else { 2 };
        let mut value = 0u32;
        for _ in 0..max {
            match self.current() {
                d @ b'0'..=b'7' => {
                    value = value * 8 + u32::from(d - b'0');
                    self.advance();
                }
                _ => break,
            }
        }
        char::from_u32(value).unwrap_or('\u{FFFD}')
    }

    fn scan_hex_escape(&mut self, len: usize) -> char {
        let mut value = 0u32;
        for _ in 0..len {
            if let Some(digit) = (self.current() as char).to_digit(16) {
                value = value * 16 + digit;
                self.advance();
            } else {
                break;
            }
        }
        char::from_u32(value).unwrap_or('\u{FFFD}')
    }

    fn scan_regex(&mut self) -> TokenKind {
        self.advance(); // Skip opening /
        let pattern_start = self.pos;

        let mut in_class = false;
        loop {
            if self.is_eof() {
                return TokenKind::Invalid("unterminated regular expression".to_string());
            }
            match self.current() {
                b'/' if !in_class => break,
                b'[' => {
                    in_class = true;
                    self.advance();
                }
                b']' => {
                    in_class = false;
                    self.advance();
                }
                b'\\' => {
                    self.advance();
                    if matches!(self.current(), b'\n' | b'\r') {
                        return TokenKind::Invalid("unterminated regular expression".to_string());
                    }
                    self.skip_char();
                }
                b'\n' | b'\r' => {
                    return TokenKind::Invalid("unterminated regular expression".to_string());
                }
                _ => self.skip_char(),
            }
        }

        let pattern = self.slice(pattern_start, self.pos).to_string();
        self.advance(); // Skip closing /

        let flags_start = self.pos;
        while let Some(c) = self.current_char() {
            if is_id_part(c) {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        let flags = self.slice(flags_start, self.pos).to_string();

        TokenKind::Regex { pattern, flags }
    }

    fn skip_char(&mut self) {
        match self.current_char() {
            Some(c) => self.pos += c.len_utf8(),
            None => self.advance(),
        }
    }

    // === Multi-character operators ===

    fn scan_with_eq(&mut self, plain: TokenKind, with_eq: TokenKind) -> TokenKind {
        self.advance();
        if self.current() == b'=' {
            self.advance();
            with_eq
        } else {
            plain
        }
    }

    fn scan_dot(&mut self) -> TokenKind {
        if self.peek_char().is_ascii_digit() {
            let start = self.pos;
            self.advance();
            while self.current().is_ascii_digit() {
                self.advance();
            }
            self.scan_exponent();
            let num_str = self.slice(start, self.pos);
            return TokenKind::Number(num_str.parse().unwrap_or(f64::NAN));
        }
        self.single(TokenKind::Dot)
    }

    fn scan_plus(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'+' => self.single(TokenKind::PlusPlus),
            b'=' => self.single(TokenKind::PlusEq),
            _ => TokenKind::Plus,
        }
    }

    fn scan_minus(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'-' => self.single(TokenKind::MinusMinus),
            b'=' => self.single(TokenKind::MinusEq),
            _ => TokenKind::Minus,
        }
    }

    fn scan_slash(&mut self) -> TokenKind {
        if self.allow_regex {
            return self.scan_regex();
        }
        self.scan_with_eq(TokenKind::Slash, TokenKind::SlashEq)
    }

    fn scan_equals(&mut self) -> TokenKind {
        self.advance();
        if self.current() != b'=' {
            return TokenKind::Eq;
        }
        self.advance();
        if self.current() == b'=' {
            self.single(TokenKind::EqEqEq)
        } else {
            TokenKind::EqEq
        }
    }

    fn scan_bang(&mut self) -> TokenKind {
        self.advance();
        if self.current() != b'=' {
            return TokenKind::Bang;
        }
        self.advance();
        if self.current() == b'=' {
            self.single(TokenKind::BangEqEq)
        } else {
            TokenKind::BangEq
        }
    }

    fn scan_less_than(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'<' => self.scan_with_eq(TokenKind::LtLt, TokenKind::LtLtEq),
            b'=' => self.single(TokenKind::LtEq),
            _ => TokenKind::Lt,
        }
    }

    fn scan_greater_than(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'>' => {
                self.advance();
                match self.current() {
                    b'>' => self.scan_with_eq(TokenKind::GtGtGt, TokenKind::GtGtGtEq),
                    b'=' => self.single(TokenKind::GtGtEq),
                    _ => TokenKind::GtGt,
                }
            }
            b'=' => self.single(TokenKind::GtEq),
            _ => TokenKind::Gt,
        }
    }

    fn scan_ampersand(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'&' => self.single(TokenKind::AmpAmp),
            b'=' => self.single(TokenKind::AmpEq),
            _ => TokenKind::Amp,
        }
    }

    fn scan_pipe(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'|' => self.single(TokenKind::PipePipe),
            b'=' => self.single(TokenKind::PipeEq),
            _ => TokenKind::Pipe,
        }
    }
}

fn is_id_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

fn is_id_part(c: char) -> bool {
    is_id_start(c) || c.is_alphanumeric()
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            if matches!(token.kind, TokenKind::Eof) {
                break;
            }
            tokens.push(token.kind);
        }
        tokens
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            tokenize("foo bar _baz $qux caf\u{e9}"),
            vec![
                TokenKind::Identifier("foo".into()),
                TokenKind::Identifier("bar".into()),
                TokenKind::Identifier("_baz".into()),
                TokenKind::Identifier("$qux".into()),
                TokenKind::Identifier("caf\u{e9}".into()),
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            tokenize("var function instanceof let"),
            vec![
                TokenKind::Var,
                TokenKind::Function,
                TokenKind::Instanceof,
                TokenKind::Identifier("let".into()),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            tokenize("42 3.14 0xff 017 019 .5 1e3 2."),
            vec![
                TokenKind::Number(42.0),
                TokenKind::Number(3.14),
                TokenKind::Number(255.0),
                TokenKind::Number(15.0),
                TokenKind::Number(19.0),
                TokenKind::Number(0.5),
                TokenKind::Number(1000.0),
                TokenKind::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            tokenize(r#""hello" 'wo\'rld' "\x41é\101\n" "a\
b""#),
            vec![
                TokenKind::String("hello".into()),
                TokenKind::String("wo'rld".into()),
                TokenKind::String("A\u{e9}A\n".into()),
                TokenKind::String("ab".into()),
            ]
        );
    }

    #[test]
    fn test_non_ascii_string_survives() {
        assert_eq!(
            tokenize("'\u{65e5}\u{672c}'"),
            vec![TokenKind::String("\u{65e5}\u{672c}".into())]
        );
    }

    #[test]
    fn test_unterminated_string_is_invalid() {
        assert!(matches!(tokenize("'abc")[0], TokenKind::Invalid(_)));
        assert!(matches!(tokenize("'abc\n'")[0], TokenKind::Invalid(_)));
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            tokenize("a + - * / % ++ -- >>>= <<= ==="),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
                TokenKind::GtGtGtEq,
                TokenKind::LtLtEq,
                TokenKind::EqEqEq,
            ]
        );
    }

    #[test]
    fn test_regex_vs_division() {
        assert_eq!(
            tokenize("a / b"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Slash,
                TokenKind::Identifier("b".into()),
            ]
        );
        assert_eq!(
            tokenize("x = /a[/]b/gi"),
            vec![
                TokenKind::Identifier("x".into()),
                TokenKind::Eq,
                TokenKind::Regex {
                    pattern: "a[/]b".into(),
                    flags: "gi".into()
                },
            ]
        );
        assert_eq!(tokenize("(1) / 2")[3], TokenKind::Slash);
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            tokenize("a // line comment\nb /* block */ c <!-- html\nd"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Identifier("b".into()),
                TokenKind::Identifier("c".into()),
                TokenKind::Identifier("d".into()),
            ]
        );
    }

    #[test]
    fn test_newline_tracking() {
        let mut lexer = Lexer::new("a\nb /*\n*/ c d");
        assert!(!lexer.next_token().had_newline_before);
        assert!(lexer.next_token().had_newline_before);
        assert!(lexer.next_token().had_newline_before);
        assert!(!lexer.next_token().had_newline_before);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new("foo: 1");
        assert_eq!(lexer.peek().kind, TokenKind::Identifier("foo".into()));
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier("foo".into()));
        assert_eq!(lexer.next_token().kind, TokenKind::Colon);
    }
}
