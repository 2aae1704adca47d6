//! Token types for ECMAScript 3 source text.

use crate::span::Span;

/// A token with its kind and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// A line terminator appeared between the previous token and this one.
    pub had_newline_before: bool,
}

impl Token {
    /// Create a new token.
    #[inline]
    pub const fn new(kind: TokenKind, span: Span, had_newline_before: bool) -> Self {
        Self {
            kind,
            span,
            had_newline_before,
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // === Literals ===
    /// Identifier: `foo`, `_bar`, `$baz`
    Identifier(String),
    /// String literal with escapes decoded: `"hello"`, `'world'`
    String(String),
    /// Number literal: `42`, `3.14`, `0xff`, `017`
    Number(f64),
    /// Regular expression: `/pattern/flags`
    Regex { pattern: String, flags: String },

    // === Keywords ===
    Var,
    Function,
    If,
    Else,
    Switch,
    Case,
    Default,
    For,
    While,
    Do,
    Break,
    Continue,
    Return,
    Try,
    Catch,
    Finally,
    Throw,
    New,
    Delete,
    Typeof,
    Void,
    In,
    Instanceof,
    With,
    This,
    Null,
    True,
    False,

    // === Punctuation ===
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Semicolon, // ;
    Comma,     // ,
    Colon,     // :
    Dot,       // .
    Question,  // ?

    // === Operators ===
    // Assignment
    Eq,        // =
    PlusEq,    // +=
    MinusEq,   // -=
    StarEq,    // *=
    SlashEq,   // /=
    PercentEq, // %=
    AmpEq,     // &=
    PipeEq,    // |=
    CaretEq,   // ^=
    LtLtEq,    // <<=
    GtGtEq,    // >>=
    GtGtGtEq,  // >>>=

    // Comparison
    EqEq,     // ==
    EqEqEq,   // ===
    BangEq,   // !=
    BangEqEq, // !==
    Lt,       // <
    LtEq,     // <=
    Gt,       // >
    GtEq,     // >=

    // Arithmetic
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /
    Percent,    // %
    PlusPlus,   // ++
    MinusMinus, // --

    // Bitwise
    Amp,    // &
    Pipe,   // |
    Caret,  // ^
    Tilde,  // ~
    LtLt,   // <<
    GtGt,   // >>
    GtGtGt, // >>>

    // Logical
    AmpAmp,   // &&
    PipePipe, // ||
    Bang,     // !

    // === Special ===
    /// End of input
    Eof,
    /// Invalid token (lexer error)
    Invalid(String),
}

impl TokenKind {
    /// A `/` following this token starts a division, not a regex.
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier(_)
                | TokenKind::String(_)
                | TokenKind::Number(_)
                | TokenKind::Regex { .. }
                | TokenKind::This
                | TokenKind::Null
                | TokenKind::True
                | TokenKind::False
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
        )
    }

    /// Reserved words that are still valid after `.` and as object keys.
    pub fn keyword_text(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Var => "var",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Switch => "switch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::For => "for",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Return => "return",
            TokenKind::Try => "try",
            TokenKind::Catch => "catch",
            TokenKind::Finally => "finally",
            TokenKind::Throw => "throw",
            TokenKind::New => "new",
            TokenKind::Delete => "delete",
            TokenKind::Typeof => "typeof",
            TokenKind::Void => "void",
            TokenKind::In => "in",
            TokenKind::Instanceof => "instanceof",
            TokenKind::With => "with",
            TokenKind::This => "this",
            TokenKind::Null => "null",
            TokenKind::True => "true",
            TokenKind::False => "false",
            _ => return None,
        };
        Some(text)
    }

    /// Check if this is an assignment operator.
    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::PercentEq
                | TokenKind::AmpEq
                | TokenKind::PipeEq
                | TokenKind::CaretEq
                | TokenKind::LtLtEq
                | TokenKind::GtGtEq
                | TokenKind::GtGtGtEq
        )
    }

    /// Get the precedence of a binary operator (higher = binds tighter).
    /// Returns None if not a binary operator.
    pub fn binary_precedence(&self) -> Option<u8> {
        match self {
            TokenKind::PipePipe => Some(1),
            TokenKind::AmpAmp => Some(2),
            TokenKind::Pipe => Some(3),
            TokenKind::Caret => Some(4),
            TokenKind::Amp => Some(5),
            TokenKind::EqEq | TokenKind::EqEqEq | TokenKind::BangEq | TokenKind::BangEqEq => Some(6),
            TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Gt
            | TokenKind::GtEq
            | TokenKind::In
            | TokenKind::Instanceof => Some(7),
            TokenKind::LtLt | TokenKind::GtGt | TokenKind::GtGtGt => Some(8),
            TokenKind::Plus | TokenKind::Minus => Some(9),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(10),
            _ => None,
        }
    }
}

/// Look up a keyword from an identifier string.
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    match s {
        "var" => Some(TokenKind::Var),
        "function" => Some(TokenKind::Function),
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "switch" => Some(TokenKind::Switch),
        "case" => Some(TokenKind::Case),
        "default" => Some(TokenKind::Default),
        "for" => Some(TokenKind::For),
        "while" => Some(TokenKind::While),
        "do" => Some(TokenKind::Do),
        "break" => Some(TokenKind::Break),
        "continue" => Some(TokenKind::Continue),
        "return" => Some(TokenKind::Return),
        "try" => Some(TokenKind::Try),
        "catch" => Some(TokenKind::Catch),
        "finally" => Some(TokenKind::Finally),
        "throw" => Some(TokenKind::Throw),
        "new" => Some(TokenKind::New),
        "delete" => Some(TokenKind::Delete),
        "typeof" => Some(TokenKind::Typeof),
        "void" => Some(TokenKind::Void),
        "in" => Some(TokenKind::In),
        "instanceof" => Some(TokenKind::Instanceof),
        "with" => Some(TokenKind::With),
        "this" => Some(TokenKind::This),
        "null" => Some(TokenKind::Null),
        "true" => Some(TokenKind::True),
        "false" => Some(TokenKind::False),
        _ => None,
    }
}
