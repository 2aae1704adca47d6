//! Tree node types for ECMAScript 3 programs.
//!
//! The node set is closed: every syntactic form the renderer knows how
//! to print is a variant of [`StmtKind`] or [`ExprKind`].

use crate::span::Span;

/// The top-level source-element sequence of a script.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Program {
    pub fn new(body: Vec<Stmt>, span: Span) -> Self {
        Self { body, span }
    }
}

// =============================================================================
// Expressions
// =============================================================================

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Expression kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    // === Literals ===
    Null,
    Bool(bool),
    Number(f64),
    /// String literal, escapes already decoded
    String(String),
    /// Regular expression: pattern text as written, plus flags
    Regex { pattern: String, flags: String },

    // === References ===
    This,
    /// Identifier reference
    Ident(String),
    /// Parenthesized expression, kept exactly where the source had it
    Group(Box<Expr>),

    // === Composite values ===
    /// Array literal; `None` is a hole. Trailing `None`s are trailing elisions.
    Array(Vec<Option<Expr>>),
    /// Object literal: `{a: 1, "b": 2, 3: c}`
    Object(Vec<Property>),
    /// Computed accessor: `a[b]`
    Index { object: Box<Expr>, index: Box<Expr> },
    /// Named accessor: `a.b`
    Member { object: Box<Expr>, property: String },

    // === Calls ===
    /// Function call: `f(a, b)`
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// `new Foo` (args `None`) or `new Foo(a)`
    New {
        callee: Box<Expr>,
        args: Option<Vec<Expr>>,
    },
    /// Function expression, name optional
    Function(Box<Function>),

    // === Operators ===
    /// Update expression: `++a`, `a--`
    Update {
        op: UpdateOp,
        prefix: bool,
        arg: Box<Expr>,
    },
    /// Unary operation: `!x`, `-x`, `typeof x`
    Unary { op: UnaryOp, arg: Box<Expr> },
    /// Binary operation: `a + b`, `a in b`, `a && b`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// String concatenation whose right operand is a literal: `a + "x"`
    AppendString { left: Box<Expr>, value: String },
    /// Assignment: `a = b`, `a >>>= b`
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    /// Conditional: `a ? b : c`
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    /// Comma expression: `a, b`
    Comma { left: Box<Expr>, right: Box<Expr> },
}

// =============================================================================
// Statements
// =============================================================================

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Statement kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `var a = 1, b;`
    Var(Vec<VarDeclarator>),
    /// Function declaration: `function foo() {}`
    Function(Box<Function>),
    /// Block statement: `{ ... }`
    Block(Vec<Stmt>),
    /// Empty statement: `;`
    Empty,
    /// Expression statement
    Expr(Expr),
    If {
        test: Expr,
        consequent: Box<Stmt>,
        alternate: Option<Box<Stmt>>,
    },
    DoWhile {
        body: Box<Stmt>,
        test: Expr,
    },
    While {
        test: Expr,
        body: Box<Stmt>,
    },
    /// `for (init; test; update) body`
    For {
        init: Option<ForInit>,
        test: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },
    /// `for (left in right) body`
    ForIn {
        left: ForInTarget,
        right: Expr,
        body: Box<Stmt>,
    },
    Continue {
        label: Option<String>,
    },
    Break {
        label: Option<String>,
    },
    Return {
        arg: Option<Expr>,
    },
    With {
        object: Expr,
        body: Box<Stmt>,
    },
    /// Case clauses in source order; at most one has `test: None`.
    Switch {
        discriminant: Expr,
        cases: Vec<SwitchCase>,
    },
    Labeled {
        label: String,
        body: Box<Stmt>,
    },
    Throw {
        arg: Expr,
    },
    /// Catch and finally are each optional, but not both absent.
    Try {
        block: Vec<Stmt>,
        handler: Option<CatchClause>,
        finalizer: Option<Vec<Stmt>>,
    },
}

// =============================================================================
// Operators
// =============================================================================

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Minus,  // -
    Plus,   // +
    Not,    // !
    BitNot, // ~
    Typeof, // typeof
    Void,   // void
    Delete, // delete
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Multiplicative / additive
    Mul, // *
    Div, // /
    Mod, // %
    Add, // +
    Sub, // -

    // Shift
    Shl,  // <<
    Shr,  // >>
    UShr, // >>>

    // Relational
    Lt,         // <
    Gt,         // >
    LtEq,       // <=
    GtEq,       // >=
    Instanceof, // instanceof
    In,         // in

    // Equality
    Eq,          // ==
    NotEq,       // !=
    StrictEq,    // ===
    StrictNotEq, // !==

    // Bitwise
    BitAnd, // &
    BitXor, // ^
    BitOr,  // |

    // Logical
    And, // &&
    Or,  // ||
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,       // =
    AddAssign,    // +=
    SubAssign,    // -=
    MulAssign,    // *=
    DivAssign,    // /=
    ModAssign,    // %=
    ShlAssign,    // <<=
    ShrAssign,    // >>=
    UShrAssign,   // >>>=
    BitAndAssign, // &=
    BitXorAssign, // ^=
    BitOrAssign,  // |=
}

/// Update operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    Increment, // ++
    Decrement, // --
}

// =============================================================================
// Supporting nodes
// =============================================================================

/// Variable declarator: identifier plus optional initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclarator {
    pub name: String,
    pub init: Option<Expr>,
    pub span: Span,
}

/// Object literal entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: PropertyKey,
    pub value: Expr,
    pub span: Span,
}

/// Property key as written in the literal.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Ident(String),
    String(String),
    Number(f64),
}

/// Switch case; `test` is `None` for `default`.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub test: Option<Expr>,
    pub consequent: Vec<Stmt>,
    pub span: Span,
}

/// Catch clause.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub param: String,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// For loop initializer.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Var(Vec<VarDeclarator>),
    Expr(Expr),
}

/// Left side of `for-in`.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInTarget {
    /// `var x` or `var x = init`
    Var(VarDeclarator),
    /// Any left-hand-side expression
    Expr(Expr),
}

/// Function node (declarations and expressions).
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub span: Span,
}
