//! Tree-to-text rendering shared by the minifier and the beautifier.
//!
//! Both modes walk the tree with the same [`Emitter`]; a [`Style`] decides
//! the spacing policy and how identifiers are printed. In the compact form
//! whitespace appears only where two tokens would otherwise run together:
//! a keyword next to a word character, or operator characters that would
//! re-lex as a different token (`a+ ++b`, `a- -b`, `x/ /re/`).

use kjs_parser::{
    AssignOp, BinaryOp, Expr, ExprKind, ForInTarget, ForInit, Function, Program, PropertyKey,
    Stmt, StmtKind, UnaryOp, UpdateOp, VarDeclarator,
};

use crate::escape::escape;
use crate::registry::Naming;

/// Spacing and naming policy of one rendering mode.
pub(crate) trait Style {
    /// Canonical spacing with indented, newline-separated blocks.
    const PRETTY: bool;

    /// Start statements on a new line in the compact form.
    fn line_breaks(&self) -> bool {
        false
    }

    /// How to print `name`. `emitted` is everything rendered so far.
    fn naming(&mut self, name: &str, emitted: &str) -> Naming;
}

/// Current indentation as a run of indent units.
#[derive(Debug, Clone)]
struct Indentation {
    unit: String,
    current: String,
}

impl Indentation {
    fn new(unit: &str) -> Self {
        Self {
            unit: unit.to_string(),
            current: String::new(),
        }
    }

    fn increase(&mut self) {
        self.current.push_str(&self.unit);
    }

    fn decrease(&mut self) {
        let len = self.current.len().saturating_sub(self.unit.len());
        self.current.truncate(len);
    }
}

/// The text sink of a render session.
pub(crate) struct Emitter<S> {
    style: S,
    output: String,
    indentation: Indentation,
    /// Set after a regex literal without flags: a following word character
    /// would be read as a flag.
    needs_space: bool,
}

impl<S: Style> Emitter<S> {
    pub(crate) fn new(style: S, indent_unit: &str) -> Self {
        Self {
            style,
            output: String::new(),
            indentation: Indentation::new(indent_unit),
            needs_space: false,
        }
    }

    /// Render `program` and hand back the text and the style.
    ///
    /// An absent program renders as empty text.
    pub(crate) fn render(mut self, program: Option<&Program>) -> (String, S) {
        if let Some(program) = program {
            for stmt in &program.body {
                self.emit_newline();
                self.emit_stmt(stmt);
            }
        }
        (self.output, self.style)
    }

    // =========================================================================
    // Output primitives
    // =========================================================================

    /// Append a token, separating it from a preceding word.
    fn emit(&mut self, s: &str) {
        let Some(first) = s.chars().next() else {
            return;
        };
        self.separate(first);
        self.output.push_str(s);
    }

    /// Push the space a word starting with `first` needs after the output.
    fn separate(&mut self, first: char) {
        if is_word_char(first) {
            let after_word = self.output.chars().next_back().is_some_and(is_word_char);
            if after_word || (self.needs_space && !self.at_whitespace()) {
                self.output.push(' ');
            }
        }
        self.needs_space = false;
    }

    /// A space in the pretty form only.
    fn emit_space(&mut self) {
        if S::PRETTY && !self.at_whitespace() {
            self.output.push(' ');
        }
    }

    /// A space in both forms, for tokens that would otherwise merge.
    fn emit_gap(&mut self) {
        if !self.at_whitespace() {
            self.output.push(' ');
        }
    }

    fn emit_newline(&mut self) {
        if self.output.is_empty() {
            return;
        }
        if S::PRETTY {
            self.output.push('\n');
            self.output.push_str(&self.indentation.current);
        } else if self.style.line_breaks() && !self.output.ends_with('\n') {
            self.output.push('\n');
        }
    }

    fn at_whitespace(&self) -> bool {
        matches!(self.output.chars().next_back(), None | Some(' ' | '\t' | '\n'))
    }

    /// Run `f` one indentation level deeper.
    fn indented(&mut self, f: impl FnOnce(&mut Self)) {
        self.indentation.increase();
        f(self);
        self.indentation.decrease();
    }

    fn emit_ident(&mut self, name: &str) {
        // The naming hook sees the output with the separator in place.
        if let Some(first) = name.chars().next() {
            self.separate(first);
        }
        match self.style.naming(name, &self.output) {
            Naming::Verbatim => self.emit(name),
            Naming::Renamed {
                substitute,
                annotate,
            } => {
                self.emit(&substitute);
                if annotate {
                    self.output.push_str("/*");
                    self.output.push_str(name);
                    self.output.push_str("*/");
                }
            }
        }
    }

    /// Space the join between two operator characters.
    fn emit_join(&mut self, before: Option<char>, after: Option<char>) {
        if glues(before, after) {
            self.emit_gap();
        } else {
            self.emit_space();
        }
    }

    fn emit_infix(&mut self, left: &Expr, op: &str, right: &Expr) {
        self.emit_expr(left);
        self.emit_join(trailing_char(left), op.chars().next());
        self.emit(op);
        self.emit_join(op.chars().next_back(), leading_char(right));
        self.emit_expr(right);
    }

    fn emit_comma(&mut self) {
        self.emit(",");
        self.emit_space();
    }

    fn emit_string(&mut self, value: &str) {
        self.emit(&format!("\"{}\"", escape(value)));
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn emit_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Var(decls) => {
                self.emit("var");
                self.emit_var_decls(decls);
                self.emit(";");
            }
            StmtKind::Function(func) => {
                self.emit_function(func);
            }
            StmtKind::Block(stmts) => {
                self.emit_block(stmts);
            }
            StmtKind::Empty => {
                self.emit(";");
            }
            StmtKind::Expr(expr) => {
                self.emit_expr(expr);
                self.emit(";");
            }
            StmtKind::If {
                test,
                consequent,
                alternate,
            } => {
                self.emit_head("if", test);
                self.emit_body(consequent);
                if let Some(alt) = alternate {
                    if S::PRETTY {
                        self.emit_space();
                    } else {
                        self.emit_newline();
                    }
                    self.emit("else");
                    match &alt.kind {
                        StmtKind::If { .. } if S::PRETTY => {
                            self.emit_space();
                            self.emit_stmt(alt);
                        }
                        _ => self.emit_body(alt),
                    }
                }
            }
            StmtKind::DoWhile { body, test } => {
                self.emit("do");
                self.emit_body(body);
                self.emit_space();
                self.emit_head("while", test);
                self.emit(";");
            }
            StmtKind::While { test, body } => {
                self.emit_head("while", test);
                self.emit_body(body);
            }
            StmtKind::For {
                init,
                test,
                update,
                body,
            } => {
                self.emit("for");
                self.emit_space();
                self.emit("(");
                match init {
                    Some(ForInit::Var(decls)) => {
                        self.emit("var");
                        self.emit_var_decls(decls);
                    }
                    Some(ForInit::Expr(expr)) => self.emit_expr(expr),
                    None => {}
                }
                self.emit(";");
                if let Some(test) = test {
                    self.emit_space();
                    self.emit_expr(test);
                }
                self.emit(";");
                if let Some(update) = update {
                    self.emit_space();
                    self.emit_expr(update);
                }
                self.emit(")");
                self.emit_body(body);
            }
            StmtKind::ForIn { left, right, body } => {
                self.emit("for");
                self.emit_space();
                self.emit("(");
                match left {
                    ForInTarget::Var(decl) => {
                        self.emit("var");
                        self.emit_var_decls(std::slice::from_ref(decl));
                    }
                    ForInTarget::Expr(expr) => self.emit_expr(expr),
                }
                self.emit_space();
                self.emit("in");
                self.emit_space();
                self.emit_expr(right);
                self.emit(")");
                self.emit_body(body);
            }
            StmtKind::Continue { label } => {
                self.emit("continue");
                if let Some(label) = label {
                    self.emit_ident(label);
                }
                self.emit(";");
            }
            StmtKind::Break { label } => {
                self.emit("break");
                if let Some(label) = label {
                    self.emit_ident(label);
                }
                self.emit(";");
            }
            StmtKind::Return { arg } => {
                self.emit("return");
                if let Some(arg) = arg {
                    self.emit_space();
                    self.emit_expr(arg);
                }
                self.emit(";");
            }
            StmtKind::With { object, body } => {
                self.emit_head("with", object);
                self.emit_body(body);
            }
            StmtKind::Switch {
                discriminant,
                cases,
            } => {
                self.emit_head("switch", discriminant);
                self.emit_space();
                self.emit("{");
                self.indented(|this| {
                    for case in cases {
                        this.emit_newline();
                        if let Some(test) = &case.test {
                            this.emit("case");
                            this.emit_space();
                            this.emit_expr(test);
                        } else {
                            this.emit("default");
                        }
                        this.emit(":");
                        this.indented(|this| {
                            for stmt in &case.consequent {
                                this.emit_newline();
                                this.emit_stmt(stmt);
                            }
                        });
                    }
                });
                self.emit_newline();
                self.emit("}");
            }
            StmtKind::Labeled { label, body } => {
                self.emit_ident(label);
                self.emit(":");
                self.indented(|this| {
                    this.emit_newline();
                    this.emit_stmt(body);
                });
            }
            StmtKind::Throw { arg } => {
                self.emit("throw");
                self.emit_space();
                self.emit_expr(arg);
                self.emit(";");
            }
            StmtKind::Try {
                block,
                handler,
                finalizer,
            } => {
                self.emit("try");
                self.emit_block(block);
                if let Some(handler) = handler {
                    self.emit_space();
                    self.emit("catch");
                    self.emit_space();
                    self.emit("(");
                    self.emit_ident(&handler.param);
                    self.emit(")");
                    self.emit_block(&handler.body);
                }
                if let Some(finalizer) = finalizer {
                    self.emit_space();
                    self.emit("finally");
                    self.emit_block(finalizer);
                }
            }
        }
    }

    /// `keyword (expr)`, as in `if`, `while`, `with` and `switch`.
    fn emit_head(&mut self, keyword: &str, expr: &Expr) {
        self.emit(keyword);
        self.emit_space();
        self.emit("(");
        self.emit_expr(expr);
        self.emit(")");
    }

    /// Body of a compound statement. The pretty form always braces it.
    fn emit_body(&mut self, body: &Stmt) {
        if S::PRETTY {
            match &body.kind {
                StmtKind::Block(stmts) => self.emit_block(stmts),
                _ => self.emit_block(std::slice::from_ref(body)),
            }
        } else {
            self.emit_newline();
            self.emit_stmt(body);
        }
    }

    fn emit_block(&mut self, stmts: &[Stmt]) {
        self.emit_space();
        self.emit("{");
        if !stmts.is_empty() {
            self.indented(|this| {
                for stmt in stmts {
                    this.emit_newline();
                    this.emit_stmt(stmt);
                }
            });
            if S::PRETTY {
                self.emit_newline();
            }
        }
        self.emit("}");
    }

    fn emit_var_decls(&mut self, decls: &[VarDeclarator]) {
        for (i, decl) in decls.iter().enumerate() {
            if i > 0 {
                self.emit_comma();
            }
            self.emit_ident(&decl.name);
            if let Some(init) = &decl.init {
                self.emit_space();
                self.emit("=");
                self.emit_space();
                self.emit_expr(init);
            }
        }
    }

    fn emit_function(&mut self, func: &Function) {
        self.emit("function");
        match &func.name {
            Some(name) => self.emit_ident(name),
            None => self.emit_space(),
        }
        self.emit("(");
        for (i, param) in func.params.iter().enumerate() {
            if i > 0 {
                self.emit_comma();
            }
            self.emit_ident(param);
        }
        self.emit(")");
        self.emit_block(&func.body);
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn emit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Null => self.emit("null"),
            ExprKind::Bool(value) => self.emit(if *value { "true" } else { "false" }),
            ExprKind::Number(n) => self.emit(&format_number(*n)),
            ExprKind::String(value) => self.emit_string(value),
            ExprKind::Regex { pattern, flags } => {
                self.emit(&format!("/{pattern}/{flags}"));
                self.needs_space = flags.is_empty();
            }
            ExprKind::This => self.emit("this"),
            ExprKind::Ident(name) => self.emit_ident(name),
            ExprKind::Group(inner) => {
                self.emit("(");
                self.emit_expr(inner);
                self.emit(")");
            }
            ExprKind::Array(elements) => {
                self.emit("[");
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.emit(",");
                    }
                    if let Some(element) = element {
                        if i > 0 {
                            self.emit_space();
                        }
                        self.emit_expr(element);
                    }
                }
                if matches!(elements.last(), Some(None)) {
                    self.emit(",");
                }
                self.emit("]");
            }
            ExprKind::Object(props) => {
                self.emit("{");
                for (i, prop) in props.iter().enumerate() {
                    if i > 0 {
                        self.emit_comma();
                    }
                    match &prop.key {
                        PropertyKey::Ident(name) => self.emit_ident(name),
                        PropertyKey::String(value) => self.emit_string(value),
                        PropertyKey::Number(n) => self.emit(&format_number(*n)),
                    }
                    self.emit(":");
                    self.emit_space();
                    self.emit_expr(&prop.value);
                }
                self.emit("}");
            }
            ExprKind::Index { object, index } => {
                self.emit_expr(object);
                self.emit("[");
                self.emit_expr(index);
                self.emit("]");
            }
            ExprKind::Member { object, property } => {
                self.emit_expr(object);
                if let ExprKind::Number(n) = object.kind {
                    if is_digits(&format_number(n)) {
                        self.emit_gap();
                    }
                }
                self.emit(".");
                self.emit_ident(property);
            }
            ExprKind::Call { callee, args } => {
                self.emit_expr(callee);
                self.emit_args(args);
            }
            ExprKind::New { callee, args } => {
                self.emit("new");
                self.emit_space();
                self.emit_expr(callee);
                if let Some(args) = args {
                    self.emit_args(args);
                }
            }
            ExprKind::Function(func) => self.emit_function(func),
            ExprKind::Update { op, prefix, arg } => {
                let op_str = update_op_str(*op);
                if *prefix {
                    self.emit(op_str);
                    if glues(Some(update_char(*op)), leading_char(arg)) {
                        self.emit_gap();
                    }
                    self.emit_expr(arg);
                } else {
                    self.emit_expr(arg);
                    if glues(trailing_char(arg), Some(update_char(*op))) {
                        self.emit_gap();
                    }
                    self.emit(op_str);
                }
            }
            ExprKind::Unary { op, arg } => {
                let op_str = unary_op_str(*op);
                self.emit(op_str);
                if op_str.starts_with(is_word_char) {
                    self.emit_space();
                } else if glues(op_str.chars().next_back(), leading_char(arg)) {
                    self.emit_gap();
                }
                self.emit_expr(arg);
            }
            ExprKind::Binary { op, left, right } => {
                self.emit_infix(left, binary_op_str(*op), right);
            }
            ExprKind::AppendString { left, value } => {
                self.emit_expr(left);
                self.emit_join(trailing_char(left), Some('+'));
                self.emit("+");
                self.emit_space();
                self.emit_string(value);
            }
            ExprKind::Assign { op, target, value } => {
                self.emit_infix(target, assign_op_str(*op), value);
            }
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                self.emit_expr(test);
                self.emit_space();
                self.emit("?");
                self.emit_space();
                self.emit_expr(consequent);
                self.emit_space();
                self.emit(":");
                self.emit_space();
                self.emit_expr(alternate);
            }
            ExprKind::Comma { left, right } => {
                self.emit_expr(left);
                self.emit_comma();
                self.emit_expr(right);
            }
        }
    }

    fn emit_args(&mut self, args: &[Expr]) {
        self.emit("(");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.emit_comma();
            }
            self.emit_expr(arg);
        }
        self.emit(")");
    }
}

// =============================================================================
// Token joins
// =============================================================================

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Whether `before` directly followed by `after` would lex differently
/// from the two separate tokens.
fn glues(before: Option<char>, after: Option<char>) -> bool {
    matches!(
        (before, after),
        (Some('+'), Some('+'))
            | (Some('-'), Some('-'))
            | (Some('/'), Some('/' | '*'))
            | (Some('<'), Some('!'))
    )
}

/// First character `expr` prints, when it is an operator character.
fn leading_char(expr: &Expr) -> Option<char> {
    match &expr.kind {
        ExprKind::Unary { op, .. } => match op {
            UnaryOp::Minus => Some('-'),
            UnaryOp::Plus => Some('+'),
            UnaryOp::Not => Some('!'),
            UnaryOp::BitNot => Some('~'),
            UnaryOp::Typeof | UnaryOp::Void | UnaryOp::Delete => None,
        },
        ExprKind::Update {
            op, prefix: true, ..
        } => Some(update_char(*op)),
        ExprKind::Update {
            prefix: false, arg, ..
        } => leading_char(arg),
        ExprKind::Regex { .. } => Some('/'),
        ExprKind::Number(n) if n.is_sign_negative() => Some('-'),
        ExprKind::Binary { left, .. }
        | ExprKind::AppendString { left, .. }
        | ExprKind::Comma { left, .. } => leading_char(left),
        ExprKind::Assign { target, .. } => leading_char(target),
        ExprKind::Conditional { test, .. } => leading_char(test),
        ExprKind::Call { callee, .. } => leading_char(callee),
        ExprKind::Member { object, .. } | ExprKind::Index { object, .. } => leading_char(object),
        _ => None,
    }
}

/// Last character `expr` prints, when it is an operator character.
fn trailing_char(expr: &Expr) -> Option<char> {
    match &expr.kind {
        ExprKind::Update {
            op, prefix: false, ..
        } => Some(update_char(*op)),
        ExprKind::Regex { flags, .. } if flags.is_empty() => Some('/'),
        ExprKind::Unary { arg, .. }
        | ExprKind::Update {
            prefix: true, arg, ..
        } => trailing_char(arg),
        ExprKind::Binary { right, .. } | ExprKind::Comma { right, .. } => trailing_char(right),
        ExprKind::Assign { value, .. } => trailing_char(value),
        ExprKind::Conditional { alternate, .. } => trailing_char(alternate),
        _ => None,
    }
}

// =============================================================================
// Literal and operator text
// =============================================================================

/// Shortest decimal or exponent form of a number literal.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        let s = format!("{}", n);
        let exp = format!("{:e}", n);
        if exp.len() < s.len() {
            exp
        } else {
            s
        }
    }
}

fn update_char(op: UpdateOp) -> char {
    match op {
        UpdateOp::Increment => '+',
        UpdateOp::Decrement => '-',
    }
}

fn update_op_str(op: UpdateOp) -> &'static str {
    match op {
        UpdateOp::Increment => "++",
        UpdateOp::Decrement => "--",
    }
}

fn unary_op_str(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Minus => "-",
        UnaryOp::Plus => "+",
        UnaryOp::Not => "!",
        UnaryOp::BitNot => "~",
        UnaryOp::Typeof => "typeof",
        UnaryOp::Void => "void",
        UnaryOp::Delete => "delete",
    }
}

fn binary_op_str(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Shl => "<<",
        BinaryOp::Shr => ">>",
        BinaryOp::UShr => ">>>",
        BinaryOp::Lt => "<",
        BinaryOp::Gt => ">",
        BinaryOp::LtEq => "<=",
        BinaryOp::GtEq => ">=",
        BinaryOp::Instanceof => "instanceof",
        BinaryOp::In => "in",
        BinaryOp::Eq => "==",
        BinaryOp::NotEq => "!=",
        BinaryOp::StrictEq => "===",
        BinaryOp::StrictNotEq => "!==",
        BinaryOp::BitAnd => "&",
        BinaryOp::BitXor => "^",
        BinaryOp::BitOr => "|",
        BinaryOp::And => "&&",
        BinaryOp::Or => "||",
    }
}

fn assign_op_str(op: AssignOp) -> &'static str {
    match op {
        AssignOp::Assign => "=",
        AssignOp::AddAssign => "+=",
        AssignOp::SubAssign => "-=",
        AssignOp::MulAssign => "*=",
        AssignOp::DivAssign => "/=",
        AssignOp::ModAssign => "%=",
        AssignOp::ShlAssign => "<<=",
        AssignOp::ShrAssign => ">>=",
        AssignOp::UShrAssign => ">>>=",
        AssignOp::BitAndAssign => "&=",
        AssignOp::BitXorAssign => "^=",
        AssignOp::BitOrAssign => "|=",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kjs_parser::{parse, Span};

    /// Pretty style without renaming.
    struct Plain;

    impl Style for Plain {
        const PRETTY: bool = true;

        fn naming(&mut self, _name: &str, _emitted: &str) -> Naming {
            Naming::Verbatim
        }
    }

    /// Compact style renaming everything to `_`.
    struct Underscore;

    impl Style for Underscore {
        const PRETTY: bool = false;

        fn naming(&mut self, name: &str, _emitted: &str) -> Naming {
            Naming::Renamed {
                substitute: "_".to_string(),
                annotate: name.len() > 1,
            }
        }
    }

    fn pretty(source: &str) -> String {
        let program = parse(source).unwrap();
        Emitter::new(Plain, "  ").render(Some(&program)).0
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1e21), "1e21");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_glues() {
        assert!(glues(Some('+'), Some('+')));
        assert!(glues(Some('-'), Some('-')));
        assert!(glues(Some('/'), Some('*')));
        assert!(!glues(Some('+'), Some('-')));
        assert!(!glues(None, Some('+')));
    }

    #[test]
    fn test_join_chars_follow_the_spine() {
        let program = parse("a++ + -b; x = /re/;").unwrap();
        let StmtKind::Expr(first) = &program.body[0].kind else {
            panic!("expected expression statement");
        };
        let ExprKind::Binary { left, right, .. } = &first.kind else {
            panic!("expected binary");
        };
        assert_eq!(trailing_char(left), Some('+'));
        assert_eq!(leading_char(right), Some('-'));

        let StmtKind::Expr(second) = &program.body[1].kind else {
            panic!("expected expression statement");
        };
        assert_eq!(trailing_char(second), Some('/'));
        assert_eq!(leading_char(second), None);
    }

    #[test]
    fn test_indentation_never_underflows() {
        let mut indentation = Indentation::new("\t");
        indentation.decrease();
        assert_eq!(indentation.current, "");
        indentation.increase();
        indentation.increase();
        indentation.decrease();
        assert_eq!(indentation.current, "\t");
    }

    #[test]
    fn test_absent_program_is_empty() {
        let (text, _) = Emitter::new(Plain, "  ").render(None);
        assert_eq!(text, "");
        let empty = Program::new(Vec::new(), Span::new(0, 0));
        assert_eq!(Emitter::new(Plain, "  ").render(Some(&empty)).0, "");
    }

    #[test]
    fn test_indent_unit_is_used() {
        assert_eq!(pretty("while(a)b();"), "while (a) {\n  b();\n}");
    }

    #[test]
    fn test_renamed_identifiers_are_annotated() {
        let program = parse("var abc=x;").unwrap();
        let (text, _) = Emitter::new(Underscore, "").render(Some(&program));
        assert_eq!(text, "var _/*abc*/=_;");
    }
}
