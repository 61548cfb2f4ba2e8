use std::fmt;
use std::result;

use super::{Expr, LoxError, Object, TokenType};

/// `stringify`: what a value looks like when handed back to the user.
impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Nil => write!(f, "nil"),
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

/// Renders the tree in prefix form, e.g. `(* (group (+ 1 2)) 3)`. Only used
/// for debugging.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        match self {
            Self::Assign(name, value) => write!(f, "(= {} {})", name.lexeme, value),
            Self::Binary(left, operator, right) => {
                write!(f, "({} {} {})", operator.lexeme, left, right)
            }
            Self::Grouping(expr) => write!(f, "(group {})", expr),
            Self::Literal(Object::String(s)) => write!(f, "\"{}\"", s),
            Self::Literal(obj) => write!(f, "{}", obj),
            Self::Unary(operator, right) => write!(f, "({} {})", operator.lexeme, right),
        }
    }
}

impl LoxError {
    fn message(&self) -> &'static str {
        match self {
            Self::UnterminatedString(_) => "Unterminated string.",
            Self::FloatParseError(..) => "Invalid number.",
            Self::ExpectedExpression(_) => "Expected expression.",
            Self::UnclosedParenthesis(_) => "Expected ')' after expression.",
            Self::NumberOperand(_) => "Operand must be a number.",
            Self::NumberOperands(..) => "Operands must be numbers.",
            Self::MismatchedOperands(..) => "Illegal combination of operands.",
            Self::NotImplemented(_, message) => *message,
        }
    }
}

/// ```notrust
/// [line 3] Error: Unterminated string.
/// [line 1] Error at '+': Illegal combination of operands.
/// [line 1] Error at end: Expected ')' after expression.
/// ```
impl fmt::Display for LoxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        match self.token() {
            None => write!(f, "[line {}] Error: {}", self.line(), self.message()),
            Some(t) if t.token_type == TokenType::Eof => {
                write!(f, "[line {}] Error at end: {}", t.line, self.message())
            }
            Some(t) => write!(
                f,
                "[line {}] Error at '{}': {}",
                t.line,
                t.lexeme,
                self.message()
            ),
        }
    }
}
