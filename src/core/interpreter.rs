use super::{Expr, LoxError, Object, Result, Token, TokenType};

/// Walks an expression tree and reduces it to an `Object`.
///
/// There is no environment: a fresh `Interpreter` per run costs nothing and
/// nothing leaks from one run to the next.
#[derive(Debug, Default)]
pub struct Interpreter;

impl Interpreter {
    #[must_use]
    pub fn new() -> Self {
        Interpreter
    }

    /// Evaluates `expr`. Either the whole tree evaluates or the first error
    /// is returned; there are no partial results.
    pub fn interpret(&self, expr: &Expr) -> Result<Object> {
        self.evaluate(expr)
    }

    fn evaluate(&self, expr: &Expr) -> Result<Object> {
        match expr {
            Expr::Assign(name, _) => Err(LoxError::NotImplemented(
                name.clone(),
                "Assignment is not supported.",
            )),
            Expr::Binary(left_expr, token, right_expr) => {
                let left = self.evaluate(left_expr)?;
                let right = self.evaluate(right_expr)?;

                match token.token_type {
                    TokenType::Minus => {
                        let (l, r) = Interpreter::numbers(token, left, right)?;
                        Ok(Object::Number(l - r))
                    }
                    TokenType::Slash => {
                        let (l, r) = Interpreter::numbers(token, left, right)?;
                        Ok(Object::Number(l / r))
                    }
                    TokenType::Star => {
                        let (l, r) = Interpreter::numbers(token, left, right)?;
                        Ok(Object::Number(l * r))
                    }
                    TokenType::Plus => match (&left, &right) {
                        (Object::Number(l), Object::Number(r)) => Ok(Object::Number(l + r)),
                        (Object::String(l), Object::String(r)) => {
                            let mut buffer = String::with_capacity(l.len() + r.len());
                            buffer.push_str(l);
                            buffer.push_str(r);
                            Ok(Object::String(buffer))
                        }
                        _ => Err(LoxError::MismatchedOperands(token.clone(), left, right)),
                    },
                    TokenType::Greater => {
                        let (l, r) = Interpreter::numbers(token, left, right)?;
                        Ok(Object::Bool(l > r))
                    }
                    TokenType::GreaterEqual => {
                        let (l, r) = Interpreter::numbers(token, left, right)?;
                        Ok(Object::Bool(l >= r))
                    }
                    TokenType::Less => {
                        let (l, r) = Interpreter::numbers(token, left, right)?;
                        Ok(Object::Bool(l < r))
                    }
                    TokenType::LessEqual => {
                        let (l, r) = Interpreter::numbers(token, left, right)?;
                        Ok(Object::Bool(l <= r))
                    }
                    TokenType::BangEqual => Ok(Object::Bool(left != right)),
                    TokenType::EqualEqual => Ok(Object::Bool(left == right)),
                    _ => Err(LoxError::NotImplemented(
                        token.clone(),
                        "Unknown binary operator.",
                    )),
                }
            }
            Expr::Unary(token, expr) => {
                let right = self.evaluate(expr)?;
                match token.token_type {
                    TokenType::Minus => match right {
                        Object::Number(n) => Ok(Object::Number(-n)),
                        _ => Err(LoxError::NumberOperand(token.clone())),
                    },
                    TokenType::Bang => Ok(Object::Bool(!right.is_truthy())),
                    _ => Err(LoxError::NotImplemented(
                        token.clone(),
                        "Unknown unary operator.",
                    )),
                }
            }
            Expr::Literal(obj) => Ok(obj.clone()),
            Expr::Grouping(group) => self.evaluate(group),
        }
    }

    /// Unwraps both operands of an arithmetic or comparison operator.
    fn numbers(operator: &Token, left: Object, right: Object) -> Result<(f64, f64)> {
        match (left, right) {
            (Object::Number(l), Object::Number(r)) => Ok((l, r)),
            (left, right) => Err(LoxError::NumberOperands(operator.clone(), left, right)),
        }
    }
}
