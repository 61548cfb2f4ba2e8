use std::error;
use std::num::ParseFloatError;
use std::rc::Rc;
use std::result;

mod display;
mod interpreter;
mod parser;
pub mod report;
mod scanner;

pub type Interpreter = interpreter::Interpreter;
pub type Parser = parser::Parser;
pub type Reporter<W> = report::Reporter<W>;
pub type Result<T> = result::Result<T, LoxError>;
pub type Scanner = scanner::Scanner;

#[derive(Debug, PartialEq)]
pub enum LoxError {
    /// A '"' was scanned but the source ended before the closing '"'. The
    /// line is where the scanner gave up, not where the string started.
    UnterminatedString(usize),
    /// A number lexeme could not be converted into an `f64`.
    FloatParseError(usize, ParseFloatError),
    /// `primary` could not match anything at this token.
    ExpectedExpression(Token),
    /// An '(' open parenthesis token was parsed, but no ')' close parenthesis
    /// token was found. Carries the token found instead.
    UnclosedParenthesis(Token),
    /// The operand of a unary '-' is not a number.
    NumberOperand(Token),
    /// An arithmetic or comparison operator was applied to non numbers. The
    /// operands are kept around for the curious (and for tests).
    NumberOperands(Token, Object, Object),
    /// The operand types do not match for '+'. Only number + number and
    /// string + string are allowed:
    /// ```notrust
    /// "foo" + 1     // mismatched
    /// true + nil    // mismatched
    /// ```
    MismatchedOperands(Token, Object, Object),
    /// The tree holds a node this interpreter has no semantics for (e.g.
    /// assignment, which needs an environment).
    NotImplemented(Token, &'static str),
}

impl LoxError {
    /// The offending token, if the error has one.
    #[must_use]
    pub fn token(&self) -> Option<&Token> {
        match self {
            Self::UnterminatedString(_) | Self::FloatParseError(..) => None,
            Self::ExpectedExpression(t)
            | Self::UnclosedParenthesis(t)
            | Self::NumberOperand(t)
            | Self::NumberOperands(t, ..)
            | Self::MismatchedOperands(t, ..)
            | Self::NotImplemented(t, _) => Some(t),
        }
    }

    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::UnterminatedString(line) | Self::FloatParseError(line, _) => *line,
            other => other.token().map_or(0, |t| t.line),
        }
    }
}

impl error::Error for LoxError {}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenType {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals
    Identifier,
    String(String),
    Number(f64),

    // Keywords
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    /// A character the scanner has no category for. It is kept as a token so
    /// the parser can point at it.
    Unrecognized,

    Eof,
}

impl TokenType {
    /// Maps a scanned word to its keyword, or `Identifier` if it isn't one.
    #[must_use]
    pub fn keyword_or_identifier(word: &str) -> TokenType {
        match word {
            "and" => TokenType::And,
            "class" => TokenType::Class,
            "else" => TokenType::Else,
            "false" => TokenType::False,
            "for" => TokenType::For,
            "fun" => TokenType::Fun,
            "if" => TokenType::If,
            "nil" => TokenType::Nil,
            "or" => TokenType::Or,
            "print" => TokenType::Print,
            "return" => TokenType::Return,
            "super" => TokenType::Super,
            "this" => TokenType::This,
            "true" => TokenType::True,
            "var" => TokenType::Var,
            "while" => TokenType::While,
            _ => TokenType::Identifier,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    token_type: TokenType,
    lexeme: Rc<str>,
    line: usize,
}

impl Token {
    #[must_use]
    pub fn new(token_type: TokenType, lexeme: String, line: usize) -> Self {
        Token {
            token_type,
            lexeme: Rc::from(lexeme),
            line,
        }
    }

    /// The literal value carried by `NUMBER` and `STRING` tokens.
    #[must_use]
    pub fn literal(&self) -> Option<Object> {
        match &self.token_type {
            TokenType::Number(n) => Some(Object::Number(*n)),
            TokenType::String(s) => Some(Object::String(s.clone())),
            _ => None,
        }
    }
}

/// A runtime value.
///
/// Equality is structural: two values are equal only if they are the same
/// variant holding equal payloads, so `1 == "1"` is simply `false`.
#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    Bool(bool),
    /// Emulates the [*billion-dollar mistake*](https://en.wikipedia.org/wiki/Tony_Hoare#Apologies_and_retractions)
    Nil,
    Number(f64),
    String(String),
}

impl Object {
    /// `nil` and `false` are falsey, everything else (including `0` and `""`)
    /// is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Nil => false,
            Object::Bool(b) => *b,
            Object::Number(_) | Object::String(_) => true,
        }
    }
}

/// The expression tree.
///
/// jlox implements this with OOP: an abstract `Expr` class, a subclass per
/// variant and the visitor pattern to dispatch on them. Here every consumer
/// (the interpreter, the printer in `display.rs`) is just an exhaustive
/// `match`.
#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    /// Never produced by the parser; there is no environment to assign into.
    Assign(Token, Box<Expr>),
    Binary(Box<Expr>, Token, Box<Expr>),
    Grouping(Box<Expr>),
    Literal(Object),
    Unary(Token, Box<Expr>),
}
