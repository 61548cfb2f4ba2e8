use std::cell::Cell;
use std::mem::discriminant;

use super::{Expr, LoxError, Object, Result, Token, TokenType};

/// Parses a series of Tokens into an abstract syntax tree
///
/// `Parser` implements the expression subset of the lox grammar defined in
/// [Crafting Interpreters: Appendix I]. Every level delegates to the next
/// one up and folds its operators left-associatively.
///
/// ```notrust
/// expression     → equality ;
/// equality       → comparison ( ( "!=" | "==" ) comparison )* ;
/// comparison     → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
/// term           → factor ( ( "-" | "+" ) factor )* ;
/// factor         → unary ( ( "/" | "*" ) unary )* ;
/// unary          → ( "!" | "-" ) unary
///                | primary ;
/// primary        → NUMBER | STRING | "false" | "true" | "nil"
///                | "(" expression ")" ;
/// ```
///
/// [Crafting Interpreters: Appendix I]: https://www.craftinginterpreters.com/appendix-i.html
pub struct Parser {
    tokens: Vec<Token>,
    /// cursor is an implementation detail end users shouldn't worry about. Use
    /// interior mutability here to avoid forcing the user to hold a mutable Parser.
    cursor: Cell<usize>,
}

impl Parser {
    /// Creates a parser over `tokens`. An `Eof` is appended if the sequence
    /// doesn't already end with one, so the cursor always has somewhere to
    /// stop.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let terminated = tokens
            .last()
            .map_or(false, |t| t.token_type == TokenType::Eof);
        if !terminated {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::new(TokenType::Eof, String::new(), line));
        }

        Parser {
            tokens,
            cursor: Cell::new(0),
        }
    }

    /// Parses one expression. Whatever follows it (a stray ';', say) is left
    /// unread.
    pub fn parse(&self) -> Result<Box<Expr>> {
        self.expression()
    }

    /// Discards tokens until a likely statement boundary: just past a ';', or
    /// right before a keyword that starts a statement.
    pub fn synchronize(&self) {
        if self.is_at_end() {
            return;
        }

        let mut previous = self.advance();

        while !self.is_at_end() {
            if let TokenType::Semicolon = previous.token_type {
                return;
            }

            match self.peek().token_type {
                TokenType::Class
                | TokenType::Fun
                | TokenType::Var
                | TokenType::For
                | TokenType::If
                | TokenType::While
                | TokenType::Print
                | TokenType::Return => return,
                _ => {}
            }

            previous = self.advance();
        }
    }

    fn expression(&self) -> Result<Box<Expr>> {
        self.equality()
    }

    fn equality(&self) -> Result<Box<Expr>> {
        let mut expr = self.comparison()?;

        while let Some(operator) =
            self.match_tokens(&[TokenType::BangEqual, TokenType::EqualEqual])
        {
            let right = self.comparison()?;

            expr = Box::new(Expr::Binary(expr, operator, right));
        }

        Ok(expr)
    }

    fn comparison(&self) -> Result<Box<Expr>> {
        let mut expr = self.term()?;

        while let Some(operator) = self.match_tokens(&[
            TokenType::Greater,
            TokenType::GreaterEqual,
            TokenType::Less,
            TokenType::LessEqual,
        ]) {
            let right = self.term()?;
            expr = Box::new(Expr::Binary(expr, operator, right));
        }

        Ok(expr)
    }

    fn term(&self) -> Result<Box<Expr>> {
        let mut expr = self.factor()?;

        while let Some(operator) = self.match_tokens(&[TokenType::Minus, TokenType::Plus]) {
            let right = self.factor()?;

            expr = Box::new(Expr::Binary(expr, operator, right));
        }

        Ok(expr)
    }

    fn factor(&self) -> Result<Box<Expr>> {
        let mut expr = self.unary()?;

        while let Some(operator) = self.match_tokens(&[TokenType::Slash, TokenType::Star]) {
            let right = self.unary()?;

            expr = Box::new(Expr::Binary(expr, operator, right));
        }

        Ok(expr)
    }

    fn unary(&self) -> Result<Box<Expr>> {
        if let Some(operator) = self.match_tokens(&[TokenType::Bang, TokenType::Minus]) {
            let right = self.unary()?;

            return Ok(Box::new(Expr::Unary(operator, right)));
        }

        self.primary()
    }

    fn primary(&self) -> Result<Box<Expr>> {
        if self.match_token(&TokenType::False) {
            return Ok(Box::new(Expr::Literal(Object::Bool(false))));
        }
        if self.match_token(&TokenType::True) {
            return Ok(Box::new(Expr::Literal(Object::Bool(true))));
        }
        if self.match_token(&TokenType::Nil) {
            return Ok(Box::new(Expr::Literal(Object::Nil)));
        }

        // Number and String carry their literal, so any payload will do here;
        // `check` only compares discriminants.
        if let Some(literal) = self
            .match_tokens(&[TokenType::Number(0.0), TokenType::String(String::new())])
            .and_then(|token| token.literal())
        {
            return Ok(Box::new(Expr::Literal(literal)));
        }

        if self.match_token(&TokenType::LeftParen) {
            let expr = self.expression()?;
            self.consume(&TokenType::RightParen)?;
            return Ok(Box::new(Expr::Grouping(expr)));
        }

        Err(LoxError::ExpectedExpression(self.peek().clone()))
    }

    fn consume(&self, expected: &TokenType) -> Result<Token> {
        if self.check(expected) {
            return Ok(self.advance());
        }

        let actual = self.peek().clone();
        match expected {
            TokenType::RightParen => Err(LoxError::UnclosedParenthesis(actual)),
            _ => Err(LoxError::ExpectedExpression(actual)),
        }
    }

    fn match_token(&self, token_type: &TokenType) -> bool {
        self.match_tokens(std::slice::from_ref(token_type)).is_some()
    }

    /// Consumes the next token if it has one of `token_types`, and hands it back.
    fn match_tokens(&self, token_types: &[TokenType]) -> Option<Token> {
        if token_types.iter().any(|t| self.check(t)) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn check(&self, token_type: &TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        discriminant(&self.peek().token_type) == discriminant(token_type)
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::Eof
    }

    /// The cursor never moves past the trailing `Eof`, so this always lands
    /// on a token.
    fn peek(&self) -> &Token {
        &self.tokens[self.cursor.get()]
    }

    /// Returns the token under the cursor and steps past it. `Eof` is
    /// returned as often as asked, the cursor stays put on it.
    fn advance(&self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.cursor.set(self.cursor.get() + 1);
        }

        token
    }
}

#[cfg(test)]
mod tests {
    use super::super::Scanner;
    use super::*;

    fn parser(source: &str) -> Parser {
        let (tokens, errors) = Scanner::new(source.to_owned()).scan_tokens();
        assert!(errors.is_empty());
        Parser::new(tokens)
    }

    fn number(n: f64) -> Box<Expr> {
        Box::new(Expr::Literal(Object::Number(n)))
    }

    #[test]
    fn it_can_advance_over_token_iterator() {
        let parser = parser("var breakfast;");

        assert_eq!(
            Token::new(TokenType::Var, String::from("var"), 1),
            parser.advance()
        );
        assert_eq!(
            Token::new(TokenType::Identifier, String::from("breakfast"), 1),
            parser.advance()
        );
        assert_eq!(
            Token::new(TokenType::Semicolon, String::from(";"), 1),
            parser.advance()
        );

        // Parked on Eof: advancing again keeps handing it back.
        assert_eq!(
            Token::new(TokenType::Eof, String::new(), 1),
            parser.advance()
        );
        assert_eq!(
            Token::new(TokenType::Eof, String::new(), 1),
            parser.advance()
        );
        assert!(parser.is_at_end());
    }

    #[test]
    fn it_terminates_an_empty_token_stream() {
        let parser = Parser::new(Vec::new());
        assert_eq!(
            Err(LoxError::ExpectedExpression(Token::new(
                TokenType::Eof,
                String::new(),
                1
            ))),
            parser.parse()
        );
    }

    #[test]
    fn it_can_parse_a_float() {
        assert_eq!(number(1.0), parser("1").parse().unwrap());
    }

    #[test]
    fn it_can_parse_a_string() {
        assert_eq!(
            Expr::Literal(Object::String(String::from("lox"))),
            *parser("\"lox\"").parse().unwrap()
        );
    }

    #[test]
    fn it_can_parse_a_bool() {
        assert_eq!(
            Expr::Literal(Object::Bool(true)),
            *parser("true").parse().unwrap()
        );
        assert_eq!(
            Expr::Literal(Object::Bool(false)),
            *parser("false").parse().unwrap()
        );
    }

    #[test]
    fn it_can_parse_nil() {
        assert_eq!(Expr::Literal(Object::Nil), *parser("nil").parse().unwrap());
    }

    #[test]
    fn it_can_parse_a_unary_expression() {
        assert_eq!(
            Expr::Unary(Token::new(TokenType::Minus, "-".to_owned(), 1), number(1.0)),
            *parser("-1").parse().unwrap()
        );
    }

    #[test]
    fn it_nests_unary_expressions() {
        let bang = Token::new(TokenType::Bang, "!".to_owned(), 1);
        assert_eq!(
            Expr::Unary(
                bang.clone(),
                Box::new(Expr::Unary(
                    bang,
                    Box::new(Expr::Literal(Object::Bool(true)))
                ))
            ),
            *parser("!!true").parse().unwrap()
        );
    }

    #[test]
    fn it_can_parse_a_binary_expression() {
        assert_eq!(
            Expr::Binary(
                number(1.0),
                Token::new(TokenType::Plus, "+".to_owned(), 1),
                number(2.0)
            ),
            *parser("1 + 2").parse().unwrap()
        );
    }

    #[test]
    fn it_can_parse_a_grouping_expression() {
        assert_eq!(
            Expr::Grouping(number(1.0)),
            *parser("(1)").parse().unwrap()
        );
    }

    #[test]
    fn it_binds_factors_tighter_than_terms() {
        let plus = Token::new(TokenType::Plus, "+".to_owned(), 1);
        let star = Token::new(TokenType::Star, "*".to_owned(), 1);
        let expected = Expr::Binary(
            number(1.0),
            plus,
            Box::new(Expr::Binary(number(2.0), star, number(3.0))),
        );

        assert_eq!(expected, *parser("1 + 2 * 3").parse().unwrap());
    }

    #[test]
    fn it_associates_to_the_left() {
        let minus = Token::new(TokenType::Minus, "-".to_owned(), 1);
        let expected = Expr::Binary(
            Box::new(Expr::Binary(number(5.0), minus.clone(), number(3.0))),
            minus,
            number(1.0),
        );

        assert_eq!(expected, *parser("5 - 3 - 1").parse().unwrap());
    }

    #[test]
    fn it_can_parse_a_compound_expression() {
        let plus = Token::new(TokenType::Plus, "+".to_owned(), 1);
        let add_expr = Expr::Grouping(Box::new(Expr::Binary(number(1.0), plus, number(2.0))));

        let star = Token::new(TokenType::Star, "*".to_owned(), 1);
        let expected = Expr::Binary(Box::new(add_expr), star, number(3.0));

        assert_eq!(expected, *parser("(1 + 2) * 3").parse().unwrap());
    }

    #[test]
    fn it_can_parse_an_arbitrarily_complex_expression() {
        let plus = Token::new(TokenType::Plus, "+".to_owned(), 1);
        let add_expr = Expr::Grouping(Box::new(Expr::Binary(number(1.0), plus, number(2.0))));

        let star = Token::new(TokenType::Star, "*".to_owned(), 1);
        let star_expr = Expr::Binary(Box::new(add_expr), star, number(3.0));

        let minus = Token::new(TokenType::Minus, "-".to_owned(), 1);
        let sub_expr = Expr::Grouping(Box::new(Expr::Binary(number(4.0), minus, number(5.0))));

        let slash = Token::new(TokenType::Slash, "/".to_owned(), 1);
        let slash_expr = Expr::Binary(Box::new(sub_expr), slash, number(6.0));

        let greater = Token::new(TokenType::Greater, ">".to_owned(), 1);
        let expected = Expr::Binary(Box::new(star_expr), greater, Box::new(slash_expr));

        assert_eq!(
            expected,
            *parser("(1 + 2) * 3 > (4 - 5) / 6").parse().unwrap()
        );
    }

    #[test]
    fn it_detects_unclosed_parenthesis() {
        let error = parser("(1 + 2").parse().unwrap_err();
        assert_eq!(
            LoxError::UnclosedParenthesis(Token::new(TokenType::Eof, String::new(), 1)),
            error
        );
        assert_eq!(
            "[line 1] Error at end: Expected ')' after expression.",
            error.to_string()
        );
    }

    #[test]
    fn it_reports_the_token_that_is_not_an_expression() {
        assert_eq!(
            Err(LoxError::ExpectedExpression(Token::new(
                TokenType::Star,
                String::from("*"),
                2
            ))),
            parser("1 +\n* 2").parse()
        );
        assert_eq!(
            Err(LoxError::ExpectedExpression(Token::new(
                TokenType::Unrecognized,
                String::from("@"),
                1
            ))),
            parser("@").parse()
        );
    }

    #[test]
    fn it_stops_after_one_expression() {
        let sum = parser("1 + 2;");
        assert_eq!(
            Expr::Binary(
                number(1.0),
                Token::new(TokenType::Plus, "+".to_owned(), 1),
                number(2.0)
            ),
            *sum.parse().unwrap()
        );
        assert_eq!(TokenType::Semicolon, sum.peek().token_type);

        assert_eq!(number(1.0), parser("1 2").parse().unwrap());
    }

    #[test]
    fn it_synchronizes_past_a_semicolon() {
        let parser = parser("1 + ; 2");
        parser.synchronize();
        assert_eq!(number(2.0), parser.parse().unwrap());
    }

    #[test]
    fn it_synchronizes_up_to_a_statement_keyword() {
        let parser = parser("1 2 3 print");
        parser.synchronize();
        assert_eq!(TokenType::Print, parser.peek().token_type);
    }
}
