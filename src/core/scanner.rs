use std::iter::Peekable;

use owned_chars::OwnedChars;

use super::{LoxError, Token, TokenType};

pub struct Scanner {
    // Scratch pad for Tokens
    scratch: String,
    chars: Peekable<OwnedChars>,
    tokens: Vec<Token>,
    errors: Vec<LoxError>,
    line: usize,
}

impl Scanner {
    /// Creates a new `Scanner` that takes ownership of `source`.
    ///
    /// A `Scanner` is an encapsulated iterator over the characters of a
    /// single source unit. It is consumed by `scan_tokens`.
    #[must_use]
    pub fn new(source: String) -> Self {
        Scanner {
            // cautiously optimistic allocation
            scratch: String::with_capacity(1024),
            chars: OwnedChars::from_string(source).peekable(),
            tokens: Vec::new(),
            errors: Vec::new(),
            line: 1,
        }
    }

    /// Scans the whole source.
    ///
    /// Returns every token (always terminated by exactly one `Eof`) along with
    /// the lexical errors found on the way. An error never stops the scan.
    #[must_use]
    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<LoxError>) {
        while let Some(c) = self.advance() {
            self.scan_token(c);
            self.scratch.clear();
        }

        self.tokens
            .push(Token::new(TokenType::Eof, String::new(), self.line));

        (self.tokens, self.errors)
    }

    fn scan_token(&mut self, c: char) {
        match c {
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            ',' => self.add_token(TokenType::Comma),
            '.' => self.add_token(TokenType::Dot),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            ';' => self.add_token(TokenType::Semicolon),
            '*' => self.add_token(TokenType::Star),
            '!' => self.is_compound_equal_operator(TokenType::BangEqual, TokenType::Bang),
            '=' => self.is_compound_equal_operator(TokenType::EqualEqual, TokenType::Equal),
            '<' => self.is_compound_equal_operator(TokenType::LessEqual, TokenType::Less),
            '>' => self.is_compound_equal_operator(TokenType::GreaterEqual, TokenType::Greater),
            '/' => {
                if let Some('/') = self.peek() {
                    // The newline is left for the main loop so it gets counted.
                    while !matches!(self.peek(), None | Some('\n')) {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenType::Slash);
                }
            }
            '"' => self.string(),
            c if c.is_ascii_digit() => self.number(),
            c if Scanner::is_alpha(c) => self.identifier(),
            _ => self.add_token(TokenType::Unrecognized),
        }
    }

    fn is_compound_equal_operator(&mut self, yes: TokenType, no: TokenType) {
        if let Some('=') = self.peek() {
            self.advance();
            self.add_token(yes);
        } else {
            self.add_token(no);
        };
    }

    fn identifier(&mut self) {
        while Scanner::is_alphanumeric(self.peek()) {
            self.advance();
        }

        self.add_token(TokenType::keyword_or_identifier(&self.scratch));
    }

    fn is_alpha(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '_'
    }

    /// Adapter for Option<char>
    fn is_alphanumeric(c: Option<char>) -> bool {
        c.map_or(false, |c| Scanner::is_alpha(c) || c.is_ascii_digit())
    }

    /// Adapter for Option<char>
    fn is_digit(c: Option<char>) -> bool {
        c.map_or(false, |c| c.is_ascii_digit())
    }

    fn number(&mut self) {
        while Scanner::is_digit(self.peek()) {
            self.advance();
        }

        // `Peekable` can only see one character ahead, so the '.' is taken
        // first and handed back as its own token if no digit follows it.
        let mut trailing_dot = false;
        if let Some('.') = self.peek() {
            self.advance();

            if Scanner::is_digit(self.peek()) {
                while Scanner::is_digit(self.peek()) {
                    self.advance();
                }
            } else {
                self.scratch.pop();
                trailing_dot = true;
            }
        }

        match self.scratch.parse::<f64>() {
            Ok(n) => self.add_token(TokenType::Number(n)),
            Err(e) => self.errors.push(LoxError::FloatParseError(self.line, e)),
        }

        if trailing_dot {
            self.tokens
                .push(Token::new(TokenType::Dot, String::from("."), self.line));
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn string(&mut self) {
        loop {
            match self.advance() {
                Some('"') => break,
                Some('\n') => self.line += 1,
                Some(_) => {}
                None => {
                    self.errors.push(LoxError::UnterminatedString(self.line));
                    return;
                }
            }
        }

        // scratch is '"' contents '"'
        let value = self.scratch[1..self.scratch.len() - 1].to_owned();
        self.add_token(TokenType::String(value));
    }

    fn advance(&mut self) -> Option<char> {
        self.chars.next().map(|c| {
            self.scratch.push(c);
            c
        })
    }

    fn add_token(&mut self, token: TokenType) {
        let value = String::from(&self.scratch);
        self.tokens.push(Token::new(token, value, self.line));
    }
}
