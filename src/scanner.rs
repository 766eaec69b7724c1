use std::iter::Peekable;
use std::num::ParseFloatError;
use std::str::Chars;

use thiserror::Error;

use crate::token::{Literal, Token, TokenType};

/// public interface for tokenizing.
/// Unrecognized characters are reported through `error_reporter` (line, character)
/// and scanning continues; the two fatal cases below discard the whole batch.
pub fn tokenize(
    source: String,
    error_reporter: fn(usize, char) -> (),
) -> Result<Vec<Token>, ScanningError> {
    let mut scanner = Scanner::new(&source, error_reporter);
    scanner.scan_tokens()?;
    Ok(scanner.tokens)
}

struct Scanner<'a> {
    source: &'a str,
    char_iter: Peekable<Chars<'a>>,
    tokens: Vec<Token>,
    error_reporter: fn(usize, char) -> (),

    // position of the start of lexeme
    current_lexeme_start: usize,
    current: usize,
    line: usize,
}

#[derive(Debug, Error)]
pub enum ScanningError {
    #[error("Unterminated string.")]
    UnterminatedString { line: usize },
    #[error("Invalid number literal '{lexeme}'.")]
    InvalidNumber {
        line: usize,
        lexeme: String,
        source: ParseFloatError,
    },
}
impl ScanningError {
    pub fn get_line(&self) -> usize {
        match self {
            ScanningError::UnterminatedString { line }
            | ScanningError::InvalidNumber { line, .. } => *line,
        }
    }
}

impl Scanner<'_> {
    fn new(source: &str, error_reporter: fn(usize, char) -> ()) -> Scanner {
        Scanner {
            source,
            char_iter: source.chars().peekable(),
            tokens: vec![],
            error_reporter,
            current_lexeme_start: 0,
            current: 0,
            line: 1,
        }
    }
    fn scan_tokens(&mut self) -> Result<(), ScanningError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }
        self.tokens.push(Token {
            r#type: TokenType::EOF,
            lexeme: "".to_string(),
            literal: None,
            line: self.line,
        });
        Ok(())
    }

    fn scan_token(&mut self) -> Result<(), ScanningError> {
        // set start of lexeme
        self.current_lexeme_start = self.current;
        let c: char = self.advance();
        let maybe_token_type = match c {
            '(' => Some(TokenType::LeftParen),
            ')' => Some(TokenType::RightParen),
            '{' => Some(TokenType::LeftBrace),
            '}' => Some(TokenType::RightBrace),
            ',' => Some(TokenType::Comma),
            '.' => Some(TokenType::Dot),
            '-' => Some(TokenType::Minus),
            '+' => Some(TokenType::Plus),
            ';' => Some(TokenType::Semicolon),
            '*' => Some(TokenType::Star),
            '!' => match self.match_one('=') {
                true => Some(TokenType::BangEqual),
                false => Some(TokenType::Bang),
            },
            '=' => match self.match_one('=') {
                true => Some(TokenType::EqualEqual),
                false => Some(TokenType::Equal),
            },
            '<' => match self.match_one('=') {
                true => Some(TokenType::LessEqual),
                false => Some(TokenType::Less),
            },
            '>' => match self.match_one('=') {
                true => Some(TokenType::GreaterEqual),
                false => Some(TokenType::Greater),
            },
            '/' => {
                if self.match_one('/') {
                    // line comment, discarded up to but excluding the newline
                    while self.peek_one() != Some(&'\n') && self.peek_one() != None {
                        self.advance();
                    }
                    None
                } else {
                    Some(TokenType::Slash)
                }
            }
            ' ' | '\r' | '\t' => None,
            '\n' => {
                self.line += 1;
                None
            }
            '"' => {
                self.consume_string()?;
                None
            }
            c if is_digit(&c) => {
                self.consume_number()?;
                None
            }
            c if is_alpha(&c) => {
                self.consume_identifier();
                None
            }
            _ => {
                // recoverable: report it and keep scanning from the next character
                (self.error_reporter)(self.line, c);
                None
            }
        };

        if let Some(token_type) = maybe_token_type {
            self.add_token(token_type);
        }
        Ok(())
    }

    fn is_at_end(&self) -> bool {
        return self.current >= self.source.len();
    }

    fn match_one(&mut self, expected: char) -> bool {
        if self.is_at_end() {
            return false;
        }
        if self.peek_one() != Some(&expected) {
            return false;
        }
        self.advance();
        return true;
    }
    fn advance(&mut self) -> char {
        // callers guard with is_at_end, so the unwrap cannot fire
        let current_char = self.char_iter.next().unwrap();
        self.current += current_char.len_utf8();
        current_char
    }
    fn add_token(&mut self, token_type: TokenType) {
        self.add_token_with_literal(token_type, None)
    }
    fn add_token_with_literal(&mut self, token_type: TokenType, literal: Option<Literal>) {
        // the lexeme is always the exact source slice scanned so far;
        // `current` only ever moves by whole characters so the slice is boundary-safe.
        let text: String = self.source[self.current_lexeme_start..self.current].to_string();
        self.tokens.push(Token {
            r#type: token_type,
            lexeme: text,
            literal,
            line: self.line,
        });
    }

    /// like advance but does not consume the character. 1 lookahead.
    fn peek_one(&mut self) -> Option<&char> {
        self.char_iter.peek()
    }

    /// 2 lookahead, needed only to check for a digit after a decimal point.
    fn peek_two(&self) -> Option<char> {
        self.source[self.current..].chars().nth(1)
    }

    fn consume_string(&mut self) -> Result<(), ScanningError> {
        while self.peek_one() != None && self.peek_one() != Some(&'"') {
            if self.peek_one() == Some(&'\n') {
                self.line += 1;
            }
            self.advance();
        }

        if self.peek_one() == None {
            return Err(ScanningError::UnterminatedString { line: self.line });
        }

        // consume closing quote
        self.advance();

        // quotes stay in the lexeme but not in the literal value
        let value = self.source[self.current_lexeme_start + 1..self.current - 1].to_string();
        self.add_token_with_literal(TokenType::String, Some(Literal::String(value)));
        Ok(())
    }
    fn consume_number(&mut self) -> Result<(), ScanningError> {
        while self.peek_one().is_some_and(is_digit) {
            self.advance();
        }

        // a fractional part only counts when a digit follows the dot,
        // so "1." scans as NUMBER(1) then DOT
        if self.peek_one() == Some(&'.') && self.peek_two().is_some_and(|c| is_digit(&c)) {
            // consume the '.'
            self.advance();
            while self.peek_one().is_some_and(is_digit) {
                self.advance();
            }
        }

        let lexeme = &self.source[self.current_lexeme_start..self.current];
        let value = lexeme
            .parse::<f64>()
            .map_err(|err| ScanningError::InvalidNumber {
                line: self.line,
                lexeme: lexeme.to_string(),
                source: err,
            })?;
        self.add_token_with_literal(TokenType::Number, Some(Literal::Number(value)));
        Ok(())
    }
    fn consume_identifier(&mut self) {
        while self.peek_one().is_some_and(is_alphanumeric) {
            self.advance();
        }

        let lexeme = &self.source[self.current_lexeme_start..self.current];

        match match_keyword(lexeme) {
            Some(keyword_token) => self.add_token(keyword_token),
            _ => self.add_token(TokenType::Identifier),
        }
    }
}

// keyword matching requires exact full-lexeme equality: "classy" is an identifier.
fn match_keyword(input: &str) -> Option<TokenType> {
    match input {
        "and" => Some(TokenType::And),
        "class" => Some(TokenType::Class),
        "else" => Some(TokenType::Else),
        "false" => Some(TokenType::False),
        "fun" => Some(TokenType::Fun),
        "for" => Some(TokenType::For),
        "if" => Some(TokenType::If),
        "nil" => Some(TokenType::Nil),
        "or" => Some(TokenType::Or),
        "print" => Some(TokenType::Print),
        "return" => Some(TokenType::Return),
        "super" => Some(TokenType::Super),
        "this" => Some(TokenType::This),
        "true" => Some(TokenType::True),
        "var" => Some(TokenType::Var),
        "while" => Some(TokenType::While),
        _ => None,
    }
}

fn is_digit(c: &char) -> bool {
    match c {
        '0'..='9' => true,
        _ => false,
    }
}
fn is_alpha(c: &char) -> bool {
    match c {
        'a'..='z' | 'A'..='Z' | '_' => true,
        _ => false,
    }
}
fn is_alphanumeric(c: &char) -> bool {
    is_digit(c) || is_alpha(c)
}
