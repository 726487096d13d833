use super::token::*;
use super::LexedProgram;
use crate::diagnostic::*;
use crate::source::*;
use log::trace;
use std::rc::Rc;

pub struct Lexer {
    source: Source,
    start: usize,
    current: usize,
    line: usize,
    start_line: usize,
    reporter: Rc<dyn Reporter>,
}

impl Lexer {
    pub fn new(source: Source, reporter: Rc<dyn Reporter>) -> Self {
        Lexer {
            source,
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
            reporter,
        }
    }

    pub fn lex(mut self) -> LexedProgram {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            if let Some(new) = self.token() {
                tokens.push(new);
            }
        }

        self.start = self.current;
        self.start_line = self.line;
        tokens.push(self.make_token(TokenKind::EOF));

        trace!("Lexed {} tokens from {}", tokens.len(), self.source.name);

        LexedProgram {
            source: self.source,
            tokens,
        }
    }

    fn token(&mut self) -> Option<Token> {
        let character = self.advance();
        let token = match character {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '{' => self.make_token(TokenKind::LeftBrace),
            '}' => self.make_token(TokenKind::RightBrace),
            '[' => self.make_token(TokenKind::LeftBracket),
            ']' => self.make_token(TokenKind::RightBracket),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '.' => {
                if self.peek().map_or(false, |c| c.is_ascii_digit()) {
                    self.number()
                } else {
                    self.make_token(TokenKind::Period)
                }
            }
            ':' => self.make_token(TokenKind::Colon),
            '?' => self.make_token(TokenKind::Question),
            '+' => {
                if self.consume('+') {
                    self.make_token(TokenKind::PlusPlus)
                } else {
                    self.conditional_make_token('=', TokenKind::PlusEqual, TokenKind::Plus)
                }
            }
            '-' => {
                if self.consume('-') {
                    self.make_token(TokenKind::MinusMinus)
                } else {
                    self.conditional_make_token('=', TokenKind::MinusEqual, TokenKind::Minus)
                }
            }
            '*' => self.conditional_make_token('=', TokenKind::StarEqual, TokenKind::Star),
            '%' => self.conditional_make_token('=', TokenKind::PercentEqual, TokenKind::Percent),
            '/' => {
                if self.consume('/') {
                    return self.line_comment();
                } else if self.consume('*') {
                    return self.block_comment();
                } else {
                    self.conditional_make_token('=', TokenKind::SlashEqual, TokenKind::Slash)
                }
            }
            '!' => {
                if self.consume('=') {
                    self.conditional_make_token('=', TokenKind::BangEqualEqual, TokenKind::BangEqual)
                } else {
                    self.make_token(TokenKind::Bang)
                }
            }
            '=' => {
                if self.consume('=') {
                    self.conditional_make_token(
                        '=',
                        TokenKind::EqualEqualEqual,
                        TokenKind::EqualEqual,
                    )
                } else {
                    self.make_token(TokenKind::Equal)
                }
            }
            '>' => self.conditional_make_token('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '<' => self.conditional_make_token('=', TokenKind::LessEqual, TokenKind::Less),
            '&' if self.consume('&') => self.make_token(TokenKind::AmpersandAmpersand),
            '|' if self.consume('|') => self.make_token(TokenKind::BarBar),
            '"' | '\'' => return self.string(character),
            '0'..='9' => self.number(),
            c if is_identifier_start(c) => self.identifier(),
            ' ' | '\t' | '\r' => return None,
            '\n' => {
                self.line += 1;
                return None;
            }
            _ => {
                self.error(&format!("unrecognized character '{}'", character));
                return None;
            }
        };
        Some(token)
    }

    fn line_comment(&mut self) -> Option<Token> {
        while !self.is_at_end() && self.peek() != Some('\n') {
            self.advance();
        }
        None
    }

    fn block_comment(&mut self) -> Option<Token> {
        loop {
            if self.is_at_end() {
                self.error("Unterminated comment");
                return None;
            }
            match self.advance() {
                '*' if self.consume('/') => return None,
                '\n' => self.line += 1,
                _ => (),
            }
        }
    }

    fn string(&mut self, quote: char) -> Option<Token> {
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.error("Unterminated string");
                    return None;
                }
                Some(c) if c == quote => {
                    self.advance();
                    return Some(self.make_token(TokenKind::String));
                }
                Some('\\') => {
                    self.advance();
                    if !self.is_at_end() {
                        self.advance();
                    }
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn number(&mut self) -> Token {
        self.digits();
        if self.peek() == Some('.') {
            self.advance();
            self.digits();
        }
        self.make_token(TokenKind::Number)
    }

    fn digits(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn identifier(&mut self) -> Token {
        while self.peek().map_or(false, is_identifier_part) {
            self.advance();
        }

        let token = self.make_token(TokenKind::Identifier);
        let keyword = TokenKind::keyword(token.lexeme());
        match keyword {
            Some(keyword) => Token::new(keyword, token.span),
            None => token,
        }
    }

    fn conditional_make_token(
        &mut self,
        character: char,
        kind1: TokenKind,
        kind2: TokenKind,
    ) -> Token {
        if self.consume(character) {
            self.make_token(kind1)
        } else {
            self.make_token(kind2)
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.current_span())
    }

    fn error(&self, message: &str) {
        self.reporter
            .report(Diagnostic::error(&self.current_span(), message));
    }

    fn current_span(&self) -> Span {
        Span::new(
            &self.source,
            self.start,
            self.current - self.start,
            self.start_line,
        )
    }

    fn consume(&mut self, character: char) -> bool {
        if self.peek() == Some(character) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) -> char {
        let character = self.peek().unwrap_or('\0');
        self.current += character.len_utf8();
        character
    }

    fn peek(&self) -> Option<char> {
        self.source.character(self.current)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.length()
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}
