use crate::source::*;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    Number,
    String,
    Identifier,

    // Punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Semicolon,
    Period,
    Colon,
    Question,

    // Operators
    Plus,
    PlusPlus,
    PlusEqual,
    Minus,
    MinusMinus,
    MinusEqual,
    Star,
    StarEqual,
    Slash,
    SlashEqual,
    Percent,
    PercentEqual,
    Bang,
    BangEqual,
    BangEqualEqual,
    Equal,
    EqualEqual,
    EqualEqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    AmpersandAmpersand,
    BarBar,

    // Keywords
    Var,
    Function,
    Return,
    If,
    Else,
    While,
    For,
    Break,
    Continue,
    Typeof,
    True,
    False,
    Null,

    EOF,
}

impl TokenKind {
    pub fn keyword(lexeme: &str) -> Option<TokenKind> {
        let kind = match lexeme {
            "var" => TokenKind::Var,
            "function" => TokenKind::Function,
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "typeof" => TokenKind::Typeof,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_assignment(&self) -> bool {
        match self {
            TokenKind::Equal
            | TokenKind::PlusEqual
            | TokenKind::MinusEqual
            | TokenKind::StarEqual
            | TokenKind::SlashEqual
            | TokenKind::PercentEqual => true,
            _ => false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// A token that never appeared in any source text.
    pub fn synthetic(kind: TokenKind, lexeme: &str) -> Self {
        Token::new(kind, Span::synthetic(lexeme))
    }

    pub fn lexeme(&self) -> &str {
        self.span.lexeme()
    }
}

impl ContainsSpan for Token {
    fn span(&self) -> &Span {
        &self.span
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Token(kind: {:#?}, lexeme: {})",
            self.kind,
            self.lexeme()
        )
    }
}

pub trait TokenString {
    fn token_string(&self) -> String;
}

impl TokenString for [Token] {
    fn token_string(&self) -> String {
        let toks: Vec<String> = self.iter().map(|t| t.to_string()).collect();
        String::from("Vec(") + &toks.join(", ") + ")"
    }
}
