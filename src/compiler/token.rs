use std::fmt;

use text_size::TextRange;
use thiserror::Error;

/// Enum representing common lexeme types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Multi-char tokens:
    /// "and"
    And,
    /// "class"
    Class,
    /// "else"
    Else,
    /// "false"
    False,
    /// "fn"
    Fn,
    /// "for"
    For,
    /// "if"
    If,
    /// "let"
    Let,
    /// "nil"
    Nil,
    /// "or"
    Or,
    /// "print"
    Print,
    /// "return"
    Return,
    /// "super"
    Super,
    /// "this"
    This,
    /// "true"
    True,
    /// "while"
    While,

    // Two-char tokens:
    /// "=="
    Eq,
    /// "!="
    NotEq,
    /// "<="
    LtEq,
    /// ">="
    GtEq,

    // One-char tokens:
    /// ","
    Comma,
    /// "."
    Dot,
    /// ";"
    Semicolon,
    /// "("
    OpenParen,
    /// ")"
    CloseParen,
    /// "{"
    OpenBrace,
    /// "}"
    CloseBrace,
    /// "="
    Assign,
    /// "!"
    Bang,
    /// "<"
    Lt,
    /// ">"
    Gt,
    /// "+"
    Add,
    /// "-"
    Sub,
    /// "*"
    Mul,
    /// "/"
    Div,

    // Literals:
    /// "12", "3.5"
    Number,
    /// ""abc"", both quotes included in the token range
    Str,
    /// Ident
    Ident,

    // Sentinels:
    /// End of input. Produced indefinitely once reached.
    Eof,
    /// A lexical error, carrying its diagnostic message.
    Error(ScanErrorKind),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::And => "'and'",
            TokenKind::Class => "'class'",
            TokenKind::Else => "'else'",
            TokenKind::False => "'false'",
            TokenKind::Fn => "'fn'",
            TokenKind::For => "'for'",
            TokenKind::If => "'if'",
            TokenKind::Let => "'let'",
            TokenKind::Nil => "'nil'",
            TokenKind::Or => "'or'",
            TokenKind::Print => "'print'",
            TokenKind::Return => "'return'",
            TokenKind::Super => "'super'",
            TokenKind::This => "'this'",
            TokenKind::True => "'true'",
            TokenKind::While => "'while'",
            TokenKind::Eq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::LtEq => "'<='",
            TokenKind::GtEq => "'>='",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Semicolon => "';'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::OpenBrace => "'{'",
            TokenKind::CloseBrace => "'}'",
            TokenKind::Assign => "'='",
            TokenKind::Bang => "'!'",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::Add => "'+'",
            TokenKind::Sub => "'-'",
            TokenKind::Mul => "'*'",
            TokenKind::Div => "'/'",
            TokenKind::Number => "number",
            TokenKind::Str => "string",
            TokenKind::Ident => "identifier",
            TokenKind::Eof => "end of input",
            TokenKind::Error(_) => "invalid token",
        };
        f.write_str(text)
    }
}

/// Diagnostic carried by a [`TokenKind::Error`] token.
///
/// The `Display` impl is the human-readable message the compiler surfaces,
/// tied to the token's line.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorKind {
    #[error("Unexpected character.")]
    UnexpectedCharacter,
    #[error("Unterminated string.")]
    UnterminatedString,
}

/// Parsed token.
///
/// Holds a non-owning view into the source buffer (`range`) rather than a
/// copy of the lexeme, and the 1-based line the token began on. Valid only as
/// long as the originating source buffer is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: TextRange,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, range: TextRange, line: u32) -> Token {
        Token { kind, range, line }
    }

    /// Resolves the token's text against the buffer it was scanned from.
    pub fn lexeme<'src>(&self, source: &'src str) -> &'src str {
        &source[self.range]
    }
}
