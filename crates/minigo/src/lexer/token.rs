//! Token definitions

use crate::common::{Position, Span};
use logos::{FilterResult, Logos};
use std::fmt;

/// Token with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub pos: Position,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, pos: Position) -> Self {
        Self { kind, span, pos }
    }
}

/// Reasons the scanner can reject input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    #[default]
    InvalidCharacter,
    UnterminatedString,
    UnterminatedRawString,
    UnterminatedChar,
    EmptyChar,
    InvalidEscape,
    UnterminatedComment,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            LexErrorKind::InvalidCharacter => "unexpected character",
            LexErrorKind::UnterminatedString => "unterminated string literal",
            LexErrorKind::UnterminatedRawString => "unterminated raw string literal",
            LexErrorKind::UnterminatedChar => "unterminated character literal",
            LexErrorKind::EmptyChar => "empty character literal",
            LexErrorKind::InvalidEscape => "invalid escape sequence",
            LexErrorKind::UnterminatedComment => "unterminated block comment",
        };
        f.write_str(text)
    }
}

/// All token kinds of the language subset
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\n\r\f]+")]  // Skip whitespace
#[logos(skip r"//[^\n]*")]      // Skip line comments
pub enum TokenKind {
    // === Keywords ===
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("var")]
    Var,
    #[token("const")]
    Const,
    #[token("type")]
    Type,
    #[token("func")]
    Func,
    #[token("struct")]
    Struct,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("return")]
    Return,
    #[token("continue")]
    Continue,
    #[token("goto")]
    Goto,
    #[token("new")]
    New,
    #[token("delete")]
    Delete,
    #[token("panic")]
    Panic,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // === Identifiers ===
    #[regex(r"[_\p{L}][_\p{L}\p{Nd}]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // === Literals ===
    // Integer literals keep their whole spelling, malformed digits included;
    // the parser decodes the radix and rejects bad ones.
    #[regex(r"[0-9][0-9a-zA-Z_]*", |lex| lex.slice().to_string())]
    IntLiteral(String),

    /// Character literal, escapes already decoded
    #[token("'", lex_char)]
    CharLiteral(char),

    /// Interpreted or raw string literal, escapes already decoded
    #[token("\"", lex_string)]
    #[token("`", lex_raw_string)]
    StringLiteral(String),

    // === Operators ===
    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // Increment/Decrement
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,

    // Comparison
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,

    // Logical
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,

    // Bitwise
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("&^")]
    AmpCaret,

    // Channel receive
    #[token("<-")]
    Arrow,

    // Assignment
    #[token("=")]
    Eq,
    #[token(":=")]
    ColonEq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("<<=")]
    LtLtEq,
    #[token(">>=")]
    GtGtEq,
    #[token("&^=")]
    AmpCaretEq,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,

    /// Block comment; its callback always skips or fails, so it is never emitted
    #[token("/*", lex_block_comment)]
    BlockComment,

    // Special
    Eof,
}

fn lex_block_comment(lex: &mut logos::Lexer<'_, TokenKind>) -> FilterResult<(), LexErrorKind> {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(rest.len());
            FilterResult::Error(LexErrorKind::UnterminatedComment)
        }
    }
}

fn lex_string(lex: &mut logos::Lexer<'_, TokenKind>) -> Result<String, LexErrorKind> {
    let rest = lex.remainder();
    let mut value = String::new();
    let mut chars = rest.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '"' => {
                lex.bump(offset + 1);
                return Ok(value);
            }
            '\n' => {
                lex.bump(offset);
                return Err(LexErrorKind::UnterminatedString);
            }
            '\\' => match decode_escape(&mut chars, '"') {
                Some(decoded) => value.push(decoded),
                None => {
                    let consumed = chars.peek().map_or(rest.len(), |&(at, _)| at);
                    lex.bump(consumed);
                    return Err(LexErrorKind::InvalidEscape);
                }
            },
            _ => value.push(c),
        }
    }

    lex.bump(rest.len());
    Err(LexErrorKind::UnterminatedString)
}

fn lex_raw_string(lex: &mut logos::Lexer<'_, TokenKind>) -> Result<String, LexErrorKind> {
    let rest = lex.remainder();
    match rest.find('`') {
        Some(end) => {
            // Carriage returns are dropped from raw strings
            let value = rest[..end].chars().filter(|&c| c != '\r').collect();
            lex.bump(end + 1);
            Ok(value)
        }
        None => {
            lex.bump(rest.len());
            Err(LexErrorKind::UnterminatedRawString)
        }
    }
}

fn lex_char(lex: &mut logos::Lexer<'_, TokenKind>) -> Result<char, LexErrorKind> {
    let rest = lex.remainder();
    let mut chars = rest.char_indices().peekable();

    let value = match chars.next() {
        None | Some((_, '\n')) => return Err(LexErrorKind::UnterminatedChar),
        Some((_, '\'')) => {
            lex.bump(1);
            return Err(LexErrorKind::EmptyChar);
        }
        Some((_, '\\')) => match decode_escape(&mut chars, '\'') {
            Some(decoded) => decoded,
            None => {
                let consumed = chars.peek().map_or(rest.len(), |&(at, _)| at);
                lex.bump(consumed);
                return Err(LexErrorKind::InvalidEscape);
            }
        },
        Some((_, c)) => c,
    };

    match chars.next() {
        Some((offset, '\'')) => {
            lex.bump(offset + 1);
            Ok(value)
        }
        Some((offset, _)) => {
            lex.bump(offset);
            Err(LexErrorKind::UnterminatedChar)
        }
        None => {
            lex.bump(rest.len());
            Err(LexErrorKind::UnterminatedChar)
        }
    }
}

/// Decode the escape sequence following a backslash.
///
/// `quote` is the delimiter of the enclosing literal; only that quote may be
/// escaped.
fn decode_escape<I>(chars: &mut std::iter::Peekable<I>, quote: char) -> Option<char>
where
    I: Iterator<Item = (usize, char)>,
{
    let (_, c) = chars.next()?;
    match c {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'a' => Some('\u{07}'),
        'b' => Some('\u{08}'),
        'f' => Some('\u{0C}'),
        'v' => Some('\u{0B}'),
        '\\' => Some('\\'),
        c if c == quote => Some(c),
        'x' => decode_digits(chars, 2, 16),
        'u' => decode_digits(chars, 4, 16),
        'U' => decode_digits(chars, 8, 16),
        '0'..='7' => {
            let first = c.to_digit(8)?;
            let rest = decode_digits(chars, 2, 8)? as u32;
            let value = first * 64 + rest;
            if value > 0xFF {
                return None;
            }
            char::from_u32(value)
        }
        _ => None,
    }
}

fn decode_digits<I>(chars: &mut std::iter::Peekable<I>, count: usize, radix: u32) -> Option<char>
where
    I: Iterator<Item = (usize, char)>,
{
    let mut value: u32 = 0;
    for _ in 0..count {
        let digit = chars.peek().and_then(|&(_, c)| c.to_digit(radix))?;
        chars.next();
        value = value.checked_mul(radix)?.checked_add(digit)?;
    }
    char::from_u32(value)
}

impl TokenKind {
    /// Check if this is a reserved word
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Package
                | TokenKind::Import
                | TokenKind::Var
                | TokenKind::Const
                | TokenKind::Type
                | TokenKind::Func
                | TokenKind::Struct
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::Return
                | TokenKind::Continue
                | TokenKind::Goto
                | TokenKind::New
                | TokenKind::Delete
                | TokenKind::Panic
                | TokenKind::True
                | TokenKind::False
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(s) => write!(f, "identifier '{}'", s),
            TokenKind::IntLiteral(s) => write!(f, "integer '{}'", s),
            TokenKind::CharLiteral(c) => write!(f, "char {:?}", c),
            TokenKind::StringLiteral(s) => write!(f, "string {:?}", s),
            TokenKind::Package => write!(f, "'package'"),
            TokenKind::Import => write!(f, "'import'"),
            TokenKind::Var => write!(f, "'var'"),
            TokenKind::Const => write!(f, "'const'"),
            TokenKind::Type => write!(f, "'type'"),
            TokenKind::Func => write!(f, "'func'"),
            TokenKind::Struct => write!(f, "'struct'"),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::For => write!(f, "'for'"),
            TokenKind::Return => write!(f, "'return'"),
            TokenKind::Continue => write!(f, "'continue'"),
            TokenKind::Goto => write!(f, "'goto'"),
            TokenKind::New => write!(f, "'new'"),
            TokenKind::Delete => write!(f, "'delete'"),
            TokenKind::Panic => write!(f, "'panic'"),
            TokenKind::True => write!(f, "'true'"),
            TokenKind::False => write!(f, "'false'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::PlusPlus => write!(f, "'++'"),
            TokenKind::MinusMinus => write!(f, "'--'"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::LtEq => write!(f, "'<='"),
            TokenKind::GtEq => write!(f, "'>='"),
            TokenKind::AmpAmp => write!(f, "'&&'"),
            TokenKind::PipePipe => write!(f, "'||'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Amp => write!(f, "'&'"),
            TokenKind::Pipe => write!(f, "'|'"),
            TokenKind::Caret => write!(f, "'^'"),
            TokenKind::LtLt => write!(f, "'<<'"),
            TokenKind::GtGt => write!(f, "'>>'"),
            TokenKind::AmpCaret => write!(f, "'&^'"),
            TokenKind::Arrow => write!(f, "'<-'"),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::ColonEq => write!(f, "':='"),
            TokenKind::PlusEq => write!(f, "'+='"),
            TokenKind::MinusEq => write!(f, "'-='"),
            TokenKind::StarEq => write!(f, "'*='"),
            TokenKind::SlashEq => write!(f, "'/='"),
            TokenKind::PercentEq => write!(f, "'%='"),
            TokenKind::AmpEq => write!(f, "'&='"),
            TokenKind::PipeEq => write!(f, "'|='"),
            TokenKind::CaretEq => write!(f, "'^='"),
            TokenKind::LtLtEq => write!(f, "'<<='"),
            TokenKind::GtGtEq => write!(f, "'>>='"),
            TokenKind::AmpCaretEq => write!(f, "'&^='"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::Semi => write!(f, "';'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::BlockComment => write!(f, "comment"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}
