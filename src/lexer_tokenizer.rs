//lexical analysis,
//it breaks the source down into tokens
//that are then parsed into the AST
//logos does the matching, we only track line/column and the odd error

use logos::Logos;
use std::ops::Range;
use tracing::debug;

#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // Types
    #[token("int")]
    KwInt,
    #[token("float")]
    KwFloat,
    #[token("string")]
    KwString,
    #[token("void")]
    KwVoid,

    // Statements (if/while are reserved but never parsed)
    #[token("return")]
    KwReturn,
    #[token("if")]
    KwIf,
    #[token("while")]
    KwWhile,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Equal,

    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    //Whitespace, the C-locale set only
    #[regex(r"[ \t\n\r\x0B\x0C]+", logos::skip)]
    Whitespace,

    // Comments
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,

    // Names
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    // Integer and dotted values share one tag, the parser classifies them
    #[regex("[0-9]+")]
    #[regex(r"[0-9]+\.[0-9]+")]
    Number,

    // Strings, quotes stay in the lexeme
    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    StringLiteral,

    Eof,
    Invalid,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::KwInt => "KW_INT",
            TokenKind::KwFloat => "KW_FLOAT",
            TokenKind::KwString => "KW_STRING",
            TokenKind::KwVoid => "KW_VOID",
            TokenKind::KwReturn => "KW_RETURN",
            TokenKind::KwIf => "KW_IF",
            TokenKind::KwWhile => "KW_WHILE",
            TokenKind::LParen => "LEFT_PAREN",
            TokenKind::RParen => "RIGHT_PAREN",
            TokenKind::LBrace => "LEFT_BRACE",
            TokenKind::RBrace => "RIGHT_BRACE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Equal => "EQUAL",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Comment => "COMMENT",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::StringLiteral => "STRING",
            TokenKind::Eof => "END_OF_FILE",
            TokenKind::Invalid => "INVALID",
        }
    }

    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::KwInt | TokenKind::KwFloat | TokenKind::KwString | TokenKind::KwVoid
        )
    }

    pub fn is_keyword(self) -> bool {
        self.is_type_keyword()
            || matches!(self, TokenKind::KwReturn | TokenKind::KwIf | TokenKind::KwWhile)
    }
}

// Token with its text, where it starts and its byte range in source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    pub span: Range<usize>,
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

// walks forward through the input keeping line/column and the byte offset
// into the original bytes
struct Cursor {
    offset: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
    // a // comment is still open at the end of the last scanned text
    in_comment: bool,
}

impl Cursor {
    fn new() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            in_comment: false,
        }
    }

    fn step(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset += text.len();
    }

    fn push(&mut self, kind: TokenKind, lexeme: String, width: usize) {
        self.tokens.push(Token {
            kind,
            lexeme,
            line: self.line,
            column: self.column,
            span: self.offset..self.offset + width,
        });
    }

    // runs logos over a stretch of valid text
    fn scan(&mut self, text: &str) {
        let text = if self.in_comment {
            let Some(newline) = text.find('\n') else {
                self.step(text);
                return;
            };
            self.step(&text[..newline]);
            self.in_comment = false;
            &text[newline..]
        } else {
            text
        };
        let mut last = 0;
        let mut base = 0;

        'restart: loop {
            let mut lexer = TokenKind::lexer(&text[base..]);
            while let Some(result) = lexer.next() {
                let span = lexer.span();
                let (start, mut end) = (base + span.start, base + span.end);
                let kind = match result {
                    Ok(kind) => kind,
                    Err(()) => {
                        // an error token covers exactly one character
                        let width = text[start..].chars().next().map_or(1, char::len_utf8);
                        end = start + width;
                        TokenKind::Invalid
                    }
                };
                self.step(&text[last..start]);
                self.push(kind, text[start..end].to_string(), end - start);
                self.step(&text[start..end]);
                last = end;
                if base + span.end != end {
                    base = end;
                    continue 'restart;
                }
            }
            break;
        }
        // only whitespace and comments are left after the last token
        let tail = &text[last..];
        self.in_comment = tail.rfind("//").is_some_and(|at| !tail[at..].contains('\n'));
        self.step(tail);
    }

    // a byte that is not UTF-8 is one invalid character, unless a comment hides it
    fn raw_byte(&mut self, byte: u8) {
        if !self.in_comment {
            self.push(TokenKind::Invalid, format!("\\x{byte:02X}"), 1);
        }
        self.offset += 1;
        self.column += 1;
    }

    fn finish(mut self) -> Vec<Token> {
        self.push(TokenKind::Eof, String::new(), 0);
        debug!(tokens = self.tokens.len(), bytes = self.offset, "scanned source");
        self.tokens
    }
}

// Lexing function, never fails, always ends with Eof
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut cursor = Cursor::new();
    cursor.scan(source);
    cursor.finish()
}

// spans index the given bytes; an undecodable byte is an invalid token
// whose lexeme spells it as \xNN
pub fn tokenize_bytes(bytes: &[u8]) -> Vec<Token> {
    let mut cursor = Cursor::new();
    for chunk in bytes.utf8_chunks() {
        cursor.scan(chunk.valid());
        for &byte in chunk.invalid() {
            cursor.raw_byte(byte);
        }
    }
    cursor.finish()
}
