//parser state and the token cursor,
//statement and expression rules live in the sibling files

use crate::ast::*;
use crate::lexer_tokenizer::{Token, TokenKind};
use crate::parser::parser_error::{ErrorKind, ParseError, ParseResult, Severity};
use tracing::debug;

// stands in for the end of a token slice that lost its Eof
static EOF: Token = Token {
    kind: TokenKind::Eof,
    lexeme: String::new(),
    line: 1,
    column: 1,
    span: 0..0,
};

// parens, nested blocks and operator chains all count one level;
// the tree walks after parsing recurse this deep
pub const MAX_NESTING: usize = 128;

pub struct Parser<'a> {
    pub tokens: &'a [Token],
    pub pos: usize,
    pub errors: Vec<ParseError>,
    depth: usize,
    depth_reported: bool,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            depth: 0,
            depth_reported: false,
        }
    }

    pub fn current(&self) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        tokens.get(self.pos).or(tokens.last()).unwrap_or(&EOF)
    }

    pub fn current_pos(&self) -> Position {
        let token = self.current();
        Position::new(token.line, token.column)
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    // the Eof token is never stepped over
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    pub fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    // consume `kind` or leave a warning and carry on without it
    pub fn expect_or_warn(&mut self, kind: TokenKind, code: &'static str, what: &str) -> bool {
        if self.match_token(kind) {
            return true;
        }
        let found = self.current();
        self.errors.push(ParseError::missing(
            code,
            format!("expected {} {}, found {}", lexeme_of(kind), what, describe(found)),
            Position::new(found.line, found.column),
        ));
        false
    }

    pub fn error(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    // false once MAX_NESTING is reached, reported once per outermost construct
    pub fn enter_nested(&mut self, pos: Position) -> bool {
        if self.depth < MAX_NESTING {
            self.depth += 1;
            return true;
        }
        if !self.depth_reported {
            self.depth_reported = true;
            self.error(
                ParseError::syntax(
                    "SYN-015",
                    format!("nesting deeper than {} levels", MAX_NESTING),
                    pos,
                )
                .with_suggestion("Split the expression or block into smaller pieces."),
            );
        }
        false
    }

    pub fn leave_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.depth_reported = false;
        }
    }

    // steps over `open` and everything up to its matching `close`
    pub fn skip_nested(&mut self, open: TokenKind, close: TokenKind) {
        let mut balance = 0usize;
        while !self.is_at_end() {
            let kind = self.advance().kind;
            if kind == open {
                balance += 1;
            } else if kind == close {
                if balance <= 1 {
                    break;
                }
                balance -= 1;
            }
        }
    }

    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut decls = Vec::new();

        while !self.is_at_end() {
            if !self.current().kind.is_type_keyword() {
                self.skip_to_declaration();
                continue;
            }
            let start_pos = self.pos;
            decls.push(self.parse_function());
            if self.pos == start_pos {
                self.advance();
            }
        }

        debug!(
            functions = decls.len(),
            diagnostics = self.errors.len(),
            "parsed program"
        );
        ParseResult::with_errors(
            Program {
                decls,
                pos: Position::new(1, 1),
            },
            std::mem::take(&mut self.errors),
        )
    }

    // one diagnostic for the whole run of junk between declarations
    fn skip_to_declaration(&mut self) {
        let first = self.current();
        let pos = Position::new(first.line, first.column);
        let error = if first.is(TokenKind::Invalid) {
            invalid_character(first)
        } else {
            ParseError::syntax(
                "SYN-001",
                format!("expected a function declaration, found {}", describe(first)),
                pos,
            )
            .with_suggestion("Top-level code must be a function like `int main() { ... }`.")
        };
        self.errors.push(error);
        while !self.is_at_end() && !self.current().kind.is_type_keyword() {
            self.advance();
        }
    }
}

pub fn invalid_character(token: &Token) -> ParseError {
    ParseError::new(
        ErrorKind::Lexical,
        "LEX-001",
        format!("invalid character '{}'", token.lexeme),
        Position::new(token.line, token.column),
        Severity::Error,
    )
}

pub fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => "end of input".to_string(),
        _ => format!("'{}'", token.lexeme),
    }
}

pub fn lexeme_of(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::LParen => "'('",
        TokenKind::RParen => "')'",
        TokenKind::LBrace => "'{'",
        TokenKind::RBrace => "'}'",
        TokenKind::Semicolon => "';'",
        TokenKind::Equal => "'='",
        _ => kind.name(),
    }
}
