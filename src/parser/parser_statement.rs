//parsing functions, blocks and statements and converting them to AST
//nothing here resynchronizes, a missing ';' or '}' is noted and parsing goes on

use crate::ast::*;
use crate::lexer_tokenizer::TokenKind;
use crate::parser::{
    parser_error::ParseError,
    parser_kernel::{Parser, describe},
};

impl<'a> Parser<'a> {
    pub fn parse_function(&mut self) -> FunctionDecl {
        let return_type = self.parse_type();
        let (name, pos) = self.parse_name("function");
        self.expect_or_warn(TokenKind::LParen, "SYN-012", "after the function name");
        if !self.check(TokenKind::RParen) && !self.check(TokenKind::LBrace) {
            let token = self.current();
            self.error(
                ParseError::syntax(
                    "SYN-005",
                    format!("unexpected {} in parameter list", describe(token)),
                    self.current_pos(),
                )
                .with_suggestion("Functions take no parameters: write `()`."),
            );
            while !self.is_at_end()
                && !self.check(TokenKind::RParen)
                && !self.check(TokenKind::LBrace)
            {
                self.advance();
            }
        }
        self.expect_or_warn(TokenKind::RParen, "SYN-011", "after the parameter list");
        let body = self.parse_block();
        FunctionDecl {
            name,
            return_type,
            body,
            pos,
        }
    }

    pub fn parse_block(&mut self) -> Block {
        let pos = self.current_pos();
        self.expect_or_warn(TokenKind::LBrace, "SYN-013", "to open the block");
        let mut statements = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let start_pos = self.pos;
            statements.push(self.parse_statement());
            if self.pos == start_pos {
                self.advance();
            }
        }
        self.expect_or_warn(TokenKind::RBrace, "SYN-014", "to close the block");
        Block { statements, pos }
    }

    pub fn parse_statement(&mut self) -> Statement {
        let kind = self.current().kind;
        match kind {
            _ if kind.is_type_keyword() => self.parse_var_decl(),
            TokenKind::KwReturn => self.parse_return(),
            TokenKind::LBrace => {
                let pos = self.current_pos();
                if !self.enter_nested(pos) {
                    self.skip_nested(TokenKind::LBrace, TokenKind::RBrace);
                    return Statement::Block(Block {
                        statements: Vec::new(),
                        pos,
                    });
                }
                let block = self.parse_block();
                self.leave_nested();
                Statement::Block(block)
            }
            _ => self.parse_expr_statement(),
        }
    }

    fn parse_var_decl(&mut self) -> Statement {
        let var_type = self.parse_type();
        let (name, pos) = self.parse_name("variable");
        let init = if self.match_token(TokenKind::Equal) {
            Some(self.parse_expr())
        } else {
            None
        };
        self.expect_or_warn(TokenKind::Semicolon, "SYN-010", "after the declaration");
        Statement::VarDecl {
            name,
            var_type,
            init,
            pos,
        }
    }

    fn parse_return(&mut self) -> Statement {
        let keyword = self.advance();
        let pos = Position::new(keyword.line, keyword.column);
        let value = if self.check(TokenKind::Semicolon) || self.check(TokenKind::RBrace) {
            None
        } else {
            Some(self.parse_expr())
        };
        self.expect_or_warn(TokenKind::Semicolon, "SYN-010", "after the return statement");
        Statement::Return { value, pos }
    }

    fn parse_expr_statement(&mut self) -> Statement {
        let pos = self.current_pos();
        let start_pos = self.pos;
        let lone_invalid = self.check(TokenKind::Invalid);
        let expr = self.parse_expr();
        if lone_invalid && self.pos == start_pos + 1 {
            // the bad character is reported, a ';' right after it goes with it
            self.match_token(TokenKind::Semicolon);
        } else if self.pos != start_pos || self.check(TokenKind::Semicolon) {
            // a bad token that stopped us was reported already, no ';' warning for it
            self.expect_or_warn(TokenKind::Semicolon, "SYN-010", "after the expression");
        }
        Statement::Expr { expr, pos }
    }

    // callers only get here on a type keyword, anything else falls back to int
    fn parse_type(&mut self) -> Type {
        let token = self.advance();
        match token.kind {
            TokenKind::KwInt => Type::Int,
            TokenKind::KwFloat => Type::Float,
            TokenKind::KwString => Type::String,
            TokenKind::KwVoid => Type::Void,
            _ => {
                self.error(ParseError::syntax(
                    "SYN-002",
                    format!("expected a type, found {}", describe(token)),
                    Position::new(token.line, token.column),
                ));
                Type::Int
            }
        }
    }

    fn parse_name(&mut self, what: &str) -> (String, Position) {
        let token = self.current();
        let pos = Position::new(token.line, token.column);
        if self.match_token(TokenKind::Identifier) {
            return (token.lexeme.clone(), pos);
        }
        // a misplaced keyword is taken as the name so the rest still lines up
        let misplaced_keyword = token.kind.is_keyword();
        if misplaced_keyword {
            self.advance();
        }
        let mut error = ParseError::syntax(
            "SYN-003",
            format!("expected {} name, found {}", what, describe(token)),
            pos,
        );
        if misplaced_keyword {
            error = error.with_suggestion(format!(
                "'{}' is a reserved word and cannot be used as a name.",
                token.lexeme
            ));
        }
        self.error(error);
        (String::new(), pos)
    }
}
