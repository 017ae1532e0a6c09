//parsing expressions (literals, names, binary op...)
//precedence climbing over the four arithmetic operators, all left-associative

use crate::ast::{Expr, Operator, Position};
use crate::lexer_tokenizer::TokenKind;
use crate::parser::{
    parser_error::ParseError,
    parser_kernel::{Parser, describe, invalid_character},
};

impl<'a> Parser<'a> {
    pub fn parse_expr(&mut self) -> Expr {
        self.parse_binary_op(1)
    }

    fn parse_binary_op(&mut self, min_precedence: u8) -> Expr {
        let mut result = self.parse_term();
        let mut levels = 0;

        while let Some(op) = token_to_operator(self.current().kind) {
            let prec = op.precedence();
            if prec < min_precedence {
                break;
            }
            let token = self.advance();
            let pos = Position::new(token.line, token.column);
            let nested = self.enter_nested(pos);
            // left-associative: the right side only takes tighter operators
            let right = self.parse_binary_op(prec + 1);
            // past the nesting limit the operand is parsed and dropped
            if nested {
                levels += 1;
                result = Expr::Binary {
                    op,
                    left: Box::new(result),
                    right: Box::new(right),
                    pos,
                };
            }
        }
        for _ in 0..levels {
            self.leave_nested();
        }
        result
    }

    pub fn parse_term(&mut self) -> Expr {
        let token = self.current();
        let pos = Position::new(token.line, token.column);
        match token.kind {
            TokenKind::Number | TokenKind::StringLiteral => {
                self.advance();
                Expr::literal(token.lexeme.as_str(), pos)
            }
            TokenKind::Identifier => {
                self.advance();
                Expr::Identifier {
                    name: token.lexeme.clone(),
                    pos,
                }
            }
            TokenKind::LParen => {
                if !self.enter_nested(pos) {
                    self.skip_nested(TokenKind::LParen, TokenKind::RParen);
                    return Expr::literal("", pos);
                }
                self.advance();
                let inner = self.parse_expr();
                self.expect_or_warn(TokenKind::RParen, "SYN-011", "to close the parenthesis");
                self.leave_nested();
                inner
            }
            TokenKind::Invalid => {
                self.advance();
                self.error(invalid_character(token));
                Expr::literal("", pos)
            }
            _ => {
                let error = match token.kind {
                    TokenKind::KwIf | TokenKind::KwWhile => ParseError::syntax(
                        "SYN-004",
                        format!("unexpected keyword {} in expression", describe(token)),
                        pos,
                    )
                    .with_suggestion("Conditionals and loops are not supported yet."),
                    _ => ParseError::syntax(
                        "SYN-004",
                        format!("unexpected token {} in expression", describe(token)),
                        pos,
                    )
                    .with_suggestion(
                        "Expected a number, string, identifier, or parenthesized expression.",
                    ),
                };
                self.error(error);
                // keep the tree shape, the token is left for the caller
                Expr::literal("", pos)
            }
        }
    }
}

fn token_to_operator(kind: TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Plus => Some(Operator::Plus),
        TokenKind::Minus => Some(Operator::Minus),
        TokenKind::Star => Some(Operator::Multiply),
        TokenKind::Slash => Some(Operator::Divide),
        _ => None,
    }
}
