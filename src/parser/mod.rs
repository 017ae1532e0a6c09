pub mod parser_error;
pub mod parser_expression;
pub mod parser_kernel;
pub mod parser_statement;

pub use parser_error::{ErrorKind, ParseError, ParseResult, Severity};
pub use parser_kernel::{MAX_NESTING, Parser};

use crate::ast::Program;
use crate::lexer_tokenizer::Token;

pub fn parse(tokens: &[Token]) -> ParseResult<Program> {
    Parser::new(tokens).parse_program()
}
