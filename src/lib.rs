// synapse: front end for a small C-like language
//
// source bytes -> lexer_tokenizer -> parser -> semantic -> (AST dump | diagnostics)

pub mod ast;
pub mod ast_printer;
pub mod lexer_tokenizer;
pub mod parser;
pub mod pipeline;
pub mod semantic;

pub use pipeline::{Compilation, compile, compile_str};
