//runs scanner -> parser -> semantic analysis over one translation unit
//and keeps every stage's output so the driver can print whichever it needs

use crate::ast::Program;
use crate::lexer_tokenizer::{Token, tokenize_bytes};
use crate::parser::{self, ParseError};
use crate::semantic::{SemanticAnalyzer, SemanticError};
use tracing::{debug, info_span};

#[derive(Debug, Clone)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub program: Program,
    pub syntax_errors: Vec<ParseError>,
    pub semantic_errors: Vec<SemanticError>,
}

impl Compilation {
    /// Warnings (tolerated missing punctuation) do not fail a compilation.
    pub fn succeeded(&self) -> bool {
        self.semantic_errors.is_empty() && !self.syntax_errors.iter().any(ParseError::is_error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ParseError> {
        self.syntax_errors.iter().filter(|e| !e.is_error())
    }

    pub fn errors(&self) -> impl Iterator<Item = &ParseError> {
        self.syntax_errors.iter().filter(|e| e.is_error())
    }
}

pub fn compile(source: &[u8]) -> Compilation {
    let _span = info_span!("compile", bytes = source.len()).entered();

    let tokens = tokenize_bytes(source);
    let parsed = parser::parse(&tokens);

    let mut analyzer = SemanticAnalyzer::new();
    let ok = analyzer.analyze(&parsed.result);
    debug!(
        ok,
        syntax = parsed.errors.len(),
        semantic = analyzer.diagnostics().len(),
        "compilation finished"
    );

    Compilation {
        tokens,
        program: parsed.result,
        syntax_errors: parsed.errors,
        semantic_errors: analyzer.into_diagnostics(),
    }
}

pub fn compile_str(source: &str) -> Compilation {
    compile(source.as_bytes())
}
