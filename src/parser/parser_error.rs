//parse errors are collected, never thrown,
//the parser keeps going and the driver prints the whole vector at the end

use crate::ast::Position;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{pos}] {message}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub code: &'static str,
    pub message: String,
    pub pos: Position,
    pub suggestion: Option<String>,
    pub severity: Severity,
}

impl ParseError {
    pub fn new(
        kind: ErrorKind,
        code: &'static str,
        message: impl Into<String>,
        pos: Position,
        severity: Severity,
    ) -> Self {
        ParseError {
            kind,
            code,
            message: message.into(),
            pos,
            suggestion: None,
            severity,
        }
    }

    pub fn syntax(code: &'static str, message: impl Into<String>, pos: Position) -> Self {
        Self::new(ErrorKind::Syntax, code, message, pos, Severity::Error)
    }

    // missing punctuation, tolerated but worth telling about
    pub fn missing(code: &'static str, message: impl Into<String>, pos: Position) -> Self {
        Self::new(ErrorKind::Syntax, code, message, pos, Severity::Warning)
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[derive(Debug, Clone)]
pub struct ParseResult<T> {
    pub result: T,
    pub errors: Vec<ParseError>,
}

impl<T> ParseResult<T> {
    pub fn with_errors(result: T, errors: Vec<ParseError>) -> Self {
        ParseResult { result, errors }
    }

    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(ParseError::is_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_has_position_prefix() {
        let err = ParseError::missing("SYN-010", "expected ';' after expression", Position::new(3, 7));
        assert_eq!(err.to_string(), "[3:7] expected ';' after expression");
        assert!(!err.is_error());
    }

    #[test]
    fn warnings_do_not_count_as_errors() {
        let result = ParseResult::with_errors(
            (),
            vec![ParseError::missing("SYN-010", "expected ';'", Position::new(1, 1))],
        );
        assert!(!result.has_errors());
        let result = ParseResult::with_errors(
            (),
            vec![ParseError::syntax("SYN-001", "unexpected token", Position::new(1, 1))],
        );
        assert!(result.has_errors());
    }
}
