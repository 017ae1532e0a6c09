//semantic analysis errors

use crate::ast::Position;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticErrorKind {
    Redefinition,
    Undeclared,
    TypeMismatch,
}

impl SemanticErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            SemanticErrorKind::Redefinition => "SEM-001",
            SemanticErrorKind::Undeclared => "SEM-002",
            SemanticErrorKind::TypeMismatch => "SEM-003",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{pos}] {message}")]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub message: String,
    pub pos: Position,
}

impl SemanticError {
    pub fn new(kind: SemanticErrorKind, message: impl Into<String>, pos: Position) -> Self {
        Self {
            kind,
            message: message.into(),
            pos,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}
