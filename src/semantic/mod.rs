pub mod semantic_analysis;
pub mod semantic_error;

pub use semantic_analysis::{SemanticAnalyzer, SemanticResult, analyze};
pub use semantic_error::{SemanticError, SemanticErrorKind};
