//semantic analysis,
//it walks the AST with a stack of scopes,
//checks that every name is declared before use and declared once per scope,
//and that initializers, returns and binary operands agree on their types

use crate::ast::*;
use crate::semantic::semantic_error::{SemanticError, SemanticErrorKind};
use rustc_hash::{FxHashMap, FxHashSet};
use std::io::{self, Write};
use tracing::{debug, trace};

type Scope = FxHashMap<String, Type>;

pub struct SemanticResult {
    pub ok: bool,
    pub errors: Vec<SemanticError>,
}

#[derive(Default)]
pub struct SemanticAnalyzer {
    scopes: Vec<Scope>,
    functions: FxHashSet<String>,
    current_return: Option<Type>,
    diagnostics: Vec<SemanticError>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the full traversal and returns `true` when no diagnostic was
    /// raised. Diagnostics from a previous run are discarded.
    pub fn analyze(&mut self, program: &Program) -> bool {
        self.scopes.clear();
        self.functions.clear();
        self.diagnostics.clear();

        self.push_scope();
        for function in &program.decls {
            self.analyze_function(function);
        }
        self.pop_scope();

        // operands are checked before their operator, put that back in source order
        self.diagnostics.sort_by_key(|d| d.pos);
        debug!(
            functions = program.decls.len(),
            diagnostics = self.diagnostics.len(),
            "semantic analysis finished"
        );
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[SemanticError] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<SemanticError> {
        self.diagnostics
    }

    /// Writes one `[line:column] message` line per diagnostic.
    pub fn emit<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        for diagnostic in &self.diagnostics {
            writeln!(sink, "{}", diagnostic)?;
        }
        Ok(())
    }

    fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
        trace!(depth = self.scopes.len(), "push scope");
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
        trace!(depth = self.scopes.len(), "pop scope");
    }

    fn report(&mut self, kind: SemanticErrorKind, message: String, pos: Position) {
        trace!(code = kind.code(), %pos, %message, "diagnostic");
        self.diagnostics.push(SemanticError::new(kind, message, pos));
    }

    fn lookup(&self, name: &str) -> Option<Type> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }

    // first binding wins, a second one in the same scope is only reported
    fn declare(&mut self, name: &str, ty: Type, pos: Position) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        if scope.contains_key(name) {
            self.report(
                SemanticErrorKind::Redefinition,
                format!("redefinition of variable '{}'", name),
                pos,
            );
        } else {
            scope.insert(name.to_string(), ty);
        }
    }

    fn analyze_function(&mut self, function: &FunctionDecl) {
        if !self.functions.insert(function.name.clone()) {
            self.report(
                SemanticErrorKind::Redefinition,
                format!("redefinition of function '{}'", function.name),
                function.pos,
            );
        }
        self.current_return = Some(function.return_type);
        self.push_scope();
        self.analyze_block(&function.body);
        self.pop_scope();
        self.current_return = None;
    }

    fn analyze_block(&mut self, block: &Block) {
        self.push_scope();
        for statement in &block.statements {
            self.analyze_statement(statement);
        }
        self.pop_scope();
    }

    fn analyze_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::VarDecl {
                name,
                var_type,
                init,
                pos,
            } => {
                self.declare(name, *var_type, *pos);
                if let Some(init) = init {
                    let init_type = self.analyze_expr(init);
                    if init_type != *var_type {
                        self.report(
                            SemanticErrorKind::TypeMismatch,
                            format!(
                                "type mismatch in initialization of '{}': expected {}, found {}",
                                name, var_type, init_type
                            ),
                            init.pos(),
                        );
                    }
                }
            }
            Statement::Return { value, pos } => {
                let value_type = match value {
                    Some(expr) => self.analyze_expr(expr),
                    None => Type::Void,
                };
                let expected = self.current_return.unwrap_or(Type::Void);
                if value_type != expected {
                    self.report(
                        SemanticErrorKind::TypeMismatch,
                        format!(
                            "return type mismatch: expected {}, found {}",
                            expected, value_type
                        ),
                        *pos,
                    );
                }
            }
            Statement::Expr { expr, .. } => {
                self.analyze_expr(expr);
            }
            Statement::Block(block) => self.analyze_block(block),
        }
    }

    fn analyze_expr(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::Literal { lit_type, .. } => *lit_type,
            Expr::Identifier { name, pos } => match self.lookup(name) {
                Some(ty) => ty,
                None => {
                    self.report(
                        SemanticErrorKind::Undeclared,
                        format!("use of undeclared identifier '{}'", name),
                        *pos,
                    );
                    Type::Int
                }
            },
            Expr::Binary {
                op,
                left,
                right,
                pos,
            } => {
                let left_type = self.analyze_expr(left);
                let right_type = self.analyze_expr(right);
                if left_type != right_type {
                    self.report(
                        SemanticErrorKind::TypeMismatch,
                        format!(
                            "type mismatch in binary expression: {} {} {}",
                            left_type, op, right_type
                        ),
                        *pos,
                    );
                }
                left_type
            }
        }
    }
}

pub fn analyze(program: &Program) -> SemanticResult {
    let mut analyzer = SemanticAnalyzer::new();
    let ok = analyzer.analyze(program);
    SemanticResult {
        ok,
        errors: analyzer.into_diagnostics(),
    }
}
