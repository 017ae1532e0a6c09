//text renderings of the front end's output:
//the indented tree dump, a token listing, and the tree printed back as source

use crate::ast::*;
use crate::lexer_tokenizer::Token;
use std::fmt::Write;

const INDENT: &str = "  ";

/// One line per node, two spaces per level. The format is stable: golden
/// tests compare against it.
pub fn dump(program: &Program) -> String {
    let mut out = String::new();
    line(&mut out, 0, "Program");
    for function in &program.decls {
        line(
            &mut out,
            1,
            &format!("FunctionDecl {} : {}", function.name, function.return_type),
        );
        dump_block(&mut out, 2, &function.body);
    }
    out
}

fn line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}

fn dump_block(out: &mut String, depth: usize, block: &Block) {
    line(out, depth, "BlockStmt");
    for statement in &block.statements {
        dump_statement(out, depth + 1, statement);
    }
}

fn dump_statement(out: &mut String, depth: usize, statement: &Statement) {
    match statement {
        Statement::VarDecl {
            name,
            var_type,
            init,
            ..
        } => {
            line(out, depth, &format!("VarDecl {} : {}", name, var_type));
            if let Some(init) = init {
                dump_expr(out, depth + 1, init);
            }
        }
        Statement::Return { value, .. } => {
            line(out, depth, "ReturnStmt");
            if let Some(value) = value {
                dump_expr(out, depth + 1, value);
            }
        }
        Statement::Expr { expr, .. } => {
            line(out, depth, "ExprStmt");
            dump_expr(out, depth + 1, expr);
        }
        Statement::Block(block) => dump_block(out, depth, block),
    }
}

fn dump_expr(out: &mut String, depth: usize, expr: &Expr) {
    match expr {
        Expr::Binary {
            op, left, right, ..
        } => {
            line(out, depth, &format!("BinaryExpr {}", op));
            dump_expr(out, depth + 1, left);
            dump_expr(out, depth + 1, right);
        }
        Expr::Identifier { name, .. } => line(out, depth, &format!("Identifier {}", name)),
        Expr::Literal { value, .. } => line(out, depth, &format!("Literal {}", value)),
    }
}

// line:column, kind and lexeme separated by tabs, one token per line
pub fn dump_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        // writing into a String cannot fail
        let _ = writeln!(
            out,
            "{}:{}\t{}\t{}",
            token.line,
            token.column,
            token.kind.name(),
            token.lexeme
        );
    }
    out
}

/// Prints the tree back as source text that parses to the same tree.
/// Parentheses are only added where precedence or left-associativity needs them.
pub fn to_source(program: &Program) -> String {
    let mut out = String::new();
    for (i, function) in program.decls.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{} {}() ", function.return_type, function.name));
        source_block(&mut out, 0, &function.body);
        out.push('\n');
    }
    out
}

fn source_block(out: &mut String, depth: usize, block: &Block) {
    out.push_str("{\n");
    for statement in &block.statements {
        source_statement(out, depth + 1, statement);
    }
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push('}');
}

fn source_statement(out: &mut String, depth: usize, statement: &Statement) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    match statement {
        Statement::VarDecl {
            name,
            var_type,
            init,
            ..
        } => {
            out.push_str(&format!("{} {}", var_type, name));
            if let Some(init) = init {
                out.push_str(" = ");
                out.push_str(&source_expr(init));
            }
            out.push(';');
        }
        Statement::Return { value, .. } => {
            out.push_str("return");
            if let Some(value) = value {
                out.push(' ');
                out.push_str(&source_expr(value));
            }
            out.push(';');
        }
        Statement::Expr { expr, .. } => {
            out.push_str(&source_expr(expr));
            out.push(';');
        }
        Statement::Block(block) => source_block(out, depth, block),
    }
    out.push('\n');
}

fn source_expr(expr: &Expr) -> String {
    match expr {
        Expr::Binary {
            op, left, right, ..
        } => {
            let prec = op.precedence();
            let left = operand(left, |p| p < prec);
            let right = operand(right, |p| p <= prec);
            format!("{} {} {}", left, op, right)
        }
        Expr::Identifier { name, .. } => name.clone(),
        Expr::Literal { value, .. } => value.clone(),
    }
}

fn operand(expr: &Expr, needs_parens: impl Fn(u8) -> bool) -> String {
    match expr {
        Expr::Binary { op, .. } if needs_parens(op.precedence()) => {
            format!("({})", source_expr(expr))
        }
        _ => source_expr(expr),
    }
}
