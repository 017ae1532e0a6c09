//AST (abstract syntax tree) is what the tokens turn into after parsing
//every node keeps the line/column of the token that defined it,
//the tree is owned top-down and never changes after the parser returns it

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
    String,
    Void,
}

impl Type {
    /// Classifies the text of a literal: quoted text is a string, a number
    /// with a decimal point is a float, anything else (digits, or the empty
    /// fallback literal) is an int.
    pub fn of_literal(text: &str) -> Type {
        if text.starts_with('"') {
            Type::String
        } else if text.bytes().all(|b| b.is_ascii_digit()) {
            Type::Int
        } else if is_dotted_number(text) {
            Type::Float
        } else {
            Type::String
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::String => "string",
            Type::Void => "void",
        }
    }
}

fn is_dotted_number(text: &str) -> bool {
    match text.split_once('.') {
        Some((whole, frac)) => {
            !whole.is_empty()
                && !frac.is_empty()
                && whole.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub decls: Vec<FunctionDecl>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub return_type: Type,
    pub body: Block,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    VarDecl {
        name: String,
        var_type: Type,
        init: Option<Expr>,
        pos: Position,
    },
    Return {
        value: Option<Expr>,
        pos: Position,
    },
    Expr {
        expr: Expr,
        pos: Position,
    },
    Block(Block),
}

impl Statement {
    pub fn pos(&self) -> Position {
        match self {
            Statement::VarDecl { pos, .. }
            | Statement::Return { pos, .. }
            | Statement::Expr { pos, .. } => *pos,
            Statement::Block(block) => block.pos,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        op: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
        pos: Position,
    },
    Identifier {
        name: String,
        pos: Position,
    },
    Literal {
        value: String,
        lit_type: Type,
        pos: Position,
    },
}

impl Expr {
    pub fn pos(&self) -> Position {
        match self {
            Expr::Binary { pos, .. } | Expr::Identifier { pos, .. } | Expr::Literal { pos, .. } => {
                *pos
            }
        }
    }

    pub fn literal(value: impl Into<String>, pos: Position) -> Expr {
        let value = value.into();
        let lit_type = Type::of_literal(&value);
        Expr::Literal {
            value,
            lit_type,
            pos,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }

    // higher binds tighter
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Plus | Operator::Minus => 1,
            Operator::Multiply | Operator::Divide => 2,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_classification() {
        assert_eq!(Type::of_literal("42"), Type::Int);
        assert_eq!(Type::of_literal(""), Type::Int);
        assert_eq!(Type::of_literal("3.14"), Type::Float);
        assert_eq!(Type::of_literal("\"hi\""), Type::String);
        assert_eq!(Type::of_literal("\"12\""), Type::String);
        assert_eq!(Type::of_literal("1.2.3"), Type::String);
    }

    #[test]
    fn literal_constructor_sets_type() {
        let lit = Expr::literal("7", Position::new(1, 1));
        assert!(matches!(lit, Expr::Literal { lit_type: Type::Int, .. }));
    }
}
