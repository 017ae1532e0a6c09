// End-to-end tests for the front end: source text in, dump or diagnostics out

use synapse::ast::{Expr, Statement};
use synapse::ast_printer::{dump, to_source};
use synapse::lexer_tokenizer::{Token, TokenKind, tokenize};
use synapse::parser::MAX_NESTING;
use synapse::semantic::SemanticErrorKind;
use synapse::{Compilation, compile_str};

fn compiled(source: &str) -> Compilation {
    let compilation = compile_str(source);
    assert!(
        compilation.syntax_errors.is_empty(),
        "unexpected syntax diagnostics: {:?}",
        compilation.syntax_errors
    );
    compilation
}

#[test]
fn test_return_zero() {
    let compilation = compiled("int main() { return 0; }");
    assert!(compilation.succeeded());
    let dumped = dump(&compilation.program);
    assert!(dumped.contains("FunctionDecl main : int"));
    assert!(dumped.contains("Literal 0"));
}

#[test]
fn test_initializer_precedence() {
    let compilation = compiled("int main() { int x = 1 + 2 * 3; return x; }");
    assert!(compilation.succeeded());
    let dumped = dump(&compilation.program);
    assert!(dumped.contains(
        "      VarDecl x : int\n\
         \x20       BinaryExpr +\n\
         \x20         Literal 1\n\
         \x20         BinaryExpr *\n"
    ));
}

#[test]
fn test_undeclared_identifier() {
    let compilation = compiled("int main() { return y; }");
    assert!(!compilation.succeeded());
    assert_eq!(compilation.semantic_errors.len(), 1);
    let error = &compilation.semantic_errors[0];
    assert_eq!(error.kind, SemanticErrorKind::Undeclared);
    assert!(error.message.contains("undeclared"));
    assert!(error.message.contains('y'));
}

#[test]
fn test_redefinition() {
    let compilation = compiled("int main() { int x = 1; int x = 2; return x; }");
    assert!(!compilation.succeeded());
    assert_eq!(compilation.semantic_errors.len(), 1);
    let error = &compilation.semantic_errors[0];
    assert_eq!(error.kind, SemanticErrorKind::Redefinition);
    assert!(error.message.contains("redefinition"));
    assert!(error.message.contains("'x'"));
}

#[test]
fn test_return_in_void_function() {
    let compilation = compiled("void f() { return 1; }");
    assert!(!compilation.succeeded());
    assert!(
        compilation.semantic_errors[0]
            .message
            .contains("return type mismatch")
    );
}

#[test]
fn test_string_initializer_for_int() {
    let compilation = compiled("int main() { int x = \"hi\"; return x; }");
    assert!(!compilation.succeeded());
    assert_eq!(compilation.semantic_errors.len(), 1);
    assert!(
        compilation.semantic_errors[0]
            .message
            .contains("type mismatch in initialization")
    );
}

#[test]
fn test_shadowing_restores_outer_binding() {
    let source = "
        int main() {
            int x = 1;
            {
                string x = \"inner\";
                string copy = x;
            }
            int back = x;
            return back;
        }
    ";
    let compilation = compiled(source);
    assert!(compilation.succeeded(), "{:?}", compilation.semantic_errors);
}

#[test]
fn test_redefinition_only_in_same_block() {
    let nested = compiled("int main() { int x = 1; { int x = 2; } return x; }");
    assert!(nested.succeeded());
    let same = compiled("int main() { int x = 1; { int y = 2; int y = 3; } return x; }");
    assert_eq!(same.semantic_errors.len(), 1);
}

#[test]
fn test_larger_well_typed_program() {
    let source = "
        // helpers
        int square() {
            int n = 7;
            return n * n;
        }

        float ratio() {
            float a = 1.5;
            float b = 2.25;
            return (a + b) / a - b;
        }

        string greet() {
            string hello = \"hello\";
            string world = \"world\";
            return hello + \" \" + world;
        }

        void noop() {
            int unused = 1 - 2 - 3;
            unused;
            return;
        }

        int main() {
            int total = 0;
            {
                int total = 10;
                total * 2;
            }
            return total;
        }
    ";
    let compilation = compiled(source);
    assert!(compilation.succeeded(), "{:?}", compilation.semantic_errors);
    assert_eq!(compilation.program.decls.len(), 5);
}

#[test]
fn test_errors_are_reported_in_source_order() {
    let source = "
        int main() {
            int a = b;
            string a = 1;
            return \"s\" + c;
        }
    ";
    let compilation = compiled(source);
    let lines: Vec<usize> = compilation
        .semantic_errors
        .iter()
        .map(|e| e.pos.line)
        .collect();
    let mut sorted = lines.clone();
    sorted.sort();
    assert_eq!(lines, sorted);
    let kinds: Vec<SemanticErrorKind> = compilation.semantic_errors.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        [
            SemanticErrorKind::Undeclared,
            SemanticErrorKind::Redefinition,
            SemanticErrorKind::TypeMismatch,
            SemanticErrorKind::TypeMismatch,
            SemanticErrorKind::TypeMismatch,
            SemanticErrorKind::Undeclared,
        ]
    );
}

#[test]
fn test_left_associativity_end_to_end() {
    let compilation = compiled("int main() { int a = 1; int b = 2; int c = 3; return a - b - c; }");
    let main = &compilation.program.decls[0];
    match main.body.statements.last() {
        Some(Statement::Return {
            value: Some(Expr::Binary { left, right, .. }),
            ..
        }) => {
            assert!(matches!(**left, Expr::Binary { .. }));
            assert!(matches!(**right, Expr::Identifier { ref name, .. } if name == "c"));
        }
        other => panic!("unexpected statement {other:?}"),
    }
}

#[test]
fn test_source_round_trip() {
    let source = "
        int main() {
            int x = (1 + 2) * (3 - (4 - 5)) / 6;
            { int y = x - 1 - 2; y * (x + y); }
            return x;
        }
        string s() { return \"a\" + \"b\"; }
    ";
    let first = compiled(source);
    let second = compiled(&to_source(&first.program));
    assert_eq!(dump(&first.program), dump(&second.program));
}

#[test]
fn test_token_stream_always_ends_with_eof() {
    for source in ["", "   \n\t", "int", "@@@", "\"open", "int main() { return 0; }"] {
        let tokens = tokenize(source);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof), "{source:?}");
    }
}

#[test]
fn test_syntax_errors_still_produce_a_tree() {
    let compilation = compile_str("int main() { int x = ; return x }");
    assert_eq!(compilation.program.decls.len(), 1);
    assert!(!compilation.succeeded());
    assert!(compilation.errors().count() >= 1);
    assert!(compilation.warnings().count() >= 1);
}

#[test]
fn test_missing_semicolon_only_warns() {
    let compilation = compile_str("int main() { int x = 1 return x; }");
    assert!(compilation.succeeded());
    assert_eq!(compilation.warnings().count(), 1);
}

#[test]
fn test_invalid_bytes_are_reported() {
    let compilation = synapse::compile(b"int main() { return 0 $ ; }");
    assert!(!compilation.succeeded());
    assert!(
        compilation
            .errors()
            .any(|e| e.message.contains("invalid character '$'"))
    );
}

#[test]
fn test_deep_nesting_is_reported_not_fatal() {
    let depth = 100_000;
    let parens = format!(
        "int main() {{ return {}1{}; }}",
        "(".repeat(depth),
        ")".repeat(depth)
    );
    let blocks = format!(
        "int main() {{ {}{} return 0; }}",
        "{".repeat(depth),
        "}".repeat(depth)
    );
    for source in [parens, blocks] {
        let compilation = compile_str(&source);
        assert!(!compilation.succeeded());
        let codes: Vec<&str> = compilation.errors().map(|e| e.code).collect();
        assert_eq!(codes, ["SYN-015"]);
        assert_eq!(compilation.warnings().count(), 0);
        assert!(compilation.semantic_errors.is_empty());
        assert!(dump(&compilation.program).starts_with("Program\n  FunctionDecl main : int\n"));
    }
}

#[test]
fn test_nesting_at_the_limit_compiles() {
    let source = format!(
        "int main() {{ {}{} int x = {}1{}; return x; }}",
        "{".repeat(MAX_NESTING),
        "}".repeat(MAX_NESTING),
        "(".repeat(MAX_NESTING),
        ")".repeat(MAX_NESTING)
    );
    let compilation = compiled(&source);
    assert!(compilation.succeeded(), "{:?}", compilation.semantic_errors);
}

#[test]
fn test_non_utf8_bytes_keep_their_value() {
    let source: &[u8] = b"int main() { return 0 \xff; }";
    let compilation = synapse::compile(source);
    let invalid: Vec<&Token> = compilation
        .tokens
        .iter()
        .filter(|t| t.is(TokenKind::Invalid))
        .collect();
    assert_eq!(invalid.len(), 1);
    assert_eq!(&source[invalid[0].span.clone()], b"\xff");
    assert!(
        compilation
            .errors()
            .any(|e| e.message == "invalid character '\\xFF'")
    );
}
