use ds_interpreter as ds;

use ds::ast::{Expr, Stmt};
use ds::ast_printer::AstPrinter;
use ds::diagnostics::Diagnostics;
use ds::parser::Parser;
use ds::scanner::scan;

/// Parse `source` and print each statement in prefix form, plus the
/// diagnostics it produced.
fn parse_to_strings(source: &str) -> (Vec<String>, Vec<String>) {
    let mut diagnostics = Diagnostics::quiet();
    let tokens = scan(source, &mut diagnostics);
    let statements = Parser::new(&tokens).parse(&mut diagnostics);

    let printed = statements.iter().map(AstPrinter::print_stmt).collect();
    (printed, diagnostics.messages().to_vec())
}

fn parse_ok(source: &str) -> Vec<String> {
    let (printed, errors) = parse_to_strings(source);
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    printed
}

fn expr_to_string(source: &str) -> String {
    let mut diagnostics = Diagnostics::quiet();
    let tokens = scan(source, &mut diagnostics);
    let expr = Parser::new(&tokens)
        .parse_expression(&mut diagnostics)
        .expect("expression parses");

    AstPrinter::print(&expr)
}

#[test]
fn precedence_of_arithmetic() {
    assert_eq!(expr_to_string("1 + 2 * 3"), "(+ 1.0 (* 2.0 3.0))");
    assert_eq!(expr_to_string("(1 + 2) * 3"), "(* (group (+ 1.0 2.0)) 3.0)");
    assert_eq!(expr_to_string("1 - 2 - 3"), "(- (- 1.0 2.0) 3.0)");
    assert_eq!(expr_to_string("-!x"), "(- (! x))");
}

#[test]
fn precedence_of_comparison_and_logic() {
    assert_eq!(
        expr_to_string("a or b and c == d < e"),
        "(or a (and b (== c (< d e))))"
    );
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(expr_to_string("a = b = 1"), "(= a (= b 1.0))");
}

#[test]
fn call_suffixes_chain() {
    assert_eq!(expr_to_string("f(1, g())(2)"), "(call (call f 1.0 (call g)) 2.0)");
}

#[test]
fn call_keeps_closing_paren() {
    let mut diagnostics = Diagnostics::quiet();
    let tokens = scan("f(\n1\n)", &mut diagnostics);
    let expr = Parser::new(&tokens).parse_expression(&mut diagnostics);

    match expr {
        Some(Expr::Call { paren, arguments, .. }) => {
            assert_eq!(paren.line, 3);
            assert_eq!(arguments.len(), 1);
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn declarations() {
    assert_eq!(
        parse_ok("const a = 1; mut b; mut c = \"s\";"),
        ["(const a 1.0)", "(mut b)", "(mut c s)"]
    );
}

#[test]
fn const_requires_initializer() {
    let (printed, errors) = parse_to_strings("const a;");

    assert!(printed.is_empty());
    assert_eq!(
        errors,
        ["[line 1] Error at ';': Expected '=' after constant name"]
    );
}

#[test]
fn control_flow_statements() {
    assert_eq!(
        parse_ok("if (a) print 1; else { print 2; } while (x) break;"),
        [
            "(if a (print 1.0) (block (print 2.0)))",
            "(while x (break))",
        ]
    );
}

#[test]
fn for_loop_desugars_into_while() {
    assert_eq!(
        parse_ok("for (mut i = 0; i < 3; i = i + 1) print i;"),
        ["(block (mut i 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"]
    );
}

#[test]
fn for_loop_defaults() {
    assert_eq!(
        parse_ok("for (;;) break;"),
        ["(block (while true (break)))"]
    );
}

#[test]
fn invalid_assignment_target() {
    let (_, errors) = parse_to_strings("1 + 2 = 3;");

    assert_eq!(
        errors,
        ["[line 1] Error at '=': Invalid assignment target"]
    );
}

#[test]
fn missing_expression_at_end() {
    let (_, errors) = parse_to_strings("mut x = ");

    assert_eq!(errors, ["[line 1] Error at end: Expected expression"]);
}

#[test]
fn recovers_and_reports_independent_errors() {
    let (printed, errors) = parse_to_strings("mut a = ;\nprint 1;\nconst = 2;\nprint 3;");

    assert_eq!(
        errors,
        [
            "[line 1] Error at ';': Expected expression",
            "[line 3] Error at '=': Expected constant name",
        ]
    );
    assert_eq!(printed, ["(print 1.0)", "(print 3.0)"]);
}

#[test]
fn errors_inside_block_do_not_drop_the_block() {
    let (printed, errors) = parse_to_strings("{ mut = 1; print 2; }");

    assert_eq!(errors.len(), 1);
    assert_eq!(printed, ["(block (print 2.0))"]);
}

#[test]
fn break_outside_loop_is_rejected() {
    let (_, errors) = parse_to_strings("break;\nif (true) { break; }");

    assert_eq!(
        errors,
        [
            "[line 1] Error at 'break': Can't use 'break' outside of a loop",
            "[line 2] Error at 'break': Can't use 'break' outside of a loop",
        ]
    );
}

#[test]
fn break_inside_nested_block_of_loop_is_fine() {
    let (_, errors) = parse_to_strings("while (true) { if (x) { break; } }");

    assert!(errors.is_empty());
}

#[test]
fn reserved_keywords_are_not_expressions() {
    let (printed, errors) = parse_to_strings("class;");

    assert!(printed.is_empty());
    assert_eq!(errors, ["[line 1] Error at 'class': Expected expression"]);
}

#[test]
fn parse_returns_borrowed_tokens() {
    let mut diagnostics = Diagnostics::quiet();
    let tokens = scan("mut answer = 42;", &mut diagnostics);
    let statements = Parser::new(&tokens).parse(&mut diagnostics);

    match &statements[..] {
        [Stmt::Mut { name, initializer: Some(_) }] => {
            assert_eq!(name.lexeme, "answer");
            assert!(std::ptr::eq(*name, &tokens[1]));
        }
        other => panic!("unexpected statements: {:?}", other),
    }
}

#[test]
fn too_many_arguments_is_reported_once_and_parsing_continues() {
    let arguments = vec!["0"; 257].join(", ");
    let source = format!("f({});\nprint 1;", arguments);

    let (printed, errors) = parse_to_strings(&source);

    assert_eq!(
        errors,
        ["[line 1] Error at '0': Cannot have more than 255 arguments"]
    );
    assert_eq!(printed.len(), 2);
    assert_eq!(printed[1], "(print 1.0)");
}

#[test]
fn exactly_max_arguments_is_fine() {
    let arguments = vec!["0"; 255].join(", ");

    parse_ok(&format!("f({});", arguments));
}
