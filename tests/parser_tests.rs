// tests/parser_tests.rs
//! Parser tests over the sample programs
//!
//! Each sample in `test_scripts/` exercises one area of the language; these
//! tests check that the whole program parses and that the expected
//! constructs made it into the tree.

mod test_harness;

use as2js::{ErrorCode, Flag, Link, NodeType, Options};
use test_harness::{NodeCounter, TestHarness};

#[test]
fn test_hello_world() {
    let harness = TestHarness::new();
    let result = harness.load_and_parse("hello_world.js");

    result.assert_success();
    result.assert_bidirectional();

    let functions = result.functions();
    assert_eq!(functions.len(), 1);
    assert_eq!(result.name(functions[0]), "main");
    assert!(result.program.tree.flag(functions[0], Flag::FunctionVoid).unwrap());
}

#[test]
fn test_expressions() {
    let harness = TestHarness::new();
    let result = harness.load_and_parse("expressions.js");

    result.assert_success();
    result.assert_bidirectional();

    let counter = NodeCounter::new().count_program(&result.program);
    assert!(
        counter.binary_expr_count >= 20,
        "Should have many binary expressions, got {}",
        counter.binary_expr_count
    );
    assert!(counter.call_count >= 3, "Should have calls");
    assert_eq!(counter.function_count, 1, "One function expression");
    assert!(counter.variable_count >= 20);
}

#[test]
fn test_control_flow() {
    let harness = TestHarness::new();
    let result = harness.load_and_parse("control_flow.js");

    result.assert_success();
    result.assert_bidirectional();

    let counter = NodeCounter::new().count_program(&result.program);
    assert!(counter.if_count >= 4, "Should have if statements");
    assert!(counter.while_count >= 2, "Should have while and do loops");
    assert!(counter.for_count >= 4, "Should have for loops");
    assert_eq!(counter.switch_count, 1);
    assert_eq!(counter.try_count, 1);

    // the label is registered with the function that holds it
    let loops = result.functions()[1];
    assert_eq!(result.name(loops), "loops");
    assert!(result.program.tree.find_label(loops, "outer").unwrap().is_some());
}

#[test]
fn test_functions() {
    let harness = TestHarness::new();
    let result = harness.load_and_parse("functions.js");

    result.assert_success();
    result.assert_bidirectional();

    let names: Vec<&str> = result.functions().iter().map(|f| result.name(*f)).collect();
    assert_eq!(
        names,
        vec![
            "no_parameters",
            "typed",
            "variadic",
            "modifiers",
            "procedure",
            "never_returns",
            "->length",
            "<-length",
            "+",
            "<=>",
            "()",
            "declared_only",
        ]
    );

    let tree = &result.program.tree;
    let functions = result.functions();
    assert!(tree.flag(functions[3], Flag::FunctionOut).unwrap());
    assert!(tree.flag(functions[4], Flag::FunctionNoparams).unwrap());
    assert!(tree.flag(functions[5], Flag::FunctionNever).unwrap());
    for operator in &functions[8..11] {
        assert!(tree.flag(*operator, Flag::FunctionOperator).unwrap());
    }
    // no body
    assert_eq!(
        tree.find_first_child(functions[11], NodeType::DirectiveList).unwrap(),
        None
    );
}

#[test]
fn test_classes_and_packages() {
    let harness = TestHarness::new();
    let result = harness.load_and_parse("classes.js");

    result.assert_success();
    result.assert_bidirectional();

    let tree = &result.program.tree;
    let package = result.top_level(NodeType::Package)[0];
    assert_eq!(result.name(package), "com.example.shapes");

    let body = tree.find_first_child(package, NodeType::DirectiveList).unwrap().unwrap();
    let classes: Vec<_> = tree
        .children(body)
        .unwrap()
        .iter()
        .copied()
        .filter(|id| {
            matches!(
                tree.node_type(*id).unwrap(),
                NodeType::Class | NodeType::Interface
            )
        })
        .collect();
    assert_eq!(classes.len(), 3);

    let circle = classes[1];
    assert_eq!(result.name(circle), "Circle");
    assert!(tree.link(circle, Link::Attributes).unwrap().is_some());
    assert!(tree.find_first_child(circle, NodeType::Extends).unwrap().is_some());
    assert!(tree.find_first_child(circle, NodeType::Implements).unwrap().is_some());

    let enums: Vec<_> = tree
        .children(body)
        .unwrap()
        .iter()
        .copied()
        .filter(|id| tree.node_type(*id).unwrap() == NodeType::Enum)
        .collect();
    assert_eq!(enums.len(), 2);
    assert!(tree.flag(enums[1], Flag::EnumClass).unwrap());

    let counter = NodeCounter::new().count_program(&result.program);
    assert_eq!(counter.class_count, 3);
}

#[test]
fn test_extended_program_with_pragmas() {
    let harness = TestHarness::new();
    let result = harness.load_and_parse("extended.js");

    result.assert_success();
    result.assert_bidirectional();

    let tree = &result.program.tree;
    let switch = result.top_level(NodeType::Switch)[0];
    assert_eq!(tree.switch_operator(switch).unwrap(), NodeType::Less);
}

#[test]
fn test_extended_program_without_pragmas_fails() {
    let harness = TestHarness::new();
    let result = harness.load_and_parse("extended.js");
    let stripped = result.source.replacen("use extended_operators, extended_statements;", "", 1);

    let program = as2js::parse(&stripped);
    assert!(program.diagnostics.count(ErrorCode::NotAllowed) > 0 || program.diagnostics.has_errors());
    // nothing extended was built
    let counter = NodeCounter::new().count_program(&program);
    assert!(counter.total > 0);
    let dump = program.dump();
    assert!(!dump.contains("ROTATE_LEFT"));
    assert!(!dump.contains("COMPARE"));
}

#[test]
fn test_options_given_upfront_match_pragmas() {
    let harness = TestHarness::new()
        .with_options(Options::EXTENDED_OPERATORS | Options::EXTENDED_STATEMENTS);
    let result = harness.load_and_parse("extended.js");
    result.assert_success();

    let plain = TestHarness::new().load_and_parse("extended.js");
    assert_eq!(result.program.dump(), plain.program.dump());
}

#[test]
fn test_errors_are_all_reported() {
    let harness = TestHarness::new();
    let result = harness.load_and_parse("errors.js");

    result.assert_bidirectional();
    let codes = result.error_codes();
    for expected in [
        ErrorCode::InvalidExpression,
        ErrorCode::ParenthesisExpected,
        ErrorCode::InvalidFunction,
        ErrorCode::ColonExpected,
        ErrorCode::CurvlyBracketsExpected,
    ] {
        assert!(codes.contains(&expected), "missing {:?} in {:?}", expected, codes);
    }
    // the tree still holds one directive per line
    assert_eq!(result.program.directives().len(), 5);
}

#[test]
fn test_positions_point_into_the_file() {
    let harness = TestHarness::new();
    let result = harness.load_and_parse("errors.js");

    let first = result.program.diagnostics.iter().next().unwrap();
    assert_eq!(first.position.filename(), "errors.js");
    assert_eq!(first.position.line(), 1);
    let last = result.program.diagnostics.iter().last().unwrap();
    assert!(last.position.line() >= 5);
}
