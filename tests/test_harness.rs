// tests/test_harness.rs
//! Test harness for the as2js integration tests
//!
//! Loads sample programs from `test_scripts/`, parses them and offers a few
//! helpers to look into the resulting tree.

#![allow(dead_code)]

use as2js::*;
use std::fs;
use std::path::PathBuf;

/// A parsed sample program and its source text
pub struct TestResult {
    pub program: ParsedProgram,
    pub source: String,
}

/// Test harness for loading and parsing sample programs
pub struct TestHarness {
    test_scripts_dir: PathBuf,
    options: Options,
}

impl TestHarness {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let test_scripts_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_scripts");
        Self {
            test_scripts_dir,
            options: Options::empty(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Load and parse a sample program
    pub fn load_and_parse(&self, filename: &str) -> TestResult {
        let path = self.test_scripts_dir.join(filename);
        let source = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        let program = parse_file(filename, &source, self.options);
        TestResult { program, source }
    }
}

impl TestResult {
    /// Assert that parsing produced no diagnostic at all
    pub fn assert_success(&self) {
        if !self.program.diagnostics.is_empty() {
            eprintln!("Source:\n{}", self.source);
            eprintln!("\nDiagnostics:");
            for diagnostic in &self.program.diagnostics {
                eprintln!("{}", diagnostic.display_with_source(&self.source));
            }
            panic!(
                "Expected successful parse, but got {} diagnostics",
                self.program.diagnostics.len()
            );
        }
    }

    pub fn error_codes(&self) -> Vec<ErrorCode> {
        self.program.diagnostics.iter().map(|d| d.code).collect()
    }

    /// Top-level directives of the given type
    pub fn top_level(&self, node_type: NodeType) -> Vec<NodeId> {
        self.program
            .directives()
            .iter()
            .copied()
            .filter(|id| self.program.tree.node_type(*id).unwrap() == node_type)
            .collect()
    }

    pub fn functions(&self) -> Vec<NodeId> {
        self.top_level(NodeType::Function)
    }

    pub fn classes(&self) -> Vec<NodeId> {
        self.top_level(NodeType::Class)
    }

    pub fn name(&self, id: NodeId) -> &str {
        self.program.tree.string(id).unwrap_or("")
    }

    /// Every child's parent must point back at the owner, at the child's
    /// own offset
    pub fn assert_bidirectional(&self) {
        let tree = &self.program.tree;
        let mut stack = vec![self.program.root];
        while let Some(id) = stack.pop() {
            for (index, child) in tree.children(id).unwrap().iter().enumerate() {
                assert_eq!(tree.parent(*child).unwrap(), Some(id));
                assert_eq!(tree.get_offset(*child).unwrap(), index);
                stack.push(*child);
            }
        }
    }
}

/// Counts nodes by type over a whole tree
#[derive(Debug, Default)]
pub struct NodeCounter {
    pub function_count: usize,
    pub class_count: usize,
    pub if_count: usize,
    pub while_count: usize,
    pub for_count: usize,
    pub switch_count: usize,
    pub try_count: usize,
    pub binary_expr_count: usize,
    pub call_count: usize,
    pub variable_count: usize,
    pub total: usize,
}

impl NodeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_program(mut self, program: &ParsedProgram) -> Self {
        self.count_node(&program.tree, program.root);
        self
    }

    fn count_node(&mut self, tree: &Tree, id: NodeId) {
        let node_type = tree.node_type(id).unwrap();
        self.total += 1;
        match node_type {
            NodeType::Function => self.function_count += 1,
            NodeType::Class | NodeType::Interface => self.class_count += 1,
            NodeType::If => self.if_count += 1,
            NodeType::While | NodeType::Do => self.while_count += 1,
            NodeType::For => self.for_count += 1,
            NodeType::Switch => self.switch_count += 1,
            NodeType::Try => self.try_count += 1,
            NodeType::Call => self.call_count += 1,
            NodeType::Variable => self.variable_count += 1,
            t if is_binary_operator(t) => self.binary_expr_count += 1,
            _ => {}
        }
        for child in tree.children(id).unwrap() {
            self.count_node(tree, *child);
        }
    }
}

fn is_binary_operator(node_type: NodeType) -> bool {
    use NodeType::*;
    matches!(
        node_type,
        Add | Subtract
            | Multiply
            | Divide
            | Modulo
            | Less
            | LessEqual
            | Greater
            | GreaterEqual
            | Equal
            | NotEqual
            | StrictlyEqual
            | StrictlyNotEqual
            | LogicalAnd
            | LogicalOr
            | BitwiseAnd
            | BitwiseOr
            | BitwiseXor
            | ShiftLeft
            | ShiftRight
            | ShiftRightUnsigned
            | Power
    )
}
