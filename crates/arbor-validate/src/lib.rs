//! Structural checks of a reconstructed tree.
//!
//! Every child must have the role its field requires, and every node must be
//! a variant the root's language can carry.

use std::fmt;
use std::ops::ControlFlow;

use arbor_tree::{Language, NodeId, NodeKind, Role, Tree};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{node} at `{path}` is a {actual}, but {expected} is required")]
    Role { node: NodeId, actual: NodeKind, expected: Role, path: String },
    #[error("{node} at `{path}` is a {kind}, which {language} trees cannot contain")]
    Foreign { node: NodeId, kind: NodeKind, language: Language, path: String },
}

impl ValidationError {
    pub fn node(&self) -> NodeId {
        match self {
            Self::Role { node, .. } | Self::Foreign { node, .. } => *node,
        }
    }

    /// Field path from the root, e.g. `CompilationUnit.statements[0].expression`.
    pub fn path(&self) -> &str {
        match self {
            Self::Role { path, .. } | Self::Foreign { path, .. } => path,
        }
    }
}

/// Outcome of a full walk.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub nodes: usize,
    pub violations: Vec<ValidationError>,
}

impl Report {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} nodes, {} violations", self.nodes, self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  {violation}")?;
        }
        Ok(())
    }
}

struct Validator {
    language: Option<Language>,
    path: String,
    first_only: bool,
    report: Report,
}

impl Validator {
    fn new(root: &Tree, first_only: bool) -> Self {
        let path = root.kind().to_string();
        Self { language: root.language(), path, first_only, report: Report::default() }
    }

    fn violation(&mut self, error: ValidationError) -> ControlFlow<()> {
        tracing::trace!(%error, "violation");
        self.report.violations.push(error);
        if self.first_only { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
    }

    fn visit(&mut self, tree: &Tree, expected: Role) -> ControlFlow<()> {
        self.report.nodes += 1;
        let (node, kind) = (tree.id(), tree.kind());

        if !tree.roles().contains(expected) {
            let path = self.path.clone();
            self.violation(ValidationError::Role { node, actual: kind, expected, path })?;
        }
        if kind.is_python() && self.language == Some(Language::Java) {
            let (language, path) = (Language::Java, self.path.clone());
            self.violation(ValidationError::Foreign { node, kind, language, path })?;
        }

        for slot in tree.slots() {
            let len = self.path.len();
            self.path.push('.');
            self.path.push_str(slot.field);
            if let Some(index) = slot.index {
                self.path.push_str(&format!("[{index}]"));
            }
            let flow = self.visit(slot.tree, slot.role);
            self.path.truncate(len);
            flow?;
        }
        ControlFlow::Continue(())
    }
}

/// Checks `node` and everything below it against `expected`, stopping at the
/// first violation.
pub fn visit_and_validate(node: &Tree, expected: Role) -> Result<(), ValidationError> {
    let mut validator = Validator::new(node, true);
    let _ = validator.visit(node, expected);
    match validator.report.violations.pop() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Returns the first violation in a tree whose root must be a source file.
pub fn validate(tree: &Tree) -> Result<(), ValidationError> {
    visit_and_validate(tree, Role::SourceFile)
}

/// Walks the whole tree and collects every violation.
pub fn check(tree: &Tree) -> Report {
    let mut validator = Validator::new(tree, false);
    let _ = validator.visit(tree, Role::SourceFile);
    let report = validator.report;
    tracing::debug!(nodes = report.nodes, violations = report.violations.len(), "checked tree");
    report
}

#[cfg(test)]
mod tests {
    use arbor_tree::nodes::{BinaryOperator, ComprehensionKind};
    use arbor_tree::{Language, NodeId, NodeKind, Role, TreeBuilder};
    use expect_test::expect;

    use crate::{ValidationError, check, validate, visit_and_validate};

    #[test]
    fn well_typed_tree_passes() {
        let mut b = TreeBuilder::new();
        let x = b.identifier("x");
        let variable = b.identifier("x");
        let xs = b.identifier("xs");
        let clause = b.comprehension_clause(variable, xs, vec![]);
        let comprehension = b.comprehension(ComprehensionKind::Set, x, vec![clause]);
        let stmt = b.expression_statement(comprehension);
        let unit = b.compilation_unit(Language::Python, "s.py", vec![stmt]);

        assert_eq!(validate(&unit), Ok(()));
        assert_eq!(check(&unit).nodes, 7);
    }

    #[test]
    fn statement_as_key() {
        let mut b = TreeBuilder::new();
        let key = b.identifier("k");
        let key = b.expression_statement(key);
        let value = b.int(1);
        let entry = b.key_value(key, value);
        let entry = b.expression_statement(entry);
        let unit = b.compilation_unit(Language::Python, "kv.py", vec![entry]);

        assert_eq!(
            validate(&unit),
            Err(ValidationError::Role {
                node: NodeId::from_raw(2),
                actual: NodeKind::ExpressionStatement,
                expected: Role::Expression,
                path: "CompilationUnit.statements[0].expression.key".to_owned(),
            })
        );
    }

    #[test]
    fn check_collects_everything() {
        let mut b = TreeBuilder::new();
        let one = b.int(1);
        let two = b.int(2);
        let sum = b.binary(one, BinaryOperator::Addition, two);
        let name = b.identifier("x");
        let wrapped = b.expression_statement(name);
        let unit = b.compilation_unit(Language::Java, "A.java", vec![sum, wrapped]);

        let report = check(&unit);
        expect![[r#"
            6 nodes, 2 violations
              #3 at `CompilationUnit.statements[0]` is a Binary, but Statement is required
              #5 at `CompilationUnit.statements[1]` is a ExpressionStatement, which java trees cannot contain"#]]
        .assert_eq(&report.to_string());
        assert!(!report.is_valid());
    }

    #[test]
    fn root_must_be_a_source_file() {
        let literal = TreeBuilder::new().int(1);
        let error = validate(&literal).unwrap_err();
        assert_eq!(error.to_string(), "#1 at `Literal` is a Literal, but SourceFile is required");
        assert_eq!(visit_and_validate(&literal, Role::Expression), Ok(()));
    }
}
