// src/exec/validator.rs
use tree_sitter::{Node, Parser};

use crate::errors::{AppError, Result};
use crate::exec::result::ValidationResult;

/// Syntax-check `source` against the Python grammar without executing
/// anything: no process spawn, no filesystem, no imports. Reports the
/// first syntax error only, with a 1-based line and column.
pub fn validate(source: &str) -> Result<ValidationResult> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| AppError::Parser(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| AppError::Parser("parser produced no tree".to_string()))?;

    let root = tree.root_node();
    if !root.has_error() {
        return Ok(ValidationResult::ok());
    }

    let node = first_error_node(root).unwrap_or(root);
    let point = node.start_position();
    let line = point.row + 1;
    let column = point.column + 1;
    let message = if node.is_missing() {
        format!("Syntax error: missing {} at line {}", node.kind(), line)
    } else {
        format!("Syntax error: invalid syntax at line {}", line)
    };

    Ok(ValidationResult::syntax_error(message, line, column))
}

/// Depth-first search for the first error or missing node, in source order.
fn first_error_node(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error_node(child) {
            return Some(found);
        }
    }
    Some(node)
}
