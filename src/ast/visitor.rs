//! Visitor pattern for AST traversal

use super::expression::ExpressionNode;
use super::operator::{BinaryOperator, UnaryOperator};

/// Trait for visiting AST nodes
pub trait Visitor: Sized {
    /// The result type of visiting a node
    type Result;

    /// Visit an expression node
    fn visit_expression(&mut self, expr: &ExpressionNode) -> Self::Result {
        walk_expression(self, expr)
    }

    /// Visit a numeric literal
    fn visit_number(&mut self, value: f64) -> Self::Result;

    /// Visit an identifier
    fn visit_identifier(&mut self, name: &str) -> Self::Result;

    /// Visit a function call
    fn visit_function_call(&mut self, name: &str, args: &[ExpressionNode]) -> Self::Result;

    /// Visit a binary operation
    fn visit_binary_op(
        &mut self,
        op: BinaryOperator,
        left: &ExpressionNode,
        right: &ExpressionNode,
    ) -> Self::Result;

    /// Visit a unary operation
    fn visit_unary_op(&mut self, op: UnaryOperator, operand: &ExpressionNode) -> Self::Result;
}

/// Default implementation of walking an expression tree
pub fn walk_expression<V: Visitor>(visitor: &mut V, expr: &ExpressionNode) -> V::Result {
    match expr {
        ExpressionNode::Number(value) => visitor.visit_number(*value),
        ExpressionNode::Identifier(name) => visitor.visit_identifier(name),
        ExpressionNode::FunctionCall(data) => visitor.visit_function_call(&data.name, &data.args),
        ExpressionNode::BinaryOp(data) => visitor.visit_binary_op(data.op, &data.left, &data.right),
        ExpressionNode::UnaryOp { op, operand } => visitor.visit_unary_op(*op, operand),
    }
}

/// Collects every name referenced by an expression, in first-seen order
#[derive(Debug, Default)]
pub struct NameCollector {
    /// Identifiers (variables and constants)
    pub identifiers: Vec<String>,
    /// Called function names
    pub functions: Vec<String>,
}

impl NameCollector {
    /// Collect the names referenced by `expr`
    pub fn collect(expr: &ExpressionNode) -> Self {
        let mut collector = Self::default();
        collector.visit_expression(expr);
        collector
    }

    fn push_unique(list: &mut Vec<String>, name: &str) {
        if !list.iter().any(|existing| existing == name) {
            list.push(name.to_string());
        }
    }
}

impl Visitor for NameCollector {
    type Result = ();

    fn visit_number(&mut self, _value: f64) {}

    fn visit_identifier(&mut self, name: &str) {
        Self::push_unique(&mut self.identifiers, name);
    }

    fn visit_function_call(&mut self, name: &str, args: &[ExpressionNode]) {
        Self::push_unique(&mut self.functions, name);
        for arg in args {
            self.visit_expression(arg);
        }
    }

    fn visit_binary_op(&mut self, _op: BinaryOperator, left: &ExpressionNode, right: &ExpressionNode) {
        self.visit_expression(left);
        self.visit_expression(right);
    }

    fn visit_unary_op(&mut self, _op: UnaryOperator, operand: &ExpressionNode) {
        self.visit_expression(operand);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_collector_deduplicates() {
        let expr = ExpressionNode::binary_op(
            BinaryOperator::Multiply,
            ExpressionNode::function_call("sin", [ExpressionNode::identifier("x")]),
            ExpressionNode::binary_op(
                BinaryOperator::Add,
                ExpressionNode::identifier("x"),
                ExpressionNode::identifier("pi"),
            ),
        );
        let names = NameCollector::collect(&expr);
        assert_eq!(names.identifiers, vec!["x".to_string(), "pi".to_string()]);
        assert_eq!(names.functions, vec!["sin".to_string()]);
    }
}
