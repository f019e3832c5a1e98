//! Expression AST node definitions

use super::operator::{BinaryOperator, UnaryOperator};
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// AST representation of a real-valued expression in one variable
///
/// Large variants are boxed to keep the enum small.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExpressionNode {
    /// Numeric literal
    Number(f64),

    /// Unresolved name (the variable or a constant)
    Identifier(String),

    /// Binary operation (boxed for size optimization)
    BinaryOp(Box<BinaryOpData>),

    /// Unary operation
    UnaryOp {
        /// The operator
        op: UnaryOperator,
        /// The operand
        operand: Box<ExpressionNode>,
    },

    /// Function call with name and arguments (boxed for size optimization)
    FunctionCall(Box<FunctionCallData>),
}

/// Binary operation payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryOpData {
    /// The operator
    pub op: BinaryOperator,
    /// Left operand
    pub left: ExpressionNode,
    /// Right operand
    pub right: ExpressionNode,
}

/// Function call payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionCallData {
    /// Function name, with any namespace prefix already stripped
    pub name: String,
    /// Call arguments
    pub args: SmallVec<[ExpressionNode; 2]>,
}

impl ExpressionNode {
    /// Create a numeric literal
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Create an identifier node
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Create a binary operation
    pub fn binary_op(op: BinaryOperator, left: ExpressionNode, right: ExpressionNode) -> Self {
        Self::BinaryOp(Box::new(BinaryOpData { op, left, right }))
    }

    /// Create a unary operation
    pub fn unary_op(op: UnaryOperator, operand: ExpressionNode) -> Self {
        Self::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    /// Create a function call
    pub fn function_call(
        name: impl Into<String>,
        args: impl IntoIterator<Item = ExpressionNode>,
    ) -> Self {
        Self::FunctionCall(Box::new(FunctionCallData {
            name: name.into(),
            args: args.into_iter().collect(),
        }))
    }

    /// Count the nodes in this tree
    pub fn node_count(&self) -> usize {
        match self {
            Self::Number(_) | Self::Identifier(_) => 1,
            Self::BinaryOp(data) => 1 + data.left.node_count() + data.right.node_count(),
            Self::UnaryOp { operand, .. } => 1 + operand.node_count(),
            Self::FunctionCall(data) => {
                1 + data.args.iter().map(ExpressionNode::node_count).sum::<usize>()
            }
        }
    }
}

impl fmt::Display for ExpressionNode {
    /// Fully parenthesized canonical form
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Identifier(name) => f.write_str(name),
            Self::BinaryOp(data) => write!(f, "({} {} {})", data.left, data.op, data.right),
            Self::UnaryOp { op, operand } => write!(f, "({op}{operand})"),
            Self::FunctionCall(data) => {
                write!(f, "{}(", data.name)?;
                for (i, arg) in data.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
