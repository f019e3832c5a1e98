//! Resolution of parsed expressions into evaluable trees

use super::error::{CompileResult, EvaluationError};
use super::real_function::RealFunction;
use crate::ast::{BinaryOperator, ExpressionNode, UnaryOperator, Visitor};
use crate::model::Evaluation;
use crate::parser::parse_expression;
use crate::registry::{FunctionRegistry, MathFunction, standard_registry};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// The single free variable of every expression
pub const VARIABLE_NAME: &str = "x";

/// A tree whose names are all resolved
#[derive(Clone)]
enum CompiledNode {
    Constant(f64),
    Variable,
    Unary(UnaryOperator, Box<CompiledNode>),
    Binary(BinaryOperator, Box<CompiledNode>, Box<CompiledNode>),
    Call(Arc<dyn MathFunction>, Vec<CompiledNode>),
}

impl CompiledNode {
    fn evaluate(&self, x: f64) -> Evaluation {
        match self {
            CompiledNode::Constant(value) => Evaluation::from_f64(*value),
            CompiledNode::Variable => Evaluation::from_f64(x),
            CompiledNode::Unary(op, operand) => operand.evaluate(x).map(|v| op.apply(v)),
            CompiledNode::Binary(op, left, right) => {
                let left = left.evaluate(x);
                if left.is_undefined() {
                    return Evaluation::Undefined;
                }
                left.zip_with(right.evaluate(x), |a, b| op.apply(a, b))
            }
            CompiledNode::Call(function, args) => {
                let mut values: SmallVec<[f64; 2]> = SmallVec::with_capacity(args.len());
                for arg in args {
                    match arg.evaluate(x) {
                        Evaluation::Finite(v) => values.push(v),
                        Evaluation::Undefined => return Evaluation::Undefined,
                    }
                }
                function.evaluate(&values)
            }
        }
    }
}

/// Resolves identifiers and calls against a registry
struct Compiler<'a> {
    registry: &'a FunctionRegistry,
}

impl Visitor for Compiler<'_> {
    type Result = CompileResult<CompiledNode>;

    fn visit_number(&mut self, value: f64) -> Self::Result {
        Ok(CompiledNode::Constant(value))
    }

    fn visit_identifier(&mut self, name: &str) -> Self::Result {
        if name == VARIABLE_NAME {
            return Ok(CompiledNode::Variable);
        }
        if let Some(constant) = self.registry.get_constant(name) {
            return Ok(CompiledNode::Constant(constant.value));
        }
        if self.registry.get_function(name).is_some() {
            return Err(EvaluationError::FunctionUsedAsValue {
                name: name.to_string(),
            });
        }
        Err(EvaluationError::UnknownIdentifier {
            name: name.to_string(),
            variable: VARIABLE_NAME.to_string(),
        })
    }

    fn visit_function_call(&mut self, name: &str, args: &[ExpressionNode]) -> Self::Result {
        let registry = self.registry;
        let Some(function) = registry.get_function(name) else {
            if name == VARIABLE_NAME || registry.get_constant(name).is_some() {
                return Err(EvaluationError::NotCallable {
                    name: name.to_string(),
                });
            }
            return Err(EvaluationError::UnknownFunction {
                name: name.to_string(),
            });
        };
        function.validate_arity(args.len())?;

        let compiled_args = args
            .iter()
            .map(|arg| self.visit_expression(arg))
            .collect::<CompileResult<Vec<_>>>()?;
        Ok(CompiledNode::Call(Arc::clone(function), compiled_args))
    }

    fn visit_binary_op(
        &mut self,
        op: BinaryOperator,
        left: &ExpressionNode,
        right: &ExpressionNode,
    ) -> Self::Result {
        let left = self.visit_expression(left)?;
        let right = self.visit_expression(right)?;
        Ok(CompiledNode::Binary(op, Box::new(left), Box::new(right)))
    }

    fn visit_unary_op(&mut self, op: UnaryOperator, operand: &ExpressionNode) -> Self::Result {
        let operand = self.visit_expression(operand)?;
        Ok(CompiledNode::Unary(op, Box::new(operand)))
    }
}

/// An expression in `x` ready for repeated evaluation
///
/// Compilation is the only fallible step. Once compiled, evaluation is pure
/// and total, and the value can be shared freely between threads.
#[derive(Clone)]
pub struct CompiledExpression {
    source: String,
    ast: ExpressionNode,
    root: CompiledNode,
}

impl CompiledExpression {
    /// Parse and compile against the standard library
    pub fn compile(source: &str) -> CompileResult<Self> {
        Self::compile_with_registry(source, &standard_registry())
    }

    /// Parse and compile against a specific registry
    pub fn compile_with_registry(source: &str, registry: &FunctionRegistry) -> CompileResult<Self> {
        let ast = parse_expression(source)?;
        Self::from_ast(source, ast, registry)
    }

    /// Compile an already parsed tree
    pub fn from_ast(
        source: impl Into<String>,
        ast: ExpressionNode,
        registry: &FunctionRegistry,
    ) -> CompileResult<Self> {
        let source = source.into();
        let root = Compiler { registry }.visit_expression(&ast)?;
        log::debug!(
            "compiled expression '{source}' ({} nodes)",
            ast.node_count()
        );
        Ok(Self { source, ast, root })
    }

    /// The expression text as written
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed tree
    pub fn ast(&self) -> &ExpressionNode {
        &self.ast
    }

    /// Evaluate at `x`
    #[inline]
    pub fn evaluate(&self, x: f64) -> Evaluation {
        self.root.evaluate(x)
    }

    /// Evaluate at every point of `xs`, preserving order and length
    pub fn evaluate_many(&self, xs: &[f64]) -> Vec<Evaluation> {
        xs.iter().map(|&x| self.root.evaluate(x)).collect()
    }
}

impl RealFunction for CompiledExpression {
    fn evaluate(&self, x: f64) -> Evaluation {
        self.root.evaluate(x)
    }
}

impl fmt::Debug for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledExpression")
            .field("source", &self.source)
            .field("ast", &self.ast)
            .finish()
    }
}

/// Evaluate expression text at one point, never failing.
///
/// An expression that does not compile evaluates to `Undefined`.
pub fn evaluate_str(source: &str, x: f64) -> Evaluation {
    match CompiledExpression::compile(source) {
        Ok(expr) => expr.evaluate(x),
        Err(err) => {
            log::debug!("expression '{source}' is unusable: {err}");
            Evaluation::Undefined
        }
    }
}
