//! Abstract Syntax Tree (AST) definitions for real-valued expressions
//!
//! The tree holds numbers, names, arithmetic and function
//! calls. Names are left unresolved here; binding them to the variable, a
//! constant or a library function happens when the tree is compiled.

mod expression;
mod operator;
mod visitor;

pub use expression::*;
pub use operator::*;
pub use visitor::*;
