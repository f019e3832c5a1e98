//! Numerical epsilon-delta continuity calculator
//!
//! Parses a single-variable expression in `x`, evaluates it totally over the
//! reals and searches for a delta satisfying the epsilon-delta bound at a
//! point. The search is a bounded numerical heuristic: a found delta held at
//! every sampled point, and a missing one means only that no candidate did.
//!
//! ```
//! use epsilon_delta::{Calculator, DeltaResult};
//!
//! let mut calculator = Calculator::new();
//! let report = calculator.analyze("x", 1.0, 1.0).unwrap();
//! assert_eq!(report.delta, DeltaResult::Found { delta: 0.5 });
//! ```

pub mod ast;
pub mod config;
pub mod curve;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;
pub mod presets;
pub mod registry;
pub mod sampling;
pub mod search;

// Re-export main types
pub use config::{CalculatorConfig, OutputFormat};
pub use curve::{CurvePoint, CurveSettings, DisplayDomain, SampledCurve, sample_curve};
pub use engine::{Calculator, ContinuityReport, Verdict};
pub use error::{Error, Result};
pub use evaluator::{CompiledExpression, EvaluationError, RealFunction, evaluate_str};
pub use model::Evaluation;
pub use parser::{ParseError, parse_expression as parse};
pub use presets::{PRESETS, Preset, find_preset};
pub use registry::{FunctionRegistry, standard_registry};
pub use search::{
    ContinuityQuery, DeltaResult, DeltaSearch, EpsilonGrid, PolicyKind, QueryError, SearchPolicy,
    SweepTable, search, sweep,
};
