//! Only `x`, the function library and `pi` may appear in an expression

use epsilon_delta::{CompiledExpression, Evaluation, EvaluationError, ParseError, evaluate_str};
use rstest::rstest;

#[rstest]
#[case("y")]
#[case("x + t")]
#[case("e")]
#[case("__import__")]
#[case("open(x)")]
#[case("exec(x)")]
#[case("getattr(x, 1)")]
#[case("lambda")]
#[case("nan")]
#[case("inf")]
fn test_unknown_names_do_not_compile(#[case] source: &str) {
    let err = CompiledExpression::compile(source).unwrap_err();
    assert!(
        matches!(
            err,
            EvaluationError::UnknownIdentifier { .. } | EvaluationError::UnknownFunction { .. }
        ),
        "unexpected error for '{source}': {err}"
    );
}

#[rstest]
#[case("os.system(x)")]
#[case("x.real")]
#[case("x; 1")]
#[case("'x'")]
#[case("[x]")]
#[case("x if x else 1")]
#[case("x == 1")]
fn test_non_arithmetic_syntax_does_not_parse(#[case] source: &str) {
    assert!(matches!(
        CompiledExpression::compile(source),
        Err(EvaluationError::Parse(_))
    ));
}

#[test]
fn test_parse_errors_carry_positions() {
    let err = CompiledExpression::compile("x + * 2").unwrap_err();
    let EvaluationError::Parse(parse_error) = err else {
        panic!("expected a parse error, got {err}");
    };
    assert_eq!(parse_error.position(), 4);
    assert!(matches!(parse_error, ParseError::UnexpectedToken { .. }));
}

#[rstest]
#[case("np.sin(x)")]
#[case("math.cos(x)")]
#[case("np.pi * x")]
#[case("pow(x, 2) + power(x, 3)")]
#[case("tan(x) / exp(x) - log(abs(x) + 1) + sqrt(x * x) + floor(x)")]
fn test_library_names_compile(#[case] source: &str) {
    assert!(CompiledExpression::compile(source).is_ok());
}

#[test]
fn test_rejected_expressions_are_undefined_everywhere() {
    for x in [-1.0, 0.0, 1.0] {
        assert_eq!(evaluate_str("y * x", x), Evaluation::Undefined);
        assert_eq!(evaluate_str("((x", x), Evaluation::Undefined);
    }
}
