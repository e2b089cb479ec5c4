//! Expression evaluation for the calculator display string.
//!
//! This module provides functionality to:
//! - Normalize the keypad's display glyphs into a fixed token vocabulary
//! - Parse and evaluate the expression with a dedicated recursive-descent
//!   evaluator (no dynamic code execution)
//! - Format results for the display

mod ast;
mod errors;
mod eval;
mod format;
mod lexer;
mod parser;
mod rewrite;

pub use ast::{Constant, Expr, Function};
pub use errors::EvalError;
pub use eval::AngleUnit;
pub use format::format_number;

use tracing::debug;

/// Context an evaluation runs in.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalContext {
    pub angle_unit: AngleUnit,
    /// Last successful result, substituted for `Ans`. Formatted form.
    pub last_answer: String,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            angle_unit: AngleUnit::Degrees,
            last_answer: "0".to_string(),
        }
    }
}

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// Successful calculation with a finite numeric result.
    Success {
        /// The original display string.
        expression: String,
        /// The numeric value.
        value: f64,
        /// Formatted for the display.
        formatted: String,
    },
    /// The expression was malformed or produced a non-finite value.
    Error {
        /// The original display string.
        expression: String,
    },
}

impl CalcResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Formatted result text, if any.
    pub fn formatted(&self) -> Option<&str> {
        match self {
            Self::Success { formatted, .. } => Some(formatted),
            Self::Error { .. } => None,
        }
    }
}

/// Evaluate a display string.
///
/// Malformed input never panics; every failure collapses to
/// [`CalcResult::Error`].
pub fn evaluate_expression(input: &str, ctx: &EvalContext) -> CalcResult {
    match try_evaluate(input, ctx) {
        Ok((value, formatted)) => CalcResult::Success {
            expression: input.to_string(),
            value,
            formatted,
        },
        Err(err) => {
            debug!(input, error = %err, "expression evaluation failed");
            CalcResult::Error {
                expression: input.to_string(),
            }
        }
    }
}

fn try_evaluate(input: &str, ctx: &EvalContext) -> Result<(f64, String), EvalError> {
    let rewritten = rewrite::rewrite(input, &ctx.last_answer);
    let tokens = lexer::tokenize(&rewritten)?;
    let expr = parser::parse(&tokens)?;
    let value = expr.evaluate(ctx.angle_unit);
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok((value, format::format_number(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> EvalContext {
        EvalContext::default()
    }

    fn formatted(input: &str) -> String {
        match evaluate_expression(input, &ctx()) {
            CalcResult::Success { formatted, .. } => formatted,
            CalcResult::Error { .. } => panic!("expected success for {input:?}"),
        }
    }

    #[test]
    fn precedence_follows_the_keypad_example() {
        // 2+3×4 is the canonical end-to-end expression.
        assert_eq!(formatted("2+3×4"), "14");
    }

    #[test]
    fn evaluation_is_deterministic() {
        let first = evaluate_expression("2+3×4-√(16)", &ctx());
        let second = evaluate_expression("2+3×4-√(16)", &ctx());
        assert_eq!(first, second);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert!(!evaluate_expression("5÷0", &ctx()).is_success());
    }

    #[test]
    fn factorial_of_literal() {
        assert_eq!(formatted("5!"), "120");
    }

    #[test]
    fn factorial_of_negative_literal_is_an_error() {
        // The minus keeps the `!` off a bare digit run, so it never
        // reaches the factorial rewrite.
        assert!(!evaluate_expression("(-3)!", &ctx()).is_success());
    }

    #[test]
    fn trig_uses_degrees_by_default() {
        assert_eq!(formatted("sin(30)"), "0.5");
        assert_eq!(formatted("sin⁻¹(0.5)"), "30");
    }

    #[test]
    fn trig_in_radians() {
        let radians = EvalContext {
            angle_unit: AngleUnit::Radians,
            ..EvalContext::default()
        };
        match evaluate_expression("cos(0)", &radians) {
            CalcResult::Success { formatted, .. } => assert_eq!(formatted, "1"),
            CalcResult::Error { .. } => panic!("expected success"),
        }
    }

    #[test]
    fn ans_uses_the_context_answer() {
        let context = EvalContext {
            last_answer: "14".to_string(),
            ..EvalContext::default()
        };
        match evaluate_expression("Ans×2", &context) {
            CalcResult::Success { formatted, .. } => assert_eq!(formatted, "28"),
            CalcResult::Error { .. } => panic!("expected success"),
        }
    }

    #[test]
    fn constants() {
        assert_eq!(formatted("π"), "3.1415926536");
        assert_eq!(formatted("e^(2)"), "7.3890560989");
    }

    #[test]
    fn malformed_input_is_an_error() {
        for input in ["2+", "((2)", "2++3", "sin(", "", "hello"] {
            assert!(
                !evaluate_expression(input, &ctx()).is_success(),
                "expected error for {input:?}"
            );
        }
    }

    #[test]
    fn error_keeps_the_original_expression() {
        match evaluate_expression("5÷0", &ctx()) {
            CalcResult::Error { expression } => assert_eq!(expression, "5÷0"),
            CalcResult::Success { .. } => panic!("expected error"),
        }
    }

    #[test]
    fn ten_decimal_rounding() {
        assert_eq!(formatted("1÷3"), "0.3333333333");
        assert_eq!(formatted("10÷4"), "2.5");
    }
}
