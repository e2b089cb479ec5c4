//! Display-glyph normalization.
//!
//! Turns the keypad's visual vocabulary (`×`, `÷`, `√(`, `sin⁻¹(`, `Ans`,
//! postfix `!`) into the plain form the tokenizer accepts. Pure text
//! substitution; everything structural is left to the parser.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::calculator::format::format_number;

lazy_static! {
    /// A maximal digit run immediately followed by `!`.
    static ref FACTORIAL: Regex = Regex::new(r"(\d+)!").unwrap();
}

/// Rewrite a display string into the tokenizer vocabulary, substituting
/// the last successful answer for `Ans`.
pub fn rewrite(input: &str, last_answer: &str) -> String {
    let mut expr = input.replace('×', "*").replace('÷', "/");
    expr = expr.replace("Ans", last_answer);
    expr = expr.replace("sin⁻¹(", "asin(");
    expr = expr.replace("cos⁻¹(", "acos(");
    expr = expr.replace("tan⁻¹(", "atan(");
    expr = expr.replace("√(", "sqrt(");
    if expr.contains('!') {
        expr = FACTORIAL
            .replace_all(&expr, |caps: &Captures| expand_factorial(&caps[1]))
            .into_owned();
    }
    expr
}

/// Replace a literal digit run with its factorial. Runs past `170!`
/// overflow f64; those become a sentinel the tokenizer rejects, which
/// lands in the uniform Error state.
fn expand_factorial(digits: &str) -> String {
    match digits.parse::<u64>() {
        Ok(n) if n <= 170 => format_number(factorial(n)),
        _ => "NaN".to_string(),
    }
}

fn factorial(n: u64) -> f64 {
    let mut product = 1.0;
    for i in 2..=n {
        product *= i as f64;
    }
    product
}
