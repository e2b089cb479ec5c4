use thiserror::Error;

/// Internal evaluation failures.
///
/// Every variant collapses to the single user-facing Error state; the
/// distinction only exists for logs and tests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("malformed number '{0}'")]
    MalformedNumber(String),
    #[error("unknown name '{0}'")]
    UnknownName(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected token at position {0}")]
    UnexpectedToken(usize),
    #[error("unmatched parenthesis")]
    UnmatchedParen,
    #[error("result is not a finite number")]
    NonFinite,
}
