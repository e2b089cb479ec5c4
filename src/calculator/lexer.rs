//! Tokenizer for the rewritten expression string.
//!
//! The vocabulary is fixed: numbers, `+ - * / % ^ ( )`, the constants
//! `pi`/`π` and `e`, and the function names the keypad can produce.
//! Anything else is an error.

use crate::calculator::ast::{Constant, Function};
use crate::calculator::errors::EvalError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Const(Constant),
    Func(Function),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::MalformedNumber(literal.clone()))?;
                tokens.push(Token::Number(value));
            }
            'π' => {
                chars.next();
                tokens.push(Token::Const(Constant::Pi));
            }
            c if c.is_ascii_alphabetic() => {
                let mut name = String::new();
                while let Some(&l) = chars.peek() {
                    if l.is_ascii_alphabetic() {
                        name.push(l);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(match name.as_str() {
                    "pi" => Token::Const(Constant::Pi),
                    "e" => Token::Const(Constant::E),
                    _ => Token::Func(
                        Function::from_name(&name).ok_or(EvalError::UnknownName(name))?,
                    ),
                });
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '%' => {
                chars.next();
                tokens.push(Token::Percent);
            }
            '^' => {
                chars.next();
                tokens.push(Token::Caret);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            other => return Err(EvalError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}
