//! Arithmetic evaluator for spoken calculations.
//!
//! Grammar (binary operators only, no unary sign):
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := number | '(' expr ')'
//! ```
//!
//! # Invariants
//! - Input outside `[0-9+\-*/().]` is rejected before parsing.
//! - A non-finite result (division by zero, overflow) is an error, never a value.
//! - Parenthesis nesting is bounded by [`MAX_DEPTH`], so parsing never exhausts the stack.

use thiserror::Error;

pub const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,
    #[error("unsupported character `{0}`")]
    UnsafeCharacter(char),
    #[error("malformed number `{0}`")]
    MalformedNumber(String),
    #[error("unexpected `{found}` at position {position}")]
    UnexpectedToken { found: char, position: usize },
    #[error("expression ended early")]
    UnexpectedEnd,
    #[error("parentheses nested too deeply")]
    TooDeep,
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not a finite number")]
    NonFinite,
}

/// True when `expr` is non-empty and made only of digits, `+ - * / ( ) .`.
pub fn is_safe_expression(expr: &str) -> bool {
    !expr.is_empty() && expr.chars().all(is_safe_char)
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.')
}

pub fn evaluate(expr: &str) -> Result<f64, EvalError> {
    if expr.is_empty() {
        return Err(EvalError::Empty);
    }
    if let Some(bad) = expr.chars().find(|c| !is_safe_char(*c)) {
        return Err(EvalError::UnsafeCharacter(bad));
    }

    let mut parser = Parser {
        src: expr.as_bytes(),
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some(&b) = parser.src.get(parser.pos) {
        return Err(EvalError::UnexpectedToken {
            found: b as char,
            position: parser.pos,
        });
    }
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}

/// Integers print without a fractional part; `-0` prints as `0`.
/// Magnitudes from 1e21 up, or below 1e-6, use exponent notation (`1e+21`, `2.5e-7`).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{:e}", value);
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
            _ => exp,
        };
    }
    format!("{}", value)
}

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut acc = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            acc = if op == b'+' { acc + rhs } else { acc - rhs };
        }
        Ok(acc)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut acc = self.factor()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            if op == b'*' {
                acc *= rhs;
            } else {
                if rhs == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                acc /= rhs;
            }
        }
        Ok(acc)
    }

    fn factor(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            None => Err(EvalError::UnexpectedEnd),
            Some(b'(') => {
                if self.depth >= MAX_DEPTH {
                    return Err(EvalError::TooDeep);
                }
                self.pos += 1;
                self.depth += 1;
                let inner = self.expr()?;
                self.depth -= 1;
                match self.peek() {
                    Some(b')') => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    Some(b) => Err(EvalError::UnexpectedToken {
                        found: b as char,
                        position: self.pos,
                    }),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some(b) if b.is_ascii_digit() || b == b'.' => self.number(),
            Some(b) => Err(EvalError::UnexpectedToken {
                found: b as char,
                position: self.pos,
            }),
        }
    }

    fn number(&mut self) -> Result<f64, EvalError> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() || b == b'.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        // Safe-char check guarantees ASCII, so the slice is valid UTF-8.
        let literal = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or_default();
        if literal.matches('.').count() > 1 || !literal.bytes().any(|b| b.is_ascii_digit()) {
            return Err(EvalError::MalformedNumber(literal.to_string()));
        }
        literal
            .parse::<f64>()
            .map_err(|_| EvalError::MalformedNumber(literal.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_and_grouping() {
        assert_eq!(evaluate("2+3*4"), Ok(14.0));
        assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
        assert_eq!(evaluate("10-4-3"), Ok(3.0));
        assert_eq!(evaluate("8/4/2"), Ok(1.0));
        assert_eq!(evaluate(".5+1."), Ok(1.5));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(evaluate(""), Err(EvalError::Empty));
        assert_eq!(evaluate("2+"), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("(1+2"), Err(EvalError::UnexpectedEnd));
        assert!(matches!(evaluate("1+2)"), Err(EvalError::UnexpectedToken { found: ')', .. })));
        assert!(matches!(evaluate("1.2.3"), Err(EvalError::MalformedNumber(_))));
        assert!(matches!(evaluate("-3"), Err(EvalError::UnexpectedToken { found: '-', .. })));
        assert_eq!(evaluate("2+a"), Err(EvalError::UnsafeCharacter('a')));
        assert_eq!(evaluate("1/0"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn formats_like_spoken_numbers() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-1.5e22), "-1.5e+22");
        assert_eq!(format_number(2.5e-7), "2.5e-7");
        assert_eq!(format_number(123456789012.0), "123456789012");
    }
}
