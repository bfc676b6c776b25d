//! Evaluation of the compact expression encoding used for share values.
//!
//! A raw value is either a bare integer literal, a single call such as
//! `multiply(x, 3)` whose operands are literals or the variable `x`, or a
//! literal with `x` spliced into its digits.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{RecoveryError, Result};

/// The functions an expression may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Multiply,
    Add,
    Subtract,
    Gcd,
    Lcm,
    Power,
}

impl Function {
    pub const ALL: [Function; 6] = [
        Function::Multiply,
        Function::Add,
        Function::Subtract,
        Function::Gcd,
        Function::Lcm,
        Function::Power,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::Multiply => "multiply",
            Function::Add => "add",
            Function::Subtract => "subtract",
            Function::Gcd => "gcd",
            Function::Lcm => "lcm",
            Function::Power => "power",
        }
    }

    /// Exact, case-sensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    fn check_arity(self, count: usize) -> Result<()> {
        match self {
            Function::Multiply | Function::Add => Ok(()),
            Function::Subtract | Function::Gcd | Function::Lcm if count >= 1 => Ok(()),
            Function::Power if count == 2 => Ok(()),
            Function::Power => Err(RecoveryError::malformed(
                "power takes exactly two operands",
            )),
            _ => Err(RecoveryError::malformed(format!(
                "{} needs at least one operand",
                self.name()
            ))),
        }
    }

    fn apply(self, values: &[BigInt]) -> Result<BigInt> {
        match self {
            Function::Multiply => Ok(values.iter().fold(BigInt::one(), |acc, v| acc * v)),
            Function::Add => Ok(values.iter().fold(BigInt::zero(), |acc, v| acc + v)),
            Function::Subtract => {
                let (first, rest) = split_first(values)?;
                Ok(rest.iter().fold(first.clone(), |acc, v| acc - v))
            }
            Function::Gcd => {
                let (first, rest) = split_first(values)?;
                Ok(rest.iter().fold(first.abs(), |acc, v| acc.gcd(v)))
            }
            Function::Lcm => {
                let (first, rest) = split_first(values)?;
                Ok(rest.iter().fold(first.abs(), |acc, v| lcm(&acc, v)))
            }
            Function::Power => {
                let (base, rest) = split_first(values)?;
                let exponent = rest
                    .first()
                    .and_then(|e| e.to_u32())
                    .ok_or_else(|| {
                        RecoveryError::malformed(
                            "exponent must be a non-negative machine-sized integer",
                        )
                    })?;
                Ok(base.pow(exponent))
            }
        }
    }
}

fn split_first(values: &[BigInt]) -> Result<(&BigInt, &[BigInt])> {
    values
        .split_first()
        .ok_or_else(|| RecoveryError::malformed("missing operand"))
}

/// `|a*b| / gcd(a, b)`, zero when either side is zero.
fn lcm(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    (a * b).abs() / a.gcd(b)
}

/// One argument of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(BigInt),
    Variable,
}

impl Operand {
    fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw == "x" {
            return Ok(Operand::Variable);
        }
        parse_literal(raw)
            .map(Operand::Literal)
            .ok_or_else(|| RecoveryError::malformed("operand is not an integer literal"))
    }

    fn resolve(&self, x: &BigInt) -> BigInt {
        match self {
            Operand::Literal(value) => value.clone(),
            Operand::Variable => x.clone(),
        }
    }
}

/// A parsed share expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Literal(BigInt),
    Call {
        function: Function,
        operands: Vec<Operand>,
    },
    /// Text containing `x` but no call; `x` is replaced by the bound value's
    /// decimal digits and the result re-read as a literal.
    RawSubstitution(String),
}

impl Expression {
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RecoveryError::malformed("empty expression"));
        }

        if let Some(open) = text.find('(') {
            return Self::parse_call(text, open);
        }
        if text.contains(')') {
            return Err(RecoveryError::malformed("unbalanced parentheses"));
        }
        if let Some(value) = parse_literal(text) {
            return Ok(Expression::Literal(value));
        }
        if text.contains('x') {
            return Ok(Expression::RawSubstitution(text.to_string()));
        }
        Err(RecoveryError::malformed("not an integer literal"))
    }

    fn parse_call(text: &str, open: usize) -> Result<Self> {
        let function = Function::from_name(text[..open].trim())
            .ok_or_else(|| RecoveryError::malformed("unknown function"))?;

        let close = match text.rfind(')') {
            Some(close) if close > open => close,
            _ => return Err(RecoveryError::malformed("unbalanced parentheses")),
        };
        if !text[close + 1..].trim().is_empty() {
            return Err(RecoveryError::malformed("trailing characters after call"));
        }

        let body = &text[open + 1..close];
        if body.contains(['(', ')']) {
            return Err(RecoveryError::malformed("nested calls are not supported"));
        }

        let operands = if body.trim().is_empty() {
            Vec::new()
        } else {
            body.split(',')
                .map(Operand::parse)
                .collect::<Result<Vec<_>>>()?
        };
        function.check_arity(operands.len())?;

        Ok(Expression::Call { function, operands })
    }

    pub fn evaluate(&self, x: &BigInt) -> Result<BigInt> {
        match self {
            Expression::Literal(value) => Ok(value.clone()),
            Expression::Call { function, operands } => {
                let values: Vec<BigInt> = operands.iter().map(|o| o.resolve(x)).collect();
                function.apply(&values)
            }
            Expression::RawSubstitution(text) => {
                parse_literal(&text.replace('x', &x.to_string())).ok_or_else(|| {
                    RecoveryError::malformed("substituted value is not an integer literal")
                })
            }
        }
    }
}

/// Parses and evaluates `expression` with the variable `x` bound to `x`.
pub fn evaluate(expression: &str, x: &BigInt) -> Result<BigInt> {
    Expression::parse(expression)?.evaluate(x)
}

/// Decimal integer with an optional leading minus sign.
pub(crate) fn parse_literal(text: &str) -> Option<BigInt> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigInt::parse_bytes(text.as_bytes(), 10)
}
