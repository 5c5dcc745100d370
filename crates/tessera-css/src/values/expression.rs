//! `expr(...)` arithmetic.
//!
//! An expression is tokenized into operands and operators. Each operator
//! carries a precedence of `base + 10 * depth`, where `depth` is its
//! parenthesis nesting and `base` is 1 for `+`/`-`, 2 for `*`/`/` and 3
//! for unary minus and the `ceil()`/`floor()`/`round()` functions.
//! Evaluation repeatedly reduces the leftmost operator of highest
//! precedence whose operands are already values, so parentheses never need
//! to survive tokenization.
//!
//! ```
//! use tessera_css::values::DeviceProfile;
//! use tessera_css::values::expression::evaluate;
//!
//! let profile = DeviceProfile::default();
//! assert_eq!(evaluate("2 + 3 * 4", &profile, &mut |_| None), Some(14.0));
//! assert_eq!(evaluate("(2 + 3) * 4", &profile, &mut |_| None), Some(20.0));
//! assert_eq!(evaluate("4 / 0", &profile, &mut |_| None), None);
//! ```

use serde::Serialize;
use strum_macros::Display;
use thiserror::Error;

use super::profile::{DeviceProfile, LengthUnit};

/// Why an expression was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// Nothing to evaluate.
    #[error("empty expression")]
    Empty,
    /// Parentheses do not pair up.
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    /// An operator or `)` appears where an operand is required.
    #[error("missing operand at offset {0}")]
    MissingOperand(usize),
    /// Two operands follow each other without an operator.
    #[error("missing operator at offset {0}")]
    MissingOperator(usize),
    /// An operand is not a number with an optional unit.
    #[error("invalid operand {0:?}")]
    InvalidOperand(String),
}

/// Operators of the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[allow(missing_docs)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Negate,
    Ceil,
    Floor,
    Round,
}

impl Operator {
    const fn base_precedence(self) -> i32 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
            Self::Negate | Self::Ceil | Self::Floor | Self::Round => 3,
        }
    }

    const fn is_unary(self) -> bool {
        matches!(self, Self::Negate | Self::Ceil | Self::Floor | Self::Round)
    }
}

/// A tokenized operand or operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Token {
    /// A number with its unit; bare numbers are pixels.
    Length(f64, LengthUnit),
    /// `var(name)`
    Variable(String),
    /// An operator with its nesting-adjusted precedence.
    Operator {
        /// Operator.
        op: Operator,
        /// Precedence including `10 * depth`.
        precedence: i32,
    },
}

const FUNCTIONS: [(&str, Operator); 3] = [
    ("ceil(", Operator::Ceil),
    ("floor(", Operator::Floor),
    ("round(", Operator::Round),
];

/// Tokenize `text`, checking that operands and operators alternate and
/// that parentheses balance. Two operators may follow each other only when
/// the second one is unary.
///
/// # Errors
///
/// Returns the first problem found.
pub fn tokenize(text: &str) -> Result<Vec<Token>, ExpressionError> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut depth = 0_i32;
    // operators seen since the last operand, 1 at the start and after `(`
    let mut pending = 1_u32;
    let mut i = 0;

    let push_operator = |tokens: &mut Vec<Token>, op: Operator, depth: i32| {
        tokens.push(Token::Operator {
            op,
            precedence: op.base_precedence() + 10 * depth,
        });
    };

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '(' => {
                if pending == 0 {
                    return Err(ExpressionError::MissingOperator(i));
                }
                depth += 1;
                pending = 1;
                i += 1;
            }
            ')' => {
                if pending != 0 {
                    return Err(ExpressionError::MissingOperand(i));
                }
                depth -= 1;
                if depth < 0 {
                    return Err(ExpressionError::UnbalancedParentheses);
                }
                i += 1;
            }
            '+' | '*' | '/' => {
                if pending > 0 {
                    return Err(ExpressionError::MissingOperand(i));
                }
                let op = match c {
                    '+' => Operator::Add,
                    '*' => Operator::Multiply,
                    _ => Operator::Divide,
                };
                push_operator(&mut tokens, op, depth);
                pending += 1;
                i += 1;
            }
            '-' => {
                let op = match pending {
                    0 => Operator::Subtract,
                    1 => Operator::Negate,
                    _ => return Err(ExpressionError::MissingOperand(i)),
                };
                push_operator(&mut tokens, op, depth);
                pending += 1;
                i += 1;
            }
            _ => {
                if let Some((name, op)) = FUNCTIONS.iter().find(|(name, _)| starts_with(&chars, i, name)) {
                    match pending {
                        0 => return Err(ExpressionError::MissingOperator(i)),
                        1 | 2 => {}
                        _ => return Err(ExpressionError::MissingOperand(i)),
                    }
                    push_operator(&mut tokens, *op, depth);
                    pending += 1;
                    // leave the `(` to open the argument group
                    i += name.len() - 1;
                    continue;
                }
                if pending == 0 {
                    return Err(ExpressionError::MissingOperator(i));
                }
                if starts_with(&chars, i, "var(") {
                    let start = i + 4;
                    let end = chars[start..]
                        .iter()
                        .position(|&c| c == ')')
                        .map(|len| start + len)
                        .ok_or(ExpressionError::UnbalancedParentheses)?;
                    let name: String = chars[start..end].iter().collect();
                    tokens.push(Token::Variable(name.trim().to_string()));
                    i = end + 1;
                } else {
                    let end = chars[i..]
                        .iter()
                        .position(|&c| c.is_whitespace() || "()+-*/".contains(c))
                        .map_or(chars.len(), |len| i + len);
                    let operand: String = chars[i..end].iter().collect();
                    tokens.push(parse_operand(&operand)?);
                    i = end;
                }
                pending = 0;
            }
        }
    }

    if depth != 0 {
        return Err(ExpressionError::UnbalancedParentheses);
    }
    if tokens.is_empty() {
        return Err(ExpressionError::Empty);
    }
    if pending != 0 {
        return Err(ExpressionError::MissingOperand(chars.len()));
    }
    Ok(tokens)
}

fn starts_with(chars: &[char], at: usize, prefix: &str) -> bool {
    let mut rest = chars.get(at..).unwrap_or_default().iter();
    prefix.chars().all(|p| rest.next() == Some(&p))
}

fn parse_operand(text: &str) -> Result<Token, ExpressionError> {
    let (number, unit) = LengthUnit::split(text);
    number
        .parse::<f64>()
        .map(|value| Token::Length(value, unit))
        .map_err(|_| ExpressionError::InvalidOperand(text.to_string()))
}

/// Whether `text` tokenizes as an expression.
#[must_use]
pub fn is_valid(text: &str) -> bool {
    tokenize(text).is_ok()
}

/// Names of the variables referenced by `var(...)` inside `text`.
#[must_use]
pub fn variable_names(text: &str) -> Vec<String> {
    text.match_indices("var(")
        .filter_map(|(at, open)| {
            let rest = &text[at + open.len()..];
            rest.find(')').map(|end| rest[..end].trim().to_string())
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum Node {
    Value(f64),
    Op(Operator, i32),
}

/// Evaluate `text` to pixels.
///
/// `variable` resolves `var(name)` operands to pixels. Returns `None` for
/// a malformed expression, an unresolved variable or a division by zero.
pub fn evaluate(
    text: &str,
    profile: &DeviceProfile,
    variable: &mut dyn FnMut(&str) -> Option<f64>,
) -> Option<f64> {
    let tokens = tokenize(text).ok()?;
    let mut nodes = Vec::with_capacity(tokens.len());
    for token in tokens {
        nodes.push(match token {
            Token::Length(value, unit) => Node::Value(profile.to_pixels(value, unit)),
            Token::Variable(name) => Node::Value(variable(&name)?),
            Token::Operator { op, precedence } => Node::Op(op, precedence),
        });
    }
    reduce(nodes)
}

fn reduce(mut nodes: Vec<Node>) -> Option<f64> {
    while nodes.len() > 1 {
        let value_at = |nodes: &[Node], at: Option<usize>| match at.and_then(|at| nodes.get(at)) {
            Some(Node::Value(value)) => Some(*value),
            _ => None,
        };

        let mut best: Option<(usize, i32)> = None;
        for (i, node) in nodes.iter().enumerate() {
            let Node::Op(op, precedence) = *node else {
                continue;
            };
            let ready = value_at(&nodes, Some(i + 1)).is_some()
                && (op.is_unary() || value_at(&nodes, i.checked_sub(1)).is_some());
            if ready && best.is_none_or(|(_, top)| precedence > top) {
                best = Some((i, precedence));
            }
        }

        let (at, _) = best?;
        let Node::Op(op, _) = nodes[at] else {
            return None;
        };
        let rhs = value_at(&nodes, Some(at + 1))?;
        if op.is_unary() {
            let result = match op {
                Operator::Negate => -rhs,
                Operator::Ceil => rhs.ceil(),
                Operator::Floor => rhs.floor(),
                _ => rhs.round(),
            };
            let _ = nodes.splice(at..=at + 1, [Node::Value(result)]);
        } else {
            let lhs = value_at(&nodes, Some(at - 1))?;
            let result = match op {
                Operator::Add => lhs + rhs,
                Operator::Subtract => lhs - rhs,
                Operator::Multiply => lhs * rhs,
                _ => {
                    if rhs == 0.0 {
                        return None;
                    }
                    lhs / rhs
                }
            };
            let _ = nodes.splice(at - 1..=at + 1, [Node::Value(result)]);
        }
    }
    match nodes.first() {
        Some(Node::Value(value)) => Some(*value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(text: &str) -> Option<f64> {
        evaluate(text, &DeviceProfile::default(), &mut |_| None)
    }

    #[test]
    fn test_precedence_and_parentheses() {
        assert_eq!(eval("2 + 3 * 4"), Some(14.0));
        assert_eq!(eval("(2 + 3) * 4"), Some(20.0));
        assert_eq!(eval("8 - 2 - 1"), Some(5.0));
        assert_eq!(eval("2*(1+(2*3))"), Some(14.0));
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(eval("-5 + 2"), Some(-3.0));
        assert_eq!(eval("2 - -3"), Some(5.0));
        assert_eq!(eval("-(1 + 2) * 2"), Some(-6.0));
        assert!(!is_valid("2 - - -3"));
    }

    #[test]
    fn test_rounding_functions() {
        assert_eq!(eval("ceil(1.2) + floor(1.8)"), Some(3.0));
        assert_eq!(eval("-round(2.5)"), Some(-3.0));
    }

    #[test]
    fn test_units_and_variables() {
        let profile = DeviceProfile::new(2.0, 5.0);
        let mut lookup = |name: &str| (name == "gap").then_some(3.0);
        assert_eq!(evaluate("1un + 2mm + var(gap)", &profile, &mut lookup), Some(15.0));
        assert_eq!(evaluate("var(other)", &profile, &mut lookup), None);
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(tokenize(""), Err(ExpressionError::Empty));
        assert_eq!(tokenize("(1 + 2"), Err(ExpressionError::UnbalancedParentheses));
        assert!(matches!(tokenize("1 2"), Err(ExpressionError::MissingOperator(_))));
        assert!(matches!(tokenize("1 +"), Err(ExpressionError::MissingOperand(_))));
        assert!(matches!(tokenize("* 1"), Err(ExpressionError::MissingOperand(_))));
        assert!(matches!(tokenize("abc"), Err(ExpressionError::InvalidOperand(_))));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("4 / 0"), None);
        assert_eq!(eval("4 / (1 - 1)"), None);
    }

    #[test]
    fn test_variable_names() {
        assert_eq!(
            variable_names("var(a) * 2 + var( hb-param-screen-width )"),
            vec!["a".to_string(), "hb-param-screen-width".to_string()]
        );
    }
}
