//! Region rules: a comparator and an integer target.
//!
//! Puzzle files write rules either as a string (`"<=4"`, `"!=0"`, `"12"`)
//! or as an object (`{"op": ">", "value": 3}`). Both forms compile to a
//! single `Rule` value here, once, at load time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Comparison applied to a region's pip sum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">=")]
    Ge,
}

impl Comparator {
    /// Two-character symbols must be tried before their one-character
    /// prefixes.
    const BY_PREFIX: [(&'static str, Comparator); 6] = [
        ("<=", Comparator::Le),
        (">=", Comparator::Ge),
        ("!=", Comparator::Ne),
        ("<", Comparator::Lt),
        (">", Comparator::Gt),
        ("=", Comparator::Eq),
    ];

    /// Look up a comparator by its symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::BY_PREFIX
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|&(_, op)| op)
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Ne => "!=",
            Comparator::Lt => "<",
            Comparator::Gt => ">",
            Comparator::Le => "<=",
            Comparator::Ge => ">=",
        }
    }

    /// Compare `lhs` against `rhs`.
    #[must_use]
    pub const fn test(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Comparator::Eq => lhs == rhs,
            Comparator::Ne => lhs != rhs,
            Comparator::Lt => lhs < rhs,
            Comparator::Gt => lhs > rhs,
            Comparator::Le => lhs <= rhs,
            Comparator::Ge => lhs >= rhs,
        }
    }
}

/// Reasons a rule cannot be compiled.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleParseError {
    #[error("empty rule")]
    Empty,
    #[error("unknown comparator {0:?}")]
    UnknownOperator(String),
    #[error("rule target {0:?} is not an integer")]
    InvalidValue(String),
}

/// A compiled region constraint.
///
/// ```
/// use pips_engine::regions::{Comparator, Rule};
///
/// let rule: Rule = "<=4".parse().unwrap();
/// assert_eq!(rule, Rule::new(Comparator::Le, 4));
/// assert!(rule.is_satisfied_by(3));
/// assert!(!rule.is_satisfied_by(5));
///
/// // A bare integer means equality.
/// assert_eq!("7".parse::<Rule>().unwrap(), Rule::new(Comparator::Eq, 7));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub op: Comparator,
    pub value: i64,
}

impl Rule {
    #[must_use]
    pub const fn new(op: Comparator, value: i64) -> Self {
        Self { op, value }
    }

    /// Parse `[comparator]integer`; no comparator means `=`.
    pub fn parse(text: &str) -> Result<Self, RuleParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RuleParseError::Empty);
        }

        let (op, rest) = Comparator::BY_PREFIX
            .iter()
            .find_map(|&(symbol, op)| text.strip_prefix(symbol).map(|rest| (op, rest)))
            .unwrap_or((Comparator::Eq, text));

        let rest = rest.trim();
        let value = rest
            .parse::<i64>()
            .map_err(|_| RuleParseError::InvalidValue(rest.to_string()))?;

        Ok(Self { op, value })
    }

    /// Compile a rule as written in a puzzle definition.
    pub fn from_spec(spec: &RuleSpec) -> Result<Self, RuleParseError> {
        match spec {
            RuleSpec::Text(text) => Self::parse(text),
            RuleSpec::Number(value) => Ok(Self::new(Comparator::Eq, *value)),
            RuleSpec::Structured { op, value } => {
                let op = Comparator::from_symbol(op.trim())
                    .ok_or_else(|| RuleParseError::UnknownOperator(op.clone()))?;
                Ok(Self::new(op, *value))
            }
        }
    }

    /// Apply the rule to a pip sum.
    #[must_use]
    pub const fn is_satisfied_by(&self, sum: i64) -> bool {
        self.op.test(sum, self.value)
    }
}

impl std::str::FromStr for Rule {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.op.symbol(), self.value)
    }
}

/// A rule as it appears in a puzzle file, before compilation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    Text(String),
    Number(i64),
    Structured { op: String, value: i64 },
}

impl RuleSpec {
    /// Evaluate an uncompiled rule. Anything that fails to compile,
    /// including an unrecognized comparator, is unsatisfied.
    #[must_use]
    pub fn is_satisfied_by(&self, sum: i64) -> bool {
        Rule::from_spec(self).is_ok_and(|rule| rule.is_satisfied_by(sum))
    }
}
