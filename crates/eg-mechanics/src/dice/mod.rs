//! The dice-expression language.
//!
//! Formulas such as `2D6+STR-1D4` are parsed into a flat list of signed
//! [`Term`]s. An expression can be evaluated against a [`SymbolTable`]
//! (usually a creature's rolled stats), bounded without rolling, or
//! rewritten into its canonical text form.
//!
//! ```
//! use eg_mechanics::dice::{self, DiceExpr};
//!
//! let expr: DiceExpr = "DEX+d10+10+2d10-20".parse().unwrap();
//! assert_eq!(expr.to_string(), "DEX+1d10+10+2d10-20");
//! assert_eq!(dice::canonicalize("DEX+d10+10+2d10-20").unwrap(), "DEX+3d10-10");
//! ```

mod expr;
mod lexer;
pub mod roll;

pub use roll::{DieResult, RollResult};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A dice expression that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// The text does not follow the `±operand` grammar.
    #[error("malformed dice expression \"{expression}\": {reason}")]
    Malformed {
        /// The offending expression.
        expression: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// One signed operand of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    /// A signed integer.
    Constant(i32),
    /// A reference resolved at evaluation time, uppercased.
    Symbol {
        /// Symbol name, e.g. `STR`.
        name: String,
        /// Whether the symbol is subtracted.
        negative: bool,
    },
    /// `count` dice, each uniform in `[low, high]`. A subtracted die
    /// `-CdS` is stored as `(-S, -1, C)`.
    Dice {
        /// Lowest face.
        low: i32,
        /// Highest face.
        high: i32,
        /// Number of dice.
        count: u32,
    },
}

impl Term {
    /// Number of sides of a die term, `None` for other terms.
    pub fn sides(&self) -> Option<u32> {
        match self {
            Self::Dice { low, high, .. } => Some(if *low >= 1 {
                high.unsigned_abs()
            } else {
                low.unsigned_abs()
            }),
            _ => None,
        }
    }

    /// Returns true for subtracted terms.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Constant(n) => *n < 0,
            Self::Symbol { negative, .. } => *negative,
            Self::Dice { low, .. } => *low < 0,
        }
    }
}

impl fmt::Display for Term {
    /// Writes the term with its sign, e.g. `+2d6`, `-STR`, `+4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { '-' } else { '+' };
        match self {
            Self::Constant(n) => write!(f, "{sign}{}", n.unsigned_abs()),
            Self::Symbol { name, .. } => write!(f, "{sign}{name}"),
            Self::Dice { count, .. } => {
                write!(f, "{sign}{count}d{}", self.sides().unwrap_or_default())
            }
        }
    }
}

/// A parsed dice expression: an ordered sequence of signed terms.
///
/// The empty expression is valid and evaluates to 0.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiceExpr {
    /// Terms in source order.
    pub terms: Vec<Term>,
}

impl DiceExpr {
    /// Parse an expression. Case-insensitive; whitespace is ignored.
    pub fn parse(text: &str) -> Result<Self, DiceError> {
        Ok(Self {
            terms: lexer::parse_terms(text)?,
        })
    }

    /// Returns true if the expression has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if any term refers to a symbol.
    pub fn has_symbols(&self) -> bool {
        self.terms.iter().any(|t| matches!(t, Term::Symbol { .. }))
    }
}

impl FromStr for DiceExpr {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DiceExpr {
    /// Terms as written, without a leading `+`. The empty expression
    /// prints as `0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("0");
        }
        for (i, term) in self.terms.iter().enumerate() {
            let text = term.to_string();
            if i == 0 {
                f.write_str(text.strip_prefix('+').unwrap_or(&text))?;
            } else {
                f.write_str(&text)?;
            }
        }
        Ok(())
    }
}

/// Parse `text` and return its canonical form.
pub fn canonicalize(text: &str) -> Result<String, DiceError> {
    Ok(DiceExpr::parse(text)?.canonical().to_string())
}

// ---------------------------------------------------------------------------
// Symbol tables
// ---------------------------------------------------------------------------

/// Resolves symbol values during evaluation. Missing symbols count as 0.
pub trait SymbolTable {
    /// Look up a symbol by its uppercased name.
    fn lookup(&self, symbol: &str) -> Option<i32>;

    /// The value of a symbol, 0 when it is not defined.
    fn value(&self, symbol: &str) -> i32 {
        self.lookup(symbol).unwrap_or(0)
    }
}

/// The neutral table: every symbol is 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSymbols;

impl SymbolTable for NoSymbols {
    fn lookup(&self, _symbol: &str) -> Option<i32> {
        None
    }
}

impl SymbolTable for IndexMap<String, i32> {
    fn lookup(&self, symbol: &str) -> Option<i32> {
        self.get(symbol).copied().or_else(|| {
            self.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(symbol))
                .map(|(_, v)| *v)
        })
    }
}

impl SymbolTable for HashMap<String, i32> {
    fn lookup(&self, symbol: &str) -> Option<i32> {
        self.get(symbol).copied().or_else(|| {
            self.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(symbol))
                .map(|(_, v)| *v)
        })
    }
}

impl SymbolTable for [(&str, i32)] {
    fn lookup(&self, symbol: &str) -> Option<i32> {
        self.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(symbol))
            .map(|(_, v)| *v)
    }
}

impl<const N: usize> SymbolTable for [(&str, i32); N] {
    fn lookup(&self, symbol: &str) -> Option<i32> {
        self.as_slice().lookup(symbol)
    }
}
