//! Dice roll results and aggregation.

use serde::{Deserialize, Serialize};

/// The result of rolling a single die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// Number of sides on the die.
    pub sides: u32,
    /// The value rolled. Negative for subtracted dice.
    pub value: i32,
}

/// The result of rolling a whole expression, die by die.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Individual die results, in expression order.
    pub dice: Vec<DieResult>,
    /// Sum of constants and resolved symbols.
    pub modifier: i32,
}

impl RollResult {
    /// Sum of all dice plus the modifier.
    pub fn total(&self) -> i32 {
        self.dice
            .iter()
            .fold(self.modifier, |acc, d| acc.saturating_add(d.value))
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.dice.iter().map(|d| d.value.to_string()).collect();
        write!(f, "[{}]", values.join(", "))?;
        match self.modifier {
            0 => {}
            m if m > 0 => write!(f, " + {m}")?,
            m => write!(f, " - {}", m.unsigned_abs())?,
        }
        write!(f, " = {}", self.total())
    }
}
