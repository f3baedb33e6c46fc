//! Evaluation and canonicalization of parsed expressions.

use indexmap::IndexMap;
use rand::Rng;
use rand::rngs::StdRng;

use super::roll::{DieResult, RollResult};
use super::{DiceExpr, SymbolTable, Term};

/// Merge key for canonicalization: dice by side count, symbols by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum MergeKey {
    Die(u32),
    Symbol(String),
}

impl DiceExpr {
    /// Roll the expression. Symbols are resolved through `symbols`.
    pub fn evaluate(&self, symbols: &(impl SymbolTable + ?Sized), rng: &mut StdRng) -> i32 {
        self.terms.iter().fold(0i32, |acc, term| {
            let value = match term {
                Term::Constant(n) => *n,
                Term::Symbol { name, negative } => signed(symbols.value(name), *negative),
                Term::Dice { low, high, count } => (0..*count)
                    .fold(0i32, |sum, _| sum.saturating_add(rng.random_range(*low..=*high))),
            };
            acc.saturating_add(value)
        })
    }

    /// Roll the expression and keep every die for display.
    ///
    /// Consumes the RNG exactly like [`Self::evaluate`], so both give the
    /// same total for the same seed.
    pub fn roll(&self, symbols: &(impl SymbolTable + ?Sized), rng: &mut StdRng) -> RollResult {
        let mut result = RollResult::default();
        for term in &self.terms {
            match term {
                Term::Constant(n) => result.modifier = result.modifier.saturating_add(*n),
                Term::Symbol { name, negative } => {
                    let value = signed(symbols.value(name), *negative);
                    result.modifier = result.modifier.saturating_add(value);
                }
                Term::Dice { low, high, count } => {
                    let sides = term.sides().unwrap_or_default();
                    for _ in 0..*count {
                        result.dice.push(DieResult {
                            sides,
                            value: rng.random_range(*low..=*high),
                        });
                    }
                }
            }
        }
        result
    }

    /// The highest possible result, taking the top face of every die.
    /// Symbols count as 0.
    pub fn max_value(&self) -> i32 {
        self.bound(|_, high| high)
    }

    /// The lowest possible result, taking the bottom face of every die.
    /// Symbols count as 0.
    pub fn min_value(&self) -> i32 {
        self.bound(|low, _| low)
    }

    fn bound(&self, face: impl Fn(i32, i32) -> i32) -> i32 {
        self.terms.iter().fold(0i32, |acc, term| {
            let value = match term {
                Term::Constant(n) => *n,
                Term::Symbol { .. } => 0,
                Term::Dice { low, high, count } => {
                    face(*low, *high).saturating_mul(i32::try_from(*count).unwrap_or(i32::MAX))
                }
            };
            acc.saturating_add(value)
        })
    }

    /// The canonical form: one signed count per die size, one signed
    /// repetition per symbol, in first-seen order, and a single trailing
    /// constant. Net-zero terms are dropped.
    pub fn canonical(&self) -> DiceExpr {
        let mut coefficients: IndexMap<MergeKey, i64> = IndexMap::new();
        let mut constant: i64 = 0;

        for term in &self.terms {
            match term {
                Term::Constant(n) => constant += i64::from(*n),
                Term::Symbol { name, negative } => {
                    *coefficients.entry(MergeKey::Symbol(name.clone())).or_default() +=
                        if *negative { -1 } else { 1 };
                }
                Term::Dice { count, .. } => {
                    let sides = term.sides().unwrap_or_default();
                    let delta = i64::from(*count);
                    *coefficients.entry(MergeKey::Die(sides)).or_default() +=
                        if term.is_negative() { -delta } else { delta };
                }
            }
        }

        let mut terms = Vec::new();
        for (key, coefficient) in coefficients {
            if coefficient == 0 {
                continue;
            }
            let negative = coefficient < 0;
            match key {
                MergeKey::Die(sides) => {
                    let sides = i32::try_from(sides).unwrap_or(i32::MAX);
                    let count = u32::try_from(coefficient.unsigned_abs()).unwrap_or(u32::MAX);
                    terms.push(if negative {
                        Term::Dice {
                            low: -sides,
                            high: -1,
                            count,
                        }
                    } else {
                        Term::Dice {
                            low: 1,
                            high: sides,
                            count,
                        }
                    });
                }
                MergeKey::Symbol(name) => {
                    for _ in 0..coefficient.unsigned_abs() {
                        terms.push(Term::Symbol {
                            name: name.clone(),
                            negative,
                        });
                    }
                }
            }
        }
        if constant != 0 {
            let clamped = constant.clamp(i64::from(i32::MIN + 1), i64::from(i32::MAX));
            terms.push(Term::Constant(clamped as i32));
        }
        DiceExpr { terms }
    }
}

fn signed(value: i32, negative: bool) -> i32 {
    if negative { value.saturating_neg() } else { value }
}

#[cfg(test)]
mod tests {
    use super::super::{NoSymbols, canonicalize};
    use super::*;
    use rand::SeedableRng;

    fn canon(text: &str) -> String {
        canonicalize(text).unwrap()
    }

    #[test]
    fn canonical_forms() {
        insta::assert_snapshot!(canon("D6"), @"1d6");
        insta::assert_snapshot!(canon("DEX+D6"), @"DEX+1d6");
        insta::assert_snapshot!(canon("D6+-D4"), @"1d6-1d4");
        insta::assert_snapshot!(canon("DEX+STR+2D10+D6-D4"), @"DEX+STR+2d10+1d6-1d4");
        insta::assert_snapshot!(canon("DEX-STR"), @"DEX-STR");
        insta::assert_snapshot!(canon("POW+POW+POW"), @"POW+POW+POW");
        insta::assert_snapshot!(canon("POW+POW-POW"), @"POW");
        insta::assert_snapshot!(canon("POW+2D10-2D10"), @"POW");
        insta::assert_snapshot!(canon("POW+3D10-2d10"), @"POW+1d10");
        insta::assert_snapshot!(canon("DEX+STR+DEX"), @"DEX+DEX+STR");
        insta::assert_snapshot!(canon("DEX+d10+d20+1d10+d6+2d10"), @"DEX+4d10+1d20+1d6");
        insta::assert_snapshot!(canon("DEX+10+d10+20"), @"DEX+1d10+30");
        insta::assert_snapshot!(canon("DEX+10+d10-20"), @"DEX+1d10-10");
        insta::assert_snapshot!(canon("DEX+10+d10-5-5"), @"DEX+1d10");
        insta::assert_snapshot!(
            canon("STR+DEX+20+5D10+-4D10+2D10+-4D10+2D10"),
            @"STR+DEX+1d10+20"
        );
    }

    #[test]
    fn canonical_edge_cases() {
        assert_eq!(canon(""), "0");
        assert_eq!(canon("STR-STR+1d4-1d4"), "0");
        assert_eq!(canon("-1d4"), "-1d4");
        assert_eq!(canon("-3+STR"), "STR-3");
        assert_eq!(canon("D6+STR+1d6"), "2d6+STR");
        assert_eq!(canon("0d6+2"), "2");
    }

    #[test]
    fn canonical_is_idempotent() {
        for text in ["DEX+10+d10-20", "D6+-D4", "-STR-STR+3d6-1", ""] {
            let once = canon(text);
            assert_eq!(canon(&once), once);
        }
    }

    #[test]
    fn max_and_min() {
        let expr = DiceExpr::parse("5D100-D100").unwrap();
        assert_eq!(expr.max_value(), 499);
        assert_eq!(expr.min_value(), 5 - 100);
        assert_eq!(DiceExpr::parse("1d6+6").unwrap().min_value(), 7);
        assert_eq!(DiceExpr::parse("STR+3").unwrap().max_value(), 3);
        assert_eq!(DiceExpr::default().max_value(), 0);
    }

    #[test]
    fn evaluate_resolves_symbols() {
        let mut rng = StdRng::seed_from_u64(1);
        let expr = DiceExpr::parse("STR+DEX-CON+5").unwrap();
        let stats = [("STR", 10), ("DEX", 14), ("CON", 3)];
        assert_eq!(expr.evaluate(&stats, &mut rng), 26);
        assert_eq!(expr.evaluate(&NoSymbols, &mut rng), 5);
    }

    #[test]
    fn evaluate_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let expr = DiceExpr::parse("3d6-1d4+2").unwrap();
        for _ in 0..1000 {
            let value = expr.evaluate(&NoSymbols, &mut rng);
            assert!((expr.min_value()..=expr.max_value()).contains(&value));
        }
    }

    #[test]
    fn roll_matches_evaluate() {
        let expr = DiceExpr::parse("2d6+STR-1d4").unwrap();
        let stats = [("STR", 4)];
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let total = expr.evaluate(&stats, &mut a);
        let roll = expr.roll(&stats, &mut b);
        assert_eq!(roll.total(), total);
        assert_eq!(roll.dice.len(), 3);
        assert_eq!(roll.modifier, 4);
        assert!(roll.dice[2].value < 0);
    }
}
