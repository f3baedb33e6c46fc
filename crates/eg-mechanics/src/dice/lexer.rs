//! Tokenizer and parser for dice expressions.
//!
//! The grammar is flat: operands separated by signs. Runs of signs collapse
//! (`+-` is `-`, `--` is `+`), so stored formulas like `D6+-D4` parse.

use logos::Logos;

use super::{DiceError, Term};

/// Internal logos token; the text is read back from the lexer slice.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[regex(r"[0-9]+")]
    Number,

    /// `[count]D<sides>`. Outranks `Word` so `d6` is a die, not a symbol.
    #[regex(r"[0-9]*[dD][0-9]+", priority = 3)]
    Die,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_']*")]
    Word,
}

/// Parse a dice expression into its terms, in source order.
pub(super) fn parse_terms(source: &str) -> Result<Vec<Term>, DiceError> {
    let malformed = |reason: String| DiceError::Malformed {
        expression: source.to_string(),
        reason,
    };

    let mut terms = Vec::new();
    let mut negative = false;
    let mut signed = false;
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let slice = lexer.slice();
        let raw = result
            .map_err(|()| malformed(format!("unexpected '{slice}' at offset {}", lexer.span().start)))?;

        let term = match raw {
            RawToken::Plus => {
                signed = true;
                continue;
            }
            RawToken::Minus => {
                negative = !negative;
                signed = true;
                continue;
            }
            RawToken::Number => {
                let value: i32 = slice
                    .parse()
                    .map_err(|_| malformed(format!("number '{slice}' is too large")))?;
                Term::Constant(if negative { -value } else { value })
            }
            RawToken::Die => parse_die(slice, negative).map_err(malformed)?,
            RawToken::Word => Term::Symbol {
                name: slice.to_uppercase(),
                negative,
            },
        };

        if !terms.is_empty() && !signed {
            return Err(malformed(format!("missing sign before '{slice}'")));
        }
        terms.push(term);
        negative = false;
        signed = false;
    }

    if signed {
        return Err(malformed("sign without an operand".to_string()));
    }
    Ok(terms)
}

/// Parse a die slice like `2d6`, `D20` or `0d4`.
fn parse_die(slice: &str, negative: bool) -> Result<Term, String> {
    let Some((count, sides)) = slice.split_once(['d', 'D']) else {
        return Err(format!("'{slice}' is not a die"));
    };
    let count: u32 = if count.is_empty() {
        1
    } else {
        count
            .parse()
            .map_err(|_| format!("die count in '{slice}' is too large"))?
    };
    let sides: i32 = sides
        .parse()
        .map_err(|_| format!("die sides in '{slice}' are too large"))?;
    if sides == 0 {
        return Err(format!("'{slice}' has zero sides"));
    }
    Ok(if negative {
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
    })
}
