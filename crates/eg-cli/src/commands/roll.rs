use colored::Colorize;
use eg_mechanics::DiceExpr;
use indexmap::IndexMap;

pub fn run(expression: &str, symbols: &[String], seed: Option<u64>) -> Result<(), String> {
    let expr = DiceExpr::parse(expression).map_err(|e| e.to_string())?;
    let table = parse_symbols(symbols)?;
    let mut rng = super::config(seed).rng();

    let result = expr.roll(&table, &mut rng);
    println!("  {expr}: {result}");
    if expr.has_symbols() && table.is_empty() {
        println!("  {}", "symbols without values count as 0".dimmed());
    }
    Ok(())
}

/// Parse `NAME=VALUE` pairs; names are uppercased.
fn parse_symbols(pairs: &[String]) -> Result<IndexMap<String, i32>, String> {
    pairs
        .iter()
        .map(|pair| {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected NAME=VALUE, got \"{pair}\""))?;
            let value = value
                .trim()
                .parse::<i32>()
                .map_err(|_| format!("invalid value for {name}: \"{value}\""))?;
            Ok((name.trim().to_uppercase(), value))
        })
        .collect()
}
