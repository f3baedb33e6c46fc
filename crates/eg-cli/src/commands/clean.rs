use eg_mechanics::DiceExpr;

pub fn run(expression: &str) -> Result<(), String> {
    let expr = DiceExpr::parse(expression).map_err(|e| e.to_string())?;
    let canonical = expr.canonical();
    println!("{canonical}");
    if !canonical.has_symbols() {
        println!("  range {}..{}", canonical.min_value(), canonical.max_value());
    }
    Ok(())
}
