use std::path::Path;

use colored::Colorize;

pub fn run(library: &Path) -> Result<(), String> {
    let lib = super::load_library(library)?;
    let issues = eg_mechanics::validate_library(&lib);

    for issue in &issues {
        if issue.is_error {
            eprintln!("  {}", issue.to_string().red());
        } else {
            eprintln!("  {}", issue.to_string().yellow());
        }
    }

    let errors = issues.iter().filter(|i| i.is_error).count();
    let warnings = issues.len() - errors;
    if errors > 0 {
        return Err(format!(
            "{} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        ));
    }

    println!("  All checks passed for '{}'.", library.display());
    println!(
        "  {} templates, {} parties, {} warning{}",
        lib.template_count(),
        lib.parties().len(),
        warnings,
        if warnings == 1 { "" } else { "s" },
    );
    Ok(())
}
