use std::path::Path;

use colored::Colorize;
use eg_mechanics::Generator;

use super::sheet;
use crate::Format;

pub fn run(library: &Path, name: &str, seed: Option<u64>, format: Format) -> Result<(), String> {
    let lib = super::load_library(library)?;
    let party = lib.find_party(name).map_err(|e| e.to_string())?;

    let mut generator = Generator::new(&lib, super::config(seed));
    let generated = generator.party(party);
    for failure in &generated.failures {
        eprintln!("  {}", format!("warning: {failure}").yellow());
    }

    match format {
        Format::Json => super::print_json(&generated)?,
        Format::Text => {
            println!(
                "  {} ({} members)",
                generated.name.bold(),
                generated.members.len()
            );
            if !generated.notes.is_empty() {
                println!("  {}", generated.notes.dimmed());
            }
            sheet::print_features(&generated.features, 0);
            for member in &generated.members {
                println!();
                sheet::print_instance(member, 0);
            }
        }
    }
    Ok(())
}
