use std::path::Path;

use colored::Colorize;
use eg_mechanics::Generator;

use super::sheet;
use crate::Format;

pub fn run(
    library: &Path,
    key: &str,
    count: u32,
    seed: Option<u64>,
    format: Format,
) -> Result<(), String> {
    let lib = super::load_library(library)?;
    let template = lib.resolve(key).map_err(|e| e.to_string())?;
    let id = template.id;

    let mut generator = Generator::new(&lib, super::config(seed));
    let instances = if count == 1 {
        vec![
            generator
                .generate(id, None, true)
                .map_err(|e| e.to_string())?,
        ]
    } else {
        generator.batch(id, count).map_err(|e| e.to_string())?
    };

    match format {
        Format::Json => super::print_json(&instances)?,
        Format::Text => {
            for (i, inst) in instances.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                sheet::print_instance(inst, 0);
            }
            let usage = lib.usage(id);
            println!();
            println!(
                "  {}",
                format!(
                    "{} generated ({} batch{}, {} instance{})",
                    template.name,
                    usage.used,
                    if usage.used == 1 { "" } else { "es" },
                    usage.generated,
                    if usage.generated == 1 { "" } else { "s" },
                )
                .dimmed()
            );
        }
    }
    Ok(())
}
